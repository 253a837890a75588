use kif_results::DecoderOptions;
use std::time::Duration;

/// The configuration of a [SparqlStore](crate::store::SparqlStore).
#[derive(Clone, Debug)]
pub struct StoreOptions {
    /// The number of rows requested per page.
    ///
    /// A page size of zero is treated as one.
    pub page_size: usize,
    /// The maximum number of statements returned by a single filter, if any.
    pub limit: Option<usize>,
    /// The timeout of each page request.
    pub timeout: Option<Duration>,
    /// Whether to ask the endpoint for distinct rows.
    pub distinct: bool,
    pub decoder: DecoderOptions,
}

impl Default for StoreOptions {
    fn default() -> Self {
        Self {
            page_size: 100,
            limit: None,
            timeout: None,
            distinct: true,
            decoder: DecoderOptions::default(),
        }
    }
}
