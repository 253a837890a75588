//! The channel through which a [SparqlStore](crate::store::SparqlStore) reaches its endpoint.

use async_trait::async_trait;
use std::time::Duration;
use thiserror::Error;

/// Sends SPARQL queries to an endpoint.
///
/// Implementations return the raw body of the response, which must be in the SPARQL 1.1 Query
/// Results JSON format. HTTP, authentication and retries are the business of the implementation.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Evaluates `query`, giving up after `timeout` if one is given.
    async fn query(&self, query: &str, timeout: Option<Duration>)
        -> Result<Vec<u8>, TransportError>;
}

/// An error raised while talking to an endpoint.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum TransportError {
    /// The endpoint did not answer in time.
    #[error("The query timed out after {0:?}.")]
    Timeout(Duration),
    /// The endpoint answered with an error status.
    #[error("The endpoint answered with status {status}: {message}")]
    Status { status: u16, message: String },
    /// The endpoint could not be reached.
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error("{0}")]
    Other(String),
}
