//! Evaluates [filters](Filter) against a SPARQL endpoint.
//!
//! The entry point of the module is the [`SparqlStore`] struct.

use crate::error::StoreError;
use crate::options::StoreOptions;
use crate::transport::Transport;
use futures::stream::{self, BoxStream};
use futures::{StreamExt, TryStreamExt};
use kif_compiler::{CompileOptions, FilterCompiler, MappingRegistry, PropertySchema};
use kif_filter::Filter;
use kif_model::{AnnotationRecord, Statement};
use kif_results::{DecodedAnnotations, DecodedStatement, ResultsDecoder, ResultsPage};
use std::collections::BTreeSet;
use std::sync::Arc;

/// A knowledge graph behind a SPARQL endpoint.
///
/// Filters are compiled into SPARQL with a [MappingRegistry], evaluated through a [Transport]
/// and decoded back into statements. Results are fetched page by page, strictly one page after
/// the other.
#[derive(Clone)]
pub struct SparqlStore {
    transport: Arc<dyn Transport>,
    compiler: FilterCompiler,
    decoder: ResultsDecoder,
    options: StoreOptions,
}

/// The position of a filter stream in its results.
struct Cursor {
    filter: Filter,
    /// The number of rows consumed so far.
    offset: usize,
    /// The number of statements still to be returned, if limited.
    remaining: Option<usize>,
}

impl SparqlStore {
    /// Creates a store with the default [StoreOptions].
    pub fn new(transport: Arc<dyn Transport>, registry: Arc<MappingRegistry>) -> Self {
        let options = StoreOptions::default();
        Self {
            transport,
            compiler: FilterCompiler::new(registry),
            decoder: ResultsDecoder::new(options.decoder.clone()),
            options,
        }
    }

    /// Consults `schema` for the range of properties that filters leave open.
    #[must_use]
    pub fn with_schema(mut self, schema: Arc<dyn PropertySchema>) -> Self {
        self.compiler = self.compiler.with_schema(schema);
        self
    }

    #[must_use]
    pub fn with_options(mut self, options: StoreOptions) -> Self {
        self.decoder = ResultsDecoder::new(options.decoder.clone());
        self.options = options;
        self
    }

    pub fn options(&self) -> &StoreOptions {
        &self.options
    }

    pub fn compiler(&self) -> &FilterCompiler {
        &self.compiler
    }

    /// Returns every statement matching `filter`, up to the configured limit.
    pub async fn filter(&self, filter: &Filter) -> Result<Vec<DecodedStatement>, StoreError> {
        self.filter_stream(filter.clone()).try_collect().await
    }

    /// Streams the statements matching `filter`.
    ///
    /// A page is only requested once the statements of the previous one have been consumed, and
    /// dropping the stream stops the requests. The stream ends after its first error.
    pub fn filter_stream(
        &self,
        filter: Filter,
    ) -> BoxStream<'static, Result<DecodedStatement, StoreError>> {
        let store = self.clone();
        let cursor = Cursor {
            filter,
            offset: 0,
            remaining: self.options.limit,
        };
        stream::unfold(Some(cursor), move |cursor| {
            let store = store.clone();
            async move {
                let Some(cursor) = cursor else {
                    return None;
                };
                match store.next_page(cursor).await {
                    Ok((statements, next)) => Some((Ok(statements), next)),
                    Err(error) => Some((Err(error), None)),
                }
            }
        })
        .map_ok(|statements| stream::iter(statements.into_iter().map(Ok)))
        .try_flatten()
        .boxed()
    }

    /// Checks whether the store contains `statement`, with any rank.
    pub async fn contains(&self, statement: &Statement) -> Result<bool, StoreError> {
        let snak = &statement.snak;
        let mut filter = Filter::new()
            .with_subject(statement.subject.clone())
            .with_property(snak.property().clone())
            .with_snak_mask(snak.kind().into());
        if let Some(value) = snak.as_value() {
            filter = filter.with_value(value.clone());
        }
        let options = StoreOptions {
            limit: Some(1),
            ..self.options.clone()
        };
        let mut statements = self.clone().with_options(options).filter_stream(filter);
        Ok(statements.try_next().await?.is_some())
    }

    /// Fetches the page at `cursor`, returning its statements and the cursor of the next page
    /// if there is one.
    async fn next_page(
        &self,
        mut cursor: Cursor,
    ) -> Result<(Vec<DecodedStatement>, Option<Cursor>), StoreError> {
        let page_size = self.options.page_size.max(1);
        let requested = match cursor.remaining {
            Some(0) => return Ok((Vec::new(), None)),
            Some(remaining) => remaining.min(page_size),
            None => page_size,
        };
        let options = CompileOptions {
            limit: Some(requested),
            offset: (cursor.offset > 0).then_some(cursor.offset),
            distinct: self.options.distinct,
        };
        let Some(query) = self.compiler.compile(&cursor.filter, &options)? else {
            return Ok((Vec::new(), None));
        };

        tracing::debug!(offset = cursor.offset, limit = requested, "Requesting page");
        let body = self
            .transport
            .query(&query.text, self.options.timeout)
            .await?;
        let page = ResultsPage::from_json(&body)?;
        let rows = page.len();
        let decoded = self.decoder.decode_page(&page, &query.hints)?;
        let rejected = decoded.errors.len();

        // The query may be looser than the filter.
        let mut statements = decoded
            .statements
            .into_iter()
            .filter(|decoded| cursor.filter.matches(&decoded.statement, decoded.rank))
            .collect::<Vec<_>>();
        if let Some(remaining) = &mut cursor.remaining {
            statements.truncate(*remaining);
            *remaining -= statements.len();
        }
        if cursor.filter.is_annotated() {
            self.annotate(&mut statements).await?;
        }
        tracing::debug!(
            rows,
            rejected,
            statements = statements.len(),
            "Received page"
        );

        cursor.offset += rows;
        let next = (rows >= requested && cursor.remaining != Some(0)).then_some(cursor);
        Ok((statements, next))
    }

    /// Fetches the qualifiers and references of `statements` with one more query, and attaches
    /// them along with the rank.
    ///
    /// Statements without a node, or stores whose registry cannot reach annotations, get their
    /// rank only.
    async fn annotate(&self, statements: &mut [DecodedStatement]) -> Result<(), StoreError> {
        let nodes = statements
            .iter()
            .filter_map(|decoded| decoded.node.clone())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect::<Vec<_>>();
        let annotations = match self.compiler.compile_annotations(&nodes)? {
            Some(query) => {
                tracing::debug!(statements = nodes.len(), "Requesting annotations");
                let body = self
                    .transport
                    .query(&query.text, self.options.timeout)
                    .await?;
                let page = ResultsPage::from_json(&body)?;
                let annotations = self.decoder.decode_annotations(&page)?;
                tracing::debug!(
                    rows = page.len(),
                    rejected = annotations.errors.len(),
                    "Received annotations"
                );
                annotations
            }
            None => DecodedAnnotations::default(),
        };

        for decoded in statements {
            let rank = decoded.rank.unwrap_or_default();
            decoded.annotation = Some(match &decoded.node {
                Some(node) => annotations.record(node, rank),
                None => AnnotationRecord::default().with_rank(rank),
            });
        }
        Ok(())
    }
}
