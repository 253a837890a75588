#![cfg(test)]

mod annotations;
mod paging;

use async_trait::async_trait;
use kif::compiler::mappings::wikidata;
use kif::model::{Datatype, Item, Property, Snak, Statement};
use kif::store::SparqlStore;
use kif::transport::{Transport, TransportError};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// An endpoint answering with canned pages, in order, and recording the queries it receives.
///
/// Once the canned pages are exhausted, every query gets an empty page.
#[derive(Default)]
struct Endpoint {
    pages: Mutex<VecDeque<Result<Vec<u8>, TransportError>>>,
    queries: Mutex<Vec<String>>,
}

impl Endpoint {
    fn with_pages(pages: impl IntoIterator<Item = Vec<u8>>) -> Arc<Self> {
        Arc::new(Self {
            pages: Mutex::new(pages.into_iter().map(Ok).collect()),
            queries: Mutex::default(),
        })
    }

    fn failing(error: TransportError) -> Arc<Self> {
        Arc::new(Self {
            pages: Mutex::new([Err(error)].into()),
            queries: Mutex::default(),
        })
    }

    fn queries(&self) -> Vec<String> {
        self.queries.lock().unwrap().clone()
    }
}

#[async_trait]
impl Transport for Endpoint {
    async fn query(
        &self,
        query: &str,
        _timeout: Option<Duration>,
    ) -> Result<Vec<u8>, TransportError> {
        self.queries.lock().unwrap().push(query.to_owned());
        self.pages
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(page(&[])))
    }
}

fn wikidata_store(endpoint: &Arc<Endpoint>) -> SparqlStore {
    SparqlStore::new(endpoint.clone(), Arc::new(wikidata::registry()))
}

/// A row stating that Q42 is an instance of `value`, with the given rank.
fn row(value: &str, rank: &str) -> String {
    format!(
        r#"{{
          "subject": {{"type": "uri", "value": "http://www.wikidata.org/entity/Q42"}},
          "property": {{"type": "uri", "value": "http://www.wikidata.org/entity/P31"}},
          "datatype": {{"type": "uri", "value": "http://wikiba.se/ontology#WikibaseItem"}},
          "value": {{"type": "uri", "value": "http://www.wikidata.org/entity/{value}"}},
          "rank": {{"type": "uri", "value": "http://wikiba.se/ontology#{rank}Rank"}}
        }}"#
    )
}

fn page(rows: &[String]) -> Vec<u8> {
    format!(
        r#"{{
          "head": {{"vars": ["subject", "property", "datatype", "value", "rank"]}},
          "results": {{"bindings": [{}]}}
        }}"#,
        rows.join(",")
    )
    .into_bytes()
}

fn instance_of(value: &str) -> Statement {
    Statement::new(
        Item::wd("Q42"),
        Snak::value(
            Property::wd("P31").with_range(Datatype::Item),
            Item::wd(value),
        ),
    )
}
