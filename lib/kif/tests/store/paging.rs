use crate::{instance_of, page, row, wikidata_store, Endpoint};
use futures::StreamExt;
use kif::compiler::mappings::pubchem;
use kif::compiler::CompileError;
use kif::error::StoreError;
use kif::filter::Filter;
use kif::model::{DatatypeMask, Item, Property, Rank, RankMask, Snak, Statement};
use kif::options::StoreOptions;
use kif::results::DecodeError;
use kif::store::SparqlStore;
use kif::transport::TransportError;
use std::error::Error;
use std::sync::Arc;
use std::time::Duration;

fn instance_of_filter() -> Filter {
    Filter::new()
        .with_subject(Item::wd("Q42"))
        .with_property(Property::wd("P31"))
}

fn paged(page_size: usize, limit: Option<usize>) -> StoreOptions {
    StoreOptions {
        page_size,
        limit,
        ..StoreOptions::default()
    }
}

#[tokio::test]
async fn test_filter_single_page() -> Result<(), Box<dyn Error>> {
    let endpoint = Endpoint::with_pages([page(&[
        row("Q5", "Normal"),
        row("Q215627", "Preferred"),
    ])]);
    let store = wikidata_store(&endpoint);

    let statements = store.filter(&instance_of_filter()).await?;
    assert_eq!(statements.len(), 2);
    assert_eq!(statements[0].statement, instance_of("Q5"));
    assert_eq!(statements[0].rank, Some(Rank::Normal));
    assert_eq!(statements[1].statement, instance_of("Q215627"));
    assert_eq!(statements[1].rank, Some(Rank::Preferred));

    let queries = endpoint.queries();
    assert_eq!(queries.len(), 1);
    assert!(queries[0].starts_with("select distinct "));
    assert!(queries[0].ends_with("}\nlimit 100\n"));
    Ok(())
}

#[tokio::test]
async fn test_pages_until_short_page() -> Result<(), Box<dyn Error>> {
    let endpoint = Endpoint::with_pages([
        page(&[row("Q1", "Normal"), row("Q2", "Normal")]),
        page(&[row("Q3", "Normal"), row("Q4", "Normal")]),
        page(&[row("Q5", "Normal")]),
    ]);
    let store = wikidata_store(&endpoint).with_options(paged(2, None));

    let statements = store.filter(&instance_of_filter()).await?;
    assert_eq!(
        statements
            .into_iter()
            .map(|decoded| decoded.statement)
            .collect::<Vec<_>>(),
        ["Q1", "Q2", "Q3", "Q4", "Q5"].map(instance_of)
    );

    let queries = endpoint.queries();
    assert_eq!(queries.len(), 3);
    assert!(queries[0].ends_with("}\nlimit 2\n"));
    assert!(queries[1].ends_with("}\nlimit 2\noffset 2\n"));
    assert!(queries[2].ends_with("}\nlimit 2\noffset 4\n"));
    Ok(())
}

#[tokio::test]
async fn test_limit_shrinks_the_last_page() -> Result<(), Box<dyn Error>> {
    let endpoint = Endpoint::with_pages([
        page(&[row("Q1", "Normal"), row("Q2", "Normal")]),
        page(&[row("Q3", "Normal")]),
    ]);
    let store = wikidata_store(&endpoint).with_options(paged(2, Some(3)));

    assert_eq!(store.filter(&instance_of_filter()).await?.len(), 3);
    let queries = endpoint.queries();
    assert_eq!(queries.len(), 2);
    assert!(queries[1].ends_with("}\nlimit 1\noffset 2\n"));
    Ok(())
}

#[tokio::test]
async fn test_rows_outside_of_the_filter_are_dropped() -> Result<(), Box<dyn Error>> {
    let endpoint = Endpoint::with_pages([page(&[
        row("Q5", "Preferred"),
        row("Q6", "Normal"),
    ])]);
    let store = wikidata_store(&endpoint);

    let filter = instance_of_filter().with_rank_mask(RankMask::PREFERRED);
    let statements = store.filter(&filter).await?;
    assert_eq!(statements.len(), 1);
    assert_eq!(statements[0].statement, instance_of("Q5"));
    Ok(())
}

#[tokio::test]
async fn test_dropping_the_stream_stops_requests() -> Result<(), Box<dyn Error>> {
    let endpoint = Endpoint::with_pages([
        page(&[row("Q1", "Normal")]),
        page(&[row("Q2", "Normal")]),
    ]);
    let store = wikidata_store(&endpoint).with_options(paged(1, None));

    let first = store
        .filter_stream(instance_of_filter())
        .take(1)
        .collect::<Vec<_>>()
        .await;
    assert_eq!(first.len(), 1);
    assert_eq!(
        first[0].as_ref().map_err(ToString::to_string)?.statement,
        instance_of("Q1")
    );
    assert_eq!(endpoint.queries().len(), 1);
    Ok(())
}

#[tokio::test]
async fn test_empty_filter_sends_no_query() -> Result<(), Box<dyn Error>> {
    let endpoint = Arc::new(Endpoint::default());
    let store = wikidata_store(&endpoint);

    let filter = instance_of_filter().with_subject_mask(DatatypeMask::PROPERTY);
    assert!(store.filter(&filter).await?.is_empty());
    assert!(endpoint.queries().is_empty());
    Ok(())
}

#[tokio::test]
async fn test_transport_errors_are_retryable() {
    let endpoint = Endpoint::failing(TransportError::Timeout(Duration::from_secs(5)));
    let store = wikidata_store(&endpoint);

    let error = store.filter(&instance_of_filter()).await.unwrap_err();
    assert!(matches!(error, StoreError::Transport(TransportError::Timeout(_))));
    assert!(error.is_retryable());
}

#[tokio::test]
async fn test_compile_errors_are_not_retryable() {
    let endpoint = Arc::new(Endpoint::default());
    let store = SparqlStore::new(
        endpoint.clone(),
        Arc::new(pubchem::registry("http://localhost/compound/")),
    );

    let error = store
        .filter(&instance_of_filter().with_property(Property::wd("P1")))
        .await
        .unwrap_err();
    assert!(matches!(
        error,
        StoreError::Compile(CompileError::NoMatchingEntry { .. })
    ));
    assert!(!error.is_retryable());
    assert!(endpoint.queries().is_empty());
}

#[tokio::test]
async fn test_malformed_answer_is_a_decode_error() {
    let endpoint = Endpoint::with_pages([br#"{"head": {}, "boolean": true}"#.to_vec()]);
    let store = wikidata_store(&endpoint);

    let error = store.filter(&instance_of_filter()).await.unwrap_err();
    assert!(matches!(error, StoreError::Decode(DecodeError::NotSolutions)));
    assert!(!error.is_retryable());
}

#[tokio::test]
async fn test_contains() -> Result<(), Box<dyn Error>> {
    let endpoint = Endpoint::with_pages([page(&[row("Q5", "Normal")]), page(&[])]);
    let store = wikidata_store(&endpoint);

    assert!(store.contains(&instance_of("Q5")).await?);
    assert!(
        !store
            .contains(&Statement::new(
                Item::wd("Q42"),
                Snak::value(Property::wd("P31"), Item::wd("Q6"))
            ))
            .await?
    );

    let queries = endpoint.queries();
    assert_eq!(queries.len(), 2);
    assert!(queries[0].contains("values ?value { <http://www.wikidata.org/entity/Q5> }"));
    assert!(queries[0].ends_with("}\nlimit 1\n"));
    Ok(())
}
