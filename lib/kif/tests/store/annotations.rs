use crate::{instance_of, page, row, wikidata_store, Endpoint};
use kif::filter::Filter;
use kif::model::{AnnotationRecord, Datatype, Item, Property, Rank, Snak};
use std::error::Error;

const STATEMENT: &str = "http://www.wikidata.org/entity/statement/";

fn annotated_filter() -> Filter {
    Filter::new()
        .with_subject(Item::wd("Q42"))
        .with_property(Property::wd("P31"))
        .with_annotated(true)
}

/// A page of statements of Q42, each row with the id of its statement node.
fn statement_page(rows: &[(&str, &str, &str)]) -> Vec<u8> {
    let rows = rows
        .iter()
        .map(|(value, rank, id)| {
            let row = row(value, rank);
            let row = row.trim_end().trim_end_matches('}');
            format!(r#"{row}, "statement": {{"type": "uri", "value": "{STATEMENT}{id}"}}}}"#)
        })
        .collect::<Vec<_>>();
    format!(
        r#"{{
          "head": {{"vars": ["subject", "property", "datatype", "value", "rank", "statement"]}},
          "results": {{"bindings": [{}]}}
        }}"#,
        rows.join(",")
    )
    .into_bytes()
}

/// An item-valued qualifier of statement `id`, or a snak of its reference `reference`.
fn annotation_row(id: &str, reference: Option<&str>, property: &str, value: &str) -> String {
    let reference = reference.map_or_else(String::new, |reference| {
        format!(
            r#""reference": {{"type": "uri", "value": "http://www.wikidata.org/reference/{reference}"}},"#
        )
    });
    format!(
        r#"{{
          "statement": {{"type": "uri", "value": "{STATEMENT}{id}"}}, {reference}
          "property": {{"type": "uri", "value": "http://www.wikidata.org/entity/{property}"}},
          "datatype": {{"type": "uri", "value": "http://wikiba.se/ontology#WikibaseItem"}},
          "value": {{"type": "uri", "value": "http://www.wikidata.org/entity/{value}"}}
        }}"#
    )
}

fn annotation_page(rows: &[String]) -> Vec<u8> {
    format!(
        r#"{{
          "head": {{"vars": ["statement", "reference", "property", "datatype", "value"]}},
          "results": {{"bindings": [{}]}}
        }}"#,
        rows.join(",")
    )
    .into_bytes()
}

fn item_snak(property: &str, value: &str) -> Snak {
    Snak::value(
        Property::wd(property).with_range(Datatype::Item),
        Item::wd(value),
    )
}

#[tokio::test]
async fn test_annotated_filter_fetches_qualifiers_and_references() -> Result<(), Box<dyn Error>> {
    let endpoint = Endpoint::with_pages([
        statement_page(&[("Q5", "Preferred", "Q42-a"), ("Q215627", "Normal", "Q42-b")]),
        annotation_page(&[
            annotation_row("Q42-a", None, "P642", "Q1"),
            annotation_row("Q42-a", Some("r1"), "P248", "Q2"),
            annotation_row("Q42-a", Some("r1"), "P143", "Q3"),
        ]),
    ]);
    let store = wikidata_store(&endpoint);

    let statements = store.filter(&annotated_filter()).await?;
    assert_eq!(statements.len(), 2);
    assert_eq!(statements[0].statement, instance_of("Q5"));
    assert_eq!(
        statements[0].annotation,
        Some(
            AnnotationRecord::default()
                .with_qualifier(item_snak("P642", "Q1"))
                .with_reference([item_snak("P248", "Q2"), item_snak("P143", "Q3")])
                .with_rank(Rank::Preferred)
        )
    );
    assert_eq!(
        statements[1].annotation,
        Some(AnnotationRecord::default().with_rank(Rank::Normal))
    );

    let queries = endpoint.queries();
    assert_eq!(queries.len(), 2);
    assert!(queries[0].starts_with("select distinct ?subject ?property ?datatype ?value ?rank ?statement "));
    assert!(queries[1].contains(&format!(
        "values ?statement {{ <{STATEMENT}Q42-a> <{STATEMENT}Q42-b> }}"
    )));
    assert!(queries[1].contains("<http://www.w3.org/ns/prov#wasDerivedFrom>"));
    Ok(())
}

#[tokio::test]
async fn test_plain_filter_has_no_annotations() -> Result<(), Box<dyn Error>> {
    let endpoint = Endpoint::with_pages([page(&[row("Q5", "Preferred")])]);
    let store = wikidata_store(&endpoint);

    let statements = store.filter(&annotated_filter().with_annotated(false)).await?;
    assert_eq!(statements.len(), 1);
    assert_eq!(statements[0].annotation, None);
    assert_eq!(statements[0].node, None);

    let queries = endpoint.queries();
    assert_eq!(queries.len(), 1);
    assert!(!queries[0].contains("?statement <http://www.w3.org/ns/prov#wasDerivedFrom>"));
    Ok(())
}

#[tokio::test]
async fn test_statements_without_nodes_get_their_rank_only() -> Result<(), Box<dyn Error>> {
    let endpoint = Endpoint::with_pages([page(&[row("Q5", "Deprecated")])]);
    let store = wikidata_store(&endpoint);

    let statements = store.filter(&annotated_filter()).await?;
    assert_eq!(
        statements[0].annotation,
        Some(AnnotationRecord::default().with_rank(Rank::Deprecated))
    );
    assert_eq!(endpoint.queries().len(), 1);
    Ok(())
}
