use kif_model::{Item, Property, Snak, Statement, Value};
use kif_results::{
    DecodeError, DecodeHints, DecoderOptions, ResultsDecoder, ResultsPage, SomeValuePolicy,
};

const PAGE: &str = r#"{
  "head": {"vars": ["subject", "property", "value"]},
  "results": {"bindings": [
    {"subject": {"type": "uri", "value": "http://www.wikidata.org/entity/Q1"},
     "property": {"type": "uri", "value": "http://www.wikidata.org/entity/P19"},
     "value": {"type": "bnode", "value": "t1"}},
    {"subject": {"type": "uri", "value": "http://www.wikidata.org/entity/Q2"},
     "property": {"type": "uri", "value": "http://www.wikidata.org/entity/P19"},
     "value": {"type": "uri",
               "value": "http://www.wikidata.org/.well-known/genid/9f5c1e05b7c9f2f1"}},
    {"subject": {"type": "uri", "value": "http://www.wikidata.org/entity/Q3"},
     "property": {"type": "uri", "value": "http://www.wikidata.org/entity/P19"}},
    {"subject": {"type": "uri", "value": "http://www.wikidata.org/entity/Q4"},
     "property": {"type": "uri", "value": "http://www.wikidata.org/entity/P19"},
     "value": {"type": "uri", "value": "http://www.wikidata.org/entity/Q90"}}
  ]}
}"#;

fn decode(options: DecoderOptions) -> Result<Vec<Statement>, DecodeError> {
    let page = ResultsPage::from_json(PAGE.as_bytes())?;
    let decoded = ResultsDecoder::new(options).decode_page(&page, &DecodeHints::default())?;
    assert!(decoded.errors.is_empty());
    Ok(decoded
        .statements
        .into_iter()
        .map(|decoded| decoded.statement)
        .collect())
}

fn p19() -> Property {
    Property::wd("P19")
}

#[test]
fn test_snak_kinds() -> Result<(), DecodeError> {
    let statements = decode(DecoderOptions::default())?;
    assert_eq!(
        statements,
        vec![
            Statement::new(Item::wd("Q1"), Snak::some_value(p19())),
            Statement::new(Item::wd("Q2"), Snak::some_value(p19())),
            Statement::new(Item::wd("Q3"), Snak::no_value(p19())),
            Statement::new(Item::wd("Q4"), Snak::value(p19(), Item::wd("Q90"))),
        ]
    );
    Ok(())
}

#[test]
fn test_skolem_iris_as_plain_values() -> Result<(), DecodeError> {
    let options = DecoderOptions {
        some_value: SomeValuePolicy::default().without_skolem_pattern(),
        ..DecoderOptions::default()
    };
    let statements = decode(options)?;
    assert_eq!(statements[0].snak, Snak::some_value(p19()));
    assert_eq!(
        statements[1].snak.as_value(),
        Some(&Value::Iri(kif_model::NamedNode::new_unchecked(
            "http://www.wikidata.org/.well-known/genid/9f5c1e05b7c9f2f1"
        )))
    );
    Ok(())
}

#[test]
fn test_blank_nodes_rejected_without_policy() -> Result<(), DecodeError> {
    let page = ResultsPage::from_json(PAGE.as_bytes())?;
    let decoder = ResultsDecoder::new(DecoderOptions {
        some_value: SomeValuePolicy::none(),
        ..DecoderOptions::default()
    });
    let decoded = decoder.decode_page(&page, &DecodeHints::default())?;
    assert_eq!(decoded.statements.len(), 3);
    assert_eq!(decoded.errors.len(), 1);
    assert_eq!(decoded.errors[0].0, 0);
    assert!(matches!(
        decoded.errors[0].1,
        DecodeError::UnexpectedTermKind {
            actual: "a blank node",
            ..
        }
    ));
    Ok(())
}
