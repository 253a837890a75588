use kif_model::{Item, Property, Snak, Statement};
use kif_results::{DecodeError, DecodeHints, DecoderOptions, ResultsDecoder, ResultsPage};

const PAGE: &str = r#"{
  "head": {"vars": ["subject", "property", "value"]},
  "results": {"bindings": [
    {"subject": {"type": "uri", "value": "http://www.wikidata.org/entity/Q1"},
     "property": {"type": "uri", "value": "http://www.wikidata.org/entity/P31"},
     "value": {"type": "uri", "value": "http://www.wikidata.org/entity/Q5"}},
    {"subject": {"type": "uri", "value": "http://www.wikidata.org/entity/Q2"},
     "property": {"type": "uri", "value": "http://www.wikidata.org/entity/P31"},
     "value": {"type": "uri", "value": "not an iri"}},
    {"subject": {"type": "uri", "value": "http://www.wikidata.org/entity/Q3"},
     "property": {"type": "uri", "value": "http://www.wikidata.org/entity/P31"},
     "value": {"type": "uri", "value": "http://www.wikidata.org/entity/Q5"}}
  ]}
}"#;

#[test]
fn test_malformed_row_does_not_fail_the_page() -> Result<(), DecodeError> {
    let page = ResultsPage::from_json(PAGE.as_bytes())?;
    assert_eq!(page.len(), 3);

    let decoded =
        ResultsDecoder::new(DecoderOptions::default()).decode_page(&page, &DecodeHints::default())?;
    let p31 = Property::wd("P31");
    let statements = decoded
        .statements
        .into_iter()
        .map(|decoded| decoded.statement)
        .collect::<Vec<_>>();
    assert_eq!(
        statements,
        vec![
            Statement::new(Item::wd("Q1"), Snak::value(p31.clone(), Item::wd("Q5"))),
            Statement::new(Item::wd("Q3"), Snak::value(p31, Item::wd("Q5"))),
        ]
    );
    assert_eq!(decoded.errors.len(), 1);
    assert_eq!(decoded.errors[0].0, 1);
    assert!(matches!(decoded.errors[0].1, DecodeError::MalformedRow { .. }));
    Ok(())
}

#[test]
fn test_malformed_row_fails_a_strict_decoder() -> Result<(), DecodeError> {
    let page = ResultsPage::from_json(PAGE.as_bytes())?;
    let decoder = ResultsDecoder::new(DecoderOptions {
        strict: true,
        ..DecoderOptions::default()
    });
    let result = decoder.decode_page(&page, &DecodeHints::default());
    assert!(matches!(result, Err(DecodeError::MalformedRow { .. })));
    Ok(())
}
