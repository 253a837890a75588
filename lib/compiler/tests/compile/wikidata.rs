use crate::{column_names, compile, compile_valid};
use kif_compiler::mappings::wikidata;
use kif_compiler::{CompileOptions, CompiledQuery, FilterCompiler, StaticPropertySchema};
use kif_filter::{Filter, Fingerprint};
use kif_model::{
    Datatype, DatatypeMask, Item, NamedNode, Property, Quantity, Rank, Snak, SnakMask,
    Statement, Value,
};
use kif_results::{DecodeHints, ResultsDecoder, ResultsPage};
use std::error::Error;
use std::sync::Arc;

#[test]
fn test_simple_filter() -> Result<(), Box<dyn Error>> {
    let filter = Filter::new().with_subject(Item::wd("Q42"));
    let query = compile_valid(wikidata::registry(), &filter)?;

    assert!(query
        .text
        .contains("<http://www.wikidata.org/entity/Q42> ?claim ?statement ."));
    assert!(query.text.contains("?statement ?statement_property ?value ."));
    assert!(!query.text.contains("optional"));
    assert_eq!(
        column_names(&query),
        vec!["subject", "property", "datatype", "value", "rank"]
    );
    assert_eq!(
        query.hints,
        DecodeHints {
            subject_mask: DatatypeMask::ENTITY,
            value: None,
        }
    );
    Ok(())
}

#[test]
fn test_concrete_statement() -> Result<(), Box<dyn Error>> {
    let filter = Filter::new()
        .with_subject(Item::wd("Q42"))
        .with_property(Property::wd("P31"))
        .with_value(Item::wd("Q5"));
    let query = compile_valid(wikidata::registry(), &filter)?;

    insta::assert_snapshot!(query.text, @r"
    select ?subject ?property ?datatype ?value ?rank where {
      {
        <http://www.wikidata.org/entity/Q42> <http://www.wikidata.org/prop/P31> ?statement .
        <http://www.wikidata.org/entity/P31> <http://wikiba.se/ontology#propertyType> ?datatype .
        values ?datatype { <http://wikiba.se/ontology#WikibaseItem> }
        ?statement <http://wikiba.se/ontology#rank> ?rank .
        {
          ?statement <http://www.wikidata.org/prop/statement/P31> ?value .
          values ?value { <http://www.wikidata.org/entity/Q5> }
        }
        values ?subject { <http://www.wikidata.org/entity/Q42> }
        values ?property { <http://www.wikidata.org/entity/P31> }
      }
    }
    ");
    assert_eq!(query.hints.value, Some(Value::Item(Item::wd("Q5"))));
    Ok(())
}

#[test]
fn test_quantity_round_trip() -> Result<(), Box<dyn Error>> {
    let quantity = Quantity::new(0)
        .with_unit(Item::wd("Q11570"))
        .with_bounds(-1, 1);
    let filter = Filter::new()
        .with_subject(Item::wd("Q42"))
        .with_property(Property::wd("P2067"))
        .with_value(Value::Quantity(quantity.clone()));
    let query = compile_valid(wikidata::registry(), &filter)?;

    insta::assert_snapshot!(query.text, @r#"
    select ?subject ?property ?datatype ?value ?amount ?unit ?lower ?upper ?rank where {
      {
        <http://www.wikidata.org/entity/Q42> <http://www.wikidata.org/prop/P2067> ?statement .
        <http://www.wikidata.org/entity/P2067> <http://wikiba.se/ontology#propertyType> ?datatype .
        values ?datatype { <http://wikiba.se/ontology#Quantity> }
        ?statement <http://wikiba.se/ontology#rank> ?rank .
        {
          ?statement <http://www.wikidata.org/prop/statement/P2067> ?value .
          ?statement <http://www.wikidata.org/prop/statement/value/P2067> ?value_node .
          {
            ?value_node <http://wikiba.se/ontology#quantityAmount> ?amount .
            ?value_node <http://wikiba.se/ontology#quantityUnit> ?unit .
            ?value_node <http://wikiba.se/ontology#quantityLowerBound> ?lower .
            filter (?lower = "-1"^^<http://www.w3.org/2001/XMLSchema#decimal>)
            ?value_node <http://wikiba.se/ontology#quantityUpperBound> ?upper .
            filter (?upper = "1"^^<http://www.w3.org/2001/XMLSchema#decimal>)
            filter (?amount = "0"^^<http://www.w3.org/2001/XMLSchema#decimal>)
            values ?unit { <http://www.wikidata.org/entity/Q11570> }
          }
        }
        values ?subject { <http://www.wikidata.org/entity/Q42> }
        values ?property { <http://www.wikidata.org/entity/P2067> }
      }
    }
    "#);

    // The row a store returns for the query.
    let page = ResultsPage::from_json(
        br#"{
          "head": {"vars": ["subject", "property", "datatype", "value", "amount", "unit",
                            "lower", "upper", "rank"]},
          "results": {"bindings": [{
            "subject": {"type": "uri", "value": "http://www.wikidata.org/entity/Q42"},
            "property": {"type": "uri", "value": "http://www.wikidata.org/entity/P2067"},
            "datatype": {"type": "uri", "value": "http://wikiba.se/ontology#Quantity"},
            "value": {"type": "literal", "value": "+0",
                      "datatype": "http://www.w3.org/2001/XMLSchema#decimal"},
            "amount": {"type": "literal", "value": "+0",
                       "datatype": "http://www.w3.org/2001/XMLSchema#decimal"},
            "unit": {"type": "uri", "value": "http://www.wikidata.org/entity/Q11570"},
            "lower": {"type": "literal", "value": "-1",
                      "datatype": "http://www.w3.org/2001/XMLSchema#decimal"},
            "upper": {"type": "literal", "value": "+1",
                      "datatype": "http://www.w3.org/2001/XMLSchema#decimal"},
            "rank": {"type": "uri", "value": "http://wikiba.se/ontology#NormalRank"}
          }]}
        }"#,
    )?;
    let expected = Statement::new(
        Item::wd("Q42"),
        Snak::value(
            Property::wd("P2067").with_range(Datatype::Quantity),
            Value::Quantity(quantity),
        ),
    );
    let decoder = ResultsDecoder::default();
    for hints in [query.hints.clone(), DecodeHints::default()] {
        let decoded = decoder.decode_page(&page, &hints)?;
        assert!(decoded.errors.is_empty());
        assert_eq!(decoded.statements.len(), 1);
        assert_eq!(decoded.statements[0].statement, expected);
        assert_eq!(decoded.statements[0].rank, Some(Rank::Normal));
    }
    Ok(())
}

#[test]
fn test_empty_filter_compiles_to_nothing() -> Result<(), Box<dyn Error>> {
    let filter = Filter::new()
        .with_subject(Item::wd("Q42"))
        .with_subject_mask(DatatypeMask::PROPERTY);
    assert_eq!(compile(wikidata::registry(), &filter)?, None);

    let filter = Filter::new().with_snak_mask(SnakMask::EMPTY);
    assert_eq!(compile(wikidata::registry(), &filter)?, None);
    Ok(())
}

#[test]
fn test_value_disjunction_is_a_union() -> Result<(), Box<dyn Error>> {
    let filter = Filter::new()
        .with_subject(Fingerprint::any_of([Item::wd("Q1"), Item::wd("Q2")]))
        .with_property(Property::wd("P31"));
    let query = compile_valid(wikidata::registry(), &filter)?;

    assert_eq!(query.text.matches("\n  union\n").count(), 1);
    assert!(query
        .text
        .contains("<http://www.wikidata.org/entity/Q1> <http://www.wikidata.org/prop/P31> ?statement ."));
    assert!(query
        .text
        .contains("<http://www.wikidata.org/entity/Q2> <http://www.wikidata.org/prop/P31> ?statement ."));
    assert_eq!(query.hints.value, None);
    Ok(())
}

#[test]
fn test_subject_snak_auxiliary_pattern() -> Result<(), Box<dyn Error>> {
    let filter = Filter::new()
        .with_subject(Snak::value(Property::wd("P31"), Item::wd("Q5")))
        .with_property(Property::wd("P569"));
    let query = compile_valid(wikidata::registry(), &filter)?;

    assert!(query
        .text
        .contains("?s0_subject <http://www.wikidata.org/prop/P31> ?s0_statement ."));
    assert!(query
        .text
        .contains("values ?s0_value { <http://www.wikidata.org/entity/Q5> }"));
    assert!(query.text.contains("filter (?s0_subject = ?subject)"));
    assert_eq!(
        column_names(&query),
        vec!["subject", "property", "datatype", "value", "rank"]
    );
    Ok(())
}

/// The trimmed lines of the auxiliary group whose variables start with `prefix`, along with the
/// filter joining it to the main pattern.
fn auxiliary_lines(query: &CompiledQuery, prefix: &str) -> String {
    query
        .text
        .lines()
        .filter(|line| line.contains(prefix))
        .map(str::trim)
        .collect::<Vec<_>>()
        .join("\n")
}

#[test]
fn test_value_snak_auxiliary_pattern() -> Result<(), Box<dyn Error>> {
    let filter = Filter::new()
        .with_property(Property::wd("P40"))
        .with_value(Snak::value(Property::wd("P31"), Item::wd("Q5")));
    let query = compile_valid(wikidata::registry(), &filter)?;

    insta::assert_snapshot!(auxiliary_lines(&query, "?v0_"), @r"
    ?v0_subject <http://www.wikidata.org/prop/P31> ?v0_statement .
    <http://www.wikidata.org/entity/P31> <http://wikiba.se/ontology#propertyType> ?v0_datatype .
    values ?v0_datatype { <http://wikiba.se/ontology#WikibaseItem> }
    ?v0_statement <http://wikiba.se/ontology#rank> ?v0_rank .
    ?v0_statement <http://www.wikidata.org/prop/statement/P31> ?v0_value .
    values ?v0_value { <http://www.wikidata.org/entity/Q5> }
    values ?v0_property { <http://www.wikidata.org/entity/P31> }
    filter (?v0_subject = ?value)
    ");
    assert!(!query.text.contains("?s0_"));
    Ok(())
}

#[test]
fn test_property_snak_auxiliary_pattern() -> Result<(), Box<dyn Error>> {
    let filter = Filter::new()
        .with_subject(Item::wd("Q42"))
        .with_property(Snak::value(Property::wd("P31"), Item::wd("Q18608871")));
    let query = compile_valid(wikidata::registry(), &filter)?;

    insta::assert_snapshot!(auxiliary_lines(&query, "?p0_"), @r"
    ?p0_subject <http://www.wikidata.org/prop/P31> ?p0_statement .
    <http://www.wikidata.org/entity/P31> <http://wikiba.se/ontology#propertyType> ?p0_datatype .
    values ?p0_datatype { <http://wikiba.se/ontology#WikibaseItem> }
    ?p0_statement <http://wikiba.se/ontology#rank> ?p0_rank .
    ?p0_statement <http://www.wikidata.org/prop/statement/P31> ?p0_value .
    values ?p0_value { <http://www.wikidata.org/entity/Q18608871> }
    values ?p0_property { <http://www.wikidata.org/entity/P31> }
    filter (?p0_subject = ?property)
    ");
    Ok(())
}

#[test]
fn test_snaks_in_every_slot() -> Result<(), Box<dyn Error>> {
    let human = Snak::value(Property::wd("P31"), Item::wd("Q5"));
    let filter = Filter::new()
        .with_subject(human.clone())
        .with_property(Snak::value(Property::wd("P31"), Item::wd("Q18608871")))
        .with_value(human);
    let query = compile_valid(wikidata::registry(), &filter)?;

    assert!(query.text.contains("filter (?s0_subject = ?subject)"));
    assert!(query.text.contains("filter (?p1_subject = ?property)"));
    assert!(query.text.contains("filter (?v2_subject = ?value)"));
    Ok(())
}

#[test]
fn test_no_value_snaks() -> Result<(), Box<dyn Error>> {
    let filter = Filter::new()
        .with_subject(Item::wd("Q42"))
        .with_property(Property::wd("P40"))
        .with_snak_mask(SnakMask::NO_VALUE_SNAK);
    let query = compile_valid(wikidata::registry(), &filter)?;

    assert!(query.text.contains(
        "?statement <http://www.w3.org/1999/02/22-rdf-syntax-ns#type> \
         <http://www.wikidata.org/prop/novalue/P40> ."
    ));
    assert_eq!(
        column_names(&query),
        vec!["subject", "property", "datatype", "rank"]
    );

    let page = ResultsPage::from_json(
        br#"{
          "head": {"vars": ["subject", "property", "datatype", "rank"]},
          "results": {"bindings": [{
            "subject": {"type": "uri", "value": "http://www.wikidata.org/entity/Q42"},
            "property": {"type": "uri", "value": "http://www.wikidata.org/entity/P40"},
            "datatype": {"type": "uri", "value": "http://wikiba.se/ontology#WikibaseItem"},
            "rank": {"type": "uri", "value": "http://wikiba.se/ontology#NormalRank"}
          }]}
        }"#,
    )?;
    let decoded = ResultsDecoder::default().decode_page(&page, &query.hints)?;
    assert_eq!(
        decoded.statements[0].statement,
        Statement::new(
            Item::wd("Q42"),
            Snak::no_value(Property::wd("P40").with_range(Datatype::Item))
        )
    );
    Ok(())
}

#[test]
fn test_schema_range_selects_value_nodes() -> Result<(), Box<dyn Error>> {
    let schema = StaticPropertySchema::new()
        .with_range(Property::wd("P2067").iri().clone(), Datatype::Quantity);
    let compiler =
        FilterCompiler::new(Arc::new(wikidata::registry())).with_schema(Arc::new(schema));
    let filter = Filter::new()
        .with_subject(Item::wd("Q42"))
        .with_property(Property::wd("P2067"));
    let query = compiler
        .compile(&filter, &CompileOptions::default())?
        .ok_or("the filter compiled to no query")?;
    spargebra::Query::parse(&query.text, None)?;

    assert!(query
        .text
        .contains("values ?datatype { <http://wikiba.se/ontology#Quantity> }"));
    // Bounds are optional for quantities without concrete bounds.
    assert!(query.text.contains("optional {"));
    assert_eq!(
        column_names(&query),
        vec![
            "subject", "property", "datatype", "value", "amount", "unit", "lower", "upper", "rank"
        ]
    );
    Ok(())
}

#[test]
fn test_paging_options() -> Result<(), Box<dyn Error>> {
    let compiler = FilterCompiler::new(Arc::new(wikidata::registry()));
    let options = CompileOptions {
        limit: Some(10),
        offset: Some(20),
        distinct: true,
    };
    let query = compiler
        .compile(&Filter::new().with_subject(Item::wd("Q42")), &options)?
        .ok_or("the filter compiled to no query")?;
    assert!(query.text.starts_with("select distinct ?subject"));
    assert!(query.text.ends_with("}\nlimit 10\noffset 20\n"));
    spargebra::Query::parse(&query.text, None)?;
    Ok(())
}

#[test]
fn test_language_restricts_texts_only() -> Result<(), Box<dyn Error>> {
    let filter = Filter::new()
        .with_subject(Item::wd("Q42"))
        .with_property(Property::wd("P1559"))
        .with_language("en");
    let query = compile_valid(wikidata::registry(), &filter)?;
    assert!(query.text.contains(
        r#"filter (!((?datatype = <http://wikiba.se/ontology#Monolingualtext>)) || (lang(?value) = "en"))"#
    ));
    Ok(())
}

#[test]
fn test_annotated_filter_projects_statements() -> Result<(), Box<dyn Error>> {
    let filter = Filter::new()
        .with_subject(Item::wd("Q42"))
        .with_property(Property::wd("P31"));
    let query = compile_valid(wikidata::registry(), &filter)?;
    assert!(!column_names(&query).contains(&"statement"));

    let query = compile_valid(wikidata::registry(), &filter.with_annotated(true))?;
    assert_eq!(
        column_names(&query),
        vec!["subject", "property", "datatype", "value", "rank", "statement"]
    );
    Ok(())
}

#[test]
fn test_annotation_query() -> Result<(), Box<dyn Error>> {
    let compiler = FilterCompiler::new(Arc::new(wikidata::registry()));
    assert_eq!(compiler.compile_annotations(&[])?, None);

    let statements = ["Q42-1", "Q42-2"].map(|id| {
        NamedNode::new_unchecked(format!("http://www.wikidata.org/entity/statement/{id}"))
    });
    let query = compiler
        .compile_annotations(&statements)?
        .ok_or("no annotation query")?;
    spargebra::Query::parse(&query.text, None)?;

    insta::assert_snapshot!(query.text, @r"
    select distinct ?statement ?reference ?property ?datatype ?value where {
      values ?statement { <http://www.wikidata.org/entity/statement/Q42-1> <http://www.wikidata.org/entity/statement/Q42-2> }
      {
        ?statement ?qualifier ?value .
        ?property <http://wikiba.se/ontology#qualifier> ?qualifier .
      }
      union
      {
        ?statement <http://www.w3.org/ns/prov#wasDerivedFrom> ?reference .
        ?reference ?reference_property ?value .
        ?property <http://wikiba.se/ontology#reference> ?reference_property .
      }
      ?property <http://wikiba.se/ontology#propertyType> ?datatype .
    }
    ");
    assert_eq!(query.hints, DecodeHints::default());
    Ok(())
}
