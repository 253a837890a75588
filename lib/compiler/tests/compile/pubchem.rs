use crate::{compile, compile_valid};
use kif_compiler::mappings::pubchem;
use kif_compiler::{CompileError, MappingRegistry};
use kif_filter::Filter;
use kif_model::vocab::wd;
use kif_model::{Datatype, Item, Property, Quantity, Rank, Snak, Statement, Value};
use kif_results::{ResultsDecoder, ResultsPage};
use std::error::Error;

const LOCAL: &str = "http://localhost/compound/";

fn registry() -> MappingRegistry {
    pubchem::registry(LOCAL)
}

fn aspirin() -> Item {
    Item::new(kif_model::NamedNode::new_unchecked(format!(
        "{}CID2244",
        pubchem::COMPOUND
    )))
}

fn mass_filter(unit: Item) -> Filter {
    Filter::new()
        .with_subject(aspirin())
        .with_property(Property::new(wd::MASS))
        .with_value(Value::Quantity(Quantity::new(180).with_unit(unit)))
}

#[test]
fn test_descriptor() -> Result<(), Box<dyn Error>> {
    let filter = Filter::new()
        .with_subject(aspirin())
        .with_property(Property::new(wd::CANONICAL_SMILES));
    let query = compile_valid(registry(), &filter)?;

    insta::assert_snapshot!(query.text, @r"
    select ?subject ?property ?datatype ?value ?rank where {
      {
        <http://localhost/compound/CID2244> <http://www.w3.org/1999/02/22-rdf-syntax-ns#type> <http://semanticscience.org/resource/SIO_010004> .
        <http://localhost/compound/CID2244> <http://semanticscience.org/resource/SIO_000008> ?descriptor .
        ?descriptor <http://www.w3.org/1999/02/22-rdf-syntax-ns#type> <http://semanticscience.org/resource/CHEMINF_000376> .
        ?descriptor <http://semanticscience.org/resource/SIO_000300> ?value_local .
        bind (?value_local as ?value)
        values ?subject { <http://rdf.ncbi.nlm.nih.gov/pubchem/compound/CID2244> }
        values ?property { <http://www.wikidata.org/entity/P233> }
        values ?datatype { <http://wikiba.se/ontology#String> }
        values ?rank { <http://wikiba.se/ontology#NormalRank> }
      }
    }
    ");
    Ok(())
}

#[test]
fn test_cid_of_any_compound() -> Result<(), Box<dyn Error>> {
    let filter = Filter::new().with_property(Property::new(wd::PUBCHEM_CID));
    let query = compile_valid(registry(), &filter)?;

    insta::assert_snapshot!(query.text, @r#"
    select ?subject ?property ?datatype ?value ?rank where {
      {
        ?subject_local <http://www.w3.org/1999/02/22-rdf-syntax-ns#type> <http://semanticscience.org/resource/SIO_010004> .
        bind (substr(str(?subject_local), 30) as ?value)
        filter (strstarts(str(?subject_local), "http://localhost/compound/"))
        bind (iri(concat("http://rdf.ncbi.nlm.nih.gov/pubchem/compound/", substr(str(?subject_local), 27))) as ?subject)
        values ?property { <http://www.wikidata.org/entity/P662> }
        values ?datatype { <http://wikiba.se/ontology#ExternalId> }
        values ?rank { <http://wikiba.se/ontology#NormalRank> }
      }
    }
    "#);
    Ok(())
}

#[test]
fn test_unit_mismatch_skips_the_only_entry() -> Result<(), Box<dyn Error>> {
    let result = compile(registry(), &mass_filter(Item::new(wd::KILOGRAM)));
    assert_eq!(
        result,
        Err(CompileError::NoMatchingEntry {
            property: "<http://www.wikidata.org/entity/P2067>".to_owned()
        })
    );

    let query = compile_valid(registry(), &mass_filter(Item::new(wd::GRAM_PER_MOLE)))?;
    assert!(query.text.contains(
        r#"filter (?value_local = "180"^^<http://www.w3.org/2001/XMLSchema#decimal>)"#
    ));
    Ok(())
}

#[test]
fn test_subject_outside_of_the_mirror() {
    let filter = Filter::new()
        .with_subject(Item::wd("Q18216"))
        .with_property(Property::new(wd::INCHIKEY));
    assert!(matches!(
        compile(registry(), &filter),
        Err(CompileError::NoMatchingEntry { .. })
    ));
}

#[test]
fn test_every_property_of_a_compound() -> Result<(), Box<dyn Error>> {
    let query = compile_valid(registry(), &Filter::new().with_subject(aspirin()))?;
    assert_eq!(query.text.matches("\n  union\n").count(), 4);
    assert!(query
        .text
        .contains(r#"values ?value { "2244" }"#));
    Ok(())
}

#[test]
fn test_mass_round_trip() -> Result<(), Box<dyn Error>> {
    let filter = mass_filter(Item::new(wd::GRAM_PER_MOLE));
    let query = compile_valid(registry(), &filter)?;

    let page = ResultsPage::from_json(
        br#"{
          "head": {"vars": ["subject", "property", "datatype", "value", "amount", "unit", "rank"]},
          "results": {"bindings": [{
            "subject": {"type": "uri",
                        "value": "http://rdf.ncbi.nlm.nih.gov/pubchem/compound/CID2244"},
            "property": {"type": "uri", "value": "http://www.wikidata.org/entity/P2067"},
            "datatype": {"type": "uri", "value": "http://wikiba.se/ontology#Quantity"},
            "value": {"type": "literal", "value": "180.0",
                      "datatype": "http://www.w3.org/2001/XMLSchema#decimal"},
            "amount": {"type": "literal", "value": "180.0",
                       "datatype": "http://www.w3.org/2001/XMLSchema#decimal"},
            "unit": {"type": "uri", "value": "http://www.wikidata.org/entity/Q28924753"},
            "rank": {"type": "uri", "value": "http://wikiba.se/ontology#NormalRank"}
          }]}
        }"#,
    )?;
    let decoded = ResultsDecoder::default().decode_page(&page, &query.hints)?;
    assert_eq!(decoded.statements.len(), 1);
    assert_eq!(
        decoded.statements[0].statement,
        Statement::new(
            aspirin(),
            Snak::value(
                Property::new(wd::MASS).with_range(Datatype::Quantity),
                Value::Quantity(Quantity::new(180).with_unit(Item::new(wd::GRAM_PER_MOLE)))
            )
        )
    );
    assert_eq!(decoded.statements[0].rank, Some(Rank::Normal));
    Ok(())
}
