use kif_model::{Literal, NamedNode, Variable};
use kif_sparql::{BuilderError, Expression, QueryBuilder};

#[test]
fn test_var_is_idempotent() {
    let mut builder = QueryBuilder::new();
    let first = builder.var("x");
    let second = builder.var("x");
    assert_eq!(first, second);
    assert_ne!(first, builder.var("y"));
}

#[test]
fn test_select_unknown_variable() {
    let mut builder = QueryBuilder::new();
    let x = builder.var("x");
    builder.triple(x.clone(), NamedNode::new_unchecked("http://example.org/p"), x);

    let result = builder.select(&[Variable::new_unchecked("y")]);
    assert_eq!(result, Err(BuilderError::UnknownVariable("y".to_owned())));
}

#[test]
fn test_fresh_var_skips_used_names() {
    let mut builder = QueryBuilder::new();
    builder.var("v0");
    assert_eq!(builder.fresh_var("v").as_str(), "v1");
    assert_eq!(builder.fresh_var("v").as_str(), "v2");
    assert_eq!(builder.fresh_var("w").as_str(), "w3");
}

#[test]
fn test_bnodes_are_numbered() {
    let mut builder = QueryBuilder::new();
    let nodes = builder.bnodes(2);
    assert_eq!(nodes[0].as_str(), "b0");
    assert_eq!(nodes[1].as_str(), "b1");
    assert_eq!(builder.bnode().as_str(), "b2");
}

#[test]
fn test_select_all_distinct() -> Result<(), BuilderError> {
    let mut builder = QueryBuilder::new();
    let s = builder.var("s");
    builder.triple(
        s,
        NamedNode::new_unchecked("http://example.org/p"),
        Literal::new_simple_literal("o"),
    );
    builder.distinct();

    let query = builder.select(&[])?;
    insta::assert_snapshot!(query, @r#"
    select distinct * where {
      ?s <http://example.org/p> "o" .
    }
    "#);
    Ok(())
}

#[test]
fn test_select_bind_and_values() -> Result<(), BuilderError> {
    let mut builder = QueryBuilder::new();
    let s = builder.var("s");
    let local = builder.var("local");
    let datatype = builder.var("datatype");
    builder.values(
        &datatype,
        [
            NamedNode::new_unchecked("http://wikiba.se/ontology#Quantity"),
            NamedNode::new_unchecked("http://wikiba.se/ontology#Time"),
        ],
    );
    builder.triple(
        local.clone(),
        NamedNode::new_unchecked("http://wikiba.se/ontology#propertyType"),
        datatype.clone(),
    );
    builder.bind(
        Expression::iri(Expression::concat([
            Expression::string("http://www.wikidata.org/entity/"),
            Expression::substr(Expression::str(&local), 31),
        ])),
        &s,
    );

    let query = builder.select(&[s, datatype])?;
    insta::assert_snapshot!(query, @r#"
    select ?s ?datatype where {
      values ?datatype { <http://wikiba.se/ontology#Quantity> <http://wikiba.se/ontology#Time> }
      ?local <http://wikiba.se/ontology#propertyType> ?datatype .
      bind (iri(concat("http://www.wikidata.org/entity/", substr(str(?local), 31))) as ?s)
    }
    "#);
    assert!(spargebra::Query::parse(&query, None).is_ok());
    Ok(())
}
