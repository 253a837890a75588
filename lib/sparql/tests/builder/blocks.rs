use kif_model::{NamedNode, Variable};
use kif_sparql::{BuilderError, Expression, QueryBuilder};

fn rdfs_label() -> NamedNode {
    NamedNode::new_unchecked("http://www.w3.org/2000/01/rdf-schema#label")
}

#[test]
fn test_nested_blocks() -> Result<(), BuilderError> {
    let mut builder = QueryBuilder::new();
    let s = builder.var("s");
    let p = builder.var("p");
    let o = builder.var("o");
    let label = builder.var("label");

    builder.triple(
        NamedNode::new_unchecked("http://www.wikidata.org/entity/Q42"),
        p.clone(),
        o.clone(),
    );
    builder.optional(|builder| {
        builder.triple(o.clone(), rdfs_label(), label.clone());
        builder.filter(Expression::equal(Expression::lang(&label), "en"));
    });
    builder.optional(|_| {});
    builder.union(|builder| {
        builder.group(|builder| {
            builder.triple(s.clone(), p.clone(), o.clone());
        });
        builder.group(|builder| {
            let node = builder.bnode();
            builder.triple(node, p.clone(), o.clone());
        });
    });
    builder.limit(10).offset(20);

    let query = builder.select(&[p, o, label])?;
    insta::assert_snapshot!(query, @r#"
    select ?p ?o ?label where {
      <http://www.wikidata.org/entity/Q42> ?p ?o .
      optional {
        ?o <http://www.w3.org/2000/01/rdf-schema#label> ?label .
        filter (lang(?label) = "en")
      }
      {
        ?s ?p ?o .
      }
      union
      {
        _:b0 ?p ?o .
      }
    }
    limit 10
    offset 20
    "#);
    assert!(spargebra::Query::parse(&query, None).is_ok());
    Ok(())
}

#[test]
fn test_empty_blocks_are_suppressed() -> Result<(), BuilderError> {
    let mut builder = QueryBuilder::new();
    let s = builder.var("s");
    builder.group(|builder| {
        builder.optional(|_| {});
        builder.union(|builder| {
            builder.group(|_| {});
        });
    });
    assert!(builder.is_empty());

    builder.triple(s.clone(), rdfs_label(), s.clone());
    let query = builder.select(&[s])?;
    insta::assert_snapshot!(query, @r"
    select ?s where {
      ?s <http://www.w3.org/2000/01/rdf-schema#label> ?s .
    }
    ");
    Ok(())
}

#[test]
fn test_optional_if() -> Result<(), BuilderError> {
    let mut builder = QueryBuilder::new();
    let s = builder.var("s");
    let o = builder.var("o");
    builder.optional_if(false, |builder| {
        builder.triple(s.clone(), rdfs_label(), o.clone());
    });
    builder.optional_if(true, |builder| {
        builder.triple(o.clone(), rdfs_label(), s.clone());
    });

    let query = builder.select(&[s, o])?;
    insta::assert_snapshot!(query, @r"
    select ?s ?o where {
      ?s <http://www.w3.org/2000/01/rdf-schema#label> ?o .
      optional {
        ?o <http://www.w3.org/2000/01/rdf-schema#label> ?s .
      }
    }
    ");
    Ok(())
}

#[test]
fn test_try_group_discards_failed_block() -> Result<(), BuilderError> {
    let mut builder = QueryBuilder::new();
    let s = builder.var("s");
    let o = builder.var("o");

    let branches = builder.union(|builder| {
        let skipped: Result<(), &str> = builder.try_group(|builder| {
            let unit = builder.var("unit");
            builder.triple(s.clone(), rdfs_label(), unit);
            Err("unit mismatch")
        });
        let applied: Result<(), &str> = builder.try_group(|builder| {
            builder.triple(o.clone(), rdfs_label(), s.clone());
            Ok(())
        });
        [skipped.is_ok(), applied.is_ok()]
    });
    assert_eq!(branches, [false, true]);
    assert!(!builder.is_known(&Variable::new_unchecked("unit")));

    let query = builder.select(&[Variable::new_unchecked("s")])?;
    insta::assert_snapshot!(query, @r"
    select ?s where {
      {
        ?o <http://www.w3.org/2000/01/rdf-schema#label> ?s .
      }
    }
    ");
    Ok(())
}
