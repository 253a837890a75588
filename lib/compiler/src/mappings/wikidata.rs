use crate::args::decimal;
use crate::{Applied, EntryParams, MappingRegistry, MappingRegistryBuilder, PredicatePattern};
use crate::{RuleArgs, Skip};
use kif_model::vocab::{prov, rdf, wdp, wikibase, WD, WIKIDATA_GENID};
use kif_model::{
    Datatype, DatatypeMask, Literal, NamedNode, NamedNodePattern, NamedNodeRef, SnakKind,
    SnakMask, TermPattern, Value, Variable,
};
use kif_results::columns;
use kif_sparql::{Expression, QueryBuilder};

/// The registry of the Wikibase RDF model.
pub fn registry() -> MappingRegistry {
    register(MappingRegistry::builder()).build()
}

/// Registers the single entry of the Wikibase RDF model, which handles every property and
/// datatype, and the rule reaching the annotations of its statement nodes.
pub fn register(builder: MappingRegistryBuilder) -> MappingRegistryBuilder {
    builder
        .register(PredicatePattern::any(), None, EntryParams::default(), statement)
        .annotations(annotations)
}

/// How the predicates of a property are reached.
enum PropertyTerm {
    /// A Wikidata property with the given id (e.g., `P31`).
    Fixed { iri: NamedNode, id: String },
    /// Any property, bound to the property column.
    Open(Variable),
}

impl PropertyTerm {
    fn new(builder: &mut QueryBuilder, args: &RuleArgs<'_>) -> Result<Self, Skip> {
        let Some(property) = args.property() else {
            return Ok(PropertyTerm::Open(args.var(builder, columns::PROPERTY)));
        };
        let id = property
            .iri()
            .as_str()
            .strip_prefix(WD)
            .ok_or_else(|| Skip::new(format!("{property} is not a Wikidata property")))?;
        Ok(PropertyTerm::Fixed {
            iri: property.iri().clone(),
            id: id.to_owned(),
        })
    }

    fn pattern(&self) -> TermPattern {
        match self {
            PropertyTerm::Fixed { iri, .. } => iri.clone().into(),
            PropertyTerm::Open(variable) => variable.clone().into(),
        }
    }

    /// The predicate of the property in `namespace`, e.g. `p:P31`.
    ///
    /// An open property reaches its predicate through the `link` of its property entity.
    fn predicate(
        &self,
        builder: &mut QueryBuilder,
        args: &RuleArgs<'_>,
        namespace: &str,
        link: NamedNodeRef<'_>,
        name: &str,
    ) -> NamedNodePattern {
        match self {
            PropertyTerm::Fixed { id, .. } => {
                NamedNode::new_unchecked(format!("{namespace}{id}")).into()
            }
            PropertyTerm::Open(property) => {
                let predicate = args.var(builder, name);
                builder.triple(property.clone(), NamedNode::from(link), predicate.clone());
                predicate.into()
            }
        }
    }
}

/// The statements of the Wikibase RDF model.
///
/// ```sparql
/// ?subject p:P ?statement .
/// ?statement wikibase:rank ?rank .
/// { ?statement ps:P ?value . }         # value and some-value snaks
/// union
/// { ?statement a wdno:P . }            # no-value snaks
/// ```
///
/// Quantities and times are read from their value nodes (`psv:P`) when the value is known to
/// be deep; otherwise only their main value is.
fn statement(builder: &mut QueryBuilder, args: &RuleArgs<'_>) -> Result<Applied, Skip> {
    let value_mask = args.value_mask();
    if value_mask.is_empty() {
        return Err(Skip::new("no datatype is left for the value"));
    }
    let snak_mask = args.snak_mask();
    let subject = args.subject_pattern(builder)?;
    let property = PropertyTerm::new(builder, args)?;

    let claim = property.predicate(builder, args, wdp::CLAIM, wikibase::CLAIM, "claim");
    let statement = args.var(builder, columns::STATEMENT);
    builder.triple(subject.clone(), claim, statement.clone());

    let datatype = args.var(builder, columns::DATATYPE);
    builder.triple(
        property.pattern(),
        NamedNode::from(wikibase::PROPERTY_TYPE),
        datatype.clone(),
    );
    builder.values(
        &datatype,
        value_mask
            .datatypes()
            .map(|datatype| NamedNode::from(datatype.iri())),
    );

    let rank = args.var(builder, columns::RANK);
    builder.triple(
        statement.clone(),
        NamedNode::from(wikibase::RANK),
        rank.clone(),
    );
    let rank_mask = args.rank_mask();
    if !rank_mask.is_all() {
        builder.values(&rank, rank_mask.ranks().map(|rank| NamedNode::from(rank.iri())));
    }

    builder.union(|builder| {
        if snak_mask.intersects(SnakMask::VALUE_SNAK | SnakMask::SOME_VALUE_SNAK) {
            builder.try_group(|builder| {
                value_snak(builder, args, &property, &statement, &datatype, value_mask)
            })?;
        }
        if snak_mask.contains(SnakKind::NoValue) {
            builder.group(|builder| {
                let no_value = property.predicate(
                    builder,
                    args,
                    wdp::NOVALUE,
                    wikibase::NOVALUE,
                    "no_value",
                );
                builder.triple(
                    statement.clone(),
                    NamedNode::from(rdf::TYPE),
                    to_term_pattern(no_value),
                );
            });
        }
        Ok::<_, Skip>(())
    })?;

    args.bind_subject(builder, &subject);
    if let PropertyTerm::Fixed { iri, .. } = &property {
        let column = args.var(builder, columns::PROPERTY);
        builder.values(&column, [iri.clone()]);
    }
    Ok(Applied)
}

/// The qualifiers and references of the statement nodes bound to `statement`.
///
/// ```sparql
/// { ?statement ?qualifier ?value .
///   ?property wikibase:qualifier ?qualifier . }
/// union
/// { ?statement prov:wasDerivedFrom ?reference .
///   ?reference ?reference_property ?value .
///   ?property wikibase:reference ?reference_property . }
/// ?property wikibase:propertyType ?datatype .
/// ```
///
/// Values are read from the plain predicates (`pq:P` and `pr:P`), so quantities and times
/// come without their bounds, units and precisions. Absent qualifiers are not reached.
fn annotations(builder: &mut QueryBuilder, statement: &Variable) {
    let property = builder.var(columns::PROPERTY);
    let value = builder.var(columns::VALUE);
    builder.union(|builder| {
        builder.group(|builder| {
            let qualifier = builder.var("qualifier");
            builder
                .triple(statement.clone(), qualifier.clone(), value.clone())
                .triple(
                    property.clone(),
                    NamedNode::from(wikibase::QUALIFIER),
                    qualifier,
                );
        });
        builder.group(|builder| {
            let reference = builder.var(columns::REFERENCE);
            let predicate = builder.var("reference_property");
            builder
                .triple(
                    statement.clone(),
                    NamedNode::from(prov::WAS_DERIVED_FROM),
                    reference.clone(),
                )
                .triple(reference, predicate.clone(), value.clone())
                .triple(
                    property.clone(),
                    NamedNode::from(wikibase::REFERENCE),
                    predicate,
                );
        });
    });
    let datatype = builder.var(columns::DATATYPE);
    builder.triple(
        property,
        NamedNode::from(wikibase::PROPERTY_TYPE),
        datatype,
    );
}

fn value_snak(
    builder: &mut QueryBuilder,
    args: &RuleArgs<'_>,
    property: &PropertyTerm,
    statement: &Variable,
    datatype: &Variable,
    value_mask: DatatypeMask,
) -> Result<(), Skip> {
    let snak_mask = args.snak_mask();
    let value = args.var(builder, columns::VALUE);
    let predicate = property.predicate(
        builder,
        args,
        wdp::STATEMENT,
        wikibase::STATEMENT_PROPERTY,
        "statement_property",
    );
    builder.triple(statement.clone(), predicate, value.clone());

    // Unknown values have no value node.
    let deep = DatatypeMask::DEEP_DATA_VALUE.contains_all(value_mask)
        && snak_mask.contains(SnakKind::Value);
    if deep {
        let node = args.var(builder, "value_node");
        let predicate = property.predicate(
            builder,
            args,
            wdp::STATEMENT_VALUE,
            wikibase::STATEMENT_VALUE,
            "statement_value",
        );
        builder.triple(statement.clone(), predicate, node.clone());
        let datatypes = value_mask.datatypes().collect::<Vec<_>>();
        builder.union(|builder| {
            for datatype in datatypes {
                builder.try_group(|builder| match datatype {
                    Datatype::Quantity => quantity_node(builder, args, &node),
                    _ => time_node(builder, args, &node),
                })?;
            }
            Ok::<_, Skip>(())
        })?;
    } else {
        args.restrict_value(builder, &value)?;
    }

    // Unknown values are exported as skolem IRIs or blank nodes.
    let some_value = Expression::is_blank(&value).or(Expression::strstarts(
        Expression::str(&value),
        WIKIDATA_GENID,
    ));
    if args.value().is_none() && !snak_mask.contains(SnakKind::SomeValue) {
        builder.filter(some_value.not());
    } else if !snak_mask.contains(SnakKind::Value) {
        builder.filter(some_value);
    }

    if let Some(language) = args.language() {
        if value_mask.contains(Datatype::Text) {
            let text = Expression::equal(datatype, NamedNode::from(Datatype::Text.iri()));
            builder.filter(text.not().or(Expression::equal(Expression::lang(&value), language)));
        }
    }
    Ok(())
}

fn quantity_node(
    builder: &mut QueryBuilder,
    args: &RuleArgs<'_>,
    node: &Variable,
) -> Result<(), Skip> {
    let amount = args.var(builder, columns::AMOUNT);
    let unit = args.var(builder, columns::UNIT);
    builder
        .triple(
            node.clone(),
            NamedNode::from(wikibase::QUANTITY_AMOUNT),
            amount.clone(),
        )
        .triple(node.clone(), NamedNode::from(wikibase::QUANTITY_UNIT), unit.clone());
    let quantity = match args.value() {
        Some(Value::Quantity(quantity)) => Some(quantity),
        Some(value) => return Err(Skip::new(format!("{value} is not a quantity"))),
        None => None,
    };
    for (name, predicate, bound) in [
        (
            columns::LOWER,
            wikibase::QUANTITY_LOWER_BOUND,
            quantity.and_then(|quantity| quantity.lower_bound),
        ),
        (
            columns::UPPER,
            wikibase::QUANTITY_UPPER_BOUND,
            quantity.and_then(|quantity| quantity.upper_bound),
        ),
    ] {
        let variable = args.var(builder, name);
        // Exact quantities have no bounds.
        builder.optional_if(bound.is_none(), |builder| {
            builder.triple(node.clone(), NamedNode::from(predicate), variable.clone());
        });
        if let Some(bound) = bound {
            builder.filter(Expression::equal(&variable, decimal(bound)));
        }
    }
    if let Some(quantity) = quantity {
        args.restrict_value(builder, &amount)?;
        if let Some(item) = &quantity.unit {
            builder.values(&unit, [item.iri().clone()]);
        }
    }
    Ok(())
}

fn time_node(builder: &mut QueryBuilder, args: &RuleArgs<'_>, node: &Variable) -> Result<(), Skip> {
    let time = args.var(builder, columns::TIME);
    let precision = args.var(builder, columns::PRECISION);
    let timezone = args.var(builder, columns::TIMEZONE);
    let calendar = args.var(builder, columns::CALENDAR);
    builder
        .triple(node.clone(), NamedNode::from(wikibase::TIME_VALUE), time.clone())
        .triple(
            node.clone(),
            NamedNode::from(wikibase::TIME_PRECISION),
            precision.clone(),
        )
        .triple(
            node.clone(),
            NamedNode::from(wikibase::TIME_TIMEZONE),
            timezone.clone(),
        )
        .triple(
            node.clone(),
            NamedNode::from(wikibase::TIME_CALENDAR_MODEL),
            calendar.clone(),
        );
    let value = match args.value() {
        Some(Value::Time(value)) => value,
        Some(value) => return Err(Skip::new(format!("{value} is not a time"))),
        None => return Ok(()),
    };
    args.restrict_value(builder, &time)?;
    if let Some(code) = value.precision.map(|precision| precision.code()) {
        builder.filter(Expression::equal(&precision, integer(code)));
    }
    if let Some(minutes) = value.timezone {
        builder.filter(Expression::equal(&timezone, integer(minutes)));
    }
    if let Some(item) = &value.calendar {
        builder.values(&calendar, [item.iri().clone()]);
    }
    Ok(())
}

fn integer(value: i64) -> Literal {
    Literal::new_typed_literal(value.to_string(), kif_model::vocab::xsd::INTEGER)
}

fn to_term_pattern(pattern: NamedNodePattern) -> TermPattern {
    match pattern {
        NamedNodePattern::NamedNode(node) => node.into(),
        NamedNodePattern::Variable(variable) => variable.into(),
    }
}
