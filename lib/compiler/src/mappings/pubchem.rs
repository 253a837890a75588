//! A mirror of the PubChem RDF.
//!
//! Compounds keep their public PubChem IRIs
//! (`http://rdf.ncbi.nlm.nih.gov/pubchem/compound/CID2244`) as subjects, while the mirror stores
//! them under a namespace of its own. Their descriptors are exposed as statements of the
//! corresponding Wikidata properties.

use crate::{
    Applied, EntryParams, IriPrefixRewrite, MappingRegistry, PredicatePattern, RuleArgs, Skip,
};
use kif_model::vocab::{rdf, wd, wikibase, xsd};
use kif_model::{
    Datatype, DatatypeMask, Item, Literal, NamedNode, NamedNodeRef, Property, TermPattern, Value,
    Variable,
};
use kif_results::columns;
use kif_sparql::{Expression, QueryBuilder};

/// The public namespace of PubChem compounds.
pub const COMPOUND: &str = "http://rdf.ncbi.nlm.nih.gov/pubchem/compound/";

const CID_PREFIX: &str = "CID";

mod sio {
    use kif_model::NamedNodeRef;

    pub const HAS_ATTRIBUTE: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://semanticscience.org/resource/SIO_000008");
    pub const HAS_VALUE: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://semanticscience.org/resource/SIO_000300");
    pub const CHEMICAL_ENTITY: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://semanticscience.org/resource/SIO_010004");
    pub const MOLECULAR_WEIGHT: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://semanticscience.org/resource/CHEMINF_000334");
    pub const CANONICAL_SMILES: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://semanticscience.org/resource/CHEMINF_000376");
    pub const INCHIKEY: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://semanticscience.org/resource/CHEMINF_000399");
}

/// The registry of a PubChem mirror storing compounds under `local`.
pub fn registry(local: &str) -> MappingRegistry {
    let rewrite = IriPrefixRewrite::new(COMPOUND, local);
    let params = || EntryParams::default().with_subject_rewrite(rewrite.clone());
    let property = |iri: NamedNodeRef<'_>| {
        PredicatePattern::property(Property::new(iri)).with_subject(DatatypeMask::ITEM)
    };
    MappingRegistry::builder()
        .register(
            property(wd::MASS),
            Some(Datatype::Quantity),
            params()
                .with_unit(Item::new(wd::GRAM_PER_MOLE))
                .without_bounds()
                .with_literal_datatype(xsd::DECIMAL),
            mass,
        )
        .register(
            property(wd::CANONICAL_SMILES),
            Some(Datatype::String),
            params(),
            descriptor(sio::CANONICAL_SMILES),
        )
        .register(
            property(wd::INCHIKEY),
            Some(Datatype::String),
            params(),
            descriptor(sio::INCHIKEY),
        )
        .register(
            property(wd::PUBCHEM_CID),
            Some(Datatype::ExternalId),
            params(),
            cid,
        )
        .register(
            property(wd::INSTANCE_OF),
            Some(Datatype::Item),
            params(),
            instance_of,
        )
        .build()
}

/// Checks the request and returns the compound pattern.
///
/// The mirror has neither ranks nor unknown or absent values.
fn compound_pattern(builder: &mut QueryBuilder, args: &RuleArgs<'_>) -> Result<TermPattern, Skip> {
    args.require_value_snaks()?;
    args.require_normal_rank()?;
    args.check_value()?;
    let compound = args.subject_pattern(builder)?;
    builder.triple(
        compound.clone(),
        NamedNode::from(rdf::TYPE),
        NamedNode::from(sio::CHEMICAL_ENTITY),
    );
    Ok(compound)
}

/// Binds the columns shared by all entries.
fn finish(
    builder: &mut QueryBuilder,
    args: &RuleArgs<'_>,
    compound: &TermPattern,
) -> Result<Applied, Skip> {
    args.bind_subject(builder, compound);
    args.bind_property(builder)?;
    let rank = args.var(builder, columns::RANK);
    builder.values(&rank, [NamedNode::from(wikibase::NORMAL_RANK)]);
    Ok(Applied)
}

/// Binds `local` to the value of the descriptor of the compound of the given class.
fn descriptor_value(
    builder: &mut QueryBuilder,
    args: &RuleArgs<'_>,
    compound: &TermPattern,
    class: NamedNodeRef<'_>,
) -> Variable {
    let descriptor = args.var(builder, "descriptor");
    let local = args.var(builder, "value_local");
    builder
        .triple(
            compound.clone(),
            NamedNode::from(sio::HAS_ATTRIBUTE),
            descriptor.clone(),
        )
        .triple(descriptor.clone(), NamedNode::from(rdf::TYPE), NamedNode::from(class))
        .triple(descriptor, NamedNode::from(sio::HAS_VALUE), local.clone());
    local
}

fn descriptor(
    class: NamedNodeRef<'static>,
) -> impl Fn(&mut QueryBuilder, &RuleArgs<'_>) -> Result<Applied, Skip> + Send + Sync + 'static {
    move |builder, args| {
        let compound = compound_pattern(builder, args)?;
        let local = descriptor_value(builder, args, &compound, class);
        args.restrict_value(builder, &local)?;
        args.bind_value(builder, &local);
        finish(builder, args, &compound)
    }
}

/// The molecular weight, in grams per mole.
fn mass(builder: &mut QueryBuilder, args: &RuleArgs<'_>) -> Result<Applied, Skip> {
    let compound = compound_pattern(builder, args)?;
    let local = descriptor_value(builder, args, &compound, sio::MOLECULAR_WEIGHT);
    args.restrict_value(builder, &local)?;
    let value = args.bind_value(builder, &local);
    let amount = args.var(builder, columns::AMOUNT);
    builder.bind(&value, &amount);
    if let Some(unit) = &args.params().unit {
        let column = args.var(builder, columns::UNIT);
        builder.values(&column, [unit.iri().clone()]);
    }
    finish(builder, args, &compound)
}

/// The CID, which is the numeric suffix of the compound IRI.
fn cid(builder: &mut QueryBuilder, args: &RuleArgs<'_>) -> Result<Applied, Skip> {
    let compound = compound_pattern(builder, args)?;
    let value = args.var(builder, columns::VALUE);
    match &compound {
        TermPattern::NamedNode(iri) => {
            let id = iri
                .as_str()
                .rsplit_once(CID_PREFIX)
                .map(|(_, id)| id)
                .ok_or_else(|| Skip::new(format!("{iri} is not a compound")))?;
            builder.values(&value, [Literal::new_simple_literal(id)]);
        }
        TermPattern::Variable(local) => {
            let Some(rewrite) = &args.params().subject_rewrite else {
                return Err(Skip::new("compounds are not rewritten"));
            };
            let start = rewrite.local().chars().count() + CID_PREFIX.len() + 1;
            builder.bind(Expression::substr(Expression::str(local), start), &value);
        }
        _ => return Err(Skip::new("unexpected compound pattern")),
    }
    if let Some(Value::ExternalId(id)) = args.value() {
        builder.filter(Expression::equal(&value, id.as_str()));
    }
    finish(builder, args, &compound)
}

/// Every compound is a chemical compound.
fn instance_of(builder: &mut QueryBuilder, args: &RuleArgs<'_>) -> Result<Applied, Skip> {
    let class = Item::new(wd::CHEMICAL_COMPOUND);
    if let Some(value) = args.value() {
        if *value != Value::Item(class.clone()) {
            return Err(Skip::new(format!("{value} is not {class}")));
        }
    }
    let compound = compound_pattern(builder, args)?;
    let value = args.var(builder, columns::VALUE);
    builder.values(&value, [class.into_iri()]);
    finish(builder, args, &compound)
}
