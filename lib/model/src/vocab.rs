//! Vocabularies of the Wikibase RDF model.

pub use oxrdf::vocab::{rdf, xsd};

/// Namespace of Wikidata entities.
pub const WD: &str = "http://www.wikidata.org/entity/";

/// Namespace of the Wikibase ontology.
pub const WIKIBASE: &str = "http://wikiba.se/ontology#";

/// Namespace of Wikidata skolem IRIs, used in place of blank nodes for "some value" snaks.
pub const WIKIDATA_GENID: &str = "http://www.wikidata.org/.well-known/genid/";

/// Namespaces of the property predicates of the Wikibase RDF model.
pub mod wdp {
    pub const DIRECT: &str = "http://www.wikidata.org/prop/direct/";
    pub const CLAIM: &str = "http://www.wikidata.org/prop/";
    pub const STATEMENT: &str = "http://www.wikidata.org/prop/statement/";
    pub const STATEMENT_VALUE: &str = "http://www.wikidata.org/prop/statement/value/";
    pub const NOVALUE: &str = "http://www.wikidata.org/prop/novalue/";
}

/// [PROV-O](https://www.w3.org/TR/prov-o/) vocabulary.
pub mod prov {
    use oxrdf::NamedNodeRef;

    pub const WAS_DERIVED_FROM: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://www.w3.org/ns/prov#wasDerivedFrom");
}

/// [Wikibase ontology](http://wikiba.se/ontology) vocabulary.
pub mod wikibase {
    use oxrdf::NamedNodeRef;

    pub const CLAIM: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://wikiba.se/ontology#claim");
    pub const STATEMENT_PROPERTY: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://wikiba.se/ontology#statementProperty");
    pub const STATEMENT_VALUE: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://wikiba.se/ontology#statementValue");
    pub const NOVALUE: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://wikiba.se/ontology#novalue");
    pub const PROPERTY_TYPE: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://wikiba.se/ontology#propertyType");
    pub const RANK: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://wikiba.se/ontology#rank");
    /// Links a property entity to its qualifier predicate (`pq:P`).
    pub const QUALIFIER: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://wikiba.se/ontology#qualifier");
    /// Links a property entity to its reference predicate (`pr:P`).
    pub const REFERENCE: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://wikiba.se/ontology#reference");

    pub const QUANTITY_AMOUNT: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://wikiba.se/ontology#quantityAmount");
    pub const QUANTITY_UNIT: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://wikiba.se/ontology#quantityUnit");
    pub const QUANTITY_LOWER_BOUND: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://wikiba.se/ontology#quantityLowerBound");
    pub const QUANTITY_UPPER_BOUND: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://wikiba.se/ontology#quantityUpperBound");

    pub const TIME_VALUE: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://wikiba.se/ontology#timeValue");
    pub const TIME_PRECISION: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://wikiba.se/ontology#timePrecision");
    pub const TIME_TIMEZONE: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://wikiba.se/ontology#timeTimezone");
    pub const TIME_CALENDAR_MODEL: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://wikiba.se/ontology#timeCalendarModel");

    pub const PREFERRED_RANK: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://wikiba.se/ontology#PreferredRank");
    pub const NORMAL_RANK: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://wikiba.se/ontology#NormalRank");
    pub const DEPRECATED_RANK: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://wikiba.se/ontology#DeprecatedRank");

    pub const WIKIBASE_ITEM: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://wikiba.se/ontology#WikibaseItem");
    pub const WIKIBASE_PROPERTY: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://wikiba.se/ontology#WikibaseProperty");
    pub const WIKIBASE_LEXEME: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://wikiba.se/ontology#WikibaseLexeme");
    pub const URL: NamedNodeRef<'_> = NamedNodeRef::new_unchecked("http://wikiba.se/ontology#Url");
    pub const MONOLINGUALTEXT: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://wikiba.se/ontology#Monolingualtext");
    pub const STRING: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://wikiba.se/ontology#String");
    pub const EXTERNAL_ID: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://wikiba.se/ontology#ExternalId");
    pub const QUANTITY: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://wikiba.se/ontology#Quantity");
    pub const TIME: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://wikiba.se/ontology#Time");
}

/// Well-known Wikidata items.
pub mod wd {
    use oxrdf::NamedNodeRef;

    /// The proleptic Gregorian calendar.
    pub const GREGORIAN_CALENDAR: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://www.wikidata.org/entity/Q1985727");
    /// The proleptic Julian calendar.
    pub const JULIAN_CALENDAR: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://www.wikidata.org/entity/Q1985786");
    /// The unit of dimensionless quantities.
    pub const ONE: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://www.wikidata.org/entity/Q199");
    pub const GRAM_PER_MOLE: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://www.wikidata.org/entity/Q28924753");
    pub const KILOGRAM: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://www.wikidata.org/entity/Q11570");
    pub const CHEMICAL_COMPOUND: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://www.wikidata.org/entity/Q11173");

    pub const INSTANCE_OF: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://www.wikidata.org/entity/P31");
    pub const CANONICAL_SMILES: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://www.wikidata.org/entity/P233");
    pub const INCHIKEY: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://www.wikidata.org/entity/P235");
    pub const PUBCHEM_CID: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://www.wikidata.org/entity/P662");
    pub const MASS: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://www.wikidata.org/entity/P2067");
}
