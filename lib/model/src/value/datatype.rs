use crate::vocab::wikibase;
use crate::DatatypeMask;
use oxrdf::NamedNodeRef;
use std::fmt;

/// The datatype of a [Value](crate::Value).
///
/// Each datatype has a Wikibase datatype IRI, which is how property ranges are declared in a
/// Wikibase store (`wikibase:propertyType`).
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Datatype {
    Item,
    Property,
    Lexeme,
    Iri,
    Text,
    String,
    ExternalId,
    Quantity,
    Time,
}

impl Datatype {
    /// All datatypes, in declaration order.
    pub const ALL: [Datatype; 9] = [
        Datatype::Item,
        Datatype::Property,
        Datatype::Lexeme,
        Datatype::Iri,
        Datatype::Text,
        Datatype::String,
        Datatype::ExternalId,
        Datatype::Quantity,
        Datatype::Time,
    ];

    #[must_use]
    pub const fn mask(self) -> DatatypeMask {
        match self {
            Datatype::Item => DatatypeMask::ITEM,
            Datatype::Property => DatatypeMask::PROPERTY,
            Datatype::Lexeme => DatatypeMask::LEXEME,
            Datatype::Iri => DatatypeMask::IRI,
            Datatype::Text => DatatypeMask::TEXT,
            Datatype::String => DatatypeMask::STRING,
            Datatype::ExternalId => DatatypeMask::EXTERNAL_ID,
            Datatype::Quantity => DatatypeMask::QUANTITY,
            Datatype::Time => DatatypeMask::TIME,
        }
    }

    /// The Wikibase IRI of this datatype.
    #[must_use]
    pub const fn iri(self) -> NamedNodeRef<'static> {
        match self {
            Datatype::Item => wikibase::WIKIBASE_ITEM,
            Datatype::Property => wikibase::WIKIBASE_PROPERTY,
            Datatype::Lexeme => wikibase::WIKIBASE_LEXEME,
            Datatype::Iri => wikibase::URL,
            Datatype::Text => wikibase::MONOLINGUALTEXT,
            Datatype::String => wikibase::STRING,
            Datatype::ExternalId => wikibase::EXTERNAL_ID,
            Datatype::Quantity => wikibase::QUANTITY,
            Datatype::Time => wikibase::TIME,
        }
    }

    /// Looks up the datatype with the given Wikibase IRI.
    #[must_use]
    pub fn from_iri(iri: NamedNodeRef<'_>) -> Option<Self> {
        Self::ALL.into_iter().find(|datatype| datatype.iri() == iri)
    }

    #[must_use]
    pub const fn is_entity(self) -> bool {
        DatatypeMask::ENTITY.contains(self)
    }

    /// Returns whether values of this datatype are stored as value nodes with auxiliary fields.
    #[must_use]
    pub const fn is_deep(self) -> bool {
        DatatypeMask::DEEP_DATA_VALUE.contains(self)
    }
}

impl fmt::Display for Datatype {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Datatype::Item => "Item",
            Datatype::Property => "Property",
            Datatype::Lexeme => "Lexeme",
            Datatype::Iri => "IRI",
            Datatype::Text => "Text",
            Datatype::String => "String",
            Datatype::ExternalId => "ExternalId",
            Datatype::Quantity => "Quantity",
            Datatype::Time => "Time",
        };
        f.write_str(name)
    }
}
