use crate::vocab::WD;
use crate::{Datatype, DatatypeMask};
use oxrdf::{NamedNode, NamedNodeRef};
use std::fmt;

/// A Wikibase item, e.g., `wd:Q42`.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Item {
    iri: NamedNode,
}

impl Item {
    pub fn new(iri: impl Into<NamedNode>) -> Self {
        Self { iri: iri.into() }
    }

    /// Creates the Wikidata item with the given id (e.g., `Q42`).
    pub fn wd(id: &str) -> Self {
        Self::new(NamedNode::new_unchecked(format!("{WD}{id}")))
    }

    pub fn iri(&self) -> &NamedNode {
        &self.iri
    }

    pub fn into_iri(self) -> NamedNode {
        self.iri
    }
}

/// A Wikibase property, e.g., `wd:P31`.
///
/// A property may carry its declared range. Equality is structural and thus considers the range.
/// Use [Property::same_iri] to compare properties by IRI only.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Property {
    iri: NamedNode,
    range: Option<Datatype>,
}

impl Property {
    pub fn new(iri: impl Into<NamedNode>) -> Self {
        Self {
            iri: iri.into(),
            range: None,
        }
    }

    /// Creates the Wikidata property with the given id (e.g., `P31`).
    pub fn wd(id: &str) -> Self {
        Self::new(NamedNode::new_unchecked(format!("{WD}{id}")))
    }

    #[must_use]
    pub fn with_range(self, range: Datatype) -> Self {
        Self {
            range: Some(range),
            ..self
        }
    }

    pub fn iri(&self) -> &NamedNode {
        &self.iri
    }

    pub fn range(&self) -> Option<Datatype> {
        self.range
    }

    pub fn same_iri(&self, other: &Property) -> bool {
        self.iri == other.iri
    }
}

/// A Wikibase lexeme, e.g., `wd:L7`.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Lexeme {
    iri: NamedNode,
}

impl Lexeme {
    pub fn new(iri: impl Into<NamedNode>) -> Self {
        Self { iri: iri.into() }
    }

    /// Creates the Wikidata lexeme with the given id (e.g., `L7`).
    pub fn wd(id: &str) -> Self {
        Self::new(NamedNode::new_unchecked(format!("{WD}{id}")))
    }

    pub fn iri(&self) -> &NamedNode {
        &self.iri
    }
}

/// The subject of a statement.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Entity {
    Item(Item),
    Property(Property),
    Lexeme(Lexeme),
}

impl Entity {
    /// Infers the kind of entity from a Wikidata entity IRI (`Q…`, `P…` or `L…`).
    ///
    /// Returns [None] if the IRI is not in the Wikidata entity namespace or has an unknown shape.
    pub fn from_wikidata_iri(iri: NamedNodeRef<'_>) -> Option<Self> {
        let id = iri.as_str().strip_prefix(WD)?;
        let mut chars = id.chars();
        let kind = chars.next()?;
        let digits = chars.as_str();
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        let iri = iri.into_owned();
        match kind {
            'Q' => Some(Entity::Item(Item::new(iri))),
            'P' => Some(Entity::Property(Property::new(iri))),
            'L' => Some(Entity::Lexeme(Lexeme::new(iri))),
            _ => None,
        }
    }

    /// Creates an entity of the first kind in `mask`, falling back to an item.
    pub fn from_iri_with_mask(iri: NamedNode, mask: DatatypeMask) -> Self {
        if mask.contains(Datatype::Item) {
            Entity::Item(Item::new(iri))
        } else if mask.contains(Datatype::Property) {
            Entity::Property(Property::new(iri))
        } else if mask.contains(Datatype::Lexeme) {
            Entity::Lexeme(Lexeme::new(iri))
        } else {
            Entity::Item(Item::new(iri))
        }
    }

    pub fn iri(&self) -> &NamedNode {
        match self {
            Entity::Item(item) => item.iri(),
            Entity::Property(property) => property.iri(),
            Entity::Lexeme(lexeme) => lexeme.iri(),
        }
    }

    pub fn datatype(&self) -> Datatype {
        match self {
            Entity::Item(_) => Datatype::Item,
            Entity::Property(_) => Datatype::Property,
            Entity::Lexeme(_) => Datatype::Lexeme,
        }
    }
}

impl From<Item> for Entity {
    fn from(item: Item) -> Self {
        Entity::Item(item)
    }
}

impl From<Property> for Entity {
    fn from(property: Property) -> Self {
        Entity::Property(property)
    }
}

impl From<Lexeme> for Entity {
    fn from(lexeme: Lexeme) -> Self {
        Entity::Lexeme(lexeme)
    }
}

impl fmt::Display for Item {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Item({})", self.iri)
    }
}

impl fmt::Display for Property {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.range {
            Some(range) => write!(f, "Property({}, {range})", self.iri),
            None => write!(f, "Property({})", self.iri),
        }
    }
}

impl fmt::Display for Lexeme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Lexeme({})", self.iri)
    }
}

impl fmt::Display for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Entity::Item(item) => item.fmt(f),
            Entity::Property(property) => property.fmt(f),
            Entity::Lexeme(lexeme) => lexeme.fmt(f),
        }
    }
}
