mod datatype;
mod entity;
pub(crate) mod quantity;
mod time;

pub use datatype::Datatype;
pub use entity::{Entity, Item, Lexeme, Property};
pub use quantity::Quantity;
pub use time::{Time, TimePrecision};

use oxrdf::NamedNode;
use std::fmt;

/// A monolingual text.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Text {
    pub content: String,
    pub language: String,
}

impl Text {
    pub fn new(content: impl Into<String>, language: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            language: language.into(),
        }
    }
}

/// A value of a snak.
///
/// The variants are ordered by [Datatype], so sorting values groups them by datatype first.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Value {
    Item(Item),
    Property(Property),
    Lexeme(Lexeme),
    Iri(NamedNode),
    Text(Text),
    String(String),
    ExternalId(String),
    Quantity(Quantity),
    Time(Time),
}

impl Value {
    pub fn datatype(&self) -> Datatype {
        match self {
            Value::Item(_) => Datatype::Item,
            Value::Property(_) => Datatype::Property,
            Value::Lexeme(_) => Datatype::Lexeme,
            Value::Iri(_) => Datatype::Iri,
            Value::Text(_) => Datatype::Text,
            Value::String(_) => Datatype::String,
            Value::ExternalId(_) => Datatype::ExternalId,
            Value::Quantity(_) => Datatype::Quantity,
            Value::Time(_) => Datatype::Time,
        }
    }

    pub fn as_entity(&self) -> Option<Entity> {
        match self {
            Value::Item(item) => Some(Entity::Item(item.clone())),
            Value::Property(property) => Some(Entity::Property(property.clone())),
            Value::Lexeme(lexeme) => Some(Entity::Lexeme(lexeme.clone())),
            _ => None,
        }
    }

    pub fn iri(&self) -> Option<&NamedNode> {
        match self {
            Value::Item(item) => Some(item.iri()),
            Value::Property(property) => Some(property.iri()),
            Value::Lexeme(lexeme) => Some(lexeme.iri()),
            Value::Iri(iri) => Some(iri),
            _ => None,
        }
    }

    /// Returns whether `self`, seen as a loose pattern, matches `other`.
    ///
    /// Deep values only compare the fields specified by `self`. Properties are compared by IRI.
    pub fn loosely_matches(&self, other: &Value) -> bool {
        match (self, other) {
            (Value::Property(lhs), Value::Property(rhs)) => lhs.same_iri(rhs),
            (Value::Quantity(lhs), Value::Quantity(rhs)) => lhs.loosely_matches(rhs),
            (Value::Time(lhs), Value::Time(rhs)) => lhs.loosely_matches(rhs),
            _ => self == other,
        }
    }
}

impl From<Entity> for Value {
    fn from(entity: Entity) -> Self {
        match entity {
            Entity::Item(item) => Value::Item(item),
            Entity::Property(property) => Value::Property(property),
            Entity::Lexeme(lexeme) => Value::Lexeme(lexeme),
        }
    }
}

macro_rules! implement_from {
    ($t:ty, $variant:ident) => {
        impl From<$t> for Value {
            fn from(value: $t) -> Self {
                Value::$variant(value)
            }
        }
    };
}

implement_from!(Item, Item);
implement_from!(Property, Property);
implement_from!(Lexeme, Lexeme);
implement_from!(NamedNode, Iri);
implement_from!(Text, Text);
implement_from!(String, String);
implement_from!(Quantity, Quantity);
implement_from!(Time, Time);

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Item(item) => item.fmt(f),
            Value::Property(property) => property.fmt(f),
            Value::Lexeme(lexeme) => lexeme.fmt(f),
            Value::Iri(iri) => write!(f, "IRI({iri})"),
            Value::Text(text) => write!(f, "Text({:?}@{})", text.content, text.language),
            Value::String(string) => write!(f, "String({string:?})"),
            Value::ExternalId(id) => write!(f, "ExternalId({id:?})"),
            Value::Quantity(quantity) => quantity.fmt(f),
            Value::Time(time) => time.fmt(f),
        }
    }
}
