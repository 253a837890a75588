use crate::{Property, SnakMask, Value};
use std::fmt;

/// The kind of a [Snak].
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum SnakKind {
    Value,
    SomeValue,
    NoValue,
}

impl SnakKind {
    #[must_use]
    pub const fn mask(self) -> SnakMask {
        match self {
            SnakKind::Value => SnakMask::VALUE_SNAK,
            SnakKind::SomeValue => SnakMask::SOME_VALUE_SNAK,
            SnakKind::NoValue => SnakMask::NO_VALUE_SNAK,
        }
    }
}

/// A property-level claim: the property has a value, some unknown value, or no value.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Snak {
    Value { property: Property, value: Value },
    SomeValue { property: Property },
    NoValue { property: Property },
}

impl Snak {
    pub fn value(property: Property, value: impl Into<Value>) -> Self {
        Snak::Value {
            property,
            value: value.into(),
        }
    }

    pub fn some_value(property: Property) -> Self {
        Snak::SomeValue { property }
    }

    pub fn no_value(property: Property) -> Self {
        Snak::NoValue { property }
    }

    pub fn property(&self) -> &Property {
        match self {
            Snak::Value { property, .. }
            | Snak::SomeValue { property }
            | Snak::NoValue { property } => property,
        }
    }

    pub fn kind(&self) -> SnakKind {
        match self {
            Snak::Value { .. } => SnakKind::Value,
            Snak::SomeValue { .. } => SnakKind::SomeValue,
            Snak::NoValue { .. } => SnakKind::NoValue,
        }
    }

    /// Returns the value of a value snak.
    pub fn as_value(&self) -> Option<&Value> {
        match self {
            Snak::Value { value, .. } => Some(value),
            Snak::SomeValue { .. } | Snak::NoValue { .. } => None,
        }
    }

    /// Returns whether `self`, seen as a loose pattern, matches `other`.
    pub fn loosely_matches(&self, other: &Snak) -> bool {
        match (self, other) {
            (
                Snak::Value {
                    property: lhs,
                    value: lhs_value,
                },
                Snak::Value {
                    property: rhs,
                    value: rhs_value,
                },
            ) => lhs.same_iri(rhs) && lhs_value.loosely_matches(rhs_value),
            (Snak::SomeValue { property: lhs }, Snak::SomeValue { property: rhs })
            | (Snak::NoValue { property: lhs }, Snak::NoValue { property: rhs }) => {
                lhs.same_iri(rhs)
            }
            _ => false,
        }
    }
}

impl fmt::Display for Snak {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Snak::Value { property, value } => write!(f, "ValueSnak({property}, {value})"),
            Snak::SomeValue { property } => write!(f, "SomeValueSnak({property})"),
            Snak::NoValue { property } => write!(f, "NoValueSnak({property})"),
        }
    }
}
