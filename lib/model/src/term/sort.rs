use std::fmt;

/// The sort of a term, i.e., the logical class of the objects it may denote.
///
/// Sorts form a tree. A term of sort `s` may be bound to a variable of sort `t` if `s` coerces to
/// `t`, i.e., `t` is `s` or one of its ancestors (see [Sort::coerces_to]).
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Sort {
    Term,
    Value,
    Entity,
    Item,
    Property,
    Lexeme,
    DataValue,
    Iri,
    Text,
    String,
    ExternalId,
    Quantity,
    Time,
    Snak,
    Statement,
    IriAtom,
    StringAtom,
    DecimalAtom,
    DateTimeAtom,
    IntegerAtom,
    DatatypeAtom,
}

impl Sort {
    /// The direct super sort of this sort.
    pub fn parent(self) -> Option<Sort> {
        match self {
            Sort::Term => None,
            Sort::Value
            | Sort::Snak
            | Sort::Statement
            | Sort::IriAtom
            | Sort::StringAtom
            | Sort::DecimalAtom
            | Sort::DateTimeAtom
            | Sort::IntegerAtom
            | Sort::DatatypeAtom => Some(Sort::Term),
            Sort::Entity | Sort::DataValue => Some(Sort::Value),
            Sort::Item | Sort::Property | Sort::Lexeme => Some(Sort::Entity),
            Sort::Iri
            | Sort::Text
            | Sort::String
            | Sort::ExternalId
            | Sort::Quantity
            | Sort::Time => Some(Sort::DataValue),
        }
    }

    /// Returns whether a term of sort `self` may stand where a term of sort `other` is expected.
    pub fn coerces_to(self, other: Sort) -> bool {
        let mut current = Some(self);
        while let Some(sort) = current {
            if sort == other {
                return true;
            }
            current = sort.parent();
        }
        false
    }

    /// Returns whether one of the sorts coerces to the other.
    pub fn is_related(self, other: Sort) -> bool {
        self.coerces_to(other) || other.coerces_to(self)
    }
}

/// A variable of a term.
///
/// Besides its name, a variable has a [Sort] restricting the terms it may be bound to. A nullable
/// variable may additionally be bound to the [Atom::None](crate::Atom::None) atom that stands for
/// an absent optional field.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Variable {
    name: String,
    sort: Sort,
    nullable: bool,
}

impl Variable {
    pub fn new(name: impl Into<String>, sort: Sort) -> Self {
        Self {
            name: name.into(),
            sort,
            nullable: false,
        }
    }

    /// Creates a variable for an optional field.
    pub fn optional(name: impl Into<String>, sort: Sort) -> Self {
        Self {
            name: name.into(),
            sort,
            nullable: true,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn sort(&self) -> Sort {
        self.sort
    }

    pub fn is_nullable(&self) -> bool {
        self.nullable
    }

    /// Returns whether both variables denote the same logical variable.
    ///
    /// This is the case if they have the same name and one sort coerces to the other. For
    /// example, a value variable `x` may stand in for an item variable `x`.
    pub fn aliases(&self, other: &Variable) -> bool {
        self.name == other.name && self.sort.is_related(other.sort)
    }
}

impl fmt::Display for Variable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "?{}", self.name)
    }
}
