use crate::Item;
use oxsdatatypes::Decimal;
use std::fmt;

/// A quantity value: an amount with an optional unit and optional bounds.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Quantity {
    pub amount: Decimal,
    pub unit: Option<Item>,
    pub lower_bound: Option<Decimal>,
    pub upper_bound: Option<Decimal>,
}

impl Quantity {
    pub fn new(amount: impl Into<Decimal>) -> Self {
        Self {
            amount: amount.into(),
            unit: None,
            lower_bound: None,
            upper_bound: None,
        }
    }

    #[must_use]
    pub fn with_unit(self, unit: Item) -> Self {
        Self {
            unit: Some(unit),
            ..self
        }
    }

    #[must_use]
    pub fn with_bounds(self, lower: impl Into<Decimal>, upper: impl Into<Decimal>) -> Self {
        Self {
            lower_bound: Some(lower.into()),
            upper_bound: Some(upper.into()),
            ..self
        }
    }

    /// Returns whether `self`, seen as a loose pattern, matches `other`.
    ///
    /// The amount must be equal. Unit and bounds are only compared if `self` specifies them.
    pub fn loosely_matches(&self, other: &Quantity) -> bool {
        self.amount == other.amount
            && loose_eq(self.unit.as_ref(), other.unit.as_ref())
            && loose_eq(self.lower_bound.as_ref(), other.lower_bound.as_ref())
            && loose_eq(self.upper_bound.as_ref(), other.upper_bound.as_ref())
    }
}

pub(crate) fn loose_eq<T: PartialEq>(pattern: Option<&T>, value: Option<&T>) -> bool {
    match pattern {
        Some(pattern) => value == Some(pattern),
        None => true,
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Quantity({}", self.amount)?;
        if let Some(unit) = &self.unit {
            write!(f, ", {unit}")?;
        }
        if let (Some(lower), Some(upper)) = (&self.lower_bound, &self.upper_bound) {
            write!(f, ", [{lower}, {upper}]")?;
        }
        f.write_str(")")
    }
}
