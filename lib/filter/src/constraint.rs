use crate::Fingerprint;
use kif_model::{DatatypeMask, Snak, Value};

/// A conjunctive constraint on one slot of a statement.
///
/// A slot satisfies the constraint if its value is one of `values` (any value if [None]), its
/// datatype is in `mask` and, for entities, it has a statement for each of `snaks`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SlotConstraint {
    pub values: Option<Vec<Value>>,
    pub mask: DatatypeMask,
    pub snaks: Vec<Snak>,
}

impl SlotConstraint {
    /// The constraint satisfied by every slot whose datatype is in `mask`.
    pub fn any(mask: DatatypeMask) -> Self {
        Self {
            values: None,
            mask,
            snaks: Vec::new(),
        }
    }

    /// Returns the value if this constraint admits exactly one.
    pub fn single_value(&self) -> Option<&Value> {
        match self.values.as_deref() {
            Some([value]) => Some(value),
            _ => None,
        }
    }

    /// The conjunction of two constraints, or [None] if it is unsatisfiable.
    fn merge(&self, other: &SlotConstraint) -> Option<SlotConstraint> {
        let mask = self.mask & other.mask;
        if mask.is_empty() {
            return None;
        }
        let values = match (&self.values, &other.values) {
            (None, None) => None,
            (Some(values), None) | (None, Some(values)) => Some(values.clone()),
            (Some(lhs), Some(rhs)) => Some(
                lhs.iter()
                    .filter(|value| rhs.contains(*value))
                    .cloned()
                    .collect(),
            ),
        };
        let values = match values {
            Some(values) => {
                let values = values
                    .into_iter()
                    .filter(|value| mask.contains(value.datatype()))
                    .collect::<Vec<_>>();
                if values.is_empty() {
                    return None;
                }
                Some(values)
            }
            None => None,
        };
        let mut snaks = self.snaks.clone();
        snaks.extend(other.snaks.iter().cloned());
        Some(SlotConstraint {
            values,
            mask,
            snaks,
        })
    }
}

impl Fingerprint {
    /// Expands this fingerprint into its disjunctive normal form.
    ///
    /// The fingerprint is satisfied if one of the returned constraints is satisfied. An empty list
    /// means the fingerprint is unsatisfiable. A disjunction of values is kept as a single
    /// constraint with several candidate values.
    pub fn expand(&self) -> Vec<SlotConstraint> {
        match self {
            Fingerprint::Full => vec![SlotConstraint::any(DatatypeMask::ALL)],
            Fingerprint::Empty => Vec::new(),
            Fingerprint::Datatype(mask) => vec![SlotConstraint::any(*mask)],
            Fingerprint::Value(value) => vec![SlotConstraint {
                values: Some(vec![value.clone()]),
                mask: DatatypeMask::ALL,
                snaks: Vec::new(),
            }],
            Fingerprint::Snak(snak) => vec![SlotConstraint {
                values: None,
                mask: DatatypeMask::ALL,
                snaks: vec![snak.clone()],
            }],
            Fingerprint::Or(children) => {
                let values = children
                    .iter()
                    .map(Fingerprint::as_value)
                    .collect::<Option<Vec<_>>>();
                match values {
                    Some(values) => vec![SlotConstraint {
                        values: Some(values.into_iter().cloned().collect()),
                        mask: DatatypeMask::ALL,
                        snaks: Vec::new(),
                    }],
                    None => children.iter().flat_map(Fingerprint::expand).collect(),
                }
            }
            Fingerprint::And(children) => {
                children
                    .iter()
                    .fold(vec![SlotConstraint::any(DatatypeMask::ALL)], |acc, child| {
                        let expanded = child.expand();
                        acc.iter()
                            .flat_map(|lhs| expanded.iter().filter_map(|rhs| lhs.merge(rhs)))
                            .collect()
                    })
            }
        }
    }
}
