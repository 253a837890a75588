use itertools::Itertools;
use kif_model::{Datatype, DatatypeMask, Entity, Item, Lexeme, Property, Snak, Value};
use std::fmt;

/// A boolean-combinable match predicate over the value in one slot of a statement.
///
/// A [Fingerprint::Snak] constrains the statements *about* the entity in the slot, not the entity
/// itself. For example, a subject fingerprint `Snak(P31 = Q5)` matches the subjects that are
/// instances of humans. Shallow matching ([Fingerprint::matches]) ignores such constraints.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Fingerprint {
    /// Matches everything.
    Full,
    /// Matches nothing.
    Empty,
    /// Matches the values whose datatype is in the mask.
    Datatype(DatatypeMask),
    /// Matches the values that loosely equal the given value.
    Value(Value),
    /// Matches the entities that have a statement with the given snak.
    Snak(Snak),
    And(Vec<Fingerprint>),
    Or(Vec<Fingerprint>),
}

impl Fingerprint {
    /// The conjunction of the given snaks.
    pub fn snaks(snaks: impl IntoIterator<Item = Snak>) -> Self {
        Fingerprint::And(snaks.into_iter().map(Fingerprint::Snak).collect())
    }

    /// The disjunction of the given fingerprints.
    pub fn any_of<F: Into<Fingerprint>>(fingerprints: impl IntoIterator<Item = F>) -> Self {
        Fingerprint::Or(fingerprints.into_iter().map(Into::into).collect())
    }

    #[must_use]
    pub fn and(self, other: impl Into<Fingerprint>) -> Self {
        Fingerprint::And(vec![self, other.into()])
    }

    #[must_use]
    pub fn or(self, other: impl Into<Fingerprint>) -> Self {
        Fingerprint::Or(vec![self, other.into()])
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Fingerprint::Empty)
    }

    pub fn is_full(&self) -> bool {
        matches!(self, Fingerprint::Full)
    }

    /// Returns the value of a [Fingerprint::Value].
    pub fn as_value(&self) -> Option<&Value> {
        match self {
            Fingerprint::Value(value) => Some(value),
            _ => None,
        }
    }

    /// The datatypes of all values this fingerprint may match.
    pub fn implied_mask(&self) -> DatatypeMask {
        match self {
            Fingerprint::Full | Fingerprint::Snak(_) => DatatypeMask::ALL,
            Fingerprint::Empty => DatatypeMask::EMPTY,
            Fingerprint::Datatype(mask) => *mask,
            Fingerprint::Value(value) => value.datatype().mask(),
            Fingerprint::And(children) => children
                .iter()
                .fold(DatatypeMask::ALL, |mask, child| mask & child.implied_mask()),
            Fingerprint::Or(children) => children
                .iter()
                .fold(DatatypeMask::EMPTY, |mask, child| mask | child.implied_mask()),
        }
    }

    /// Tests whether `value` satisfies this fingerprint, ignoring snak constraints.
    pub fn matches(&self, value: &Value) -> bool {
        match self {
            Fingerprint::Full | Fingerprint::Snak(_) => true,
            Fingerprint::Empty => false,
            Fingerprint::Datatype(mask) => mask.contains(value.datatype()),
            Fingerprint::Value(pattern) => pattern.loosely_matches(value),
            Fingerprint::And(children) => children.iter().all(|child| child.matches(value)),
            Fingerprint::Or(children) => children.iter().any(|child| child.matches(value)),
        }
    }

    /// Normalizes this fingerprint under the assumption that it only applies to values whose
    /// datatype is in `mask`.
    ///
    /// The result is the canonical form of `And(Datatype(mask), self)`. It never matches a value
    /// whose datatype is outside `mask`, and normalizing it again under `mask` returns it unchanged.
    #[must_use]
    pub fn normalize(&self, mask: DatatypeMask) -> Fingerprint {
        simplify(Fingerprint::And(vec![
            Fingerprint::Datatype(mask),
            self.clone(),
        ]))
    }
}

/// Simplifies `fingerprint` until no rule applies anymore.
fn simplify(fingerprint: Fingerprint) -> Fingerprint {
    let mut current = fingerprint;
    loop {
        let next = simplify_once(&current);
        if next == current {
            return current;
        }
        current = next;
    }
}

fn simplify_once(fingerprint: &Fingerprint) -> Fingerprint {
    match fingerprint {
        Fingerprint::Datatype(mask) if mask.is_empty() => Fingerprint::Empty,
        Fingerprint::Datatype(mask) if mask.is_all() => Fingerprint::Full,
        Fingerprint::Full
        | Fingerprint::Empty
        | Fingerprint::Datatype(_)
        | Fingerprint::Value(_)
        | Fingerprint::Snak(_) => fingerprint.clone(),
        Fingerprint::And(children) => simplify_and(children),
        Fingerprint::Or(children) => simplify_or(children),
    }
}

fn simplify_and(children: &[Fingerprint]) -> Fingerprint {
    let mut mask = DatatypeMask::ALL;
    let mut rest = Vec::new();
    for child in flatten_and(children.iter().map(|child| simplify(child.clone()))) {
        match child {
            Fingerprint::Empty => return Fingerprint::Empty,
            Fingerprint::Full => {}
            Fingerprint::Datatype(other) => mask = mask & other,
            _ => rest.push(child),
        }
    }
    if mask.is_empty() {
        return Fingerprint::Empty;
    }

    let rest = rest.into_iter().sorted().dedup().collect::<Vec<_>>();
    let mut values = rest.iter().filter_map(Fingerprint::as_value);
    if let Some(value) = values.next() {
        if values.next().is_some() || !mask.contains(value.datatype()) {
            return Fingerprint::Empty;
        }
    }

    // Push the mask into the disjunctions.
    let mut conjuncts = Vec::with_capacity(rest.len() + 1);
    for child in rest {
        match child {
            Fingerprint::Or(branches) if !mask.is_all() => {
                let guarded = branches
                    .into_iter()
                    .map(|branch| Fingerprint::And(vec![Fingerprint::Datatype(mask), branch]))
                    .collect();
                match simplify(Fingerprint::Or(guarded)) {
                    Fingerprint::Empty => return Fingerprint::Empty,
                    Fingerprint::Full => {}
                    Fingerprint::And(children) => conjuncts.extend(children),
                    other => conjuncts.push(other),
                }
            }
            _ => conjuncts.push(child),
        }
    }

    let implied = conjuncts
        .iter()
        .fold(DatatypeMask::ALL, |implied, child| {
            implied & child.implied_mask()
        });
    if !mask.contains_all(implied) {
        conjuncts.push(Fingerprint::Datatype(mask));
    }
    collapse(conjuncts, Fingerprint::Full, Fingerprint::And)
}

fn simplify_or(children: &[Fingerprint]) -> Fingerprint {
    let mut mask = DatatypeMask::EMPTY;
    let mut rest = Vec::new();
    for child in flatten_or(children.iter().map(|child| simplify(child.clone()))) {
        match child {
            Fingerprint::Full => return Fingerprint::Full,
            Fingerprint::Empty => {}
            Fingerprint::Datatype(other) => mask = mask | other,
            _ => rest.push(child),
        }
    }
    if mask.is_all() {
        return Fingerprint::Full;
    }

    // Values already covered by the datatype mask are redundant.
    let mut disjuncts = rest
        .into_iter()
        .filter(|child| match child.as_value() {
            Some(value) => !mask.contains(value.datatype()),
            None => true,
        })
        .collect::<Vec<_>>();
    if !mask.is_empty() {
        disjuncts.push(Fingerprint::Datatype(mask));
    }
    collapse(disjuncts, Fingerprint::Empty, Fingerprint::Or)
}

/// Sorts and deduplicates `children` and collapses trivial combinators.
fn collapse(
    children: Vec<Fingerprint>,
    neutral: Fingerprint,
    combinator: fn(Vec<Fingerprint>) -> Fingerprint,
) -> Fingerprint {
    let mut children = children.into_iter().sorted().dedup().collect::<Vec<_>>();
    match children.len() {
        0 => neutral,
        1 => children.remove(0),
        _ => combinator(children),
    }
}

fn flatten_and(children: impl Iterator<Item = Fingerprint>) -> Vec<Fingerprint> {
    children
        .flat_map(|child| match child {
            Fingerprint::And(children) => children,
            other => vec![other],
        })
        .collect()
}

fn flatten_or(children: impl Iterator<Item = Fingerprint>) -> Vec<Fingerprint> {
    children
        .flat_map(|child| match child {
            Fingerprint::Or(children) => children,
            other => vec![other],
        })
        .collect()
}

macro_rules! implement_from {
    ($t:ty, $convert:expr) => {
        impl From<$t> for Fingerprint {
            fn from(value: $t) -> Self {
                $convert(value)
            }
        }
    };
}

implement_from!(Value, Fingerprint::Value);
implement_from!(Snak, Fingerprint::Snak);
implement_from!(DatatypeMask, Fingerprint::Datatype);
implement_from!(Entity, |entity: Entity| Fingerprint::Value(entity.into()));
implement_from!(Item, |item: Item| Fingerprint::Value(item.into()));
implement_from!(Property, |property: Property| Fingerprint::Value(
    property.into()
));
implement_from!(Lexeme, |lexeme: Lexeme| Fingerprint::Value(lexeme.into()));
implement_from!(Datatype, |datatype: Datatype| Fingerprint::Datatype(
    datatype.mask()
));

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Fingerprint::Full => f.write_str("Full"),
            Fingerprint::Empty => f.write_str("Empty"),
            Fingerprint::Datatype(mask) => {
                write!(f, "Datatype({})", mask.datatypes().join(" | "))
            }
            Fingerprint::Value(value) => value.fmt(f),
            Fingerprint::Snak(snak) => snak.fmt(f),
            Fingerprint::And(children) => write!(f, "And({})", children.iter().join(", ")),
            Fingerprint::Or(children) => write!(f, "Or({})", children.iter().join(", ")),
        }
    }
}
