use crate::term::{Atom, Term, Variable};
use std::collections::BTreeMap;
use std::fmt;

/// A mapping from variables to terms.
///
/// Substitutions returned by [unify](crate::term::unify) are idempotent: no bound variable occurs
/// in any of the bound terms.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Substitution {
    bindings: BTreeMap<Variable, Term>,
}

impl Substitution {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the binding of `variable`.
    ///
    /// If `variable` itself is unbound, a binding of an aliasing variable is returned, provided
    /// that the bound term fits `variable`.
    pub fn get(&self, variable: &Variable) -> Option<&Term> {
        if let Some(term) = self.bindings.get(variable) {
            return Some(term);
        }
        self.bindings
            .iter()
            .find(|(bound, term)| bound.aliases(variable) && term.fits(variable))
            .map(|(_, term)| term)
    }

    /// Returns the first binding of a variable with the given name.
    pub fn get_by_name(&self, name: &str) -> Option<&Term> {
        self.bindings
            .iter()
            .find(|(bound, _)| bound.name() == name)
            .map(|(_, term)| term)
    }

    /// Returns the atom bound to the variable with the given name, if any.
    pub fn atom(&self, name: &str) -> Option<&Atom> {
        match self.get_by_name(name)? {
            Term::Atom(atom) => Some(atom),
            Term::Variable(_) | Term::Compound(..) => None,
        }
    }

    pub fn insert(&mut self, variable: Variable, term: Term) -> Option<Term> {
        self.bindings.insert(variable, term)
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Variable, &Term)> {
        self.bindings.iter()
    }

    pub(crate) fn bindings_mut(&mut self) -> impl Iterator<Item = &mut Term> {
        self.bindings.values_mut()
    }
}

impl FromIterator<(Variable, Term)> for Substitution {
    fn from_iter<T: IntoIterator<Item = (Variable, Term)>>(iter: T) -> Self {
        Self {
            bindings: iter.into_iter().collect(),
        }
    }
}

impl fmt::Display for Substitution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("{")?;
        for (i, (variable, term)) in self.bindings.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{variable}: {term}")?;
        }
        f.write_str("}")
    }
}
