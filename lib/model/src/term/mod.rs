//! Terms over the statement model.
//!
//! Every [Value](crate::Value), [Snak](crate::Snak) and [Statement](crate::Statement) lowers to a
//! closed [Term]. Terms that contain [Variable]s are templates that can be matched against closed
//! terms using [unify].

mod lower;
mod sort;
mod substitution;
mod unify;

pub use sort::{Sort, Variable};
pub use substitution::Substitution;
pub use unify::unify;

use crate::{Datatype, TermError};
use oxrdf::NamedNode;
use oxsdatatypes::Decimal;
use std::collections::BTreeSet;
use std::fmt;

/// A leaf constant of a term.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Atom {
    Iri(NamedNode),
    String(String),
    Decimal(Decimal),
    /// A date time in its canonical lexical form.
    DateTime(String),
    Integer(i64),
    Datatype(Datatype),
    /// An absent optional field.
    None,
}

impl Atom {
    /// The sort of this atom. [Atom::None] has no sort of its own and reports [Sort::Term].
    pub fn sort(&self) -> Sort {
        match self {
            Atom::Iri(_) => Sort::IriAtom,
            Atom::String(_) => Sort::StringAtom,
            Atom::Decimal(_) => Sort::DecimalAtom,
            Atom::DateTime(_) => Sort::DateTimeAtom,
            Atom::Integer(_) => Sort::IntegerAtom,
            Atom::Datatype(_) => Sort::DatatypeAtom,
            Atom::None => Sort::Term,
        }
    }
}

/// The head symbol of a compound term.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Functor {
    Item,
    Property,
    Lexeme,
    Iri,
    Text,
    String,
    ExternalId,
    Quantity,
    Time,
    ValueSnak,
    SomeValueSnak,
    NoValueSnak,
    Statement,
}

impl Functor {
    pub fn arity(self) -> usize {
        match self {
            Functor::Item
            | Functor::Lexeme
            | Functor::Iri
            | Functor::String
            | Functor::ExternalId
            | Functor::SomeValueSnak
            | Functor::NoValueSnak => 1,
            Functor::Property | Functor::Text | Functor::ValueSnak | Functor::Statement => 2,
            Functor::Quantity | Functor::Time => 4,
        }
    }

    /// The sort of the compound terms with this functor.
    pub fn sort(self) -> Sort {
        match self {
            Functor::Item => Sort::Item,
            Functor::Property => Sort::Property,
            Functor::Lexeme => Sort::Lexeme,
            Functor::Iri => Sort::Iri,
            Functor::Text => Sort::Text,
            Functor::String => Sort::String,
            Functor::ExternalId => Sort::ExternalId,
            Functor::Quantity => Sort::Quantity,
            Functor::Time => Sort::Time,
            Functor::ValueSnak | Functor::SomeValueSnak | Functor::NoValueSnak => Sort::Snak,
            Functor::Statement => Sort::Statement,
        }
    }
}

/// A closed or open term.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Term {
    Variable(Variable),
    Atom(Atom),
    Compound(Functor, Vec<Term>),
}

impl Term {
    pub fn variable(name: impl Into<String>, sort: Sort) -> Self {
        Term::Variable(Variable::new(name, sort))
    }

    pub fn sort(&self) -> Sort {
        match self {
            Term::Variable(variable) => variable.sort(),
            Term::Atom(atom) => atom.sort(),
            Term::Compound(functor, _) => functor.sort(),
        }
    }

    /// Returns whether this term may be bound to `variable`.
    pub fn fits(&self, variable: &Variable) -> bool {
        match self {
            Term::Atom(Atom::None) => variable.is_nullable(),
            _ => self.sort().coerces_to(variable.sort()),
        }
    }

    /// The set of variables occurring in this term.
    pub fn variables(&self) -> BTreeSet<&Variable> {
        let mut result = BTreeSet::new();
        self.collect_variables(&mut result);
        result
    }

    fn collect_variables<'term>(&'term self, result: &mut BTreeSet<&'term Variable>) {
        match self {
            Term::Variable(variable) => {
                result.insert(variable);
            }
            Term::Atom(_) => {}
            Term::Compound(_, args) => {
                for arg in args {
                    arg.collect_variables(result);
                }
            }
        }
    }

    pub fn is_closed(&self) -> bool {
        match self {
            Term::Variable(_) => false,
            Term::Atom(_) => true,
            Term::Compound(_, args) => args.iter().all(Term::is_closed),
        }
    }

    /// Returns whether a variable aliasing `variable` occurs in this term.
    pub fn mentions(&self, variable: &Variable) -> bool {
        match self {
            Term::Variable(other) => other.aliases(variable),
            Term::Atom(_) => false,
            Term::Compound(_, args) => args.iter().any(|arg| arg.mentions(variable)),
        }
    }

    /// The number of nodes of this term.
    pub fn size(&self) -> usize {
        match self {
            Term::Variable(_) | Term::Atom(_) => 1,
            Term::Compound(_, args) => 1 + args.iter().map(Term::size).sum::<usize>(),
        }
    }

    /// Applies `substitution` to this term. Variables without a binding are kept.
    #[must_use]
    pub fn substitute(&self, substitution: &Substitution) -> Term {
        match self {
            Term::Variable(variable) => match substitution.get(variable) {
                Some(term) => term.clone(),
                None => self.clone(),
            },
            Term::Atom(_) => self.clone(),
            Term::Compound(functor, args) => Term::Compound(
                *functor,
                args.iter().map(|arg| arg.substitute(substitution)).collect(),
            ),
        }
    }

    /// Applies `substitution` to this term and requires the result to be closed.
    pub fn instantiate(&self, substitution: &Substitution) -> Result<Term, TermError> {
        let result = self.substitute(substitution);
        if let Some(variable) = result.variables().into_iter().next() {
            return Err(TermError::UnboundVariable(variable.name().to_owned()));
        }
        Ok(result)
    }

    /// Matches this term, seen as a template, against `ground`.
    pub fn match_ground(&self, ground: &Term) -> Option<Substitution> {
        unify([(self.clone(), ground.clone())])
    }

    /// Replaces `variable` and every variable aliasing it by `term`.
    ///
    /// An alias that `term` does not fit is replaced by `term` narrowed to the sort of the alias,
    /// which is only possible if `term` is a variable of a broader sort. Returns [None] if an
    /// alias can be neither replaced nor narrowed.
    pub(crate) fn replace(&self, variable: &Variable, term: &Term) -> Option<Term> {
        match self {
            Term::Variable(other) if other.aliases(variable) => {
                if term.fits(other) {
                    return Some(term.clone());
                }
                match term {
                    Term::Variable(target) if other.sort().coerces_to(target.sort()) => {
                        let name = target.name();
                        Some(Term::Variable(
                            if target.is_nullable() && other.is_nullable() {
                                Variable::optional(name, other.sort())
                            } else {
                                Variable::new(name, other.sort())
                            },
                        ))
                    }
                    _ => {
                        tracing::trace!("{other} cannot stand for {term}");
                        None
                    }
                }
            }
            Term::Variable(_) | Term::Atom(_) => Some(self.clone()),
            Term::Compound(functor, args) => Some(Term::Compound(
                *functor,
                args.iter()
                    .map(|arg| arg.replace(variable, term))
                    .collect::<Option<_>>()?,
            )),
        }
    }
}

impl From<Atom> for Term {
    fn from(atom: Atom) -> Self {
        Term::Atom(atom)
    }
}

impl From<Variable> for Term {
    fn from(variable: Variable) -> Self {
        Term::Variable(variable)
    }
}

impl fmt::Display for Atom {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Atom::Iri(iri) => iri.fmt(f),
            Atom::String(string) => write!(f, "{string:?}"),
            Atom::Decimal(decimal) => decimal.fmt(f),
            Atom::DateTime(date_time) => f.write_str(date_time),
            Atom::Integer(integer) => integer.fmt(f),
            Atom::Datatype(datatype) => datatype.fmt(f),
            Atom::None => f.write_str("None"),
        }
    }
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Term::Variable(variable) => variable.fmt(f),
            Term::Atom(atom) => atom.fmt(f),
            Term::Compound(functor, args) => {
                write!(f, "{functor:?}(")?;
                for (i, arg) in args.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    arg.fmt(f)?;
                }
                f.write_str(")")
            }
        }
    }
}
