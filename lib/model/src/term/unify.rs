use crate::term::{Substitution, Term, Variable};

/// Solves a set of term equations.
///
/// Returns the most general unifier of `equations`, or [None] if the equations have no solution.
/// A solution does not exist if two compound terms differ in their functor or arity, two distinct
/// atoms are equated, a variable would have to be bound to a term containing itself, or a term
/// does not fit the sort of the variable it would be bound to.
///
/// A variable equated with another variable is bound to the variable of the narrower sort.
/// Variables sharing a name with a bound variable (see [Variable::aliases]) are bound along with
/// it, and the equations have no solution if the term does not fit one of them.
pub fn unify(equations: impl IntoIterator<Item = (Term, Term)>) -> Option<Substitution> {
    let mut pending = equations.into_iter().collect::<Vec<_>>();
    let mut solution = Substitution::new();

    while let Some(equation) = pending.pop() {
        match equation {
            (lhs, rhs) if lhs == rhs => {}
            (Term::Variable(lhs), Term::Variable(rhs)) => {
                let (variable, target) = orient(lhs, rhs)?;
                eliminate(
                    &variable,
                    &Term::Variable(target),
                    &mut pending,
                    &mut solution,
                )?;
            }
            (Term::Variable(variable), term) | (term, Term::Variable(variable)) => {
                if term.mentions(&variable) || !term.fits(&variable) {
                    tracing::trace!("cannot bind {variable} to {term}");
                    return None;
                }
                eliminate(&variable, &term, &mut pending, &mut solution)?;
            }
            (Term::Compound(lhs_functor, lhs_args), Term::Compound(rhs_functor, rhs_args)) => {
                if lhs_functor != rhs_functor || lhs_args.len() != rhs_args.len() {
                    tracing::trace!("functor mismatch: {lhs_functor:?} and {rhs_functor:?}");
                    return None;
                }
                pending.extend(lhs_args.into_iter().zip(rhs_args));
            }
            _ => return None,
        }
    }

    Some(solution)
}

/// Orients a variable equation such that the broader variable is bound to the narrower one.
fn orient(lhs: Variable, rhs: Variable) -> Option<(Variable, Variable)> {
    let (lhs_sort, rhs_sort) = (lhs.sort(), rhs.sort());
    if lhs_sort == rhs_sort {
        // Prefer keeping the variable that does not admit absent fields.
        if rhs.is_nullable() && !lhs.is_nullable() {
            return Some((rhs, lhs));
        }
        return Some((lhs, rhs));
    }
    if rhs_sort.coerces_to(lhs_sort) {
        Some((lhs, rhs))
    } else if lhs_sort.coerces_to(rhs_sort) {
        Some((rhs, lhs))
    } else {
        None
    }
}

fn eliminate(
    variable: &Variable,
    term: &Term,
    pending: &mut [(Term, Term)],
    solution: &mut Substitution,
) -> Option<()> {
    for (lhs, rhs) in pending.iter_mut() {
        *lhs = lhs.replace(variable, term)?;
        *rhs = rhs.replace(variable, term)?;
    }
    for bound in solution.bindings_mut() {
        *bound = bound.replace(variable, term)?;
    }
    solution.insert(variable.clone(), term.clone());
    Some(())
}
