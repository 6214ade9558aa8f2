//! Propagating an input binding onto other patterns.

use std::collections::HashMap;

use hypermatch_foundation::{Atom, AtomsVector, Error, ExpressionStore, Result};

use crate::binding::Binding;
use crate::match_set::Match;
use crate::rule::Rule;

/// Replaces pattern variables in `atoms_to_replace` with the atoms they are
/// bound to when `input_patterns` is unified with `pattern_matches`.
///
/// Concrete atoms pass through unchanged. Returns false if the inputs do not
/// unify, or if `atoms_to_replace` uses a variable that never occurs in
/// `input_patterns`. On false the contents of `atoms_to_replace` are
/// unspecified.
pub fn substitute_missing_atoms_if_possible(
    input_patterns: &[AtomsVector],
    pattern_matches: &[AtomsVector],
    atoms_to_replace: &mut [AtomsVector],
) -> bool {
    let Some(binding) = Binding::from_terms(input_patterns, pattern_matches) else {
        return false;
    };

    for atom in atoms_to_replace.iter_mut().flatten() {
        match binding.resolve(*atom) {
            Some(resolved) => *atom = resolved,
            None => return false,
        }
    }
    true
}

/// Builds the concrete output terms for `matched`.
///
/// Variables bound by the inputs are substituted. Every other output
/// variable is named by one call to `fresh_atom`, and the same atom is used
/// for all of its occurrences.
///
/// # Errors
/// Returns `ExpressionNotFound` if `store` cannot resolve one of the
/// matched expressions, `MatchInconsistent` if the resolved expressions do
/// not unify with the rule's inputs, and any error `fresh_atom` returns.
pub fn instantiate_outputs<S, F>(
    rule: &Rule,
    matched: &Match,
    store: &S,
    mut fresh_atom: F,
) -> Result<Vec<AtomsVector>>
where
    S: ExpressionStore + ?Sized,
    F: FnMut() -> Result<Atom>,
{
    let concrete = matched
        .input_expressions()
        .iter()
        .map(|&id| {
            store
                .atoms_vector(id)
                .ok_or_else(|| Error::expression_not_found(id))
        })
        .collect::<Result<Vec<_>>>()?;

    let binding = Binding::from_terms(&rule.inputs, &concrete)
        .ok_or_else(|| Error::match_inconsistent(matched.rule()))?;
    let mut created: HashMap<Atom, Atom> = HashMap::new();

    let mut outputs = Vec::with_capacity(rule.outputs.len());
    for term in &rule.outputs {
        let mut output = AtomsVector::with_capacity(term.len());
        for &atom in term {
            let resolved = match binding.resolve(atom) {
                Some(bound) => bound,
                None => match created.get(&atom) {
                    Some(&fresh) => fresh,
                    None => {
                        let fresh = fresh_atom()?;
                        created.insert(atom, fresh);
                        fresh
                    }
                },
            };
            output.push(resolved);
        }
        outputs.push(output);
    }
    Ok(outputs)
}
