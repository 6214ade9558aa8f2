//! Pattern variable bindings.
//!
//! A [`Binding`] maps pattern variables to concrete atoms and is extended one
//! pattern term at a time. Every extension is recorded on a trail so the
//! search can backtrack to an earlier state without cloning the map.

use std::collections::HashMap;

use hypermatch_foundation::Atom;

/// A consistent mapping from pattern variables to concrete atoms.
#[derive(Clone, Debug, Default)]
pub struct Binding {
    values: HashMap<Atom, Atom>,
    /// Variables in the order they were bound.
    trail: Vec<Atom>,
}

impl Binding {
    /// Creates an empty binding.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds the binding that unifies every term with its counterpart.
    ///
    /// Returns `None` if the term counts differ or any pair fails to unify.
    #[must_use]
    pub fn from_terms(patterns: &[Vec<Atom>], concrete: &[Vec<Atom>]) -> Option<Self> {
        if patterns.len() != concrete.len() {
            return None;
        }
        let mut binding = Self::new();
        for (pattern, atoms) in patterns.iter().zip(concrete) {
            if !binding.try_extend(pattern, atoms) {
                return None;
            }
        }
        Some(binding)
    }

    /// Gets the atom bound to a variable.
    #[must_use]
    pub fn get(&self, var: Atom) -> Option<Atom> {
        self.values.get(&var).copied()
    }

    /// Resolves a pattern atom: literals resolve to themselves, variables to
    /// their bound atom if any.
    #[must_use]
    pub fn resolve(&self, atom: Atom) -> Option<Atom> {
        if atom.is_variable() {
            self.get(atom)
        } else {
            Some(atom)
        }
    }

    /// Returns the number of bound variables.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns true if no variable is bound.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Iterates bindings in the order they were made.
    pub fn iter(&self) -> impl Iterator<Item = (Atom, Atom)> + '_ {
        self.trail.iter().map(|var| (*var, self.values[var]))
    }

    /// Returns a marker for the current state, for [`Binding::unwind`].
    #[must_use]
    pub fn mark(&self) -> usize {
        self.trail.len()
    }

    /// Drops every binding made after `mark`.
    pub fn unwind(&mut self, mark: usize) {
        while self.trail.len() > mark {
            if let Some(var) = self.trail.pop() {
                self.values.remove(&var);
            }
        }
    }

    /// Binds `var` to `atom`, or checks an existing binding agrees.
    fn bind(&mut self, var: Atom, atom: Atom) -> bool {
        match self.values.get(&var) {
            Some(existing) => *existing == atom,
            None => {
                self.values.insert(var, atom);
                self.trail.push(var);
                true
            }
        }
    }

    /// Extends the binding so that `pattern` maps onto `atoms`.
    ///
    /// Fails if the arities differ, a literal atom differs, or a bound
    /// variable would need a different atom. On failure the binding is left
    /// exactly as it was.
    pub fn try_extend(&mut self, pattern: &[Atom], atoms: &[Atom]) -> bool {
        if pattern.len() != atoms.len() {
            return false;
        }
        let mark = self.mark();
        for (&p, &a) in pattern.iter().zip(atoms) {
            let ok = if p.is_variable() {
                self.bind(p, a)
            } else {
                p == a
            };
            if !ok {
                self.unwind(mark);
                return false;
            }
        }
        true
    }
}
