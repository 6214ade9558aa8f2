//! Inverted index from atoms to the expressions containing them.
//!
//! The index is the matcher's only discovery path: candidates for a pattern
//! term are always drawn from the set of expressions sharing an atom that is
//! already known for that term.

use std::collections::{BTreeSet, HashMap};

use hypermatch_foundation::{Atom, AtomsIndex, ExpressionId};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Maps each atom to the set of expressions containing it.
///
/// Sets are ordered so lookups return expressions in creation order.
#[derive(Clone, Debug, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct InvertedIndex {
    by_atom: HashMap<Atom, BTreeSet<ExpressionId>>,
}

impl InvertedIndex {
    /// Creates a new empty index.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Indexes `id` under every atom in `atoms`.
    ///
    /// An atom repeated within `atoms` indexes the expression once.
    pub fn add_expression(&mut self, id: ExpressionId, atoms: &[Atom]) {
        for &atom in atoms {
            self.by_atom.entry(atom).or_default().insert(id);
        }
    }

    /// Removes `id` from every atom in `atoms`.
    ///
    /// Atoms left with no expressions are dropped from the index.
    pub fn remove_expression(&mut self, id: ExpressionId, atoms: &[Atom]) {
        for atom in atoms {
            if let Some(set) = self.by_atom.get_mut(atom) {
                set.remove(&id);
                if set.is_empty() {
                    self.by_atom.remove(atom);
                }
            }
        }
    }

    /// Returns the expressions containing `atom`, in ascending order.
    pub fn iter_containing(&self, atom: Atom) -> impl Iterator<Item = ExpressionId> + '_ {
        self.by_atom.get(&atom).into_iter().flatten().copied()
    }

    /// Returns the number of expressions containing `atom`.
    #[must_use]
    pub fn count_containing(&self, atom: Atom) -> usize {
        self.by_atom.get(&atom).map_or(0, BTreeSet::len)
    }

    /// Returns the number of distinct atoms indexed.
    #[must_use]
    pub fn atom_count(&self) -> usize {
        self.by_atom.len()
    }

    /// Returns true if nothing is indexed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.by_atom.is_empty()
    }
}

impl AtomsIndex for InvertedIndex {
    fn expressions_containing(&self, atom: Atom) -> Vec<ExpressionId> {
        self.iter_containing(atom).collect()
    }

    fn contains(&self, atom: Atom, expression: ExpressionId) -> bool {
        self.by_atom
            .get(&atom)
            .is_some_and(|set| set.contains(&expression))
    }
}
