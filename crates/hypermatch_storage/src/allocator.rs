//! Fresh concrete atom allocation.
//!
//! [`AtomAllocator`] is a small `Copy` cursor. A host takes one from its
//! [`crate::Hypergraph`] while borrowing the graph as an expression store,
//! and the graph's own cursor catches up when the created outputs are added.

use hypermatch_foundation::{Atom, Error, Result};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Hands out concrete atoms above every atom observed so far.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct AtomAllocator {
    /// Next atom to hand out, or `None` once `i64::MAX` has been used.
    next: Option<i64>,
}

impl Default for AtomAllocator {
    fn default() -> Self {
        Self { next: Some(0) }
    }
}

impl AtomAllocator {
    /// Creates an allocator whose first atom is `0`.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Moves the cursor past every concrete atom in `atoms`.
    pub fn observe(&mut self, atoms: &[Atom]) {
        let Some(max) = atoms.iter().filter(|a| a.is_concrete()).map(|a| a.raw()).max() else {
            return;
        };
        self.next = match (self.next, max.checked_add(1)) {
            (Some(next), Some(after)) => Some(next.max(after)),
            _ => None,
        };
    }

    /// Returns the atom the next [`Self::allocate`] would hand out.
    #[must_use]
    pub fn peek(&self) -> Option<Atom> {
        self.next.map(Atom::new)
    }

    /// Returns true once every concrete atom has been used.
    #[must_use]
    pub fn is_exhausted(&self) -> bool {
        self.next.is_none()
    }

    /// Allocates the next fresh atom.
    ///
    /// # Errors
    /// Returns `AtomsExhausted` after `i64::MAX` has been observed or handed
    /// out.
    pub fn allocate(&mut self) -> Result<Atom> {
        let next = self.next.ok_or_else(Error::atoms_exhausted)?;
        self.next = next.checked_add(1);
        Ok(Atom::new(next))
    }
}
