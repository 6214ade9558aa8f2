//! Atoms: the vertices of the hypergraph and the variables of rule patterns.

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// An atom.
///
/// Non-negative atoms are concrete vertices. Negative atoms are pattern
/// variables and only occur inside rule patterns. Atoms are compared by
/// equality; their numeric order carries no meaning.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Atom(i64);

/// The ordered endpoints of one expression, or one term of a pattern.
pub type AtomsVector = Vec<Atom>;

impl Atom {
    /// Creates an atom from its raw value.
    #[must_use]
    pub const fn new(raw: i64) -> Self {
        Self(raw)
    }

    /// Creates the `n`-th pattern variable.
    ///
    /// `Atom::variable(1)` is the raw atom `-1`.
    ///
    /// # Panics
    /// Panics in debug builds if `n` is zero, which would be the concrete
    /// atom `0`.
    #[must_use]
    #[allow(clippy::cast_lossless)]
    pub const fn variable(n: u32) -> Self {
        debug_assert!(n >= 1, "pattern variables are numbered from 1");
        Self(-(n as i64))
    }

    /// Returns the raw value.
    #[must_use]
    pub const fn raw(self) -> i64 {
        self.0
    }

    /// Returns true if this atom is a pattern variable.
    #[must_use]
    pub const fn is_variable(self) -> bool {
        self.0 < 0
    }

    /// Returns true if this atom is a concrete vertex.
    #[must_use]
    pub const fn is_concrete(self) -> bool {
        self.0 >= 0
    }
}

impl fmt::Debug for Atom {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_variable() {
            write!(f, "Var({})", -self.0)
        } else {
            write!(f, "Atom({})", self.0)
        }
    }
}

impl fmt::Display for Atom {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_variable() {
            write!(f, "?{}", -self.0)
        } else {
            write!(f, "{}", self.0)
        }
    }
}

impl From<i64> for Atom {
    fn from(raw: i64) -> Self {
        Self(raw)
    }
}
