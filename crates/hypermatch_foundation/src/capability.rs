//! Lookups the matcher consumes from the host.
//!
//! The matcher never owns expressions. It discovers them through an
//! [`AtomsIndex`] and reads their atoms through an [`ExpressionStore`].
//! Both are read-only for the duration of a matcher call.

use crate::atom::{Atom, AtomsVector};
use crate::ids::ExpressionId;

/// Inverted index from atoms to the expressions containing them.
///
/// An expression the index does not report can never appear in a match.
pub trait AtomsIndex {
    /// Returns the expressions currently containing `atom`.
    fn expressions_containing(&self, atom: Atom) -> Vec<ExpressionId>;

    /// Returns true if `expression` is indexed under `atom`.
    fn contains(&self, atom: Atom, expression: ExpressionId) -> bool {
        self.expressions_containing(atom).contains(&expression)
    }
}

/// Resolves an expression identifier to its atoms.
///
/// Must return `Some` for every identifier the paired [`AtomsIndex`] can
/// return.
pub trait ExpressionStore {
    /// Returns the atoms of `expression`, or `None` if it is unknown.
    fn atoms_vector(&self, expression: ExpressionId) -> Option<AtomsVector>;
}

impl<F> ExpressionStore for F
where
    F: Fn(ExpressionId) -> Option<AtomsVector>,
{
    fn atoms_vector(&self, expression: ExpressionId) -> Option<AtomsVector> {
        self(expression)
    }
}

impl<T: AtomsIndex + ?Sized> AtomsIndex for &T {
    fn expressions_containing(&self, atom: Atom) -> Vec<ExpressionId> {
        (**self).expressions_containing(atom)
    }

    fn contains(&self, atom: Atom, expression: ExpressionId) -> bool {
        (**self).contains(atom, expression)
    }
}
