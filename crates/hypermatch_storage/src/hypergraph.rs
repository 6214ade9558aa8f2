//! A mutable set of expressions with its atoms index.
//!
//! `Hypergraph` is the host side of a matcher: it owns expression content,
//! allocates expression identifiers and fresh atoms, and keeps the
//! [`InvertedIndex`] in step with every insertion and removal.

use std::collections::BTreeMap;

use hypermatch_foundation::{
    Atom, AtomsIndex, AtomsVector, Error, ExpressionId, ExpressionStore, Result,
};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::allocator::AtomAllocator;
use crate::index::InvertedIndex;

/// Expression store and atoms index kept in sync.
#[derive(Clone, Debug, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Hypergraph {
    /// Live expressions by identifier.
    expressions: BTreeMap<ExpressionId, AtomsVector>,
    /// Atom to expressions index over the live expressions.
    index: InvertedIndex,
    /// Next expression identifier to allocate.
    next_expression: u64,
    /// Fresh atoms above every atom added so far.
    atoms: AtomAllocator,
}

impl Hypergraph {
    /// Creates an empty hypergraph.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a hypergraph holding `expressions`, in order.
    #[must_use]
    pub fn from_expressions<I>(expressions: I) -> Self
    where
        I: IntoIterator<Item = AtomsVector>,
    {
        let mut graph = Self::new();
        graph.add_expressions(expressions);
        graph
    }

    /// Adds an expression and returns its identifier.
    ///
    /// Identifiers increase with every call and are never reused.
    pub fn add_expression(&mut self, atoms: AtomsVector) -> ExpressionId {
        let id = ExpressionId::new(self.next_expression);
        self.next_expression += 1;

        self.atoms.observe(&atoms);
        self.index.add_expression(id, &atoms);
        self.expressions.insert(id, atoms);

        tracing::trace!(expression = %id, "expression added");
        id
    }

    /// Adds several expressions, returning their identifiers in order.
    pub fn add_expressions<I>(&mut self, expressions: I) -> Vec<ExpressionId>
    where
        I: IntoIterator<Item = AtomsVector>,
    {
        expressions
            .into_iter()
            .map(|atoms| self.add_expression(atoms))
            .collect()
    }

    /// Removes expressions, returning their atoms in the order given.
    ///
    /// Duplicate identifiers are removed once.
    ///
    /// # Errors
    ///
    /// Returns `ExpressionNotFound` if any identifier is unknown. Nothing is
    /// removed in that case.
    pub fn remove_expressions(&mut self, ids: &[ExpressionId]) -> Result<Vec<AtomsVector>> {
        if let Some(missing) = ids.iter().find(|id| !self.expressions.contains_key(id)) {
            return Err(Error::expression_not_found(*missing));
        }

        let mut removed = Vec::with_capacity(ids.len());
        for id in ids {
            if let Some(atoms) = self.expressions.remove(id) {
                self.index.remove_expression(*id, &atoms);
                removed.push(atoms);
            }
        }

        tracing::trace!(count = removed.len(), "expressions removed");
        Ok(removed)
    }

    /// Allocates a concrete atom not used by any expression so far.
    ///
    /// # Errors
    ///
    /// Returns `AtomsExhausted` once `i64::MAX` has been added or allocated.
    pub fn create_atom(&mut self) -> Result<Atom> {
        self.atoms.allocate()
    }

    /// Returns a copy of the atom allocator.
    ///
    /// The copy hands out the same atoms [`Self::create_atom`] would, without
    /// borrowing the graph. Adding its atoms to the graph moves the graph's
    /// own allocator past them.
    #[must_use]
    pub fn atom_allocator(&self) -> AtomAllocator {
        self.atoms
    }

    /// Gets the atoms of an expression.
    #[must_use]
    pub fn get(&self, id: ExpressionId) -> Option<&[Atom]> {
        self.expressions.get(&id).map(Vec::as_slice)
    }

    /// Returns true if the expression is live.
    #[must_use]
    pub fn contains(&self, id: ExpressionId) -> bool {
        self.expressions.contains_key(&id)
    }

    /// Returns the number of live expressions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.expressions.len()
    }

    /// Returns true if there are no live expressions.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.expressions.is_empty()
    }

    /// Iterates live expression identifiers in ascending order.
    pub fn expression_ids(&self) -> impl Iterator<Item = ExpressionId> + '_ {
        self.expressions.keys().copied()
    }

    /// Iterates live expressions in ascending identifier order.
    pub fn iter(&self) -> impl Iterator<Item = (ExpressionId, &[Atom])> {
        self.expressions.iter().map(|(id, atoms)| (*id, atoms.as_slice()))
    }

    /// Returns the underlying atoms index.
    #[must_use]
    pub fn index(&self) -> &InvertedIndex {
        &self.index
    }
}

impl AtomsIndex for Hypergraph {
    fn expressions_containing(&self, atom: Atom) -> Vec<ExpressionId> {
        self.index.expressions_containing(atom)
    }

    fn contains(&self, atom: Atom, expression: ExpressionId) -> bool {
        self.index.contains(atom, expression)
    }
}

impl ExpressionStore for Hypergraph {
    fn atoms_vector(&self, expression: ExpressionId) -> Option<AtomsVector> {
        self.expressions.get(&expression).cloned()
    }
}
