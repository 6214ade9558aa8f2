//! Integration tests for the capability traits

use std::collections::BTreeMap;

use hypermatch_foundation::{Atom, AtomsIndex, AtomsVector, ExpressionId, ExpressionStore};

struct Edges(BTreeMap<ExpressionId, AtomsVector>);

impl AtomsIndex for Edges {
    fn expressions_containing(&self, atom: Atom) -> Vec<ExpressionId> {
        self.0
            .iter()
            .filter(|(_, atoms)| atoms.contains(&atom))
            .map(|(id, _)| *id)
            .collect()
    }
}

fn edges() -> Edges {
    Edges(BTreeMap::from([
        (ExpressionId::new(0), vec![Atom::new(1), Atom::new(2)]),
        (ExpressionId::new(1), vec![Atom::new(2), Atom::new(3)]),
    ]))
}

#[test]
fn default_contains_uses_lookup() {
    let index = edges();
    assert!(index.contains(Atom::new(2), ExpressionId::new(0)));
    assert!(index.contains(Atom::new(2), ExpressionId::new(1)));
    assert!(!index.contains(Atom::new(3), ExpressionId::new(0)));
}

#[test]
fn references_are_indexes() {
    fn count<I: AtomsIndex>(index: I, atom: Atom) -> usize {
        index.expressions_containing(atom).len()
    }
    let index = edges();
    assert_eq!(count(&index, Atom::new(2)), 2);
    assert_eq!(count(&index, Atom::new(9)), 0);
}

#[test]
fn closures_are_stores() {
    let index = edges();
    let store = |id: ExpressionId| index.0.get(&id).cloned();

    assert_eq!(
        store.atoms_vector(ExpressionId::new(1)),
        Some(vec![Atom::new(2), Atom::new(3)])
    );
    assert_eq!(store.atoms_vector(ExpressionId::new(5)), None);
}
