//! Integration tests for atoms and identifiers

use hypermatch_foundation::{Atom, ExpressionId, RuleId};

// =============================================================================
// Atoms
// =============================================================================

#[test]
fn negative_atoms_are_variables() {
    assert!(Atom::new(-1).is_variable());
    assert!(!Atom::new(-1).is_concrete());
    assert!(Atom::new(0).is_concrete());
    assert!(Atom::new(7).is_concrete());
}

#[test]
fn variable_constructor_counts_down() {
    assert_eq!(Atom::variable(1), Atom::new(-1));
    assert_eq!(Atom::variable(3).raw(), -3);
    assert!(Atom::variable(u32::MAX).is_variable());
}

#[test]
fn atom_display() {
    assert_eq!(format!("{}", Atom::new(5)), "5");
    assert_eq!(format!("{}", Atom::variable(2)), "?2");
}

#[test]
fn atom_from_raw() {
    let atom: Atom = 12.into();
    assert_eq!(atom, Atom::new(12));
}

// =============================================================================
// Identifiers
// =============================================================================

#[test]
fn expression_ids_order_by_creation() {
    let mut ids = vec![ExpressionId::new(3), ExpressionId::new(1), ExpressionId::new(2)];
    ids.sort();
    assert_eq!(
        ids.iter().map(|id| id.raw()).collect::<Vec<_>>(),
        vec![1, 2, 3]
    );
}

#[test]
fn expression_id_display() {
    assert_eq!(format!("{}", ExpressionId::new(9)), "9");
    assert_eq!(format!("{:?}", ExpressionId::new(9)), "ExpressionId(9)");
}

#[test]
fn rule_id_indexes_rule_list() {
    let id = RuleId::new(4);
    assert_eq!(id.raw(), 4);
    assert_eq!(id.index(), 4);
    assert!(RuleId::new(1) < RuleId::new(2));
}
