//! Integration tests for the matcher's add/remove/next cycle

use hypermatch_engine::{Match, Matcher, MatcherConfig, OrderingSpec, Rule};
use hypermatch_foundation::{Atom, AtomsIndex, ErrorKind, ExpressionId, ExpressionStore, RuleId};
use hypermatch_storage::Hypergraph;

fn v(n: u32) -> Atom {
    Atom::variable(n)
}

fn edge(raw: &[i64]) -> Vec<Atom> {
    raw.iter().copied().map(Atom::new).collect()
}

fn path_rule() -> Rule {
    Rule::new(
        vec![vec![v(1), v(2)], vec![v(2), v(3)]],
        vec![vec![v(1), v(3)]],
    )
}

fn matcher(rules: Vec<Rule>) -> Matcher {
    Matcher::with_ordering_codes(rules, &[(0, 0)], MatcherConfig::default()).unwrap()
}

fn expression_sets(matcher: &Matcher) -> Vec<Vec<ExpressionId>> {
    let mut all: Vec<_> = matcher
        .all_matches()
        .iter()
        .map(|m| m.input_expressions().to_vec())
        .collect();
    all.sort();
    all
}

// =============================================================================
// Adding
// =============================================================================

#[test]
fn search_only_reports_matches_touching_seeds() {
    let mut graph = Hypergraph::new();
    let old = graph.add_expressions([edge(&[1, 2]), edge(&[2, 3])]);
    let new = graph.add_expressions([edge(&[7, 8]), edge(&[8, 9])]);
    let mut m = matcher(vec![path_rule()]);

    m.add_matches_involving_expressions(&graph, &graph, &new, || false)
        .unwrap();

    assert_eq!(expression_sets(&m), vec![new.clone()]);
    assert!(m.matches_involving(old[0]).is_empty());
}

#[test]
fn literal_atoms_in_patterns_match_exactly() {
    let rule = Rule::new(vec![vec![Atom::new(0), v(1)], vec![v(1), v(2)]], vec![]);
    let mut graph = Hypergraph::new();
    let ids = graph.add_expressions([edge(&[0, 1]), edge(&[5, 1]), edge(&[1, 2])]);
    let mut m = matcher(vec![rule]);

    m.add_matches_involving_expressions(&graph, &graph, &ids, || false)
        .unwrap();

    assert_eq!(expression_sets(&m), vec![vec![ids[0], ids[2]]]);
}

#[test]
fn self_loops_match_repeated_variables() {
    let rule = Rule::new(vec![vec![v(1), v(1)]], vec![]);
    let mut graph = Hypergraph::new();
    let ids = graph.add_expressions([edge(&[1, 1]), edge(&[1, 2])]);
    let mut m = matcher(vec![rule]);

    m.add_matches_involving_expressions(&graph, &graph, &ids, || false)
        .unwrap();

    assert_eq!(expression_sets(&m), vec![vec![ids[0]]]);
}

#[test]
fn same_shape_terms_yield_both_orders() {
    // {?1,?2},{?1,?3}: two edges out of one vertex bind in either order
    let rule = Rule::new(vec![vec![v(1), v(2)], vec![v(1), v(3)]], vec![]);
    let mut graph = Hypergraph::new();
    let ids = graph.add_expressions([edge(&[1, 2]), edge(&[1, 3])]);
    let mut m = matcher(vec![rule]);

    m.add_matches_involving_expressions(&graph, &graph, &ids[..1], || false)
        .unwrap();

    assert_eq!(
        expression_sets(&m),
        vec![vec![ids[0], ids[1]], vec![ids[1], ids[0]]]
    );
}

#[test]
fn unindexed_expressions_are_never_matched() {
    let mut graph = Hypergraph::new();
    let ids = graph.add_expressions([edge(&[1, 2]), edge(&[2, 3])]);
    let ghost = ExpressionId::new(100);
    let store = |id: ExpressionId| {
        if id == ghost {
            Some(edge(&[3, 4]))
        } else {
            graph.atoms_vector(id)
        }
    };
    let mut m = matcher(vec![path_rule()]);

    m.add_matches_involving_expressions(&graph, &store, &[ids[0], ids[1], ghost], || false)
        .unwrap();

    assert!(!AtomsIndex::contains(&graph, Atom::new(3), ghost));
    assert_eq!(expression_sets(&m), vec![vec![ids[0], ids[1]]]);
}

#[test]
fn zero_arity_expressions_are_ignored() {
    let mut graph = Hypergraph::new();
    let ids = graph.add_expressions([vec![], edge(&[1])]);
    let mut m = matcher(vec![Rule::new(vec![vec![v(1)]], vec![])]);

    m.add_matches_involving_expressions(&graph, &graph, &ids, || false)
        .unwrap();

    assert_eq!(expression_sets(&m), vec![vec![ids[1]]]);
}

// =============================================================================
// Removing
// =============================================================================

#[test]
fn removal_is_idempotent() {
    let mut graph = Hypergraph::new();
    let ids = graph.add_expressions([edge(&[1, 2]), edge(&[2, 3]), edge(&[3, 4])]);
    let mut m = matcher(vec![path_rule()]);
    m.add_matches_involving_expressions(&graph, &graph, &ids, || false)
        .unwrap();

    assert_eq!(m.remove_matches_involving_expressions(&[ids[0]]), 1);
    let after_once = m.all_matches();
    assert_eq!(m.remove_matches_involving_expressions(&[ids[0]]), 0);

    assert_eq!(m.all_matches(), after_once);
}

#[test]
fn removing_unknown_expressions_is_noop() {
    let mut m = matcher(vec![path_rule()]);
    assert_eq!(
        m.remove_matches_involving_expressions(&[ExpressionId::new(3)]),
        0
    );
    assert!(m.is_empty());
}

// =============================================================================
// Next Match
// =============================================================================

#[test]
fn next_match_does_not_remove() {
    let mut graph = Hypergraph::new();
    let ids = graph.add_expressions([edge(&[1, 2]), edge(&[2, 3])]);
    let mut m = matcher(vec![path_rule()]);
    m.add_matches_involving_expressions(&graph, &graph, &ids, || false)
        .unwrap();

    let first = m.next_match().unwrap();
    let again = m.next_match().unwrap();

    assert_eq!(first, again);
    assert_eq!(m.len(), 1);
    assert!(m.contains(&Match::new(RuleId::new(0), ids.clone())));
}

#[test]
fn empty_iff_no_matches() {
    let mut graph = Hypergraph::new();
    let ids = graph.add_expressions([edge(&[1, 2]), edge(&[2, 3])]);
    let mut m = matcher(vec![path_rule()]);

    assert!(m.is_empty());
    assert_eq!(m.next_match().unwrap_err().kind, ErrorKind::NoMatches);

    m.add_matches_involving_expressions(&graph, &graph, &ids, || false)
        .unwrap();
    assert!(!m.is_empty());
    assert!(m.next_match().is_ok());

    m.remove_matches_involving_expressions(&ids[1..]);
    assert!(m.is_empty());
    assert_eq!(m.next_match().unwrap_err().kind, ErrorKind::NoMatches);
}

// =============================================================================
// Abort
// =============================================================================

#[test]
fn abort_before_search_changes_nothing() {
    let mut graph = Hypergraph::new();
    let ids = graph.add_expressions([edge(&[1, 2]), edge(&[2, 3])]);
    let mut m = matcher(vec![path_rule()]);

    let mut calls = 0;
    let err = m
        .add_matches_involving_expressions(&graph, &graph, &ids, || {
            calls += 1;
            true
        })
        .unwrap_err();

    assert_eq!(err.kind, ErrorKind::Aborted);
    assert_eq!(calls, 1);
    assert!(m.is_empty());
}

#[test]
fn abort_latency_is_bounded_by_interval() {
    let mut graph = Hypergraph::new();
    let ids = graph.add_expressions((0..200).map(|i| edge(&[i, i + 1])));
    let config = MatcherConfig::default().with_abort_check_interval(4);
    let mut m = Matcher::new(vec![path_rule()], OrderingSpec::default(), config).unwrap();

    // Fires on the third poll: the up-front one plus two interval polls
    let mut polls = 0;
    let err = m
        .add_matches_involving_expressions(&graph, &graph, &ids, || {
            polls += 1;
            polls == 3
        })
        .unwrap_err();

    assert!(err.is_aborted());
    assert_eq!(polls, 3);
    assert!(m.is_empty());
}
