//! Evolution loop integration tests
//!
//! Applies matches to a hypergraph until none remain, keeping the matcher in
//! step with every rewrite.

use hypermatch_engine::{
    Matcher, MatcherConfig, OrderingDirection, OrderingFunction, OrderingSpec, Rule,
};
use hypermatch_foundation::{Atom, ExpressionId, Result};
use hypermatch_storage::Hypergraph;

fn v(n: u32) -> Atom {
    Atom::variable(n)
}

fn edge(raw: &[i64]) -> Vec<Atom> {
    raw.iter().copied().map(Atom::new).collect()
}

/// Applies the next match. Returns `Ok(false)` when nothing is left.
fn step(matcher: &mut Matcher, graph: &mut Hypergraph) -> Result<bool> {
    if matcher.is_empty() {
        return Ok(false);
    }
    let next = matcher.next_match()?;

    // Adding the outputs moves the graph's own allocator past these atoms
    let mut atoms = graph.atom_allocator();
    let outputs = matcher.instantiate_outputs(&next, &*graph, || atoms.allocate())?;

    graph.remove_expressions(next.input_expressions())?;
    matcher.remove_matches_involving_expressions(next.input_expressions());

    let created = graph.add_expressions(outputs);
    matcher.add_matches_involving_expressions(&*graph, &*graph, &created, || false)?;
    Ok(true)
}

fn evolve(matcher: &mut Matcher, graph: &mut Hypergraph, max_steps: usize) -> Result<usize> {
    let mut steps = 0;
    while steps < max_steps && step(matcher, graph)? {
        steps += 1;
    }
    Ok(steps)
}

fn start(rules: Vec<Rule>, edges: &[&[i64]], spec: OrderingSpec) -> (Matcher, Hypergraph) {
    let mut graph = Hypergraph::new();
    let ids: Vec<ExpressionId> = graph.add_expressions(edges.iter().map(|e| edge(e)));
    let mut matcher = Matcher::new(rules, spec, MatcherConfig::default()).unwrap();
    matcher
        .add_matches_involving_expressions(&graph, &graph, &ids, || false)
        .unwrap();
    (matcher, graph)
}

#[test]
fn path_contraction_terminates() {
    // {?1,?2},{?2,?3} -> {?1,?3}: a path of n edges contracts to one edge
    let rule = Rule::new(
        vec![vec![v(1), v(2)], vec![v(2), v(3)]],
        vec![vec![v(1), v(3)]],
    );
    let (mut matcher, mut graph) = start(
        vec![rule],
        &[&[0, 1], &[1, 2], &[2, 3], &[3, 4], &[4, 5]],
        OrderingSpec::default(),
    );

    let steps = evolve(&mut matcher, &mut graph, 100).unwrap();

    assert_eq!(steps, 4);
    assert_eq!(graph.len(), 1);
    assert_eq!(graph.iter().next().map(|(_, atoms)| atoms.to_vec()), Some(edge(&[0, 5])));
    assert!(matcher.is_empty());
}

#[test]
fn growth_rule_creates_fresh_atoms() {
    // {?1,?2} -> {?1,?3},{?3,?2}: every step splits one edge
    let rule = Rule::new(
        vec![vec![v(1), v(2)]],
        vec![vec![v(1), v(3)], vec![v(3), v(2)]],
    );
    let spec = OrderingSpec::default()
        .then(OrderingFunction::SortedExpressionIds, OrderingDirection::Normal);
    let (mut matcher, mut graph) = start(vec![rule], &[&[0, 1]], spec);

    let steps = evolve(&mut matcher, &mut graph, 5).unwrap();

    assert_eq!(steps, 5);
    assert_eq!(graph.len(), 6);
    assert_eq!(matcher.len(), 6);

    // Still a single path from 0 to 1
    let mut atoms: Vec<i64> = graph.iter().flat_map(|(_, a)| a.iter().map(|x| x.raw())).collect();
    atoms.sort_unstable();
    atoms.dedup();
    assert_eq!(atoms.len(), 7);
}

#[test]
fn matcher_always_agrees_with_a_fresh_scan() {
    let rules = vec![
        Rule::new(
            vec![vec![v(1), v(2)], vec![v(1), v(3)]],
            vec![vec![v(1), v(2)], vec![v(2), v(4)], vec![v(3), v(4)]],
        ),
        Rule::new(vec![vec![v(1), v(1)]], vec![vec![v(1), v(2)]]),
    ];
    let (mut matcher, mut graph) = start(
        rules.clone(),
        &[&[0, 1], &[0, 2], &[3, 3]],
        OrderingSpec::default(),
    );

    for _ in 0..6 {
        if !step(&mut matcher, &mut graph).unwrap() {
            break;
        }
        let mut fresh =
            Matcher::new(rules.clone(), OrderingSpec::default(), MatcherConfig::default())
                .unwrap();
        let all: Vec<_> = graph.expression_ids().collect();
        fresh
            .add_matches_involving_expressions(&graph, &graph, &all, || false)
            .unwrap();
        assert_eq!(matcher.all_matches(), fresh.all_matches());
    }
}
