//! Rewriting rules and their compiled join plans.
//!
//! A [`Rule`] is a pair of input and output patterns over a shared set of
//! pattern variables. Before matching, each rule is compiled into a
//! [`CompiledRule`]: one [`JoinPlan`] per input term, describing how to
//! complete a match once that term has been bound to a seed expression.

use std::collections::HashSet;

use hypermatch_foundation::{Atom, AtomsVector, Error, Result, RuleId};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

// =============================================================================
// Rule
// =============================================================================

/// A rewriting rule.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Rule {
    /// Input pattern terms, matched against existing expressions.
    pub inputs: Vec<AtomsVector>,
    /// Output pattern terms, instantiated when a match fires.
    pub outputs: Vec<AtomsVector>,
}

impl Rule {
    /// Creates a rule.
    #[must_use]
    pub fn new(inputs: Vec<AtomsVector>, outputs: Vec<AtomsVector>) -> Self {
        Self { inputs, outputs }
    }

    /// Returns the distinct pattern variables of the input terms.
    #[must_use]
    pub fn input_variables(&self) -> HashSet<Atom> {
        self.inputs
            .iter()
            .flatten()
            .copied()
            .filter(|a| a.is_variable())
            .collect()
    }

    /// Returns true if the input terms form one connected component, where
    /// two terms are adjacent when they share a pattern variable.
    ///
    /// A rule with no input terms is not connected.
    #[must_use]
    pub fn is_connected(&self) -> bool {
        if self.inputs.is_empty() {
            return false;
        }

        let mut reached = vec![false; self.inputs.len()];
        let mut frontier = vec![0];
        reached[0] = true;

        while let Some(term) = frontier.pop() {
            for (other, seen) in reached.iter_mut().enumerate() {
                if !*seen && shares_variable(&self.inputs[term], &self.inputs[other]) {
                    *seen = true;
                    frontier.push(other);
                }
            }
        }

        reached.into_iter().all(|r| r)
    }
}

fn shares_variable(a: &[Atom], b: &[Atom]) -> bool {
    a.iter().any(|x| x.is_variable() && b.contains(x))
}

// =============================================================================
// Join Plans
// =============================================================================

/// One step of a join plan: bind `term` using candidates found through one
/// of its probe positions.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct JoinStep {
    /// Input term index.
    pub term: usize,
    /// Positions in the term whose atom is known when the step runs: literal
    /// atoms and variables bound by earlier steps. Never empty.
    pub probes: Vec<usize>,
}

/// How to complete a match after the anchor term is bound.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct JoinPlan {
    /// The input term bound to the seed expression.
    pub anchor: usize,
    /// Remaining terms in join order.
    pub steps: Vec<JoinStep>,
}

/// A rule validated for connectivity, with one join plan per input term.
#[derive(Clone, Debug)]
pub struct CompiledRule {
    /// Identifier of the rule.
    pub id: RuleId,
    /// The source rule.
    pub rule: Rule,
    /// Join plans indexed by anchor term.
    pub plans: Vec<JoinPlan>,
}

impl CompiledRule {
    /// Validates and compiles a rule.
    ///
    /// # Errors
    /// Returns `DisconnectedInputs` if the input terms are not connected.
    pub fn compile(id: RuleId, rule: Rule) -> Result<Self> {
        if !rule.is_connected() {
            return Err(Error::disconnected_inputs(id));
        }

        let plans = (0..rule.inputs.len())
            .map(|anchor| plan_from_anchor(&rule.inputs, anchor))
            .collect::<Option<Vec<_>>>()
            .ok_or_else(|| Error::disconnected_inputs(id))?;

        Ok(Self { id, rule, plans })
    }

    /// Returns the input terms.
    #[must_use]
    pub fn inputs(&self) -> &[AtomsVector] {
        &self.rule.inputs
    }
}

/// Orders the non-anchor terms so each one has a known atom when reached.
///
/// Greedy: at every step take the term with the most known positions,
/// lowest index first on ties.
fn plan_from_anchor(inputs: &[AtomsVector], anchor: usize) -> Option<JoinPlan> {
    let mut bound: HashSet<Atom> = inputs[anchor]
        .iter()
        .copied()
        .filter(|a| a.is_variable())
        .collect();
    let mut remaining: Vec<usize> = (0..inputs.len()).filter(|&t| t != anchor).collect();
    let mut steps = Vec::with_capacity(remaining.len());

    while !remaining.is_empty() {
        let (slot, probes) = remaining
            .iter()
            .enumerate()
            .filter(|&(_, &term)| {
                inputs[term]
                    .iter()
                    .any(|a| a.is_variable() && bound.contains(a))
            })
            .map(|(slot, &term)| (slot, known_positions(&inputs[term], &bound)))
            .max_by(|(sa, pa), (sb, pb)| pa.len().cmp(&pb.len()).then(sb.cmp(sa)))?;

        let term = remaining.remove(slot);
        bound.extend(inputs[term].iter().copied().filter(|a| a.is_variable()));
        steps.push(JoinStep { term, probes });
    }

    Some(JoinPlan { anchor, steps })
}

fn known_positions(term: &[Atom], bound: &HashSet<Atom>) -> Vec<usize> {
    term.iter()
        .enumerate()
        .filter(|(_, a)| a.is_concrete() || bound.contains(*a))
        .map(|(i, _)| i)
        .collect()
}

// =============================================================================
// Tests
// =============================================================================
