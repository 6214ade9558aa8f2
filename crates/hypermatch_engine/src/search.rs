//! Index-driven match search.
//!
//! A search is seeded by a set of expressions and finds every match that
//! uses at least one of them. For each seed and each input term the seed
//! unifies with, the rule's join plan for that anchor term is walked with
//! backtracking: each step draws candidates from the atoms index through the
//! most selective known atom of its term.

use std::collections::BTreeSet;

use hypermatch_foundation::{Atom, AtomsIndex, Error, ExpressionId, ExpressionStore, Result};

use crate::binding::Binding;
use crate::match_set::Match;
use crate::rule::{CompiledRule, JoinPlan};

// =============================================================================
// Abort Polling
// =============================================================================

/// Polls a caller-supplied abort predicate at a fixed candidate interval.
pub struct AbortGuard<F> {
    should_abort: F,
    interval: u32,
    countdown: u32,
    polls: u64,
}

impl<F: FnMut() -> bool> AbortGuard<F> {
    /// Creates a guard polling every `interval` ticks (`0` means every tick).
    pub fn new(should_abort: F, interval: u32) -> Self {
        let interval = interval.max(1);
        Self {
            should_abort,
            interval,
            countdown: interval,
            polls: 0,
        }
    }

    /// Polls the predicate immediately.
    ///
    /// # Errors
    /// Returns `Aborted` if the predicate returns true.
    pub fn poll(&mut self) -> Result<()> {
        self.polls += 1;
        self.countdown = self.interval;
        if (self.should_abort)() {
            return Err(Error::aborted());
        }
        Ok(())
    }

    /// Counts one unit of work, polling when the interval elapses.
    ///
    /// # Errors
    /// Returns `Aborted` if the predicate is polled and returns true.
    pub fn tick(&mut self) -> Result<()> {
        self.countdown -= 1;
        if self.countdown == 0 {
            return self.poll();
        }
        Ok(())
    }

    /// Returns how many times the predicate has been called.
    #[must_use]
    pub fn polls(&self) -> u64 {
        self.polls
    }
}

// =============================================================================
// Match Search
// =============================================================================

/// One seeded search over the host's expressions.
pub struct MatchSearch<'a, I: ?Sized, S: ?Sized, F> {
    index: &'a I,
    store: &'a S,
    guard: AbortGuard<F>,
    found: BTreeSet<Match>,
}

impl<'a, I, S, F> MatchSearch<'a, I, S, F>
where
    I: AtomsIndex + ?Sized,
    S: ExpressionStore + ?Sized,
    F: FnMut() -> bool,
{
    /// Creates a search over `index` and `store`.
    pub fn new(index: &'a I, store: &'a S, guard: AbortGuard<F>) -> Self {
        Self {
            index,
            store,
            guard,
            found: BTreeSet::new(),
        }
    }

    /// Finds every match of every rule that uses at least one seed.
    ///
    /// Seeds the index does not report are skipped. Matches found through
    /// several seeds are returned once.
    ///
    /// # Errors
    /// Returns `Aborted` if the guard fires, or `ExpressionNotFound` if the
    /// store cannot resolve a seed or a candidate. No partial result is
    /// returned in either case.
    pub fn run(mut self, rules: &[CompiledRule], seeds: &[ExpressionId]) -> Result<BTreeSet<Match>> {
        let mut seeds = seeds.to_vec();
        seeds.sort_unstable();
        seeds.dedup();

        for seed in seeds {
            let atoms = self.atoms_of(seed)?;
            match atoms.first() {
                Some(&first) if self.index.contains(first, seed) => {}
                _ => {
                    tracing::trace!(expression = %seed, "seed not indexed, skipped");
                    continue;
                }
            }

            for rule in rules {
                let before = self.found.len();
                for plan in &rule.plans {
                    self.search_anchor(rule, plan, seed, &atoms)?;
                }
                tracing::trace!(
                    rule = %rule.id,
                    expression = %seed,
                    found = self.found.len() - before,
                    "rule searched"
                );
            }
        }

        Ok(self.found)
    }

    fn search_anchor(
        &mut self,
        rule: &CompiledRule,
        plan: &JoinPlan,
        seed: ExpressionId,
        atoms: &[Atom],
    ) -> Result<()> {
        self.guard.tick()?;

        let mut binding = Binding::new();
        if !binding.try_extend(&rule.inputs()[plan.anchor], atoms) {
            return Ok(());
        }

        let mut chosen = vec![None; rule.inputs().len()];
        chosen[plan.anchor] = Some(seed);
        self.extend(rule, plan, 0, &mut binding, &mut chosen)
    }

    fn extend(
        &mut self,
        rule: &CompiledRule,
        plan: &JoinPlan,
        step_idx: usize,
        binding: &mut Binding,
        chosen: &mut [Option<ExpressionId>],
    ) -> Result<()> {
        let Some(step) = plan.steps.get(step_idx) else {
            if let Some(expressions) = chosen.iter().copied().collect::<Option<Vec<_>>>() {
                self.found.insert(Match::new(rule.id, expressions));
            }
            return Ok(());
        };

        let term = &rule.inputs()[step.term];
        for candidate in self.candidates(term, &step.probes, binding) {
            self.guard.tick()?;

            // An expression fills at most one input term
            if chosen.contains(&Some(candidate)) {
                continue;
            }

            let atoms = self.atoms_of(candidate)?;
            let mark = binding.mark();
            if binding.try_extend(term, &atoms) {
                chosen[step.term] = Some(candidate);
                self.extend(rule, plan, step_idx + 1, binding, chosen)?;
                chosen[step.term] = None;
                binding.unwind(mark);
            }
        }
        Ok(())
    }

    /// Expressions containing the most selective known atom of `term`.
    fn candidates(&self, term: &[Atom], probes: &[usize], binding: &Binding) -> Vec<ExpressionId> {
        let mut best: Option<Vec<ExpressionId>> = None;
        for &position in probes {
            let Some(atom) = binding.resolve(term[position]) else {
                continue;
            };
            let candidates = self.index.expressions_containing(atom);
            if candidates.is_empty() {
                return candidates;
            }
            if best.as_ref().is_none_or(|b| candidates.len() < b.len()) {
                best = Some(candidates);
            }
        }
        best.unwrap_or_default()
    }

    fn atoms_of(&self, expression: ExpressionId) -> Result<Vec<Atom>> {
        self.store
            .atoms_vector(expression)
            .ok_or_else(|| Error::expression_not_found(expression))
    }
}

// =============================================================================
// Tests
// =============================================================================
