//! The matcher: rules, the live match set, and the operations over them.
//!
//! A [`Matcher`] is driven by one host at a time. The host adds expressions
//! to its own store and index, tells the matcher which expressions are new,
//! picks the next match to apply, and then reports which expressions the
//! rewrite consumed:
//!
//! ```text
//! add_matches_involving_expressions(new)
//!     -> next_match()
//!     -> instantiate_outputs(match)   (host creates the outputs)
//!     -> remove_matches_involving_expressions(consumed)
//! ```

use std::sync::Arc;

use tracing::debug;

use hypermatch_foundation::{
    Atom, AtomsIndex, AtomsVector, Error, ErrorContext, ExpressionId, ExpressionStore, Result,
    RuleId,
};

use crate::config::MatcherConfig;
use crate::match_set::{Match, MatchPtr, MatchSet};
use crate::ordering::{OrderingEngine, OrderingSpec};
use crate::rule::{CompiledRule, Rule};
use crate::search::{AbortGuard, MatchSearch};
use crate::substitution;

/// Incremental matcher over a fixed set of rules.
///
/// Cloning is cheap: the match set is persistent and clones share
/// structure until one of them is modified.
#[derive(Clone, Debug)]
pub struct Matcher {
    rules: Vec<CompiledRule>,
    matches: MatchSet,
    config: MatcherConfig,
}

impl Matcher {
    /// Creates a matcher. Rule `i` gets `RuleId(i)`.
    ///
    /// Performs no search.
    ///
    /// # Errors
    /// Returns `DisconnectedInputs` for the first rule whose input terms are
    /// not connected.
    pub fn new(rules: Vec<Rule>, ordering: OrderingSpec, config: MatcherConfig) -> Result<Self> {
        let rules = rules
            .into_iter()
            .enumerate()
            .map(|(index, rule)| CompiledRule::compile(rule_id(index), rule))
            .collect::<Result<Vec<_>>>()?;

        let engine = OrderingEngine::new(ordering, config.random_seed);
        debug!(
            rules = rules.len(),
            ordering = engine.spec().len(),
            seed = config.random_seed,
            "matcher created"
        );

        Ok(Self {
            rules,
            matches: MatchSet::new(engine),
            config,
        })
    }

    /// Creates a matcher from raw `(function, direction)` ordering codes.
    ///
    /// # Errors
    /// Returns `InvalidOrderingFunction` or `InvalidOrderingDirection` for an
    /// unknown code, or `DisconnectedInputs` as [`Matcher::new`] does.
    pub fn with_ordering_codes(
        rules: Vec<Rule>,
        ordering: &[(i64, i64)],
        config: MatcherConfig,
    ) -> Result<Self> {
        Self::new(rules, OrderingSpec::from_codes(ordering)?, config)
    }

    // =========================================================================
    // Mutation
    // =========================================================================

    /// Finds every match that uses at least one of `expressions` and adds it.
    ///
    /// `should_abort` is polled before the search starts and then once every
    /// [`MatcherConfig::abort_check_interval`] candidate evaluations. Returns
    /// the number of matches that were not already held.
    ///
    /// # Errors
    /// Returns `Aborted` if `should_abort` fires, or `ExpressionNotFound` if
    /// `store` cannot resolve an expression. In both cases the match set is
    /// left exactly as it was.
    pub fn add_matches_involving_expressions<I, S, F>(
        &mut self,
        index: &I,
        store: &S,
        expressions: &[ExpressionId],
        should_abort: F,
    ) -> Result<usize>
    where
        I: AtomsIndex + ?Sized,
        S: ExpressionStore + ?Sized,
        F: FnMut() -> bool,
    {
        let mut guard = AbortGuard::new(should_abort, self.config.abort_check_interval);
        let found = guard
            .poll()
            .and_then(|()| MatchSearch::new(index, store, guard).run(&self.rules, expressions))
            .map_err(|err| {
                debug!(error = %err, seeds = expressions.len(), "search failed, nothing committed");
                err.with_context(
                    ErrorContext::new()
                        .with_source("matcher")
                        .with_frame("add_matches_involving_expressions"),
                )
            })?;

        let discovered = found.len();
        let added = self.matches.extend(found.into_iter().map(Arc::new));
        debug!(
            rules = self.rules.len(),
            seeds = expressions.len(),
            discovered,
            added,
            total = self.matches.len(),
            "matches added"
        );
        Ok(added)
    }

    /// Removes every match that uses any of `expressions`, for any rule.
    ///
    /// Returns the number of matches removed. Never fails.
    pub fn remove_matches_involving_expressions(&mut self, expressions: &[ExpressionId]) -> usize {
        let removed = self.matches.remove_involving(expressions);
        debug!(
            expressions = expressions.len(),
            removed,
            total = self.matches.len(),
            "matches removed"
        );
        removed
    }

    // =========================================================================
    // Queries
    // =========================================================================

    /// Returns true if no matches are held.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.matches.is_empty()
    }

    /// Returns the number of held matches.
    #[must_use]
    pub fn len(&self) -> usize {
        self.matches.len()
    }

    /// Returns the first match in order without removing it.
    ///
    /// # Errors
    /// Returns `NoMatches` if no matches are held.
    pub fn next_match(&self) -> Result<MatchPtr> {
        self.matches.first().cloned().ok_or_else(Error::no_matches)
    }

    /// Returns every held match, first match first.
    #[must_use]
    pub fn all_matches(&self) -> Vec<MatchPtr> {
        self.matches.iter().cloned().collect()
    }

    /// Returns the held matches that use `expression`.
    #[must_use]
    pub fn matches_involving(&self, expression: ExpressionId) -> Vec<MatchPtr> {
        self.matches.involving(expression)
    }

    /// Returns true if an equal match is held.
    #[must_use]
    pub fn contains(&self, matched: &Match) -> bool {
        self.matches.contains(matched)
    }

    /// Returns the live match set.
    #[must_use]
    pub fn matches(&self) -> &MatchSet {
        &self.matches
    }

    /// Returns the compiled rules, indexed by rule ID.
    #[must_use]
    pub fn rules(&self) -> &[CompiledRule] {
        &self.rules
    }

    /// Returns a rule by ID.
    #[must_use]
    pub fn rule(&self, id: RuleId) -> Option<&Rule> {
        self.rules.get(id.index()).map(|compiled| &compiled.rule)
    }

    /// Returns the ordering engine.
    #[must_use]
    pub fn ordering(&self) -> &OrderingEngine {
        self.matches.ordering()
    }

    /// Returns the configuration.
    #[must_use]
    pub fn config(&self) -> &MatcherConfig {
        &self.config
    }

    // =========================================================================
    // Substitution
    // =========================================================================

    /// See [`substitution::substitute_missing_atoms_if_possible`].
    pub fn substitute_missing_atoms_if_possible(
        input_patterns: &[AtomsVector],
        pattern_matches: &[AtomsVector],
        atoms_to_replace: &mut [AtomsVector],
    ) -> bool {
        substitution::substitute_missing_atoms_if_possible(
            input_patterns,
            pattern_matches,
            atoms_to_replace,
        )
    }

    /// Builds the concrete output terms of `matched`'s rule.
    ///
    /// # Errors
    /// Returns `RuleNotFound` if the match names a rule this matcher does
    /// not hold, `ExpressionNotFound` if `store` cannot resolve one of the
    /// matched expressions, `MatchInconsistent` if the resolved expressions
    /// no longer fit the rule, and any error `fresh_atom` returns.
    pub fn instantiate_outputs<S, F>(
        &self,
        matched: &Match,
        store: &S,
        fresh_atom: F,
    ) -> Result<Vec<AtomsVector>>
    where
        S: ExpressionStore + ?Sized,
        F: FnMut() -> Result<Atom>,
    {
        let rule = self
            .rule(matched.rule())
            .ok_or_else(|| Error::rule_not_found(matched.rule()))?;
        substitution::instantiate_outputs(rule, matched, store, fresh_atom)
    }
}

#[allow(clippy::cast_possible_truncation)]
fn rule_id(index: usize) -> RuleId {
    RuleId::new(index as u32)
}

// =============================================================================
// Tests
// =============================================================================
