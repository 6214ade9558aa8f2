//! Discovered matches and the live set holding them.
//!
//! The set keeps three views over the same matches: an ordered queue keyed
//! by [`SortKey`], a key lookup per match, and an index from each expression
//! to the matches using it. All three are persistent maps, so cloning a set
//! shares structure with the original.

use std::sync::Arc;

use hypermatch_foundation::{ExpressionId, RuleId};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::ordering::{OrderingEngine, SortKey};

// =============================================================================
// Match
// =============================================================================

/// A discovered binding of one rule's inputs to concrete expressions.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Match {
    rule: RuleId,
    input_expressions: Vec<ExpressionId>,
}

/// Shared, immutable handle to a match.
pub type MatchPtr = Arc<Match>;

impl Match {
    /// Creates a match. `input_expressions[i]` is bound to input term `i`.
    #[must_use]
    pub fn new(rule: RuleId, input_expressions: Vec<ExpressionId>) -> Self {
        Self {
            rule,
            input_expressions,
        }
    }

    /// Returns the rule this match belongs to.
    #[must_use]
    pub fn rule(&self) -> RuleId {
        self.rule
    }

    /// Returns the matched expressions, in input term order.
    #[must_use]
    pub fn input_expressions(&self) -> &[ExpressionId] {
        &self.input_expressions
    }

    /// Returns true if `expression` is one of the matched expressions.
    #[must_use]
    pub fn involves(&self, expression: ExpressionId) -> bool {
        self.input_expressions.contains(&expression)
    }
}

// =============================================================================
// Match Set
// =============================================================================

/// All matches discovered and not yet removed, in the ordering engine's order.
#[derive(Clone, Debug)]
pub struct MatchSet {
    ordering: Arc<OrderingEngine>,
    queue: im::OrdSet<SortKey>,
    keys: im::HashMap<MatchPtr, SortKey>,
    by_expression: im::HashMap<ExpressionId, im::HashSet<MatchPtr>>,
}

impl MatchSet {
    /// Creates an empty set ordered by `ordering`.
    #[must_use]
    pub fn new(ordering: OrderingEngine) -> Self {
        Self {
            ordering: Arc::new(ordering),
            queue: im::OrdSet::new(),
            keys: im::HashMap::new(),
            by_expression: im::HashMap::new(),
        }
    }

    /// Returns the ordering engine.
    #[must_use]
    pub fn ordering(&self) -> &OrderingEngine {
        &self.ordering
    }

    /// Inserts a match. Returns false if an equal match is already held.
    pub fn insert(&mut self, matched: MatchPtr) -> bool {
        if self.keys.contains_key(&matched) {
            return false;
        }

        let key = self.ordering.sort_key(&matched);
        self.queue.insert(key.clone());
        self.keys.insert(MatchPtr::clone(&matched), key);

        for &expression in matched.input_expressions() {
            if let Some(set) = self.by_expression.get_mut(&expression) {
                set.insert(MatchPtr::clone(&matched));
            } else {
                self.by_expression
                    .insert(expression, im::HashSet::unit(MatchPtr::clone(&matched)));
            }
        }
        true
    }

    /// Inserts every match, returning how many were new.
    pub fn extend<I>(&mut self, matches: I) -> usize
    where
        I: IntoIterator<Item = MatchPtr>,
    {
        matches.into_iter().filter(|m| self.insert(Arc::clone(m))).count()
    }

    /// Removes every match that uses any of `expressions`.
    ///
    /// Returns the number of matches removed. Unknown expressions are ignored.
    pub fn remove_involving(&mut self, expressions: &[ExpressionId]) -> usize {
        let mut removed = 0;
        for expression in expressions {
            let Some(matches) = self.by_expression.remove(expression) else {
                continue;
            };
            for matched in matches.iter() {
                if self.remove(matched) {
                    removed += 1;
                }
            }
        }
        removed
    }

    /// Removes one match from all three views.
    fn remove(&mut self, matched: &MatchPtr) -> bool {
        let Some(key) = self.keys.remove(matched) else {
            return false;
        };
        self.queue.remove(&key);

        for expression in matched.input_expressions() {
            let now_empty = match self.by_expression.get_mut(expression) {
                Some(set) => {
                    set.remove(matched);
                    set.is_empty()
                }
                None => false,
            };
            if now_empty {
                self.by_expression.remove(expression);
            }
        }
        true
    }

    /// Returns the first match in order, if any.
    #[must_use]
    pub fn first(&self) -> Option<&MatchPtr> {
        self.queue.get_min().map(SortKey::matched)
    }

    /// Returns true if an equal match is held.
    #[must_use]
    pub fn contains(&self, matched: &Match) -> bool {
        self.keys.contains_key(matched)
    }

    /// Returns the matches using `expression`.
    #[must_use]
    pub fn involving(&self, expression: ExpressionId) -> Vec<MatchPtr> {
        self.by_expression
            .get(&expression)
            .map(|set| set.iter().cloned().collect())
            .unwrap_or_default()
    }

    /// Iterates held matches in order.
    pub fn iter(&self) -> impl Iterator<Item = &MatchPtr> {
        self.queue.iter().map(SortKey::matched)
    }

    /// Returns the number of held matches.
    #[must_use]
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    /// Returns true if no matches are held.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}

// =============================================================================
// Tests
// =============================================================================
