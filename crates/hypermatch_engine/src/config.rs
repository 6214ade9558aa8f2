//! Matcher configuration.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Configuration for a [`crate::Matcher`].
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct MatcherConfig {
    /// Seed of the random tiebreak between otherwise equal matches.
    pub random_seed: u64,

    /// Candidate evaluations between two polls of the abort predicate.
    ///
    /// `0` is treated as `1`. The predicate is also polled once before any
    /// work starts.
    pub abort_check_interval: u32,
}

impl Default for MatcherConfig {
    fn default() -> Self {
        Self {
            random_seed: 0,
            abort_check_interval: 64,
        }
    }
}

impl MatcherConfig {
    /// Creates a configuration that polls the abort predicate on every
    /// candidate.
    #[must_use]
    pub fn responsive() -> Self {
        Self {
            abort_check_interval: 1,
            ..Self::default()
        }
    }

    /// Builder method to set the random seed.
    #[must_use]
    pub fn with_random_seed(mut self, seed: u64) -> Self {
        self.random_seed = seed;
        self
    }

    /// Builder method to set the abort check interval.
    #[must_use]
    pub fn with_abort_check_interval(mut self, interval: u32) -> Self {
        self.abort_check_interval = interval;
        self
    }
}
