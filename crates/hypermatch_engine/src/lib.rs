//! Incremental rule matching, match ordering, and substitution for hypermatch.
//!
//! This crate provides:
//! - [`Rule`] and [`CompiledRule`] - Rewriting rules and their join plans
//! - [`Binding`] - Consistent variable bindings with backtracking
//! - [`MatchSearch`] - Seeded, index-driven match discovery
//! - [`MatchSet`] - Held matches in order, indexed by expression
//! - [`OrderingEngine`] - The total order over matches
//! - [`Matcher`] - The operations a host drives evolution with

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod binding;
pub mod config;
pub mod match_set;
pub mod matcher;
pub mod ordering;
pub mod rule;
pub mod search;
pub mod substitution;

pub use binding::Binding;
pub use config::MatcherConfig;
pub use match_set::{Match, MatchPtr, MatchSet};
pub use matcher::Matcher;
pub use ordering::{OrderingDirection, OrderingEngine, OrderingFunction, OrderingSpec, SortKey};
pub use rule::{CompiledRule, JoinPlan, JoinStep, Rule};
pub use search::{AbortGuard, MatchSearch};
pub use substitution::{instantiate_outputs, substitute_missing_atoms_if_possible};
