//! Error types for hypermatch.
//!
//! Uses `thiserror` for ergonomic error definition with rich context.

use std::fmt;

use thiserror::Error;

use crate::ids::{ExpressionId, RuleId};

/// Result alias used throughout hypermatch.
pub type Result<T> = std::result::Result<T, Error>;

/// The main error type for hypermatch operations.
#[derive(Debug, Error)]
#[error("{kind}")]
pub struct Error {
    /// The kind of error that occurred.
    pub kind: ErrorKind,
    /// Optional context about where the error occurred.
    pub context: Option<ErrorContext>,
}

impl Error {
    /// Creates a new error with the given kind.
    #[must_use]
    pub fn new(kind: ErrorKind) -> Self {
        Self {
            kind,
            context: None,
        }
    }

    /// Adds context to this error.
    #[must_use]
    pub fn with_context(mut self, context: ErrorContext) -> Self {
        self.context = Some(context);
        self
    }

    /// Creates an aborted-search error.
    #[must_use]
    pub fn aborted() -> Self {
        Self::new(ErrorKind::Aborted)
    }

    /// Creates a disconnected-inputs error for the given rule.
    #[must_use]
    pub fn disconnected_inputs(rule: RuleId) -> Self {
        Self::new(ErrorKind::DisconnectedInputs { rule })
    }

    /// Creates a no-matches error.
    #[must_use]
    pub fn no_matches() -> Self {
        Self::new(ErrorKind::NoMatches)
    }

    /// Creates an invalid ordering function error.
    #[must_use]
    pub fn invalid_ordering_function(code: i64) -> Self {
        Self::new(ErrorKind::InvalidOrderingFunction(code))
    }

    /// Creates an invalid ordering direction error.
    #[must_use]
    pub fn invalid_ordering_direction(code: i64) -> Self {
        Self::new(ErrorKind::InvalidOrderingDirection(code))
    }

    /// Creates an expression not found error.
    #[must_use]
    pub fn expression_not_found(id: ExpressionId) -> Self {
        Self::new(ErrorKind::ExpressionNotFound(id))
    }

    /// Creates a rule not found error.
    #[must_use]
    pub fn rule_not_found(id: RuleId) -> Self {
        Self::new(ErrorKind::RuleNotFound(id))
    }

    /// Creates an error for a match whose expressions no longer fit its rule.
    #[must_use]
    pub fn match_inconsistent(rule: RuleId) -> Self {
        Self::new(ErrorKind::MatchInconsistent { rule })
    }

    /// Creates an atoms-exhausted error.
    #[must_use]
    pub fn atoms_exhausted() -> Self {
        Self::new(ErrorKind::AtomsExhausted)
    }

    /// Returns true if this error is an aborted search.
    #[must_use]
    pub fn is_aborted(&self) -> bool {
        matches!(self.kind, ErrorKind::Aborted)
    }
}

/// Categorized error kinds.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ErrorKind {
    /// The caller's abort predicate fired during a search.
    #[error("search aborted")]
    Aborted,

    /// A rule's input terms do not form a single connected component.
    #[error("input pattern of rule {rule} is not connected")]
    DisconnectedInputs {
        /// The offending rule.
        rule: RuleId,
    },

    /// `next_match` was called with no matches held.
    #[error("no matches")]
    NoMatches,

    /// An ordering spec named an unknown ordering function.
    #[error("invalid ordering function: {0}")]
    InvalidOrderingFunction(i64),

    /// An ordering spec named an unknown ordering direction.
    #[error("invalid ordering direction: {0}")]
    InvalidOrderingDirection(i64),

    /// The expression store has no atoms for an expression.
    #[error("expression not found: {0}")]
    ExpressionNotFound(ExpressionId),

    /// A match named a rule the matcher does not hold.
    #[error("rule not found: {0}")]
    RuleNotFound(RuleId),

    /// A match's expressions do not unify with its rule's input terms.
    #[error("match of rule {rule} does not fit its expressions")]
    MatchInconsistent {
        /// The rule named by the match.
        rule: RuleId,
    },

    /// No concrete atom is left to allocate.
    #[error("atoms exhausted")]
    AtomsExhausted,
}

/// Context about where an error occurred.
#[derive(Debug, Clone, Default)]
pub struct ErrorContext {
    /// Component or operation that raised the error.
    pub source: Option<String>,
    /// Stack of operations leading to the error.
    pub stack: Vec<String>,
}

impl ErrorContext {
    /// Creates a new empty context.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the source.
    #[must_use]
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    /// Adds a stack frame.
    #[must_use]
    pub fn with_frame(mut self, frame: impl Into<String>) -> Self {
        self.stack.push(frame.into());
        self
    }
}

impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(source) = &self.source {
            write!(f, "at {source}")?;
        }
        if !self.stack.is_empty() {
            writeln!(f)?;
            for frame in &self.stack {
                writeln!(f, "  in {frame}")?;
            }
        }
        Ok(())
    }
}
