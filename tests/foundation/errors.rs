//! Integration tests for Error types
//!
//! Tests error construction, display, context, and error kinds.

use hypermatch_foundation::{Error, ErrorContext, ErrorKind, ExpressionId, RuleId};

// =============================================================================
// Error Construction
// =============================================================================

#[test]
fn error_aborted() {
    let err = Error::aborted();
    assert!(err.is_aborted());
    assert_eq!(err.kind, ErrorKind::Aborted);
}

#[test]
fn error_disconnected_inputs() {
    let err = Error::disconnected_inputs(RuleId::new(2));
    assert!(matches!(err.kind, ErrorKind::DisconnectedInputs { .. }));
    assert!(!err.is_aborted());
    let msg = format!("{err}");
    assert!(msg.contains('2'));
}

#[test]
fn error_no_matches() {
    let err = Error::no_matches();
    assert_eq!(err.kind, ErrorKind::NoMatches);
    assert_eq!(format!("{err}"), "no matches");
}

#[test]
fn error_invalid_ordering() {
    let err = Error::invalid_ordering_function(11);
    assert_eq!(err.kind, ErrorKind::InvalidOrderingFunction(11));
    assert!(format!("{err}").contains("11"));

    let err = Error::invalid_ordering_direction(5);
    assert_eq!(err.kind, ErrorKind::InvalidOrderingDirection(5));
    assert!(format!("{err}").contains('5'));
}

#[test]
fn error_lookup_failures() {
    let err = Error::expression_not_found(ExpressionId::new(77));
    assert!(format!("{err}").contains("77"));

    let err = Error::rule_not_found(RuleId::new(8));
    assert_eq!(err.kind, ErrorKind::RuleNotFound(RuleId::new(8)));
}

// =============================================================================
// Error Context
// =============================================================================

#[test]
fn error_context_is_optional() {
    assert!(Error::no_matches().context.is_none());
}

#[test]
fn error_context_attaches() {
    let err = Error::aborted().with_context(
        ErrorContext::new()
            .with_source("matcher")
            .with_frame("search"),
    );
    let ctx = err.context.as_ref().unwrap();
    assert_eq!(ctx.source.as_deref(), Some("matcher"));
    assert_eq!(ctx.stack, vec!["search".to_string()]);
    // Display stays the kind
    assert_eq!(format!("{err}"), "search aborted");
}
