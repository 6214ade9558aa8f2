//! Core types, errors, and capability traits for hypermatch.
//!
//! This crate provides:
//! - [`Atom`] - Concrete vertices and pattern variables
//! - [`ExpressionId`] and [`RuleId`] - Ordered identifiers
//! - [`Error`] - Rich error types with context
//! - [`AtomsIndex`] and [`ExpressionStore`] - The lookups the matcher consumes

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod atom;
pub mod capability;
pub mod error;
pub mod ids;

pub use atom::{Atom, AtomsVector};
pub use capability::{AtomsIndex, ExpressionStore};
pub use error::{Error, ErrorContext, ErrorKind, Result};
pub use ids::{ExpressionId, RuleId};
