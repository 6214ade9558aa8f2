//! Hypermatch - Incremental pattern matcher for hypergraph rewriting
//!
//! This crate re-exports all layers of the hypermatch system for convenient access.
//! For detailed documentation, see the individual layer crates.
//!
//! # Architecture
//!
//! ```text
//! Layer 2: hypermatch_engine     - Rules, match search, ordering, substitution
//! Layer 1: hypermatch_storage    - Reference expression store and atoms index
//! Layer 0: hypermatch_foundation - Core types (Atom, ExpressionId, Error)
//! ```

pub use hypermatch_engine as engine;
pub use hypermatch_foundation as foundation;
pub use hypermatch_storage as storage;
