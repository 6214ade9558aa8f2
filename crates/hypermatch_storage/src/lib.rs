//! Expression storage and atom indexing for hypermatch.
//!
//! This crate provides:
//! - [`InvertedIndex`] - Atom to containing-expressions index
//! - [`Hypergraph`] - Expression store with identifier and atom allocation
//! - [`AtomAllocator`] - Fresh atom cursor a host can hold apart from the graph
//!
//! Both implement the capability traits from `hypermatch_foundation`, so a
//! host can drive a matcher without writing its own store.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod allocator;
pub mod hypergraph;
pub mod index;

pub use allocator::AtomAllocator;
pub use hypergraph::Hypergraph;
pub use index::InvertedIndex;
