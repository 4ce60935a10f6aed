//! # Adapters Layer
//!
//! `IndexSource` implementations.

pub mod index_source;

pub use index_source::{FixedIndexSource, SeededIndexSource};
