//! # Adapters Layer
//!
//! Concrete `LedgerStore` implementations.

pub mod memory;

pub use memory::InMemoryLedgerStore;
