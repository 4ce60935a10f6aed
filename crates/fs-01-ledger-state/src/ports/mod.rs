//! # Ports Layer
//!
//! The store is a driven port: engines depend on the trait, adapters
//! provide storage.

pub mod outbound;

pub use outbound::LedgerStore;
