//! # FS-01 Ledger State - Serialized Ledger Store
//!
//! **Subsystem ID:** 1
//!
//! ## Purpose
//!
//! Holds every piece of ledger state (airlines, flights, policies, oracles,
//! oracle requests, balances) behind the mapping-based `LedgerStore` port,
//! and provides the two cross-cutting utilities every engine depends on:
//! deterministic flight keys and the access/operational gate.
//!
//! ## Domain Invariants
//!
//! | ID | Invariant | Enforcement Location |
//! |----|-----------|---------------------|
//! | INVARIANT-1 | Flight key is a pure function of (airline, nonce) | `domain/keys.rs` - `flight_key()` |
//! | INVARIANT-2 | Mutations only while operational | `gate.rs` - `AccessGate::ensure_operational()` |
//! | INVARIANT-3 | Only the owner toggles the flag | `gate.rs` - `AccessGate::set_operating_status()` |
//! | INVARIANT-4 | No partial writes | store writes are infallible; engines validate first |
//! | INVARIANT-5 | Insured passengers keep purchase order | `adapters/memory.rs` - `put_policy()` |
//!
//! ## Concurrency
//!
//! The store assumes a single writer at a time. The runtime serializes every
//! mutating entry point behind one execution lock, so the adapters only need
//! interior mutability for `&self` access, not transactional isolation.

// Crate-level lints
#![warn(missing_docs)]
#![cfg_attr(test, allow(clippy::unwrap_used))]

pub mod adapters;
pub mod domain;
pub mod gate;
pub mod ports;

pub use adapters::InMemoryLedgerStore;
pub use domain::keys::{flight_key, keccak256};
pub use domain::records::{
    AirlineRecord, FlightDetails, FlightRecord, InsurancePolicy, OracleRecord,
    OracleRequestRecord, RequestKey, RequestState,
};
pub use gate::AccessGate;
pub use ports::LedgerStore;

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::adapters::InMemoryLedgerStore;
    pub use crate::domain::keys::flight_key;
    pub use crate::domain::records::*;
    pub use crate::gate::AccessGate;
    pub use crate::ports::LedgerStore;
}
