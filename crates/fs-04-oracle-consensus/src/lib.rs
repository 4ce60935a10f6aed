//! # FS-04 Oracle Consensus - Quorum-Checked Flight Status
//!
//! **Subsystem ID:** 4
//!
//! ## Purpose
//!
//! On-ledger half of the oracle protocol. Oracles register for a fee and get
//! three immutable indexes. A status request is opened with its own three
//! indexes; only oracles sharing one of them may answer, once each. When a
//! single status gathers `min_responses` distinct answers the request is
//! resolved and the status is handed to the Insurance Engine.
//!
//! ## Request State Machine
//!
//! ```text
//! fetch_flight_status ──→ Open ──submit×N──→ Open (collecting)
//!                                   │
//!                     quorum on one status
//!                                   ▼
//!                         Resolved(status) ──submit──→ Inert
//! ```
//!
//! ## Domain Invariants
//!
//! | ID | Invariant | Enforcement Location |
//! |----|-----------|---------------------|
//! | INVARIANT-1 | Registration needs the fee | `service.rs` - `register_oracle()` |
//! | INVARIANT-2 | Indexes distinct, in range, immutable | `adapters/index_source.rs` |
//! | INVARIANT-3 | Only index-matched oracles answer | `domain/tally.rs` - `record_response()` |
//! | INVARIANT-4 | One answer per oracle per request | `domain/tally.rs` - `record_response()` |
//! | INVARIANT-5 | Quorum of distinct oracles on one status | `domain/tally.rs` |
//! | INVARIANT-6 | Late answers are accepted and inert | `service.rs` - `submit_oracle_response()` |
//!
//! ## Outbound Dependencies
//!
//! | Dependency | Trait | Purpose |
//! |------------|-------|---------|
//! | Ledger State (1) | `LedgerStore` | Oracles, requests, pool |
//! | Randomness | `IndexSource` | Seeded index assignment |
//! | Insurance (3) | `FlightStatusResolver` | Apply the consensus status |
//! | Shared Bus | `EventPublisher` | `OracleRegistered`, `OracleRequest`, `FlightStatusInfo` |

#![cfg_attr(test, allow(clippy::unwrap_used))]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod service;

pub use adapters::{FixedIndexSource, SeededIndexSource};
pub use domain::tally::{record_response, TallyOutcome};
pub use ports::inbound::{OracleApi, ResponseOutcome};
pub use ports::outbound::{FlightStatusResolver, IndexSource};
pub use service::{OracleConfig, OracleConfigError, OracleService};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::adapters::{FixedIndexSource, SeededIndexSource};
    pub use crate::ports::inbound::{OracleApi, ResponseOutcome};
    pub use crate::ports::outbound::{FlightStatusResolver, IndexSource};
    pub use crate::service::{OracleConfig, OracleService};
}
