//! # FS-02 Governance - Airline Admission Engine
//!
//! **Subsystem ID:** 2
//!
//! ## Purpose
//!
//! Runs the airline lifecycle `Candidate → Registered → Funded`. Small
//! networks admit new airlines on proposal alone; once the registered set
//! reaches the consensus threshold, admission needs votes from half of the
//! registered airlines.
//!
//! ## Domain Invariants
//!
//! | ID | Invariant | Enforcement Location |
//! |----|-----------|---------------------|
//! | INVARIANT-1 | Only Funded airlines propose or vote | `service.rs` - `require_funded()` |
//! | INVARIANT-2 | One vote per voter per candidate | `service.rs` - `vote_for_airline()` |
//! | INVARIANT-3 | Auto-approve below threshold, else ceil(N/2) votes | `domain/approval.rs` |
//! | INVARIANT-4 | Funding needs the configured minimum | `service.rs` - `fund_airline()` |
//! | INVARIANT-5 | Bootstrap only on an empty ledger, owner only | `service.rs` - `bootstrap_airline()` |
//!
//! ## Outbound Dependencies
//!
//! | Dependency | Trait | Purpose |
//! |------------|-------|---------|
//! | Ledger State (1) | `LedgerStore` | Airline records, pool balance |
//! | Shared Bus | `EventPublisher` | `AirlineRegistered`, `AirlineFunded` |

#![cfg_attr(test, allow(clippy::unwrap_used))]

pub mod domain;
pub mod ports;
pub mod service;

pub use domain::approval::{ApprovalPolicy, Admission};
pub use ports::inbound::GovernanceApi;
pub use service::{GovernanceConfig, GovernanceService};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::domain::approval::{Admission, ApprovalPolicy};
    pub use crate::ports::inbound::GovernanceApi;
    pub use crate::service::{GovernanceConfig, GovernanceService};
}
