//! # FS-03 Insurance - Flight & Policy Bookkeeping
//!
//! **Subsystem ID:** 3
//!
//! ## Purpose
//!
//! Registers flights under deterministic keys, sells one policy per
//! (flight, passenger), credits payouts when a flight resolves as delayed by
//! the airline, and lets passengers withdraw credited payouts exactly once.
//!
//! ## Domain Invariants
//!
//! | ID | Invariant | Enforcement Location |
//! |----|-----------|---------------------|
//! | INVARIANT-1 | Only Funded airlines register flights | `service.rs` - `register_flight()` |
//! | INVARIANT-2 | Nonce is sequential per airline from 1 | `service.rs` - `register_flight()` |
//! | INVARIANT-3 | Premium in (0, cap] | `domain/payout.rs` - `validate_premium()` |
//! | INVARIANT-4 | One policy per (flight, passenger) | `service.rs` - `buy_insurance()` |
//! | INVARIANT-5 | Status applied once; only LateAirline credits | `service.rs` - `resolve_flight_status()` |
//! | INVARIANT-6 | Payout withdrawn once, claim zeroed | `service.rs` - `withdraw()` |
//!
//! ## Money Flow
//!
//! ```text
//! premium ──→ pool ──credit──→ policy.payout ──withdraw──→ passenger balance
//! ```
//!
//! The pool also holds airline funding, so payouts above collected premiums
//! are covered by it. A credit the pool cannot cover is rejected as a whole.

#![cfg_attr(test, allow(clippy::unwrap_used))]

pub mod domain;
pub mod ports;
pub mod service;

pub use domain::payout::{payout_for, validate_premium, BPS_DENOMINATOR};
pub use ports::inbound::{InsuranceApi, RegisteredFlight, Settlement};
pub use service::{InsuranceConfig, InsuranceService};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::ports::inbound::{InsuranceApi, RegisteredFlight, Settlement};
    pub use crate::service::{InsuranceConfig, InsuranceService};
}
