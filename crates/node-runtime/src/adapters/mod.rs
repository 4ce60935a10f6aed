//! # Adapters
//!
//! Bind the subsystems' outbound ports to each other inside one process.
//!
//! - `InsuranceResolver`: oracle quorum results into the Insurance Engine
//! - `LedgerClient` for `FlightSuretyLedger`: the coordinator's view of the
//!   ledger

pub mod ledger_client;
pub mod resolver;

pub use resolver::InsuranceResolver;
