//! # Node Runtime Library
//!
//! This library exposes the internal modules of the node runtime for testing.
//! The main entry point is the `main.rs` binary.
//!
//! ## Architectural Patterns
//!
//! - **EDA (Event-Driven Architecture)**: the coordinator only reacts to
//!   ledger events
//! - **DDD (Domain-Driven Design)**: each subsystem owns its domain logic
//! - **Hexagonal Architecture**: ports define contracts, adapters here bind
//!   them to each other
//!
//! ## Modules
//!
//! - `ledger` - `FlightSuretyLedger`, the serialized state machine
//! - `adapters` - port implementations crossing subsystem boundaries
//! - `genesis` - development accounts and initial state
//! - `container` - configuration and wiring

#![allow(clippy::type_complexity)]

pub mod adapters;
pub mod container;
pub mod genesis;
pub mod ledger;

pub use container::{NodeConfig, SubsystemContainer};
pub use ledger::{FlightSuretyLedger, LedgerConfig};
