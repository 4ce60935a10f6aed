//! # Shared Types Crate
//!
//! This crate contains the ledger primitives, the `CallContext` envelope and
//! the `SuretyError` taxonomy used by every FlightSurety subsystem.
//!
//! ## Design Principles
//!
//! - **Single Source of Truth**: All cross-subsystem types are defined here.
//! - **Explicit Principal**: Entry points never read an ambient caller. The
//!   `CallContext` passed in is the sole authority for identity and value.
//! - **Exact Money**: Every amount is a `U256` in wei.

pub mod entities;
pub mod envelope;
pub mod errors;

pub use entities::*;
pub use envelope::CallContext;
pub use errors::*;
