//! # Genesis Module
//!
//! Deterministic development accounts and the initial ledger state.
//!
//! ## Account Layout
//!
//! | Index | Role |
//! |-------|------|
//! | 0 | Owner (deployer) |
//! | 1 | First airline, bootstrapped at genesis |
//! | 2..=5 | Further airlines |
//! | 6..=9 | Passengers |
//! | 10..40 | Oracle accounts (count and offset configurable) |
//!
//! The protocol principal (the oracle protocol's identity toward the
//! Insurance Engine) is derived under its own label.
//!
//! ## Initialization Sequence
//!
//! 1. Derive every account
//! 2. Authorize the protocol principal
//! 3. Bootstrap the first airline (Registered, not yet funded)

pub mod builder;

pub use builder::{dev_account, GenesisAccounts, GenesisBuilder, GenesisConfig, GenesisError};
