//! # Domain Layer
//!
//! Ledger records and key derivation. No I/O, no locking.

pub mod keys;
pub mod records;
