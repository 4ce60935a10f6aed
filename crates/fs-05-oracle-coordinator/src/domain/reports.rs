//! # Run Reports
//!
//! Summaries returned once every spawned task of a batch has finished.

use serde::Serialize;

/// Outcome of one `register_oracles` pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RegistrationReport {
    /// Newly registered, or already registered and adopted.
    pub registered: usize,
    /// Registration failed.
    pub failed: usize,
}

/// Outcome of fanning out one oracle request.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RequestReport {
    /// Local oracles whose indexes matched.
    pub matched: usize,
    /// Submissions the ledger accepted.
    pub accepted: usize,
    /// Submissions the ledger rejected (or that failed in transit).
    pub rejected: usize,
}
