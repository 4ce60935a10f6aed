//! # Approval Rule
//!
//! M-of-N admission:
//!
//! - `registered < auto_approve_below` ⇒ approve on any recorded vote
//!   (the proposer's own vote is enough).
//! - otherwise approve once `votes ≥ ceil(registered × percent / 100)`.
//!
//! `registered` is the count of Registered + Funded airlines at the moment
//! the rule is evaluated.

use serde::{Deserialize, Serialize};

/// Admission thresholds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApprovalPolicy {
    /// Below this many registered airlines, proposals are auto-approved.
    pub auto_approve_below: usize,
    /// Required share of registered airlines, in percent.
    pub approval_percent: u8,
}

impl Default for ApprovalPolicy {
    fn default() -> Self {
        Self {
            auto_approve_below: 5,
            approval_percent: 50,
        }
    }
}

impl ApprovalPolicy {
    /// Votes needed for approval with `registered` airlines, 0 under the
    /// auto-approve threshold.
    #[must_use]
    pub fn required_votes(&self, registered: usize) -> usize {
        if registered < self.auto_approve_below {
            return 0;
        }
        let numerator = registered * usize::from(self.approval_percent);
        numerator.div_ceil(100)
    }

    /// Whether a candidate holding `votes` is admitted.
    #[must_use]
    pub fn is_approved(&self, registered: usize, votes: usize) -> bool {
        votes >= self.required_votes(registered)
    }
}

/// Snapshot of a candidate's admission progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Admission {
    /// Distinct votes recorded.
    pub votes: usize,
    /// Votes needed at evaluation time.
    pub required: usize,
    /// Candidate reached Registered.
    pub registered: bool,
}
