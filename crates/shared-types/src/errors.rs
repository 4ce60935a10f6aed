//! # Error Types
//!
//! The rejection taxonomy shared by every ledger entry point.
//!
//! Every variant is raised synchronously at the offending call, before any
//! state is written. A rejected call leaves the ledger untouched.

use thiserror::Error;

/// Result alias for ledger operations.
pub type SuretyResult<T> = Result<T, SuretyError>;

/// Reasons a ledger call is rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SuretyError {
    // =========================================================================
    // ACCESS GATE
    // =========================================================================
    /// The operational flag is off.
    #[error("Contract is currently not operational")]
    NotOperational,

    /// Caller lacks the required role (owner or authorized caller).
    #[error("Caller is not authorized")]
    Unauthorized,

    // =========================================================================
    // GOVERNANCE
    // =========================================================================
    /// Caller must be a Funded airline.
    #[error("Caller is not a funded airline")]
    CallerNotFunded,

    /// Record already exists (airline, oracle, or open request).
    #[error("Record already exists")]
    AlreadyExists,

    /// Voter already counted for this candidate.
    #[error("Airline already voted for this candidate")]
    DuplicateVote,

    /// Candidate is no longer pending.
    #[error("Airline is already registered")]
    AlreadyRegistered,

    /// Airline must be Registered before it can fund.
    #[error("Airline is not registered")]
    NotRegistered,

    /// Airline already paid the funding minimum.
    #[error("Airline is already funded")]
    AlreadyFunded,

    /// No airline record for this identity.
    #[error("Unknown airline")]
    UnknownAirline,

    // =========================================================================
    // INSURANCE
    // =========================================================================
    /// Payment below the required amount, or pool cannot cover payouts.
    #[error("Insufficient funds")]
    InsufficientFunds,

    /// Premium is zero or above the cap.
    #[error("Invalid insurance amount")]
    InvalidAmount,

    /// Passenger already holds a policy for this flight.
    #[error("Passenger is already insured for this flight")]
    AlreadyInsured,

    /// Flight status was already settled.
    #[error("Flight status already resolved")]
    AlreadyResolved,

    /// No credited, unwithdrawn payout for this caller.
    #[error("Nothing to withdraw")]
    NothingToWithdraw,

    /// No flight for this (airline, key).
    #[error("Unknown flight")]
    UnknownFlight,

    // =========================================================================
    // ORACLES
    // =========================================================================
    /// Oracle indexes do not intersect the request indexes.
    #[error("Oracle indexes do not match the request")]
    IndexMismatch,

    /// Oracle already answered this request.
    #[error("Oracle already responded to this request")]
    DuplicateResponse,

    /// No open or resolved request for (airline, key, timestamp).
    #[error("Unknown oracle request")]
    UnknownRequest,

    /// Caller is not a registered oracle.
    #[error("Oracle is not registered")]
    OracleNotRegistered,

    /// Code outside the defined status set.
    #[error("Invalid status code: {0}")]
    InvalidStatusCode(u8),
}

impl SuretyError {
    /// Stable identifier for logs and HTTP payloads.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::NotOperational => "NotOperational",
            Self::Unauthorized => "Unauthorized",
            Self::CallerNotFunded => "CallerNotFunded",
            Self::AlreadyExists => "AlreadyExists",
            Self::DuplicateVote => "DuplicateVote",
            Self::AlreadyRegistered => "AlreadyRegistered",
            Self::NotRegistered => "NotRegistered",
            Self::AlreadyFunded => "AlreadyFunded",
            Self::UnknownAirline => "UnknownAirline",
            Self::InsufficientFunds => "InsufficientFunds",
            Self::InvalidAmount => "InvalidAmount",
            Self::AlreadyInsured => "AlreadyInsured",
            Self::AlreadyResolved => "AlreadyResolved",
            Self::NothingToWithdraw => "NothingToWithdraw",
            Self::UnknownFlight => "UnknownFlight",
            Self::IndexMismatch => "IndexMismatch",
            Self::DuplicateResponse => "DuplicateResponse",
            Self::UnknownRequest => "UnknownRequest",
            Self::OracleNotRegistered => "OracleNotRegistered",
            Self::InvalidStatusCode(_) => "InvalidStatusCode",
        }
    }
}
