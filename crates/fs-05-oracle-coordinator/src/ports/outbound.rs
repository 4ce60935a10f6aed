//! # Driven Ports (SPI - Outbound)
//!
//! What the coordinator needs from the outside world: a ledger to talk to
//! and a source of flight statuses.

use async_trait::async_trait;
use serde::Serialize;
use shared_types::{Address, FlightKey, FlightStatus, SuretyError, Timestamp, U256};
use thiserror::Error;

/// Coordinator-side failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoordinatorError {
    /// The ledger refused the call.
    #[error("ledger rejected call: {0}")]
    Rejected(#[from] SuretyError),

    /// The call never reached the ledger.
    #[error("transport failure: {0}")]
    Transport(String),
}

impl CoordinatorError {
    /// The ledger rejected the call with exactly `err`.
    #[must_use]
    pub fn is_rejection(&self, err: SuretyError) -> bool {
        matches!(self, Self::Rejected(e) if *e == err)
    }
}

/// Ledger acknowledgement of one submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SubmissionAck {
    /// Counted; `votes` oracles now back the submitted status.
    Counted { votes: usize },
    /// This submission completed the quorum.
    Resolved,
    /// The request had already been resolved.
    Inert,
}

/// The ledger as seen by an off-ledger client.
#[async_trait]
pub trait LedgerClient: Send + Sync {
    /// Fee attached to every registration.
    async fn registration_fee(&self) -> Result<U256, CoordinatorError>;

    /// Register `oracle`, paying `fee`. Returns its indexes.
    async fn register_oracle(
        &self,
        oracle: Address,
        fee: U256,
    ) -> Result<[u8; 3], CoordinatorError>;

    /// Indexes already assigned to `oracle`.
    async fn get_my_indexes(&self, oracle: Address) -> Result<[u8; 3], CoordinatorError>;

    /// Answer an open request as `oracle`.
    async fn submit_oracle_response(
        &self,
        oracle: Address,
        airline: Address,
        key: FlightKey,
        timestamp: Timestamp,
        status: FlightStatus,
    ) -> Result<SubmissionAck, CoordinatorError>;
}

/// Picks the status an oracle reports for a flight.
pub trait StatusPolicy: Send + Sync {
    fn status_for(&self, oracle: &Address, airline: &Address, key: &FlightKey) -> FlightStatus;
}
