//! # In-Process Ledger Client
//!
//! The coordinator talks to the ledger through `LedgerClient`. Inside the
//! node both live in one process, so the client is the ledger itself and
//! no call can fail in transit.

use crate::ledger::FlightSuretyLedger;
use async_trait::async_trait;
use fs_04_oracle_consensus::ResponseOutcome;
use fs_05_oracle_coordinator::{CoordinatorError, LedgerClient, SubmissionAck};
use shared_types::{Address, CallContext, FlightKey, FlightStatus, Timestamp, U256};

fn acknowledge(outcome: ResponseOutcome) -> SubmissionAck {
    match outcome {
        ResponseOutcome::Counted { votes, .. } => SubmissionAck::Counted { votes },
        ResponseOutcome::Resolved { .. } => SubmissionAck::Resolved,
        ResponseOutcome::Inert => SubmissionAck::Inert,
    }
}

#[async_trait]
impl LedgerClient for FlightSuretyLedger {
    async fn registration_fee(&self) -> Result<U256, CoordinatorError> {
        Ok(FlightSuretyLedger::registration_fee(self))
    }

    async fn register_oracle(
        &self,
        oracle: Address,
        fee: U256,
    ) -> Result<[u8; 3], CoordinatorError> {
        let ctx = CallContext::with_value(oracle, fee);
        Ok(FlightSuretyLedger::register_oracle(self, &ctx).await?)
    }

    async fn get_my_indexes(&self, oracle: Address) -> Result<[u8; 3], CoordinatorError> {
        Ok(FlightSuretyLedger::get_my_indexes(self, &oracle).await?)
    }

    async fn submit_oracle_response(
        &self,
        oracle: Address,
        airline: Address,
        key: FlightKey,
        timestamp: Timestamp,
        status: FlightStatus,
    ) -> Result<SubmissionAck, CoordinatorError> {
        let ctx = CallContext::new(oracle);
        let outcome = FlightSuretyLedger::submit_oracle_response(
            self,
            &ctx,
            airline,
            key,
            timestamp,
            status.code(),
        )
        .await?;
        Ok(acknowledge(outcome))
    }
}
