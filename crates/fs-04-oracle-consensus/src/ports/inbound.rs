//! # Driving Ports (API - Inbound)
//!
//! Oracle registration, status requests and responses.

use async_trait::async_trait;
use fs_01_ledger_state::{OracleRequestRecord, RequestKey};
use serde::{Deserialize, Serialize};
use shared_types::{Address, CallContext, FlightKey, FlightStatus, SuretyResult, Timestamp, U256};

/// Effect of an accepted oracle response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ResponseOutcome {
    /// Counted toward `status`; quorum not reached yet.
    Counted { status: FlightStatus, votes: usize },
    /// This response completed the quorum.
    Resolved { status: FlightStatus },
    /// The request was already resolved; nothing changed.
    Inert,
}

/// Primary Oracle API.
#[async_trait]
pub trait OracleApi: Send + Sync {
    /// Register the caller as an oracle, paying the fee from `ctx.value`.
    async fn register_oracle(&self, ctx: &CallContext) -> SuretyResult<[u8; 3]>;

    /// Indexes assigned to `oracle`.
    fn get_my_indexes(&self, oracle: &Address) -> SuretyResult<[u8; 3]>;

    /// Open a status request. Returns the request indexes.
    async fn fetch_flight_status(
        &self,
        ctx: &CallContext,
        airline: Address,
        key: FlightKey,
        timestamp: Timestamp,
    ) -> SuretyResult<[u8; 3]>;

    /// Answer an open request as oracle `ctx.caller`.
    async fn submit_oracle_response(
        &self,
        ctx: &CallContext,
        airline: Address,
        key: FlightKey,
        timestamp: Timestamp,
        status: FlightStatus,
    ) -> SuretyResult<ResponseOutcome>;

    /// Request record, open or resolved.
    fn get_request(&self, key: &RequestKey) -> Option<OracleRequestRecord>;

    /// `oracle` is registered.
    fn is_oracle(&self, oracle: &Address) -> bool;

    /// Fee required by `register_oracle`.
    fn registration_fee(&self) -> U256;
}
