//! # Driving Ports (API - Inbound)
//!
//! Entry points of the airline governance state machine. Every mutating
//! call takes the authenticated principal explicitly.

use crate::domain::approval::Admission;
use async_trait::async_trait;
use fs_01_ledger_state::AirlineRecord;
use shared_types::{Address, CallContext, SuretyResult};

/// Primary Governance API.
#[async_trait]
pub trait GovernanceApi: Send + Sync {
    /// Owner-only: write the first airline directly as Registered.
    async fn bootstrap_airline(
        &self,
        ctx: &CallContext,
        airline: Address,
        name: String,
    ) -> SuretyResult<()>;

    /// Funded caller proposes `candidate`. Counts as the proposer's vote.
    async fn propose_airline(
        &self,
        ctx: &CallContext,
        candidate: Address,
        name: String,
    ) -> SuretyResult<Admission>;

    /// Funded caller votes for a pending `candidate`.
    async fn vote_for_airline(&self, ctx: &CallContext, candidate: Address)
        -> SuretyResult<Admission>;

    /// Registered caller pays `ctx.value` to become Funded.
    async fn fund_airline(&self, ctx: &CallContext) -> SuretyResult<()>;

    /// A record exists, in any state.
    fn is_airline(&self, airline: &Address) -> bool;

    /// Registered or Funded.
    fn is_registered(&self, airline: &Address) -> bool;

    /// Funded.
    fn is_funded(&self, airline: &Address) -> bool;

    /// Full record.
    fn get_airline(&self, airline: &Address) -> Option<AirlineRecord>;

    /// Registered + Funded airlines.
    fn registered_airline_count(&self) -> usize;
}
