//! # Insurance Resolver
//!
//! Implements the oracle protocol's `FlightStatusResolver` by calling the
//! Insurance Engine as the protocol principal. The principal must be an
//! authorized caller or every settlement fails with `Unauthorized`.

use crate::ledger::Insurance;
use async_trait::async_trait;
use fs_03_insurance::InsuranceApi;
use fs_04_oracle_consensus::FlightStatusResolver;
use shared_types::{short_hex, Address, CallContext, FlightKey, FlightStatus, SuretyResult};
use std::sync::Arc;
use tracing::debug;

/// Quorum results into the Insurance Engine.
pub struct InsuranceResolver {
    insurance: Arc<Insurance>,
    principal: Address,
}

impl InsuranceResolver {
    pub fn new(insurance: Arc<Insurance>, principal: Address) -> Self {
        Self {
            insurance,
            principal,
        }
    }
}

#[async_trait]
impl FlightStatusResolver for InsuranceResolver {
    async fn resolve_flight_status(
        &self,
        airline: Address,
        key: FlightKey,
        status: FlightStatus,
    ) -> SuretyResult<()> {
        let ctx = CallContext::new(self.principal);
        let settlement = self
            .insurance
            .resolve_flight_status(&ctx, airline, key, status)
            .await?;
        debug!(
            flight = %short_hex(&key),
            %status,
            credited = settlement.credited,
            "Consensus status applied"
        );
        Ok(())
    }
}
