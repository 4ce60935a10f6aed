//! # Driving Ports (API - Inbound)
//!
//! Flight, policy and payout entry points.

use async_trait::async_trait;
use fs_01_ledger_state::{FlightDetails, FlightRecord, InsurancePolicy};
use serde::{Deserialize, Serialize};
use shared_types::{Address, CallContext, FlightKey, FlightStatus, SuretyResult, U256};

/// Key and nonce assigned on registration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegisteredFlight {
    pub key: FlightKey,
    pub nonce: u64,
}

/// Outcome of applying a flight status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settlement {
    /// Applied status.
    pub status: FlightStatus,
    /// The flight is now final.
    pub resolved: bool,
    /// Policies credited by this call.
    pub credited: usize,
    /// Sum of credited payouts.
    pub total_payout: U256,
}

/// Primary Insurance API.
#[async_trait]
pub trait InsuranceApi: Send + Sync {
    /// Funded caller registers its next flight.
    async fn register_flight(
        &self,
        ctx: &CallContext,
        details: FlightDetails,
    ) -> SuretyResult<RegisteredFlight>;

    /// Caller buys a policy on `key` for `amount`, paid from `ctx.value`.
    async fn buy_insurance(
        &self,
        ctx: &CallContext,
        airline: Address,
        key: FlightKey,
        amount: U256,
    ) -> SuretyResult<()>;

    /// Authorized caller applies a consensus status.
    async fn resolve_flight_status(
        &self,
        ctx: &CallContext,
        airline: Address,
        key: FlightKey,
        status: FlightStatus,
    ) -> SuretyResult<Settlement>;

    /// Caller withdraws its credited payout on `key`. Returns the amount.
    async fn withdraw(&self, ctx: &CallContext, key: FlightKey) -> SuretyResult<U256>;

    /// Flight by key.
    fn get_flight(&self, key: &FlightKey) -> Option<FlightRecord>;

    /// `airline` registered a flight under `key`.
    fn is_flight(&self, airline: &Address, key: &FlightKey) -> bool;

    /// Key of the airline's `nonce`-th flight. Pure, no lookup.
    fn get_flight_key(&self, airline: &Address, nonce: u64) -> FlightKey;

    /// Policy held by `passenger` on the airline's flight.
    fn get_passenger_insurance(
        &self,
        airline: &Address,
        key: &FlightKey,
        passenger: &Address,
    ) -> Option<InsurancePolicy>;

    /// Insured passengers in purchase order.
    fn get_insured_passengers(&self, airline: &Address, key: &FlightKey) -> Vec<Address>;

    /// Pooled contract balance.
    fn contract_balance(&self) -> U256;

    /// Withdrawn payouts held for `account`.
    fn balance_of(&self, account: &Address) -> U256;
}
