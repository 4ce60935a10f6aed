//! # FlightSurety Ledger
//!
//! The single serialized state machine. Every entry point runs under one
//! execution lock, so calls apply in total order and no caller ever
//! observes a half-applied call: mutations take the write side, queries the
//! read side.
//!
//! ```text
//! caller ──→ FlightSuretyLedger ──lock──→ Governance │ Insurance │ Oracles
//!                                                │
//!                                         InMemoryLedgerStore
//!                                                │
//!                                         InMemoryEventBus ──→ subscribers
//! ```

use crate::adapters::InsuranceResolver;
use fs_01_ledger_state::{
    AccessGate, AirlineRecord, FlightDetails, FlightRecord, InMemoryLedgerStore, InsurancePolicy,
    OracleRequestRecord, RequestKey,
};
use fs_02_governance::{Admission, GovernanceApi, GovernanceConfig, GovernanceService};
use fs_03_insurance::{InsuranceApi, InsuranceConfig, InsuranceService, RegisteredFlight};
use fs_04_oracle_consensus::{
    OracleApi, OracleConfig, OracleConfigError, OracleService, ResponseOutcome, SeededIndexSource,
};
use shared_bus::{EventFilter, InMemoryEventBus, Subscription};
use shared_types::{
    Address, CallContext, FlightKey, FlightStatus, SuretyResult, Timestamp, U256,
};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::info;

/// Concrete store behind the ledger.
pub type Store = InMemoryLedgerStore;
/// Concrete event bus behind the ledger.
pub type Bus = InMemoryEventBus;
/// Governance engine bound to the in-memory adapters.
pub type Governance = GovernanceService<Store, Bus>;
/// Insurance engine bound to the in-memory adapters.
pub type Insurance = InsuranceService<Store, Bus>;
/// Oracle protocol bound to the in-memory adapters.
pub type Oracles = OracleService<Store, Bus, SeededIndexSource, InsuranceResolver>;

/// Engine parameters of one ledger instance.
#[derive(Debug, Clone)]
pub struct LedgerConfig {
    pub governance: GovernanceConfig,
    pub insurance: InsuranceConfig,
    pub oracle: OracleConfig,
    /// Seed of the oracle index source.
    pub index_seed: u64,
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            governance: GovernanceConfig::default(),
            insurance: InsuranceConfig::default(),
            oracle: OracleConfig::default(),
            index_seed: 42,
        }
    }
}

/// In-process FlightSurety ledger.
pub struct FlightSuretyLedger {
    exec: RwLock<()>,
    gate: AccessGate<Store>,
    bus: Arc<Bus>,
    governance: Governance,
    insurance: Arc<Insurance>,
    oracles: Oracles,
}

impl FlightSuretyLedger {
    /// Build a ledger owned by `owner`.
    ///
    /// `protocol` is the principal the oracle protocol uses to settle
    /// flights; it still has to be authorized by the owner (genesis does
    /// this).
    pub fn new(
        config: LedgerConfig,
        owner: Address,
        protocol: Address,
        bus: Arc<Bus>,
    ) -> Result<Self, OracleConfigError> {
        config.oracle.validate()?;

        let store = Arc::new(InMemoryLedgerStore::new(owner));
        let gate = AccessGate::new(Arc::clone(&store));
        let governance =
            GovernanceService::new(config.governance, Arc::clone(&store), Arc::clone(&bus));
        let insurance = Arc::new(InsuranceService::new(
            config.insurance,
            Arc::clone(&store),
            Arc::clone(&bus),
        ));
        let resolver = Arc::new(InsuranceResolver::new(Arc::clone(&insurance), protocol));
        let oracles = OracleService::new(
            config.oracle,
            Arc::clone(&store),
            Arc::clone(&bus),
            Arc::new(SeededIndexSource::new(config.index_seed)),
            resolver,
        );

        info!(
            owner = %shared_types::to_hex(&owner),
            index_seed = config.index_seed,
            "Ledger created"
        );

        Ok(Self {
            exec: RwLock::new(()),
            gate,
            bus,
            governance,
            insurance,
            oracles,
        })
    }

    /// Subscribe to ledger events.
    pub fn subscribe(&self, filter: EventFilter) -> Subscription {
        self.bus.subscribe(filter)
    }

    /// The event bus the engines publish on.
    pub fn bus(&self) -> Arc<Bus> {
        Arc::clone(&self.bus)
    }

    // =========================================================================
    // ACCESS GATE
    // =========================================================================

    pub async fn set_operating_status(&self, ctx: &CallContext, mode: bool) -> SuretyResult<()> {
        let _guard = self.exec.write().await;
        self.gate.set_operating_status(ctx, mode)
    }

    pub async fn is_operational(&self) -> bool {
        let _guard = self.exec.read().await;
        self.gate.is_operational()
    }

    pub async fn authorize_caller(&self, ctx: &CallContext, caller: Address) -> SuretyResult<()> {
        let _guard = self.exec.write().await;
        self.gate.authorize_caller(ctx, caller)
    }

    pub async fn deauthorize_caller(
        &self,
        ctx: &CallContext,
        caller: Address,
    ) -> SuretyResult<()> {
        let _guard = self.exec.write().await;
        self.gate.deauthorize_caller(ctx, caller)
    }

    pub async fn is_authorized_caller(&self, caller: &Address) -> bool {
        let _guard = self.exec.read().await;
        self.gate.is_authorized_caller(caller)
    }

    // =========================================================================
    // GOVERNANCE
    // =========================================================================

    pub async fn bootstrap_airline(
        &self,
        ctx: &CallContext,
        airline: Address,
        name: impl Into<String>,
    ) -> SuretyResult<()> {
        let _guard = self.exec.write().await;
        self.governance
            .bootstrap_airline(ctx, airline, name.into())
            .await
    }

    pub async fn propose_airline(
        &self,
        ctx: &CallContext,
        candidate: Address,
        name: impl Into<String>,
    ) -> SuretyResult<Admission> {
        let _guard = self.exec.write().await;
        self.governance
            .propose_airline(ctx, candidate, name.into())
            .await
    }

    pub async fn vote_for_airline(
        &self,
        ctx: &CallContext,
        candidate: Address,
    ) -> SuretyResult<Admission> {
        let _guard = self.exec.write().await;
        self.governance.vote_for_airline(ctx, candidate).await
    }

    pub async fn fund_airline(&self, ctx: &CallContext) -> SuretyResult<()> {
        let _guard = self.exec.write().await;
        self.governance.fund_airline(ctx).await
    }

    pub async fn is_airline(&self, airline: &Address) -> bool {
        let _guard = self.exec.read().await;
        self.governance.is_airline(airline)
    }

    pub async fn is_registered(&self, airline: &Address) -> bool {
        let _guard = self.exec.read().await;
        self.governance.is_registered(airline)
    }

    pub async fn is_funded(&self, airline: &Address) -> bool {
        let _guard = self.exec.read().await;
        self.governance.is_funded(airline)
    }

    pub async fn get_airline(&self, airline: &Address) -> Option<AirlineRecord> {
        let _guard = self.exec.read().await;
        self.governance.get_airline(airline)
    }

    pub async fn registered_airline_count(&self) -> usize {
        let _guard = self.exec.read().await;
        self.governance.registered_airline_count()
    }

    // =========================================================================
    // INSURANCE
    // =========================================================================

    pub async fn register_flight(
        &self,
        ctx: &CallContext,
        details: FlightDetails,
    ) -> SuretyResult<RegisteredFlight> {
        let _guard = self.exec.write().await;
        self.insurance.register_flight(ctx, details).await
    }

    pub async fn buy_insurance(
        &self,
        ctx: &CallContext,
        airline: Address,
        key: FlightKey,
        amount: U256,
    ) -> SuretyResult<()> {
        let _guard = self.exec.write().await;
        self.insurance.buy_insurance(ctx, airline, key, amount).await
    }

    /// Pay out the caller's credited claim on `key`.
    pub async fn withdraw(&self, ctx: &CallContext, key: FlightKey) -> SuretyResult<U256> {
        let _guard = self.exec.write().await;
        self.insurance.withdraw(ctx, key).await
    }

    pub async fn get_flight(&self, key: &FlightKey) -> Option<FlightRecord> {
        let _guard = self.exec.read().await;
        self.insurance.get_flight(key)
    }

    pub async fn is_flight(&self, airline: &Address, key: &FlightKey) -> bool {
        let _guard = self.exec.read().await;
        self.insurance.is_flight(airline, key)
    }

    /// Pure key derivation; no lock needed.
    pub fn get_flight_key(&self, airline: &Address, nonce: u64) -> FlightKey {
        self.insurance.get_flight_key(airline, nonce)
    }

    pub async fn get_passenger_insurance(
        &self,
        airline: &Address,
        key: &FlightKey,
        passenger: &Address,
    ) -> Option<InsurancePolicy> {
        let _guard = self.exec.read().await;
        self.insurance
            .get_passenger_insurance(airline, key, passenger)
    }

    pub async fn get_insured_passengers(&self, airline: &Address, key: &FlightKey) -> Vec<Address> {
        let _guard = self.exec.read().await;
        self.insurance.get_insured_passengers(airline, key)
    }

    /// Pooled contract balance.
    pub async fn contract_balance(&self) -> U256 {
        let _guard = self.exec.read().await;
        self.insurance.contract_balance()
    }

    /// Withdrawn funds held for `account`.
    pub async fn get_balance(&self, account: &Address) -> U256 {
        let _guard = self.exec.read().await;
        self.insurance.balance_of(account)
    }

    // =========================================================================
    // ORACLES
    // =========================================================================

    pub async fn register_oracle(&self, ctx: &CallContext) -> SuretyResult<[u8; 3]> {
        let _guard = self.exec.write().await;
        self.oracles.register_oracle(ctx).await
    }

    pub async fn get_my_indexes(&self, oracle: &Address) -> SuretyResult<[u8; 3]> {
        let _guard = self.exec.read().await;
        self.oracles.get_my_indexes(oracle)
    }

    pub async fn fetch_flight_status(
        &self,
        ctx: &CallContext,
        airline: Address,
        key: FlightKey,
        timestamp: Timestamp,
    ) -> SuretyResult<[u8; 3]> {
        let _guard = self.exec.write().await;
        self.oracles
            .fetch_flight_status(ctx, airline, key, timestamp)
            .await
    }

    /// Answer a request with a raw status code as received on the wire.
    pub async fn submit_oracle_response(
        &self,
        ctx: &CallContext,
        airline: Address,
        key: FlightKey,
        timestamp: Timestamp,
        status_code: u8,
    ) -> SuretyResult<ResponseOutcome> {
        let _guard = self.exec.write().await;
        self.gate.ensure_operational()?;
        let status = FlightStatus::try_from(status_code)?;
        self.oracles
            .submit_oracle_response(ctx, airline, key, timestamp, status)
            .await
    }

    pub async fn get_request(
        &self,
        airline: Address,
        key: FlightKey,
        timestamp: Timestamp,
    ) -> Option<OracleRequestRecord> {
        let _guard = self.exec.read().await;
        self.oracles.get_request(&RequestKey {
            airline,
            key,
            timestamp,
        })
    }

    pub async fn is_oracle(&self, oracle: &Address) -> bool {
        let _guard = self.exec.read().await;
        self.oracles.is_oracle(oracle)
    }

    pub async fn oracle_count(&self) -> usize {
        let _guard = self.exec.read().await;
        self.oracles.oracle_count()
    }

    /// Fee `register_oracle` expects in `ctx.value`.
    pub fn registration_fee(&self) -> U256 {
        self.oracles.registration_fee()
    }
}
