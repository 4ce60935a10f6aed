//! # In-Memory Ledger Store
//!
//! `parking_lot::RwLock` maps behind the `LedgerStore` port. Used by the
//! runtime and by every engine's tests.

use crate::domain::records::{
    AirlineRecord, FlightRecord, InsurancePolicy, OracleRecord, OracleRequestRecord, RequestKey,
};
use crate::ports::LedgerStore;
use parking_lot::RwLock;
use shared_types::{Address, FlightKey, U256};
use std::collections::{HashMap, HashSet};

/// Per-flight policies plus purchase order.
#[derive(Debug, Default)]
struct FlightPolicies {
    by_passenger: HashMap<Address, InsurancePolicy>,
    order: Vec<Address>,
}

/// In-memory ledger state.
#[derive(Debug)]
pub struct InMemoryLedgerStore {
    owner: Address,
    operational: RwLock<bool>,
    authorized: RwLock<HashSet<Address>>,
    airlines: RwLock<HashMap<Address, AirlineRecord>>,
    flights: RwLock<HashMap<FlightKey, FlightRecord>>,
    nonces: RwLock<HashMap<Address, u64>>,
    policies: RwLock<HashMap<FlightKey, FlightPolicies>>,
    oracles: RwLock<HashMap<Address, OracleRecord>>,
    requests: RwLock<HashMap<RequestKey, OracleRequestRecord>>,
    pool: RwLock<U256>,
    balances: RwLock<HashMap<Address, U256>>,
}

impl InMemoryLedgerStore {
    /// Empty, operational ledger deployed by `owner`.
    #[must_use]
    pub fn new(owner: Address) -> Self {
        Self {
            owner,
            operational: RwLock::new(true),
            authorized: RwLock::new(HashSet::new()),
            airlines: RwLock::new(HashMap::new()),
            flights: RwLock::new(HashMap::new()),
            nonces: RwLock::new(HashMap::new()),
            policies: RwLock::new(HashMap::new()),
            oracles: RwLock::new(HashMap::new()),
            requests: RwLock::new(HashMap::new()),
            pool: RwLock::new(U256::zero()),
            balances: RwLock::new(HashMap::new()),
        }
    }

    /// Number of status requests ever opened.
    #[must_use]
    pub fn request_count(&self) -> usize {
        self.requests.read().len()
    }
}

impl LedgerStore for InMemoryLedgerStore {
    fn owner(&self) -> Address {
        self.owner
    }

    fn is_operational(&self) -> bool {
        *self.operational.read()
    }

    fn set_operational(&self, operational: bool) {
        *self.operational.write() = operational;
    }

    fn is_authorized_caller(&self, caller: &Address) -> bool {
        self.authorized.read().contains(caller)
    }

    fn set_authorized_caller(&self, caller: Address, authorized: bool) {
        let mut set = self.authorized.write();
        if authorized {
            set.insert(caller);
        } else {
            set.remove(&caller);
        }
    }

    fn airline(&self, id: &Address) -> Option<AirlineRecord> {
        self.airlines.read().get(id).cloned()
    }

    fn put_airline(&self, record: AirlineRecord) {
        self.airlines.write().insert(record.id, record);
    }

    fn airline_count(&self) -> usize {
        self.airlines.read().len()
    }

    fn registered_airline_count(&self) -> usize {
        self.airlines
            .read()
            .values()
            .filter(|a| a.state.is_registered())
            .count()
    }

    fn flight(&self, key: &FlightKey) -> Option<FlightRecord> {
        self.flights.read().get(key).cloned()
    }

    fn put_flight(&self, record: FlightRecord) {
        self.flights.write().insert(record.key, record);
    }

    fn flight_nonce(&self, airline: &Address) -> u64 {
        self.nonces.read().get(airline).copied().unwrap_or(0)
    }

    fn set_flight_nonce(&self, airline: Address, nonce: u64) {
        self.nonces.write().insert(airline, nonce);
    }

    fn policy(&self, key: &FlightKey, passenger: &Address) -> Option<InsurancePolicy> {
        self.policies
            .read()
            .get(key)
            .and_then(|p| p.by_passenger.get(passenger))
            .copied()
    }

    fn put_policy(&self, key: FlightKey, policy: InsurancePolicy) {
        let mut policies = self.policies.write();
        let entry = policies.entry(key).or_default();
        if entry.by_passenger.insert(policy.passenger, policy).is_none() {
            entry.order.push(policy.passenger);
        }
    }

    fn insured_passengers(&self, key: &FlightKey) -> Vec<Address> {
        self.policies
            .read()
            .get(key)
            .map(|p| p.order.clone())
            .unwrap_or_default()
    }

    fn oracle(&self, id: &Address) -> Option<OracleRecord> {
        self.oracles.read().get(id).copied()
    }

    fn put_oracle(&self, record: OracleRecord) {
        self.oracles.write().insert(record.oracle, record);
    }

    fn oracle_count(&self) -> usize {
        self.oracles.read().len()
    }

    fn request(&self, key: &RequestKey) -> Option<OracleRequestRecord> {
        self.requests.read().get(key).cloned()
    }

    fn put_request(&self, record: OracleRequestRecord) {
        self.requests.write().insert(record.key, record);
    }

    fn pool_balance(&self) -> U256 {
        *self.pool.read()
    }

    fn set_pool_balance(&self, amount: U256) {
        *self.pool.write() = amount;
    }

    fn balance(&self, account: &Address) -> U256 {
        self.balances
            .read()
            .get(account)
            .copied()
            .unwrap_or_default()
    }

    fn set_balance(&self, account: Address, amount: U256) {
        self.balances.write().insert(account, amount);
    }
}

// =============================================================================
// TESTS
// =============================================================================
