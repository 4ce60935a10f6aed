//! # Driven Ports (SPI - Outbound)
//!
//! `LedgerStore` is the mapping-based state interface injected into the
//! Governance, Insurance and Oracle engines. There is no ambient global
//! state: each engine takes a store handle at construction.
//!
//! Writes are infallible. Engines check every precondition against reads
//! first and only then issue writes, so a rejected call never leaves a
//! partial mutation behind.

use crate::domain::records::{
    AirlineRecord, FlightRecord, InsurancePolicy, OracleRecord, OracleRequestRecord, RequestKey,
};
use shared_types::{Address, FlightKey, U256};

/// Mapping-based ledger state.
pub trait LedgerStore: Send + Sync {
    // =========================================================================
    // ACCESS
    // =========================================================================

    /// Deployer identity. Fixed at construction.
    fn owner(&self) -> Address;

    /// Operational flag.
    fn is_operational(&self) -> bool;

    /// Set the operational flag.
    fn set_operational(&self, operational: bool);

    /// Caller is allowed on internal entry points.
    fn is_authorized_caller(&self, caller: &Address) -> bool;

    /// Grant or revoke internal access.
    fn set_authorized_caller(&self, caller: Address, authorized: bool);

    // =========================================================================
    // AIRLINES
    // =========================================================================

    /// Airline record, any state.
    fn airline(&self, id: &Address) -> Option<AirlineRecord>;

    /// Insert or replace an airline record.
    fn put_airline(&self, record: AirlineRecord);

    /// Number of airline records in any state.
    fn airline_count(&self) -> usize;

    /// Airlines in Registered or Funded state.
    fn registered_airline_count(&self) -> usize;

    // =========================================================================
    // FLIGHTS
    // =========================================================================

    /// Flight by key.
    fn flight(&self, key: &FlightKey) -> Option<FlightRecord>;

    /// Insert or replace a flight.
    fn put_flight(&self, record: FlightRecord);

    /// Nonce of the airline's most recent flight, 0 if none.
    fn flight_nonce(&self, airline: &Address) -> u64;

    /// Record the airline's most recent flight nonce.
    fn set_flight_nonce(&self, airline: Address, nonce: u64);

    // =========================================================================
    // INSURANCE
    // =========================================================================

    /// Policy for (flight, passenger).
    fn policy(&self, key: &FlightKey, passenger: &Address) -> Option<InsurancePolicy>;

    /// Insert or replace a policy. A new passenger is appended to the
    /// flight's insured list.
    fn put_policy(&self, key: FlightKey, policy: InsurancePolicy);

    /// Insured passengers in purchase order.
    fn insured_passengers(&self, key: &FlightKey) -> Vec<Address>;

    // =========================================================================
    // ORACLES
    // =========================================================================

    /// Registered oracle.
    fn oracle(&self, id: &Address) -> Option<OracleRecord>;

    /// Insert an oracle.
    fn put_oracle(&self, record: OracleRecord);

    /// Number of registered oracles.
    fn oracle_count(&self) -> usize;

    /// Status request.
    fn request(&self, key: &RequestKey) -> Option<OracleRequestRecord>;

    /// Insert or replace a request.
    fn put_request(&self, record: OracleRequestRecord);

    // =========================================================================
    // BALANCES
    // =========================================================================

    /// Pooled contract balance (funding, premiums, fees).
    fn pool_balance(&self) -> U256;

    /// Overwrite the pooled balance.
    fn set_pool_balance(&self, amount: U256);

    /// Withdrawn payouts held for an account.
    fn balance(&self, account: &Address) -> U256;

    /// Overwrite an account balance.
    fn set_balance(&self, account: Address, amount: U256);
}
