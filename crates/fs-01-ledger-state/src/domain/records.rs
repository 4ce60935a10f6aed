//! # Ledger Records
//!
//! Plain data stored by the `LedgerStore`. Records never get deleted; state
//! only moves forward through the lifecycles below.
//!
//! ```text
//! Airline:  Candidate ──approve──→ Registered ──fund──→ Funded
//! Policy:   insured ──LateAirline──→ credited ──withdraw──→ withdrawn
//! Request:  Open ──quorum──→ Resolved(status)
//! ```

use serde::{Deserialize, Serialize};
use shared_types::{Address, AirlineState, FlightKey, FlightStatus, Timestamp, U256};
use std::collections::{BTreeMap, BTreeSet};

// =============================================================================
// AIRLINES
// =============================================================================

/// A governed airline and the votes it has collected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AirlineRecord {
    /// Airline identity.
    pub id: Address,
    /// Display name.
    pub name: String,
    /// Admission state.
    pub state: AirlineState,
    /// Distinct funded airlines that voted for this one.
    pub votes: BTreeSet<Address>,
    /// Amount paid when funding.
    pub funded_balance: U256,
}

impl AirlineRecord {
    /// A fresh candidate with no votes.
    #[must_use]
    pub fn candidate(id: Address, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            state: AirlineState::Candidate,
            votes: BTreeSet::new(),
            funded_balance: U256::zero(),
        }
    }

    /// Number of distinct votes.
    #[must_use]
    pub fn vote_count(&self) -> usize {
        self.votes.len()
    }

    /// May vote, propose and register flights.
    #[must_use]
    pub fn is_funded(&self) -> bool {
        self.state == AirlineState::Funded
    }
}

// =============================================================================
// FLIGHTS
// =============================================================================

/// Caller-supplied flight attributes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlightDetails {
    /// Flight code, e.g. `DL3893`.
    pub code: String,
    /// Origin airport.
    pub origin: String,
    /// Scheduled departure.
    pub departure: Timestamp,
    /// Destination airport.
    pub destination: String,
    /// Scheduled arrival.
    pub arrival: Timestamp,
}

/// A registered flight.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlightRecord {
    /// Operating airline.
    pub airline: Address,
    /// `flight_key(airline, nonce)`.
    pub key: FlightKey,
    /// 1-based, per airline.
    pub nonce: u64,
    /// Registered attributes.
    pub details: FlightDetails,
    /// Last reported status. `Unknown` until settled.
    pub status: FlightStatus,
    /// Set once a definitive status is applied.
    pub resolved: bool,
}

// =============================================================================
// INSURANCE
// =============================================================================

/// One passenger's policy on one flight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct InsurancePolicy {
    /// Policy holder.
    pub passenger: Address,
    /// Premium paid.
    pub amount: U256,
    /// Credited claim; zeroed again on withdrawal.
    pub payout: U256,
    /// Always true once the policy exists.
    pub insured: bool,
    /// Payout was credited.
    pub credited: bool,
    /// Payout was withdrawn.
    pub withdrawn: bool,
}

impl InsurancePolicy {
    /// A fresh, uncredited policy.
    #[must_use]
    pub fn new(passenger: Address, amount: U256) -> Self {
        Self {
            passenger,
            amount,
            payout: U256::zero(),
            insured: true,
            credited: false,
            withdrawn: false,
        }
    }

    /// Has a credited claim not yet withdrawn.
    #[must_use]
    pub fn is_withdrawable(&self) -> bool {
        self.credited && !self.withdrawn && !self.payout.is_zero()
    }
}

// =============================================================================
// ORACLES
// =============================================================================

/// A registered oracle with its immutable indexes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OracleRecord {
    /// Oracle identity.
    pub oracle: Address,
    /// Assigned at registration.
    pub indexes: [u8; 3],
}

impl OracleRecord {
    /// Shares at least one index with `request`.
    #[must_use]
    pub fn matches(&self, request: &[u8; 3]) -> bool {
        self.indexes.iter().any(|i| request.contains(i))
    }
}

/// Identity of a status request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct RequestKey {
    /// Airline whose flight is queried.
    pub airline: Address,
    /// Flight key.
    pub key: FlightKey,
    /// Caller-chosen request timestamp.
    pub timestamp: Timestamp,
}

/// Request lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RequestState {
    /// Collecting responses.
    Open,
    /// Quorum reached on this status; later responses are inert.
    Resolved(FlightStatus),
}

/// A flight-status request and its response tallies.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OracleRequestRecord {
    /// Identity.
    pub key: RequestKey,
    /// Indexes an oracle must hold one of to respond.
    pub indexes: [u8; 3],
    /// Who opened the request.
    pub requester: Address,
    /// Every oracle that has responded, whatever the status.
    pub responders: BTreeSet<Address>,
    /// Responding oracles per status.
    pub tallies: BTreeMap<FlightStatus, BTreeSet<Address>>,
    /// Lifecycle.
    pub state: RequestState,
}

impl OracleRequestRecord {
    /// A fresh open request.
    #[must_use]
    pub fn open(key: RequestKey, indexes: [u8; 3], requester: Address) -> Self {
        Self {
            key,
            indexes,
            requester,
            responders: BTreeSet::new(),
            tallies: BTreeMap::new(),
            state: RequestState::Open,
        }
    }

    /// Still collecting.
    #[must_use]
    pub fn is_open(&self) -> bool {
        self.state == RequestState::Open
    }

    /// Distinct oracles that reported `status`.
    #[must_use]
    pub fn votes_for(&self, status: FlightStatus) -> usize {
        self.tallies.get(&status).map_or(0, BTreeSet::len)
    }
}
