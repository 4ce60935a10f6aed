//! # Ledger Events
//!
//! Every event the ledger emits. Field names follow the external event
//! surface so off-ledger observers can rebuild state from the stream alone.

use serde::{Deserialize, Serialize};
use shared_types::{Address, FlightKey, FlightStatus, Timestamp, U256};

/// All events that can be published to the event bus.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SuretyEvent {
    // =========================================================================
    // GOVERNANCE
    // =========================================================================
    /// An airline reached Registered (bootstrap or approval).
    AirlineRegistered { airline: Address, name: String },

    /// An airline paid the funding minimum.
    AirlineFunded { airline: Address, amount: U256 },

    // =========================================================================
    // FLIGHTS
    // =========================================================================
    /// A flight was registered. `key == keccak256(airline ‖ nonce)`.
    FlightRegistered {
        airline: Address,
        key: FlightKey,
        nonce: u64,
    },

    /// Oracle quorum settled a status for a request.
    FlightStatusInfo {
        airline: Address,
        key: FlightKey,
        status: FlightStatus,
    },

    /// A flight resolved as delayed by the airline.
    FlightDelayed { airline: Address, key: FlightKey },

    // =========================================================================
    // INSURANCE
    // =========================================================================
    /// A passenger bought a policy.
    FlightInsurancePurchased {
        passenger: Address,
        airline: Address,
        key: FlightKey,
        amount: U256,
    },

    /// A policy was credited with its payout.
    InsuredPassengerPayout {
        passenger: Address,
        airline: Address,
        key: FlightKey,
        amount: U256,
    },

    /// A passenger withdrew a credited payout.
    PassengerInsuranceWithdrawal {
        passenger: Address,
        airline: Address,
        key: FlightKey,
        amount: U256,
    },

    // =========================================================================
    // ORACLES
    // =========================================================================
    /// An oracle registered and received its indexes.
    OracleRegistered { oracle: Address, indexes: [u8; 3] },

    /// A status request was opened. Oracles holding any of `indexes` answer.
    OracleRequest {
        indexes: [u8; 3],
        airline: Address,
        key: FlightKey,
        timestamp: Timestamp,
    },
}

impl SuretyEvent {
    /// Get the topic for this event (for filtering).
    #[must_use]
    pub fn topic(&self) -> EventTopic {
        match self {
            Self::AirlineRegistered { .. } | Self::AirlineFunded { .. } => EventTopic::Governance,
            Self::FlightRegistered { .. }
            | Self::FlightStatusInfo { .. }
            | Self::FlightDelayed { .. } => EventTopic::Flights,
            Self::FlightInsurancePurchased { .. }
            | Self::InsuredPassengerPayout { .. }
            | Self::PassengerInsuranceWithdrawal { .. } => EventTopic::Insurance,
            Self::OracleRegistered { .. } | Self::OracleRequest { .. } => EventTopic::Oracles,
        }
    }

    /// Event name as observers know it.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::AirlineRegistered { .. } => "AirlineRegistered",
            Self::AirlineFunded { .. } => "AirlineFunded",
            Self::FlightRegistered { .. } => "FlightRegistered",
            Self::FlightStatusInfo { .. } => "FlightStatusInfo",
            Self::FlightDelayed { .. } => "FlightDelayed",
            Self::FlightInsurancePurchased { .. } => "FlightInsurancePurchased",
            Self::InsuredPassengerPayout { .. } => "InsuredPassengerPayout",
            Self::PassengerInsuranceWithdrawal { .. } => "PassengerInsuranceWithdrawal",
            Self::OracleRegistered { .. } => "OracleRegistered",
            Self::OracleRequest { .. } => "OracleRequest",
        }
    }
}

/// Event topics for subscription filtering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventTopic {
    /// Airline admission and funding.
    Governance,
    /// Flight registration and status.
    Flights,
    /// Policy purchase, payout and withdrawal.
    Insurance,
    /// Oracle registration and status requests.
    Oracles,
    /// All events (no filtering).
    All,
}

/// Filter for subscribing to specific events.
#[derive(Debug, Clone, Default)]
pub struct EventFilter {
    /// Topics to include. Empty means all topics.
    pub topics: Vec<EventTopic>,
}

impl EventFilter {
    /// Create a filter that accepts all events.
    #[must_use]
    pub fn all() -> Self {
        Self::default()
    }

    /// Create a filter for specific topics.
    #[must_use]
    pub fn topics(topics: Vec<EventTopic>) -> Self {
        Self { topics }
    }

    /// Check if an event matches this filter.
    #[must_use]
    pub fn matches(&self, event: &SuretyEvent) -> bool {
        self.topics.is_empty()
            || self.topics.contains(&EventTopic::All)
            || self.topics.contains(&event.topic())
    }
}
