//! # Genesis Builder
//!
//! Derives the development accounts and writes the initial ledger state.

use crate::ledger::FlightSuretyLedger;
use fs_01_ledger_state::keccak256;
use shared_types::{to_hex, Address, CallContext, SuretyError};
use thiserror::Error;
use tracing::info;

const ACCOUNT_LABEL: &[u8] = b"flightsurety.account";
const PROTOCOL_LABEL: &[u8] = b"flightsurety.protocol";

/// Genesis errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum GenesisError {
    /// Invalid genesis configuration.
    #[error("Invalid genesis configuration: {0}")]
    InvalidConfig(String),

    /// The ledger refused a genesis call.
    #[error("Genesis call rejected: {0}")]
    Rejected(#[from] SuretyError),
}

/// Genesis configuration.
#[derive(Debug, Clone)]
pub struct GenesisConfig {
    /// Name of the bootstrapped airline.
    pub first_airline_name: String,
    /// Airline accounts, starting at index 1.
    pub airline_count: u32,
    /// Passenger accounts, right after the airlines.
    pub passenger_count: u32,
    /// Oracle accounts.
    pub oracle_count: u32,
    /// Index of the first oracle account.
    pub oracle_offset: u32,
}

impl Default for GenesisConfig {
    fn default() -> Self {
        Self {
            first_airline_name: "FlightSurety Airline".to_string(),
            airline_count: 5,
            passenger_count: 4,
            oracle_count: 30,
            oracle_offset: 10,
        }
    }
}

impl GenesisConfig {
    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), GenesisError> {
        self.account_bounds().map(|_| ())
    }

    /// End (exclusive) of the airline, passenger and oracle index ranges.
    fn account_bounds(&self) -> Result<(u32, u32, u32), GenesisError> {
        if self.airline_count == 0 {
            return Err(GenesisError::InvalidConfig(
                "At least one airline account is required".to_string(),
            ));
        }
        let airlines_end = self.airline_count.checked_add(1);
        let passengers_end = airlines_end.and_then(|end| end.checked_add(self.passenger_count));
        let Some(reserved) = passengers_end else {
            return Err(GenesisError::InvalidConfig(format!(
                "{} airlines and {} passengers exceed the account index space",
                self.airline_count, self.passenger_count
            )));
        };
        if self.oracle_offset < reserved {
            return Err(GenesisError::InvalidConfig(format!(
                "Oracle accounts start at {} but indexes below {} are taken",
                self.oracle_offset, reserved
            )));
        }
        let Some(oracles_end) = self.oracle_offset.checked_add(self.oracle_count) else {
            return Err(GenesisError::InvalidConfig(format!(
                "{} oracles from offset {} exceed the account index space",
                self.oracle_count, self.oracle_offset
            )));
        };
        Ok((1 + self.airline_count, reserved, oracles_end))
    }
}

/// Development account `index`: last 20 bytes of `keccak256(label ‖ index)`.
pub fn dev_account(index: u32) -> Address {
    derive(ACCOUNT_LABEL, index)
}

fn derive(label: &[u8], index: u32) -> Address {
    let mut preimage = label.to_vec();
    preimage.extend_from_slice(&index.to_be_bytes());
    let hash = keccak256(&preimage);
    let mut address = [0u8; 20];
    address.copy_from_slice(&hash[12..32]);
    address
}

/// Every account known at genesis.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenesisAccounts {
    pub owner: Address,
    pub protocol: Address,
    pub airlines: Vec<Address>,
    pub passengers: Vec<Address>,
    pub oracles: Vec<Address>,
    pub first_airline_name: String,
}

impl GenesisAccounts {
    /// The airline bootstrapped at genesis.
    pub fn first_airline(&self) -> Address {
        self.airlines[0]
    }

    /// Write the initial state: authorize the protocol principal and
    /// bootstrap the first airline.
    pub async fn apply(&self, ledger: &FlightSuretyLedger) -> Result<(), GenesisError> {
        let owner = CallContext::new(self.owner);
        ledger.authorize_caller(&owner, self.protocol).await?;
        ledger
            .bootstrap_airline(&owner, self.first_airline(), self.first_airline_name.clone())
            .await?;

        info!(
            owner = %to_hex(&self.owner),
            first_airline = %to_hex(&self.first_airline()),
            oracles = self.oracles.len(),
            "Genesis applied"
        );
        Ok(())
    }
}

/// Builder for genesis accounts.
pub struct GenesisBuilder {
    config: GenesisConfig,
}

impl GenesisBuilder {
    /// Create a new genesis builder with configuration.
    pub fn new(config: GenesisConfig) -> Self {
        Self { config }
    }

    /// Derive the genesis accounts.
    pub fn build(self) -> Result<GenesisAccounts, GenesisError> {
        let (airlines_end, passengers_end, oracles_end) = self.config.account_bounds()?;

        Ok(GenesisAccounts {
            owner: dev_account(0),
            protocol: derive(PROTOCOL_LABEL, 0),
            airlines: (1..airlines_end).map(dev_account).collect(),
            passengers: (airlines_end..passengers_end).map(dev_account).collect(),
            oracles: (self.config.oracle_offset..oracles_end)
                .map(dev_account)
                .collect(),
            first_airline_name: self.config.first_airline_name,
        })
    }
}
