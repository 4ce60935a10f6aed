//! # Core Domain Entities
//!
//! Ledger primitives shared by every subsystem.
//!
//! ## Clusters
//!
//! - **Identity**: `Address`, `Hash`, `FlightKey`
//! - **Money**: `U256` amounts in wei, `ETHER`
//! - **Lifecycle**: `AirlineState`, `FlightStatus`

use crate::errors::SuretyError;
use serde::{Deserialize, Serialize};
use std::fmt;

// Re-export U256 from primitive-types for use across all subsystems
pub use primitive_types::U256;

// =============================================================================
// IDENTITY
// =============================================================================

/// A 32-byte Keccak-256 hash.
pub type Hash = [u8; 32];

/// A 20-byte Ethereum-style address.
pub type Address = [u8; 20];

/// Composite flight identifier: `keccak256(airline ‖ nonce)`.
pub type FlightKey = Hash;

/// Unix timestamp in seconds.
pub type Timestamp = u64;

/// Zero address, never a valid participant.
pub const ZERO_ADDRESS: Address = [0u8; 20];

// =============================================================================
// MONEY
// =============================================================================

/// Wei per native currency unit.
pub const WEI_PER_ETHER: u64 = 1_000_000_000_000_000_000;

/// `n` whole native currency units in wei.
#[must_use]
pub fn ether(n: u64) -> U256 {
    U256::from(n) * U256::from(WEI_PER_ETHER)
}

/// `n` thousandths of a native currency unit in wei.
#[must_use]
pub fn milli_ether(n: u64) -> U256 {
    U256::from(n) * U256::from(WEI_PER_ETHER / 1_000)
}

// =============================================================================
// LIFECYCLE
// =============================================================================

/// Airline admission state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum AirlineState {
    /// No record exists.
    #[default]
    Unregistered,
    /// Proposed, collecting votes.
    Candidate,
    /// Approved by governance, not yet funded.
    Registered,
    /// Paid the funding minimum. May vote, propose and register flights.
    Funded,
}

impl AirlineState {
    /// Registered or Funded.
    #[must_use]
    pub fn is_registered(self) -> bool {
        matches!(self, Self::Registered | Self::Funded)
    }
}

/// Flight status codes reported by oracles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default)]
#[repr(u8)]
pub enum FlightStatus {
    #[default]
    Unknown = 0,
    OnTime = 10,
    LateAirline = 20,
    LateWeather = 30,
    LateTechnical = 40,
    LateOther = 50,
}

impl FlightStatus {
    /// Every defined code, ascending.
    pub const ALL: [FlightStatus; 6] = [
        Self::Unknown,
        Self::OnTime,
        Self::LateAirline,
        Self::LateWeather,
        Self::LateTechnical,
        Self::LateOther,
    ];

    /// Numeric status code.
    #[must_use]
    pub fn code(self) -> u8 {
        self as u8
    }

    /// Only an airline-caused delay triggers payouts.
    #[must_use]
    pub fn pays_out(self) -> bool {
        self == Self::LateAirline
    }
}

impl TryFrom<u8> for FlightStatus {
    type Error = SuretyError;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        Self::ALL
            .into_iter()
            .find(|s| s.code() == code)
            .ok_or(SuretyError::InvalidStatusCode(code))
    }
}

impl fmt::Display for FlightStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}({})", self, self.code())
    }
}

// =============================================================================
// ENCODING HELPERS
// =============================================================================

/// `0x`-prefixed lowercase hex of any byte string.
#[must_use]
pub fn to_hex(bytes: &[u8]) -> String {
    format!("0x{}", hex::encode(bytes))
}

/// First four bytes as hex, for log fields.
#[must_use]
pub fn short_hex(bytes: &[u8]) -> String {
    let end = bytes.len().min(4);
    format!("0x{}…", hex::encode(&bytes[..end]))
}

/// Parse a `0x`-prefixed (or bare) 20-byte hex address.
pub fn parse_address(s: &str) -> Result<Address, hex::FromHexError> {
    let mut out = ZERO_ADDRESS;
    hex::decode_to_slice(s.trim_start_matches("0x"), &mut out)?;
    Ok(out)
}
