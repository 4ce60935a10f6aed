//! # Driven Ports (SPI - Outbound)
//!
//! - `IndexSource`: the injected, seedable randomness behind index
//!   assignment. No hidden global RNG.
//! - `FlightStatusResolver`: where a consensus status goes. The runtime
//!   binds it to the Insurance Engine.

use async_trait::async_trait;
use shared_types::{Address, FlightKey, FlightStatus, SuretyResult};

/// Source of index triples.
pub trait IndexSource: Send + Sync {
    /// Three distinct indexes in `0..range`.
    fn draw(&self, range: u8) -> [u8; 3];
}

/// Receives the status settled by oracle quorum.
#[async_trait]
pub trait FlightStatusResolver: Send + Sync {
    /// Apply `status` to the airline's flight.
    ///
    /// `AlreadyResolved` means another request settled the flight first and
    /// is not treated as a failure by the protocol.
    async fn resolve_flight_status(
        &self,
        airline: Address,
        key: FlightKey,
        status: FlightStatus,
    ) -> SuretyResult<()>;
}
