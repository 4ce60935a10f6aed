//! # Status Policies
//!
//! There is no real flight data feed. `RandomStatusPolicy` picks one of the
//! first five codes uniformly; `FixedStatusPolicy` always reports the same
//! status.

use crate::ports::outbound::StatusPolicy;
use parking_lot::Mutex;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use shared_types::{Address, FlightKey, FlightStatus};

/// Codes the random policy chooses from (`Unknown` through `LateTechnical`).
const RANDOM_CHOICES: [FlightStatus; 5] = [
    FlightStatus::Unknown,
    FlightStatus::OnTime,
    FlightStatus::LateAirline,
    FlightStatus::LateWeather,
    FlightStatus::LateTechnical,
];

/// Uniformly random status per submission.
pub struct RandomStatusPolicy {
    rng: Mutex<StdRng>,
}

impl RandomStatusPolicy {
    /// Reproducible policy for `seed`.
    #[must_use]
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }

    /// Policy seeded from OS entropy.
    #[must_use]
    pub fn from_entropy() -> Self {
        Self {
            rng: Mutex::new(StdRng::from_entropy()),
        }
    }
}

impl StatusPolicy for RandomStatusPolicy {
    fn status_for(&self, _oracle: &Address, _airline: &Address, _key: &FlightKey) -> FlightStatus {
        let pick = self.rng.lock().gen_range(0..RANDOM_CHOICES.len());
        RANDOM_CHOICES[pick]
    }
}

/// Every oracle reports the same status.
#[derive(Debug, Clone, Copy)]
pub struct FixedStatusPolicy(pub FlightStatus);

impl StatusPolicy for FixedStatusPolicy {
    fn status_for(&self, _oracle: &Address, _airline: &Address, _key: &FlightKey) -> FlightStatus {
        self.0
    }
}
