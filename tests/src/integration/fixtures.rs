//! # Test Fixtures
//!
//! Shared setup for the integration flows.

use fs_01_ledger_state::FlightDetails;
use node_runtime::genesis::dev_account;
use node_runtime::{FlightSuretyLedger, NodeConfig, SubsystemContainer};
use shared_bus::{SuretyEvent, Subscription};
use shared_types::{ether, Address, CallContext};
use std::future::Future;
use std::time::Duration;

/// Default scenario timeout.
pub const WAIT: Duration = Duration::from_secs(5);

/// Node with default parameters and a reproducible status policy.
pub async fn test_node() -> SubsystemContainer {
    let mut config = NodeConfig::default();
    config.oracles.status_seed = Some(7);
    node_with(config).await
}

/// Node built from `config`.
pub async fn node_with(config: NodeConfig) -> SubsystemContainer {
    SubsystemContainer::build(config)
        .await
        .expect("node should build")
}

/// Airline account outside the genesis range.
pub fn extra_airline(n: u32) -> Address {
    dev_account(100 + n)
}

/// Pay the 10 ether minimum for `airline`.
pub async fn fund(ledger: &FlightSuretyLedger, airline: Address) {
    ledger
        .fund_airline(&CallContext::with_value(airline, ether(10)))
        .await
        .expect("funding should succeed");
}

pub fn flight_details(code: &str) -> FlightDetails {
    FlightDetails {
        code: code.to_string(),
        origin: "SEA".to_string(),
        departure: 1_700_000_000,
        destination: "SFO".to_string(),
        arrival: 1_700_007_800,
    }
}

/// Poll `check` until it returns true or `WAIT` elapses.
pub async fn eventually<F, Fut>(mut check: F) -> bool
where
    F: FnMut() -> Fut,
    Fut: Future<Output = bool>,
{
    let deadline = tokio::time::Instant::now() + WAIT;
    while tokio::time::Instant::now() < deadline {
        if check().await {
            return true;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    check().await
}

/// First event on `subscription` accepted by `pick`, within `WAIT`.
pub async fn next_matching<F>(subscription: &mut Subscription, mut pick: F) -> Option<SuretyEvent>
where
    F: FnMut(&SuretyEvent) -> bool,
{
    tokio::time::timeout(WAIT, async {
        while let Some(event) = subscription.recv().await {
            if pick(&event) {
                return Some(event);
            }
        }
        None
    })
    .await
    .ok()
    .flatten()
}
