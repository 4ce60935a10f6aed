//! # Subsystem Wiring
//!
//! ## Initialization Order
//!
//! 1. Event bus
//! 2. Genesis accounts
//! 3. Ledger (store, gate, engines, resolver)
//! 4. Genesis state
//! 5. Oracle coordinator over the in-process ledger client

use super::config::{ConfigError, NodeConfig};
use crate::genesis::{GenesisAccounts, GenesisBuilder, GenesisConfig, GenesisError};
use crate::ledger::FlightSuretyLedger;
use fs_04_oracle_consensus::OracleConfigError;
use fs_05_oracle_coordinator::{CoordinatorConfig, OracleCoordinator, RandomStatusPolicy};
use shared_bus::InMemoryEventBus;
use std::sync::Arc;
use thiserror::Error;
use tracing::info;

/// Coordinator driving the in-process ledger.
pub type NodeCoordinator = OracleCoordinator<FlightSuretyLedger, RandomStatusPolicy>;

/// Errors while assembling the node.
#[derive(Debug, Error)]
pub enum ContainerError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Genesis(#[from] GenesisError),

    #[error(transparent)]
    Oracle(#[from] OracleConfigError),
}

/// Fully wired node.
pub struct SubsystemContainer {
    pub config: NodeConfig,
    pub accounts: GenesisAccounts,
    pub ledger: Arc<FlightSuretyLedger>,
    pub coordinator: NodeCoordinator,
}

impl SubsystemContainer {
    /// Build and bootstrap every subsystem.
    pub async fn build(config: NodeConfig) -> Result<Self, ContainerError> {
        config.validate()?;

        let bus = Arc::new(InMemoryEventBus::new());

        let accounts = GenesisBuilder::new(GenesisConfig {
            oracle_count: config.oracles.count,
            oracle_offset: config.oracles.offset,
            ..GenesisConfig::default()
        })
        .build()?;

        let ledger = Arc::new(FlightSuretyLedger::new(
            config.ledger.clone(),
            accounts.owner,
            accounts.protocol,
            bus,
        )?);
        accounts.apply(&ledger).await?;

        let policy = match config.oracles.status_seed {
            Some(seed) => RandomStatusPolicy::seeded(seed),
            None => RandomStatusPolicy::from_entropy(),
        };
        let coordinator = OracleCoordinator::new(
            CoordinatorConfig {
                accounts: accounts.oracles.clone(),
                call_timeout: config.oracles.call_timeout,
            },
            Arc::clone(&ledger),
            Arc::new(policy),
        );

        info!(
            network = %config.network.name,
            oracle_accounts = accounts.oracles.len(),
            "Subsystems initialized"
        );

        Ok(Self {
            config,
            accounts,
            ledger,
            coordinator,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_build_default_node() {
        let container = SubsystemContainer::build(NodeConfig::default()).await.unwrap();

        assert_eq!(container.accounts.oracles.len(), 30);
        assert_eq!(container.coordinator.accounts().len(), 30);
        assert!(container.ledger.is_operational().await);
        assert!(
            container
                .ledger
                .is_registered(&container.accounts.first_airline())
                .await
        );
    }

    #[tokio::test]
    async fn test_coordinator_registers_against_ledger() {
        let mut config = NodeConfig::default();
        config.oracles.count = 6;
        config.oracles.status_seed = Some(1);
        let container = SubsystemContainer::build(config).await.unwrap();

        let report = container.coordinator.register_oracles().await;

        assert_eq!(report.registered, 6);
        assert_eq!(container.ledger.oracle_count().await, 6);
        // a second pass adopts the existing registrations
        let again = container.coordinator.register_oracles().await;
        assert_eq!(again.registered, 6);
        assert_eq!(container.coordinator.oracles().len(), 6);
    }

    #[tokio::test]
    async fn test_invalid_config_rejected() {
        let mut config = NodeConfig::default();
        config.ledger.oracle.index_range = 2;
        assert!(matches!(
            SubsystemContainer::build(config).await,
            Err(ContainerError::Config(_))
        ));
    }

    #[tokio::test]
    async fn test_oracle_offset_overflow_is_config_error() {
        let config = NodeConfig::from_lookup(|key| {
            (key == "FS_ORACLE_OFFSET").then(|| "4294967290".to_string())
        })
        .unwrap();

        assert!(matches!(
            SubsystemContainer::build(config).await,
            Err(ContainerError::Genesis(GenesisError::InvalidConfig(_)))
        ));
    }
}
