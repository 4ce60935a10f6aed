//! # Subsystem Container
//!
//! Central container holding the ledger, the genesis accounts and the
//! oracle coordinator, built in dependency order from one `NodeConfig`.

pub mod config;
pub mod subsystems;

pub use config::{ConfigError, NetworkConfig, NodeConfig, OracleAccountsConfig};
pub use subsystems::{ContainerError, NodeCoordinator, SubsystemContainer};
