//! # Node Configuration
//!
//! Unified configuration for the ledger engines, the oracle coordinator and
//! the HTTP trigger.
//!
//! Values are read once at startup: defaults first, then `FS_*` environment
//! overrides.
//!
//! | Variable | Field |
//! |----------|-------|
//! | `FS_NETWORK` | `network.name` |
//! | `FS_CONTRACT_ADDRESS` | `network.contract_address` (hex) |
//! | `FS_HTTP_HOST` / `FS_HTTP_PORT` | HTTP trigger bind address |
//! | `FS_MIN_FUNDING_WEI` | airline funding minimum |
//! | `FS_MAX_PREMIUM_WEI` | premium cap |
//! | `FS_PAYOUT_BPS` | payout multiplier (basis points) |
//! | `FS_ORACLE_FEE_WEI` | oracle registration fee |
//! | `FS_MIN_RESPONSES` | oracle quorum |
//! | `FS_INDEX_SEED` | oracle index source seed |
//! | `FS_ORACLE_COUNT` / `FS_ORACLE_OFFSET` | local oracle accounts |
//! | `FS_STATUS_SEED` | seed of the random status policy |

use crate::ledger::LedgerConfig;
use shared_types::{parse_address, to_hex, Address, U256};
use std::str::FromStr;
use std::time::Duration;
use thiserror::Error;

/// Complete node configuration.
#[derive(Debug, Clone, Default)]
pub struct NodeConfig {
    /// Network and HTTP configuration.
    pub network: NetworkConfig,
    /// Engine parameters.
    pub ledger: LedgerConfig,
    /// Local oracle accounts.
    pub oracles: OracleAccountsConfig,
}

/// Configuration errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// An override could not be parsed.
    #[error("invalid value for {key}: {value:?}")]
    InvalidValue { key: &'static str, value: String },

    /// Oracle protocol parameters are unusable.
    #[error("invalid oracle configuration: {0}")]
    Oracle(#[from] fs_04_oracle_consensus::OracleConfigError),

    /// A zero multiplier would credit nothing.
    #[error("payout multiplier must be positive")]
    ZeroPayoutMultiplier,

    /// The HTTP trigger needs a port.
    #[error("http port must not be 0")]
    ZeroHttpPort,
}

/// Network configuration.
#[derive(Debug, Clone)]
pub struct NetworkConfig {
    /// Network label used in logs.
    pub name: String,
    /// Deployed ledger address, if fronting a remote deployment.
    pub contract_address: Option<Address>,
    /// HTTP trigger bind host.
    pub http_host: String,
    /// HTTP trigger port.
    pub http_port: u16,
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            name: "localhost".to_string(),
            contract_address: None,
            http_host: "0.0.0.0".to_string(),
            http_port: 3000,
        }
    }
}

impl NetworkConfig {
    /// Ledger the node reports at startup: the configured contract address,
    /// or `in-process` when none is set.
    #[must_use]
    pub fn ledger_label(&self) -> String {
        self.contract_address
            .map_or_else(|| "in-process".to_string(), |address| to_hex(&address))
    }
}

/// Oracle accounts driven by the local coordinator.
#[derive(Debug, Clone)]
pub struct OracleAccountsConfig {
    /// Number of oracle accounts.
    pub count: u32,
    /// Index of the first oracle among the development accounts.
    pub offset: u32,
    /// Seed for the status policy; `None` uses OS entropy.
    pub status_seed: Option<u64>,
    /// Upper bound on one coordinator ledger call.
    pub call_timeout: Duration,
}

impl Default for OracleAccountsConfig {
    fn default() -> Self {
        Self {
            count: 30,
            offset: 10,
            status_seed: None,
            call_timeout: Duration::from_secs(5),
        }
    }
}

impl NodeConfig {
    /// Defaults overridden by the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Defaults overridden by whatever `lookup` returns per variable.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(name) = lookup("FS_NETWORK") {
            config.network.name = name;
        }
        if let Some(raw) = lookup("FS_CONTRACT_ADDRESS") {
            let address = parse_address(&raw).map_err(|_| ConfigError::InvalidValue {
                key: "FS_CONTRACT_ADDRESS",
                value: raw.clone(),
            })?;
            config.network.contract_address = Some(address);
        }
        if let Some(host) = lookup("FS_HTTP_HOST") {
            config.network.http_host = host;
        }
        override_parsed(&lookup, "FS_HTTP_PORT", &mut config.network.http_port)?;

        override_wei(
            &lookup,
            "FS_MIN_FUNDING_WEI",
            &mut config.ledger.governance.min_funding,
        )?;
        override_wei(
            &lookup,
            "FS_MAX_PREMIUM_WEI",
            &mut config.ledger.insurance.max_premium,
        )?;
        override_parsed(
            &lookup,
            "FS_PAYOUT_BPS",
            &mut config.ledger.insurance.payout_multiplier_bps,
        )?;
        override_wei(
            &lookup,
            "FS_ORACLE_FEE_WEI",
            &mut config.ledger.oracle.registration_fee,
        )?;
        override_parsed(
            &lookup,
            "FS_MIN_RESPONSES",
            &mut config.ledger.oracle.min_responses,
        )?;
        override_parsed(&lookup, "FS_INDEX_SEED", &mut config.ledger.index_seed)?;

        override_parsed(&lookup, "FS_ORACLE_COUNT", &mut config.oracles.count)?;
        override_parsed(&lookup, "FS_ORACLE_OFFSET", &mut config.oracles.offset)?;
        if let Some(raw) = lookup("FS_STATUS_SEED") {
            let seed = raw.parse().map_err(|_| ConfigError::InvalidValue {
                key: "FS_STATUS_SEED",
                value: raw.clone(),
            })?;
            config.oracles.status_seed = Some(seed);
        }

        Ok(config)
    }

    /// Reject configurations the node cannot run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.ledger.oracle.validate()?;
        if self.ledger.insurance.payout_multiplier_bps == 0 {
            return Err(ConfigError::ZeroPayoutMultiplier);
        }
        if self.network.http_port == 0 {
            return Err(ConfigError::ZeroHttpPort);
        }
        Ok(())
    }

    /// `host:port` of the HTTP trigger.
    pub fn http_addr(&self) -> String {
        format!("{}:{}", self.network.http_host, self.network.http_port)
    }
}

fn override_parsed<F, T>(lookup: &F, key: &'static str, target: &mut T) -> Result<(), ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    if let Some(raw) = lookup(key) {
        *target = raw
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidValue { key, value: raw.clone() })?;
    }
    Ok(())
}

fn override_wei<F>(lookup: &F, key: &'static str, target: &mut U256) -> Result<(), ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(raw) = lookup(key) {
        *target = U256::from_dec_str(raw.trim())
            .map_err(|_| ConfigError::InvalidValue { key, value: raw.clone() })?;
    }
    Ok(())
}
