//! # Oracle Coordinator Service
//!
//! Owns the local oracle accounts, registers them with the ledger and fans
//! out responses to every `OracleRequest` event.

use crate::domain::registry::{LocalOracle, OracleRegistry};
use crate::domain::reports::{RegistrationReport, RequestReport};
use crate::ports::outbound::{CoordinatorError, LedgerClient, StatusPolicy, SubmissionAck};
use shared_bus::{SuretyEvent, Subscription};
use shared_types::{short_hex, Address, FlightKey, SuretyError, Timestamp};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};
use uuid::Uuid;

// =============================================================================
// CONFIGURATION
// =============================================================================

/// Coordinator configuration.
#[derive(Debug, Clone)]
pub struct CoordinatorConfig {
    /// Oracle accounts this coordinator controls.
    pub accounts: Vec<Address>,
    /// Upper bound on a single ledger call.
    pub call_timeout: Duration,
}

impl CoordinatorConfig {
    #[must_use]
    pub fn new(accounts: Vec<Address>) -> Self {
        Self {
            accounts,
            ..Self::default()
        }
    }
}

impl Default for CoordinatorConfig {
    fn default() -> Self {
        Self {
            accounts: Vec::new(),
            call_timeout: Duration::from_secs(5),
        }
    }
}

// =============================================================================
// SERVICE
// =============================================================================

/// Off-ledger oracle worker pool.
pub struct OracleCoordinator<L: LedgerClient, P: StatusPolicy> {
    config: Arc<CoordinatorConfig>,
    ledger: Arc<L>,
    policy: Arc<P>,
    registry: Arc<OracleRegistry>,
}

impl<L: LedgerClient, P: StatusPolicy> Clone for OracleCoordinator<L, P> {
    fn clone(&self) -> Self {
        Self {
            config: Arc::clone(&self.config),
            ledger: Arc::clone(&self.ledger),
            policy: Arc::clone(&self.policy),
            registry: Arc::clone(&self.registry),
        }
    }
}

impl<L, P> OracleCoordinator<L, P>
where
    L: LedgerClient + 'static,
    P: StatusPolicy + 'static,
{
    /// Create a coordinator. Nothing is registered until `register_oracles`.
    pub fn new(config: CoordinatorConfig, ledger: Arc<L>, policy: Arc<P>) -> Self {
        Self {
            config: Arc::new(config),
            ledger,
            policy,
            registry: Arc::new(OracleRegistry::new()),
        }
    }

    /// Locally known oracles.
    #[must_use]
    pub fn oracles(&self) -> Vec<LocalOracle> {
        self.registry.snapshot()
    }

    /// Configured oracle accounts.
    #[must_use]
    pub fn accounts(&self) -> &[Address] {
        &self.config.accounts
    }

    async fn bounded<T, F>(&self, call: F) -> Result<T, CoordinatorError>
    where
        F: std::future::Future<Output = Result<T, CoordinatorError>>,
    {
        match tokio::time::timeout(self.config.call_timeout, call).await {
            Ok(result) => result,
            Err(_) => Err(CoordinatorError::Transport("ledger call timed out".into())),
        }
    }

    /// Register every configured account, one task per account.
    ///
    /// An account the ledger already knows adopts its existing indexes.
    /// Other failures are logged and that account is skipped.
    pub async fn register_oracles(&self) -> RegistrationReport {
        let fee = match self.bounded(self.ledger.registration_fee()).await {
            Ok(fee) => fee,
            Err(e) => {
                warn!(error = %e, "[fs-05] Could not read registration fee");
                return RegistrationReport {
                    registered: 0,
                    failed: self.config.accounts.len(),
                };
            }
        };

        info!(
            accounts = self.config.accounts.len(),
            %fee,
            "[fs-05] Registering oracles"
        );

        let handles: Vec<_> = self
            .config
            .accounts
            .iter()
            .copied()
            .map(|account| {
                let this = self.clone();
                tokio::spawn(async move { this.register_one(account, fee).await })
            })
            .collect();

        let mut report = RegistrationReport::default();
        for handle in handles {
            match handle.await {
                Ok(true) => report.registered += 1,
                Ok(false) => report.failed += 1,
                Err(e) => {
                    warn!(error = %e, "[fs-05] Registration task aborted");
                    report.failed += 1;
                }
            }
        }

        info!(
            registered = report.registered,
            failed = report.failed,
            "[fs-05] Oracle registration finished"
        );
        report
    }

    async fn register_one(&self, account: Address, fee: shared_types::U256) -> bool {
        let indexes = match self.bounded(self.ledger.register_oracle(account, fee)).await {
            Ok(indexes) => indexes,
            Err(e) if e.is_rejection(SuretyError::AlreadyExists) => {
                match self.bounded(self.ledger.get_my_indexes(account)).await {
                    Ok(indexes) => {
                        debug!(oracle = %short_hex(&account), "[fs-05] Oracle already registered");
                        indexes
                    }
                    Err(e) => {
                        warn!(oracle = %short_hex(&account), error = %e, "[fs-05] Could not read indexes");
                        return false;
                    }
                }
            }
            Err(e) => {
                warn!(oracle = %short_hex(&account), error = %e, "[fs-05] Oracle registration failed");
                return false;
            }
        };

        info!(
            oracle = %short_hex(&account),
            ?indexes,
            "[fs-05] Oracle Registered"
        );
        self.registry.insert(LocalOracle {
            address: account,
            indexes,
        });
        true
    }

    /// Submit a response from every local oracle matching `indexes`.
    ///
    /// Submissions run concurrently; rejections are logged and counted.
    pub async fn handle_request(
        &self,
        indexes: [u8; 3],
        airline: Address,
        key: FlightKey,
        timestamp: Timestamp,
    ) -> RequestReport {
        let correlation_id = Uuid::new_v4();
        let matched = self.registry.matching(&indexes);

        info!(
            %correlation_id,
            ?indexes,
            flight = %short_hex(&key),
            timestamp,
            matched = matched.len(),
            "[fs-05] Oracle request received"
        );

        let handles: Vec<_> = matched
            .iter()
            .map(|oracle| {
                let this = self.clone();
                let oracle = oracle.address;
                tokio::spawn(async move {
                    let status = this.policy.status_for(&oracle, &airline, &key);
                    let result = this
                        .bounded(this.ledger.submit_oracle_response(
                            oracle, airline, key, timestamp, status,
                        ))
                        .await;
                    (oracle, status, result)
                })
            })
            .collect();

        let mut report = RequestReport {
            matched: matched.len(),
            ..RequestReport::default()
        };
        for handle in handles {
            match handle.await {
                Ok((oracle, status, Ok(ack))) => {
                    report.accepted += 1;
                    match ack {
                        SubmissionAck::Resolved => info!(
                            %correlation_id,
                            oracle = %short_hex(&oracle),
                            %status,
                            "[fs-05] Response completed quorum"
                        ),
                        SubmissionAck::Counted { votes } => debug!(
                            %correlation_id,
                            oracle = %short_hex(&oracle),
                            %status,
                            votes,
                            "[fs-05] Response counted"
                        ),
                        SubmissionAck::Inert => debug!(
                            %correlation_id,
                            oracle = %short_hex(&oracle),
                            "[fs-05] Response after resolution"
                        ),
                    }
                }
                Ok((oracle, status, Err(e))) => {
                    report.rejected += 1;
                    warn!(
                        %correlation_id,
                        oracle = %short_hex(&oracle),
                        %status,
                        error = %e,
                        "[fs-05] Response rejected"
                    );
                }
                Err(e) => {
                    report.rejected += 1;
                    warn!(%correlation_id, error = %e, "[fs-05] Submission task aborted");
                }
            }
        }
        report
    }

    /// Consume `OracleRequest` events until the bus closes.
    ///
    /// Each request is handled in its own task so a slow fan-out never holds
    /// up the next event.
    pub async fn run(self, mut subscription: Subscription) {
        info!("[fs-05] Oracle coordinator started");

        while let Some(event) = subscription.recv().await {
            if let SuretyEvent::OracleRequest {
                indexes,
                airline,
                key,
                timestamp,
            } = event
            {
                let this = self.clone();
                tokio::spawn(async move {
                    this.handle_request(indexes, airline, key, timestamp).await;
                });
            }
        }

        info!("[fs-05] Event bus closed, coordinator stopping");
    }
}

// =============================================================================
// TESTS
// =============================================================================
