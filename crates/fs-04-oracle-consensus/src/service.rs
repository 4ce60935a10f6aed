//! Oracle Service - registration, requests, quorum
//!
//! Request records are tallied on a copy and written back only after the
//! resolver (if quorum was reached) accepted the status.

use crate::domain::tally::{record_response, TallyOutcome};
use crate::ports::inbound::{OracleApi, ResponseOutcome};
use crate::ports::outbound::{FlightStatusResolver, IndexSource};
use async_trait::async_trait;
use fs_01_ledger_state::{
    AccessGate, LedgerStore, OracleRecord, OracleRequestRecord, RequestKey, RequestState,
};
use shared_bus::{EventPublisher, SuretyEvent};
use shared_types::{
    ether, short_hex, Address, CallContext, FlightKey, FlightStatus, SuretyError, SuretyResult,
    Timestamp, U256,
};
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Invalid oracle configuration.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum OracleConfigError {
    /// Fewer than three index values cannot yield three distinct indexes.
    #[error("index_range must be at least 3, got {0}")]
    IndexRangeTooSmall(u8),
    /// Quorum of zero would resolve on nothing.
    #[error("min_responses must be at least 1")]
    ZeroQuorum,
}

/// Oracle protocol configuration
#[derive(Clone, Debug)]
pub struct OracleConfig {
    /// Fee to register an oracle (wei)
    pub registration_fee: U256,
    /// Indexes are drawn from `0..index_range`
    pub index_range: u8,
    /// Distinct matching answers on one status needed to resolve
    pub min_responses: usize,
}

impl Default for OracleConfig {
    fn default() -> Self {
        Self {
            registration_fee: ether(1),
            index_range: 10,
            min_responses: 3,
        }
    }
}

impl OracleConfig {
    /// Reject configurations the protocol cannot run with.
    pub fn validate(&self) -> Result<(), OracleConfigError> {
        if self.index_range < 3 {
            return Err(OracleConfigError::IndexRangeTooSmall(self.index_range));
        }
        if self.min_responses == 0 {
            return Err(OracleConfigError::ZeroQuorum);
        }
        Ok(())
    }
}

/// Oracle Service implementation
pub struct OracleService<S, P, I, R>
where
    S: LedgerStore,
    P: EventPublisher,
    I: IndexSource,
    R: FlightStatusResolver,
{
    config: OracleConfig,
    store: Arc<S>,
    gate: AccessGate<S>,
    bus: Arc<P>,
    indexes: Arc<I>,
    resolver: Arc<R>,
}

impl<S, P, I, R> OracleService<S, P, I, R>
where
    S: LedgerStore,
    P: EventPublisher,
    I: IndexSource,
    R: FlightStatusResolver,
{
    /// Create a new oracle service
    pub fn new(
        config: OracleConfig,
        store: Arc<S>,
        bus: Arc<P>,
        indexes: Arc<I>,
        resolver: Arc<R>,
    ) -> Self {
        let gate = AccessGate::new(Arc::clone(&store));
        Self {
            config,
            store,
            gate,
            bus,
            indexes,
            resolver,
        }
    }

    /// Active configuration
    pub fn config(&self) -> &OracleConfig {
        &self.config
    }

    /// Number of registered oracles
    pub fn oracle_count(&self) -> usize {
        self.store.oracle_count()
    }
}

#[async_trait]
impl<S, P, I, R> OracleApi for OracleService<S, P, I, R>
where
    S: LedgerStore + 'static,
    P: EventPublisher + 'static,
    I: IndexSource + 'static,
    R: FlightStatusResolver + 'static,
{
    async fn register_oracle(&self, ctx: &CallContext) -> SuretyResult<[u8; 3]> {
        self.gate.ensure_operational()?;
        if ctx.value < self.config.registration_fee {
            return Err(SuretyError::InsufficientFunds);
        }
        if self.store.oracle(&ctx.caller).is_some() {
            return Err(SuretyError::AlreadyExists);
        }

        let indexes = self.indexes.draw(self.config.index_range);
        self.store.put_oracle(OracleRecord {
            oracle: ctx.caller,
            indexes,
        });
        self.store
            .set_pool_balance(self.store.pool_balance().saturating_add(ctx.value));

        info!(oracle = %short_hex(&ctx.caller), ?indexes, "Oracle registered");
        self.bus
            .publish(SuretyEvent::OracleRegistered {
                oracle: ctx.caller,
                indexes,
            })
            .await;
        Ok(indexes)
    }

    fn get_my_indexes(&self, oracle: &Address) -> SuretyResult<[u8; 3]> {
        self.store
            .oracle(oracle)
            .map(|o| o.indexes)
            .ok_or(SuretyError::OracleNotRegistered)
    }

    async fn fetch_flight_status(
        &self,
        ctx: &CallContext,
        airline: Address,
        key: FlightKey,
        timestamp: Timestamp,
    ) -> SuretyResult<[u8; 3]> {
        self.gate.ensure_operational()?;
        if !self
            .store
            .flight(&key)
            .is_some_and(|f| f.airline == airline)
        {
            return Err(SuretyError::UnknownFlight);
        }
        let request_key = RequestKey {
            airline,
            key,
            timestamp,
        };
        if self.store.request(&request_key).is_some() {
            return Err(SuretyError::AlreadyExists);
        }

        let indexes = self.indexes.draw(self.config.index_range);
        self.store
            .put_request(OracleRequestRecord::open(request_key, indexes, ctx.caller));

        info!(
            airline = %short_hex(&airline),
            key = %short_hex(&key),
            timestamp,
            ?indexes,
            "Flight status requested"
        );
        self.bus
            .publish(SuretyEvent::OracleRequest {
                indexes,
                airline,
                key,
                timestamp,
            })
            .await;
        Ok(indexes)
    }

    async fn submit_oracle_response(
        &self,
        ctx: &CallContext,
        airline: Address,
        key: FlightKey,
        timestamp: Timestamp,
        status: FlightStatus,
    ) -> SuretyResult<ResponseOutcome> {
        self.gate.ensure_operational()?;
        let oracle = self
            .store
            .oracle(&ctx.caller)
            .ok_or(SuretyError::OracleNotRegistered)?;
        let request_key = RequestKey {
            airline,
            key,
            timestamp,
        };
        let mut request = self
            .store
            .request(&request_key)
            .ok_or(SuretyError::UnknownRequest)?;

        if !request.is_open() {
            debug!(
                oracle = %short_hex(&oracle.oracle),
                key = %short_hex(&key),
                "Late response ignored"
            );
            return Ok(ResponseOutcome::Inert);
        }

        let outcome = record_response(&mut request, &oracle, status, self.config.min_responses)?;
        let (status, votes) = match outcome {
            TallyOutcome::Counted { status, votes } => {
                self.store.put_request(request);
                debug!(
                    oracle = %short_hex(&oracle.oracle),
                    key = %short_hex(&key),
                    %status,
                    votes,
                    "Oracle response counted"
                );
                return Ok(ResponseOutcome::Counted { status, votes });
            }
            TallyOutcome::QuorumReached { status, votes } => (status, votes),
        };

        match self
            .resolver
            .resolve_flight_status(airline, key, status)
            .await
        {
            Ok(()) => {}
            Err(SuretyError::AlreadyResolved) => {
                debug!(key = %short_hex(&key), "Flight already settled by an earlier request");
            }
            Err(e) => {
                warn!(key = %short_hex(&key), error = %e, "Status resolution failed");
                return Err(e);
            }
        }

        request.state = RequestState::Resolved(status);
        self.store.put_request(request);

        info!(
            airline = %short_hex(&airline),
            key = %short_hex(&key),
            timestamp,
            %status,
            votes,
            "Oracle quorum reached"
        );
        self.bus
            .publish(SuretyEvent::FlightStatusInfo {
                airline,
                key,
                status,
            })
            .await;
        Ok(ResponseOutcome::Resolved { status })
    }

    fn get_request(&self, key: &RequestKey) -> Option<OracleRequestRecord> {
        self.store.request(key)
    }

    fn is_oracle(&self, oracle: &Address) -> bool {
        self.store.oracle(oracle).is_some()
    }

    fn registration_fee(&self) -> U256 {
        self.config.registration_fee
    }
}
