//! Governance Service - airline admission and funding
//!
//! Each entry point runs the access gate first, then validates against
//! store reads, and only then writes. Events are published after the write.

use crate::domain::approval::{Admission, ApprovalPolicy};
use crate::ports::inbound::GovernanceApi;
use async_trait::async_trait;
use fs_01_ledger_state::{AccessGate, AirlineRecord, LedgerStore};
use shared_bus::{EventPublisher, SuretyEvent};
use shared_types::{
    ether, short_hex, Address, AirlineState, CallContext, SuretyError, SuretyResult, U256,
};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Governance configuration
#[derive(Clone, Debug)]
pub struct GovernanceConfig {
    /// Admission thresholds
    pub approval: ApprovalPolicy,
    /// Minimum funding payment (wei)
    pub min_funding: U256,
}

impl Default for GovernanceConfig {
    fn default() -> Self {
        Self {
            approval: ApprovalPolicy::default(),
            min_funding: ether(10),
        }
    }
}

/// Governance Service implementation
pub struct GovernanceService<S, P>
where
    S: LedgerStore,
    P: EventPublisher,
{
    config: GovernanceConfig,
    store: Arc<S>,
    gate: AccessGate<S>,
    bus: Arc<P>,
}

impl<S, P> GovernanceService<S, P>
where
    S: LedgerStore,
    P: EventPublisher,
{
    /// Create a new governance service
    pub fn new(config: GovernanceConfig, store: Arc<S>, bus: Arc<P>) -> Self {
        let gate = AccessGate::new(Arc::clone(&store));
        Self {
            config,
            store,
            gate,
            bus,
        }
    }

    /// Active configuration
    pub fn config(&self) -> &GovernanceConfig {
        &self.config
    }

    fn require_funded(&self, caller: &Address) -> SuretyResult<()> {
        match self.store.airline(caller) {
            Some(record) if record.is_funded() => Ok(()),
            _ => Err(SuretyError::CallerNotFunded),
        }
    }

    /// Apply the approval rule to `record` in place.
    fn evaluate(&self, record: &mut AirlineRecord) -> Admission {
        let registered = self.store.registered_airline_count();
        let votes = record.vote_count();
        let approved = self.config.approval.is_approved(registered, votes);
        if approved {
            record.state = AirlineState::Registered;
        }
        Admission {
            votes,
            required: self.config.approval.required_votes(registered),
            registered: approved,
        }
    }

    async fn announce_registered(&self, record: &AirlineRecord) {
        info!(
            airline = %short_hex(&record.id),
            name = %record.name,
            votes = record.vote_count(),
            "Airline registered"
        );
        self.bus
            .publish(SuretyEvent::AirlineRegistered {
                airline: record.id,
                name: record.name.clone(),
            })
            .await;
    }
}

#[async_trait]
impl<S, P> GovernanceApi for GovernanceService<S, P>
where
    S: LedgerStore + 'static,
    P: EventPublisher + 'static,
{
    async fn bootstrap_airline(
        &self,
        ctx: &CallContext,
        airline: Address,
        name: String,
    ) -> SuretyResult<()> {
        self.gate.ensure_operational()?;
        self.gate.ensure_owner(&ctx.caller)?;
        if self.store.airline_count() > 0 {
            warn!(airline = %short_hex(&airline), "Bootstrap rejected: airlines already exist");
            return Err(SuretyError::AlreadyExists);
        }

        let mut record = AirlineRecord::candidate(airline, name);
        record.votes.insert(airline);
        record.state = AirlineState::Registered;
        self.store.put_airline(record.clone());

        self.announce_registered(&record).await;
        Ok(())
    }

    async fn propose_airline(
        &self,
        ctx: &CallContext,
        candidate: Address,
        name: String,
    ) -> SuretyResult<Admission> {
        self.gate.ensure_operational()?;
        self.require_funded(&ctx.caller)?;
        if self.store.airline(&candidate).is_some() {
            return Err(SuretyError::AlreadyExists);
        }

        let mut record = AirlineRecord::candidate(candidate, name);
        record.votes.insert(ctx.caller);
        let admission = self.evaluate(&mut record);
        self.store.put_airline(record.clone());

        debug!(
            candidate = %short_hex(&candidate),
            proposer = %short_hex(&ctx.caller),
            votes = admission.votes,
            required = admission.required,
            "Airline proposed"
        );
        if admission.registered {
            self.announce_registered(&record).await;
        }
        Ok(admission)
    }

    async fn vote_for_airline(
        &self,
        ctx: &CallContext,
        candidate: Address,
    ) -> SuretyResult<Admission> {
        self.gate.ensure_operational()?;
        self.require_funded(&ctx.caller)?;
        let mut record = self
            .store
            .airline(&candidate)
            .ok_or(SuretyError::UnknownAirline)?;
        if record.state != AirlineState::Candidate {
            return Err(SuretyError::AlreadyRegistered);
        }
        if record.votes.contains(&ctx.caller) {
            return Err(SuretyError::DuplicateVote);
        }

        record.votes.insert(ctx.caller);
        let admission = self.evaluate(&mut record);
        self.store.put_airline(record.clone());

        debug!(
            candidate = %short_hex(&candidate),
            voter = %short_hex(&ctx.caller),
            votes = admission.votes,
            required = admission.required,
            "Vote recorded"
        );
        if admission.registered {
            self.announce_registered(&record).await;
        }
        Ok(admission)
    }

    async fn fund_airline(&self, ctx: &CallContext) -> SuretyResult<()> {
        self.gate.ensure_operational()?;
        let mut record = self
            .store
            .airline(&ctx.caller)
            .ok_or(SuretyError::NotRegistered)?;
        match record.state {
            AirlineState::Funded => return Err(SuretyError::AlreadyFunded),
            AirlineState::Registered => {}
            AirlineState::Candidate | AirlineState::Unregistered => {
                return Err(SuretyError::NotRegistered)
            }
        }
        if ctx.value < self.config.min_funding {
            warn!(
                airline = %short_hex(&ctx.caller),
                paid = %ctx.value,
                required = %self.config.min_funding,
                "Funding below minimum"
            );
            return Err(SuretyError::InsufficientFunds);
        }

        record.state = AirlineState::Funded;
        record.funded_balance = ctx.value;
        self.store.put_airline(record);
        self.store
            .set_pool_balance(self.store.pool_balance().saturating_add(ctx.value));

        info!(airline = %short_hex(&ctx.caller), amount = %ctx.value, "Airline funded");
        self.bus
            .publish(SuretyEvent::AirlineFunded {
                airline: ctx.caller,
                amount: ctx.value,
            })
            .await;
        Ok(())
    }

    fn is_airline(&self, airline: &Address) -> bool {
        self.store.airline(airline).is_some()
    }

    fn is_registered(&self, airline: &Address) -> bool {
        self.store
            .airline(airline)
            .is_some_and(|a| a.state.is_registered())
    }

    fn is_funded(&self, airline: &Address) -> bool {
        self.store.airline(airline).is_some_and(|a| a.is_funded())
    }

    fn get_airline(&self, airline: &Address) -> Option<AirlineRecord> {
        self.store.airline(airline)
    }

    fn registered_airline_count(&self) -> usize {
        self.store.registered_airline_count()
    }
}
