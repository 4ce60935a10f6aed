//! Insurance Service - flights, policies, payouts
//!
//! All-or-nothing: every check runs against reads before the first write.

use crate::domain::payout::{payout_for, validate_premium};
use crate::ports::inbound::{InsuranceApi, RegisteredFlight, Settlement};
use async_trait::async_trait;
use fs_01_ledger_state::{
    flight_key, AccessGate, FlightDetails, FlightRecord, InsurancePolicy, LedgerStore,
};
use shared_bus::{EventPublisher, SuretyEvent};
use shared_types::{
    ether, short_hex, Address, CallContext, FlightKey, FlightStatus, SuretyError, SuretyResult,
    U256,
};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Insurance configuration
#[derive(Clone, Debug)]
pub struct InsuranceConfig {
    /// Premium cap (wei)
    pub max_premium: U256,
    /// Payout multiplier in basis points (15_000 = 1.5×)
    pub payout_multiplier_bps: u32,
}

impl Default for InsuranceConfig {
    fn default() -> Self {
        Self {
            max_premium: ether(1),
            payout_multiplier_bps: 15_000,
        }
    }
}

/// Insurance Service implementation
pub struct InsuranceService<S, P>
where
    S: LedgerStore,
    P: EventPublisher,
{
    config: InsuranceConfig,
    store: Arc<S>,
    gate: AccessGate<S>,
    bus: Arc<P>,
}

impl<S, P> InsuranceService<S, P>
where
    S: LedgerStore,
    P: EventPublisher,
{
    /// Create a new insurance service
    pub fn new(config: InsuranceConfig, store: Arc<S>, bus: Arc<P>) -> Self {
        let gate = AccessGate::new(Arc::clone(&store));
        Self {
            config,
            store,
            gate,
            bus,
        }
    }

    /// Active configuration
    pub fn config(&self) -> &InsuranceConfig {
        &self.config
    }

    /// The airline's flight under `key`, or `UnknownFlight`.
    fn flight_of(&self, airline: &Address, key: &FlightKey) -> SuretyResult<FlightRecord> {
        self.store
            .flight(key)
            .filter(|f| f.airline == *airline)
            .ok_or(SuretyError::UnknownFlight)
    }
}

#[async_trait]
impl<S, P> InsuranceApi for InsuranceService<S, P>
where
    S: LedgerStore + 'static,
    P: EventPublisher + 'static,
{
    async fn register_flight(
        &self,
        ctx: &CallContext,
        details: FlightDetails,
    ) -> SuretyResult<RegisteredFlight> {
        self.gate.ensure_operational()?;
        let airline = ctx.caller;
        if !self.store.airline(&airline).is_some_and(|a| a.is_funded()) {
            return Err(SuretyError::CallerNotFunded);
        }

        let nonce = self.store.flight_nonce(&airline) + 1;
        let key = flight_key(&airline, nonce);

        info!(
            airline = %short_hex(&airline),
            key = %short_hex(&key),
            nonce,
            code = %details.code,
            "Flight registered"
        );
        self.store.put_flight(FlightRecord {
            airline,
            key,
            nonce,
            details,
            status: FlightStatus::Unknown,
            resolved: false,
        });
        self.store.set_flight_nonce(airline, nonce);

        self.bus
            .publish(SuretyEvent::FlightRegistered {
                airline,
                key,
                nonce,
            })
            .await;
        Ok(RegisteredFlight { key, nonce })
    }

    async fn buy_insurance(
        &self,
        ctx: &CallContext,
        airline: Address,
        key: FlightKey,
        amount: U256,
    ) -> SuretyResult<()> {
        self.gate.ensure_operational()?;
        let flight = self.flight_of(&airline, &key)?;
        if flight.resolved {
            return Err(SuretyError::AlreadyResolved);
        }
        validate_premium(amount, self.config.max_premium)?;
        let passenger = ctx.caller;
        if self.store.policy(&key, &passenger).is_some() {
            debug!(passenger = %short_hex(&passenger), key = %short_hex(&key), "Duplicate purchase");
            return Err(SuretyError::AlreadyInsured);
        }
        if ctx.value < amount {
            return Err(SuretyError::InsufficientFunds);
        }

        self.store
            .put_policy(key, InsurancePolicy::new(passenger, amount));
        self.store
            .set_pool_balance(self.store.pool_balance().saturating_add(amount));

        info!(
            passenger = %short_hex(&passenger),
            airline = %short_hex(&airline),
            key = %short_hex(&key),
            amount = %amount,
            "Insurance purchased"
        );
        self.bus
            .publish(SuretyEvent::FlightInsurancePurchased {
                passenger,
                airline,
                key,
                amount,
            })
            .await;
        Ok(())
    }

    async fn resolve_flight_status(
        &self,
        ctx: &CallContext,
        airline: Address,
        key: FlightKey,
        status: FlightStatus,
    ) -> SuretyResult<Settlement> {
        self.gate.ensure_operational()?;
        self.gate.ensure_authorized(&ctx.caller)?;
        let mut flight = self.flight_of(&airline, &key)?;
        if flight.resolved {
            return Err(SuretyError::AlreadyResolved);
        }

        // An Unknown verdict is a report, not a settlement.
        if status == FlightStatus::Unknown {
            debug!(key = %short_hex(&key), "Unknown status reported, flight stays open");
            return Ok(Settlement {
                status,
                resolved: false,
                credited: 0,
                total_payout: U256::zero(),
            });
        }

        let mut credits = Vec::new();
        let mut total_payout = U256::zero();
        if status.pays_out() {
            for passenger in self.store.insured_passengers(&key) {
                let Some(mut policy) = self.store.policy(&key, &passenger) else {
                    continue;
                };
                if !policy.insured || policy.credited {
                    continue;
                }
                let payout = payout_for(policy.amount, self.config.payout_multiplier_bps);
                total_payout = total_payout.saturating_add(payout);
                policy.credited = true;
                policy.payout = payout;
                credits.push(policy);
            }
            let pool = self.store.pool_balance();
            if total_payout > pool {
                warn!(
                    key = %short_hex(&key),
                    owed = %total_payout,
                    pool = %pool,
                    "Pool cannot cover payouts"
                );
                return Err(SuretyError::InsufficientFunds);
            }
        }

        flight.status = status;
        flight.resolved = true;
        self.store.put_flight(flight);
        for policy in &credits {
            self.store.put_policy(key, *policy);
        }
        if !total_payout.is_zero() {
            self.store
                .set_pool_balance(self.store.pool_balance() - total_payout);
        }

        info!(
            airline = %short_hex(&airline),
            key = %short_hex(&key),
            status = %status,
            credited = credits.len(),
            total_payout = %total_payout,
            "Flight status resolved"
        );
        if status.pays_out() {
            self.bus
                .publish(SuretyEvent::FlightDelayed { airline, key })
                .await;
            for policy in &credits {
                self.bus
                    .publish(SuretyEvent::InsuredPassengerPayout {
                        passenger: policy.passenger,
                        airline,
                        key,
                        amount: policy.payout,
                    })
                    .await;
            }
        }

        Ok(Settlement {
            status,
            resolved: true,
            credited: credits.len(),
            total_payout,
        })
    }

    async fn withdraw(&self, ctx: &CallContext, key: FlightKey) -> SuretyResult<U256> {
        self.gate.ensure_operational()?;
        let passenger = ctx.caller;
        // an unknown flight has nothing credited on it either
        let mut policy = self
            .store
            .policy(&key, &passenger)
            .filter(InsurancePolicy::is_withdrawable)
            .ok_or(SuretyError::NothingToWithdraw)?;
        let flight = self.store.flight(&key).ok_or(SuretyError::NothingToWithdraw)?;

        let amount = policy.payout;
        policy.payout = U256::zero();
        policy.withdrawn = true;
        self.store.put_policy(key, policy);
        self.store.set_balance(
            passenger,
            self.store.balance(&passenger).saturating_add(amount),
        );

        info!(
            passenger = %short_hex(&passenger),
            key = %short_hex(&key),
            amount = %amount,
            "Payout withdrawn"
        );
        self.bus
            .publish(SuretyEvent::PassengerInsuranceWithdrawal {
                passenger,
                airline: flight.airline,
                key,
                amount,
            })
            .await;
        Ok(amount)
    }

    fn get_flight(&self, key: &FlightKey) -> Option<FlightRecord> {
        self.store.flight(key)
    }

    fn is_flight(&self, airline: &Address, key: &FlightKey) -> bool {
        self.flight_of(airline, key).is_ok()
    }

    fn get_flight_key(&self, airline: &Address, nonce: u64) -> FlightKey {
        flight_key(airline, nonce)
    }

    fn get_passenger_insurance(
        &self,
        airline: &Address,
        key: &FlightKey,
        passenger: &Address,
    ) -> Option<InsurancePolicy> {
        self.flight_of(airline, key).ok()?;
        self.store.policy(key, passenger)
    }

    fn get_insured_passengers(&self, airline: &Address, key: &FlightKey) -> Vec<Address> {
        if self.flight_of(airline, key).is_err() {
            return Vec::new();
        }
        self.store.insured_passengers(key)
    }

    fn contract_balance(&self) -> U256 {
        self.store.pool_balance()
    }

    fn balance_of(&self, account: &Address) -> U256 {
        self.store.balance(account)
    }
}
