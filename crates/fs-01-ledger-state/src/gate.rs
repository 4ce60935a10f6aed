//! # Access / Operational Gate
//!
//! Every mutating entry point calls `ensure_operational()` before it reads
//! anything else, so a paused ledger rejects work before any state is
//! touched. The toggle itself is owner-only and not gated on the flag, so a
//! paused ledger can still be resumed.
//!
//! Authorized callers are principals allowed on internal entry points (the
//! oracle protocol's resolution path). The owner manages the set.

use crate::ports::LedgerStore;
use shared_types::{short_hex, Address, CallContext, SuretyError, SuretyResult};
use std::sync::Arc;
use tracing::{info, warn};

/// Guard over the store's access fields.
pub struct AccessGate<S: LedgerStore> {
    store: Arc<S>,
}

impl<S: LedgerStore> Clone for AccessGate<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
        }
    }
}

impl<S: LedgerStore> AccessGate<S> {
    /// Gate over `store`.
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// Current operational flag.
    pub fn is_operational(&self) -> bool {
        self.store.is_operational()
    }

    /// Fails with `NotOperational` while paused.
    pub fn ensure_operational(&self) -> SuretyResult<()> {
        if self.store.is_operational() {
            Ok(())
        } else {
            Err(SuretyError::NotOperational)
        }
    }

    /// Fails with `Unauthorized` unless `caller` deployed the ledger.
    pub fn ensure_owner(&self, caller: &Address) -> SuretyResult<()> {
        if *caller == self.store.owner() {
            Ok(())
        } else {
            Err(SuretyError::Unauthorized)
        }
    }

    /// Fails with `Unauthorized` unless `caller` is an authorized caller.
    pub fn ensure_authorized(&self, caller: &Address) -> SuretyResult<()> {
        if self.store.is_authorized_caller(caller) {
            Ok(())
        } else {
            Err(SuretyError::Unauthorized)
        }
    }

    /// Owner-only toggle of the operational flag.
    pub fn set_operating_status(&self, ctx: &CallContext, operational: bool) -> SuretyResult<()> {
        if let Err(e) = self.ensure_owner(&ctx.caller) {
            warn!(caller = %short_hex(&ctx.caller), "Rejected operating status change");
            return Err(e);
        }
        self.store.set_operational(operational);
        info!(operational, "Operating status changed");
        Ok(())
    }

    /// Owner-only grant of internal access.
    pub fn authorize_caller(&self, ctx: &CallContext, caller: Address) -> SuretyResult<()> {
        self.ensure_owner(&ctx.caller)?;
        self.store.set_authorized_caller(caller, true);
        info!(caller = %short_hex(&caller), "Caller authorized");
        Ok(())
    }

    /// Owner-only revocation of internal access.
    pub fn deauthorize_caller(&self, ctx: &CallContext, caller: Address) -> SuretyResult<()> {
        self.ensure_owner(&ctx.caller)?;
        self.store.set_authorized_caller(caller, false);
        info!(caller = %short_hex(&caller), "Caller deauthorized");
        Ok(())
    }

    /// Caller is on the authorized list.
    pub fn is_authorized_caller(&self, caller: &Address) -> bool {
        self.store.is_authorized_caller(caller)
    }
}
