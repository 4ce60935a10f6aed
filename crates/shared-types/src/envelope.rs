//! # `CallContext` Envelope
//!
//! The authenticated principal and attached value for every ledger call.
//!
//! The underlying platform authenticates the caller before the call reaches
//! the core. The engines trust `caller` and never derive identity from
//! payload fields.

use crate::entities::{short_hex, Address, U256};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Principal and native value attached to a single ledger call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CallContext {
    /// The authenticated caller. SOLE source of truth for identity.
    pub caller: Address,
    /// Native value (wei) sent along with the call.
    pub value: U256,
}

impl CallContext {
    /// A call without attached value.
    #[must_use]
    pub fn new(caller: Address) -> Self {
        Self {
            caller,
            value: U256::zero(),
        }
    }

    /// A call carrying `value` wei.
    #[must_use]
    pub fn with_value(caller: Address, value: U256) -> Self {
        Self { caller, value }
    }
}

impl fmt::Display for CallContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (value={})", short_hex(&self.caller), self.value)
    }
}
