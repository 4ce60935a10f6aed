//! # Premium and Payout Arithmetic
//!
//! Multipliers are expressed in basis points so the payout stays exact in
//! integer wei: `payout = premium × bps / 10_000`.

use shared_types::{SuretyError, SuretyResult, U256};

/// Basis points in 1×.
pub const BPS_DENOMINATOR: u32 = 10_000;

/// Premium must be non-zero and at most `cap`.
pub fn validate_premium(amount: U256, cap: U256) -> SuretyResult<()> {
    if amount.is_zero() || amount > cap {
        return Err(SuretyError::InvalidAmount);
    }
    Ok(())
}

/// Payout owed for `premium` at `multiplier_bps`.
#[must_use]
pub fn payout_for(premium: U256, multiplier_bps: u32) -> U256 {
    premium.saturating_mul(U256::from(multiplier_bps)) / U256::from(BPS_DENOMINATOR)
}
