//! Currency amounts.
//!
//! The store reports prices as decimal currency amounts (`499.00`); the gateway
//! expects integers in the currency's minor unit (`49900` paise). Conversion is
//! done on exact decimals so `0.285` never turns into `28.4999...`.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};

use crate::error::{BillingError, Result};

/// Settlement currency of the gateway when nothing else is configured.
pub const DEFAULT_BASE_CURRENCY: &str = "INR";

/// Convert a decimal currency amount into integer minor units.
///
/// The amount is multiplied by 100 and rounded half away from zero.
///
/// # Errors
///
/// Returns `BillingError::InvalidAmount` for negative amounts or amounts that
/// do not fit in an `i64`.
pub fn to_minor_units(amount: Decimal) -> Result<i64> {
    if amount.is_sign_negative() && !amount.is_zero() {
        return Err(BillingError::InvalidAmount(format!(
            "amount must not be negative: {amount}"
        )));
    }

    amount
        .checked_mul(Decimal::ONE_HUNDRED)
        .map(|scaled| scaled.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero))
        .and_then(|rounded| rounded.to_i64())
        .ok_or_else(|| BillingError::InvalidAmount(format!("amount out of range: {amount}")))
}
