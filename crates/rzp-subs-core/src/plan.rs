//! Plan arguments and plan keys.
//!
//! A plan key identifies "a plan with this price and cadence" without asking
//! the gateway. It is stored next to the gateway plan id in the product's
//! metadata, so a later checkout at the same price can reuse the plan.
//!
//! # Key format
//!
//! ```text
//! razorpay_wc_plan_id || hex(sha1("{amount}|{period}|{interval}"))
//! ```
//!
//! The prefix and hash match the keys already written by earlier releases of
//! the store plugin, so existing product metadata stays valid.

use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sha1::{Digest, Sha1};

use crate::error::Result;
use crate::ids::PlanId;
use crate::money::to_minor_units;
use crate::period::{normalize, BillingPeriod};

/// Namespace prefix of every plan key.
pub const PLAN_KEY_PREFIX: &str = "razorpay_wc_plan_id";

/// Separator between the hashed key components.
const KEY_DELIMITER: &str = "|";

/// A priced line item as the gateway expects it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    /// Display name.
    pub name: String,
    /// Amount in minor currency units.
    pub amount: i64,
    /// ISO 4217 currency code.
    pub currency: String,
}

impl Item {
    /// Build an item from a decimal currency amount.
    ///
    /// # Errors
    ///
    /// Returns `BillingError::InvalidAmount` if the amount is negative or too large.
    pub fn from_decimal(
        name: impl Into<String>,
        amount: Decimal,
        currency: impl Into<String>,
    ) -> Result<Self> {
        Ok(Self {
            name: name.into(),
            amount: to_minor_units(amount)?,
            currency: currency.into(),
        })
    }
}

/// Arguments for creating a gateway plan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanArgs {
    /// Normalized gateway period.
    pub period: BillingPeriod,
    /// Number of periods between charges.
    pub interval: u32,
    /// The recurring charge.
    pub item: Item,
}

impl PlanArgs {
    /// Build plan arguments from a store cadence and recurring fee.
    ///
    /// Yearly cadences are folded into monthly ones (see [`normalize`]).
    ///
    /// # Errors
    ///
    /// - `BillingError::UnsupportedBillingPeriod` for unknown period words.
    /// - `BillingError::InvalidBillingInterval` for invalid intervals.
    /// - `BillingError::InvalidAmount` for unusable recurring fees.
    pub fn new(
        recurring_fee: Decimal,
        period: &str,
        interval: u32,
        name: impl Into<String>,
        currency: impl Into<String>,
    ) -> Result<Self> {
        let (period, interval) = normalize(period, interval)?;
        Ok(Self {
            period,
            interval,
            item: Item::from_decimal(name, recurring_fee, currency)?,
        })
    }

    /// Derive the deduplication key for these arguments.
    #[must_use]
    pub fn key(&self) -> PlanKey {
        PlanKey::derive(self.item.amount, self.period, self.interval)
    }
}

/// Deterministic identifier of a (price, cadence) combination.
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlanKey(String);

impl PlanKey {
    /// Hash the amount, period and interval into a prefixed key.
    #[must_use]
    pub fn derive(amount: i64, period: BillingPeriod, interval: u32) -> Self {
        let input = [amount.to_string(), period.to_string(), interval.to_string()]
            .join(KEY_DELIMITER);
        let digest = Sha1::digest(input.as_bytes());
        Self(format!("{PLAN_KEY_PREFIX}{}", hex::encode(digest)))
    }

    /// Borrow the key as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for PlanKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PlanKey({})", self.0)
    }
}

impl fmt::Display for PlanKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// The current plan mapping kept in a product's metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredPlan {
    /// Key of the price/cadence the plan was created for.
    pub key: PlanKey,
    /// Gateway plan id.
    pub plan_id: PlanId,
}

impl StoredPlan {
    /// Whether this entry was created for `key`.
    #[must_use]
    pub fn matches(&self, key: &PlanKey) -> bool {
        &self.key == key
    }
}
