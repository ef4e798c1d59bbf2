//! Billing periods.
//!
//! The store describes a cadence as a period word plus an interval
//! (`"month"`, 3). The gateway has its own vocabulary and no usable yearly
//! period, so yearly cadences are sent as monthly ones with the interval
//! multiplied by 12.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{BillingError, Result};

/// Months per year, used when folding yearly cadences into monthly ones.
const MONTHS_PER_YEAR: u32 = 12;

/// A billing period as the store names it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StorePeriod {
    /// `"day"`
    Day,
    /// `"week"`
    Week,
    /// `"month"`
    Month,
    /// `"year"`
    Year,
}

impl StorePeriod {
    /// The store-native period word.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Day => "day",
            Self::Week => "week",
            Self::Month => "month",
            Self::Year => "year",
        }
    }
}

impl FromStr for StorePeriod {
    type Err = BillingError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "day" => Ok(Self::Day),
            "week" => Ok(Self::Week),
            "month" => Ok(Self::Month),
            "year" => Ok(Self::Year),
            other => Err(BillingError::UnsupportedBillingPeriod {
                period: other.to_string(),
            }),
        }
    }
}

impl fmt::Display for StorePeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A billing period as the gateway names it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BillingPeriod {
    /// Billed every N days.
    Daily,
    /// Billed every N weeks.
    Weekly,
    /// Billed every N months.
    Monthly,
    /// Billed every N years. Never produced by [`normalize`].
    Yearly,
}

impl BillingPeriod {
    /// The gateway period word.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Daily => "daily",
            Self::Weekly => "weekly",
            Self::Monthly => "monthly",
            Self::Yearly => "yearly",
        }
    }
}

impl fmt::Display for BillingPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Map a store cadence onto the gateway's `(period, interval)` pair.
///
/// # Errors
///
/// - `BillingError::UnsupportedBillingPeriod` for unknown period words.
/// - `BillingError::InvalidBillingInterval` for a zero interval, or a yearly
///   interval that overflows when expressed in months.
pub fn normalize(period: &str, interval: u32) -> Result<(BillingPeriod, u32)> {
    if interval == 0 {
        return Err(BillingError::InvalidBillingInterval { interval });
    }

    let normalized = match period.parse::<StorePeriod>()? {
        StorePeriod::Day => (BillingPeriod::Daily, interval),
        StorePeriod::Week => (BillingPeriod::Weekly, interval),
        StorePeriod::Month => (BillingPeriod::Monthly, interval),
        StorePeriod::Year => {
            let months = interval
                .checked_mul(MONTHS_PER_YEAR)
                .ok_or(BillingError::InvalidBillingInterval { interval })?;
            (BillingPeriod::Monthly, months)
        }
    };

    Ok(normalized)
}
