//! Custom subscription start dates.
//!
//! A product may pin recurring charges to a fixed day of the month. The
//! checkout payment then acts as a sign-up payment covering the first period,
//! and the gateway starts charging one billing interval later on the pinned
//! day.

use chrono::{DateTime, Datelike, Days, NaiveDate, TimeDelta, Utc};

use crate::error::{BillingError, Result};
use crate::period::StorePeriod;

/// Smallest accepted start day.
pub const MIN_START_DAY: u32 = 2;

/// Largest accepted start day. Every month has this day.
pub const MAX_START_DAY: u32 = 27;

/// A validated day of month for recurring charges.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StartDay(u32);

impl StartDay {
    /// Validate a configured start day.
    ///
    /// # Errors
    ///
    /// Returns `BillingError::InvalidStartDate` unless `1 < day < 28`.
    pub fn new(day: u32) -> Result<Self> {
        if (MIN_START_DAY..=MAX_START_DAY).contains(&day) {
            Ok(Self(day))
        } else {
            Err(BillingError::InvalidStartDate { day })
        }
    }

    /// The day of month.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Compute the first recurring charge date.
///
/// `now` is advanced by one billing interval, then its day of month is
/// replaced with `start_day`. The time of day is kept.
///
/// Month and year steps keep the day of month and let an overflowing day run
/// into the following month: 31 January plus one month is 3 March (2 March in
/// leap years), so the anchor lands in March.
///
/// # Errors
///
/// - `BillingError::UnsupportedBillingPeriod` for unknown period words.
/// - `BillingError::InvalidBillingInterval` if the date cannot be represented.
pub fn next_billing_anchor(
    now: DateTime<Utc>,
    period: &str,
    interval: u32,
    start_day: StartDay,
) -> Result<DateTime<Utc>> {
    let period: StorePeriod = period.parse()?;
    let out_of_range = || BillingError::InvalidBillingInterval { interval };

    let advanced = match period {
        StorePeriod::Day => TimeDelta::try_days(i64::from(interval))
            .and_then(|delta| now.checked_add_signed(delta)),
        StorePeriod::Week => TimeDelta::try_weeks(i64::from(interval))
            .and_then(|delta| now.checked_add_signed(delta)),
        StorePeriod::Month => add_months_rolling(now, interval),
        StorePeriod::Year => interval
            .checked_mul(12)
            .and_then(|months| add_months_rolling(now, months)),
    }
    .ok_or_else(out_of_range)?;

    advanced.with_day(start_day.get()).ok_or_else(out_of_range)
}

/// Add calendar months, rolling an overflowing day into the next month.
fn add_months_rolling(now: DateTime<Utc>, months: u32) -> Option<DateTime<Utc>> {
    let month_index = i64::from(now.year()) * 12 + i64::from(now.month0()) + i64::from(months);
    let year = i32::try_from(month_index.div_euclid(12)).ok()?;
    let month0 = u32::try_from(month_index.rem_euclid(12)).ok()?;

    let date = NaiveDate::from_ymd_opt(year, month0 + 1, 1)?
        .checked_add_days(Days::new(u64::from(now.day0())))?;

    Some(date.and_time(now.time()).and_utc())
}
