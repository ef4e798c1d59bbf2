//! Subscription request assembly.
//!
//! This module holds the pure part of subscription creation: how product
//! terms and an optional custom start day turn into a charge count, a sign-up
//! fee and a start timestamp, and the payload sent to the gateway.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::ids::{CustomerId, OrderId, PlanId, ProductId};
use crate::order::{ProductTerms, SubscriptionRecord};
use crate::plan::Item;
use crate::schedule::{next_billing_anchor, StartDay};

/// Charge schedule of a new subscription.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubscriptionTerms {
    /// Number of recurring charges the gateway will make.
    pub total_count: u32,
    /// One-time amount collected at sign-up.
    pub sign_up_fee: Decimal,
    /// Unix timestamp of the first recurring charge, when pinned.
    pub start_at: Option<i64>,
}

impl SubscriptionTerms {
    /// Derive the charge schedule from product terms.
    ///
    /// Without a start day this is the product's length and sign-up fee. With
    /// a start day, the first recurring charge is collected up front as part
    /// of the sign-up fee, the gateway makes one recurring charge fewer, and
    /// charging starts on the next billing anchor.
    ///
    /// # Errors
    ///
    /// - `BillingError::InvalidStartDate` if the start day is outside `2..=27`.
    /// - `BillingError::UnsupportedBillingPeriod` if the record's period is unknown.
    pub fn new(
        terms: &ProductTerms,
        record: &SubscriptionRecord,
        now: DateTime<Utc>,
    ) -> Result<Self> {
        let mut schedule = Self {
            total_count: terms.length,
            sign_up_fee: terms.sign_up_fee,
            start_at: None,
        };

        if let Some(day) = terms.start_day {
            let start_day = StartDay::new(day)?;
            let anchor = next_billing_anchor(
                now,
                &record.billing_period,
                record.billing_interval,
                start_day,
            )?;

            schedule.sign_up_fee += record.total;
            schedule.total_count = schedule.total_count.saturating_sub(1);
            schedule.start_at = Some(anchor.timestamp());
        }

        Ok(schedule)
    }

    /// Whether a sign-up addon has to be attached.
    #[must_use]
    pub fn has_sign_up_fee(&self) -> bool {
        self.sign_up_fee > Decimal::ZERO
    }
}

/// A one-time charge on the subscription's first invoice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Addon {
    /// The charged item.
    pub item: Item,
}

/// Store references attached to the gateway subscription.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubscriptionNotes {
    /// Store order that created the subscription.
    pub order_id: OrderId,
    /// Store product subscribed to.
    pub product_id: ProductId,
}

/// Payload for creating a gateway subscription.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubscriptionRequest {
    /// Gateway customer.
    pub customer_id: CustomerId,
    /// Gateway plan.
    pub plan_id: PlanId,
    /// Units of the plan.
    pub quantity: u32,
    /// Number of recurring charges.
    pub total_count: u32,
    /// Whether the gateway notifies the customer itself (`0` or `1`).
    pub customer_notify: u8,
    /// Unix timestamp of the first charge, when pinned.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_at: Option<i64>,
    /// One-time charges on the first invoice.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub addons: Vec<Addon>,
    /// Store references.
    pub notes: SubscriptionNotes,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::BillingError;
    use chrono::TimeZone;

    fn record() -> SubscriptionRecord {
        SubscriptionRecord {
            billing_period: "month".into(),
            billing_interval: 1,
            total: "499.00".parse().unwrap(),
        }
    }

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 14, 9, 0, 0).unwrap()
    }

    #[test]
    fn plain_terms_pass_through() {
        let terms = ProductTerms {
            sign_up_fee: "100".parse().unwrap(),
            length: 12,
            start_day: None,
        };
        let schedule = SubscriptionTerms::new(&terms, &record(), now()).unwrap();
        assert_eq!(schedule.total_count, 12);
        assert_eq!(schedule.sign_up_fee, "100".parse::<Decimal>().unwrap());
        assert_eq!(schedule.start_at, None);
        assert!(schedule.has_sign_up_fee());
    }

    #[test]
    fn start_day_moves_first_charge_into_sign_up_fee() {
        let terms = ProductTerms {
            sign_up_fee: "100".parse().unwrap(),
            length: 12,
            start_day: Some(5),
        };
        let schedule = SubscriptionTerms::new(&terms, &record(), now()).unwrap();

        assert_eq!(schedule.total_count, 11);
        assert_eq!(schedule.sign_up_fee, "599.00".parse::<Decimal>().unwrap());
        let expected = Utc.with_ymd_and_hms(2024, 6, 5, 9, 0, 0).unwrap();
        assert_eq!(schedule.start_at, Some(expected.timestamp()));
    }

    #[test]
    fn start_day_on_unlimited_length_saturates() {
        let terms = ProductTerms {
            start_day: Some(10),
            ..ProductTerms::default()
        };
        let schedule = SubscriptionTerms::new(&terms, &record(), now()).unwrap();
        assert_eq!(schedule.total_count, 0);
        assert!(schedule.has_sign_up_fee());
    }

    #[test]
    fn invalid_start_day_is_rejected() {
        for day in [1, 28] {
            let terms = ProductTerms {
                start_day: Some(day),
                ..ProductTerms::default()
            };
            assert!(matches!(
                SubscriptionTerms::new(&terms, &record(), now()),
                Err(BillingError::InvalidStartDate { .. })
            ));
        }
    }

    #[test]
    fn request_omits_empty_optionals() {
        let request = SubscriptionRequest {
            customer_id: "cust_1".parse().unwrap(),
            plan_id: "plan_1".parse().unwrap(),
            quantity: 1,
            total_count: 6,
            customer_notify: 0,
            start_at: None,
            addons: Vec::new(),
            notes: SubscriptionNotes {
                order_id: OrderId::new(1001),
                product_id: ProductId::new(42),
            },
        };
        let json = serde_json::to_value(&request).unwrap();
        assert!(json.get("start_at").is_none());
        assert!(json.get("addons").is_none());
        assert_eq!(json["notes"]["order_id"], 1001);
        assert_eq!(json["plan_id"], "plan_1");
    }
}
