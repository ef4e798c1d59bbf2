//! Core types and utilities for rzp-subs.
//!
//! This crate holds the gateway-independent part of selling store
//! subscriptions through a payment gateway's plan and subscription APIs:
//!
//! - **Identifiers**: `OrderId`, `ProductId`, `PlanId`, `SubscriptionId`, `CustomerId`
//! - **Cadence**: `StorePeriod`, `BillingPeriod`, [`normalize`]
//! - **Plans**: `PlanArgs`, `Item`, `PlanKey`, `StoredPlan`
//! - **Start dates**: `StartDay`, [`next_billing_anchor`]
//! - **Store records**: `Order`, `LineItem`, `SubscriptionRecord`, `ProductTerms`
//! - **Subscriptions**: `SubscriptionTerms`, `SubscriptionRequest`, `Addon`
//!
//! # Amounts
//!
//! Store prices are `rust_decimal::Decimal` currency amounts. Everything sent
//! to the gateway is an `i64` in minor units (paise for INR), rounded half
//! away from zero.

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod error;
pub mod ids;
pub mod money;
pub mod order;
pub mod period;
pub mod plan;
pub mod schedule;
pub mod subscription;

pub use error::{BillingError, Result};
pub use ids::{CustomerId, IdError, OrderId, PlanId, ProductId, SubscriptionId};
pub use money::{to_minor_units, DEFAULT_BASE_CURRENCY};
pub use order::{CustomerInfo, LineItem, Order, ProductTerms, SubscriptionRecord};
pub use period::{normalize, BillingPeriod, StorePeriod};
pub use plan::{Item, PlanArgs, PlanKey, StoredPlan, PLAN_KEY_PREFIX};
pub use schedule::{next_billing_anchor, StartDay, MAX_START_DAY, MIN_START_DAY};
pub use subscription::{Addon, SubscriptionNotes, SubscriptionRequest, SubscriptionTerms};
