//! rzp-subs checkout service.
//!
//! This crate turns store orders into payment gateway subscriptions:
//!
//! - Plan reconciliation: reuse a product's gateway plan while its price and
//!   cadence are unchanged, create a new one otherwise
//! - Subscription creation with sign-up fee addons and custom start dates
//! - Subscription cancellation
//! - An HTTP API over the above
//!
//! # Collaborators
//!
//! The gateway, the commerce platform and the currency converter are traits
//! ([`Gateway`], [`CommercePlatform`], [`CurrencyConverter`]) handed to
//! [`SubscriptionService::new`]. Plan metadata lives in any
//! [`rzp_subs_store::PlanStore`].

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
// Allow some pedantic lints that are noisy for Axum handler functions
#![allow(clippy::missing_errors_doc)] // Axum handlers all return Result
#![allow(clippy::unused_async)] // Health handler is async for routing

pub mod commerce;
pub mod config;
pub mod error;
pub mod gateway;
pub mod handlers;
pub mod reconcile;
pub mod routes;
pub mod state;
pub mod subscriptions;

pub use commerce::{
    Clock, CommercePlatform, ConversionError, CurrencyConverter, PlatformError, SystemClock,
};
pub use config::ServiceConfig;
pub use error::ApiError;
pub use gateway::{
    Customer, CustomerRequest, Gateway, GatewayError, Plan, PlanItem, PlanLookup, Subscription,
};
pub use reconcile::{PlanReconciler, ResolvedPlan};
pub use routes::create_router;
pub use state::AppState;
#[cfg(feature = "rocksdb-backend")]
pub use state::open_plan_store;
pub use subscriptions::{CreatedSubscription, DisplayAmount, SubscriptionService};
