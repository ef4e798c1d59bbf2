//! Payment gateway contract.
//!
//! The reconciler and the subscription workflow talk to the gateway only
//! through [`Gateway`]. Transport, authentication and retries belong to the
//! implementation; every failure arrives here as an opaque [`GatewayError`].

pub mod types;

pub use types::*;

use async_trait::async_trait;

use rzp_subs_core::{PlanArgs, PlanId, SubscriptionId, SubscriptionRequest};

/// Error returned by gateway calls.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct GatewayError {
    /// Message reported by the gateway or its transport.
    pub message: String,
}

impl GatewayError {
    /// Create an error from a message.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Plan, subscription and customer operations of the payment gateway.
#[async_trait]
pub trait Gateway: Send + Sync {
    /// Create a plan.
    async fn create_plan(&self, args: &PlanArgs) -> Result<Plan, GatewayError>;

    /// Fetch a plan by id.
    async fn fetch_plan(&self, plan_id: &PlanId) -> PlanLookup;

    /// Create a subscription.
    async fn create_subscription(
        &self,
        request: &SubscriptionRequest,
    ) -> Result<Subscription, GatewayError>;

    /// Fetch a subscription by id.
    async fn fetch_subscription(
        &self,
        subscription_id: &SubscriptionId,
    ) -> Result<Subscription, GatewayError>;

    /// Cancel a subscription immediately.
    async fn cancel_subscription(
        &self,
        subscription_id: &SubscriptionId,
    ) -> Result<Subscription, GatewayError>;

    /// Create a customer, or return the existing one when the request allows it.
    async fn create_customer(&self, request: &CustomerRequest) -> Result<Customer, GatewayError>;
}
