//! Gateway API types.

use serde::{Deserialize, Serialize};

use rzp_subs_core::{CustomerId, PlanId, SubscriptionId};

/// Gateway plan object.
#[derive(Debug, Clone, Deserialize)]
pub struct Plan {
    /// Plan ID.
    pub id: PlanId,
    /// The recurring charge.
    pub item: PlanItem,
    /// Period word (`daily`, `weekly`, `monthly`, `yearly`).
    #[serde(default)]
    pub period: Option<String>,
    /// Number of periods between charges.
    #[serde(default)]
    pub interval: Option<u32>,
}

/// Item attached to a gateway plan.
#[derive(Debug, Clone, Deserialize)]
pub struct PlanItem {
    /// Amount in minor units.
    pub amount: i64,
    /// Currency.
    #[serde(default)]
    pub currency: Option<String>,
    /// Display name.
    #[serde(default)]
    pub name: Option<String>,
}

/// Outcome of fetching a plan by id.
///
/// Fetch failures are data, not errors: both `NotFound` and
/// `TransientError` lead the reconciler to create a fresh plan.
#[derive(Debug, Clone)]
pub enum PlanLookup {
    /// The plan exists.
    Found(Plan),
    /// The gateway does not know the plan id.
    NotFound,
    /// The fetch failed for another reason.
    TransientError(String),
}

/// Gateway subscription object.
#[derive(Debug, Clone, Deserialize)]
pub struct Subscription {
    /// Subscription ID.
    pub id: SubscriptionId,
    /// Plan the subscription bills.
    #[serde(default)]
    pub plan_id: Option<PlanId>,
    /// Lifecycle status (`created`, `active`, `cancelled`, ...).
    #[serde(default)]
    pub status: Option<String>,
}

/// Request for creating (or returning) a gateway customer.
#[derive(Debug, Clone, Serialize)]
pub struct CustomerRequest {
    /// Customer name.
    pub name: String,
    /// Customer email.
    pub email: String,
    /// Customer phone number.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact: Option<String>,
    /// `"0"` asks the gateway to return an existing customer with the same
    /// details instead of failing.
    pub fail_existing: String,
}

impl CustomerRequest {
    /// Build a request that returns an existing customer rather than failing.
    #[must_use]
    pub fn reuse_existing(info: &rzp_subs_core::CustomerInfo) -> Self {
        Self {
            name: info.name.clone(),
            email: info.email.clone(),
            contact: info.contact.clone(),
            fail_existing: "0".to_string(),
        }
    }
}

/// Gateway customer object.
#[derive(Debug, Clone, Deserialize)]
pub struct Customer {
    /// Customer ID.
    pub id: CustomerId,
    /// Customer email.
    #[serde(default)]
    pub email: Option<String>,
}
