//! Plan reconciliation.
//!
//! Decides whether a product's stored gateway plan can be reused for the
//! current price and cadence, or whether a new plan has to be created.
//!
//! # Protocol
//!
//! 1. Derive the plan key from the plan arguments.
//! 2. If the product's stored entry carries that key, fetch the plan. A plan
//!    whose amount still equals the computed amount is reused as is.
//! 3. Otherwise (no entry, different key, fetch miss, amount drift) create a
//!    plan and replace the product's entry with the new key and id.
//!
//! Two checkouts racing on a new price can both create a plan; the last
//! metadata write wins and the other plan is simply never reused.

use std::sync::Arc;

use rzp_subs_core::{BillingError, PlanArgs, PlanId, PlanKey, ProductId, Result, StoredPlan};
use rzp_subs_store::PlanStore;

use crate::gateway::{Gateway, PlanLookup};

/// Result of a reconciliation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedPlan {
    /// Plan to subscribe the customer to.
    pub plan_id: PlanId,
    /// Key the plan is stored under.
    pub key: PlanKey,
    /// Whether the plan was created by this call.
    pub created: bool,
}

/// Reuses or creates gateway plans for store products.
#[derive(Clone)]
pub struct PlanReconciler {
    gateway: Arc<dyn Gateway>,
    store: Arc<dyn PlanStore>,
}

impl PlanReconciler {
    /// Create a reconciler over a gateway and a plan metadata store.
    #[must_use]
    pub fn new(gateway: Arc<dyn Gateway>, store: Arc<dyn PlanStore>) -> Self {
        Self { gateway, store }
    }

    /// Return the plan to use for `args`, creating one when needed.
    ///
    /// # Errors
    ///
    /// - `BillingError::PlanCreationFailed` if the gateway rejects the new plan.
    /// - `BillingError::Storage` if the plan metadata cannot be read or written.
    pub async fn resolve(&self, product_id: ProductId, args: &PlanArgs) -> Result<ResolvedPlan> {
        let key = args.key();

        tracing::debug!(
            product_id = %product_id,
            key = %key,
            amount = args.item.amount,
            period = %args.period,
            interval = args.interval,
            "Derived plan key"
        );

        let stored = self
            .store
            .get_plan(&product_id)?
            .filter(|entry| entry.matches(&key));

        if let Some(entry) = stored {
            if let Some(plan_id) = self.reusable(&entry, args).await {
                return Ok(ResolvedPlan {
                    plan_id,
                    key,
                    created: false,
                });
            }
        }

        let plan = self.gateway.create_plan(args).await.map_err(|e| {
            tracing::error!(product_id = %product_id, error = %e, "Plan creation failed");
            BillingError::PlanCreationFailed { message: e.message }
        })?;

        let entry = StoredPlan {
            key: key.clone(),
            plan_id: plan.id.clone(),
        };
        self.store.delete_plan(&product_id)?;
        self.store.put_plan(&product_id, &entry)?;

        tracing::info!(
            product_id = %product_id,
            plan_id = %plan.id,
            key = %key,
            "Created gateway plan"
        );

        Ok(ResolvedPlan {
            plan_id: plan.id,
            key,
            created: true,
        })
    }

    /// Check a stored entry against the gateway.
    async fn reusable(&self, entry: &StoredPlan, args: &PlanArgs) -> Option<PlanId> {
        match self.gateway.fetch_plan(&entry.plan_id).await {
            PlanLookup::Found(plan) if plan.item.amount == args.item.amount => {
                tracing::info!(plan_id = %plan.id, "Reusing gateway plan");
                Some(plan.id)
            }
            PlanLookup::Found(plan) => {
                tracing::warn!(
                    plan_id = %plan.id,
                    stored_amount = plan.item.amount,
                    expected_amount = args.item.amount,
                    "Gateway plan amount drifted, creating a new plan"
                );
                None
            }
            PlanLookup::NotFound => {
                tracing::warn!(plan_id = %entry.plan_id, "Stored plan not found on gateway");
                None
            }
            PlanLookup::TransientError(message) => {
                tracing::warn!(
                    plan_id = %entry.plan_id,
                    error = %message,
                    "Plan fetch failed, creating a new plan"
                );
                None
            }
        }
    }
}
