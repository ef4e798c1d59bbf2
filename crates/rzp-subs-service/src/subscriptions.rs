//! Subscription checkout workflow.
//!
//! Turns a store order into a gateway subscription: resolves the plan,
//! resolves the customer, attaches the sign-up fee as an addon and creates
//! the subscription. Cancellation fetches the subscription and cancels it.
//!
//! Nothing here retries or rolls back. A plan created before a failed
//! subscription call stays on the gateway and is reused by key next time.

use std::sync::Arc;

use rust_decimal::Decimal;

use rzp_subs_core::{
    Addon, BillingError, CustomerId, Item, LineItem, Order, OrderId, PlanArgs, PlanId,
    ProductTerms, Result, SubscriptionId, SubscriptionNotes, SubscriptionRecord,
    SubscriptionRequest, SubscriptionTerms,
};
use rzp_subs_store::PlanStore;

use crate::commerce::{Clock, CommercePlatform, CurrencyConverter, SystemClock};
use crate::config::ServiceConfig;
use crate::gateway::{CustomerRequest, Gateway};
use crate::reconcile::PlanReconciler;

/// A subscription created at checkout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreatedSubscription {
    /// Gateway subscription id.
    pub subscription_id: SubscriptionId,
    /// Gateway plan the subscription bills.
    pub plan_id: PlanId,
    /// Whether the plan was created for this checkout.
    pub plan_created: bool,
}

/// Amount shown to the buyer at checkout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayAmount {
    /// Recurring total plus sign-up fee.
    pub amount: Decimal,
    /// Store currency.
    pub currency: String,
}

/// Creates and cancels gateway subscriptions for store orders.
#[derive(Clone)]
pub struct SubscriptionService {
    gateway: Arc<dyn Gateway>,
    commerce: Arc<dyn CommercePlatform>,
    converter: Arc<dyn CurrencyConverter>,
    clock: Arc<dyn Clock>,
    reconciler: PlanReconciler,
    base_currency: String,
    customer_notify: bool,
}

impl SubscriptionService {
    /// Create the workflow over its collaborators.
    #[must_use]
    pub fn new(
        gateway: Arc<dyn Gateway>,
        commerce: Arc<dyn CommercePlatform>,
        store: Arc<dyn PlanStore>,
        converter: Arc<dyn CurrencyConverter>,
        config: &ServiceConfig,
    ) -> Self {
        Self {
            reconciler: PlanReconciler::new(Arc::clone(&gateway), store),
            gateway,
            commerce,
            converter,
            clock: Arc::new(SystemClock),
            base_currency: config.base_currency.clone(),
            customer_notify: config.customer_notify,
        }
    }

    /// Replace the clock used for start date computation.
    #[must_use]
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// The plan reconciler used by this workflow.
    #[must_use]
    pub fn reconciler(&self) -> &PlanReconciler {
        &self.reconciler
    }

    /// Create the gateway subscription for an order.
    ///
    /// The cart and the product's start day are validated before any gateway
    /// call is made.
    ///
    /// # Errors
    ///
    /// - `BillingError::UnsupportedCartComposition` unless the order has one line item.
    /// - `BillingError::InvalidStartDate` for a start day outside `2..=27`.
    /// - `BillingError::UnsupportedBillingPeriod` for unknown store periods.
    /// - `BillingError::PlanCreationFailed`, `CustomerCreationFailed` or
    ///   `SubscriptionCreationFailed` when the gateway rejects a call.
    /// - `BillingError::NotFound` when the order, its subscription record or
    ///   the product terms are missing.
    pub async fn create_subscription(&self, order_id: OrderId) -> Result<CreatedSubscription> {
        let order = self.load_order(order_id).await?;
        let line_item = order.subscription_item()?;
        let record = self.load_record(order_id).await?;
        let terms = self.load_terms(line_item).await?;
        let currency = self.commerce.currency().await?;

        let schedule = SubscriptionTerms::new(&terms, &record, self.clock.now())?;

        let mut plan_args = PlanArgs::new(
            record.total,
            &record.billing_period,
            record.billing_interval,
            &line_item.name,
            &currency,
        )?;
        self.settle(&mut plan_args.item)?;

        let addons = if schedule.has_sign_up_fee() {
            let mut fee = Item::from_decimal(&line_item.name, schedule.sign_up_fee, &currency)?;
            self.settle(&mut fee)?;
            vec![Addon { item: fee }]
        } else {
            Vec::new()
        };

        let plan = self
            .reconciler
            .resolve(line_item.product_id, &plan_args)
            .await?;
        let customer_id = self.customer_id(&order).await?;

        let request = SubscriptionRequest {
            customer_id,
            plan_id: plan.plan_id.clone(),
            quantity: line_item.quantity,
            total_count: schedule.total_count,
            customer_notify: u8::from(self.customer_notify),
            start_at: schedule.start_at,
            addons,
            notes: SubscriptionNotes {
                order_id,
                product_id: line_item.product_id,
            },
        };

        tracing::debug!(
            order_id = %order_id,
            plan_id = %request.plan_id,
            total_count = request.total_count,
            start_at = ?request.start_at,
            addons = request.addons.len(),
            "Creating gateway subscription"
        );

        let subscription = self
            .gateway
            .create_subscription(&request)
            .await
            .map_err(|e| {
                tracing::error!(order_id = %order_id, error = %e, "Subscription creation failed");
                BillingError::SubscriptionCreationFailed { message: e.message }
            })?;

        tracing::info!(
            order_id = %order_id,
            subscription_id = %subscription.id,
            plan_id = %plan.plan_id,
            plan_created = plan.created,
            "Created gateway subscription"
        );

        Ok(CreatedSubscription {
            subscription_id: subscription.id,
            plan_id: plan.plan_id,
            plan_created: plan.created,
        })
    }

    /// Cancel a gateway subscription.
    ///
    /// # Errors
    ///
    /// Returns `BillingError::SubscriptionCancellationFailed` if the
    /// subscription cannot be fetched or cancelled.
    pub async fn cancel_subscription(&self, subscription_id: &SubscriptionId) -> Result<()> {
        let cancellation_failed = |e: crate::gateway::GatewayError| {
            tracing::error!(
                subscription_id = %subscription_id,
                error = %e,
                "Subscription cancellation failed"
            );
            BillingError::SubscriptionCancellationFailed { message: e.message }
        };

        let subscription = self
            .gateway
            .fetch_subscription(subscription_id)
            .await
            .map_err(cancellation_failed)?;

        self.gateway
            .cancel_subscription(&subscription.id)
            .await
            .map_err(cancellation_failed)?;

        tracing::info!(subscription_id = %subscription_id, "Cancelled gateway subscription");

        Ok(())
    }

    /// The amount shown at checkout: recurring total plus sign-up fee.
    ///
    /// # Errors
    ///
    /// - `BillingError::UnsupportedCartComposition` unless the order has one line item.
    /// - `BillingError::NotFound` when a store record is missing.
    pub async fn display_amount(&self, order_id: OrderId) -> Result<DisplayAmount> {
        let order = self.load_order(order_id).await?;
        let line_item = order.subscription_item()?;
        let record = self.load_record(order_id).await?;
        let terms = self.load_terms(line_item).await?;

        Ok(DisplayAmount {
            amount: record.total + terms.sign_up_fee,
            currency: self.commerce.currency().await?,
        })
    }

    /// Create the gateway customer for the buyer, or get the existing one.
    async fn customer_id(&self, order: &Order) -> Result<CustomerId> {
        let request = CustomerRequest::reuse_existing(&order.customer);

        let customer = self.gateway.create_customer(&request).await.map_err(|e| {
            tracing::error!(order_id = %order.id, error = %e, "Customer creation failed");
            BillingError::CustomerCreationFailed { message: e.message }
        })?;

        Ok(customer.id)
    }

    /// Convert an item into the base currency when it is priced in another one.
    fn settle(&self, item: &mut Item) -> Result<()> {
        if item.currency == self.base_currency {
            return Ok(());
        }

        let from = item.currency.clone();
        self.converter
            .convert(item)
            .map_err(|e| BillingError::CurrencyConversion(e.0))?;

        tracing::debug!(from = %from, to = %item.currency, amount = item.amount, "Converted item");

        Ok(())
    }

    async fn load_order(&self, order_id: OrderId) -> Result<Order> {
        self.commerce
            .order(order_id)
            .await?
            .ok_or_else(|| BillingError::NotFound {
                entity: "order",
                id: order_id.to_string(),
            })
    }

    async fn load_record(&self, order_id: OrderId) -> Result<SubscriptionRecord> {
        self.commerce
            .subscription_for_order(order_id)
            .await?
            .ok_or_else(|| BillingError::NotFound {
                entity: "subscription record",
                id: order_id.to_string(),
            })
    }

    async fn load_terms(&self, line_item: &LineItem) -> Result<ProductTerms> {
        self.commerce
            .product_terms(line_item.product_id)
            .await?
            .ok_or_else(|| BillingError::NotFound {
                entity: "product",
                id: line_item.product_id.to_string(),
            })
    }
}
