//! Common test utilities for rzp-subs integration tests.

#![allow(dead_code)] // Some utilities are used by different test files

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum_test::TestServer;
use chrono::{DateTime, TimeZone, Utc};
use rust_decimal::Decimal;

use rzp_subs_core::{
    CustomerId, CustomerInfo, Item, LineItem, Order, OrderId, PlanArgs, PlanId, ProductId,
    ProductTerms, SubscriptionId, SubscriptionRecord, SubscriptionRequest,
};
use rzp_subs_service::{
    create_router, AppState, Clock, CommercePlatform, ConversionError, CurrencyConverter,
    Customer, CustomerRequest, Gateway, GatewayError, Plan, PlanItem, PlanLookup, PlatformError,
    ServiceConfig, Subscription, SubscriptionService,
};
use rzp_subs_store::MemoryStore;

pub const ORDER_ID: u64 = 1001;
pub const PRODUCT_ID: u64 = 42;
pub const PRODUCT_NAME: &str = "Pro Plan";

// ============================================================================
// Gateway
// ============================================================================

/// Gateway operations whose failure can be injected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Op {
    CreatePlan,
    FetchPlan,
    CreateSubscription,
    FetchSubscription,
    CancelSubscription,
    CreateCustomer,
}

/// Number of calls made per gateway operation.
#[derive(Debug, Clone, Default)]
pub struct Calls(HashMap<Op, usize>);

impl Calls {
    pub fn of(&self, op: Op) -> usize {
        self.0.get(&op).copied().unwrap_or(0)
    }

    pub fn total(&self) -> usize {
        self.0.values().sum()
    }
}

#[derive(Default)]
struct GatewayState {
    plans: HashMap<String, Plan>,
    subscriptions: HashMap<String, Subscription>,
    next_id: u32,
    calls: Calls,
    failing: HashMap<Op, String>,
    transient_fetch: bool,
    last_subscription: Option<SubscriptionRequest>,
    last_customer: Option<CustomerRequest>,
}

impl GatewayState {
    fn record(&mut self, op: Op) -> Result<(), GatewayError> {
        *self.calls.0.entry(op).or_insert(0) += 1;
        match self.failing.get(&op) {
            Some(message) => Err(GatewayError::new(message.clone())),
            None => Ok(()),
        }
    }

    fn next_id(&mut self, prefix: &str) -> String {
        self.next_id += 1;
        format!("{prefix}_{:04}", self.next_id)
    }
}

/// In-memory gateway that records every call.
#[derive(Default)]
pub struct MockGateway {
    state: Mutex<GatewayState>,
}

impl MockGateway {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every call of `op` fail with `message`.
    pub fn fail(&self, op: Op, message: &str) {
        self.state
            .lock()
            .unwrap()
            .failing
            .insert(op, message.to_string());
    }

    /// Stop injecting failures for `op`.
    pub fn recover(&self, op: Op) {
        self.state.lock().unwrap().failing.remove(&op);
    }

    /// Make plan fetches fail with a transient error.
    pub fn fail_fetch_transiently(&self) {
        self.state.lock().unwrap().transient_fetch = true;
    }

    /// Change the amount of an existing plan behind the store's back.
    pub fn set_plan_amount(&self, plan_id: &PlanId, amount: i64) {
        let mut state = self.state.lock().unwrap();
        let plan = state.plans.get_mut(plan_id.as_str()).unwrap();
        plan.item.amount = amount;
    }

    /// Delete a plan from the gateway.
    pub fn forget_plan(&self, plan_id: &PlanId) {
        self.state.lock().unwrap().plans.remove(plan_id.as_str());
    }

    pub fn plan(&self, plan_id: &PlanId) -> Option<Plan> {
        self.state.lock().unwrap().plans.get(plan_id.as_str()).cloned()
    }

    pub fn subscription(&self, subscription_id: &SubscriptionId) -> Option<Subscription> {
        self.state
            .lock()
            .unwrap()
            .subscriptions
            .get(subscription_id.as_str())
            .cloned()
    }

    pub fn calls(&self) -> Calls {
        self.state.lock().unwrap().calls.clone()
    }

    pub fn last_subscription(&self) -> Option<SubscriptionRequest> {
        self.state.lock().unwrap().last_subscription.clone()
    }

    pub fn last_customer(&self) -> Option<CustomerRequest> {
        self.state.lock().unwrap().last_customer.clone()
    }
}

#[async_trait]
impl Gateway for MockGateway {
    async fn create_plan(&self, args: &PlanArgs) -> Result<Plan, GatewayError> {
        let mut state = self.state.lock().unwrap();
        state.record(Op::CreatePlan)?;

        let id = state.next_id("plan");
        let plan = Plan {
            id: id.parse().unwrap(),
            item: PlanItem {
                amount: args.item.amount,
                currency: Some(args.item.currency.clone()),
                name: Some(args.item.name.clone()),
            },
            period: Some(args.period.to_string()),
            interval: Some(args.interval),
        };
        state.plans.insert(id, plan.clone());
        Ok(plan)
    }

    async fn fetch_plan(&self, plan_id: &PlanId) -> PlanLookup {
        let mut state = self.state.lock().unwrap();
        if let Err(e) = state.record(Op::FetchPlan) {
            return PlanLookup::TransientError(e.message);
        }
        if state.transient_fetch {
            return PlanLookup::TransientError("gateway timed out".to_string());
        }
        match state.plans.get(plan_id.as_str()) {
            Some(plan) => PlanLookup::Found(plan.clone()),
            None => PlanLookup::NotFound,
        }
    }

    async fn create_subscription(
        &self,
        request: &SubscriptionRequest,
    ) -> Result<Subscription, GatewayError> {
        let mut state = self.state.lock().unwrap();
        state.last_subscription = Some(request.clone());
        state.record(Op::CreateSubscription)?;

        let id = state.next_id("sub");
        let subscription = Subscription {
            id: id.parse().unwrap(),
            plan_id: Some(request.plan_id.clone()),
            status: Some("created".to_string()),
        };
        state.subscriptions.insert(id, subscription.clone());
        Ok(subscription)
    }

    async fn fetch_subscription(
        &self,
        subscription_id: &SubscriptionId,
    ) -> Result<Subscription, GatewayError> {
        let mut state = self.state.lock().unwrap();
        state.record(Op::FetchSubscription)?;

        state
            .subscriptions
            .get(subscription_id.as_str())
            .cloned()
            .ok_or_else(|| GatewayError::new("The id provided does not exist"))
    }

    async fn cancel_subscription(
        &self,
        subscription_id: &SubscriptionId,
    ) -> Result<Subscription, GatewayError> {
        let mut state = self.state.lock().unwrap();
        state.record(Op::CancelSubscription)?;

        let subscription = state
            .subscriptions
            .get_mut(subscription_id.as_str())
            .ok_or_else(|| GatewayError::new("The id provided does not exist"))?;
        subscription.status = Some("cancelled".to_string());
        Ok(subscription.clone())
    }

    async fn create_customer(&self, request: &CustomerRequest) -> Result<Customer, GatewayError> {
        let mut state = self.state.lock().unwrap();
        state.last_customer = Some(request.clone());
        state.record(Op::CreateCustomer)?;

        Ok(Customer {
            id: "cust_0001".parse().unwrap(),
            email: Some(request.email.clone()),
        })
    }
}

// ============================================================================
// Commerce platform
// ============================================================================

/// In-memory commerce platform.
pub struct MemoryCommerce {
    pub orders: HashMap<OrderId, Order>,
    pub records: HashMap<OrderId, SubscriptionRecord>,
    pub terms: HashMap<ProductId, ProductTerms>,
    pub currency: String,
}

impl MemoryCommerce {
    /// A store with one single-item order for a monthly product at 499.00 INR.
    pub fn single_order() -> Self {
        let order_id = OrderId::new(ORDER_ID);
        let product_id = ProductId::new(PRODUCT_ID);

        let mut commerce = Self {
            orders: HashMap::new(),
            records: HashMap::new(),
            terms: HashMap::new(),
            currency: "INR".to_string(),
        };

        commerce.orders.insert(
            order_id,
            Order {
                id: order_id,
                line_items: vec![line_item(PRODUCT_ID)],
                customer: CustomerInfo {
                    name: "Asha Rao".to_string(),
                    email: "asha@example.com".to_string(),
                    contact: Some("+919800000000".to_string()),
                },
            },
        );
        commerce.records.insert(
            order_id,
            SubscriptionRecord {
                billing_period: "month".to_string(),
                billing_interval: 1,
                total: Decimal::new(49900, 2),
            },
        );
        commerce.terms.insert(
            product_id,
            ProductTerms {
                sign_up_fee: Decimal::ZERO,
                length: 12,
                start_day: None,
            },
        );

        commerce
    }

    pub fn with_terms(mut self, terms: ProductTerms) -> Self {
        self.terms.insert(ProductId::new(PRODUCT_ID), terms);
        self
    }

    pub fn with_record(mut self, record: SubscriptionRecord) -> Self {
        self.records.insert(OrderId::new(ORDER_ID), record);
        self
    }

    pub fn with_currency(mut self, currency: &str) -> Self {
        self.currency = currency.to_string();
        self
    }

    /// Add a second product to the order.
    pub fn with_extra_item(mut self) -> Self {
        if let Some(order) = self.orders.get_mut(&OrderId::new(ORDER_ID)) {
            order.line_items.push(line_item(PRODUCT_ID + 1));
        }
        self
    }

    /// Buy the order's product `quantity` times on its single line.
    pub fn with_quantity(mut self, quantity: u32) -> Self {
        if let Some(order) = self.orders.get_mut(&OrderId::new(ORDER_ID)) {
            order.line_items[0].quantity = quantity;
        }
        self
    }
}

pub fn line_item(product_id: u64) -> LineItem {
    LineItem {
        product_id: ProductId::new(product_id),
        name: PRODUCT_NAME.to_string(),
        quantity: 1,
    }
}

#[async_trait]
impl CommercePlatform for MemoryCommerce {
    async fn order(&self, order_id: OrderId) -> Result<Option<Order>, PlatformError> {
        Ok(self.orders.get(&order_id).cloned())
    }

    async fn subscription_for_order(
        &self,
        order_id: OrderId,
    ) -> Result<Option<SubscriptionRecord>, PlatformError> {
        Ok(self.records.get(&order_id).cloned())
    }

    async fn product_terms(
        &self,
        product_id: ProductId,
    ) -> Result<Option<ProductTerms>, PlatformError> {
        Ok(self.terms.get(&product_id).cloned())
    }

    async fn currency(&self) -> Result<String, PlatformError> {
        Ok(self.currency.clone())
    }
}

// ============================================================================
// Converter and clock
// ============================================================================

/// Converts into INR at fixed whole-number rates.
pub struct FixedRateConverter {
    rates: HashMap<&'static str, i64>,
}

impl Default for FixedRateConverter {
    fn default() -> Self {
        Self {
            rates: HashMap::from([("USD", 83)]),
        }
    }
}

impl CurrencyConverter for FixedRateConverter {
    fn convert(&self, item: &mut Item) -> Result<(), ConversionError> {
        let rate = self
            .rates
            .get(item.currency.as_str())
            .ok_or_else(|| ConversionError(format!("no rate for {}", item.currency)))?;
        item.amount *= rate;
        item.currency = "INR".to_string();
        Ok(())
    }
}

/// A clock stopped at a fixed instant.
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

/// 15 January 2026, 10:30 UTC.
pub fn checkout_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 1, 15, 10, 30, 0).unwrap()
}

// ============================================================================
// Harness
// ============================================================================

/// Test harness wiring the workflow to in-memory collaborators.
pub struct TestHarness {
    pub gateway: Arc<MockGateway>,
    pub store: Arc<MemoryStore>,
    pub service: SubscriptionService,
    pub config: ServiceConfig,
}

impl TestHarness {
    pub fn new(commerce: MemoryCommerce) -> Self {
        Self::with_config(commerce, ServiceConfig::default())
    }

    pub fn with_config(commerce: MemoryCommerce, config: ServiceConfig) -> Self {
        let gateway = Arc::new(MockGateway::new());
        let store = Arc::new(MemoryStore::new());

        let service = SubscriptionService::new(
            gateway.clone(),
            Arc::new(commerce),
            store.clone(),
            Arc::new(FixedRateConverter::default()),
            &config,
        )
        .with_clock(Arc::new(FixedClock(checkout_time())));

        Self {
            gateway,
            store,
            service,
            config,
        }
    }

    /// HTTP server over the same workflow.
    pub fn server(&self) -> TestServer {
        let state = AppState::new(self.service.clone(), self.config.clone());
        TestServer::new(create_router(state)).expect("Failed to create test server")
    }
}

pub fn order_id() -> OrderId {
    OrderId::new(ORDER_ID)
}

pub fn product_id() -> ProductId {
    ProductId::new(PRODUCT_ID)
}

pub fn customer_id() -> CustomerId {
    "cust_0001".parse().unwrap()
}
