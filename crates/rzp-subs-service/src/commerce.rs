//! Commerce platform collaborators.
//!
//! The store owns orders, products and its own subscription records; this
//! crate only reads them. Each collaborator is passed in explicitly so the
//! workflow can run against any platform adapter or an in-memory fake.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use rzp_subs_core::{Item, Order, OrderId, ProductId, ProductTerms, SubscriptionRecord};

/// Error returned by commerce platform reads.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{0}")]
pub struct PlatformError(pub String);

impl From<PlatformError> for rzp_subs_core::BillingError {
    fn from(err: PlatformError) -> Self {
        Self::Platform(err.0)
    }
}

/// Read access to the commerce platform.
#[async_trait]
pub trait CommercePlatform: Send + Sync {
    /// Load an order.
    async fn order(&self, order_id: OrderId) -> Result<Option<Order>, PlatformError>;

    /// Load the store subscription created for an order.
    ///
    /// When several exist, the most recent one is returned.
    async fn subscription_for_order(
        &self,
        order_id: OrderId,
    ) -> Result<Option<SubscriptionRecord>, PlatformError>;

    /// Load the subscription settings of a product.
    async fn product_terms(&self, product_id: ProductId)
        -> Result<Option<ProductTerms>, PlatformError>;

    /// The store currency (ISO 4217).
    async fn currency(&self) -> Result<String, PlatformError>;
}

/// Error returned by a currency converter.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{0}")]
pub struct ConversionError(pub String);

/// Converts an item into the gateway's settlement currency.
///
/// Called only for items whose currency differs from the base currency. The
/// converter rewrites both the amount and the currency in place.
pub trait CurrencyConverter: Send + Sync {
    /// Convert `item` into the settlement currency.
    ///
    /// # Errors
    ///
    /// Returns an error when no rate is available for the item's currency.
    fn convert(&self, item: &mut Item) -> Result<(), ConversionError>;
}

/// Source of the current time.
pub trait Clock: Send + Sync {
    /// The current instant.
    fn now(&self) -> DateTime<Utc>;
}

/// The system clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}
