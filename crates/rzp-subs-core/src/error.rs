//! Error types for rzp-subs.

use crate::ids::IdError;

/// Result type for rzp-subs operations.
pub type Result<T> = std::result::Result<T, BillingError>;

/// Errors that can occur while reconciling plans and creating subscriptions.
///
/// Every gateway-facing variant carries the gateway's message when one is
/// available. None of them are retried by this crate.
#[derive(Debug, thiserror::Error)]
pub enum BillingError {
    /// The store billing period has no gateway equivalent.
    #[error("unsupported billing period: {period:?}")]
    UnsupportedBillingPeriod {
        /// The store-native period string.
        period: String,
    },

    /// The billing interval is zero or too large to normalize.
    #[error("invalid billing interval: {interval}")]
    InvalidBillingInterval {
        /// The rejected interval.
        interval: u32,
    },

    /// The custom start day saved on the product is outside `2..=27`.
    #[error("invalid start day saved as subscription product metadata: {day}")]
    InvalidStartDate {
        /// The rejected day of month.
        day: u32,
    },

    /// The cart holds anything but a single product bought once.
    #[error(
        "subscriptions require exactly one product in the cart, found {item_count} items"
    )]
    UnsupportedCartComposition {
        /// Number of items in the order, summed over line quantities.
        item_count: usize,
    },

    /// A currency amount cannot be expressed in minor units.
    #[error("invalid amount: {0}")]
    InvalidAmount(String),

    /// The gateway refused to create a plan.
    #[error("plan creation failed: {message}")]
    PlanCreationFailed {
        /// Gateway error message.
        message: String,
    },

    /// The gateway refused to create a subscription.
    #[error("subscription creation failed: {message}")]
    SubscriptionCreationFailed {
        /// Gateway error message.
        message: String,
    },

    /// The gateway subscription could not be fetched or cancelled.
    #[error("subscription cancellation failed: {message}")]
    SubscriptionCancellationFailed {
        /// Gateway error message.
        message: String,
    },

    /// The gateway refused to create (or return) the customer.
    #[error("customer creation failed: {message}")]
    CustomerCreationFailed {
        /// Gateway error message.
        message: String,
    },

    /// The currency converter could not convert an item.
    #[error("currency conversion failed: {0}")]
    CurrencyConversion(String),

    /// A store-side record (order, product, subscription) is missing.
    #[error("{entity} not found: {id}")]
    NotFound {
        /// Kind of record.
        entity: &'static str,
        /// Identifier that was looked up.
        id: String,
    },

    /// Plan metadata storage failed.
    #[error("storage error: {0}")]
    Storage(String),

    /// The commerce platform could not be read.
    #[error("commerce platform error: {0}")]
    Platform(String),

    /// Invalid identifier.
    #[error("invalid identifier: {0}")]
    InvalidId(#[from] IdError),
}

impl BillingError {
    /// Stable machine-readable code, surfaced to the checkout front end.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::UnsupportedBillingPeriod { .. } => "UNSUPPORTED_BILLING_PERIOD",
            Self::InvalidBillingInterval { .. } => "INVALID_BILLING_INTERVAL",
            Self::InvalidStartDate { .. } => "SUBSCRIPTION_START_DATE_INVALID",
            Self::UnsupportedCartComposition { .. } => "UNSUPPORTED_CART_COMPOSITION",
            Self::InvalidAmount(_) => "INVALID_AMOUNT",
            Self::PlanCreationFailed { .. } => "API_PLAN_CREATION_FAILED",
            Self::SubscriptionCreationFailed { .. } => "API_SUBSCRIPTION_CREATION_FAILED",
            Self::SubscriptionCancellationFailed { .. } => "API_SUBSCRIPTION_CANCELLATION_FAILED",
            Self::CustomerCreationFailed { .. } => "API_CUSTOMER_CREATION_FAILED",
            Self::CurrencyConversion(_) => "CURRENCY_CONVERSION_FAILED",
            Self::NotFound { .. } => "NOT_FOUND",
            Self::Storage(_) => "STORAGE_ERROR",
            Self::Platform(_) => "PLATFORM_ERROR",
            Self::InvalidId(_) => "INVALID_ID",
        }
    }

    /// Whether the error should be shown to the buyer as a rejected request
    /// rather than an internal failure.
    #[must_use]
    pub const fn is_user_facing(&self) -> bool {
        !matches!(self, Self::Storage(_) | Self::Platform(_))
    }
}
