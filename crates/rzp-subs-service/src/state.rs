//! Application state.

use std::sync::Arc;

use crate::config::ServiceConfig;
use crate::subscriptions::SubscriptionService;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    /// The subscription workflow.
    pub subscriptions: Arc<SubscriptionService>,

    /// Service configuration.
    pub config: ServiceConfig,
}

impl AppState {
    /// Create a new application state.
    #[must_use]
    pub fn new(subscriptions: SubscriptionService, config: ServiceConfig) -> Self {
        tracing::info!(
            base_currency = %config.base_currency,
            customer_notify = config.customer_notify,
            "Subscription workflow configured"
        );

        Self {
            subscriptions: Arc::new(subscriptions),
            config,
        }
    }
}

/// Open the persistent plan metadata store at the configured path.
///
/// # Errors
///
/// Returns an error if the database cannot be opened or created.
#[cfg(feature = "rocksdb-backend")]
pub fn open_plan_store(
    config: &ServiceConfig,
) -> rzp_subs_store::Result<Arc<rzp_subs_store::RocksStore>> {
    tracing::info!(path = %config.plan_store_path, "Opening RocksDB plan store");
    rzp_subs_store::RocksStore::open(&config.plan_store_path).map(Arc::new)
}
