//! Service configuration.

use rzp_subs_core::DEFAULT_BASE_CURRENCY;

/// Service configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    /// Gateway settlement currency; other currencies are converted (default: "INR").
    pub base_currency: String,

    /// Whether the gateway notifies customers about charges itself (default: false).
    pub customer_notify: bool,

    /// Path to the `RocksDB` plan metadata directory (default: "/data/rzp-subs").
    pub plan_store_path: String,

    /// CORS allowed origins.
    pub cors_origins: Vec<String>,

    /// Maximum request body size in bytes.
    pub max_body_bytes: usize,

    /// Request timeout in seconds.
    pub request_timeout_seconds: u64,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            base_currency: DEFAULT_BASE_CURRENCY.to_string(),
            customer_notify: false,
            plan_store_path: "/data/rzp-subs".to_string(),
            cors_origins: vec!["*".to_string()],
            max_body_bytes: 1024 * 1024, // 1MB
            request_timeout_seconds: 30,
        }
    }
}

impl ServiceConfig {
    /// Load configuration from environment variables.
    ///
    /// Unset or unparsable variables fall back to [`ServiceConfig::default`].
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    #[must_use]
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        Self {
            base_currency: lookup("BASE_CURRENCY")
                .map(|s| s.trim().to_uppercase())
                .filter(|s| !s.is_empty())
                .unwrap_or(defaults.base_currency),
            customer_notify: lookup("CUSTOMER_NOTIFY")
                .and_then(|s| parse_flag(&s))
                .unwrap_or(defaults.customer_notify),
            plan_store_path: lookup("PLAN_STORE_PATH").unwrap_or(defaults.plan_store_path),
            cors_origins: lookup("CORS_ORIGINS").map_or(defaults.cors_origins, |s| {
                s.split(',').map(|o| o.trim().to_string()).collect()
            }),
            max_body_bytes: lookup("MAX_BODY_BYTES")
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.max_body_bytes),
            request_timeout_seconds: lookup("REQUEST_TIMEOUT_SECONDS")
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.request_timeout_seconds),
        }
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" => Some(true),
        "0" | "false" | "no" => Some(false),
        _ => None,
    }
}
