//! Error types for plan metadata storage.

/// Result type for storage operations.
pub type Result<T> = std::result::Result<T, StoreError>;

/// Errors that can occur in storage operations.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Database operation failed.
    #[error("database error: {0}")]
    Database(String),

    /// Serialization/deserialization failed.
    #[error("serialization error: {0}")]
    Serialization(String),
}

impl From<StoreError> for rzp_subs_core::BillingError {
    fn from(err: StoreError) -> Self {
        Self::Storage(err.to_string())
    }
}
