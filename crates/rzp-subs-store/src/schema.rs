//! Database schema definitions and column families.
//!
//! This module defines the column families used in `RocksDB` storage.

/// Column family names for the `RocksDB` database.
pub mod cf {
    /// Current plan mapping per product, keyed by `product_id` (big-endian u64).
    pub const PRODUCT_PLANS: &str = "product_plans";
}

/// Returns all column family names for database initialization.
#[must_use]
pub fn all_column_families() -> Vec<&'static str> {
    vec![cf::PRODUCT_PLANS]
}
