//! Plan metadata storage for rzp-subs.
//!
//! Each product carries at most one current plan mapping: the key of the
//! price/cadence it was created for and the gateway plan id. The reconciler
//! reads it before talking to the gateway and replaces it after creating a
//! plan.
//!
//! # Backends
//!
//! - [`MemoryStore`]: process-local map, for tests and single-process setups.
//! - `RocksStore` (feature `rocksdb-backend`): persistent, one column family
//!   keyed by product id.
//!
//! # Example
//!
//! ```
//! use rzp_subs_core::{BillingPeriod, PlanKey, ProductId, StoredPlan};
//! use rzp_subs_store::{MemoryStore, PlanStore};
//!
//! let store = MemoryStore::new();
//! let product = ProductId::new(42);
//! let entry = StoredPlan {
//!     key: PlanKey::derive(49900, BillingPeriod::Monthly, 1),
//!     plan_id: "plan_00000000000001".parse().unwrap(),
//! };
//!
//! store.put_plan(&product, &entry).unwrap();
//! assert_eq!(store.get_plan(&product).unwrap(), Some(entry));
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod error;
pub mod memory;

#[cfg(feature = "rocksdb-backend")]
pub mod keys;
#[cfg(feature = "rocksdb-backend")]
pub mod rocks;
#[cfg(feature = "rocksdb-backend")]
pub mod schema;

pub use error::{Result, StoreError};
pub use memory::MemoryStore;
#[cfg(feature = "rocksdb-backend")]
pub use rocks::RocksStore;

use rzp_subs_core::{ProductId, StoredPlan};

/// Per-product plan metadata operations.
///
/// Writes are last-writer-wins; there is no compare-and-swap.
pub trait PlanStore: Send + Sync {
    /// Get the current plan mapping of a product.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    fn get_plan(&self, product_id: &ProductId) -> Result<Option<StoredPlan>>;

    /// Insert or overwrite the plan mapping of a product.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    fn put_plan(&self, product_id: &ProductId, plan: &StoredPlan) -> Result<()>;

    /// Remove the plan mapping of a product. Removing a missing entry is not an error.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    fn delete_plan(&self, product_id: &ProductId) -> Result<()>;
}
