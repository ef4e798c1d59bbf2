//! In-memory storage implementation.

use std::collections::HashMap;
use std::sync::RwLock;

use rzp_subs_core::{ProductId, StoredPlan};

use crate::error::{Result, StoreError};
use crate::PlanStore;

/// A `PlanStore` backed by a `HashMap`.
#[derive(Debug, Default)]
pub struct MemoryStore {
    plans: RwLock<HashMap<ProductId, StoredPlan>>,
}

impl MemoryStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of products with a stored plan.
    ///
    /// # Errors
    ///
    /// Returns an error if the lock is poisoned.
    pub fn len(&self) -> Result<usize> {
        Ok(self.read()?.len())
    }

    /// Whether no product has a stored plan.
    ///
    /// # Errors
    ///
    /// Returns an error if the lock is poisoned.
    pub fn is_empty(&self) -> Result<bool> {
        Ok(self.read()?.is_empty())
    }

    fn read(&self) -> Result<std::sync::RwLockReadGuard<'_, HashMap<ProductId, StoredPlan>>> {
        self.plans
            .read()
            .map_err(|e| StoreError::Database(e.to_string()))
    }

    fn write(&self) -> Result<std::sync::RwLockWriteGuard<'_, HashMap<ProductId, StoredPlan>>> {
        self.plans
            .write()
            .map_err(|e| StoreError::Database(e.to_string()))
    }
}

impl PlanStore for MemoryStore {
    fn get_plan(&self, product_id: &ProductId) -> Result<Option<StoredPlan>> {
        Ok(self.read()?.get(product_id).cloned())
    }

    fn put_plan(&self, product_id: &ProductId, plan: &StoredPlan) -> Result<()> {
        self.write()?.insert(*product_id, plan.clone());
        Ok(())
    }

    fn delete_plan(&self, product_id: &ProductId) -> Result<()> {
        self.write()?.remove(product_id);
        Ok(())
    }
}
