//! Budget service
//!
//! Thin validation layer over the budget store. Most budget writes arrive
//! through the category add/modify action; this service covers direct
//! budget queries and the standalone delete.

use crate::error::{OutlayError, OutlayResult};
use crate::models::{Budget, Money};
use crate::storage::Storage;

/// Service for budget management
pub struct BudgetService<'a> {
    storage: &'a Storage,
}

impl<'a> BudgetService<'a> {
    /// Create a new budget service
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Merge a submission into an owner's category budget
    ///
    /// Creates the row if absent; otherwise the amount accumulates and the
    /// threshold is replaced.
    pub fn upsert(
        &self,
        owner: &str,
        category_name: &str,
        delta: Money,
        threshold_pct: u8,
    ) -> OutlayResult<Budget> {
        let candidate = Budget::new(owner, category_name, delta, threshold_pct);
        candidate
            .validate()
            .map_err(|e| OutlayError::Validation(e.to_string()))?;

        let budget = self
            .storage
            .budgets
            .upsert_merge(owner, category_name, delta, threshold_pct)?;
        self.storage.budgets.save()?;
        Ok(budget)
    }

    /// Fetch the budget for an owner's category
    pub fn get(&self, owner: &str, category_name: &str) -> OutlayResult<Budget> {
        self.storage
            .budgets
            .get(owner, category_name)?
            .ok_or_else(|| OutlayError::budget_not_found(category_name))
    }

    /// List an owner's budgets sorted by category name
    pub fn list(&self, owner: &str) -> OutlayResult<Vec<Budget>> {
        self.storage.budgets.list_for_owner(owner)
    }

    /// Delete a budget; idempotent, reports whether a row was removed
    pub fn delete(&self, owner: &str, category_name: &str) -> OutlayResult<bool> {
        let removed = self.storage.budgets.delete(owner, category_name)?;
        if removed {
            self.storage.budgets.save()?;
        }
        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::paths::OutlayPaths;
    use tempfile::TempDir;

    fn create_test_storage() -> (TempDir, Storage) {
        let temp_dir = TempDir::new().unwrap();
        let paths = OutlayPaths::with_base_dir(temp_dir.path().to_path_buf());
        let mut storage = Storage::new(paths).unwrap();
        storage.load_all().unwrap();
        (temp_dir, storage)
    }

    #[test]
    fn test_upsert_then_get() {
        let (_temp_dir, storage) = create_test_storage();
        let service = BudgetService::new(&storage);

        service
            .upsert("alice", "Food", Money::from_cents(10000), 50)
            .unwrap();
        let found = service.get("alice", "Food").unwrap();
        assert_eq!(found.amount.cents(), 10000);
    }

    #[test]
    fn test_get_missing_is_not_found() {
        let (_temp_dir, storage) = create_test_storage();
        let service = BudgetService::new(&storage);

        let result = service.get("alice", "Food");
        assert!(matches!(result, Err(ref e) if e.is_not_found()));
    }

    #[test]
    fn test_upsert_rejects_invalid_threshold() {
        let (_temp_dir, storage) = create_test_storage();
        let service = BudgetService::new(&storage);

        let result = service.upsert("alice", "Food", Money::from_cents(100), 120);
        assert!(matches!(result, Err(OutlayError::Validation(_))));
    }

    #[test]
    fn test_delete_idempotent() {
        let (_temp_dir, storage) = create_test_storage();
        let service = BudgetService::new(&storage);

        service
            .upsert("alice", "Food", Money::from_cents(100), 50)
            .unwrap();
        assert!(service.delete("alice", "Food").unwrap());
        assert!(!service.delete("alice", "Food").unwrap());
    }
}
