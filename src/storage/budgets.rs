//! Budget repository for JSON storage
//!
//! At most one budget row exists per `(owner, category_name)`. The merge
//! semantics (amount accumulates, threshold is replaced) live here because
//! they are a property of the store, not of any one caller.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::RwLock;

use crate::error::OutlayError;
use crate::models::{Budget, Money};

use super::file_io::{read_json, write_json_atomic};

/// Serializable budget data structure
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
struct BudgetData {
    budgets: Vec<Budget>,
}

/// Repository for budget persistence
pub struct BudgetRepository {
    path: PathBuf,
    data: RwLock<HashMap<(String, String), Budget>>,
}

impl BudgetRepository {
    /// Create a new budget repository
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            data: RwLock::new(HashMap::new()),
        }
    }

    /// Load budgets from disk
    pub fn load(&self) -> Result<(), OutlayError> {
        let file_data: BudgetData = read_json(&self.path)?;

        let mut data = self
            .data
            .write()
            .map_err(|e| OutlayError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        data.clear();
        for budget in file_data.budgets {
            data.insert((budget.owner.clone(), budget.category_name.clone()), budget);
        }

        Ok(())
    }

    /// Save budgets to disk
    pub fn save(&self) -> Result<(), OutlayError> {
        let data = self
            .data
            .read()
            .map_err(|e| OutlayError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        let mut budgets: Vec<_> = data.values().cloned().collect();
        budgets.sort_by(|a, b| {
            (&a.owner, &a.category_name).cmp(&(&b.owner, &b.category_name))
        });

        let file_data = BudgetData { budgets };
        write_json_atomic(&self.path, &file_data)
    }

    /// Get the budget for an owner's category
    pub fn get(&self, owner: &str, category_name: &str) -> Result<Option<Budget>, OutlayError> {
        let data = self
            .data
            .read()
            .map_err(|e| OutlayError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        Ok(data
            .get(&(owner.to_string(), category_name.to_string()))
            .cloned())
    }

    /// List an owner's budgets sorted lexicographically by category name
    pub fn list_for_owner(&self, owner: &str) -> Result<Vec<Budget>, OutlayError> {
        let data = self
            .data
            .read()
            .map_err(|e| OutlayError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        let mut list: Vec<_> = data
            .values()
            .filter(|b| b.owner == owner)
            .cloned()
            .collect();
        list.sort_by(|a, b| a.category_name.cmp(&b.category_name));
        Ok(list)
    }

    /// Merge a submission into the budget for `(owner, category_name)`
    ///
    /// An existing row accumulates `delta` into its amount and takes the new
    /// threshold; otherwise a fresh row is created with `amount = delta`.
    /// Returns the resulting budget.
    pub fn upsert_merge(
        &self,
        owner: &str,
        category_name: &str,
        delta: Money,
        threshold_pct: u8,
    ) -> Result<Budget, OutlayError> {
        let mut data = self
            .data
            .write()
            .map_err(|e| OutlayError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        let key = (owner.to_string(), category_name.to_string());
        let budget = match data.get_mut(&key) {
            Some(existing) => {
                existing.merge(delta, threshold_pct);
                existing.clone()
            }
            None => {
                let fresh = Budget::new(owner, category_name, delta, threshold_pct);
                data.insert(key, fresh.clone());
                fresh
            }
        };

        Ok(budget)
    }

    /// Delete a budget; idempotent, returns whether it was present
    pub fn delete(&self, owner: &str, category_name: &str) -> Result<bool, OutlayError> {
        let mut data = self
            .data
            .write()
            .map_err(|e| OutlayError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        Ok(data
            .remove(&(owner.to_string(), category_name.to_string()))
            .is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn create_test_repo() -> (TempDir, BudgetRepository) {
        let temp_dir = TempDir::new().unwrap();
        let repo = BudgetRepository::new(temp_dir.path().join("budgets.json"));
        repo.load().unwrap();
        (temp_dir, repo)
    }

    #[test]
    fn test_upsert_creates_then_merges() {
        let (_temp_dir, repo) = create_test_repo();

        let first = repo
            .upsert_merge("alice", "Food", Money::from_cents(10000), 50)
            .unwrap();
        assert_eq!(first.amount.cents(), 10000);
        assert_eq!(first.threshold_pct, 50);

        let merged = repo
            .upsert_merge("alice", "Food", Money::from_cents(5000), 80)
            .unwrap();
        assert_eq!(merged.amount.cents(), 15000);
        assert_eq!(merged.threshold_pct, 80);
    }

    #[test]
    fn test_get_missing() {
        let (_temp_dir, repo) = create_test_repo();
        assert!(repo.get("alice", "Food").unwrap().is_none());
    }

    #[test]
    fn test_delete_idempotent() {
        let (_temp_dir, repo) = create_test_repo();

        repo.upsert_merge("alice", "Food", Money::from_cents(100), 50)
            .unwrap();
        assert!(repo.delete("alice", "Food").unwrap());
        assert!(!repo.delete("alice", "Food").unwrap());
    }

    #[test]
    fn test_save_and_reload() {
        let (temp_dir, repo) = create_test_repo();

        repo.upsert_merge("alice", "Food", Money::from_cents(10000), 50)
            .unwrap();
        repo.save().unwrap();

        let repo2 = BudgetRepository::new(temp_dir.path().join("budgets.json"));
        repo2.load().unwrap();
        let loaded = repo2.get("alice", "Food").unwrap().unwrap();
        assert_eq!(loaded.amount.cents(), 10000);
    }

    #[test]
    fn test_list_sorted_per_owner() {
        let (_temp_dir, repo) = create_test_repo();

        repo.upsert_merge("alice", "Transport", Money::from_cents(100), 50)
            .unwrap();
        repo.upsert_merge("alice", "Food", Money::from_cents(100), 50)
            .unwrap();
        repo.upsert_merge("bob", "Books", Money::from_cents(100), 50)
            .unwrap();

        let names: Vec<_> = repo
            .list_for_owner("alice")
            .unwrap()
            .into_iter()
            .map(|b| b.category_name)
            .collect();
        assert_eq!(names, vec!["Food", "Transport"]);
    }
}
