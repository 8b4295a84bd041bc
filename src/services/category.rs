//! Category service
//!
//! Business logic for category management. Creating a category also records
//! the zero-amount sentinel expense and seeds its budget; deleting one is
//! only permitted while the category has no countable spend, and cascades to
//! the budget and the ledger rows.

use chrono::Local;

use crate::error::{OutlayError, OutlayResult};
use crate::models::{Budget, Category, Expense, Money};
use crate::storage::Storage;

/// Service for category management
pub struct CategoryService<'a> {
    storage: &'a Storage,
}

/// What an "add/modify category" submission did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CategoryChange {
    /// A fresh category (and budget) was created
    Created,
    /// The category existed; its budget was topped up
    Merged,
}

/// Result of a category removal request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RemovalOutcome {
    /// Category, budget, and ledger rows were removed
    Removed,
    /// No such category; nothing to do
    Missing,
    /// Blocked: the category still has countable spend
    HasExpenses { spent: Money },
}

impl<'a> CategoryService<'a> {
    /// Create a new category service
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// List an owner's categories sorted lexicographically by name
    pub fn list(&self, owner: &str) -> OutlayResult<Vec<Category>> {
        self.storage.categories.list_for_owner(owner)
    }

    /// Create a new category
    ///
    /// Also records the sentinel expense so aggregate queries see the
    /// category from day one. Fails with `Duplicate` if `(owner, name)`
    /// already exists; nothing is mutated in that case.
    pub fn create(&self, owner: &str, name: &str) -> OutlayResult<Category> {
        let name = name.trim();

        let category = Category::new(owner, name);
        category
            .validate()
            .map_err(|e| OutlayError::Validation(e.to_string()))?;

        if self.storage.categories.get(owner, name)?.is_some() {
            return Err(OutlayError::Duplicate {
                entity_type: "Category",
                identifier: name.to_string(),
            });
        }

        self.storage.categories.upsert(category.clone())?;
        self.storage.categories.save()?;

        let today = Local::now().date_naive();
        self.storage
            .expenses
            .append(Expense::sentinel(owner, name, today))?;
        self.storage.expenses.save()?;

        Ok(category)
    }

    /// The "add/modify category" user action
    ///
    /// Creates the category (with sentinel) when it does not exist yet, then
    /// merges the budget submission: the amount tops up the running cap, the
    /// threshold replaces the previous one.
    pub fn add_or_modify(
        &self,
        owner: &str,
        name: &str,
        budget_delta: Money,
        threshold_pct: u8,
    ) -> OutlayResult<(CategoryChange, Budget)> {
        let name = name.trim();

        if budget_delta.is_negative() {
            return Err(OutlayError::Validation(
                "Budget amount cannot be negative".into(),
            ));
        }
        if threshold_pct > 100 {
            return Err(OutlayError::Validation(format!(
                "Threshold percentage {} is out of range (0-100)",
                threshold_pct
            )));
        }

        let change = match self.create(owner, name) {
            Ok(_) => CategoryChange::Created,
            Err(OutlayError::Duplicate { .. }) => CategoryChange::Merged,
            Err(e) => return Err(e),
        };

        let budget = self
            .storage
            .budgets
            .upsert_merge(owner, name, budget_delta, threshold_pct)?;
        self.storage.budgets.save()?;

        Ok((change, budget))
    }

    /// Delete a category together with its budget and ledger rows
    ///
    /// The zero-spend invariant is checked first: a category with countable
    /// spend blocks deletion and nothing is mutated. Deleting an absent name
    /// reports `Missing` rather than an error.
    pub fn delete(&self, owner: &str, name: &str) -> OutlayResult<RemovalOutcome> {
        if self.storage.categories.get(owner, name)?.is_none() {
            return Ok(RemovalOutcome::Missing);
        }

        let spent = self.storage.expenses.sum_for_category(owner, name)?;
        if spent.is_positive() {
            return Ok(RemovalOutcome::HasExpenses { spent });
        }

        self.storage.expenses.delete_for_category(owner, name)?;
        self.storage.categories.delete(owner, name)?;
        self.storage.budgets.delete(owner, name)?;
        self.storage.save_all()?;

        Ok(RemovalOutcome::Removed)
    }
}
