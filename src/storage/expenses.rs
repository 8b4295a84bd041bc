//! Ledger repository for JSON storage
//!
//! The ledger is append-only: records are never edited, and the only removal
//! path is the cascade when a category is deleted. Ids are assigned
//! sequentially on append, like an auto-increment column.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::RwLock;

use chrono::NaiveDate;

use crate::error::OutlayError;
use crate::models::{Expense, Money};

use super::file_io::{read_json, write_json_atomic};

/// Serializable ledger data structure
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
struct LedgerData {
    next_id: u64,
    expenses: Vec<Expense>,
}

/// Repository for expense persistence
pub struct ExpenseRepository {
    path: PathBuf,
    data: RwLock<LedgerData>,
}

impl ExpenseRepository {
    /// Create a new expense repository
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            data: RwLock::new(LedgerData {
                next_id: 1,
                expenses: Vec::new(),
            }),
        }
    }

    /// Load the ledger from disk
    pub fn load(&self) -> Result<(), OutlayError> {
        let mut file_data: LedgerData = read_json(&self.path)?;

        // Re-derive the counter defensively in case the file predates it
        let max_id = file_data.expenses.iter().map(|e| e.id).max().unwrap_or(0);
        if file_data.next_id <= max_id {
            file_data.next_id = max_id + 1;
        }
        if file_data.next_id == 0 {
            file_data.next_id = 1;
        }

        let mut data = self
            .data
            .write()
            .map_err(|e| OutlayError::Storage(format!("Failed to acquire write lock: {}", e)))?;
        *data = file_data;

        Ok(())
    }

    /// Save the ledger to disk
    pub fn save(&self) -> Result<(), OutlayError> {
        let data = self
            .data
            .read()
            .map_err(|e| OutlayError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        write_json_atomic(&self.path, &*data)
    }

    /// Append an expense, assigning its id; returns the stored record
    pub fn append(&self, mut expense: Expense) -> Result<Expense, OutlayError> {
        let mut data = self
            .data
            .write()
            .map_err(|e| OutlayError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        expense.id = data.next_id;
        data.next_id += 1;
        data.expenses.push(expense.clone());

        Ok(expense)
    }

    /// Sum of countable (amount > 0) spend for an owner's category
    pub fn sum_for_category(&self, owner: &str, category_name: &str) -> Result<Money, OutlayError> {
        let data = self
            .data
            .read()
            .map_err(|e| OutlayError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        Ok(data
            .expenses
            .iter()
            .filter(|e| e.owner == owner && e.category_name == category_name && e.is_countable())
            .map(|e| e.amount)
            .sum())
    }

    /// Countable spend per category for an owner
    pub fn spend_by_category(&self, owner: &str) -> Result<HashMap<String, Money>, OutlayError> {
        let data = self
            .data
            .read()
            .map_err(|e| OutlayError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        let mut sums: HashMap<String, Money> = HashMap::new();
        for expense in data
            .expenses
            .iter()
            .filter(|e| e.owner == owner && e.is_countable())
        {
            *sums
                .entry(expense.category_name.clone())
                .or_insert_with(Money::zero) += expense.amount;
        }

        Ok(sums)
    }

    /// Countable expenses for an owner within a date range and category set,
    /// sorted by date ascending (ties broken by insert order)
    pub fn filtered(
        &self,
        owner: &str,
        category_names: &[String],
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<Expense>, OutlayError> {
        let data = self
            .data
            .read()
            .map_err(|e| OutlayError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        let mut list: Vec<_> = data
            .expenses
            .iter()
            .filter(|e| {
                e.owner == owner
                    && e.is_countable()
                    && e.date >= start
                    && e.date <= end
                    && category_names.iter().any(|c| c == &e.category_name)
            })
            .cloned()
            .collect();
        list.sort_by_key(|e| (e.date, e.id));

        Ok(list)
    }

    /// Remove every expense (sentinel included) for an owner's category;
    /// returns how many records were removed
    pub fn delete_for_category(
        &self,
        owner: &str,
        category_name: &str,
    ) -> Result<usize, OutlayError> {
        let mut data = self
            .data
            .write()
            .map_err(|e| OutlayError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        let before = data.expenses.len();
        data.expenses
            .retain(|e| !(e.owner == owner && e.category_name == category_name));

        Ok(before - data.expenses.len())
    }

    /// Count all ledger records across owners (sentinels included)
    pub fn count(&self) -> Result<usize, OutlayError> {
        let data = self
            .data
            .read()
            .map_err(|e| OutlayError::Storage(format!("Failed to acquire read lock: {}", e)))?;
        Ok(data.expenses.len())
    }
}
