//! Storage layer for Outlay
//!
//! Provides JSON file storage with atomic writes, one file per entity kind.
//! All repositories are keyed by owner first; cross-owner data never mixes.

pub mod budgets;
pub mod categories;
pub mod expenses;
pub mod file_io;

pub use budgets::BudgetRepository;
pub use categories::CategoryRepository;
pub use expenses::ExpenseRepository;
pub use file_io::{read_json, write_json_atomic};

use crate::config::paths::OutlayPaths;
use crate::error::OutlayError;

/// Main storage coordinator that provides access to all repositories
pub struct Storage {
    paths: OutlayPaths,
    pub categories: CategoryRepository,
    pub budgets: BudgetRepository,
    pub expenses: ExpenseRepository,
}

impl Storage {
    /// Create a new Storage instance
    pub fn new(paths: OutlayPaths) -> Result<Self, OutlayError> {
        paths.ensure_directories()?;

        Ok(Self {
            categories: CategoryRepository::new(paths.categories_file()),
            budgets: BudgetRepository::new(paths.budgets_file()),
            expenses: ExpenseRepository::new(paths.expenses_file()),
            paths,
        })
    }

    /// Get the paths configuration
    pub fn paths(&self) -> &OutlayPaths {
        &self.paths
    }

    /// Load all data from disk
    pub fn load_all(&mut self) -> Result<(), OutlayError> {
        self.categories.load()?;
        self.budgets.load()?;
        self.expenses.load()?;
        Ok(())
    }

    /// Save all data to disk
    pub fn save_all(&self) -> Result<(), OutlayError> {
        self.categories.save()?;
        self.budgets.save()?;
        self.expenses.save()?;
        Ok(())
    }
}
