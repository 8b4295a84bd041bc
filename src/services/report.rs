//! Report aggregation service
//!
//! Two read-only views over the stores: the per-category chart snapshot and
//! the filtered expense listing. Chart assembly runs on a worker thread that
//! is joined before the snapshot is returned, so callers always see a
//! consistent result.

use std::thread;

use chrono::NaiveDate;

use crate::error::{OutlayError, OutlayResult};
use crate::models::{Budget, Category, Expense, Money};
use crate::storage::Storage;

use super::expense::ExpenseService;

/// Per-category sequences for chart rendering
///
/// All four vectors have the same length and the same index order: the
/// owner's categories sorted lexicographically by name. Categories with no
/// countable spend appear with a zero total.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChartData {
    pub categories: Vec<String>,
    pub spend: Vec<Money>,
    pub budgets: Vec<Money>,
    pub thresholds: Vec<Money>,
}

/// Result of a chart data request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChartSnapshot {
    /// The owner has no categories yet; nothing to chart
    NoCategories,
    /// Aligned sequences ready for rendering
    Ready(ChartData),
}

/// Service for report queries
pub struct ReportService<'a> {
    storage: &'a Storage,
}

impl<'a> ReportService<'a> {
    /// Create a new report service
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Build the chart snapshot for an owner
    ///
    /// Rows are read on the calling thread; assembly of the aligned
    /// sequences is offloaded to a worker thread whose handle is joined
    /// before returning.
    pub fn chart_data(&self, owner: &str) -> OutlayResult<ChartSnapshot> {
        let categories = self.storage.categories.list_for_owner(owner)?;
        if categories.is_empty() {
            return Ok(ChartSnapshot::NoCategories);
        }

        let budgets = self.storage.budgets.list_for_owner(owner)?;
        let spend = self.storage.expenses.spend_by_category(owner)?;

        let handle = thread::spawn(move || assemble_chart(categories, budgets, spend));
        let data = handle
            .join()
            .map_err(|_| OutlayError::Storage("Chart worker thread panicked".into()))?;

        Ok(ChartSnapshot::Ready(data))
    }

    /// Parse and validate a report date range
    ///
    /// Both bounds must be `YYYY-MM-DD`; a malformed bound or a start after
    /// the end is an `InvalidRange` error.
    pub fn parse_range(start: &str, end: &str) -> OutlayResult<(NaiveDate, NaiveDate)> {
        let invalid = || OutlayError::InvalidRange {
            start: start.trim().to_string(),
            end: end.trim().to_string(),
        };

        let start_date = ExpenseService::parse_date(start).map_err(|_| invalid())?;
        let end_date = ExpenseService::parse_date(end).map_err(|_| invalid())?;
        if start_date > end_date {
            return Err(invalid());
        }

        Ok((start_date, end_date))
    }

    /// Countable expenses for an owner within a date range and category set
    ///
    /// The range is inclusive on both ends; the selection must name at least
    /// one category. Results are sorted by date ascending.
    pub fn filtered_expenses(
        &self,
        owner: &str,
        category_names: &[String],
        start: NaiveDate,
        end: NaiveDate,
    ) -> OutlayResult<Vec<Expense>> {
        if category_names.is_empty() {
            return Err(OutlayError::NoCategoriesSelected);
        }
        if start > end {
            return Err(OutlayError::InvalidRange {
                start: start.format("%Y-%m-%d").to_string(),
                end: end.format("%Y-%m-%d").to_string(),
            });
        }

        self.storage.expenses.filtered(owner, category_names, start, end)
    }
}

/// Assemble the aligned chart sequences from raw rows
fn assemble_chart(
    categories: Vec<Category>,
    budgets: Vec<Budget>,
    mut spend: std::collections::HashMap<String, Money>,
) -> ChartData {
    let mut names = Vec::with_capacity(categories.len());
    let mut totals = Vec::with_capacity(categories.len());
    let mut caps = Vec::with_capacity(categories.len());
    let mut thresholds = Vec::with_capacity(categories.len());

    for category in categories {
        let total = spend.remove(&category.name).unwrap_or_else(Money::zero);
        let budget = budgets.iter().find(|b| b.category_name == category.name);

        totals.push(total);
        caps.push(budget.map(|b| b.amount).unwrap_or_else(Money::zero));
        thresholds.push(
            budget
                .map(Budget::threshold_absolute)
                .unwrap_or_else(Money::zero),
        );
        names.push(category.name);
    }

    ChartData {
        categories: names,
        spend: totals,
        budgets: caps,
        thresholds,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::paths::OutlayPaths;
    use crate::services::category::CategoryService;
    use tempfile::TempDir;

    fn create_test_storage() -> (TempDir, Storage) {
        let temp_dir = TempDir::new().unwrap();
        let paths = OutlayPaths::with_base_dir(temp_dir.path().to_path_buf());
        let mut storage = Storage::new(paths).unwrap();
        storage.load_all().unwrap();
        (temp_dir, storage)
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_chart_no_categories() {
        let (_temp_dir, storage) = create_test_storage();
        let service = ReportService::new(&storage);
        assert_eq!(service.chart_data("alice").unwrap(), ChartSnapshot::NoCategories);
    }

    #[test]
    fn test_chart_aligned_sequences() {
        let (_temp_dir, storage) = create_test_storage();
        let categories = CategoryService::new(&storage);
        categories
            .add_or_modify("alice", "Transport", Money::from_cents(5000), 60)
            .unwrap();
        categories
            .add_or_modify("alice", "Food", Money::from_cents(10000), 50)
            .unwrap();
        storage
            .expenses
            .append(Expense::new(
                "alice",
                Money::from_cents(3000),
                date(2025, 6, 1),
                "Groceries",
                "Food",
            ))
            .unwrap();

        let snapshot = ReportService::new(&storage).chart_data("alice").unwrap();
        let data = match snapshot {
            ChartSnapshot::Ready(data) => data,
            ChartSnapshot::NoCategories => panic!("expected chart data"),
        };

        assert_eq!(data.categories, vec!["Food", "Transport"]);
        assert_eq!(data.spend, vec![Money::from_cents(3000), Money::zero()]);
        assert_eq!(
            data.budgets,
            vec![Money::from_cents(10000), Money::from_cents(5000)]
        );
        assert_eq!(
            data.thresholds,
            vec![Money::from_cents(5000), Money::from_cents(3000)]
        );
    }

    #[test]
    fn test_parse_range() {
        let (start, end) = ReportService::parse_range("2025-01-01", "2025-01-31").unwrap();
        assert_eq!(start, date(2025, 1, 1));
        assert_eq!(end, date(2025, 1, 31));

        assert!(matches!(
            ReportService::parse_range("2025-02-01", "2025-01-01"),
            Err(OutlayError::InvalidRange { .. })
        ));
        assert!(matches!(
            ReportService::parse_range("not-a-date", "2025-01-01"),
            Err(OutlayError::InvalidRange { .. })
        ));
    }

    #[test]
    fn test_filtered_requires_selection() {
        let (_temp_dir, storage) = create_test_storage();
        let service = ReportService::new(&storage);

        let result =
            service.filtered_expenses("alice", &[], date(2025, 1, 1), date(2025, 1, 31));
        assert!(matches!(result, Err(OutlayError::NoCategoriesSelected)));
    }

    #[test]
    fn test_filtered_inclusive_range_excludes_sentinel() {
        let (_temp_dir, storage) = create_test_storage();
        CategoryService::new(&storage)
            .add_or_modify("alice", "Food", Money::from_cents(10000), 50)
            .unwrap();
        storage
            .expenses
            .append(Expense::new(
                "alice",
                Money::from_cents(100),
                date(2025, 1, 1),
                "On start bound",
                "Food",
            ))
            .unwrap();
        storage
            .expenses
            .append(Expense::new(
                "alice",
                Money::from_cents(200),
                date(2025, 1, 31),
                "On end bound",
                "Food",
            ))
            .unwrap();

        let selection = vec!["Food".to_string()];
        let list = ReportService::new(&storage)
            .filtered_expenses("alice", &selection, date(2025, 1, 1), date(2025, 1, 31))
            .unwrap();

        // Both bounds are inclusive; the creation sentinel never shows up
        assert_eq!(list.len(), 2);
        assert!(list.iter().all(|e| e.is_countable()));
    }
}
