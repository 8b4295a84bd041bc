//! Business logic services for Outlay
//!
//! Services borrow the shared [`Storage`](crate::storage::Storage) and carry
//! no state of their own; construct them where needed.

pub mod budget;
pub mod category;
pub mod expense;
pub mod import;
pub mod report;

pub use budget::BudgetService;
pub use category::{CategoryChange, CategoryService, RemovalOutcome};
pub use expense::{classify, ExpenseService};
pub use import::{ImportService, ImportSummary, RowAdvisory};
pub use report::{ChartData, ChartSnapshot, ReportService};
