//! Core data models for Outlay
//!
//! This module contains the data structures that represent the budgeting
//! domain: categories, budgets, expense records, money, and submission
//! outcomes.

pub mod budget;
pub mod category;
pub mod expense;
pub mod money;
pub mod outcome;

pub use budget::Budget;
pub use category::Category;
pub use expense::{Expense, SENTINEL_DESCRIPTION};
pub use money::Money;
pub use outcome::{Outcome, Warning};
