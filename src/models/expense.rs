//! Expense record model
//!
//! Expenses are append-only: there is no update or delete operation for a
//! single record. Only category deletion cascades expense removal. A
//! zero-amount sentinel with description `"***"` is recorded when a category
//! is created so that aggregate queries see every category; spend totals and
//! reports exclude it via the `amount > 0` filter.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::money::Money;

/// Description marker for the placeholder expense recorded at category creation
pub const SENTINEL_DESCRIPTION: &str = "***";

/// A single recorded expense
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Expense {
    /// Auto-incrementing identifier, assigned by the ledger on append
    pub id: u64,

    /// Owner identity
    pub owner: String,

    /// Non-negative expense amount
    pub amount: Money,

    /// Calendar date of the expense (no time component)
    pub date: NaiveDate,

    /// Free-text description, non-empty
    pub description: String,

    /// Category this expense belongs to
    pub category_name: String,
}

impl Expense {
    /// Create a new expense awaiting ledger append (id is assigned there)
    pub fn new(
        owner: impl Into<String>,
        amount: Money,
        date: NaiveDate,
        description: impl Into<String>,
        category_name: impl Into<String>,
    ) -> Self {
        Self {
            id: 0,
            owner: owner.into(),
            amount,
            date,
            description: description.into(),
            category_name: category_name.into(),
        }
    }

    /// Create the zero-amount placeholder recorded at category creation
    pub fn sentinel(owner: impl Into<String>, category_name: impl Into<String>, date: NaiveDate) -> Self {
        Self::new(owner, Money::zero(), date, SENTINEL_DESCRIPTION, category_name)
    }

    /// Whether this record counts toward spend totals and reports
    pub fn is_countable(&self) -> bool {
        self.amount.is_positive()
    }

    /// Validate the expense
    pub fn validate(&self) -> Result<(), ExpenseValidationError> {
        if self.description.trim().is_empty() {
            return Err(ExpenseValidationError::EmptyDescription);
        }

        if self.amount.is_negative() {
            return Err(ExpenseValidationError::NegativeAmount);
        }

        if self.category_name.trim().is_empty() {
            return Err(ExpenseValidationError::EmptyCategory);
        }

        Ok(())
    }
}

impl fmt::Display for Expense {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} ({})",
            self.date, self.amount, self.description, self.category_name
        )
    }
}

/// Validation errors for expenses
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExpenseValidationError {
    EmptyDescription,
    NegativeAmount,
    EmptyCategory,
}

impl fmt::Display for ExpenseValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyDescription => write!(f, "Expense description cannot be empty"),
            Self::NegativeAmount => write!(f, "Expense amount cannot be negative"),
            Self::EmptyCategory => write!(f, "Expense category cannot be empty"),
        }
    }
}

impl std::error::Error for ExpenseValidationError {}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 1, 15).unwrap()
    }

    #[test]
    fn test_new_expense() {
        let expense = Expense::new("alice", Money::from_cents(6000), test_date(), "Groceries", "Food");
        assert_eq!(expense.id, 0);
        assert!(expense.is_countable());
        assert!(expense.validate().is_ok());
    }

    #[test]
    fn test_sentinel_is_not_countable() {
        let sentinel = Expense::sentinel("alice", "Food", test_date());
        assert_eq!(sentinel.description, SENTINEL_DESCRIPTION);
        assert!(sentinel.amount.is_zero());
        assert!(!sentinel.is_countable());
        // The sentinel itself passes validation; it is a real ledger row
        assert!(sentinel.validate().is_ok());
    }

    #[test]
    fn test_validation() {
        let mut expense = Expense::new("alice", Money::from_cents(100), test_date(), "Lunch", "Food");
        assert!(expense.validate().is_ok());

        expense.description = "  ".to_string();
        assert_eq!(
            expense.validate(),
            Err(ExpenseValidationError::EmptyDescription)
        );

        expense.description = "Lunch".to_string();
        expense.amount = Money::from_cents(-100);
        assert_eq!(
            expense.validate(),
            Err(ExpenseValidationError::NegativeAmount)
        );
    }

    #[test]
    fn test_serialization() {
        let expense = Expense::new("alice", Money::from_cents(6000), test_date(), "Groceries", "Food");
        let json = serde_json::to_string(&expense).unwrap();
        let deserialized: Expense = serde_json::from_str(&json).unwrap();
        assert_eq!(deserialized.amount, expense.amount);
        assert_eq!(deserialized.date, expense.date);
    }
}
