//! Expense service and budget enforcement
//!
//! Every candidate expense passes through [`classify`] before it may touch
//! the ledger. Classification is a pure function over three inputs: the
//! prior countable spend, the budget row, and the candidate amount. All
//! arithmetic stays in integer cents.

use chrono::NaiveDate;

use crate::error::{OutlayError, OutlayResult};
use crate::models::{Budget, Expense, Money, Outcome, Warning};
use crate::storage::Storage;

/// Service for recording expenses under budget enforcement
pub struct ExpenseService<'a> {
    storage: &'a Storage,
}

/// Classify a candidate expense against a budget
///
/// Exactly one outcome is produced, checked in strict priority order:
///
/// 1. Rejected when prior spend plus the candidate exceeds the budget cap.
/// 2. Excessive when the candidate alone is more than 20% of the cap.
/// 3. ThresholdCrossed when prior spend plus the candidate exceeds the
///    configured threshold fraction of the cap.
/// 4. Accepted otherwise.
///
/// A candidate that is both excessive and threshold-crossing reports only
/// the excessive warning.
pub fn classify(prior_spend: Money, budget: &Budget, candidate: Money) -> Outcome {
    let projected = prior_spend + candidate;

    if projected.cents() > budget.amount.cents() {
        return Outcome::Rejected {
            category: budget.category_name.clone(),
            budget: budget.amount,
            attempted: candidate,
        };
    }

    // candidate > 20% of cap, kept exact: c > b/5  <=>  5c > b
    if candidate.cents() * 5 > budget.amount.cents() {
        return Outcome::AcceptedWithWarning(Warning::Excessive {
            category: budget.category_name.clone(),
            budget: budget.amount,
            amount: candidate,
        });
    }

    // projected > pct% of cap: 100p > pct*b avoids truncating the threshold
    if projected.cents() * 100 > i64::from(budget.threshold_pct) * budget.amount.cents() {
        return Outcome::AcceptedWithWarning(Warning::ThresholdCrossed {
            category: budget.category_name.clone(),
            budget: budget.amount,
            threshold: budget.threshold_absolute(),
            amount: candidate,
        });
    }

    Outcome::Accepted
}

impl<'a> ExpenseService<'a> {
    /// Create a new expense service
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Parse a user-supplied amount string into non-negative money
    pub fn parse_amount(input: &str) -> OutlayResult<Money> {
        let amount = Money::parse(input)
            .map_err(|_| OutlayError::InvalidAmount(input.trim().to_string()))?;
        if amount.is_negative() {
            return Err(OutlayError::InvalidAmount(input.trim().to_string()));
        }
        Ok(amount)
    }

    /// Parse a user-supplied `YYYY-MM-DD` date string
    pub fn parse_date(input: &str) -> OutlayResult<NaiveDate> {
        NaiveDate::parse_from_str(input.trim(), "%Y-%m-%d")
            .map_err(|_| OutlayError::InvalidDate(input.trim().to_string()))
    }

    /// Record an expense for an owner
    ///
    /// The category and its budget must exist. The candidate is classified
    /// first; a rejected expense never reaches the ledger, while warnings
    /// are recorded and reported. Returns the classification outcome.
    pub fn record(
        &self,
        owner: &str,
        amount: Money,
        date: NaiveDate,
        description: &str,
        category_name: &str,
    ) -> OutlayResult<Outcome> {
        let description = description.trim();
        let category_name = category_name.trim();

        let expense = Expense::new(owner, amount, date, description, category_name);
        expense.validate().map_err(|e| match e {
            crate::models::expense::ExpenseValidationError::NegativeAmount => {
                OutlayError::InvalidAmount(amount.to_string())
            }
            other => OutlayError::Validation(other.to_string()),
        })?;

        if self.storage.categories.get(owner, category_name)?.is_none() {
            return Err(OutlayError::category_not_found(category_name));
        }
        let budget = self
            .storage
            .budgets
            .get(owner, category_name)?
            .ok_or_else(|| OutlayError::budget_not_found(category_name))?;

        let prior = self.storage.expenses.sum_for_category(owner, category_name)?;
        let outcome = classify(prior, &budget, amount);

        if !outcome.is_rejected() {
            self.storage.expenses.append(expense)?;
            self.storage.expenses.save()?;
        }

        Ok(outcome)
    }
}
