//! Budget model
//!
//! At most one budget exists per `(owner, category_name)`. The amount is a
//! running cap: repeated "add/modify category" submissions top it up, they
//! never overwrite it. The threshold percentage, in contrast, is replaced on
//! every submission.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::money::Money;

/// A spending cap and alert threshold for one category of one owner
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Budget {
    /// Owner identity
    pub owner: String,

    /// Category this budget applies to
    pub category_name: String,

    /// Accumulated budget cap
    pub amount: Money,

    /// Early-warning threshold as a percentage of `amount` (0-100)
    pub threshold_pct: u8,
}

impl Budget {
    /// Create a new budget
    pub fn new(
        owner: impl Into<String>,
        category_name: impl Into<String>,
        amount: Money,
        threshold_pct: u8,
    ) -> Self {
        Self {
            owner: owner.into(),
            category_name: category_name.into(),
            amount,
            threshold_pct,
        }
    }

    /// Merge a repeat submission into this budget
    ///
    /// The amount accumulates; the threshold is replaced with the latest
    /// value. This asymmetry is intentional.
    pub fn merge(&mut self, delta: Money, threshold_pct: u8) {
        self.amount += delta;
        self.threshold_pct = threshold_pct;
    }

    /// The absolute threshold line: `threshold_pct/100 * amount`
    pub fn threshold_absolute(&self) -> Money {
        Money::from_cents(self.amount.cents() * i64::from(self.threshold_pct) / 100)
    }

    /// Validate the budget
    pub fn validate(&self) -> Result<(), BudgetValidationError> {
        if self.threshold_pct > 100 {
            return Err(BudgetValidationError::ThresholdOutOfRange(
                self.threshold_pct,
            ));
        }

        if self.amount.is_negative() {
            return Err(BudgetValidationError::NegativeAmount);
        }

        Ok(())
    }
}

/// Validation errors for budgets
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BudgetValidationError {
    ThresholdOutOfRange(u8),
    NegativeAmount,
}

impl fmt::Display for BudgetValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ThresholdOutOfRange(pct) => {
                write!(f, "Threshold percentage {} is out of range (0-100)", pct)
            }
            Self::NegativeAmount => write!(f, "Budget amount cannot be negative"),
        }
    }
}

impl std::error::Error for BudgetValidationError {}
