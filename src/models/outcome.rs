//! Structured outcomes for expense submission
//!
//! The enforcement engine returns one of these for every candidate expense.
//! Advisory warnings ride along with a successful persistence; only
//! [`Outcome::Rejected`] blocks the ledger append. The presentation layer is
//! responsible for surfacing the messages (there is no shared alert queue).

use std::fmt;

use super::money::Money;

/// Classification of a candidate expense against its category budget
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Within budget and below every warning line; persisted silently
    Accepted,

    /// Persisted, but with a non-blocking advisory
    AcceptedWithWarning(Warning),

    /// Over budget; the expense was NOT persisted
    Rejected {
        category: String,
        budget: Money,
        attempted: Money,
    },
}

/// Non-blocking advisory attached to an accepted expense
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Warning {
    /// A single expense larger than 20% of the category budget
    Excessive {
        category: String,
        budget: Money,
        amount: Money,
    },

    /// Cumulative spend crossed the configured threshold line
    ThresholdCrossed {
        category: String,
        budget: Money,
        threshold: Money,
        amount: Money,
    },
}

impl Outcome {
    /// Whether the expense was blocked from persistence
    pub fn is_rejected(&self) -> bool {
        matches!(self, Self::Rejected { .. })
    }

    /// The advisory warning, if any
    pub fn warning(&self) -> Option<&Warning> {
        match self {
            Self::AcceptedWithWarning(w) => Some(w),
            _ => None,
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Accepted => write!(f, "Expense added successfully"),
            Self::AcceptedWithWarning(warning) => write!(f, "{}", warning),
            Self::Rejected {
                category,
                budget,
                attempted,
            } => write!(
                f,
                "Expense exceeds budget for {}! Budget: {}, Expense: {}",
                category, budget, attempted
            ),
        }
    }
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Excessive {
                category,
                budget,
                amount,
            } => write!(
                f,
                "Expense is excessive for {}! Budget: {}, Expense: {}",
                category, budget, amount
            ),
            Self::ThresholdCrossed {
                category,
                budget,
                threshold,
                amount,
            } => write!(
                f,
                "Expenses exceed threshold level for {}! Budget: {}, Threshold: {}, Expense: {}",
                category, budget, threshold, amount
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejected() {
        let outcome = Outcome::Rejected {
            category: "Food".into(),
            budget: Money::from_cents(10000),
            attempted: Money::from_cents(5000),
        };
        assert!(outcome.is_rejected());
        assert!(outcome.warning().is_none());
        assert_eq!(
            outcome.to_string(),
            "Expense exceeds budget for Food! Budget: 100.00, Expense: 50.00"
        );
    }

    #[test]
    fn test_warning_display() {
        let warning = Warning::ThresholdCrossed {
            category: "Food".into(),
            budget: Money::from_cents(10000),
            threshold: Money::from_cents(5000),
            amount: Money::from_cents(6000),
        };
        let outcome = Outcome::AcceptedWithWarning(warning);
        assert!(!outcome.is_rejected());
        assert!(outcome.to_string().contains("threshold level for Food"));
    }
}
