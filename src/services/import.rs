//! CSV expense import
//!
//! Replays headerless CSV rows through the normal recording path, so every
//! imported expense faces the same budget enforcement as one entered by
//! hand. Import is best-effort per row: a bad row yields an advisory and
//! the remaining rows still run.

use std::io::Read;

use csv::ReaderBuilder;

use crate::error::OutlayResult;
use crate::models::Outcome;
use crate::storage::Storage;

use super::expense::ExpenseService;

/// Per-row note produced during an import run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowAdvisory {
    /// 1-based row number in the input
    pub row: usize,
    pub message: String,
}

/// Tally of what an import run did
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImportSummary {
    /// Rows persisted to the ledger (warnings included)
    pub imported: usize,
    /// Rows blocked by budget enforcement
    pub rejected: usize,
    /// Rows that failed to parse or validate
    pub failed: usize,
    /// Rows persisted with an advisory warning
    pub warnings: usize,
    pub advisories: Vec<RowAdvisory>,
}

/// Service for importing expenses from CSV
pub struct ImportService<'a> {
    storage: &'a Storage,
}

impl<'a> ImportService<'a> {
    /// Create a new import service
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Import expenses from headerless CSV
    ///
    /// Expected columns per row: user, amount, date, description, category.
    /// Rows for any user are accepted; each row stands alone and a failure
    /// never aborts the run.
    pub fn import<R: Read>(&self, reader: R) -> OutlayResult<ImportSummary> {
        let mut csv_reader = ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_reader(reader);
        let expenses = ExpenseService::new(self.storage);
        let mut summary = ImportSummary::default();

        for (index, record) in csv_reader.records().enumerate() {
            let row = index + 1;

            let record = match record {
                Ok(record) => record,
                Err(e) => {
                    summary.failed += 1;
                    summary.advisories.push(RowAdvisory {
                        row,
                        message: format!("Unreadable row: {}", e),
                    });
                    continue;
                }
            };

            let fields = (
                record.get(0),
                record.get(1),
                record.get(2),
                record.get(3),
                record.get(4),
            );
            let (owner, amount, date, description, category) = match fields {
                (Some(owner), Some(amount), Some(date), Some(description), Some(category)) => {
                    (owner, amount, date, description, category)
                }
                _ => {
                    summary.failed += 1;
                    summary.advisories.push(RowAdvisory {
                        row,
                        message: format!("Expected 5 fields, found {}", record.len()),
                    });
                    continue;
                }
            };

            let amount = match ExpenseService::parse_amount(amount) {
                Ok(amount) => amount,
                Err(e) => {
                    summary.failed += 1;
                    summary
                        .advisories
                        .push(RowAdvisory { row, message: e.to_string() });
                    continue;
                }
            };
            let date = match ExpenseService::parse_date(date) {
                Ok(date) => date,
                Err(e) => {
                    summary.failed += 1;
                    summary
                        .advisories
                        .push(RowAdvisory { row, message: e.to_string() });
                    continue;
                }
            };

            match expenses.record(owner.trim(), amount, date, description, category) {
                Ok(Outcome::Accepted) => summary.imported += 1,
                Ok(outcome @ Outcome::AcceptedWithWarning(_)) => {
                    summary.imported += 1;
                    summary.warnings += 1;
                    summary.advisories.push(RowAdvisory {
                        row,
                        message: outcome.to_string(),
                    });
                }
                Ok(outcome @ Outcome::Rejected { .. }) => {
                    summary.rejected += 1;
                    summary.advisories.push(RowAdvisory {
                        row,
                        message: outcome.to_string(),
                    });
                }
                Err(e) => {
                    summary.failed += 1;
                    summary
                        .advisories
                        .push(RowAdvisory { row, message: e.to_string() });
                }
            }
        }

        Ok(summary)
    }
}
