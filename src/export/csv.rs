//! CSV export functionality
//!
//! Exports an owner's report rows to CSV. The format deliberately mirrors
//! what the importer reads back: amount as a plain decimal, date as
//! `YYYY-MM-DD`, one expense per row sorted by date ascending.

use crate::error::{OutlayError, OutlayResult};
use crate::models::Expense;
use chrono::NaiveDate;
use std::io::Write;

/// Export a set of report rows to CSV
///
/// The rows are written in the order given; callers hand in the output of a
/// filtered report query, which is already date-ascending. The header row is
/// `User,Amount,Date,Description,Category`.
pub fn export_expenses_csv<W: Write>(expenses: &[Expense], writer: &mut W) -> OutlayResult<()> {
    writeln!(writer, "User,Amount,Date,Description,Category")
        .map_err(|e| OutlayError::Export(e.to_string()))?;

    for expense in expenses {
        writeln!(
            writer,
            "{},{},{},{},{}",
            escape_csv(&expense.owner),
            expense.amount.to_decimal_string(),
            expense.date.format("%Y-%m-%d"),
            escape_csv(&expense.description),
            escape_csv(&expense.category_name)
        )
        .map_err(|e| OutlayError::Export(e.to_string()))?;
    }

    Ok(())
}

/// Suggested file name for an exported report
pub fn export_file_name(owner: &str, start: NaiveDate, end: NaiveDate) -> String {
    format!(
        "report_{}_{}_{}.csv",
        owner,
        start.format("%Y-%m-%d"),
        end.format("%Y-%m-%d")
    )
}

/// Escape a string for CSV format
fn escape_csv(s: &str) -> String {
    if s.contains(',') || s.contains('"') || s.contains('\n') {
        format!("\"{}\"", s.replace('"', "\"\""))
    } else {
        s.to_string()
    }
}
