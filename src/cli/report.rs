//! Report CLI commands
//!
//! Covers the chart summary, the filtered expense listing, and CSV export
//! of the filtered listing.

use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;

use clap::Subcommand;

use crate::config::Settings;
use crate::error::{OutlayError, OutlayResult};
use crate::export::{export_expenses_csv, export_file_name};
use crate::services::{ChartSnapshot, ReportService};
use crate::storage::Storage;

/// Report subcommands
#[derive(Subcommand)]
pub enum ReportCommands {
    /// Show per-category spend against budgets and thresholds
    Chart,

    /// List expenses in a date range for selected categories
    List {
        /// Start date (YYYY-MM-DD, inclusive)
        #[arg(long)]
        from: String,
        /// End date (YYYY-MM-DD, inclusive)
        #[arg(long)]
        to: String,
        /// Categories to include (repeat for several)
        #[arg(short, long = "category", required = true)]
        categories: Vec<String>,
    },

    /// Export expenses in a date range to a CSV file
    Export {
        /// Start date (YYYY-MM-DD, inclusive)
        #[arg(long)]
        from: String,
        /// End date (YYYY-MM-DD, inclusive)
        #[arg(long)]
        to: String,
        /// Categories to include (repeat for several)
        #[arg(short, long = "category", required = true)]
        categories: Vec<String>,
        /// Output file (defaults to report_<user>_<from>_<to>.csv)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

/// Handle a report command
pub fn handle_report_command(
    storage: &Storage,
    settings: &Settings,
    owner: &str,
    cmd: ReportCommands,
) -> OutlayResult<()> {
    let service = ReportService::new(storage);

    match cmd {
        ReportCommands::Chart => match service.chart_data(owner)? {
            ChartSnapshot::NoCategories => {
                println!("No categories yet; nothing to chart.");
            }
            ChartSnapshot::Ready(data) => {
                println!(
                    "{:<20} {:>12} {:>12} {:>12}",
                    "Category", "Spent", "Budget", "Threshold"
                );
                for i in 0..data.categories.len() {
                    println!(
                        "{:<20} {:>12} {:>12} {:>12}",
                        data.categories[i],
                        format!("{}{}", settings.currency_symbol, data.spend[i]),
                        format!("{}{}", settings.currency_symbol, data.budgets[i]),
                        format!("{}{}", settings.currency_symbol, data.thresholds[i])
                    );
                }
            }
        },

        ReportCommands::List {
            from,
            to,
            categories,
        } => {
            let (start, end) = ReportService::parse_range(&from, &to)?;
            let expenses = service.filtered_expenses(owner, &categories, start, end)?;

            if expenses.is_empty() {
                println!("No expenses in {} to {} for the selected categories.", from, to);
                return Ok(());
            }

            for expense in &expenses {
                println!(
                    "{}  {}{:>10}  {:<15} {}",
                    expense.date,
                    settings.currency_symbol,
                    expense.amount.to_string(),
                    expense.category_name,
                    expense.description
                );
            }
            let total: crate::models::Money = expenses.iter().map(|e| e.amount).sum();
            println!("Total: {}{}", settings.currency_symbol, total);
        }

        ReportCommands::Export {
            from,
            to,
            categories,
            output,
        } => {
            let (start, end) = ReportService::parse_range(&from, &to)?;
            let expenses = service.filtered_expenses(owner, &categories, start, end)?;

            let path = output.unwrap_or_else(|| PathBuf::from(export_file_name(owner, start, end)));
            let file = File::create(&path).map_err(|e| OutlayError::Export(e.to_string()))?;
            let mut writer = BufWriter::new(file);
            export_expenses_csv(&expenses, &mut writer)?;

            println!("Exported {} expenses to {}", expenses.len(), path.display());
        }
    }

    Ok(())
}
