//! Expense CLI commands

use chrono::Local;
use clap::Subcommand;

use crate::config::Settings;
use crate::error::OutlayResult;
use crate::services::ExpenseService;
use crate::storage::Storage;

/// Expense subcommands
#[derive(Subcommand)]
pub enum ExpenseCommands {
    /// Record an expense against a category
    Add {
        /// Category name
        category: String,
        /// Amount (e.g., "12.50")
        amount: String,
        /// Description
        #[arg(short, long)]
        description: String,
        /// Expense date (YYYY-MM-DD, defaults to today)
        #[arg(long)]
        date: Option<String>,
    },
}

/// Handle an expense command
pub fn handle_expense_command(
    storage: &Storage,
    _settings: &Settings,
    owner: &str,
    cmd: ExpenseCommands,
) -> OutlayResult<()> {
    let service = ExpenseService::new(storage);

    match cmd {
        ExpenseCommands::Add {
            category,
            amount,
            description,
            date,
        } => {
            let amount = ExpenseService::parse_amount(&amount)?;
            let date = match date {
                Some(text) => ExpenseService::parse_date(&text)?,
                None => Local::now().date_naive(),
            };

            let outcome = service.record(owner, amount, date, &description, &category)?;
            println!("{}", outcome);
        }
    }

    Ok(())
}
