//! Category CLI commands
//!
//! Implements CLI commands for category and budget management. Categories
//! and budgets are managed together: the `set` command creates the category
//! on first use and merges the budget submission on every use.

use clap::Subcommand;

use crate::config::Settings;
use crate::error::OutlayResult;
use crate::services::{BudgetService, CategoryChange, CategoryService, ExpenseService, RemovalOutcome};
use crate::storage::Storage;

/// Category subcommands
#[derive(Subcommand)]
pub enum CategoryCommands {
    /// List your categories with their budgets
    List,

    /// Create a category or top up its budget
    Set {
        /// Category name
        name: String,
        /// Budget amount to add (e.g., "500" or "500.00")
        #[arg(short, long)]
        amount: String,
        /// Warning threshold as a percentage of the budget (0-100)
        #[arg(short, long)]
        threshold: Option<u8>,
    },

    /// Delete a category (only allowed while it has no spend)
    Delete {
        /// Category name
        name: String,
    },
}

/// Handle a category command
pub fn handle_category_command(
    storage: &Storage,
    settings: &Settings,
    owner: &str,
    cmd: CategoryCommands,
) -> OutlayResult<()> {
    let service = CategoryService::new(storage);

    match cmd {
        CategoryCommands::List => {
            let categories = service.list(owner)?;
            if categories.is_empty() {
                println!("No categories yet. Add one with 'outlay category set'.");
                return Ok(());
            }

            let budgets = BudgetService::new(storage);
            for category in categories {
                match budgets.get(owner, &category.name) {
                    Ok(budget) => println!(
                        "{}  budget {}{}  threshold {}%",
                        category.name,
                        settings.currency_symbol,
                        budget.amount,
                        budget.threshold_pct
                    ),
                    Err(_) => println!("{}  (no budget set)", category.name),
                }
            }
        }

        CategoryCommands::Set {
            name,
            amount,
            threshold,
        } => {
            let delta = ExpenseService::parse_amount(&amount)?;
            let threshold_pct = threshold.unwrap_or(settings.default_threshold_pct);

            let (change, budget) = service.add_or_modify(owner, &name, delta, threshold_pct)?;
            match change {
                CategoryChange::Created => println!("Created category: {}", budget.category_name),
                CategoryChange::Merged => println!("Updated category: {}", budget.category_name),
            }
            println!(
                "  Budget: {}{}  Threshold: {}%",
                settings.currency_symbol, budget.amount, budget.threshold_pct
            );
        }

        CategoryCommands::Delete { name } => match service.delete(owner, &name)? {
            RemovalOutcome::Removed => println!("Deleted category: {}", name),
            RemovalOutcome::Missing => println!("No category named '{}' to delete.", name),
            RemovalOutcome::HasExpenses { spent } => println!(
                "Cannot delete '{}': it has {}{} of recorded expenses.",
                name, settings.currency_symbol, spent
            ),
        },
    }

    Ok(())
}
