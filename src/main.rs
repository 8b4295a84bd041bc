use anyhow::Result;
use clap::{Parser, Subcommand};

use outlay::cli::{
    handle_category_command, handle_expense_command, handle_import_command, handle_report_command,
};
use outlay::config::{paths::OutlayPaths, settings::Settings};
use outlay::storage::Storage;

#[derive(Parser)]
#[command(
    name = "outlay",
    version,
    about = "Personal expense tracker with budget enforcement",
    long_about = "Outlay tracks expenses against per-category budgets. Every \
                  expense is checked before it is recorded: spending past the \
                  budget is refused, and crossing the warning threshold or \
                  recording an unusually large expense is flagged."
)]
struct Cli {
    /// User the command acts for
    #[arg(short, long, env = "OUTLAY_USER", global = true, default_value = "default")]
    user: String,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Category and budget management commands
    #[command(subcommand, alias = "cat")]
    Category(outlay::cli::CategoryCommands),

    /// Expense recording commands
    #[command(subcommand, alias = "exp")]
    Expense(outlay::cli::ExpenseCommands),

    /// Reports over recorded expenses
    #[command(subcommand)]
    Report(outlay::cli::ReportCommands),

    /// Import expenses from a CSV file
    Import(outlay::cli::ImportArgs),

    /// Show current configuration and paths
    Config,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let paths = OutlayPaths::new()?;
    let settings = Settings::load_or_create(&paths)?;

    let mut storage = Storage::new(paths.clone())?;
    storage.load_all()?;

    match cli.command {
        Some(Commands::Category(cmd)) => {
            handle_category_command(&storage, &settings, &cli.user, cmd)?;
        }
        Some(Commands::Expense(cmd)) => {
            handle_expense_command(&storage, &settings, &cli.user, cmd)?;
        }
        Some(Commands::Report(cmd)) => {
            handle_report_command(&storage, &settings, &cli.user, cmd)?;
        }
        Some(Commands::Import(args)) => {
            handle_import_command(&storage, args)?;
        }
        Some(Commands::Config) => {
            println!("Outlay Configuration");
            println!("====================");
            println!("Data directory: {}", storage.paths().data_dir().display());
            println!();
            println!("Settings:");
            println!("  Currency symbol:   {}", settings.currency_symbol);
            println!("  Date format:       {}", settings.date_format);
            println!("  Default threshold: {}%", settings.default_threshold_pct);
        }
        None => {
            println!("Outlay - Personal expense tracker with budget enforcement");
            println!();
            println!("Run 'outlay --help' for usage information.");
        }
    }

    Ok(())
}
