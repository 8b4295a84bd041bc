//! Import CLI command

use std::fs::File;
use std::path::PathBuf;

use clap::Args;

use crate::error::{OutlayError, OutlayResult};
use crate::services::ImportService;
use crate::storage::Storage;

/// Arguments for the import command
#[derive(Args)]
pub struct ImportArgs {
    /// Path to a headerless CSV file (user,amount,date,description,category)
    pub file: PathBuf,
}

/// Handle the import command
pub fn handle_import_command(storage: &Storage, args: ImportArgs) -> OutlayResult<()> {
    let file = File::open(&args.file)
        .map_err(|e| OutlayError::Import(format!("{}: {}", args.file.display(), e)))?;

    let summary = ImportService::new(storage).import(file)?;

    println!(
        "Imported {} expenses ({} with warnings), {} rejected, {} failed.",
        summary.imported, summary.warnings, summary.rejected, summary.failed
    );
    for advisory in &summary.advisories {
        println!("  row {}: {}", advisory.row, advisory.message);
    }

    Ok(())
}
