//! CSV export command

use std::path::Path;

use anyhow::{Context, Result};
use wallet_core::db::Database;
use wallet_core::export::export_to_path;

pub fn cmd_export(db: &Database, output: &Path) -> Result<()> {
    let transactions = db.list_transactions(None, None)?;
    let count = export_to_path(&transactions, output)
        .with_context(|| format!("Failed to write {}", output.display()))?;

    println!("📤 Exported {} entries to {}", count, output.display());
    Ok(())
}
