//! `init` and `info` commands.

use anyhow::{Context, Result};
use roster::config::OutputFormat;
use roster::storage::{Store, TableStats};
use serde::Serialize;

use super::print_json;

#[derive(Serialize)]
struct InfoOutput {
    path: Option<String>,
    #[serde(flatten)]
    stats: TableStats,
    indexes: Vec<String>,
}

pub fn init(store: &Store, format: OutputFormat) -> Result<()> {
    store.ensure_schema().context("failed to create table")?;
    if format == OutputFormat::Text {
        println!("Table 'employees' created successfully!");
    }
    info(store, format)
}

pub fn info(store: &Store, format: OutputFormat) -> Result<()> {
    let stats = store.table_stats().context("failed to read table info")?;
    let indexes = store.list_indexes().context("failed to list indexes")?;
    let output = InfoOutput {
        path: store.path().map(|path| path.display().to_string()),
        stats,
        indexes,
    };

    match format {
        OutputFormat::Text => {
            if let Some(path) = &output.path {
                println!("Database: {path}");
            }
            println!("Table 'employees' exists: {}", output.stats.exists);
            println!("Total records: {}", output.stats.row_count);
            if !output.indexes.is_empty() {
                println!("Indexes: {}", output.indexes.join(", "));
            }
        }
        OutputFormat::Json => print_json(&output)?,
    }
    Ok(())
}
