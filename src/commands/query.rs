//! `search` and `optimize` commands.

use anyhow::{Context, Result};
use roster::config::{FilterArgs, OutputFormat};
use roster::employee::Employee;
use roster::optimizer::{optimize_and_report, Improvement};
use roster::storage::Store;
use roster::timing::timed;
use serde::Serialize;

use super::{print_json, print_rule};

const PREVIEW_ROWS: usize = 10;

#[derive(Serialize)]
struct SearchOutput<'a> {
    secs: f64,
    found: usize,
    first: &'a [Employee],
}

pub fn search(store: &Store, filter: &FilterArgs, format: OutputFormat) -> Result<()> {
    let result = timed(|| store.query_filtered(filter.gender, &filter.prefix))
        .transpose()
        .context("filtered query failed")?;
    let preview = &result.value[..result.value.len().min(PREVIEW_ROWS)];

    match format {
        OutputFormat::Text => {
            println!("Search executed in {:.4} seconds", result.secs());
            println!("Found {} employees", result.value.len());
            if !preview.is_empty() {
                println!();
                println!("First {PREVIEW_ROWS} results:");
                println!("{:<40} {:<12} {:<8}", "Full Name", "Birth Date", "Gender");
                print_rule(60);
                for employee in preview {
                    println!(
                        "{:<40} {:<12} {:<8}",
                        employee.full_name(),
                        employee.birth_date(),
                        employee.gender().as_str()
                    );
                }
            }
        }
        OutputFormat::Json => print_json(&SearchOutput {
            secs: result.secs(),
            found: result.value.len(),
            first: preview,
        })?,
    }
    Ok(())
}

pub fn optimize(store: &Store, filter: &FilterArgs, format: OutputFormat) -> Result<()> {
    let report = optimize_and_report(store, filter.gender, &filter.prefix)
        .context("failed to optimize database")?;

    match format {
        OutputFormat::Text => {
            println!("Performance before optimization:");
            println!("  Search time: {:.4} seconds", report.time_before.as_secs_f64());
            println!("  Records found: {}", report.rows_before);
            println!("Performance after optimization:");
            println!("  Search time: {:.4} seconds", report.time_after.as_secs_f64());
            println!("  Records found: {}", report.rows_after);
            match report.improvement {
                Improvement::Measured(percent) => {
                    println!("Performance improvement: {percent:+.1}%");
                }
                Improvement::NotMeasurable => {
                    println!("Performance improvement: not measurable");
                }
            }
        }
        OutputFormat::Json => print_json(&report)?,
    }
    Ok(())
}
