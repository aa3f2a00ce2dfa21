//! Subcommand implementations.
//!
//! Each command borrows one [`Store`] opened here; the store is closed
//! explicitly on success and by `Drop` on every error path.

mod employees;
mod query;
mod schema;

use anyhow::{Context, Result};
use roster::config::{Command, Config, OutputFormat};
use roster::storage::Store;
use serde::Serialize;

pub fn run(config: &Config) -> Result<()> {
    let mut store = Store::open(&config.db_path)
        .with_context(|| format!("cannot open database {}", config.db_path.display()))?;

    match &config.command {
        Command::Init => schema::init(&store, config.output)?,
        Command::Info => schema::info(&store, config.output)?,
        Command::Add {
            full_name,
            birth_date,
            gender,
        } => employees::add(&store, full_name, birth_date, gender, config.output)?,
        Command::List => employees::list(&store, config.output)?,
        command @ Command::Generate { .. } => {
            let generator = command
                .generator_config()
                .context("generate command without generator settings")?;
            employees::generate(&mut store, &generator, config.output)?;
        }
        Command::Search { filter } => query::search(&store, filter, config.output)?,
        Command::Optimize { filter } => query::optimize(&store, filter, config.output)?,
    }

    store.close().context("failed to close database")?;
    Ok(())
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn print_rule(width: usize) {
    println!("{}", "-".repeat(width));
}

#[derive(Serialize)]
struct Message<'a> {
    status: &'a str,
    message: String,
}

fn print_message(format: OutputFormat, status: &str, message: String) -> Result<()> {
    match format {
        OutputFormat::Text => println!("{message}"),
        OutputFormat::Json => print_json(&Message { status, message })?,
    }
    Ok(())
}
