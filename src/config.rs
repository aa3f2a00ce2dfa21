//! Configuration parsing for the Roster CLI.
//!
//! Supports:
//! - CLI arguments via clap
//! - Environment variable overrides
//! - Sensible defaults for quick start

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::employee::Gender;
use crate::generator::{GeneratorConfig, SPECIAL_PREFIX};

/// Roster: an SQLite employee store with index-driven query optimization.
#[derive(Parser, Debug, Clone)]
#[command(name = "roster")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Config {
    /// Path to the SQLite database file
    #[arg(long, env = "ROSTER_DB_PATH", default_value = "employees.db", global = true)]
    pub db_path: PathBuf,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, env = "RUST_LOG", default_value = "info", global = true)]
    pub log_level: String,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text, global = true)]
    pub output: OutputFormat,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Create the employees table and baseline indexes
    Init,
    /// Add a single employee
    Add {
        /// Full name, e.g. "Ivanov Petr Sergeevich"
        full_name: String,
        /// Birth date as YYYY-MM-DD
        birth_date: String,
        /// Male/Female (also m/f, мужской/женский)
        gender: String,
    },
    /// List all employees sorted by full name
    List,
    /// Bulk-insert synthetic employees
    Generate {
        /// Number of random employees
        #[arg(long, default_value_t = 1_000_000)]
        count: usize,
        /// Number of crafted male employees with an 'F' surname
        #[arg(long, default_value_t = 100)]
        special: usize,
        /// Seed for reproducible data
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Run the filtered query once and time it
    Search {
        #[command(flatten)]
        filter: FilterArgs,
    },
    /// Time the filtered query, build composite indexes, time it again
    Optimize {
        #[command(flatten)]
        filter: FilterArgs,
    },
    /// Show table statistics and indexes
    Info,
}

/// Gender and name prefix for the filtered query.
#[derive(clap::Args, Debug, Clone, PartialEq, Eq)]
pub struct FilterArgs {
    /// Gender to match
    #[arg(long, default_value = "Male", value_parser = parse_gender)]
    pub gender: Gender,

    /// Case-sensitive full name prefix
    #[arg(long, default_value = SPECIAL_PREFIX)]
    pub prefix: String,
}

fn parse_gender(value: &str) -> Result<Gender, String> {
    Gender::normalize(value).map_err(|e| e.to_string())
}

impl Config {
    /// Parse configuration from CLI arguments and environment.
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Create a configuration for testing.
    #[cfg(test)]
    pub fn test_config(db_path: PathBuf, command: Command) -> Self {
        Self {
            db_path,
            log_level: "debug".into(),
            output: OutputFormat::Text,
            command,
        }
    }
}

impl Command {
    /// Generator settings for a `generate` command.
    pub fn generator_config(&self) -> Option<GeneratorConfig> {
        match self {
            Self::Generate {
                count,
                special,
                seed,
            } => Some(GeneratorConfig {
                count: *count,
                special_count: *special,
                seed: *seed,
                ..GeneratorConfig::default()
            }),
            _ => None,
        }
    }
}
