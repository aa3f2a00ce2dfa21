//! Roster: SQLite employee store with index-driven query optimization.
//!
//! # Usage
//!
//! ```bash
//! roster init
//! roster add "Ivanov Petr Sergeevich" 1990-05-15 Male
//! roster generate --count 1000000 --special 100
//! roster optimize --gender Male --prefix F
//! ```
//!
//! Environment variables can also be used:
//! - `ROSTER_DB_PATH`: Path to the SQLite database file
//! - `RUST_LOG`: Log level (trace, debug, info, warn, error)

mod commands;

use anyhow::Result;
use roster::config::Config;
use roster::observability::tracing::init_tracing;

fn main() -> Result<()> {
    // Parse configuration from CLI arguments and environment
    let config = Config::parse_args();

    // Initialize tracing/logging
    init_tracing(&config.log_level);

    commands::run(&config)
}
