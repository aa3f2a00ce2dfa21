//! Tracing subscriber setup.
//!
//! Configures structured logging with:
//! - An `EnvFilter` (`RUST_LOG` wins over the configured level)
//! - A fmt layer on stderr so command output on stdout stays clean

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Initialize tracing at the given level.
///
/// # Arguments
///
/// * `level` - Default filter directive when `RUST_LOG` is unset
///
/// # Panics
///
/// Panics if tracing has already been initialized.
pub fn init_tracing(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_file(true)
        .with_line_number(true);

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .init();

    tracing::debug!(level, "Tracing initialized");
}

/// Initialize tracing for tests (only logs errors).
pub fn init_test_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter("error")
        .with_test_writer()
        .try_init();
}
