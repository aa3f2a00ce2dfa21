//! SQLite storage layer for Roster.
//!
//! Provides:
//! - Schema initialization (table, baseline indexes, pragmas)
//! - Single and bulk insertion with storage-enforced uniqueness
//! - Sorted and filtered retrieval
//! - On-demand optimization indexes and table introspection

pub mod schema;
pub mod store;

use serde::Serialize;
use std::path::PathBuf;
use thiserror::Error;

use crate::employee::ValidationError;

pub use store::{Store, StoreOptions};

/// Error type for store operations.
///
/// A duplicate `(full_name, birth_date)` is not an error; see
/// [`InsertOutcome::DuplicateRejected`].
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to open database at {}: {source}", path.display())]
    Connection {
        path: PathBuf,
        #[source]
        source: rusqlite::Error,
    },

    #[error("invalid record: {0}")]
    Validation(#[from] ValidationError),

    #[error("invalid record at batch position {index}: {source}")]
    BatchValidation {
        index: usize,
        #[source]
        source: ValidationError,
    },

    #[error("{operation} failed: {source}")]
    Storage {
        operation: &'static str,
        #[source]
        source: rusqlite::Error,
    },

    #[error("database session is closed")]
    Closed,
}

impl StoreError {
    /// Wrap a rusqlite error with the operation that produced it.
    pub(crate) fn storage(operation: &'static str) -> impl FnOnce(rusqlite::Error) -> Self {
        move |source| Self::Storage { operation, source }
    }
}

/// Result of a single-row insert.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertOutcome {
    /// Row stored under the given surrogate id.
    Inserted { id: i64 },
    /// An employee with the same name and birth date already exists.
    DuplicateRejected,
}

/// Table diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TableStats {
    pub exists: bool,
    pub row_count: u64,
}
