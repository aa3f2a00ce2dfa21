//! Schema definition and connection setup.
//!
//! The `employees` table carries a storage-level UNIQUE constraint on
//! `(full_name, birth_date)`; that constraint is the authoritative dedup
//! mechanism. Baseline single-column indexes are created with the table.
//! Composite optimization indexes are created on demand.

use rusqlite::Connection;
use std::time::Duration;

/// Table name.
pub const TABLE: &str = "employees";

const CREATE_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS employees (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    full_name TEXT NOT NULL,
    birth_date TEXT NOT NULL,
    gender TEXT NOT NULL CHECK (gender IN ('Male', 'Female')),
    created_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP,
    UNIQUE (full_name, birth_date)
)
"#;

/// Baseline indexes, created together with the table.
pub const BASELINE_INDEXES: &[(&str, &str)] = &[
    (
        "idx_full_name",
        "CREATE INDEX IF NOT EXISTS idx_full_name ON employees (full_name)",
    ),
    (
        "idx_gender",
        "CREATE INDEX IF NOT EXISTS idx_gender ON employees (gender)",
    ),
    (
        "idx_birth_date",
        "CREATE INDEX IF NOT EXISTS idx_birth_date ON employees (birth_date)",
    ),
];

/// Composite indexes for the gender + name-prefix access pattern.
///
/// Each is dropped and recreated so repeated optimization passes rebuild
/// them from scratch.
pub const OPTIMIZATION_INDEXES: &[(&str, &str)] = &[
    (
        "idx_gender_surname",
        "CREATE INDEX idx_gender_surname ON employees (gender, substr(full_name, 1, 1))",
    ),
    (
        "idx_full_name_birth_date",
        "CREATE INDEX idx_full_name_birth_date ON employees (full_name, birth_date)",
    ),
    (
        "idx_gender_full_name",
        "CREATE INDEX idx_gender_full_name ON employees (gender, full_name)",
    ),
];

/// Apply connection pragmas.
///
/// WAL is only requested for file databases; in-memory databases keep
/// their `memory` journal.
pub fn apply_pragmas(conn: &Connection, busy_timeout: Duration, file_backed: bool) -> rusqlite::Result<()> {
    conn.busy_timeout(busy_timeout)?;
    if file_backed {
        let mode: String =
            conn.pragma_update_and_check(None, "journal_mode", "WAL", |row| row.get(0))?;
        tracing::debug!(journal_mode = %mode, "Journal mode set");
    }
    conn.pragma_update(None, "synchronous", "NORMAL")?;
    Ok(())
}

/// Create the table and baseline indexes if absent.
pub fn initialize_schema(conn: &Connection) -> rusqlite::Result<()> {
    let tx = conn.unchecked_transaction()?;
    tx.execute_batch(CREATE_TABLE)?;
    for (name, ddl) in BASELINE_INDEXES {
        tx.execute_batch(ddl)?;
        tracing::debug!(index = name, "Baseline index ensured");
    }
    tx.commit()
}

/// Drop and recreate every optimization index in one transaction.
///
/// On failure the transaction rolls back and the name of the index being
/// built is returned alongside the error.
pub fn rebuild_optimization_indexes(conn: &Connection) -> Result<(), (&'static str, rusqlite::Error)> {
    let tx = conn.unchecked_transaction().map_err(|e| ("<begin>", e))?;
    for (name, ddl) in OPTIMIZATION_INDEXES {
        tx.execute_batch(&format!("DROP INDEX IF EXISTS {name}"))
            .map_err(|e| (*name, e))?;
        tx.execute_batch(ddl).map_err(|e| (*name, e))?;
        tracing::info!(index = name, "Created index");
    }
    tx.commit().map_err(|e| ("<commit>", e))
}

/// Whether the `employees` table exists.
pub fn table_exists(conn: &Connection) -> rusqlite::Result<bool> {
    conn.query_row(
        "SELECT EXISTS (SELECT 1 FROM sqlite_master WHERE type = 'table' AND name = ?1)",
        [TABLE],
        |row| row.get(0),
    )
}
