//! The employee store: one owned SQLite session plus its operations.
//!
//! A [`Store`] is opened once, passed by reference to whoever needs it and
//! closed by its owner. Dropping it closes the session too, so every exit
//! path releases the connection.

use rusqlite::{params, Connection, ErrorCode, OpenFlags, Params, Row, Statement};
use std::path::{Path, PathBuf};
use std::time::Duration;

use super::schema;
use super::{InsertOutcome, StoreError, TableStats};
use crate::employee::{Employee, Gender};

const INSERT_SQL: &str =
    "INSERT INTO employees (full_name, birth_date, gender) VALUES (?1, ?2, ?3)";

const INSERT_OR_IGNORE_SQL: &str =
    "INSERT OR IGNORE INTO employees (full_name, birth_date, gender) VALUES (?1, ?2, ?3)";

// DISTINCT is kept: uniqueness covers (full_name, birth_date) only.
const SELECT_SORTED_SQL: &str = r#"
SELECT DISTINCT full_name, birth_date, gender
FROM employees
ORDER BY full_name, birth_date
"#;

const SELECT_BY_GENDER_SQL: &str = r#"
SELECT full_name, birth_date, gender
FROM employees
WHERE gender = ?1 AND full_name GLOB ?2
"#;

// The substr term lets the planner use the (gender, first letter) index.
const SELECT_BY_GENDER_AND_INITIAL_SQL: &str = r#"
SELECT full_name, birth_date, gender
FROM employees
WHERE gender = ?1 AND full_name GLOB ?2 AND substr(full_name, 1, 1) = ?3
"#;

const SQLITE_CONSTRAINT_UNIQUE: i32 = rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE;

/// Tuning knobs for a [`Store`] session.
#[derive(Debug, Clone, Copy)]
pub struct StoreOptions {
    /// How long a statement waits on a locked database before failing.
    pub busy_timeout: Duration,
    /// Bulk inserts log progress every this many records.
    pub progress_interval: usize,
}

impl Default for StoreOptions {
    fn default() -> Self {
        Self {
            busy_timeout: Duration::from_secs(5),
            progress_interval: 100_000,
        }
    }
}

/// An open session on the employee database.
#[derive(Debug)]
pub struct Store {
    conn: Option<Connection>,
    path: Option<PathBuf>,
    options: StoreOptions,
}

impl Store {
    /// Open (creating if needed) the database file at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Connection`] if the file cannot be opened or the
    /// session pragmas cannot be applied.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, StoreError> {
        Self::open_with(path, StoreOptions::default())
    }

    /// Open the database file at `path` with explicit options.
    pub fn open_with<P: AsRef<Path>>(path: P, options: StoreOptions) -> Result<Self, StoreError> {
        let path = path.as_ref().to_path_buf();
        let connection_error = |source: rusqlite::Error| StoreError::Connection {
            path: path.clone(),
            source,
        };

        let conn = Connection::open_with_flags(
            &path,
            OpenFlags::SQLITE_OPEN_READ_WRITE
                | OpenFlags::SQLITE_OPEN_CREATE
                | OpenFlags::SQLITE_OPEN_NO_MUTEX,
        )
        .map_err(connection_error)?;
        schema::apply_pragmas(&conn, options.busy_timeout, true).map_err(connection_error)?;

        tracing::info!(path = %path.display(), "SQLite database connection established");
        Ok(Self {
            conn: Some(conn),
            path: Some(path),
            options,
        })
    }

    /// Open a private in-memory database.
    pub fn open_in_memory() -> Result<Self, StoreError> {
        let options = StoreOptions::default();
        let connection_error = |source: rusqlite::Error| StoreError::Connection {
            path: PathBuf::from(":memory:"),
            source,
        };

        let conn = Connection::open_in_memory().map_err(connection_error)?;
        schema::apply_pragmas(&conn, options.busy_timeout, false).map_err(connection_error)?;

        tracing::debug!("In-memory database opened");
        Ok(Self {
            conn: Some(conn),
            path: None,
            options,
        })
    }

    /// Database file path, `None` for in-memory sessions.
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn is_open(&self) -> bool {
        self.conn.is_some()
    }

    fn conn(&self) -> Result<&Connection, StoreError> {
        self.conn.as_ref().ok_or(StoreError::Closed)
    }

    fn conn_mut(&mut self) -> Result<&mut Connection, StoreError> {
        self.conn.as_mut().ok_or(StoreError::Closed)
    }

    /// Create the `employees` table and baseline indexes if absent.
    ///
    /// Safe to call repeatedly.
    pub fn ensure_schema(&self) -> Result<(), StoreError> {
        schema::initialize_schema(self.conn()?).map_err(StoreError::storage("create table"))?;
        tracing::info!("Table 'employees' ready with baseline indexes");
        Ok(())
    }

    /// Insert one validated record.
    ///
    /// A uniqueness violation is reported as [`InsertOutcome::DuplicateRejected`];
    /// every other storage failure is an error.
    pub fn insert(&self, employee: &Employee) -> Result<InsertOutcome, StoreError> {
        employee.validate()?;
        let conn = self.conn()?;
        let (full_name, birth_date, gender) = employee.to_row();

        match conn.execute(INSERT_SQL, params![full_name, birth_date, gender]) {
            Ok(_) => {
                let id = conn.last_insert_rowid();
                tracing::debug!(id, full_name, "Employee inserted");
                Ok(InsertOutcome::Inserted { id })
            }
            Err(rusqlite::Error::SqliteFailure(err, _))
                if err.code == ErrorCode::ConstraintViolation
                    && err.extended_code == SQLITE_CONSTRAINT_UNIQUE =>
            {
                tracing::warn!(full_name, birth_date, "Employee already exists");
                Ok(InsertOutcome::DuplicateRejected)
            }
            Err(source) => Err(StoreError::Storage {
                operation: "insert employee",
                source,
            }),
        }
    }

    /// Insert a batch in one transaction, skipping duplicates.
    ///
    /// Every record is validated before storage is touched. Returns the
    /// number of rows actually stored, which is less than `employees.len()`
    /// when some keys were already present (in the table or earlier in the
    /// batch).
    pub fn bulk_insert(&mut self, employees: &[Employee]) -> Result<usize, StoreError> {
        for (index, employee) in employees.iter().enumerate() {
            employee
                .validate()
                .map_err(|source| StoreError::BatchValidation { index, source })?;
        }

        let progress_interval = self.options.progress_interval.max(1);
        let conn = self.conn_mut()?;
        let tx = conn
            .transaction()
            .map_err(StoreError::storage("begin bulk insert"))?;

        let mut inserted = 0;
        {
            let mut stmt = tx
                .prepare_cached(INSERT_OR_IGNORE_SQL)
                .map_err(StoreError::storage("prepare bulk insert"))?;
            for (position, employee) in employees.iter().enumerate() {
                let (full_name, birth_date, gender) = employee.to_row();
                inserted += stmt
                    .execute(params![full_name, birth_date, gender])
                    .map_err(StoreError::storage("bulk insert"))?;
                if (position + 1) % progress_interval == 0 {
                    tracing::info!(processed = position + 1, inserted, "Bulk insert progress");
                }
            }
        }

        tx.commit().map_err(StoreError::storage("commit bulk insert"))?;
        tracing::info!(
            batch = employees.len(),
            inserted,
            skipped = employees.len() - inserted,
            "Bulk insert complete"
        );
        Ok(inserted)
    }

    /// Every distinct employee, ordered by full name.
    pub fn query_sorted_all(&self) -> Result<Vec<Employee>, StoreError> {
        let conn = self.conn()?;
        let mut stmt = conn
            .prepare_cached(SELECT_SORTED_SQL)
            .map_err(StoreError::storage("fetch employees"))?;
        collect_rows(&mut stmt, params![], Employee::from_row)
            .map_err(StoreError::storage("fetch employees"))
    }

    /// Employees of `gender` whose full name starts with `name_prefix`.
    ///
    /// The prefix match is case-sensitive. An empty prefix matches every
    /// employee of that gender. Row order is whatever the chosen plan yields.
    pub fn query_filtered(&self, gender: Gender, name_prefix: &str) -> Result<Vec<Employee>, StoreError> {
        let conn = self.conn()?;
        let pattern = glob_prefix_pattern(name_prefix);

        let rows = match name_prefix.chars().next() {
            Some(initial) => {
                let mut stmt = conn
                    .prepare_cached(SELECT_BY_GENDER_AND_INITIAL_SQL)
                    .map_err(StoreError::storage("filtered query"))?;
                let initial = initial.to_string();
                collect_rows(&mut stmt, params![gender, pattern, initial], Employee::from_row)
            }
            None => {
                let mut stmt = conn
                    .prepare_cached(SELECT_BY_GENDER_SQL)
                    .map_err(StoreError::storage("filtered query"))?;
                collect_rows(&mut stmt, params![gender, pattern], Employee::from_row)
            }
        }
        .map_err(StoreError::storage("filtered query"))?;

        tracing::debug!(%gender, name_prefix, rows = rows.len(), "Filtered query");
        Ok(rows)
    }

    /// `EXPLAIN QUERY PLAN` detail lines for [`Store::query_filtered`].
    pub fn explain_filtered(&self, gender: Gender, name_prefix: &str) -> Result<Vec<String>, StoreError> {
        let conn = self.conn()?;
        let pattern = glob_prefix_pattern(name_prefix);
        let explain = |sql: &str| format!("EXPLAIN QUERY PLAN {sql}");

        let details: Vec<String> = match name_prefix.chars().next() {
            Some(initial) => {
                let mut stmt = conn
                    .prepare(&explain(SELECT_BY_GENDER_AND_INITIAL_SQL))
                    .map_err(StoreError::storage("explain filtered query"))?;
                let initial = initial.to_string();
                collect_rows(&mut stmt, params![gender, pattern, initial], |row| row.get(3))
            }
            None => {
                let mut stmt = conn
                    .prepare(&explain(SELECT_BY_GENDER_SQL))
                    .map_err(StoreError::storage("explain filtered query"))?;
                collect_rows(&mut stmt, params![gender, pattern], |row| row.get(3))
            }
        }
        .map_err(StoreError::storage("explain filtered query"))?;

        Ok(details)
    }

    /// Drop and recreate the composite optimization indexes.
    ///
    /// Safe to call repeatedly. On failure nothing is left half-built.
    pub fn create_optimization_indexes(&self) -> Result<(), StoreError> {
        let conn = self.conn()?;
        schema::rebuild_optimization_indexes(conn).map_err(|(index, source)| {
            tracing::debug!(index, "Optimization index failed");
            StoreError::Storage {
                operation: "create optimization indexes",
                source,
            }
        })?;
        tracing::info!("All optimization indexes created");
        Ok(())
    }

    /// Names of the explicitly created indexes on `employees`.
    pub fn list_indexes(&self) -> Result<Vec<String>, StoreError> {
        let conn = self.conn()?;
        let mut stmt = conn
            .prepare(
                "SELECT name FROM sqlite_master \
                 WHERE type = 'index' AND tbl_name = ?1 AND sql IS NOT NULL \
                 ORDER BY name ASC",
            )
            .map_err(StoreError::storage("list indexes"))?;
        collect_rows(&mut stmt, [schema::TABLE], |row| row.get(0))
            .map_err(StoreError::storage("list indexes"))
    }

    /// Whether the table exists and how many rows it holds.
    pub fn table_stats(&self) -> Result<TableStats, StoreError> {
        let conn = self.conn()?;
        let exists = schema::table_exists(conn).map_err(StoreError::storage("table info"))?;
        let row_count = if exists {
            conn.query_row("SELECT COUNT(*) FROM employees", [], |row| row.get::<_, i64>(0))
                .map_err(StoreError::storage("table info"))? as u64
        } else {
            0
        };
        Ok(TableStats { exists, row_count })
    }

    /// Release the session. Does nothing if already closed.
    pub fn close(&mut self) -> Result<(), StoreError> {
        if let Some(conn) = self.conn.take() {
            conn.close()
                .map_err(|(_, source)| StoreError::Storage {
                    operation: "close",
                    source,
                })?;
            tracing::info!("Database connection closed");
        }
        Ok(())
    }
}

impl Drop for Store {
    fn drop(&mut self) {
        if let Err(e) = self.close() {
            tracing::warn!(error = %e, "Failed to close database connection");
        }
    }
}

/// Run a prepared statement and collect every mapped row.
fn collect_rows<P, T, F>(stmt: &mut Statement<'_>, params: P, f: F) -> rusqlite::Result<Vec<T>>
where
    P: Params,
    F: FnMut(&Row<'_>) -> rusqlite::Result<T>,
{
    stmt.query_map(params, f)?.collect()
}

/// GLOB pattern matching names that start with `prefix` literally.
fn glob_prefix_pattern(prefix: &str) -> String {
    let mut pattern = String::with_capacity(prefix.len() + 1);
    for c in prefix.chars() {
        match c {
            '*' | '?' | '[' => {
                pattern.push('[');
                pattern.push(c);
                pattern.push(']');
            }
            _ => pattern.push(c),
        }
    }
    pattern.push('*');
    pattern
}
