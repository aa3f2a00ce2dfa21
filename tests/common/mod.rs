//! Test utilities shared by the integration tests.
//!
//! Provides:
//! - Temporary database fixtures
//! - Opened-and-initialized store helper
//! - Crafted employee batches

#![allow(dead_code)]

use roster::employee::{Employee, Gender};
use roster::storage::Store;
use std::path::PathBuf;
use tempfile::TempDir;

/// Test fixture that manages a temporary database directory.
///
/// The directory is automatically cleaned up when the fixture is dropped.
pub struct TestFixture {
    /// Temporary directory for test database
    pub temp_dir: TempDir,
    /// Path to the database file
    pub db_path: PathBuf,
}

impl TestFixture {
    /// Create a new test fixture with a temporary database directory.
    pub fn new() -> Self {
        roster::observability::tracing::init_test_tracing();
        let temp_dir = TempDir::new().expect("failed to create temp dir");
        let db_path = temp_dir.path().join("test.db");
        Self { temp_dir, db_path }
    }

    /// Get the database path as a string.
    pub fn db_path_str(&self) -> &str {
        self.db_path.to_str().expect("invalid path")
    }

    /// Open the fixture database with the schema in place.
    pub fn store(&self) -> Store {
        let store = Store::open(&self.db_path).expect("failed to open store");
        store.ensure_schema().expect("failed to create schema");
        store
    }
}

impl Default for TestFixture {
    fn default() -> Self {
        Self::new()
    }
}

/// `count` male employees with distinct names starting with `F`.
pub fn crafted_f_males(count: usize) -> Vec<Employee> {
    (0..count)
        .map(|i| Employee::new(format!("Fisher Crafted {i:04}"), "1985-04-12", Gender::Male))
        .collect()
}

/// `count` employees that never match the `Male` + `F` filter on both axes:
/// men with other surnames, and women whose surname starts with `F`.
pub fn mixed(count: usize) -> Vec<Employee> {
    (0..count)
        .map(|i| {
            if i % 2 == 0 {
                Employee::new(format!("Smith Mixed {i:04}"), "1970-01-31", Gender::Male)
            } else {
                Employee::new(format!("Ford Mixed {i:04}"), "1991-08-20", Gender::Female)
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixture_creates_temp_dir() {
        let fixture = TestFixture::new();
        assert!(fixture.temp_dir.path().exists());
        assert!(fixture.db_path_str().contains("test.db"));
    }
}
