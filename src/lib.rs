//! Roster: an SQLite-backed employee record store.
//!
//! Roster keeps employees (full name, birth date, gender) in a single
//! `employees` table whose `(full_name, birth_date)` pair is unique at the
//! storage level, and measures how much composite indexes speed up the
//! "gender + name prefix" lookup.
//!
//! # Modules
//!
//! - [`config`]: CLI and environment configuration
//! - [`employee`]: Record type, validation, gender normalization, age
//! - [`generator`]: Synthetic data for bulk loading
//! - [`observability`]: Tracing setup
//! - [`optimizer`]: Measure → index → re-measure protocol
//! - [`storage`]: SQLite persistence layer
//! - [`timing`]: Query timer
//!
//! # Example
//!
//! ```
//! use roster::employee::{Employee, Gender};
//! use roster::storage::{InsertOutcome, Store};
//!
//! let store = Store::open_in_memory().unwrap();
//! store.ensure_schema().unwrap();
//!
//! let employee = Employee::parse("Fox John Andrew", "1990-05-15", "male").unwrap();
//! assert!(matches!(store.insert(&employee).unwrap(), InsertOutcome::Inserted { .. }));
//! assert_eq!(store.insert(&employee).unwrap(), InsertOutcome::DuplicateRejected);
//!
//! let found = store.query_filtered(Gender::Male, "F").unwrap();
//! assert_eq!(found.len(), 1);
//! ```

// Lint configuration
#![warn(clippy::all)]
#![allow(
    clippy::module_name_repetitions,    // storage::store::StoreOptions is fine
    clippy::must_use_candidate,         // Not all functions need #[must_use]
    clippy::missing_errors_doc,         // Error docs can be verbose
    clippy::missing_panics_doc,         // Panic docs can be verbose
    clippy::needless_raw_string_hashes, // r#""# is fine for SQL
    clippy::cast_possible_truncation,   // Day spans and row counts fit
    clippy::cast_sign_loss              // COUNT(*) is never negative
)]

pub mod config;
pub mod employee;
pub mod generator;
pub mod observability;
pub mod optimizer;
pub mod storage;
pub mod timing;
