//! Store integration tests against a file-backed database.

mod common;

use common::{crafted_f_males, mixed, TestFixture};
use roster::employee::{Employee, Gender};
use roster::generator::{self, GeneratorConfig, SPECIAL_GENDER, SPECIAL_PREFIX};
use roster::storage::{InsertOutcome, Store, StoreError};

#[test]
fn test_filtered_query_finds_exactly_the_crafted_rows() {
    let fixture = TestFixture::new();
    let mut store = fixture.store();

    let mut batch = mixed(1_000);
    batch.extend(crafted_f_males(100));
    assert_eq!(store.bulk_insert(&batch).unwrap(), 1_100);

    let found = store.query_filtered(Gender::Male, "F").unwrap();
    assert_eq!(found.len(), 100);
    assert!(found
        .iter()
        .all(|e| e.gender() == Gender::Male && e.full_name().starts_with('F')));
}

#[test]
fn test_bulk_insert_skips_existing_keys() {
    let fixture = TestFixture::new();
    let mut store = fixture.store();

    let first = mixed(50);
    assert_eq!(store.bulk_insert(&first).unwrap(), 50);

    // 20 exact key duplicates, 30 new rows.
    let mut second: Vec<Employee> = first[..20].to_vec();
    second.extend(crafted_f_males(30));
    assert_eq!(store.bulk_insert(&second).unwrap(), 30);
    assert_eq!(store.table_stats().unwrap().row_count, 80);
}

#[test]
fn test_duplicate_key_with_other_gender_is_rejected() {
    let fixture = TestFixture::new();
    let store = fixture.store();

    let male = Employee::parse("Petrov Ivan", "1979-09-09", "мужской").unwrap();
    let female = Employee::parse("Petrov Ivan", "1979-09-09", "female").unwrap();

    assert!(matches!(
        store.insert(&male).unwrap(),
        InsertOutcome::Inserted { .. }
    ));
    assert_eq!(store.insert(&female).unwrap(), InsertOutcome::DuplicateRejected);

    let all = store.query_sorted_all().unwrap();
    assert_eq!(all, vec![male]);
}

#[test]
fn test_sorted_all_is_ordered_and_distinct() {
    let fixture = TestFixture::new();
    let mut store = fixture.store();

    let batch = generator::generate(&GeneratorConfig {
        count: 2_000,
        special_count: 50,
        seed: Some(42),
        progress_interval: 1_000,
    })
    .unwrap();
    store.bulk_insert(&batch).unwrap();

    let all = store.query_sorted_all().unwrap();
    assert_eq!(all.len(), 2_050);
    assert!(all
        .windows(2)
        .all(|pair| pair[0].full_name() <= pair[1].full_name()));
    assert!(all.windows(2).all(|pair| pair[0] != pair[1]));
}

#[test]
fn test_generated_batch_matches_special_filter() {
    let fixture = TestFixture::new();
    let mut store = fixture.store();

    let batch = generator::generate(&GeneratorConfig {
        count: 1_000,
        special_count: 100,
        seed: Some(3),
        progress_interval: 500,
    })
    .unwrap();
    assert_eq!(store.bulk_insert(&batch).unwrap(), 1_100);

    let found = store.query_filtered(SPECIAL_GENDER, SPECIAL_PREFIX).unwrap();
    assert_eq!(found.len(), 100);
}

#[test]
fn test_data_survives_reopen() {
    let fixture = TestFixture::new();
    {
        let mut store = fixture.store();
        store.bulk_insert(&crafted_f_males(5)).unwrap();
        store.create_optimization_indexes().unwrap();
        store.close().unwrap();
    }

    let store = Store::open(&fixture.db_path).unwrap();
    store.ensure_schema().unwrap();
    let stats = store.table_stats().unwrap();
    assert!(stats.exists);
    assert_eq!(stats.row_count, 5);
    assert_eq!(store.list_indexes().unwrap().len(), 6);
}

#[test]
fn test_open_missing_directory_is_connection_error() {
    let fixture = TestFixture::new();
    let path = fixture.temp_dir.path().join("missing").join("test.db");
    let err = Store::open(&path).unwrap_err();
    assert!(matches!(err, StoreError::Connection { .. }));
}

#[test]
fn test_dropping_store_releases_file() {
    let fixture = TestFixture::new();
    {
        let store = fixture.store();
        store
            .insert(&Employee::new("Fox Ann", "2000-06-15", Gender::Female))
            .unwrap();
    }
    // A fresh session sees the committed row.
    let store = Store::open(&fixture.db_path).unwrap();
    assert_eq!(store.table_stats().unwrap().row_count, 1);
}

#[test]
fn test_sorted_all_collapses_rows_written_around_the_constraint() {
    let fixture = TestFixture::new();

    // A table without the UNIQUE key, as if edited outside the application.
    {
        let conn = rusqlite::Connection::open(&fixture.db_path).unwrap();
        conn.execute_batch(
            "CREATE TABLE employees (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                full_name TEXT NOT NULL,
                birth_date TEXT NOT NULL,
                gender TEXT NOT NULL,
                created_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP
            );
            INSERT INTO employees (full_name, birth_date, gender)
                VALUES ('Fox John', '1990-01-01', 'Male');
            INSERT INTO employees (full_name, birth_date, gender)
                VALUES ('Fox John', '1990-01-01', 'Male');",
        )
        .unwrap();
    }

    let store = Store::open(&fixture.db_path).unwrap();
    assert_eq!(store.table_stats().unwrap().row_count, 2);

    let all = store.query_sorted_all().unwrap();
    assert_eq!(
        all,
        vec![Employee::new("Fox John", "1990-01-01", Gender::Male)]
    );
}

#[test]
fn test_store_reports_its_path() {
    let fixture = TestFixture::new();
    let store = fixture.store();
    assert_eq!(store.path(), Some(fixture.db_path.as_path()));
    assert_eq!(Store::open_in_memory().unwrap().path(), None);
}
