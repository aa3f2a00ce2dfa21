//! `add`, `list` and `generate` commands.

use anyhow::{Context, Result};
use roster::config::OutputFormat;
use roster::employee::Employee;
use roster::generator::{self, GeneratorConfig};
use roster::storage::{InsertOutcome, Store};
use serde::Serialize;

use super::{print_json, print_message, print_rule};

#[derive(Serialize)]
struct EmployeeRow<'a> {
    #[serde(flatten)]
    employee: &'a Employee,
    age: Option<i32>,
}

#[derive(Serialize)]
struct GenerateOutput {
    generated: usize,
    inserted: usize,
    row_count: u64,
}

pub fn add(
    store: &Store,
    full_name: &str,
    birth_date: &str,
    gender: &str,
    format: OutputFormat,
) -> Result<()> {
    let employee = Employee::parse(full_name, birth_date, gender).context("invalid employee data")?;

    match store.insert(&employee).context("failed to add employee")? {
        InsertOutcome::Inserted { id } => print_message(
            format,
            "inserted",
            format!("Employee '{}' added successfully (id {id})", employee.full_name()),
        ),
        InsertOutcome::DuplicateRejected => print_message(
            format,
            "duplicate",
            format!(
                "Employee '{}' with birth date '{}' already exists",
                employee.full_name(),
                employee.birth_date()
            ),
        ),
    }
}

pub fn list(store: &Store, format: OutputFormat) -> Result<()> {
    let employees = store.query_sorted_all().context("failed to fetch employees")?;
    let rows: Vec<_> = employees
        .iter()
        .map(|employee| EmployeeRow {
            employee,
            age: employee.age().ok(),
        })
        .collect();

    match format {
        OutputFormat::Text => {
            if rows.is_empty() {
                println!("No employees found!");
                return Ok(());
            }
            println!("{:<40} {:<12} {:<8} {:<8}", "Full Name", "Birth Date", "Gender", "Age");
            print_rule(80);
            for row in &rows {
                let age = row.age.map_or_else(|| "-".to_string(), |age| age.to_string());
                println!(
                    "{:<40} {:<12} {:<8} {:<8}",
                    row.employee.full_name(),
                    row.employee.birth_date(),
                    row.employee.gender().as_str(),
                    age
                );
            }
            println!();
            println!("Total employees: {}", rows.len());
        }
        OutputFormat::Json => print_json(&rows)?,
    }
    Ok(())
}

pub fn generate(store: &mut Store, config: &GeneratorConfig, format: OutputFormat) -> Result<()> {
    let employees = generator::generate(config).context("failed to generate test data")?;
    let inserted = store
        .bulk_insert(&employees)
        .context("failed to insert test data")?;
    let stats = store.table_stats().context("failed to read table info")?;

    let output = GenerateOutput {
        generated: employees.len(),
        inserted,
        row_count: stats.row_count,
    };
    match format {
        OutputFormat::Text => {
            println!("Generated {} employees", output.generated);
            println!("Successfully inserted {} employees", output.inserted);
            println!("Total records: {}", output.row_count);
        }
        OutputFormat::Json => print_json(&output)?,
    }
    Ok(())
}
