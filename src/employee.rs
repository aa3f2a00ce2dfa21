//! Employee records.
//!
//! An [`Employee`] is a transient value: built by a producer (manual entry,
//! the generator, or a row read back from storage), validated, handed to the
//! store and dropped. Records are never mutated after construction.
//!
//! The `(full_name, birth_date)` pair is the identity of a record. The store
//! enforces its uniqueness; nothing here keeps a registry.

use chrono::{Datelike, Local, NaiveDate};
use rusqlite::types::{FromSql, FromSqlError, FromSqlResult, ToSql, ToSqlOutput, ValueRef};
use serde::Serialize;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Canonical birth date format (`YYYY-MM-DD`).
pub const BIRTH_DATE_FORMAT: &str = "%Y-%m-%d";

/// Accepted gender tokens, matched case-insensitively after trimming.
///
/// English and Russian spellings are both accepted, long and short forms.
const GENDER_TOKENS: &[(&str, Gender)] = &[
    ("male", Gender::Male),
    ("m", Gender::Male),
    ("мужской", Gender::Male),
    ("муж", Gender::Male),
    ("female", Gender::Female),
    ("f", Gender::Female),
    ("женский", Gender::Female),
    ("жен", Gender::Female),
];

/// Reasons a record is rejected before it reaches storage.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("full name cannot be empty")]
    EmptyName,

    #[error("invalid birth date '{value}', expected YYYY-MM-DD")]
    InvalidBirthDate { value: String },

    #[error("unknown gender '{value}', expected Male or Female")]
    UnknownGender { value: String },
}

/// Gender as stored in the `employees.gender` column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Gender {
    Male,
    Female,
}

impl Gender {
    /// The stored spelling.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Male => "Male",
            Self::Female => "Female",
        }
    }

    /// Map any accepted token onto a gender.
    ///
    /// Unrecognised input is an error; there is no default.
    pub fn normalize(token: &str) -> Result<Self, ValidationError> {
        let lowered = token.trim().to_lowercase();
        GENDER_TOKENS
            .iter()
            .find(|(accepted, _)| *accepted == lowered)
            .map(|(_, gender)| *gender)
            .ok_or_else(|| ValidationError::UnknownGender {
                value: token.to_string(),
            })
    }
}

impl FromStr for Gender {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::normalize(s)
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl ToSql for Gender {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(ToSqlOutput::from(self.as_str()))
    }
}

impl FromSql for Gender {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        // Stored values are canonical; anything else was written outside the CHECK.
        match value.as_str()? {
            "Male" => Ok(Self::Male),
            "Female" => Ok(Self::Female),
            other => Err(FromSqlError::Other(Box::new(
                ValidationError::UnknownGender {
                    value: other.to_string(),
                },
            ))),
        }
    }
}

/// A single employee record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Employee {
    full_name: String,
    birth_date: String,
    gender: Gender,
}

impl Employee {
    /// Build a record from already-typed parts.
    ///
    /// No validation happens here; call [`Employee::validate`] before insertion
    /// or use [`Employee::parse`].
    pub fn new(full_name: impl Into<String>, birth_date: impl Into<String>, gender: Gender) -> Self {
        Self {
            full_name: full_name.into(),
            birth_date: birth_date.into(),
            gender,
        }
    }

    /// Build and validate a record from raw user input.
    ///
    /// The gender token is normalized; the name and date are kept as given.
    pub fn parse(full_name: &str, birth_date: &str, gender: &str) -> Result<Self, ValidationError> {
        let employee = Self::new(full_name, birth_date, Gender::normalize(gender)?);
        employee.validate()?;
        Ok(employee)
    }

    pub fn full_name(&self) -> &str {
        &self.full_name
    }

    pub fn birth_date(&self) -> &str {
        &self.birth_date
    }

    pub fn gender(&self) -> Gender {
        self.gender
    }

    /// Check the name and birth date.
    ///
    /// The name is trimmed only for the emptiness check; it is stored as given.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.full_name.trim().is_empty() {
            return Err(ValidationError::EmptyName);
        }
        self.parsed_birth_date()?;
        Ok(())
    }

    /// Parse the birth date, accepting only the canonical spelling.
    pub fn parsed_birth_date(&self) -> Result<NaiveDate, ValidationError> {
        parse_birth_date(&self.birth_date)
    }

    /// Full years elapsed between the birth date and `reference`.
    ///
    /// A year only counts once its anniversary (month, day) has been reached.
    /// The result is negative when `reference` precedes the birth date.
    pub fn calculate_age(&self, reference: NaiveDate) -> Result<i32, ValidationError> {
        let born = self.parsed_birth_date()?;
        let mut age = reference.year() - born.year();
        if (reference.month(), reference.day()) < (born.month(), born.day()) {
            age -= 1;
        }
        Ok(age)
    }

    /// Age as of today's local date.
    pub fn age(&self) -> Result<i32, ValidationError> {
        self.calculate_age(Local::now().date_naive())
    }

    /// Insertable `(full_name, birth_date, gender)` tuple.
    pub fn to_row(&self) -> (&str, &str, Gender) {
        (&self.full_name, &self.birth_date, self.gender)
    }

    /// Rebuild a record from a `SELECT full_name, birth_date, gender ...` row.
    ///
    /// Columns are read by position; the birth date is passed through as stored.
    pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            full_name: row.get(0)?,
            birth_date: row.get(1)?,
            gender: row.get(2)?,
        })
    }
}

impl fmt::Display for Employee {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} | {} | {}", self.full_name, self.birth_date, self.gender)
    }
}

/// Parse a canonical `YYYY-MM-DD` date.
///
/// Values chrono would accept but that do not format back identically
/// (`2000-6-5`, surrounding whitespace) are rejected.
pub fn parse_birth_date(value: &str) -> Result<NaiveDate, ValidationError> {
    NaiveDate::parse_from_str(value, BIRTH_DATE_FORMAT)
        .ok()
        .filter(|date| date.format(BIRTH_DATE_FORMAT).to_string() == value)
        .ok_or_else(|| ValidationError::InvalidBirthDate {
            value: value.to_string(),
        })
}
