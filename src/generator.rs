//! Synthetic employee data for load testing.
//!
//! Produces a large batch of random employees plus a crafted subset of male
//! employees whose surname starts with `F`, which is exactly what the
//! filtered query looks for. Keys are unique within a batch.

use chrono::{Days, NaiveDate};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use std::collections::HashSet;
use thiserror::Error;

use crate::employee::{Employee, Gender, BIRTH_DATE_FORMAT};

const FIRST_NAMES: &[&str] = &[
    "John", "Michael", "David", "James", "Robert", "Mary", "Jennifer", "Linda", "Patricia",
    "Elizabeth",
];

const LAST_NAMES: &[&str] = &[
    "Smith", "Johnson", "Williams", "Brown", "Jones", "Miller", "Davis", "Garcia", "Rodriguez",
    "Wilson",
];

const MIDDLE_NAMES: &[&str] = &["Alexander", "Thomas", "Charles", "Christopher", "Matthew"];

const F_SURNAMES: &[&str] = &[
    "Fisher", "Fletcher", "Ford", "Foster", "Fox", "Franklin", "Frazier", "Freeman", "French",
    "Fuller",
];

const F_MIDDLE_NAMES: &[&str] = &["Andrew", "Benjamin", "Daniel", "Edward", "George"];

const EARLIEST_BIRTH: NaiveDate = match NaiveDate::from_ymd_opt(1950, 1, 1) {
    Some(date) => date,
    None => panic!("invalid earliest birth date"),
};

const LATEST_BIRTH: NaiveDate = match NaiveDate::from_ymd_opt(2005, 12, 31) {
    Some(date) => date,
    None => panic!("invalid latest birth date"),
};

/// Surname initial shared by every crafted record.
pub const SPECIAL_PREFIX: &str = "F";

/// Gender of every crafted record.
pub const SPECIAL_GENDER: Gender = Gender::Male;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum GenerateError {
    #[error("cannot generate {requested} distinct {kind} employees, only {capacity} combinations exist")]
    Exhausted {
        kind: &'static str,
        requested: usize,
        capacity: usize,
    },
}

/// How many employees to produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GeneratorConfig {
    /// Random employees of either gender.
    pub count: usize,
    /// Male employees with an `F` surname, appended after the random ones.
    pub special_count: usize,
    /// Fixed seed for reproducible batches.
    pub seed: Option<u64>,
    /// Log progress every this many records.
    pub progress_interval: usize,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            count: 1_000_000,
            special_count: 100,
            seed: None,
            progress_interval: 100_000,
        }
    }
}

/// Name pools for one kind of record.
struct NamePool {
    kind: &'static str,
    last: &'static [&'static str],
    first: &'static [&'static str],
    middle: &'static [&'static str],
}

impl NamePool {
    fn capacity(&self) -> usize {
        let days = (LATEST_BIRTH - EARLIEST_BIRTH).num_days() as usize + 1;
        self.last.len() * self.first.len() * self.middle.len() * days
    }

    fn draw(&self, rng: &mut SmallRng) -> (String, NaiveDate) {
        let name = format!(
            "{} {} {}",
            pick(rng, self.last),
            pick(rng, self.first),
            pick(rng, self.middle)
        );
        (name, random_birth_date(rng))
    }
}

const RANDOM_POOL: NamePool = NamePool {
    kind: "random",
    last: LAST_NAMES,
    first: FIRST_NAMES,
    middle: MIDDLE_NAMES,
};

const SPECIAL_POOL: NamePool = NamePool {
    kind: "special",
    last: F_SURNAMES,
    first: FIRST_NAMES,
    middle: F_MIDDLE_NAMES,
};

/// Build a batch of `count + special_count` employees with distinct keys.
///
/// Random employees alternate Male/Female by position. Crafted employees
/// are all [`SPECIAL_GENDER`] with surnames starting with [`SPECIAL_PREFIX`].
pub fn generate(config: &GeneratorConfig) -> Result<Vec<Employee>, GenerateError> {
    for (pool, requested) in [
        (&RANDOM_POOL, config.count),
        (&SPECIAL_POOL, config.special_count),
    ] {
        let capacity = pool.capacity();
        if requested > capacity {
            return Err(GenerateError::Exhausted {
                kind: pool.kind,
                requested,
                capacity,
            });
        }
    }

    let mut rng = match config.seed {
        Some(seed) => SmallRng::seed_from_u64(seed),
        None => SmallRng::from_os_rng(),
    };
    let progress_interval = config.progress_interval.max(1);
    let mut seen = HashSet::with_capacity(config.count + config.special_count);
    let mut employees = Vec::with_capacity(config.count + config.special_count);

    tracing::info!(count = config.count, "Generating random employees");
    for i in 0..config.count {
        let gender = if i % 2 == 0 { Gender::Male } else { Gender::Female };
        employees.push(draw_unique(&RANDOM_POOL, &mut rng, &mut seen, gender));
        if (i + 1) % progress_interval == 0 {
            tracing::info!(generated = i + 1, "Generation progress");
        }
    }

    tracing::info!(
        count = config.special_count,
        prefix = SPECIAL_PREFIX,
        "Generating crafted employees"
    );
    for _ in 0..config.special_count {
        employees.push(draw_unique(&SPECIAL_POOL, &mut rng, &mut seen, SPECIAL_GENDER));
    }

    Ok(employees)
}

fn draw_unique(
    pool: &NamePool,
    rng: &mut SmallRng,
    seen: &mut HashSet<(String, NaiveDate)>,
    gender: Gender,
) -> Employee {
    loop {
        let (name, born) = pool.draw(rng);
        if seen.insert((name.clone(), born)) {
            return Employee::new(name, born.format(BIRTH_DATE_FORMAT).to_string(), gender);
        }
    }
}

fn pick(rng: &mut SmallRng, options: &'static [&'static str]) -> &'static str {
    options[rng.random_range(0..options.len())]
}

fn random_birth_date(rng: &mut SmallRng) -> NaiveDate {
    let span = (LATEST_BIRTH - EARLIEST_BIRTH).num_days() as u64;
    EARLIEST_BIRTH + Days::new(rng.random_range(0..=span))
}
