//! Before/after measurement around index creation.
//!
//! [`optimize_and_report`] times the filtered query, rebuilds the composite
//! indexes, times the identical query again and reports the relative gain.

use serde::{Serialize, Serializer};
use std::time::Duration;
use thiserror::Error;

use crate::employee::Gender;
use crate::storage::{Store, StoreError};
use crate::timing::timed;

/// Which phase of the protocol failed.
///
/// An indexing failure means no "after" measurement was taken.
#[derive(Debug, Error)]
pub enum OptimizeError {
    #[error("baseline measurement failed: {0}")]
    Baseline(#[source] StoreError),

    #[error("index creation failed, comparison aborted: {0}")]
    Indexing(#[source] StoreError),

    #[error("post-index measurement failed: {0}")]
    Remeasure(#[source] StoreError),
}

/// Relative change in query time.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "kind", content = "percent", rename_all = "snake_case")]
pub enum Improvement {
    /// Signed percentage; negative when the indexed query was slower.
    Measured(f64),
    /// The baseline took no measurable time.
    NotMeasurable,
}

impl Improvement {
    /// `(before - after) / before * 100`, or [`Improvement::NotMeasurable`]
    /// when `before` is zero.
    pub fn between(before: Duration, after: Duration) -> Self {
        let before = before.as_secs_f64();
        if before > 0.0 {
            Self::Measured((before - after.as_secs_f64()) / before * 100.0)
        } else {
            Self::NotMeasurable
        }
    }

    pub fn percent(self) -> Option<f64> {
        match self {
            Self::Measured(percent) => Some(percent),
            Self::NotMeasurable => None,
        }
    }
}

/// Outcome of one optimization pass.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OptimizationReport {
    pub gender: Gender,
    pub name_prefix: String,
    #[serde(serialize_with = "as_secs")]
    pub time_before: Duration,
    #[serde(serialize_with = "as_secs")]
    pub time_after: Duration,
    pub rows_before: usize,
    pub rows_after: usize,
    pub improvement: Improvement,
}

fn as_secs<S: Serializer>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_f64(duration.as_secs_f64())
}

/// Measure, index, re-measure.
///
/// # Errors
///
/// Each phase maps to its own [`OptimizeError`] variant. If index creation
/// fails the second query is never run.
pub fn optimize_and_report(
    store: &Store,
    gender: Gender,
    name_prefix: &str,
) -> Result<OptimizationReport, OptimizeError> {
    let (before, time_before) = timed(|| store.query_filtered(gender, name_prefix))
        .transpose()
        .map_err(OptimizeError::Baseline)?
        .into_parts();
    tracing::info!(
        rows = before.len(),
        secs = time_before.as_secs_f64(),
        "Performance before optimization"
    );

    store
        .create_optimization_indexes()
        .map_err(OptimizeError::Indexing)?;

    let (after, time_after) = timed(|| store.query_filtered(gender, name_prefix))
        .transpose()
        .map_err(OptimizeError::Remeasure)?
        .into_parts();
    tracing::info!(
        rows = after.len(),
        secs = time_after.as_secs_f64(),
        "Performance after optimization"
    );

    Ok(OptimizationReport {
        gender,
        name_prefix: name_prefix.to_string(),
        time_before,
        time_after,
        rows_before: before.len(),
        rows_after: after.len(),
        improvement: Improvement::between(time_before, time_after),
    })
}
