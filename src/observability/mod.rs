//! Logging infrastructure.
//!
//! Provides:
//! - Structured tracing to stderr with an environment-driven filter

pub mod tracing;
