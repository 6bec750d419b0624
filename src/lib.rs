//! release-batch: merge labelled PRs into a release branch and keep one
//! aggregate release PR up to date.
//!
//! The library holds the pipeline; the `release-batch` binary wraps it with
//! argument parsing and console output.

pub mod auth;
pub mod error;
pub mod platform;
pub mod progress;
pub mod release;
pub mod types;
