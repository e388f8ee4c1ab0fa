//! Wagecast - salary explorer with cached AI estimates
//!
//! Browses an employee salary dataset and predicts salaries for new
//! profiles. Each prediction request is fingerprinted and its estimate is
//! kept in a local SQLite cache, so a repeated request never reaches the
//! estimation service again.

pub mod cache;
pub mod cli;
pub mod config;
pub mod dataset;
pub mod error;
pub mod estimator;
pub mod predict;
pub mod ui;

pub use error::{WagecastError, WagecastResult};
