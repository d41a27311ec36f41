//! Core types and series loader for Alaska community temperature data.
//!
//! - `series`: immutable daily series and CSV parsing
//! - `month_day`: day-of-year keys for climatological grouping
//! - `scenario`: data source tags and explicit year spans
//! - `loader`: fetches per-community series (network access behind the `api` feature)

pub mod community;
pub mod date_range;
pub mod error;
pub mod loader;
pub mod month_day;
pub mod scenario;
pub mod series;
pub mod units;

pub use error::{AghError, Result};
pub use month_day::MonthDay;
pub use scenario::{Scenario, YearSpan};
pub use series::{DailySeries, DailyValue};
