//! Temporal aggregation of daily temperature series.
//!
//! This crate turns loaded ERA and model series into growing-season
//! metrics and the chart traces that display them.

pub mod bias;
pub mod chart;
pub mod climatology;
pub mod degree_days;
pub mod hardiness;
pub mod threshold_run;

pub use bias::{bias, BiasCorrection, BIAS_BASELINE};
pub use climatology::{climatology, Aggregate, ClimatologyWindow};
pub use degree_days::{cumulative_gdd, decade_gdd, CumulativeDegreeDays, DecadeDegreeDays};
pub use hardiness::{annual_minimums, hardiness_for_span, hardiness_zone, HardinessZone};
pub use threshold_run::{decade_bins, decade_representative, longest_run, DecadeBin, ThresholdRun};
