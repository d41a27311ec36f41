//! Cumulative growing degree days.

use crate::bias::BiasCorrection;
use crate::climatology::{climatology, Aggregate, ClimatologyWindow};
use crate::threshold_run::DECADE_LENGTH;
use agh_core::{DailySeries, MonthDay, Scenario, YearSpan};
use serde::{Deserialize, Serialize};

/// Running sum of `mean - baseline` over the days whose mean exceeds the
/// baseline, in calendar order. Days at or below the baseline have no
/// entry; the sum simply does not advance across them.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CumulativeDegreeDays {
    points: Vec<(MonthDay, f64)>,
}

impl CumulativeDegreeDays {
    pub fn points(&self) -> &[(MonthDay, f64)] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Season total (the value at "12-31").
    pub fn total(&self) -> f64 {
        self.points.last().map(|(_, v)| *v).unwrap_or(0.0)
    }
}

/// Accumulate degree days above `baseline` from a mean climatology.
///
/// The final total is always written under "12-31" so every trace ends at
/// year end, replacing the natural "12-31" value if that day qualified. A
/// window with no day above the baseline gives a single `("12-31", 0.0)`;
/// an empty window gives an empty result.
pub fn cumulative_gdd(mean_climatology: &ClimatologyWindow, baseline: f64) -> CumulativeDegreeDays {
    if mean_climatology.is_empty() {
        return CumulativeDegreeDays::default();
    }
    let mut sum = 0.0;
    let mut points: Vec<(MonthDay, f64)> = mean_climatology
        .iter()
        .filter(|(_, mean)| *mean > baseline)
        .map(|(key, mean)| {
            sum += mean - baseline;
            (key, sum)
        })
        .collect();
    if points.last().map(|(k, _)| *k) == Some(MonthDay::YEAR_END) {
        points.pop();
    }
    points.push((MonthDay::YEAR_END, sum));
    CumulativeDegreeDays { points }
}

/// Cumulative degree days for one decade of a scenario.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecadeDegreeDays {
    pub scenario: Scenario,
    pub span: YearSpan,
    pub cumulative: CumulativeDegreeDays,
}

/// Bias applied to a model's decade climatologies, with the unit factor
/// between the bias and the series.
#[derive(Debug, Clone, Copy)]
pub struct Correction<'a> {
    pub bias: &'a BiasCorrection,
    pub unit_factor: f64,
}

/// Mean climatology of every full decade in `span`, optionally bias
/// corrected, accumulated above `baseline`.
pub fn decade_gdd(
    series: &DailySeries,
    scenario: Scenario,
    baseline: f64,
    span: YearSpan,
    correction: Option<Correction<'_>>,
) -> Vec<DecadeDegreeDays> {
    span.windows(DECADE_LENGTH)
        .into_iter()
        .map(|decade| {
            let mean = climatology(series, decade, Aggregate::Mean);
            let mean = match correction {
                Some(c) => c.bias.apply(&mean, c.unit_factor),
                None => mean,
            };
            let cumulative = cumulative_gdd(&mean, baseline);
            log::debug!(
                "{} {}: {:.1} degree days above {}",
                scenario,
                decade,
                cumulative.total(),
                baseline
            );
            DecadeDegreeDays {
                scenario,
                span: decade,
                cumulative,
            }
        })
        .collect()
}
