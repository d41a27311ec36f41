//! Annual minimum temperatures and USDA plant hardiness zones.

use agh_core::{DailySeries, YearSpan};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Lower bound of zone 1a, °F.
pub const ZONE_FLOOR_F: f64 = -60.0;
/// Width of a half zone, °F.
pub const HALF_ZONE_WIDTH_F: f64 = 5.0;
pub const MAX_ZONE: u8 = 13;

/// Coldest record of a year.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AnnualMinimum {
    pub year: i32,
    pub date: NaiveDate,
    pub value: f64,
}

/// Coldest record for each year of `span` that has data. On equal values
/// the earliest date wins.
pub fn annual_minimums(series: &DailySeries, span: YearSpan) -> Vec<AnnualMinimum> {
    span.years()
        .filter_map(|year| {
            series
                .year(year)
                .iter()
                .fold(None, |coldest: Option<AnnualMinimum>, daily| match coldest {
                    Some(c) if c.value <= daily.value => Some(c),
                    _ => Some(AnnualMinimum {
                        year,
                        date: daily.date,
                        value: daily.value,
                    }),
                })
        })
        .collect()
}

#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash, Serialize, Deserialize)]
pub enum HalfZone {
    A,
    B,
}

/// USDA zone number plus half; "a" is the colder half.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash, Serialize, Deserialize)]
pub struct HardinessZone {
    pub zone: u8,
    pub half: HalfZone,
}

impl HardinessZone {
    /// Temperature band `[low, high)` covered by this half zone, °F.
    pub fn range_f(&self) -> (f64, f64) {
        let idx = (self.zone as i32 - 1) * 2 + matches!(self.half, HalfZone::B) as i32;
        let low = ZONE_FLOOR_F + idx as f64 * HALF_ZONE_WIDTH_F;
        (low, low + HALF_ZONE_WIDTH_F)
    }
}

impl fmt::Display for HardinessZone {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let half = match self.half {
            HalfZone::A => "a",
            HalfZone::B => "b",
        };
        write!(f, "{}{}", self.zone, half)
    }
}

/// Zone for an average annual extreme minimum temperature in °F.
pub fn hardiness_zone(temp_f: f64) -> Option<HardinessZone> {
    if !temp_f.is_finite() || temp_f < ZONE_FLOOR_F {
        return None;
    }
    let idx = ((temp_f - ZONE_FLOOR_F) / HALF_ZONE_WIDTH_F).floor() as u32;
    let zone = idx / 2 + 1;
    if zone > MAX_ZONE as u32 {
        return None;
    }
    let half = if idx % 2 == 0 { HalfZone::A } else { HalfZone::B };
    Some(HardinessZone {
        zone: zone as u8,
        half,
    })
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HardinessSummary {
    pub span: YearSpan,
    pub minimums: Vec<AnnualMinimum>,
    /// Mean of the annual minimums, absent when no year has data
    pub mean_minimum: Option<f64>,
    pub zone: Option<HardinessZone>,
}

/// Average the annual minimums over `span` and classify the result.
pub fn hardiness_for_span(series: &DailySeries, span: YearSpan) -> HardinessSummary {
    let minimums = annual_minimums(series, span);
    let mean_minimum = if minimums.is_empty() {
        None
    } else {
        Some(minimums.iter().map(|m| m.value).sum::<f64>() / minimums.len() as f64)
    };
    let zone = mean_minimum.and_then(hardiness_zone);
    if minimums.len() < span.len() {
        log::warn!(
            "{}: only {} of {} years have data",
            span,
            minimums.len(),
            span.len()
        );
    }
    HardinessSummary {
        span,
        minimums,
        mean_minimum,
        zone,
    }
}
