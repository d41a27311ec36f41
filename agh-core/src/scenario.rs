use crate::error::AghError;
use agh_utils::dates::{window_starts, year_window_label};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A named data source: ERA reanalysis (historical) or a climate model
/// projection.
///
/// A scenario carries no year range of its own. Every view passes the
/// span it wants as an explicit [`YearSpan`].
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash, Serialize, Deserialize)]
pub enum Scenario {
    /// ERA-Interim reanalysis
    Era,
    /// GFDL-CM3 projection
    Gfdl,
    /// NCAR-CCSM4 projection
    Ncar,
}

impl Scenario {
    /// Model projections selectable alongside the ERA reference.
    pub const MODELS: [Scenario; 2] = [Scenario::Gfdl, Scenario::Ncar];

    /// Tag used in storage keys and labels.
    pub fn tag(&self) -> &'static str {
        match self {
            Scenario::Era => "ERA",
            Scenario::Gfdl => "GFDL",
            Scenario::Ncar => "NCAR",
        }
    }

    /// True for the historical series other scenarios are compared against.
    pub fn is_reference(&self) -> bool {
        matches!(self, Scenario::Era)
    }
}

impl fmt::Display for Scenario {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for Scenario {
    type Err = AghError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "ERA" => Ok(Scenario::Era),
            "GFDL" => Ok(Scenario::Gfdl),
            "NCAR" => Ok(Scenario::Ncar),
            _ => Err(AghError::UnknownScenario(s.to_string())),
        }
    }
}

/// An inclusive range of calendar years.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash, Serialize, Deserialize)]
pub struct YearSpan {
    pub start: i32,
    pub end: i32,
}

impl YearSpan {
    pub const fn new(start: i32, end: i32) -> Self {
        YearSpan { start, end }
    }

    /// A span of `len` years beginning at `start`.
    pub const fn starting_at(start: i32, len: i32) -> Self {
        YearSpan {
            start,
            end: start + len - 1,
        }
    }

    pub fn contains(&self, year: i32) -> bool {
        self.start <= year && year <= self.end
    }

    pub fn years(&self) -> std::ops::RangeInclusive<i32> {
        self.start..=self.end
    }

    pub fn len(&self) -> usize {
        (self.end - self.start + 1).max(0) as usize
    }

    pub fn is_empty(&self) -> bool {
        self.end < self.start
    }

    /// Consecutive full `len`-year windows inside this span; a trailing
    /// partial window is dropped.
    pub fn windows(&self, len: i32) -> Vec<YearSpan> {
        window_starts(self.start, self.end, len)
            .into_iter()
            .map(|start| YearSpan::starting_at(start, len))
            .collect()
    }

    /// "1980-1989" style label.
    pub fn label(&self) -> String {
        year_window_label(self.start, self.end)
    }
}

impl fmt::Display for YearSpan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label())
    }
}
