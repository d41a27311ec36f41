//! Chart-ready traces built from the aggregation results.
//!
//! Every figure serializes to a plain `{ title, x_categories, data }` JSON
//! object, where each trace carries its own `x`/`y` arrays, label and colour.

use crate::climatology::ClimatologyWindow;
use crate::degree_days::DecadeDegreeDays;
use crate::threshold_run::DecadeBin;
use agh_core::units::Measurement;
use agh_core::{MonthDay, YearSpan};
use serde::{Deserialize, Serialize};

pub const ERA_RUN_COLOR: &str = "#999999";
pub const MODEL_RUN_COLOR: &str = "#008000";
pub const ERA_GDD_COLOR: &str = "#2d2d2d";
/// Fallback for annual-minimum windows outside the palette.
pub const DEFAULT_WINDOW_COLOR: &str = "#999999";

/// Colours of the 30-year annual-minimum windows, keyed by start year.
pub const WINDOW_PALETTE: [(i32, &str); 4] = [
    (1980, "#999999"),
    (2010, "#bdd7e7"),
    (2040, "#6baed6"),
    (2070, "#2171b5"),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TraceMode {
    Lines,
    Markers,
    #[serde(rename = "lines+markers")]
    LinesMarkers,
}

/// A y value is either numeric or a category label.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ChartValue {
    Number(f64),
    Label(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartSeries {
    pub name: String,
    pub color: String,
    pub mode: TraceMode,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dash: Option<String>,
    pub x: Vec<String>,
    pub y: Vec<ChartValue>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartFigure {
    pub title: String,
    /// Ordered category axis, when the x values are day-of-year keys
    #[serde(skip_serializing_if = "Option::is_none")]
    pub x_categories: Option<Vec<String>>,
    pub data: Vec<ChartSeries>,
}

impl ChartFigure {
    pub fn new(title: impl Into<String>) -> Self {
        ChartFigure {
            title: title.into(),
            x_categories: None,
            data: Vec::new(),
        }
    }

    /// Use the full "01-01".."12-31" calendar as the x axis.
    pub fn with_calendar_axis(mut self) -> Self {
        self.x_categories = Some(calendar_axis());
        self
    }

    pub fn extend(&mut self, traces: impl IntoIterator<Item = ChartSeries>) {
        self.data.extend(traces);
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

/// All 366 day-of-year keys in calendar order.
pub fn calendar_axis() -> Vec<String> {
    MonthDay::calendar().map(|k| k.to_string()).collect()
}

/// One horizontal bar per decade: from the representative run's start to
/// its end, at the decade's label. Decades without a run are skipped.
pub fn growing_season_traces(bins: &[DecadeBin], threshold: i32) -> Vec<ChartSeries> {
    bins.iter()
        .filter_map(|bin| {
            let run = &bin.representative;
            let start = run.start_key()?;
            let end = run.display_end()?;
            let label = bin.span.label();
            let (color, dash) = if bin.scenario.is_reference() {
                (ERA_RUN_COLOR, None)
            } else {
                (MODEL_RUN_COLOR, Some("dash".to_string()))
            };
            Some(ChartSeries {
                name: format!(
                    "{} Days > {}{}",
                    run.n_days,
                    threshold,
                    Measurement::Temperature.imperial_unit()
                ),
                color: color.to_string(),
                mode: TraceMode::LinesMarkers,
                dash,
                x: vec![start.to_string(), end.to_string()],
                y: vec![ChartValue::Label(label.clone()), ChartValue::Label(label)],
            })
        })
        .collect()
}

fn window_color(span: YearSpan) -> &'static str {
    WINDOW_PALETTE
        .iter()
        .find(|(start, _)| *start == span.start)
        .map(|(_, color)| *color)
        .unwrap_or(DEFAULT_WINDOW_COLOR)
}

/// Marker trace of a per-day minimum climatology for one window.
pub fn annual_minimum_trace(span: YearSpan, window: &ClimatologyWindow) -> ChartSeries {
    let (x, y) = window
        .iter()
        .map(|(key, value)| (key.to_string(), ChartValue::Number(value)))
        .unzip();
    ChartSeries {
        name: span.label(),
        color: window_color(span).to_string(),
        mode: TraceMode::Markers,
        dash: None,
        x,
        y,
    }
}

/// Gradient colour of a decade within the scenario's span: light for the
/// first decade, darkening toward the end. The position is measured against
/// one year past the span's length, so the last decade never reaches the
/// darkest end.
pub fn gradient_color(decade: YearSpan, span: YearSpan) -> String {
    let width = (span.end + 2 - span.start).max(1) as f64;
    let frac = (decade.start - span.start) as f64 / width;
    format!(
        "rgb({:.0},{:.0},{:.0})",
        230.0 - frac * 210.0,
        250.0 - frac * 130.0,
        250.0 - frac * 210.0
    )
}

/// One line per decade of cumulative degree days. `span` is the whole
/// period the decades were taken from.
pub fn gdd_traces(decades: &[DecadeDegreeDays], span: YearSpan) -> Vec<ChartSeries> {
    decades
        .iter()
        .map(|decade| {
            let color = if decade.scenario.is_reference() {
                ERA_GDD_COLOR.to_string()
            } else {
                gradient_color(decade.span, span)
            };
            let (x, y) = decade
                .cumulative
                .points()
                .iter()
                .map(|(key, value)| (key.to_string(), ChartValue::Number(*value)))
                .unzip();
            ChartSeries {
                name: decade.span.label(),
                color,
                mode: TraceMode::Lines,
                dash: None,
                x,
                y,
            }
        })
        .collect()
}
