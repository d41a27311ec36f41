use crate::error::{AghError, Result};
use crate::scenario::YearSpan;
use crate::units::Measurement;
use agh_utils::dates::parse_date;
use chrono::{Datelike, NaiveDate};
use csv::ReaderBuilder;
use serde::{Deserialize, Serialize};

/// Name of the date column in community series CSVs.
pub const TIME_COLUMN: &str = "time";

/// Name of the value column in community series CSVs. Older exports name
/// the value column after the community instead; see [`DailySeries::from_csv`].
pub const VALUE_COLUMN: &str = "temp";

/// A single daily value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DailyValue {
    pub date: NaiveDate,
    pub value: f64,
}

impl DailyValue {
    pub fn new(date: NaiveDate, value: f64) -> Self {
        DailyValue { date, value }
    }

    pub fn year(&self) -> i32 {
        self.date.year()
    }
}

/// An immutable daily time series, sorted by date with at most one value
/// per calendar day. Missing days are simply absent.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct DailySeries {
    values: Vec<DailyValue>,
}

impl DailySeries {
    /// Build a series, sorting by date. When a date appears more than once
    /// the first occurrence is kept.
    pub fn new(mut values: Vec<DailyValue>) -> Self {
        values.sort_by_key(|v| v.date);
        values.dedup_by_key(|v| v.date);
        DailySeries { values }
    }

    /// Build a series of consecutive days starting at `start`.
    pub fn from_consecutive(start: NaiveDate, values: &[f64]) -> Self {
        let values = start
            .iter_days()
            .zip(values.iter())
            .map(|(date, value)| DailyValue::new(date, *value))
            .collect();
        DailySeries::new(values)
    }

    pub fn values(&self) -> &[DailyValue] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn first_year(&self) -> Option<i32> {
        self.values.first().map(DailyValue::year)
    }

    pub fn last_year(&self) -> Option<i32> {
        self.values.last().map(DailyValue::year)
    }

    /// The records falling inside `span` (inclusive calendar years).
    pub fn within(&self, span: YearSpan) -> &[DailyValue] {
        let lo = self.values.partition_point(|v| v.year() < span.start);
        let hi = self.values.partition_point(|v| v.year() <= span.end);
        if lo >= hi {
            return &[];
        }
        &self.values[lo..hi]
    }

    /// The records of a single calendar year.
    pub fn year(&self, year: i32) -> &[DailyValue] {
        self.within(YearSpan::new(year, year))
    }

    /// A new series with every value passed through `f`.
    pub fn map_values<F: Fn(f64) -> f64>(&self, f: F) -> DailySeries {
        DailySeries {
            values: self
                .values
                .iter()
                .map(|v| DailyValue::new(v.date, f(v.value)))
                .collect(),
        }
    }

    /// Parse a community series CSV body (metric units) and convert it to
    /// imperial units.
    ///
    /// The date column is `time`. The value column is `temp` when present,
    /// otherwise the first column that is not `time`. Rows with an empty
    /// value are skipped; any unparsable date or value fails the whole
    /// series.
    pub fn from_csv(body: &str, measurement: Measurement) -> Result<DailySeries> {
        let mut rdr = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(body.as_bytes());

        let headers = rdr.headers()?.clone();
        let time_idx = headers
            .iter()
            .position(|h| h.trim() == TIME_COLUMN)
            .ok_or_else(|| AghError::MissingColumn(TIME_COLUMN.to_string()))?;
        let value_idx = headers
            .iter()
            .position(|h| h.trim() == VALUE_COLUMN)
            .or_else(|| {
                headers
                    .iter()
                    .enumerate()
                    .find(|(i, h)| *i != time_idx && !h.trim().is_empty())
                    .map(|(i, _)| i)
            })
            .ok_or_else(|| AghError::MissingColumn(VALUE_COLUMN.to_string()))?;

        let mut values = Vec::new();
        let mut skipped = 0u32;
        for result in rdr.records() {
            let record = result?;
            let date_str = record.get(time_idx).unwrap_or("").trim();
            let value_str = record.get(value_idx).unwrap_or("").trim();
            if value_str.is_empty() || value_str.eq_ignore_ascii_case("nan") {
                skipped += 1;
                continue;
            }
            let date =
                parse_date(date_str).map_err(|_| AghError::DateParse(date_str.to_string()))?;
            let value = value_str
                .parse::<f64>()
                .map_err(|_| AghError::ValueParse(value_str.to_string()))?;
            values.push(DailyValue::new(date, measurement.to_imperial(value)));
        }
        log::debug!(
            "series: parsed {} daily values, skipped {} empty",
            values.len(),
            skipped
        );
        Ok(DailySeries::new(values))
    }
}

impl FromIterator<DailyValue> for DailySeries {
    fn from_iter<T: IntoIterator<Item = DailyValue>>(iter: T) -> Self {
        DailySeries::new(iter.into_iter().collect())
    }
}
