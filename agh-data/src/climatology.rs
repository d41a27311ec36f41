//! Per-day-of-year climatologies over a multi-year window.

use agh_core::{DailySeries, MonthDay, YearSpan};
use serde::{Deserialize, Serialize};
use std::collections::btree_map;
use std::collections::BTreeMap;

/// How the values sharing a day-of-year key are combined.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Aggregate {
    Min,
    Mean,
}

/// Aggregated value per day-of-year key, in calendar order. Sparse: keys
/// with no data in any year of the window are absent.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ClimatologyWindow {
    values: BTreeMap<MonthDay, f64>,
}

impl ClimatologyWindow {
    pub fn new(values: BTreeMap<MonthDay, f64>) -> Self {
        ClimatologyWindow { values }
    }

    pub fn get(&self, key: &MonthDay) -> Option<f64> {
        self.values.get(key).copied()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Entries in calendar order.
    pub fn iter(&self) -> impl Iterator<Item = (MonthDay, f64)> + '_ {
        self.values.iter().map(|(k, v)| (*k, *v))
    }

    pub fn keys(&self) -> impl Iterator<Item = &MonthDay> {
        self.values.keys()
    }
}

impl FromIterator<(MonthDay, f64)> for ClimatologyWindow {
    fn from_iter<T: IntoIterator<Item = (MonthDay, f64)>>(iter: T) -> Self {
        ClimatologyWindow {
            values: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for ClimatologyWindow {
    type Item = (MonthDay, f64);
    type IntoIter = btree_map::IntoIter<MonthDay, f64>;

    fn into_iter(self) -> Self::IntoIter {
        self.values.into_iter()
    }
}

/// Group the records of `series` inside `span` by day-of-year and reduce
/// each group with `aggregate`.
///
/// Only the years that actually have a value for a key contribute to it,
/// so "02-29" is averaged over leap years alone.
pub fn climatology(series: &DailySeries, span: YearSpan, aggregate: Aggregate) -> ClimatologyWindow {
    let mut groups: BTreeMap<MonthDay, (f64, u32)> = BTreeMap::new();
    for daily in series.within(span) {
        let key = MonthDay::from(daily.date);
        groups
            .entry(key)
            .and_modify(|(acc, count)| {
                *acc = match aggregate {
                    Aggregate::Min => acc.min(daily.value),
                    Aggregate::Mean => *acc + daily.value,
                };
                *count += 1;
            })
            .or_insert((daily.value, 1));
    }
    groups
        .into_iter()
        .map(|(key, (acc, count))| {
            let value = match aggregate {
                Aggregate::Min => acc,
                Aggregate::Mean => acc / count as f64,
            };
            (key, value)
        })
        .collect()
}
