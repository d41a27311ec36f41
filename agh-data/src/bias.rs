//! Model bias relative to the reference (ERA) scenario.

use crate::climatology::{climatology, Aggregate, ClimatologyWindow};
use agh_core::{DailySeries, MonthDay, YearSpan};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Period over which model and reference means are compared.
pub const BIAS_BASELINE: YearSpan = YearSpan::new(1980, 2010);

/// Unit factor when the bias and the corrected values share a unit.
pub const SAME_UNIT_FACTOR: f64 = 1.0;

/// Unit factor for a bias computed in Celsius applied to Fahrenheit values.
pub const UNIT_FACTOR_CELSIUS_TO_FAHRENHEIT: f64 = agh_core::units::CELSIUS_TO_FAHRENHEIT_SCALE;

/// Per day-of-year `model_mean - reference_mean` over a baseline period.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct BiasCorrection {
    offsets: BTreeMap<MonthDay, f64>,
}

impl BiasCorrection {
    pub fn get(&self, key: &MonthDay) -> Option<f64> {
        self.offsets.get(key).copied()
    }

    pub fn len(&self) -> usize {
        self.offsets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.offsets.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (MonthDay, f64)> + '_ {
        self.offsets.iter().map(|(k, v)| (*k, *v))
    }

    /// Shift a model climatology toward the reference:
    /// `raw - bias * unit_factor`. Keys without a bias are dropped.
    pub fn apply(&self, window: &ClimatologyWindow, unit_factor: f64) -> ClimatologyWindow {
        window
            .iter()
            .filter_map(|(key, raw)| self.get(&key).map(|bias| (key, raw - bias * unit_factor)))
            .collect()
    }
}

/// Compare the mean climatologies of `model` and `reference` over
/// `baseline`. Only keys present on both sides are kept.
pub fn bias(model: &DailySeries, reference: &DailySeries, baseline: YearSpan) -> BiasCorrection {
    let model_mean = climatology(model, baseline, Aggregate::Mean);
    let reference_mean = climatology(reference, baseline, Aggregate::Mean);
    let offsets: BTreeMap<MonthDay, f64> = model_mean
        .iter()
        .filter_map(|(key, m)| reference_mean.get(&key).map(|r| (key, m - r)))
        .collect();
    log::debug!(
        "bias: {} model keys, {} reference keys, {} joined",
        model_mean.len(),
        reference_mean.len(),
        offsets.len()
    );
    BiasCorrection { offsets }
}

#[cfg(test)]
mod tests {
    use super::*;
    use agh_core::DailyValue;
    use chrono::NaiveDate;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn key(s: &str) -> MonthDay {
        s.parse().unwrap()
    }

    #[test]
    fn test_bias_is_model_minus_reference() {
        let model = DailySeries::new(vec![
            DailyValue::new(d(1990, 1, 1), 12.0),
            DailyValue::new(d(1991, 1, 1), 14.0),
            DailyValue::new(d(1990, 1, 2), 5.0),
        ]);
        let reference = DailySeries::new(vec![
            DailyValue::new(d(1990, 1, 1), 10.0),
            DailyValue::new(d(1991, 1, 1), 10.0),
            DailyValue::new(d(1990, 1, 2), 7.0),
        ]);
        let correction = bias(&model, &reference, BIAS_BASELINE);
        assert_eq!(correction.get(&key("01-01")), Some(3.0));
        assert_eq!(correction.get(&key("01-02")), Some(-2.0));
    }

    #[test]
    fn test_bias_keeps_only_shared_keys() {
        let model = DailySeries::new(vec![
            DailyValue::new(d(1990, 3, 1), 1.0),
            DailyValue::new(d(1992, 2, 29), 1.0),
        ]);
        let reference = DailySeries::new(vec![
            DailyValue::new(d(1990, 3, 1), 0.0),
            DailyValue::new(d(1990, 3, 2), 0.0),
        ]);
        let correction = bias(&model, &reference, BIAS_BASELINE);
        let keys: Vec<MonthDay> = correction.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec![key("03-01")]);
    }

    #[test]
    fn test_bias_ignores_years_outside_baseline() {
        let model = DailySeries::new(vec![
            DailyValue::new(d(2011, 1, 1), 100.0),
            DailyValue::new(d(2000, 1, 1), 1.0),
        ]);
        let reference = DailySeries::new(vec![DailyValue::new(d(2000, 1, 1), 0.0)]);
        let correction = bias(&model, &reference, BIAS_BASELINE);
        assert_eq!(correction.get(&key("01-01")), Some(1.0));
    }

    #[test]
    fn test_apply_with_unit_factor() {
        let model = DailySeries::new(vec![DailyValue::new(d(1990, 6, 1), 2.0)]);
        let reference = DailySeries::new(vec![DailyValue::new(d(1990, 6, 1), 1.0)]);
        let correction = bias(&model, &reference, BIAS_BASELINE);
        let window: ClimatologyWindow = vec![(key("06-01"), 50.0), (key("06-02"), 60.0)]
            .into_iter()
            .collect();
        let same = correction.apply(&window, SAME_UNIT_FACTOR);
        assert_eq!(same.get(&key("06-01")), Some(49.0));
        // key without a bias is dropped
        assert_eq!(same.len(), 1);
        let mixed = correction.apply(&window, UNIT_FACTOR_CELSIUS_TO_FAHRENHEIT);
        assert!((mixed.get(&key("06-01")).unwrap() - 48.2).abs() < 1e-9);
    }

    #[test]
    fn test_empty_inputs() {
        let correction = bias(&DailySeries::default(), &DailySeries::default(), BIAS_BASELINE);
        assert!(correction.is_empty());
    }
}
