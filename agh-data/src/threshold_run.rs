//! Longest run of days above a threshold, per year and per decade.

use agh_core::{DailySeries, DailyValue, MonthDay, Scenario, YearSpan};
use chrono::{Datelike, NaiveDate, TimeDelta};
use serde::{Deserialize, Serialize};

/// Years per bin.
pub const DECADE_LENGTH: i32 = 10;

/// Position, after sorting a decade's runs by length ascending, of the run
/// that represents the bin: the second shortest.
pub const REPRESENTATIVE_RANK: usize = 1;

/// The longest run of consecutive days above a threshold within a year.
///
/// `end` is exclusive: `start + n_days`, one day past the last qualifying
/// day. A run that lasts through Dec 31 therefore ends on Jan 1 of the
/// following year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThresholdRun {
    pub year: i32,
    pub n_days: u32,
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
}

impl ThresholdRun {
    /// A year in which no day exceeded the threshold.
    pub fn empty(year: i32) -> Self {
        ThresholdRun {
            year,
            n_days: 0,
            start: None,
            end: None,
        }
    }

    pub fn start_key(&self) -> Option<MonthDay> {
        self.start.map(MonthDay::from)
    }

    /// Day-of-year key of the exclusive end date.
    pub fn end_key(&self) -> Option<MonthDay> {
        self.end.map(MonthDay::from)
    }

    /// End key for display on a single-year axis: an end that wrapped past
    /// Dec 31 is shown as "12-31".
    pub fn display_end(&self) -> Option<MonthDay> {
        if self.end?.year() > self.year {
            Some(MonthDay::YEAR_END)
        } else {
            self.end_key()
        }
    }
}

/// Find the longest run of consecutive days with `value > threshold`.
///
/// A day equal to the threshold, or a missing calendar day between two
/// records, ends a run. Ties go to the earliest run. The run's year is the
/// year of the first record.
pub fn longest_run(values: &[DailyValue], threshold: f64) -> ThresholdRun {
    let year = values.first().map(DailyValue::year).unwrap_or_default();
    let mut best = ThresholdRun::empty(year);
    let mut run_start: Option<NaiveDate> = None;
    let mut run_len: u32 = 0;
    let mut previous: Option<NaiveDate> = None;

    for daily in values {
        let contiguous = previous.and_then(|p| p.succ_opt()) == Some(daily.date);
        if daily.value > threshold {
            if run_len == 0 || !contiguous {
                close_run(&mut best, run_start, run_len);
                run_start = Some(daily.date);
                run_len = 0;
            }
            run_len += 1;
        } else {
            close_run(&mut best, run_start, run_len);
            run_start = None;
            run_len = 0;
        }
        previous = Some(daily.date);
    }
    close_run(&mut best, run_start, run_len);
    best
}

fn close_run(best: &mut ThresholdRun, start: Option<NaiveDate>, len: u32) {
    let Some(start) = start else {
        return;
    };
    if len > best.n_days {
        best.n_days = len;
        best.start = Some(start);
        best.end = start.checked_add_signed(TimeDelta::days(i64::from(len)));
    }
}

/// Longest run for one calendar year of `series`.
pub fn year_longest_run(series: &DailySeries, year: i32, threshold: f64) -> ThresholdRun {
    ThresholdRun {
        year,
        ..longest_run(series.year(year), threshold)
    }
}

/// Ten years of runs summarized by a representative year.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecadeBin {
    pub scenario: Scenario,
    pub span: YearSpan,
    /// One run per year, in year order
    pub runs: Vec<ThresholdRun>,
    pub representative: ThresholdRun,
}

/// Compute the run for each year of the decade starting at `decade_start`
/// and pick the second shortest as the representative. Equal lengths keep
/// year order.
pub fn decade_representative(
    series: &DailySeries,
    scenario: Scenario,
    threshold: f64,
    decade_start: i32,
) -> DecadeBin {
    let span = YearSpan::starting_at(decade_start, DECADE_LENGTH);
    let runs: Vec<ThresholdRun> = span
        .years()
        .map(|year| year_longest_run(series, year, threshold))
        .collect();
    let mut ranked = runs.clone();
    ranked.sort_by_key(|run| run.n_days);
    let representative = ranked
        .get(REPRESENTATIVE_RANK)
        .copied()
        .unwrap_or_else(|| ThresholdRun::empty(decade_start));
    log::debug!(
        "{} {}: representative year {} with {} days > {}",
        scenario,
        span,
        representative.year,
        representative.n_days,
        threshold
    );
    DecadeBin {
        scenario,
        span,
        runs,
        representative,
    }
}

/// One bin per full decade of `span`.
pub fn decade_bins(
    series: &DailySeries,
    scenario: Scenario,
    threshold: f64,
    span: YearSpan,
) -> Vec<DecadeBin> {
    span.windows(DECADE_LENGTH)
        .into_iter()
        .map(|decade| decade_representative(series, scenario, threshold, decade.start))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn test_longest_run_concrete() {
        let series = DailySeries::from_consecutive(d(2000, 1, 1), &[30.0, 30.0, 35.0, 35.0, 35.0, 30.0]);
        let run = longest_run(series.values(), 32.0);
        assert_eq!(run.n_days, 3);
        assert_eq!(run.start, Some(d(2000, 1, 3)));
        // exclusive end: day 3 + 3 days
        assert_eq!(run.end, Some(d(2000, 1, 6)));
        assert_eq!(run.year, 2000);
    }

    #[test]
    fn test_equal_to_threshold_breaks_run() {
        let series = DailySeries::from_consecutive(d(2000, 5, 1), &[33.0, 32.0, 33.0, 33.0]);
        let run = longest_run(series.values(), 32.0);
        assert_eq!(run.n_days, 2);
        assert_eq!(run.start, Some(d(2000, 5, 3)));
    }

    #[test]
    fn test_no_day_above_threshold() {
        let series = DailySeries::from_consecutive(d(2000, 1, 1), &[10.0, 20.0, 32.0]);
        let run = longest_run(series.values(), 32.0);
        assert_eq!(run, ThresholdRun::empty(2000));
        assert!(run.start_key().is_none() && run.display_end().is_none());
        assert_eq!(longest_run(&[], 32.0).n_days, 0);
    }

    #[test]
    fn test_tie_goes_to_earliest_run() {
        let series = DailySeries::from_consecutive(d(2000, 1, 1), &[40.0, 40.0, 0.0, 40.0, 40.0]);
        let run = longest_run(series.values(), 32.0);
        assert_eq!(run.n_days, 2);
        assert_eq!(run.start, Some(d(2000, 1, 1)));
    }

    #[test]
    fn test_calendar_gap_breaks_run() {
        let series = DailySeries::new(vec![
            DailyValue::new(d(2000, 6, 1), 50.0),
            DailyValue::new(d(2000, 6, 2), 50.0),
            DailyValue::new(d(2000, 6, 4), 50.0),
        ]);
        let run = longest_run(series.values(), 32.0);
        assert_eq!(run.n_days, 2);
        assert_eq!(run.end, Some(d(2000, 6, 3)));
    }

    #[test]
    fn test_run_through_year_end() {
        let series = DailySeries::from_consecutive(d(2001, 12, 29), &[10.0, 40.0, 40.0]);
        let run = longest_run(series.values(), 32.0);
        assert_eq!(run.end, Some(d(2002, 1, 1)));
        assert_eq!(run.end_key().unwrap().to_string(), "01-01");
        assert_eq!(run.display_end(), Some(MonthDay::YEAR_END));
        assert_eq!(run.start_key().unwrap().to_string(), "12-30");
    }

    /// Ten years where year `1980 + i` has a run of `lengths[i]` days from June 1.
    fn decade_series(lengths: [usize; 10]) -> DailySeries {
        let mut values = Vec::new();
        for (i, len) in lengths.iter().enumerate() {
            let year = 1980 + i as i32;
            for (offset, day) in d(year, 6, 1).iter_days().take(40).enumerate() {
                let value = if offset < *len { 50.0 } else { 20.0 };
                values.push(DailyValue::new(day, value));
            }
        }
        DailySeries::new(values)
    }

    #[test]
    fn test_decade_representative_second_smallest() {
        let bin = decade_representative(
            &decade_series([30, 12, 25, 5, 18, 22, 35, 9, 14, 28]),
            Scenario::Era,
            32.0,
            1980,
        );
        assert_eq!(bin.runs.len(), 10);
        assert_eq!(bin.span, YearSpan::new(1980, 1989));
        // sorted lengths: 5, 9, 12, ... -> 9 days, year 1987
        assert_eq!(bin.representative.n_days, 9);
        assert_eq!(bin.representative.year, 1987);
        assert!(bin.runs.contains(&bin.representative));
    }

    #[test]
    fn test_decade_representative_ties_keep_year_order() {
        let bin = decade_representative(
            &decade_series([20, 7, 20, 7, 20, 7, 20, 20, 20, 20]),
            Scenario::Gfdl,
            32.0,
            1980,
        );
        assert_eq!(bin.representative.n_days, 7);
        // 1981, 1983, 1985 all have 7 days; rank 1 is the second of them
        assert_eq!(bin.representative.year, 1983);
    }

    #[test]
    fn test_decade_with_missing_years() {
        let series = DailySeries::from_consecutive(d(1985, 6, 1), &[50.0; 20]);
        let bin = decade_representative(&series, Scenario::Era, 32.0, 1980);
        // nine empty years: the representative is an empty one
        assert_eq!(bin.representative, ThresholdRun::empty(1981));
    }

    #[test]
    fn test_decade_bins_cover_full_decades() {
        let series = decade_series([10; 10]);
        let bins = decade_bins(&series, Scenario::Era, 32.0, YearSpan::new(1980, 2009));
        assert_eq!(bins.len(), 3);
        assert_eq!(bins[0].representative.n_days, 10);
        assert_eq!(bins[1].representative.n_days, 0);
        let model = decade_bins(&series, Scenario::Ncar, 32.0, YearSpan::new(2010, 2099));
        assert_eq!(model.len(), 9);
        assert_eq!(model[8].span, YearSpan::new(2090, 2099));
    }
}
