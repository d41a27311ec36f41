use chrono::NaiveDate;
use std::mem::replace;

/// A date range iterator that yields each date from the start date
/// through the end date (inclusive).
#[derive(Clone, Eq, PartialEq, Copy, Debug)]
pub struct DateRange(pub NaiveDate, pub NaiveDate);

impl DateRange {
    /// Every day of a calendar year, Jan 1 through Dec 31.
    pub fn calendar_year(year: i32) -> Option<DateRange> {
        let start = NaiveDate::from_ymd_opt(year, 1, 1)?;
        let end = NaiveDate::from_ymd_opt(year, 12, 31)?;
        Some(DateRange(start, end))
    }

    /// Number of days the range still yields.
    pub fn num_days(&self) -> i64 {
        ((self.1 - self.0).num_days() + 1).max(0)
    }
}

impl Iterator for DateRange {
    type Item = NaiveDate;
    fn next(&mut self) -> Option<Self::Item> {
        if self.0 > self.1 {
            return None;
        }
        match self.0.succ_opt() {
            Some(next) => Some(replace(&mut self.0, next)),
            None => {
                // NaiveDate::MAX: yield it once, then stop
                let last = self.0;
                self.1 = NaiveDate::MIN;
                Some(last)
            }
        }
    }
}
