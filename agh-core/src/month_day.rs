use crate::date_range::DateRange;
use crate::error::AghError;
use chrono::{Datelike, NaiveDate};
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// A leap year used to validate and enumerate day-of-year keys, so that
/// "02-29" is a key of its own.
const LEAP_REFERENCE_YEAR: i32 = 2000;

/// Day-of-year key used to group multi-year daily data, ignoring the year.
///
/// Ordering is calendar order (Jan 1 first, Dec 31 last). Displays and
/// parses as "MM-DD".
#[derive(Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Copy, Clone)]
pub struct MonthDay {
    pub month: u32,
    pub day: u32,
}

impl MonthDay {
    /// The last key of the calendar, used to terminate cumulative traces.
    pub const YEAR_END: MonthDay = MonthDay { month: 12, day: 31 };

    /// Create a key from a month and day, `None` if no year has that day.
    pub fn from_md_opt(month: u32, day: u32) -> Option<MonthDay> {
        NaiveDate::from_ymd_opt(LEAP_REFERENCE_YEAR, month, day).map(|_| MonthDay { month, day })
    }

    /// The date this key falls on in `year` (`None` for "02-29" in common years).
    pub fn in_year(&self, year: i32) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(year, self.month, self.day)
    }

    /// All 366 keys in calendar order, "01-01" through "12-31".
    pub fn calendar() -> impl Iterator<Item = MonthDay> {
        DateRange(
            NaiveDate::from_ymd_opt(LEAP_REFERENCE_YEAR, 1, 1).unwrap_or(NaiveDate::MIN),
            NaiveDate::from_ymd_opt(LEAP_REFERENCE_YEAR, 12, 31).unwrap_or(NaiveDate::MIN),
        )
        .map(MonthDay::from)
    }
}

impl From<NaiveDate> for MonthDay {
    fn from(value: NaiveDate) -> Self {
        MonthDay {
            month: value.month(),
            day: value.day(),
        }
    }
}

impl From<&NaiveDate> for MonthDay {
    fn from(value: &NaiveDate) -> Self {
        (*value).into()
    }
}

impl fmt::Display for MonthDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}-{:02}", self.month, self.day)
    }
}

impl FromStr for MonthDay {
    type Err = AghError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || AghError::InvalidMonthDay(s.to_string());
        let (month, day) = s.trim().split_once('-').ok_or_else(invalid)?;
        let month = month.parse::<u32>().map_err(|_| invalid())?;
        let day = day.parse::<u32>().map_err(|_| invalid())?;
        MonthDay::from_md_opt(month, day).ok_or_else(invalid)
    }
}

impl Serialize for MonthDay {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for MonthDay {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::MonthDay;
    use chrono::NaiveDate;

    #[test]
    fn test_display_and_parse() {
        let key: MonthDay = "03-15".parse().unwrap();
        assert_eq!(key, MonthDay { month: 3, day: 15 });
        assert_eq!(key.to_string(), "03-15");
        assert!("02-30".parse::<MonthDay>().is_err());
        assert!("13-01".parse::<MonthDay>().is_err());
        assert!("0315".parse::<MonthDay>().is_err());
    }

    #[test]
    fn test_leap_day_is_its_own_key() {
        let leap = MonthDay::from_md_opt(2, 29).unwrap();
        assert!(leap.in_year(2023).is_none());
        assert_eq!(leap.in_year(2024), NaiveDate::from_ymd_opt(2024, 2, 29));
        let feb28: MonthDay = NaiveDate::from_ymd_opt(2023, 2, 28).unwrap().into();
        assert!(feb28 < leap);
    }

    #[test]
    fn test_calendar_order() {
        let keys: Vec<MonthDay> = MonthDay::calendar().collect();
        assert_eq!(keys.len(), 366);
        assert_eq!(keys[0].to_string(), "01-01");
        assert_eq!(keys[59].to_string(), "02-29");
        assert_eq!(*keys.last().unwrap(), MonthDay::YEAR_END);
        assert!(keys.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_serde_as_string() {
        let key = MonthDay::from_md_opt(7, 4).unwrap();
        let json = serde_json::to_string(&key).unwrap();
        assert_eq!(json, "\"07-04\"");
        let back: MonthDay = serde_json::from_str(&json).unwrap();
        assert_eq!(back, key);
    }
}
