//! Shared utility functions for AGH crates.

/// Date utility functions
pub mod dates {
    use chrono::NaiveDate;

    /// Date format used by the community temperature CSVs: "YYYY-MM-DD"
    pub const SERIES_DATE_FORMAT: &str = "%Y-%m-%d";

    /// Format a NaiveDate as "YYYY-MM-DD"
    pub fn format_date(date: &NaiveDate) -> String {
        date.format(SERIES_DATE_FORMAT).to_string()
    }

    /// Parse a date string in "YYYY-MM-DD" format.
    ///
    /// Some exports carry a time component ("1980-01-01 00:00:00"); only the
    /// leading date is read.
    pub fn parse_date(s: &str) -> anyhow::Result<NaiveDate> {
        let date_part = s.split_whitespace().next().unwrap_or("");
        let date_part = date_part.split('T').next().unwrap_or("");
        Ok(NaiveDate::parse_from_str(date_part, SERIES_DATE_FORMAT)?)
    }

    /// Label for an inclusive year window, e.g. 1980..=1989 -> "1980-1989".
    pub fn year_window_label(start_year: i32, end_year: i32) -> String {
        format!("{}-{}", start_year, end_year)
    }

    /// Start years of every full `len`-year window inside `start..=end`.
    ///
    /// A trailing partial window is not returned: 2010..=2099 with len 30
    /// gives 2010, 2040, 2070.
    pub fn window_starts(start: i32, end: i32, len: i32) -> Vec<i32> {
        if len <= 0 {
            return Vec::new();
        }
        let mut starts = Vec::new();
        let mut year = start;
        while year + len - 1 <= end {
            starts.push(year);
            year += len;
        }
        starts
    }

}
