//! Show time utilities
//!
//! Start times are naive wall-clock timestamps: they are stored, compared and
//! rendered without any timezone conversion. `now` is read once at the HTTP
//! boundary and handed down explicitly.

use chrono::{Local, NaiveDateTime};

/// Storage and detail-page format (`2019-05-21 21:30:00`)
pub const SHOW_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Formats accepted from the show form, tried in order
const INPUT_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M",
];

/// Human-readable display styles used by the HTML pages
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayFormat {
    /// `Tue 05, 21, 2019 9:30PM`
    Medium,
    /// `Tuesday May, 21, 2019 at 9:30PM`
    Full,
}

/// Current local wall-clock time, without zone
pub fn now_local() -> NaiveDateTime {
    Local::now().naive_local()
}

/// Render a start time as `YYYY-MM-DD HH:MM:SS`
pub fn format_show_time(start_time: &NaiveDateTime) -> String {
    start_time.format(SHOW_TIME_FORMAT).to_string()
}

/// Parse a start time submitted by a form or read back from storage
///
/// Returns `None` when the input matches none of the accepted layouts.
pub fn parse_show_time(input: &str) -> Option<NaiveDateTime> {
    let input = input.trim();
    INPUT_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(input, format).ok())
}

/// Render a start time for display
pub fn format_display(start_time: &NaiveDateTime, format: DisplayFormat) -> String {
    let pattern = match format {
        DisplayFormat::Medium => "%a %m, %d, %Y %-I:%M%p",
        DisplayFormat::Full => "%A %B, %-d, %Y at %-I:%M%p",
    };
    start_time.format(pattern).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(y: i32, m: u32, d: u32, h: u32, min: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, min, s)
            .unwrap()
    }

    #[test]
    fn test_format_show_time() {
        assert_eq!(
            format_show_time(&at(2019, 5, 21, 21, 30, 0)),
            "2019-05-21 21:30:00"
        );
    }

    #[test]
    fn test_format_show_time_pads_fields() {
        assert_eq!(format_show_time(&at(2035, 4, 1, 8, 5, 9)), "2035-04-01 08:05:09");
    }

    #[test]
    fn test_parse_accepts_storage_format() {
        assert_eq!(
            parse_show_time("2023-06-01 12:00:00"),
            Some(at(2023, 6, 1, 12, 0, 0))
        );
    }

    #[test]
    fn test_parse_accepts_datetime_local() {
        assert_eq!(
            parse_show_time("2035-04-08T20:00"),
            Some(at(2035, 4, 8, 20, 0, 0))
        );
        assert_eq!(
            parse_show_time(" 2035-04-08T20:00:15 "),
            Some(at(2035, 4, 8, 20, 0, 15))
        );
    }

    #[test]
    fn test_parse_accepts_minutes_only() {
        assert_eq!(
            parse_show_time("2035-04-08 20:00"),
            Some(at(2035, 4, 8, 20, 0, 0))
        );
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert_eq!(parse_show_time(""), None);
        assert_eq!(parse_show_time("next friday"), None);
        assert_eq!(parse_show_time("2023-13-01 10:00:00"), None);
    }

    #[test]
    fn test_display_formats() {
        let t = at(2019, 5, 21, 21, 30, 0);
        assert_eq!(format_display(&t, DisplayFormat::Medium), "Tue 05, 21, 2019 9:30PM");
        assert_eq!(
            format_display(&t, DisplayFormat::Full),
            "Tuesday May, 21, 2019 at 9:30PM"
        );
    }

    #[test]
    fn test_round_trip_through_storage_format() {
        let t = at(2023, 7, 1, 20, 0, 0);
        assert_eq!(parse_show_time(&format_show_time(&t)), Some(t));
    }
}
