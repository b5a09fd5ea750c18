use chrono::{Datelike, NaiveDate, NaiveDateTime};

// ── Cost ──────────────────────────────────────────────────────────────────────

/// Factor converting the dataset's fractional-million cost into currency units.
pub const COST_SCALE: f64 = 1_000_000.0;

/// Parse a free-text cost field into absolute currency units.
///
/// Thousands separators and surrounding whitespace are stripped. Empty,
/// unparsable, negative or non-finite values become `0.0`.
pub fn normalize_cost(raw: &str) -> f64 {
    let cleaned: String = raw.chars().filter(|c| *c != ',').collect();
    let cleaned = cleaned.trim();
    if cleaned.is_empty() {
        return 0.0;
    }
    match cleaned.parse::<f64>() {
        Ok(v) if v.is_finite() && v > 0.0 => v * COST_SCALE,
        _ => 0.0,
    }
}

// ── Launch dates ──────────────────────────────────────────────────────────────

const DATETIME_FORMATS: &[&str] = &[
    "%b %d, %Y %H:%M",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M",
];

const DATE_FORMATS: &[&str] = &["%b %d, %Y", "%Y-%m-%d"];

/// Parse a `Datum` value such as `"Fri Aug 07, 2020 05:12 UTC"`.
///
/// The leading weekday name and a trailing `UTC` marker are ignored; the
/// weekday is always derived from the date. Date-only values resolve to
/// midnight. Returns `None` for anything else.
pub fn parse_launch_date(raw: &str) -> Option<NaiveDateTime> {
    let s = raw.trim();
    let s = s.strip_suffix("UTC").map(str::trim_end).unwrap_or(s);
    let s = strip_weekday_name(s);
    if s.is_empty() {
        return None;
    }

    for fmt in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(dt);
        }
    }
    for fmt in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(s, fmt) {
            return date.and_hms_opt(0, 0, 0);
        }
    }
    None
}

/// Drop a leading `"Sat "` style token when a month name follows it.
fn strip_weekday_name(s: &str) -> &str {
    match s.split_once(' ') {
        Some((head, rest))
            if !head.is_empty()
                && head.chars().all(|c| c.is_ascii_alphabetic())
                && rest.starts_with(|c: char| c.is_ascii_alphabetic()) =>
        {
            rest.trim_start()
        }
        _ => s,
    }
}

/// Calendar fields derived from a launch timestamp.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CalendarParts {
    pub year: i32,
    /// 1–12.
    pub month: u32,
    /// Monday = 0.
    pub weekday: u32,
}

impl CalendarParts {
    pub fn of(dt: &NaiveDateTime) -> Self {
        Self {
            year: dt.year(),
            month: dt.month(),
            weekday: dt.weekday().num_days_from_monday(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cost_scaling_is_exact() {
        assert_eq!(normalize_cost("1.2"), 1_200_000.0);
        assert_eq!(normalize_cost("1.5"), 1_500_000.0);
        assert_eq!(normalize_cost("2"), 2_000_000.0);
    }

    #[test]
    fn test_cost_thousands_separator() {
        assert_eq!(normalize_cost("5,000.0"), 5_000_000_000.0);
        assert_eq!(normalize_cost(" 1,160.0 "), 1_160_000_000.0);
    }

    #[test]
    fn test_cost_empty_or_malformed_is_zero() {
        assert_eq!(normalize_cost(""), 0.0);
        assert_eq!(normalize_cost("   "), 0.0);
        assert_eq!(normalize_cost("n/a"), 0.0);
        assert_eq!(normalize_cost("NaN"), 0.0);
        assert_eq!(normalize_cost("inf"), 0.0);
    }

    #[test]
    fn test_cost_never_negative() {
        assert_eq!(normalize_cost("-3.5"), 0.0);
    }

    #[test]
    fn test_weekday_name_is_not_checked_against_date() {
        // 12 April 1981 was a Sunday.
        let dt = parse_launch_date("Sat Apr 12, 1981 12:00 UTC").unwrap();
        let parts = CalendarParts::of(&dt);
        assert_eq!((parts.year, parts.month, parts.weekday), (1981, 4, 6));
        assert_eq!(
            parse_launch_date("Sun Apr 12, 1981 12:00 UTC"),
            Some(dt)
        );
        assert_eq!(
            parse_launch_date("Sat Apr 12, 1981").map(|d| d.date()),
            Some(dt.date())
        );
    }

    #[test]
    fn test_parse_dataset_format_with_time() {
        let dt = parse_launch_date("Fri Oct 04, 1957 19:28 UTC").unwrap();
        let parts = CalendarParts::of(&dt);
        assert_eq!(parts.year, 1957);
        assert_eq!(parts.month, 10);
        assert_eq!(parts.weekday, 4);
        assert_eq!(dt.format("%H:%M").to_string(), "19:28");
    }

    #[test]
    fn test_parse_dataset_format_without_time() {
        let dt = parse_launch_date("Mon Jul 06, 1992").unwrap();
        assert_eq!(dt.format("%Y-%m-%d %H:%M").to_string(), "1992-07-06 00:00");
    }

    #[test]
    fn test_parse_iso_date() {
        let dt = parse_launch_date("2001-05-01").unwrap();
        let parts = CalendarParts::of(&dt);
        assert_eq!((parts.year, parts.month, parts.weekday), (2001, 5, 1));
    }

    #[test]
    fn test_parse_iso_datetime() {
        assert!(parse_launch_date("2020-08-07 05:12:00").is_some());
        assert!(parse_launch_date("2020-08-07T05:12:00").is_some());
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(parse_launch_date("").is_none());
        assert!(parse_launch_date("UTC").is_none());
        assert!(parse_launch_date("sometime in 1960").is_none());
    }
}
