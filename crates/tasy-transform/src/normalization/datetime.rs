//! Result timestamp normalization.
//!
//! Lab exports write timestamps either already in display form
//! (`DD/MM/YYYY HH:MM:SS`) or in one of several machine formats. Dates are
//! read day-first.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

/// Display form of result timestamps in the import table.
pub const DISPLAY_FORMAT: &str = "%d/%m/%Y %H:%M:%S";

const DATETIME_FORMATS: &[&str] = &[
    DISPLAY_FORMAT,
    "%d/%m/%Y %H:%M",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y/%m/%d %H:%M:%S",
    "%Y/%m/%d %H:%M",
    "%d-%m-%Y %H:%M:%S",
    "%d-%m-%Y %H:%M",
    "%d.%m.%Y %H:%M:%S",
    "%d.%m.%Y %H:%M",
];

const DATE_FORMATS: &[&str] = &[
    "%d/%m/%Y",
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%d-%m-%Y",
    "%d.%m.%Y",
    "%Y%m%d",
];

/// Normalizes a result timestamp cell.
///
/// Text containing both `/` and `:` is taken as already formatted and
/// returned unchanged. Anything else is parsed and rendered with
/// [`DISPLAY_FORMAT`]; text that does not parse is kept as written.
/// Missing and whitespace-only cells yield `None`.
pub fn normalize_timestamp(value: Option<&str>) -> Option<String> {
    let raw = value?;
    if raw.trim().is_empty() {
        return None;
    }
    if raw.contains('/') && raw.contains(':') {
        return Some(raw.to_string());
    }
    match parse_timestamp(raw) {
        Some(parsed) => Some(parsed.format(DISPLAY_FORMAT).to_string()),
        None => Some(raw.to_string()),
    }
}

/// Parses a timestamp in any accepted format. Date-only values get
/// midnight.
pub fn parse_timestamp(value: &str) -> Option<NaiveDateTime> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }
    try_parse_datetime(trimmed)
        .or_else(|| try_parse_date(trimmed).map(|date| date.and_time(NaiveTime::MIN)))
}

fn try_parse_datetime(value: &str) -> Option<NaiveDateTime> {
    DATETIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(value, fmt).ok())
}

fn try_parse_date(value: &str) -> Option<NaiveDate> {
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(value, fmt).ok())
}
