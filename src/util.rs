// Utility helpers for parsing and console formatting.
//
// This module centralizes the "dirty" CSV value handling so the rest of the
// code can assume clean, typed values.
use chrono::{NaiveDate, NaiveDateTime};
use num_format::{Locale, ToFormattedString};

/// Placeholder strings that stand in for missing data in the raw export.
/// pandas round-trips produce literal "nan"/"NaT" cells.
const PLACEHOLDERS: [&str; 3] = ["-", "nan", "nat"];

/// True when a raw cell should be treated as absent.
pub fn is_placeholder(s: &str) -> bool {
    let t = s.trim();
    t.is_empty() || PLACEHOLDERS.contains(&t.to_lowercase().as_str())
}

/// Normalize an optional raw cell: placeholders collapse to `None`,
/// everything else is trimmed.
pub fn clean_cell(s: Option<&str>) -> Option<String> {
    let s = s?;
    if is_placeholder(s) {
        None
    } else {
        Some(s.trim().to_string())
    }
}

/// Date formats seen in SP4N-LAPOR exports, tried in order. Datetime
/// variants first so a bare-date format never truncates a timestamp.
const DATETIME_FORMATS: [&str; 2] = ["%Y-%m-%d %H:%M:%S", "%d/%m/%Y %H:%M"];
const DATE_FORMATS: [&str; 2] = ["%Y-%m-%d", "%d/%m/%Y"];

/// Parse a raw timestamp cell, forgiving about format. Returns `None` for
/// anything unparseable; the record is kept but excluded from time logic.
pub fn parse_datetime_safe(s: Option<&str>) -> Option<NaiveDateTime> {
    let s = s?.trim();
    if s.is_empty() {
        return None;
    }
    for fmt in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(dt);
        }
    }
    for fmt in DATE_FORMATS {
        if let Ok(d) = NaiveDate::parse_from_str(s, fmt) {
            return d.and_hms_opt(0, 0, 0);
        }
    }
    None
}

/// Title-case in the pandas `str.title()` sense: first letter of every
/// whitespace-separated word upper, the rest lower.
pub fn title_case(s: &str) -> String {
    s.split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => {
                    first.to_uppercase().collect::<String>() + &chars.as_str().to_lowercase()
                }
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Thin wrapper around `num-format` for integer-like values, used for counts
/// in console messages (e.g., `9,855 rows loaded`).
pub fn format_int<T>(n: T) -> String
where
    T: ToFormattedString,
{
    n.to_formatted_string(&Locale::en)
}
