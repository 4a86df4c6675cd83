//! Flexible transaction-date parsing
//!
//! Ledger entries carry free-text dates ("Nov 7", "11/07/24",
//! "2024-11-07"). Every date-bucketed computation goes through
//! [`parse_flexible_date`] so the grammar lives in exactly one place.
//!
//! Parsing is pure and total: `today` is passed in by the caller (year
//! inference depends on it) and unparsable input yields `None`, never an
//! error. Callers drop `None` records from day buckets.

use std::sync::OnceLock;

use chrono::{Datelike, NaiveDate};
use regex::Regex;

/// Fixed table for month-abbreviation matching, 1-based month = index + 1
const MONTH_ABBREVS: [&str; 12] = [
    "jan", "feb", "mar", "apr", "may", "jun", "jul", "aug", "sep", "oct", "nov", "dec",
];

fn month_day_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"([A-Za-z]+)\s+(\d{1,2})").unwrap())
}

fn four_digit_year_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\d{4}").unwrap())
}

/// Parse a free-text transaction date into a calendar day.
///
/// Accepted shapes, first match wins:
/// 1. Anything with a 4-digit year that parses directly (ISO dates with
///    or without a time part, "Nov 7, 2024", "11/07/2024").
/// 2. `"<MonthAbbrev> <Day>"` — abbreviation matched case-insensitively on
///    the first three letters; a month after the current one is assumed to
///    belong to the previous year.
/// 3. `"<Month>/<Day>[/<Year>]"` — omitted year inferred as in (2);
///    2-digit years pivot at 70 (`< 70` is 2000s, else 1900s).
///
/// Out-of-range components ("13/45", "Feb 30") yield `None`.
pub fn parse_flexible_date(raw: &str, today: NaiveDate) -> Option<NaiveDate> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    if four_digit_year_re().is_match(raw) {
        if let Some(date) = parse_with_explicit_year(raw) {
            return Some(date);
        }
    }

    if let Some(date) = parse_month_abbrev(raw, today) {
        return Some(date);
    }

    parse_slashed(raw, today)
}

/// Direct-parse attempts for strings carrying a 4-digit year
fn parse_with_explicit_year(raw: &str) -> Option<NaiveDate> {
    if let Ok(dt) = chrono::DateTime::parse_from_rfc3339(raw) {
        return Some(dt.date_naive());
    }

    const DATE_FORMATS: [&str; 5] = ["%Y-%m-%d", "%m/%d/%Y", "%b %d, %Y", "%b %d %Y", "%B %d, %Y"];
    for fmt in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(raw, fmt) {
            return Some(date);
        }
    }

    const DATETIME_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S"];
    for fmt in DATETIME_FORMATS {
        if let Ok(dt) = chrono::NaiveDateTime::parse_from_str(raw, fmt) {
            return Some(dt.date());
        }
    }

    None
}

/// `"Nov 7"` style, year inferred relative to `today`
fn parse_month_abbrev(raw: &str, today: NaiveDate) -> Option<NaiveDate> {
    let caps = month_day_re().captures(raw)?;
    let word = caps.get(1)?.as_str();
    if word.len() < 3 {
        return None;
    }

    let abbrev = word[..3].to_lowercase();
    let month = MONTH_ABBREVS.iter().position(|m| *m == abbrev)? as u32 + 1;
    let day: u32 = caps.get(2)?.as_str().parse().ok()?;

    let mut year = today.year();
    if month > today.month() {
        year -= 1;
    }

    NaiveDate::from_ymd_opt(year, month, day)
}

/// `"11/7"`, `"11/07/24"`, `"11/07/2024"` style
fn parse_slashed(raw: &str, today: NaiveDate) -> Option<NaiveDate> {
    let parts: Vec<&str> = raw.split('/').collect();
    if parts.len() < 2 {
        return None;
    }

    let month: u32 = parts[0].trim().parse().ok()?;
    let day: u32 = parts[1].trim().parse().ok()?;

    let year = if parts.len() >= 3 {
        let mut year: i32 = parts[2].trim().parse().ok()?;
        if year < 100 {
            // Two-digit pivot: 70..99 are 1900s, 00..69 are 2000s
            year += if year >= 70 { 1900 } else { 2000 };
        }
        year
    } else {
        let mut year = today.year();
        if month > today.month() {
            year -= 1;
        }
        year
    };

    NaiveDate::from_ymd_opt(year, month, day)
}

/// `YYYY-MM-DD` key used for day buckets
pub fn date_key(date: NaiveDate) -> String {
    format!("{:04}-{:02}-{:02}", date.year(), date.month(), date.day())
}

/// `YYYY-MM` key used for month buckets
pub fn month_key(date: NaiveDate) -> String {
    format!("{:04}-{:02}", date.year(), date.month())
}

/// Number of days in a calendar month
pub fn days_in_month(year: i32, month: u32) -> Option<u32> {
    let first = NaiveDate::from_ymd_opt(year, month, 1)?;
    let next = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)?
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)?
    };
    Some((next - first).num_days() as u32)
}
