//! Date-range grammar for the date search box.
//!
//! Accepted forms, tried in order, first match wins:
//!
//!   2017-06-04      one day starting at that date
//!   2017-06         one month (31 days) starting at that month
//!   2017            the entire year (365 days)
//!   12-24           one day, most recent Dec 24 not in the future
//!   jun 4           one day, most recent June 4 not in the future
//!   2017 jun 4      one day at that date (year may come first or last)
//!   jun             one month, most recent June not in the future
//!   3 days ago      one day centered on three days ago
//!   2 weeks ago     one week centered on two weeks ago
//!   2 months ago    one month centered on two months ago
//!
//! Month names accept full or three-letter forms in any case. The
//! relative forms deliberately center the bucket on "N units ago"
//! rather than anchoring it to a boundary; that behavior is kept as
//! shipped. An expression `a..b` combines the start of `a` with the end
//! of `b`; an empty side defaults to the epoch or to now.

use chrono::{DateTime, Datelike, TimeZone, Utc};

const DAY_MS: i64 = 24 * 60 * 60 * 1000;
const MONTH_MS: i64 = 31 * DAY_MS;
const YEAR_MS: i64 = 365 * DAY_MS;

/// Parse a full date-filter expression into an inclusive `[start, end]`
/// range in epoch milliseconds. Returns `None` when any part fails to
/// parse, in which case the caller keeps its previous filter.
pub fn parse_range_expr(input: &str, now: DateTime<Utc>) -> Option<(i64, i64)> {
    match input.split_once("..") {
        None => parse_single(input.trim(), now),
        Some((lhs, rhs)) => {
            let mut start_ms = 0;
            let mut end_ms = now.timestamp_millis();
            let lhs = lhs.trim();
            let rhs = rhs.trim();
            if !lhs.is_empty() {
                start_ms = parse_single(lhs, now)?.0;
            }
            if !rhs.is_empty() {
                end_ms = parse_single(rhs, now)?.1;
            }
            Some((start_ms, end_ms))
        }
    }
}

fn parse_single(s: &str, now: DateTime<Utc>) -> Option<(i64, i64)> {
    if s.is_empty() {
        return None;
    }
    parse_absolute_ymd(s)
        .or_else(|| parse_month_day(s, now))
        .or_else(|| parse_named_month(s, now))
        .or_else(|| parse_relative_ago(s, now))
}

/// `yyyy[-m[-d]]`.
fn parse_absolute_ymd(s: &str) -> Option<(i64, i64)> {
    let parts: Vec<&str> = s.split('-').collect();
    if parts.len() > 3 {
        return None;
    }
    let year = year_number(parts[0])?;
    let month = match parts.get(1) {
        Some(p) => Some(small_number(p, 12)?),
        None => None,
    };
    let day = match parts.get(2) {
        Some(p) => Some(small_number(p, 31)?),
        None => None,
    };

    let (start, delta) = match (month, day) {
        (None, _) => (start_of_day(year, 1, 1)?, YEAR_MS),
        (Some(m), None) => (start_of_day(year, m, 1)?, MONTH_MS),
        (Some(m), Some(d)) => (start_of_day(year, m, d)?, DAY_MS),
    };
    Some((start, start + delta))
}

/// `m-d`: the most recent occurrence not in the future.
fn parse_month_day(s: &str, now: DateTime<Utc>) -> Option<(i64, i64)> {
    let (m_str, d_str) = s.split_once('-')?;
    let month = small_number(m_str, 12)?;
    let day = small_number(d_str, 31)?;
    let start = most_recent(now, month, day)?;
    Some((start, start + DAY_MS))
}

/// `[yyyy] monthname [d] [yyyy]`.
fn parse_named_month(s: &str, now: DateTime<Utc>) -> Option<(i64, i64)> {
    let tokens: Vec<&str> = s.split_whitespace().collect();
    if tokens.is_empty() || tokens.len() > 3 {
        return None;
    }

    let mut month = None;
    let mut day = None;
    let mut year = None;
    for token in tokens {
        if token.chars().all(|c| c.is_ascii_alphabetic()) {
            if month.is_some() {
                return None;
            }
            month = Some(month_from_name(token)?);
        } else if let Some(y) = year_number(token) {
            if year.is_some() {
                return None;
            }
            year = Some(y);
        } else if let Some(d) = small_number(token, 31) {
            if day.is_some() {
                return None;
            }
            day = Some(d);
        } else {
            return None;
        }
    }
    let month = month?;
    let delta = if day.is_some() { DAY_MS } else { MONTH_MS };

    let start = match year {
        Some(y) => start_of_day(y, month, day.unwrap_or(1))?,
        None => most_recent(now, month, day.unwrap_or(1))?,
    };
    Some((start, start + delta))
}

/// `N days|weeks|months ago`. The bucket is centered on "N units ago":
/// `start = now - (N * unit + delta / 2)`.
fn parse_relative_ago(s: &str, now: DateTime<Utc>) -> Option<(i64, i64)> {
    let tokens: Vec<&str> = s.split_whitespace().collect();
    if tokens.len() != 3 || !tokens[2].eq_ignore_ascii_case("ago") {
        return None;
    }
    let n: i64 = tokens[0].parse().ok()?;
    if n < 1 {
        return None;
    }
    let delta = match tokens[1].to_ascii_lowercase().as_str() {
        "day" | "days" => DAY_MS,
        "week" | "weeks" => 7 * DAY_MS,
        "month" | "months" => MONTH_MS,
        _ => return None,
    };
    let start = now.timestamp_millis() - (n * delta + delta / 2);
    Some((start, start + delta))
}

/// Midnight UTC at the most recent `month`/`day` that does not start in
/// the future: this year if that has happened already, else last year.
fn most_recent(now: DateTime<Utc>, month: u32, day: u32) -> Option<i64> {
    let candidate = start_of_day(now.year(), month, day)?;
    if candidate > now.timestamp_millis() {
        start_of_day(now.year() - 1, month, day)
    } else {
        Some(candidate)
    }
}

fn start_of_day(year: i32, month: u32, day: u32) -> Option<i64> {
    Utc.with_ymd_and_hms(year, month, day, 0, 0, 0)
        .single()
        .map(|dt| dt.timestamp_millis())
}

/// A 1-2 digit number in `1..=max`.
fn small_number(token: &str, max: u32) -> Option<u32> {
    if token.is_empty() || token.len() > 2 || !token.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    let n: u32 = token.parse().ok()?;
    (1..=max).contains(&n).then_some(n)
}

/// A 4-digit year.
fn year_number(token: &str) -> Option<i32> {
    if token.len() != 4 || !token.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    token.parse().ok()
}

fn month_from_name(name: &str) -> Option<u32> {
    const MONTHS: [&str; 12] = [
        "january",
        "february",
        "march",
        "april",
        "may",
        "june",
        "july",
        "august",
        "september",
        "october",
        "november",
        "december",
    ];
    let lower = name.to_ascii_lowercase();
    MONTHS
        .iter()
        .position(|full| **full == lower || (lower.len() == 3 && full.starts_with(lower.as_str())))
        .map(|i| i as u32 + 1)
}
