use chrono::{DateTime, Datelike, NaiveDate, TimeDelta};

use crate::error::LeaveError;

/// Parse a leave date relative to `today`.
///
/// Accepts `today`/`tod`, `tomorrow`/`tom`, `yesterday`, relative offsets
/// (`+3d`, `-1w`), ISO dates, US `M/D/YYYY` dates and RFC 3339 timestamps.
pub fn parse_leave_date(input: &str, today: NaiveDate) -> Result<NaiveDate, LeaveError> {
    let input = input.trim();

    // 1. Reserved keywords
    match input.to_lowercase().as_str() {
        "today" | "tod" => return Ok(today),
        "tomorrow" | "tom" => {
            return today.succ_opt().ok_or_else(|| LeaveError::InvalidDate(input.to_string()))
        }
        "yesterday" => {
            return today.pred_opt().ok_or_else(|| LeaveError::InvalidDate(input.to_string()))
        }
        _ => {}
    }

    // 2. Relative format (+Nd, -Nw)
    if input.starts_with('+') || input.starts_with('-') {
        return parse_relative(input, today);
    }

    // 3. Absolute formats
    parse_date(input)
}

/// Parse an absolute date as stored in the record file.
pub fn parse_date(input: &str) -> Result<NaiveDate, LeaveError> {
    let input = input.trim();
    if let Ok(d) = NaiveDate::parse_from_str(input, "%Y-%m-%d") {
        return Ok(d);
    }
    if let Ok(d) = NaiveDate::parse_from_str(input, "%m/%d/%Y") {
        return Ok(d);
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(input) {
        return Ok(dt.naive_utc().date());
    }
    Err(LeaveError::InvalidDate(input.to_string()))
}

fn parse_relative(input: &str, today: NaiveDate) -> Result<NaiveDate, LeaveError> {
    let invalid = || LeaveError::InvalidDate(input.to_string());
    if input.len() < 3 || !input.is_ascii() {
        return Err(invalid());
    }

    let (sign, rest) = input.split_at(1);
    let (num_str, unit) = rest.split_at(rest.len() - 1);
    let count: i64 = num_str.parse().map_err(|_| invalid())?;
    let count = if sign == "-" { -count } else { count };

    let offset = match unit.to_lowercase().as_str() {
        "d" => TimeDelta::try_days(count),
        "w" => TimeDelta::try_weeks(count),
        _ => return Err(invalid()),
    };
    offset
        .and_then(|o| today.checked_add_signed(o))
        .ok_or_else(invalid)
}

/// Parse a `YYYY-MM` month into `(year, month)`.
pub fn parse_month(input: &str) -> Result<(i32, u32), LeaveError> {
    let input = input.trim();
    NaiveDate::parse_from_str(&format!("{}-01", input), "%Y-%m-%d")
        .map(|d| (d.year(), d.month()))
        .map_err(|_| LeaveError::InvalidDate(input.to_string()))
}

/// Every calendar day from `from` to `to`, inclusive.
pub fn date_range(from: NaiveDate, to: NaiveDate) -> Result<Vec<NaiveDate>, LeaveError> {
    if to < from {
        return Err(LeaveError::InvalidRange { from, to });
    }
    Ok(from.iter_days().take_while(|d| *d <= to).collect())
}

/// First and last day of the month containing `date`.
pub fn month_bounds(date: NaiveDate) -> (NaiveDate, NaiveDate) {
    let first = date.with_day(1).unwrap_or(date);
    let next_month = if first.month() == 12 {
        NaiveDate::from_ymd_opt(first.year() + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(first.year(), first.month() + 1, 1)
    };
    let last = next_month
        .and_then(|d| d.pred_opt())
        .unwrap_or(first);
    (first, last)
}

/// "January 2024"
pub fn month_label(year: i32, month: u32) -> String {
    match NaiveDate::from_ymd_opt(year, month, 1) {
        Some(d) => d.format("%B %Y").to_string(),
        None => format!("{:04}-{:02}", year, month),
    }
}

/// "Jan 2024"
pub fn short_month_label(year: i32, month: u32) -> String {
    match NaiveDate::from_ymd_opt(year, month, 1) {
        Some(d) => d.format("%b %Y").to_string(),
        None => format!("{:04}-{:02}", year, month),
    }
}

/// Serde adapter for `leaveDate`: written as `YYYY-MM-DD`, read from any
/// format `parse_date` accepts.
pub mod leave_date_format {
    use chrono::NaiveDate;
    use serde::{self, Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(date: &NaiveDate, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&date.format("%Y-%m-%d").to_string())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveDate, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        super::parse_date(&raw).map_err(serde::de::Error::custom)
    }
}
