use chrono::{DateTime, Days, Local, Months, NaiveDate, TimeZone};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unrecognised transaction date: {0}")]
pub struct DateError(pub String);

/// Date shown in the date picker: `MM.DD.YYYY`.
pub fn format_date(date: NaiveDate) -> String {
    date.format("%m.%d.%Y").to_string()
}

/// Date sent in an update: `DD.MM.YYYY`.
pub fn format_payload_date(date: NaiveDate) -> String {
    date.format("%d.%m.%Y").to_string()
}

/// Reads the date of a stored transaction.
///
/// Accepts RFC3339 timestamps, read as the local calendar date, plus
/// `YYYY-MM-DD` and `DD.MM.YYYY`.
pub fn parse_transaction_date(raw: &str) -> Result<NaiveDate, DateError> {
    parse_transaction_date_in(raw, &Local)
}

/// [`parse_transaction_date`] with timestamps converted into `tz`.
pub fn parse_transaction_date_in<Tz: TimeZone>(
    raw: &str,
    tz: &Tz,
) -> Result<NaiveDate, DateError> {
    let trimmed = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(dt.with_timezone(tz).date_naive());
    }
    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        return Ok(date);
    }
    NaiveDate::parse_from_str(trimmed, "%d.%m.%Y").map_err(|_| DateError(raw.to_string()))
}

/// Steps a date by whole days. Out-of-range steps leave it unchanged.
pub fn shift_days(date: NaiveDate, days: i64) -> NaiveDate {
    let shifted = if days >= 0 {
        date.checked_add_days(Days::new(days.unsigned_abs()))
    } else {
        date.checked_sub_days(Days::new(days.unsigned_abs()))
    };
    shifted.unwrap_or(date)
}

/// Steps a date by whole months, clamping the day to the target month.
pub fn shift_months(date: NaiveDate, months: i32) -> NaiveDate {
    let shifted = if months >= 0 {
        date.checked_add_months(Months::new(months.unsigned_abs()))
    } else {
        date.checked_sub_months(Months::new(months.unsigned_abs()))
    };
    shifted.unwrap_or(date)
}
