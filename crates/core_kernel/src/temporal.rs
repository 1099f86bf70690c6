//! Date/time helpers
//!
//! History timestamps render in São Paulo local time with the fixed
//! `HH:MM - DD/MM/YYYY` layout; age math backs the product term limits.

use chrono::{DateTime, Datelike, Months, NaiveDate, Utc};
use chrono_tz::America::Sao_Paulo;
use thiserror::Error;

/// Errors related to temporal operations
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TemporalError {
    #[error("Invalid date: {0}")]
    InvalidDate(String),
}

/// Formats a history timestamp the way the audit trail displays it,
/// e.g. `14:32 - 05/08/2026`.
pub fn format_history_timestamp(at: DateTime<Utc>) -> String {
    at.with_timezone(&Sao_Paulo)
        .format("%H:%M - %d/%m/%Y")
        .to_string()
}

/// Parses a birth date from the wire.
///
/// The upstream sends either a plain date (`1990-01-15`) or a full
/// RFC 3339 timestamp; both resolve to the calendar date.
pub fn parse_birth_date(value: &str) -> Result<NaiveDate, TemporalError> {
    if let Ok(date) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        return Ok(date);
    }
    value
        .parse::<DateTime<Utc>>()
        .map(|dt| dt.date_naive())
        .or_else(|_| {
            chrono::NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S")
                .map(|dt| dt.date())
        })
        .map_err(|_| TemporalError::InvalidDate(value.to_string()))
}

/// Completed years of age on the given date
pub fn age_on(birth: NaiveDate, on: NaiveDate) -> i32 {
    let mut age = on.year() - birth.year();
    if (on.month(), on.day()) < (birth.month(), birth.day()) {
        age -= 1;
    }
    age
}

/// Age the proponent will have reached when a term of `months` ends,
/// counting from `from`
pub fn age_at_term_end(birth: NaiveDate, from: NaiveDate, months: u32) -> i32 {
    let term_end = from
        .checked_add_months(Months::new(months))
        .unwrap_or(NaiveDate::MAX);
    age_on(birth, term_end)
}
