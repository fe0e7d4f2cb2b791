//! Deadline normalization.
//!
//! Deadlines arrive from clients in a handful of shapes (full RFC 3339,
//! date-time without offset, bare date). They are stored as a single
//! canonical form: UTC RFC 3339 with millisecond precision, e.g.
//! `2024-05-01T00:00:00.000Z`.

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, SecondsFormat, TimeZone, Utc};
use thiserror::Error;

/// Error returned when a deadline string cannot be parsed.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DeadlineError {
    #[error("unrecognized deadline format: {0}")]
    Unrecognized(String),
}

/// Normalize a client-supplied deadline to the canonical stored form.
///
/// Accepted inputs:
/// - RFC 3339 with any offset (`2024-05-01T10:30:00+05:30`)
/// - Naive date-time, treated as UTC (`2024-05-01T10:30:00`)
/// - Bare date, midnight UTC (`2024-05-01`)
pub fn normalize_deadline(input: &str) -> Result<String, DeadlineError> {
    let input = input.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(input) {
        return Ok(to_canonical(dt.with_timezone(&Utc)));
    }

    if let Ok(naive) = NaiveDateTime::parse_from_str(input, "%Y-%m-%dT%H:%M:%S") {
        return Ok(to_canonical(Utc.from_utc_datetime(&naive)));
    }

    if let Ok(date) = NaiveDate::parse_from_str(input, "%Y-%m-%d") {
        let naive = date.and_time(NaiveTime::MIN);
        return Ok(to_canonical(Utc.from_utc_datetime(&naive)));
    }

    Err(DeadlineError::Unrecognized(input.to_string()))
}

/// Current server time in the canonical stored form. Used for `createdAt`.
pub fn now_timestamp() -> String {
    to_canonical(Utc::now())
}

fn to_canonical(dt: DateTime<Utc>) -> String {
    dt.to_rfc3339_opts(SecondsFormat::Millis, true)
}
