//! Calendar-date helpers for task deadlines.
//!
//! Deadlines are stored as `YYYY-MM-DD`. Inputs that carry a full RFC 3339
//! timestamp are truncated to the calendar date written in the timestamp's
//! own offset. No conversion to the local offset takes place, so parsing never
//! depends on where the process runs.

use serde::{Deserialize, Deserializer, Serializer};
use thiserror::Error;
use time::format_description::well_known::Rfc3339;
use time::macros::format_description;
use time::{Date, OffsetDateTime};

/// Error returned when a due-date string is neither `YYYY-MM-DD` nor RFC 3339.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid due date `{input}`; expected YYYY-MM-DD")]
pub struct ParseDueDateError {
    input: String,
}

/// Parse a user- or seed-supplied due date.
///
/// `2024-01-15T23:30:00-08:00` is due on 2024-01-15 in every local zone.
///
/// # Errors
/// Returns an error when the input is not a calendar date or RFC 3339 timestamp.
pub fn parse(input: &str) -> Result<Date, ParseDueDateError> {
    let trimmed = input.trim();
    let calendar = format_description!("[year]-[month]-[day]");
    Date::parse(trimmed, &calendar)
        .or_else(|_| OffsetDateTime::parse(trimmed, &Rfc3339).map(OffsetDateTime::date))
        .map_err(|_| ParseDueDateError {
            input: input.to_owned(),
        })
}

/// Parse an optional due date, treating blank input as "no deadline".
///
/// # Errors
/// Returns an error when non-blank input fails to parse.
pub fn parse_optional(input: &str) -> Result<Option<Date>, ParseDueDateError> {
    if input.trim().is_empty() {
        return Ok(None);
    }
    parse(input).map(Some)
}

/// Canonical `YYYY-MM-DD` form.
#[must_use]
pub fn format_iso(date: Date) -> String {
    let calendar = format_description!("[year]-[month]-[day]");
    date.format(&calendar)
        .unwrap_or_else(|_| date.to_string())
}

/// Display form used for due labels (`Jan 05, 2024`).
#[must_use]
pub fn display(date: Date) -> String {
    let label = format_description!("[month repr:short] [day], [year]");
    date.format(&label).unwrap_or_else(|_| format_iso(date))
}

pub(crate) fn serialize<S>(value: &Option<Date>, s: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    match value {
        Some(date) => s.serialize_str(&format_iso(*date)),
        None => s.serialize_none(),
    }
}

pub(crate) fn deserialize<'de, D>(d: D) -> Result<Option<Date>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(d)?;
    match raw {
        Some(text) => parse_optional(&text).map_err(serde::de::Error::custom),
        None => Ok(None),
    }
}
