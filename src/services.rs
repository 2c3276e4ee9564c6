use jiff::{Timestamp, civil::Date, tz::TimeZone};
use thiserror::Error;

pub mod dashboard;
pub mod projects;
pub mod tasks;
pub mod users;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("Project '{0}' not found")]
    ProjectNotFound(String),

    #[error("Task '{0}' not found")]
    TaskNotFound(String),

    #[error("User '{0}' not found")]
    UserNotFound(String),

    #[error("Username '{0}' is already taken")]
    UsernameTaken(String),

    #[error("Invalid due date '{0}': {1}")]
    InvalidDate(String, String),
}

/// Parses a due date given either as a civil date (`2024-12-15`, midnight
/// UTC) or as a full RFC 3339 timestamp.
pub fn parse_due_date(input: &str) -> Result<Timestamp, ServiceError> {
    let input = input.trim();

    if let Ok(timestamp) = input.parse::<Timestamp>() {
        return Ok(timestamp);
    }

    input
        .parse::<Date>()
        .and_then(|date| date.to_zoned(TimeZone::UTC))
        .map(|zoned| zoned.timestamp())
        .map_err(|e| ServiceError::InvalidDate(input.to_string(), e.to_string()))
}

/// Parses an optional due date, keeping the "leave untouched" / "clear"
/// distinction of patch fields.
pub(crate) fn parse_nullable_due_date(
    input: Option<Option<String>>,
) -> Result<Option<Option<Timestamp>>, ServiceError> {
    match input {
        None => Ok(None),
        Some(None) => Ok(Some(None)),
        Some(Some(text)) => parse_due_date(&text).map(|ts| Some(Some(ts))),
    }
}
