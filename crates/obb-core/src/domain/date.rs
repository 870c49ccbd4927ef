use time::format_description::well_known::Rfc3339;
use time::macros::format_description;
use time::{Date, OffsetDateTime};

use crate::ValidationError;

time::serde::format_description!(pub(crate) iso_date, Date, "[year]-[month]-[day]");

/// Parse a strict `YYYY-MM-DD` calendar date.
///
/// Surrounding whitespace is rejected; callers reading free-form input trim
/// it themselves.
pub fn parse_iso_date(input: &str) -> Result<Date, ValidationError> {
    Date::parse(input, format_description!("[year]-[month]-[day]")).map_err(|_| {
        ValidationError::InvalidDate {
            value: input.to_owned(),
        }
    })
}

/// Format a calendar date as `YYYY-MM-DD`.
pub fn format_iso_date(date: Date) -> String {
    date.format(format_description!("[year]-[month]-[day]"))
        .unwrap_or_else(|_| date.to_string())
}

/// Parse a provider-supplied date cell.
///
/// Accepts a bare `YYYY-MM-DD` date or an RFC3339 timestamp. Timestamps keep
/// the calendar date of their own offset, so an exchange-local midnight never
/// shifts to the previous day.
pub fn parse_date_text(input: &str) -> Result<Date, ValidationError> {
    let text = input.trim();
    if let Ok(date) = parse_iso_date(text) {
        return Ok(date);
    }

    OffsetDateTime::parse(text, &Rfc3339)
        .map(OffsetDateTime::date)
        .map_err(|_| ValidationError::InvalidDate {
            value: input.to_owned(),
        })
}

/// UTC calendar date of a Unix timestamp in seconds.
pub fn date_from_unix_seconds(seconds: i64) -> Result<Date, ValidationError> {
    OffsetDateTime::from_unix_timestamp(seconds)
        .map(OffsetDateTime::date)
        .map_err(|_| ValidationError::InvalidDate {
            value: seconds.to_string(),
        })
}
