//! Provider date-time handling.
//!
//! The provider sends departure and arrival as one combined string in
//! exactly `DD.MM.YYYY HH:MM` form, e.g. `"02.09.2025 06:03"`. The clock
//! time lives at byte offsets `[11, 16)` and the calendar date at `[0, 10)`.

use chrono::{NaiveDate, NaiveDateTime};

/// chrono format of the provider's combined date-time strings.
pub const PROVIDER_DATETIME_FORMAT: &str = "%d.%m.%Y %H:%M";

/// Format of the travel date in search requests.
pub const REQUEST_DATE_FORMAT: &str = "%Y-%m-%d";

/// Length of a well-formed combined date-time string.
const PROVIDER_DATETIME_LEN: usize = 16;

/// Error returned when a provider date-time string is malformed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid provider date-time {value:?}: {reason}")]
pub struct TimeError {
    value: String,
    reason: &'static str,
}

impl TimeError {
    fn new(value: &str, reason: &'static str) -> Self {
        Self {
            value: value.to_string(),
            reason,
        }
    }
}

/// Parse a combined provider date-time string.
///
/// Only the exact `DD.MM.YYYY HH:MM` shape is accepted; anything else is
/// an error rather than a best-effort guess.
pub fn parse_provider_datetime(raw: &str) -> Result<NaiveDateTime, TimeError> {
    if raw.len() != PROVIDER_DATETIME_LEN {
        return Err(TimeError::new(raw, "expected DD.MM.YYYY HH:MM"));
    }
    NaiveDateTime::parse_from_str(raw, PROVIDER_DATETIME_FORMAT)
        .map_err(|_| TimeError::new(raw, "not a valid calendar date and time"))
}

/// Parse a user-supplied `YYYY-MM-DD` date.
pub fn parse_request_date(raw: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(raw, REQUEST_DATE_FORMAT).ok()
}

/// Format a travel date for the provider's search request.
pub fn format_request_date(date: NaiveDate) -> String {
    date.format(REQUEST_DATE_FORMAT).to_string()
}
