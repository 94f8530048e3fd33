pub mod agenda;
pub mod config;
pub mod event;
pub mod export;

use chrono::NaiveDate;
use pawcal_core::ValidationError;

/// Parse a user-entered civil date, enforcing YYYY-MM-DD before any engine
/// call sees the value.
pub fn parse_date(input: &str) -> Result<NaiveDate, ValidationError> {
    NaiveDate::parse_from_str(input, "%Y-%m-%d")
        .map_err(|_| ValidationError::InvalidDate(input.to_string()))
}
