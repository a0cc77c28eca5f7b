//! Calendar date validator.
//!
//! Form date pickers and API clients send dates in a handful of ISO 8601
//! shapes. [`parse_date`] accepts all of them and yields the calendar day.

use chrono::{DateTime, NaiveDate, NaiveDateTime};

use crate::foundation::{Validate, ValidationError};

/// Naive date-time layouts accepted after the plain date and RFC 3339 forms.
const NAIVE_DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

/// Parses a date string into the calendar day it denotes.
///
/// Accepted shapes:
/// - `YYYY-MM-DD`
/// - RFC 3339 timestamps (`2024-05-01T10:00:00Z`, `2024-05-01T10:00:00+01:00`)
/// - naive date-times (`2024-05-01T10:00`, `2024-05-01 10:00:00.250`)
///
/// Surrounding whitespace is ignored. For offset timestamps the local
/// calendar day of the offset is returned, not the UTC day.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use deligo_validator::validators::parse_date;
///
/// let day = NaiveDate::from_ymd_opt(1990, 4, 25);
/// assert_eq!(parse_date("1990-04-25"), day);
/// assert_eq!(parse_date("1990-04-25T23:30:00+01:00"), day);
/// assert_eq!(parse_date("1990-02-30"), None);
/// ```
#[must_use]
pub fn parse_date(input: &str) -> Option<NaiveDate> {
    let input = input.trim();
    if input.is_empty() {
        return None;
    }

    if let Ok(date) = NaiveDate::parse_from_str(input, "%Y-%m-%d") {
        return Some(date);
    }

    if let Ok(timestamp) = DateTime::parse_from_rfc3339(input) {
        return Some(timestamp.date_naive());
    }

    NAIVE_DATETIME_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(input, format).ok())
        .map(|timestamp| timestamp.date())
}

/// Validates that a string parses as a calendar date.
///
/// See [`parse_date`] for the accepted formats.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Date;

impl Validate for Date {
    type Input = str;

    fn validate(&self, input: &str) -> Result<(), ValidationError> {
        if parse_date(input).is_some() {
            Ok(())
        } else {
            Err(
                ValidationError::new("invalid_date", "Must be a valid date (YYYY-MM-DD)")
                    .with_param("expected", "date")
                    .with_param("actual", input.to_string()),
            )
        }
    }
}

/// Creates a [`Date`] validator.
#[must_use]
pub const fn date() -> Date {
    Date
}
