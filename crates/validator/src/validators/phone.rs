//! Phone number parsing and validation.
//!
//! Numbers are parsed in international form (`+<calling code><number>`,
//! `00` accepted in place of `+`) and checked against the libphonenumber
//! metadata of the region the calling code and leading digits imply. A
//! valid number normalizes to E.164: `+` followed by the calling code and
//! national significant number, no separators.
//!
//! # Examples
//!
//! ```
//! use deligo_validator::validators::parse_phone;
//!
//! let phone = parse_phone("+351 912 345 678").unwrap();
//! assert_eq!(phone.region(), "PT");
//! assert_eq!(phone.to_e164(), "+351912345678");
//!
//! // trunk prefix is dropped
//! assert_eq!(parse_phone("+44 07911 123456").unwrap().to_e164(), "+447911123456");
//!
//! assert!(parse_phone("+351123").is_err());
//! ```

use std::fmt;

use phonenumber::{Mode, ParseError, PhoneNumber};

use crate::foundation::{Validate, ValidationError};

/// E.164 allows at most 15 digits including the calling code.
const MAX_DIGITS: usize = 15;

/// Shortest calling code plus the shortest national number in any plan.
const MIN_DIGITS: usize = 5;

// ============================================================================
// PARSED PHONE
// ============================================================================

/// A phone number that passed numbering-plan validation.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ParsedPhone {
    calling_code: u16,
    national_number: String,
    region: String,
}

impl ParsedPhone {
    fn from_number(number: &PhoneNumber) -> Self {
        let calling_code = number.code().value();
        let e164 = number.format().mode(Mode::E164).to_string();
        let national_number = e164
            .strip_prefix(&format!("+{calling_code}"))
            .unwrap_or_default()
            .to_string();
        let region = number
            .country()
            .id()
            .map(|id| format!("{id:?}"))
            .unwrap_or_default();

        Self {
            calling_code,
            national_number,
            region,
        }
    }

    /// Country calling code, e.g. `351`.
    #[must_use]
    pub fn calling_code(&self) -> u16 {
        self.calling_code
    }

    /// National significant number, digits only, trunk prefix removed.
    #[must_use]
    pub fn national_number(&self) -> &str {
        &self.national_number
    }

    /// ISO 3166-1 region the number belongs to, e.g. `"PT"`.
    #[must_use]
    pub fn region(&self) -> &str {
        &self.region
    }

    /// Canonical `+<calling code><national number>` form.
    #[must_use]
    pub fn to_e164(&self) -> String {
        format!("+{}{}", self.calling_code, self.national_number)
    }
}

impl fmt::Display for ParsedPhone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "+{}{}", self.calling_code, self.national_number)
    }
}

// ============================================================================
// PARSING
// ============================================================================

/// Visual separators users type between digit groups.
fn is_separator(c: char) -> bool {
    matches!(c, ' ' | '-' | '.' | '(' | ')' | '/' | '\u{a0}')
}

/// Strips separators and the international prefix, returning the digits
/// that follow it.
fn international_digits(input: &str) -> Result<String, ValidationError> {
    let compact: String = input.chars().filter(|c| !is_separator(*c)).collect();

    let digits = if let Some(rest) = compact.strip_prefix('+') {
        rest
    } else if let Some(rest) = compact.strip_prefix("00") {
        rest
    } else {
        return Err(ValidationError::new(
            "phone_missing_country_code",
            "Phone number must include the country code (start with '+')",
        ));
    };

    if !digits.chars().all(|c| c.is_ascii_digit()) {
        return Err(ValidationError::new(
            "phone_invalid_chars",
            "Phone number contains invalid characters",
        ));
    }

    if digits.len() < MIN_DIGITS {
        return Err(ValidationError::new(
            "phone_too_few_digits",
            format!(
                "Phone number must have at least {MIN_DIGITS} digits (found {})",
                digits.len()
            ),
        ));
    }

    if digits.len() > MAX_DIGITS + 1 {
        // one extra digit is tolerated for a trunk prefix that gets stripped
        return Err(ValidationError::new(
            "phone_too_many_digits",
            format!(
                "Phone number must have at most {MAX_DIGITS} digits (found {})",
                digits.len()
            ),
        ));
    }

    Ok(digits.to_string())
}

fn unknown_country_code() -> ValidationError {
    ValidationError::new(
        "phone_unknown_country_code",
        "Phone number has an unknown or unsupported country code",
    )
}

fn invalid_for_region(number: &PhoneNumber) -> ValidationError {
    let region = ParsedPhone::from_number(number).region;
    let calling_code = number.code().value().to_string();
    let message = if region.is_empty() {
        format!("Not a valid phone number for calling code +{calling_code}")
    } else {
        format!("Not a valid phone number for region {region}")
    };

    ValidationError::new("invalid_phone", message)
        .with_param("region", region)
        .with_param("calling_code", calling_code)
}

/// Parses and validates a phone number in international form.
///
/// Returns the parsed number or a validation error whose field path is
/// left empty for the caller to fill in.
pub fn parse_phone(input: &str) -> Result<ParsedPhone, ValidationError> {
    if input.trim().is_empty() {
        return Err(ValidationError::new(
            "empty_phone",
            "Phone number cannot be empty",
        ));
    }

    let digits = international_digits(input)?;

    let number = match phonenumber::parse(None, format!("+{digits}")) {
        Ok(number) => number,
        Err(ParseError::InvalidCountryCode) => return Err(unknown_country_code()),
        Err(_) => {
            return Err(ValidationError::new(
                "invalid_phone",
                "Not a valid phone number",
            ));
        }
    };

    if number.is_valid() {
        return Ok(ParsedPhone::from_number(&number));
    }

    // a trunk prefix typed after the calling code, e.g. +44 07911 123456
    let calling_code = number.code().value().to_string();
    let retry = digits
        .strip_prefix(calling_code.as_str())
        .and_then(|national| national.strip_prefix('0'))
        .and_then(|national| phonenumber::parse(None, format!("+{calling_code}{national}")).ok())
        .filter(PhoneNumber::is_valid);

    retry
        .map(|stripped| ParsedPhone::from_number(&stripped))
        .ok_or_else(|| invalid_for_region(&number))
}

// ============================================================================
// PHONE VALIDATOR
// ============================================================================

/// Validates that a string is a phone number valid for its region.
///
/// See [`parse_phone`] for the accepted input shapes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Phone;

impl Validate for Phone {
    type Input = str;

    fn validate(&self, input: &str) -> Result<(), ValidationError> {
        parse_phone(input).map(|_| ())
    }
}

/// Creates a [`Phone`] validator.
#[must_use]
pub const fn phone() -> Phone {
    Phone
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    mod valid {
        use super::*;

        #[test]
        fn test_portugal() {
            assert_eq!(parse_phone("+351912345678").unwrap().to_e164(), "+351912345678");
            assert_eq!(parse_phone("+351 213 456 789").unwrap().to_e164(), "+351213456789");
            assert_eq!(parse_phone("00351 93 123 4567").unwrap().to_e164(), "+351931234567");
        }

        #[test]
        fn test_trunk_prefix_stripped() {
            let phone = parse_phone("+33 (0)6 12 34 56 78").unwrap();
            assert_eq!(phone.national_number(), "612345678");
            assert_eq!(phone.to_e164(), "+33612345678");
        }

        #[test]
        fn test_italian_leading_zero_kept() {
            let phone = parse_phone("+39 06 1234 5678").unwrap();
            assert_eq!(phone.national_number(), "0612345678");
        }

        #[test]
        fn test_other_regions() {
            for (input, region) in [
                ("+1 (415) 555-2671", "US"),
                ("+44 7911 123456", "GB"),
                ("+49 151 23456789", "DE"),
                ("+55 11 91234-5678", "BR"),
                ("+91 98765 43210", "IN"),
                ("+977 9812345678", "NP"),
                ("+244 923 456 789", "AO"),
                ("+30 691 234 5678", "GR"),
                ("+46 70 123 45 67", "SE"),
                ("+420 601 123 456", "CZ"),
                ("+45 20 12 34 56", "DK"),
                ("+7 912 345 67 89", "RU"),
                ("+90 501 234 56 78", "TR"),
                ("+61 412 345 678", "AU"),
                ("+1 613 555 0123", "CA"),
            ] {
                let phone = parse_phone(input).unwrap_or_else(|e| panic!("{input}: {e}"));
                assert_eq!(phone.region(), region, "{input}");
            }
        }

        #[test]
        fn test_display_matches_e164() {
            let phone = parse_phone("+34 612 345 678").unwrap();
            assert_eq!(phone.to_string(), phone.to_e164());
            assert_eq!(phone.calling_code(), 34);
        }
    }

    mod invalid {
        use super::*;

        fn code(input: &str) -> String {
            parse_phone(input).unwrap_err().code.into_owned()
        }

        #[test]
        fn test_too_short_for_region() {
            assert_eq!(code("+351123"), "invalid_phone");
            assert_eq!(code("+351412345678"), "invalid_phone");

            let error = parse_phone("+351 412 345 678").unwrap_err();
            assert_eq!(error.param("region"), Some("PT"));
            assert_eq!(error.param("calling_code"), Some("351"));
        }

        #[test]
        fn test_shape_errors() {
            assert_eq!(code(""), "empty_phone");
            assert_eq!(code("912345678"), "phone_missing_country_code");
            assert_eq!(code("+351 91x 345 678"), "phone_invalid_chars");
            assert_eq!(code("+351+351912345678"), "phone_invalid_chars");
            assert_eq!(code("+35"), "phone_too_few_digits");
            assert_eq!(code("+3519123456789012345"), "phone_too_many_digits");
        }

        #[test]
        fn test_unknown_calling_code() {
            assert_eq!(code("+999 123 456 789"), "phone_unknown_country_code");
        }

        #[test]
        fn test_validator_wraps_parse() {
            assert!(phone().validate("+351912345678").is_ok());
            assert!(Phone.validate("+351 123").is_err());
        }
    }
}
