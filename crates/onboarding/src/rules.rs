//! Cross-field rules.
//!
//! Each rule is an independent function over the [`Candidate`] produced by
//! the static pass. Rules run in a fixed order and every violation is
//! reported.

use std::fmt;
use std::str::FromStr;

use deligo_validator::foundation::{Validate, ValidationError, ValidationErrors};
use deligo_validator::validators::{ParsedPhone, date, parse_phone};
use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::schema::Candidate;

// ============================================================================
// RULE MODE
// ============================================================================

/// How cross-field rules treat fields that failed their static checks.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RuleMode {
    /// A rule never reads a field whose own checks failed, so a bad field is
    /// reported once.
    #[default]
    Staged,
    /// Every rule reads whatever value is there (unreadable values count as
    /// empty). A bad field can be reported by its static check and again by
    /// a rule.
    ReportAll,
}

impl RuleMode {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Staged => "staged",
            Self::ReportAll => "report-all",
        }
    }
}

impl fmt::Display for RuleMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown [`RuleMode`] name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown rule mode `{0}`, expected `staged` or `report-all`")]
pub struct ParseRuleModeError(String);

impl FromStr for RuleMode {
    type Err = ParseRuleModeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "staged" => Ok(Self::Staged),
            "report-all" => Ok(Self::ReportAll),
            other => Err(ParseRuleModeError(other.to_owned())),
        }
    }
}

// ============================================================================
// RULES
// ============================================================================

const PHONE_NUMBER: &str = "phoneNumber";
const VEHICLE_TYPE: &str = "vehicleType";
const OTHER_PLATFORM_NAME: &str = "otherPlatformName";
const ISSUE_DATE: &str = "issueDate";

/// Runs every cross-field rule, appending violations to `errors`.
///
/// Returns the parsed phone number when the phone rule ran and passed.
pub(crate) fn apply(
    candidate: &Candidate<'_>,
    mode: RuleMode,
    errors: &mut ValidationErrors,
) -> Option<ParsedPhone> {
    let phone = match phone_validity(candidate, mode) {
        Some(Ok(phone)) => Some(phone),
        Some(Err(error)) => {
            report(errors, "phone_validity", error);
            None
        }
        None => None,
    };

    let rules: [(&str, fn(&Candidate<'_>, RuleMode) -> Option<ValidationError>); 4] = [
        ("vehicle_credentials", vehicle_credentials),
        ("other_platform", other_platform),
        ("criminal_record_issue_date", criminal_record_issue_date),
        ("issue_date_format", issue_date_format),
    ];
    for (rule, check) in rules {
        if let Some(error) = check(candidate, mode) {
            report(errors, rule, error);
        }
    }

    phone
}

fn report(errors: &mut ValidationErrors, rule: &'static str, error: ValidationError) {
    trace!(rule, field = error.field_path(), code = %error.code, "cross-field rule failed");
    errors.add(error);
}

/// Prefix and national number together must form a valid phone number.
fn phone_validity(
    c: &Candidate<'_>,
    mode: RuleMode,
) -> Option<Result<ParsedPhone, ValidationError>> {
    let prefix = c.phone_prefix.rule_input(mode)?.copied().unwrap_or_default();
    let number = c.phone_number.rule_input(mode)?.copied().unwrap_or_default();

    let parsed = parse_phone(&format!("{prefix}{number}"));
    Some(parsed.map_err(|error| error.with_field(PHONE_NUMBER)))
}

/// Motorised vehicles need every licence and insurance field.
fn vehicle_credentials(c: &Candidate<'_>, mode: RuleMode) -> Option<ValidationError> {
    let vehicle = c.vehicle_type.rule_input(mode)?.copied()?;
    if !vehicle.requires_credentials() {
        return None;
    }

    let missing: Vec<&str> = [
        ("licensePlate", c.license_plate.is_blank(mode)),
        ("drivingLicenseNumber", c.driving_license_number.is_blank(mode)),
        ("drivingLicenseExpiry", c.driving_license_expiry.is_blank(mode)),
        ("insurancePolicyNumber", c.insurance_policy_number.is_blank(mode)),
        ("insuranceExpiry", c.insurance_expiry.is_blank(mode)),
    ]
    .into_iter()
    .filter_map(|(field, blank)| blank.then_some(field))
    .collect();

    if missing.is_empty() {
        return None;
    }

    Some(
        ValidationError::new(
            "vehicle_credentials_required",
            format!(
                "Driving licence and insurance details are required for {vehicle} (missing: {})",
                missing.join(", ")
            ),
        )
        .with_field(VEHICLE_TYPE)
        .with_param("vehicleType", vehicle.as_str())
        .with_param("missing", missing.join(",")),
    )
}

/// Partners who worked with another platform must name it.
fn other_platform(c: &Candidate<'_>, mode: RuleMode) -> Option<ValidationError> {
    let worked = c.worked_with_other_platform.rule_input(mode)?.copied()?;

    (worked && c.other_platform_name.is_blank(mode)).then(|| {
        ValidationError::new(
            "other_platform_required",
            "Name the platform you worked with",
        )
        .with_field(OTHER_PLATFORM_NAME)
    })
}

/// A criminal record certificate needs its issue date.
fn criminal_record_issue_date(c: &Candidate<'_>, mode: RuleMode) -> Option<ValidationError> {
    let has_certificate = c.have_criminal_record_certificate.rule_input(mode)?.copied()?;

    (has_certificate && c.issue_date.is_blank(mode)).then(|| {
        ValidationError::new(
            "issue_date_required",
            "Issue date is required when you hold a criminal record certificate",
        )
        .with_field(ISSUE_DATE)
    })
}

/// An issue date, when given, must be a date.
fn issue_date_format(c: &Candidate<'_>, mode: RuleMode) -> Option<ValidationError> {
    let issue_date = c.issue_date.rule_input(mode)?.copied().flatten()?;

    date()
        .validate(issue_date)
        .err()
        .map(|error| error.with_field(ISSUE_DATE))
}
