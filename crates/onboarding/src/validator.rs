//! The onboarding rule set as a validator.

use deligo_validator::foundation::{Validate, ValidationError, ValidationErrors};
use deligo_validator::json;
use serde_json::Value;
use tracing::debug;

use crate::record::OnboardingRecord;
use crate::rules::{self, RuleMode};
use crate::schema::Candidate;

/// Validates delivery-partner onboarding submissions.
///
/// Runs the static per-field pass, then the cross-field rules, and on
/// success returns the normalized [`OnboardingRecord`]. Never panics on
/// malformed input: every problem is a [`ValidationError`].
///
/// # Examples
///
/// ```
/// use deligo_onboarding::{OnboardingValidator, RuleMode};
/// use serde_json::json;
///
/// let validator = OnboardingValidator::new(RuleMode::ReportAll);
/// let errors = validator.validate(&json!({ "firstName": "A" })).unwrap_err();
///
/// assert_eq!(errors.errors()[0].field_path(), "firstName");
/// assert_eq!(errors.errors()[0].code, "min_length");
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OnboardingValidator {
    mode: RuleMode,
}

impl OnboardingValidator {
    #[must_use]
    pub const fn new(mode: RuleMode) -> Self {
        Self { mode }
    }

    #[must_use]
    pub const fn mode(&self) -> RuleMode {
        self.mode
    }

    /// Validates one submission and returns the normalized record.
    ///
    /// Errors are ordered: static field errors in schema order, then
    /// cross-field rule errors in rule order.
    pub fn validate(&self, input: &Value) -> Result<OnboardingRecord, ValidationErrors> {
        let record = json::as_record(input).inspect_err(|error| {
            debug!(mode = %self.mode, code = %error.code, "submission is not an object");
        })?;

        let (candidate, mut errors) = Candidate::read(record);
        let static_errors = errors.len();
        let phone = rules::apply(&candidate, self.mode, &mut errors);

        debug!(
            mode = %self.mode,
            static_errors,
            rule_errors = errors.len() - static_errors,
            "onboarding submission validated"
        );

        if errors.has_errors() {
            return Err(errors);
        }

        phone
            .and_then(|phone| candidate.into_record(phone.to_e164()))
            .ok_or(errors)
    }
}

impl Validate for OnboardingValidator {
    type Input = Value;

    /// Collapses every failure into one `invalid_submission` error with the
    /// field errors nested.
    fn validate(&self, input: &Value) -> Result<(), ValidationError> {
        Self::validate(self, input).map(|_| ()).map_err(|errors| {
            errors.into_iter().fold(
                ValidationError::new(
                    "invalid_submission",
                    "Onboarding submission failed validation",
                ),
                ValidationError::with_nested_error,
            )
        })
    }
}

/// Validates a submission with the default [`RuleMode`].
///
/// # Examples
///
/// ```
/// use deligo_onboarding::validate_submission;
/// use serde_json::json;
///
/// let errors = validate_submission(&json!("not an object")).unwrap_err();
/// assert_eq!(errors.len(), 1);
/// assert_eq!(errors.errors()[0].code, "type_mismatch");
/// ```
pub fn validate_submission(input: &Value) -> Result<OnboardingRecord, ValidationErrors> {
    OnboardingValidator::default().validate(input)
}
