//! Error types for validation failures
//!
//! A [`ValidationError`] carries a machine-readable code, a human-readable
//! message, the field path it refers to and optional parameters. Rule sets
//! that check many fields at once collect them into [`ValidationErrors`].
//!
//! All string fields use `Cow<'static, str>` so that static codes and
//! messages never allocate.

use std::borrow::Cow;
use std::fmt;

use serde_json::{Map, Value, json};

// ============================================================================
// VALIDATION ERROR
// ============================================================================

/// A structured validation error.
///
/// # Examples
///
/// ```
/// use deligo_validator::foundation::ValidationError;
///
/// let error = ValidationError::new("min_length", "Must be at least 2 characters")
///     .with_field("firstName")
///     .with_param("min", "2");
///
/// assert_eq!(error.field_path(), "firstName");
/// assert_eq!(error.param("min"), Some("2"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// Stable machine-readable code: `required`, `min_length`, `invalid_phone`, ...
    pub code: Cow<'static, str>,

    /// English message shown to the applicant.
    pub message: Cow<'static, str>,

    /// Field path the error refers to, e.g. "phoneNumber" or "preferredZones[2]".
    pub field: Option<Cow<'static, str>>,

    /// Ordered key-value details, e.g. `min` and `actual` for a length bound.
    pub params: Vec<(Cow<'static, str>, Cow<'static, str>)>,

    /// Nested errors, e.g. the field errors under a whole-submission failure.
    pub nested: Vec<ValidationError>,
}

impl ValidationError {
    pub fn new(code: impl Into<Cow<'static, str>>, message: impl Into<Cow<'static, str>>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            field: None,
            params: Vec::new(),
            nested: Vec::new(),
        }
    }

    #[must_use = "builder methods must be chained or built"]
    pub fn with_field(mut self, field: impl Into<Cow<'static, str>>) -> Self {
        self.field = Some(field.into());
        self
    }

    /// Sets the field path only if none has been set yet.
    ///
    /// Leaf validators do not know which field they are checking; the
    /// caller attaches the path afterwards without clobbering a more
    /// specific one (such as an array element path).
    #[must_use = "builder methods must be chained or built"]
    pub fn or_field(mut self, field: impl Into<Cow<'static, str>>) -> Self {
        if self.field.as_deref().is_none_or(str::is_empty) {
            self.field = Some(field.into());
        }
        self
    }

    #[must_use = "builder methods must be chained or built"]
    pub fn with_param(
        mut self,
        key: impl Into<Cow<'static, str>>,
        value: impl Into<Cow<'static, str>>,
    ) -> Self {
        self.params.push((key.into(), value.into()));
        self
    }

    #[must_use = "builder methods must be chained or built"]
    pub fn with_nested_error(mut self, error: ValidationError) -> Self {
        self.nested.push(error);
        self
    }

    #[must_use]
    pub fn param(&self, key: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|(k, _)| k.as_ref() == key)
            .map(|(_, v)| v.as_ref())
    }

    /// The field path, `""` for errors about the submission as a whole.
    #[must_use]
    pub fn field_path(&self) -> &str {
        self.field.as_deref().unwrap_or("")
    }

    /// `{field, code, message}` plus `params` and `nested` when present.
    #[must_use]
    pub fn to_json_value(&self) -> Value {
        let params: Map<String, Value> = self
            .params
            .iter()
            .map(|(k, v)| (k.to_string(), Value::String(v.to_string())))
            .collect();

        let mut value = json!({
            "field": self.field_path(),
            "code": self.code,
            "message": self.message,
        });
        if !params.is_empty() {
            value["params"] = Value::Object(params);
        }
        if !self.nested.is_empty() {
            value["nested"] = self.nested.iter().map(Self::to_json_value).collect();
        }
        value
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.field.as_deref() {
            Some(field) if !field.is_empty() => {
                write!(f, "[{}] {}: {}", field, self.code, self.message)
            }
            _ => write!(f, "{}: {}", self.code, self.message),
        }
    }
}

impl std::error::Error for ValidationError {}

// ============================================================================
// CONVENIENCE CONSTRUCTORS
// ============================================================================

impl ValidationError {
    /// A required field that is missing, `null` or empty.
    pub fn required(field: impl Into<Cow<'static, str>>) -> Self {
        Self::new("required", "This field is required").with_field(field)
    }

    pub fn min_length(field: impl Into<Cow<'static, str>>, min: usize, actual: usize) -> Self {
        Self::new("min_length", format!("Must be at least {min} characters"))
            .with_field(field)
            .with_param("min", min.to_string())
            .with_param("actual", actual.to_string())
    }

    pub fn max_length(field: impl Into<Cow<'static, str>>, max: usize, actual: usize) -> Self {
        Self::new("max_length", format!("Must be at most {max} characters"))
            .with_field(field)
            .with_param("max", max.to_string())
            .with_param("actual", actual.to_string())
    }

    /// A value outside a closed set, such as an unknown vehicle type.
    pub fn one_of(
        field: impl Into<Cow<'static, str>>,
        allowed: &[&str],
        actual: impl Into<Cow<'static, str>>,
    ) -> Self {
        Self::new("one_of", format!("Must be one of: {}", allowed.join(", ")))
            .with_field(field)
            .with_param("allowed", allowed.join(","))
            .with_param("actual", actual)
    }

    /// A JSON value of the wrong type, e.g. a number where a string belongs.
    pub fn type_mismatch(
        field: impl Into<Cow<'static, str>>,
        expected: impl Into<Cow<'static, str>>,
        actual: impl Into<Cow<'static, str>>,
    ) -> Self {
        let expected = expected.into();
        Self::new("type_mismatch", format!("Expected {expected}"))
            .with_field(field)
            .with_param("expected", expected)
            .with_param("actual", actual)
    }
}

// ============================================================================
// ERROR COLLECTION
// ============================================================================

/// An ordered collection of validation errors.
///
/// Insertion order is preserved, so a rule set that checks fields in a
/// fixed order always reports them in that order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors {
    errors: Vec<ValidationError>,
}

impl ValidationErrors {
    #[must_use]
    pub fn new() -> Self {
        Self { errors: Vec::new() }
    }

    pub fn add(&mut self, error: ValidationError) {
        self.errors.push(error);
    }

    #[must_use]
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.errors.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    #[must_use]
    pub fn errors(&self) -> &[ValidationError] {
        &self.errors
    }

    /// Iterates over the errors in insertion order.
    pub fn iter(&self) -> std::slice::Iter<'_, ValidationError> {
        self.errors.iter()
    }

    /// Errors whose path is exactly `field`.
    pub fn for_field<'a>(&'a self, field: &'a str) -> impl Iterator<Item = &'a ValidationError> {
        self.errors.iter().filter(move |e| e.field_path() == field)
    }

    #[must_use]
    pub fn has_field(&self, field: &str) -> bool {
        self.for_field(field).next().is_some()
    }

    /// `[{field, code, message, params?, nested?}, ...]` in insertion order.
    #[must_use]
    pub fn to_json_value(&self) -> Value {
        Value::Array(self.errors.iter().map(ValidationError::to_json_value).collect())
    }
}

impl From<ValidationError> for ValidationErrors {
    fn from(error: ValidationError) -> Self {
        Self {
            errors: vec![error],
        }
    }
}

impl FromIterator<ValidationError> for ValidationErrors {
    fn from_iter<I: IntoIterator<Item = ValidationError>>(iter: I) -> Self {
        Self {
            errors: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for ValidationErrors {
    type Item = ValidationError;
    type IntoIter = std::vec::IntoIter<ValidationError>;

    fn into_iter(self) -> Self::IntoIter {
        self.errors.into_iter()
    }
}

impl<'a> IntoIterator for &'a ValidationErrors {
    type Item = &'a ValidationError;
    type IntoIter = std::slice::Iter<'a, ValidationError>;

    fn into_iter(self) -> Self::IntoIter {
        self.errors.iter()
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} validation error(s)", self.errors.len())?;
        for error in &self.errors {
            write!(f, "; {error}")?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}

// ============================================================================
// TESTS
// ============================================================================
