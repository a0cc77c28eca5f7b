//! Typed field extraction from loosely-typed JSON records.
//!
//! Form payloads arrive as `serde_json::Value` objects. These helpers pull
//! one field out with the expected JSON type and turn every way that can
//! go wrong into a [`ValidationError`] carrying the field path, so a rule
//! set never panics or bails on malformed input.
//!
//! | Raw value | `required_*` | `optional_str` |
//! |---|---|---|
//! | key missing, `null` | `required` | `None` |
//! | `""` (strings only) | `required` | `None` |
//! | wrong JSON type | `type_mismatch` | `type_mismatch` |
//!
//! # Examples
//!
//! ```
//! use deligo_validator::json::{required_bool, required_str, optional_str};
//! use serde_json::json;
//!
//! let record = json!({ "city": "Porto", "helmet": "yes", "brand": "" });
//! let record = record.as_object().unwrap();
//!
//! assert_eq!(required_str(record, "city").unwrap(), "Porto");
//! assert_eq!(required_bool(record, "helmet").unwrap_err().code, "type_mismatch");
//! assert_eq!(optional_str(record, "brand").unwrap(), None);
//! assert_eq!(required_str(record, "street").unwrap_err().code, "required");
//! ```

use serde_json::{Map, Value};

use crate::foundation::ValidationError;

/// A JSON object, the shape of one submitted record.
pub type Record = Map<String, Value>;

/// Returns the JSON type name of a value, as used in `type_mismatch` errors.
#[must_use]
pub fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Interprets the whole input as a record.
///
/// A non-object input yields a `type_mismatch` error with an empty path.
pub fn as_record(input: &Value) -> Result<&Record, ValidationError> {
    input
        .as_object()
        .ok_or_else(|| ValidationError::type_mismatch("", "object", type_name(input)))
}

fn present<'a>(record: &'a Record, field: &str) -> Option<&'a Value> {
    record.get(field).filter(|value| !value.is_null())
}

/// Extracts a required, non-empty string field.
pub fn required_str<'a>(record: &'a Record, field: &'static str) -> Result<&'a str, ValidationError> {
    match optional_str(record, field)? {
        Some(value) => Ok(value),
        None => Err(ValidationError::required(field)),
    }
}

/// Extracts an optional string field; missing, `null` and `""` are `None`.
pub fn optional_str<'a>(
    record: &'a Record,
    field: &'static str,
) -> Result<Option<&'a str>, ValidationError> {
    match present(record, field) {
        None => Ok(None),
        Some(Value::String(s)) if s.is_empty() => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.as_str())),
        Some(other) => Err(ValidationError::type_mismatch(
            field,
            "string",
            type_name(other),
        )),
    }
}

/// Extracts a required boolean field.
pub fn required_bool(record: &Record, field: &'static str) -> Result<bool, ValidationError> {
    match present(record, field) {
        None => Err(ValidationError::required(field)),
        Some(Value::Bool(b)) => Ok(*b),
        Some(other) => Err(ValidationError::type_mismatch(
            field,
            "boolean",
            type_name(other),
        )),
    }
}

/// Extracts a required array of strings; the array may be empty.
///
/// A non-string element fails with a path of the form `field[index]`.
pub fn string_array(record: &Record, field: &'static str) -> Result<Vec<String>, ValidationError> {
    let items = match present(record, field) {
        None => return Err(ValidationError::required(field)),
        Some(Value::Array(items)) => items,
        Some(other) => {
            return Err(ValidationError::type_mismatch(
                field,
                "array",
                type_name(other),
            ));
        }
    };

    items
        .iter()
        .enumerate()
        .map(|(index, item)| match item {
            Value::String(s) => Ok(s.clone()),
            other => Err(ValidationError::type_mismatch(
                format!("{field}[{index}]"),
                "string",
                type_name(other),
            )),
        })
        .collect()
}
