//! Integration tests for the prelude module.
//!
//! Verifies that `use deligo_validator::prelude::*` brings in everything
//! a consumer needs for common validation scenarios.

use deligo_validator::json::{as_record, optional_str, required_str};
use deligo_validator::prelude::*;
use pretty_assertions::assert_eq;
use rstest::rstest;
use serde_json::json;

#[test]
fn prelude_import_provides_validate_trait() {
    let v = min_length(3).and(max_length(20));
    assert!(v.validate("hello").is_ok());
    assert!(v.validate("hi").is_err());
}

#[rstest]
#[case("2024-02-29", true)]
#[case("2023-02-29", false)]
#[case("2024-05-01T08:30:00Z", true)]
#[case("01/05/2024", false)]
#[case("", false)]
fn date_via_prelude(#[case] input: &str, #[case] valid: bool) {
    assert_eq!(date().validate(input).is_ok(), valid);
}

#[rstest]
#[case("+351 912 345 678", Some("+351912345678"))]
#[case("0033 6 12 34 56 78", Some("+33612345678"))]
#[case("+351 12", None)]
#[case("912345678", None)]
fn phone_via_prelude(#[case] input: &str, #[case] e164: Option<&str>) {
    let parsed = parse_phone(input).ok().map(|p| p.to_e164());
    assert_eq!(parsed.as_deref(), e164);
    assert_eq!(phone().validate(input).is_ok(), e164.is_some());
}

#[test]
fn errors_collect_with_field_paths() {
    let input = json!({ "firstName": "A", "lastName": "", "brand": "" });
    let record = as_record(&input).unwrap();

    let mut errors = ValidationErrors::new();
    let first = required_str(record, "firstName")
        .and_then(|first| min_length(2).validate(first).map_err(|e| e.or_field("firstName")));
    let last = required_str(record, "lastName").map(|_| ());
    let brand = optional_str(record, "brand").map(|_| ());
    for result in [first, last, brand] {
        if let Err(error) = result {
            errors.add(error);
        }
    }

    let paths: Vec<_> = errors.iter().map(ValidationError::field_path).collect();
    assert_eq!(paths, vec!["firstName", "lastName"]);
    assert_eq!(errors.to_json_value()[0]["code"], json!("min_length"));
    assert_eq!(errors.to_json_value()[1]["code"], json!("required"));
}

#[test]
fn validators_compose_over_references() {
    let bounds = [min_length(8).and(max_length(11))];
    let swift = &bounds[0];
    assert!(swift.validate("BCOMPTPL").is_ok());
    assert!(swift.validate("BCOMPTPLXXXX").is_err());
}
