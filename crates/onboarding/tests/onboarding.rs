//! End-to-end tests for the onboarding rule set.

use deligo_onboarding::{
    Gender, OnboardingValidator, RuleMode, ValidationErrors, VehicleType, validate_submission,
};
use pretty_assertions::assert_eq;
use proptest::prelude::*;
use rstest::{fixture, rstest};
use serde_json::{Value, json};

// ============================================================================
// FIXTURES
// ============================================================================

#[fixture]
fn submission() -> Value {
    base_submission()
}

fn base_submission() -> Value {
    json!({
        "firstName": "Ana",
        "lastName": "Silva",
        "phonePrefix": "+351",
        "phoneNumber": "912345678",
        "dateOfBirth": "1990-04-25",
        "gender": "FEMALE",
        "nationality": "Portuguese",

        "nifNumber": "123456789",
        "citizenCardNumber": "12345678",
        "passportNumber": "",
        "idExpiryDate": "2030-01-31",
        "residencePermitType": "Temporary",
        "residencePermitNumber": "RP-2291",
        "residencePermitExpiry": "2028-06-30",
        "haveCriminalRecordCertificate": false,
        "issueDate": "",

        "street": "Rua Augusta 100",
        "city": "Lisboa",
        "postalCode": "1100-053",
        "country": "Portugal",

        "vehicleType": "BICYCLE",
        "brand": "",
        "model": "",
        "licensePlate": "",
        "drivingLicenseNumber": "",
        "drivingLicenseExpiry": "",
        "insurancePolicyNumber": "",
        "insuranceExpiry": "2027-01-01",

        "bankName": "Millennium BCP",
        "accountHolderName": "Ana Silva",
        "iban": "PT50000201231234567890154",
        "swiftCode": "BCOMPTPL",

        "preferredZones": ["Baixa", "Alfama"],
        "preferredHours": ["LUNCH"],
        "isothermalBag": true,
        "helmet": true,
        "powerBank": false,
        "workedWithOtherPlatform": false,
        "otherPlatformName": ""
    })
}

fn with(mut base: Value, overrides: Value) -> Value {
    let fields = base.as_object_mut().unwrap();
    for (key, value) in overrides.as_object().unwrap() {
        fields.insert(key.clone(), value.clone());
    }
    base
}

fn without(mut base: Value, key: &str) -> Value {
    base.as_object_mut().unwrap().remove(key);
    base
}

fn failures(errors: &ValidationErrors) -> Vec<(String, String)> {
    errors
        .iter()
        .map(|e| (e.field_path().to_owned(), e.code.to_string()))
        .collect()
}

fn failure(field: &str, code: &str) -> (String, String) {
    (field.to_owned(), code.to_owned())
}

// ============================================================================
// HAPPY PATH
// ============================================================================

#[rstest]
fn valid_submission_is_normalized(submission: Value) {
    let record = validate_submission(&submission).unwrap();

    assert_eq!(record.phone_number, "+351912345678");
    assert_eq!(record.gender, Gender::Female);
    assert_eq!(record.vehicle_type, VehicleType::Bicycle);
    assert_eq!(record.passport_number, None);

    assert_eq!(
        record.to_json().unwrap(),
        json!({
            "firstName": "Ana",
            "lastName": "Silva",
            "phoneNumber": "+351912345678",
            "dateOfBirth": "1990-04-25",
            "gender": "FEMALE",
            "nationality": "Portuguese",
            "nifNumber": "123456789",
            "citizenCardNumber": "12345678",
            "passportNumber": null,
            "idExpiryDate": "2030-01-31",
            "residencePermitType": "Temporary",
            "residencePermitNumber": "RP-2291",
            "residencePermitExpiry": "2028-06-30",
            "haveCriminalRecordCertificate": false,
            "issueDate": null,
            "street": "Rua Augusta 100",
            "city": "Lisboa",
            "postalCode": "1100-053",
            "country": "Portugal",
            "vehicleType": "BICYCLE",
            "brand": null,
            "model": null,
            "licensePlate": null,
            "drivingLicenseNumber": null,
            "drivingLicenseExpiry": null,
            "insurancePolicyNumber": null,
            "insuranceExpiry": "2027-01-01",
            "bankName": "Millennium BCP",
            "accountHolderName": "Ana Silva",
            "iban": "PT50000201231234567890154",
            "swiftCode": "BCOMPTPL",
            "preferredZones": ["Baixa", "Alfama"],
            "preferredHours": ["LUNCH"],
            "isothermalBag": true,
            "helmet": true,
            "powerBank": false,
            "workedWithOtherPlatform": false,
            "otherPlatformName": null
        })
    );
}

#[rstest]
fn output_omits_phone_prefix(submission: Value) {
    let json = validate_submission(&submission).unwrap().to_json().unwrap();
    assert!(json.get("phonePrefix").is_none());
}

#[rstest]
fn empty_preference_arrays_are_accepted(submission: Value) {
    let input = with(submission, json!({ "preferredZones": [], "preferredHours": [] }));
    let record = validate_submission(&input).unwrap();
    assert!(record.preferred_zones.is_empty());
}

#[rstest]
fn lengths_count_characters(submission: Value) {
    // "Zé" is two characters but three bytes
    let input = with(submission, json!({ "firstName": "Zé", "lastName": "Ó" }));
    let errors = validate_submission(&input).unwrap_err();
    assert_eq!(failures(&errors), vec![failure("lastName", "min_length")]);
}

// ============================================================================
// PHONE
// ============================================================================

#[rstest]
#[case("+351", "912345678", "+351912345678")]
#[case("+351", "912 345 678", "+351912345678")]
#[case("+351 ", "21 345 6789", "+351213456789")]
#[case("00351", "931234567", "+351931234567")]
#[case("+44", "07911 123456", "+447911123456")]
#[case("+34", "612345678", "+34612345678")]
#[case("+30", "6912345678", "+306912345678")]
#[case("+46", "701234567", "+46701234567")]
#[case("+420", "601123456", "+420601123456")]
#[case("+7", "9123456789", "+79123456789")]
#[case("+90", "5012345678", "+905012345678")]
#[case("+45", "20123456", "+4520123456")]
#[case("+61", "412345678", "+61412345678")]
#[case("+1", "6135550123", "+16135550123")]
#[case("+33", "06 12 34 56 78", "+33612345678")]
fn phone_is_canonicalized(
    submission: Value,
    #[case] prefix: &str,
    #[case] number: &str,
    #[case] expected: &str,
) {
    let input = with(submission, json!({ "phonePrefix": prefix, "phoneNumber": number }));
    assert_eq!(validate_submission(&input).unwrap().phone_number, expected);
}

#[rstest]
#[case("+351", "123", "invalid_phone")]
#[case("+351", "412345678", "invalid_phone")]
#[case("+30", "123", "invalid_phone")]
#[case("351", "912345678", "phone_missing_country_code")]
#[case("+999", "12345678", "phone_unknown_country_code")]
#[case("+351", "91234567x", "phone_invalid_chars")]
fn invalid_phone_is_reported_on_phone_number(
    submission: Value,
    #[case] prefix: &str,
    #[case] number: &str,
    #[case] code: &str,
) {
    let input = with(submission, json!({ "phonePrefix": prefix, "phoneNumber": number }));
    let errors = validate_submission(&input).unwrap_err();
    assert_eq!(failures(&errors), vec![failure("phoneNumber", code)]);
}

#[rstest]
fn normalization_is_idempotent(submission: Value) {
    let input = with(submission, json!({ "phoneNumber": "91 234 5678" }));
    let first = validate_submission(&input).unwrap();

    // feed the normalized number back, split after the '+'
    let again = with(
        input,
        json!({ "phonePrefix": "+", "phoneNumber": &first.phone_number[1..] }),
    );
    let second = validate_submission(&again).unwrap();

    assert_eq!(second.phone_number, first.phone_number);
    assert_eq!(second, first);
}

#[rstest]
fn normalized_record_revalidates(submission: Value) {
    let first = validate_submission(&submission).unwrap();

    let mut output = first.to_json().unwrap();
    output["phonePrefix"] = json!("+351");
    output["phoneNumber"] = json!("912345678");

    assert_eq!(validate_submission(&output).unwrap(), first);
}

proptest! {
    #[test]
    fn portuguese_mobiles_normalize_without_drift(
        second in "[1236]",
        rest in "[0-9]{7}",
        sep in "[ .-]?",
    ) {
        let number = format!("9{second}{sep}{rest}");
        let input = with(base_submission(), json!({ "phoneNumber": number }));

        let first = validate_submission(&input).unwrap();
        prop_assert_eq!(&first.phone_number, &format!("+3519{second}{rest}"));

        let again = with(input, json!({ "phonePrefix": "+", "phoneNumber": &first.phone_number[1..] }));
        prop_assert_eq!(validate_submission(&again).unwrap().phone_number, first.phone_number);
    }
}

// ============================================================================
// VEHICLE CREDENTIALS
// ============================================================================

#[rstest]
fn bicycles_and_e_bikes_need_no_credentials(
    submission: Value,
    #[values("BICYCLE", "E-BIKE")] vehicle: &str,
) {
    let input = with(submission, json!({ "vehicleType": vehicle }));
    assert!(validate_submission(&input).is_ok());
}

#[rstest]
fn motorised_vehicles_need_credentials(
    submission: Value,
    #[values("CAR", "SCOOTER", "MOTORBIKE")] vehicle: &str,
) {
    let input = with(submission, json!({ "vehicleType": vehicle }));
    let errors = validate_submission(&input).unwrap_err();

    assert_eq!(
        failures(&errors),
        vec![failure("vehicleType", "vehicle_credentials_required")]
    );
    assert_eq!(
        errors.errors()[0].param("missing"),
        Some("licensePlate,drivingLicenseNumber,drivingLicenseExpiry,insurancePolicyNumber")
    );
}

#[rstest]
fn car_with_empty_license_plate_fails(submission: Value) {
    let input = with(
        submission,
        json!({
            "vehicleType": "CAR",
            "brand": "Renault",
            "model": "Clio",
            "licensePlate": "",
            "drivingLicenseNumber": "L-123456",
            "drivingLicenseExpiry": "2031-05-01",
            "insurancePolicyNumber": "POL-998877",
        }),
    );
    let errors = validate_submission(&input).unwrap_err();

    assert_eq!(
        failures(&errors),
        vec![failure("vehicleType", "vehicle_credentials_required")]
    );
    assert_eq!(errors.errors()[0].param("missing"), Some("licensePlate"));
}

#[rstest]
fn car_with_all_credentials_passes(submission: Value) {
    let input = with(
        submission,
        json!({
            "vehicleType": "CAR",
            "licensePlate": "AA-00-BB",
            "drivingLicenseNumber": "L-123456",
            "drivingLicenseExpiry": "2031-05-01",
            "insurancePolicyNumber": "POL-998877",
        }),
    );
    let record = validate_submission(&input).unwrap();

    assert_eq!(record.vehicle_type, VehicleType::Car);
    assert_eq!(record.license_plate.as_deref(), Some("AA-00-BB"));
    assert_eq!(record.brand, None);
}

// ============================================================================
// OTHER PLATFORM & CRIMINAL RECORD
// ============================================================================

#[rstest]
fn other_platform_name_required_when_worked_elsewhere(submission: Value) {
    let input = with(submission, json!({ "workedWithOtherPlatform": true }));
    let errors = validate_submission(&input).unwrap_err();
    assert_eq!(
        failures(&errors),
        vec![failure("otherPlatformName", "other_platform_required")]
    );

    let input = with(input, json!({ "otherPlatformName": "Glovo" }));
    let record = validate_submission(&input).unwrap();
    assert_eq!(record.other_platform_name.as_deref(), Some("Glovo"));
}

#[rstest]
fn other_platform_name_ignored_otherwise(
    submission: Value,
    #[values("", "Glovo")] name: &str,
) {
    let input = with(submission, json!({ "otherPlatformName": name }));
    assert!(validate_submission(&input).is_ok());
}

#[rstest]
fn issue_date_required_with_certificate(submission: Value) {
    let input = without(
        with(submission, json!({ "haveCriminalRecordCertificate": true })),
        "issueDate",
    );
    let errors = validate_submission(&input).unwrap_err();
    assert_eq!(failures(&errors), vec![failure("issueDate", "issue_date_required")]);
}

#[rstest]
#[case("not-a-date", false)]
#[case("2024-13-01", false)]
#[case("2024-03-01", true)]
#[case("2024-03-01T09:15:00Z", true)]
fn issue_date_must_parse(submission: Value, #[case] issue_date: &str, #[case] valid: bool) {
    let input = with(
        submission,
        json!({ "haveCriminalRecordCertificate": true, "issueDate": issue_date }),
    );
    match validate_submission(&input) {
        Ok(record) => {
            assert!(valid);
            assert_eq!(record.issue_date.as_deref(), Some(issue_date));
        }
        Err(errors) => {
            assert!(!valid);
            assert_eq!(failures(&errors), vec![failure("issueDate", "invalid_date")]);
        }
    }
}

#[rstest]
fn issue_date_format_checked_without_certificate(submission: Value) {
    let input = with(submission, json!({ "issueDate": "yesterday" }));
    let errors = validate_submission(&input).unwrap_err();
    assert_eq!(failures(&errors), vec![failure("issueDate", "invalid_date")]);
}

// ============================================================================
// ERROR COLLECTION
// ============================================================================

#[rstest]
fn independent_failures_are_all_reported_in_order(submission: Value) {
    let input = with(
        submission,
        json!({
            "firstName": "A",
            "gender": "male",
            "iban": "PT50",
            "dateOfBirth": "25/04/1990",
            "workedWithOtherPlatform": true,
            "phoneNumber": "123",
        }),
    );
    let errors = validate_submission(&input).unwrap_err();

    assert_eq!(
        failures(&errors),
        vec![
            failure("firstName", "min_length"),
            failure("dateOfBirth", "invalid_date"),
            failure("gender", "one_of"),
            failure("iban", "min_length"),
            failure("phoneNumber", "invalid_phone"),
            failure("otherPlatformName", "other_platform_required"),
        ]
    );
}

#[rstest]
fn static_errors_are_one_per_field(submission: Value) {
    let input = with(submission, json!({ "swiftCode": "" }));
    let errors = validate_submission(&input).unwrap_err();
    assert_eq!(failures(&errors), vec![failure("swiftCode", "required")]);
}

#[rstest]
fn optional_fields_validate_when_present(submission: Value) {
    let input = with(
        submission,
        json!({ "passportNumber": "P12", "brand": "X", "drivingLicenseExpiry": "later" }),
    );
    let errors = validate_submission(&input).unwrap_err();
    assert_eq!(
        failures(&errors),
        vec![
            failure("passportNumber", "min_length"),
            failure("brand", "min_length"),
            failure("drivingLicenseExpiry", "invalid_date"),
        ]
    );
}

#[rstest]
fn optional_fields_accept_null(submission: Value) {
    let input = with(submission, json!({ "passportNumber": null, "issueDate": null }));
    assert!(validate_submission(&input).is_ok());
}

// ============================================================================
// RULE MODES
// ============================================================================

#[rstest]
fn staged_mode_suppresses_secondary_phone_error(submission: Value) {
    let input = with(submission, json!({ "phoneNumber": "" }));

    let staged = OnboardingValidator::new(RuleMode::Staged)
        .validate(&input)
        .unwrap_err();
    assert_eq!(failures(&staged), vec![failure("phoneNumber", "required")]);

    let all = OnboardingValidator::new(RuleMode::ReportAll)
        .validate(&input)
        .unwrap_err();
    assert_eq!(
        failures(&all),
        vec![
            failure("phoneNumber", "required"),
            failure("phoneNumber", "phone_too_few_digits"),
        ]
    );
}

#[rstest]
fn staged_mode_skips_rules_on_unreadable_fields(submission: Value) {
    let input = with(
        submission,
        json!({ "haveCriminalRecordCertificate": true, "issueDate": 20240301 }),
    );

    let staged = OnboardingValidator::new(RuleMode::Staged)
        .validate(&input)
        .unwrap_err();
    assert_eq!(failures(&staged), vec![failure("issueDate", "type_mismatch")]);

    let all = OnboardingValidator::new(RuleMode::ReportAll)
        .validate(&input)
        .unwrap_err();
    assert_eq!(
        failures(&all),
        vec![
            failure("issueDate", "type_mismatch"),
            failure("issueDate", "issue_date_required"),
        ]
    );
}

#[rstest]
fn staged_mode_does_not_count_invalid_credentials_as_missing(submission: Value) {
    let input = with(
        submission,
        json!({
            "vehicleType": "SCOOTER",
            "licensePlate": "A",
            "drivingLicenseNumber": "L-123456",
            "drivingLicenseExpiry": "2031-05-01",
            "insurancePolicyNumber": "POL-998877",
            "insuranceExpiry": "",
        }),
    );

    let staged = validate_submission(&input).unwrap_err();
    assert_eq!(
        failures(&staged),
        vec![
            failure("licensePlate", "min_length"),
            failure("insuranceExpiry", "required"),
        ]
    );

    let all = OnboardingValidator::new(RuleMode::ReportAll)
        .validate(&input)
        .unwrap_err();
    assert_eq!(all.len(), 3);
    assert_eq!(all.errors()[2].param("missing"), Some("insuranceExpiry"));
}

#[rstest]
fn modes_agree_on_valid_input(submission: Value) {
    let staged = OnboardingValidator::new(RuleMode::Staged).validate(&submission);
    let all = OnboardingValidator::new(RuleMode::ReportAll).validate(&submission);
    assert_eq!(staged, all);
}

// ============================================================================
// MALFORMED INPUT
// ============================================================================

#[rstest]
#[case(json!(null), "null")]
#[case(json!([1, 2, 3]), "array")]
#[case(json!("submission"), "string")]
fn non_object_input_is_a_single_type_mismatch(#[case] input: Value, #[case] actual: &str) {
    let errors = validate_submission(&input).unwrap_err();
    assert_eq!(failures(&errors), vec![failure("", "type_mismatch")]);
    assert_eq!(errors.errors()[0].param("actual"), Some(actual));
}

#[rstest]
#[case(json!({ "helmet": "yes" }), "helmet")]
#[case(json!({ "firstName": 42 }), "firstName")]
#[case(json!({ "preferredHours": "LUNCH" }), "preferredHours")]
#[case(json!({ "preferredZones": ["Baixa", 3] }), "preferredZones[1]")]
#[case(json!({ "vehicleType": ["CAR"] }), "vehicleType")]
fn wrong_json_types_are_type_mismatches(
    submission: Value,
    #[case] overrides: Value,
    #[case] path: &str,
) {
    let errors = validate_submission(&with(submission, overrides)).unwrap_err();
    assert_eq!(failures(&errors), vec![failure(path, "type_mismatch")]);
}

fn leaf_value() -> impl Strategy<Value = Value> {
    prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::from),
        any::<i64>().prop_map(Value::from),
        ".{0,12}".prop_map(Value::from),
        prop::collection::vec(".{0,4}", 0..3).prop_map(Value::from),
    ]
}

proptest! {
    #[test]
    fn arbitrary_field_values_never_panic(
        key in prop::sample::select(base_submission().as_object().unwrap().keys().cloned().collect::<Vec<_>>()),
        value in leaf_value(),
        report_all in any::<bool>(),
    ) {
        let mode = if report_all { RuleMode::ReportAll } else { RuleMode::Staged };
        let input = with(base_submission(), json!({ key.clone(): value }));

        if let Err(errors) = OnboardingValidator::new(mode).validate(&input) {
            prop_assert!(!errors.is_empty());
            prop_assert!(errors.iter().all(|e| !e.field_path().is_empty()));
        }
    }
}
