//! Static per-field pass.
//!
//! Reads every field of a submission in schema order, checks its shape and
//! keeps whatever could be read for the cross-field pass. One error at most
//! is reported per field.

use deligo_validator::foundation::{Validate, ValidationError, ValidationErrors};
use deligo_validator::json::{self, Record};
use deligo_validator::prelude::*;

use crate::record::{Gender, OnboardingRecord, VehicleType};
use crate::rules::RuleMode;

// ============================================================================
// CHECKED VALUE
// ============================================================================

/// A field value after its static checks.
///
/// `value` is whatever could be read with the expected JSON type, even if a
/// later constraint (length, date, enum) rejected it.
#[derive(Debug, Clone)]
pub(crate) struct Checked<T> {
    value: Option<T>,
    valid: bool,
}

impl<T> Checked<T> {
    fn passed(value: T) -> Self {
        Self {
            value: Some(value),
            valid: true,
        }
    }

    fn failed(value: Option<T>) -> Self {
        Self {
            value,
            valid: false,
        }
    }

    /// The value a cross-field rule sees, or `None` when the rule must not
    /// look at this field at all.
    ///
    /// Staged rules skip fields that failed their static checks; report-all
    /// rules read them anyway.
    pub(crate) fn rule_input(&self, mode: RuleMode) -> Option<Option<&T>> {
        match mode {
            RuleMode::Staged if !self.valid => None,
            _ => Some(self.value.as_ref()),
        }
    }

    fn into_valid(self) -> Option<T> {
        if self.valid { self.value } else { None }
    }
}

/// Text that can be blank.
pub(crate) trait Blank {
    fn is_blank(&self) -> bool;
}

impl Blank for &str {
    fn is_blank(&self) -> bool {
        self.is_empty()
    }
}

impl Blank for Option<&str> {
    fn is_blank(&self) -> bool {
        self.is_none_or(str::is_empty)
    }
}

impl<T: Blank> Checked<T> {
    /// Whether a cross-field rule should treat this field as missing.
    ///
    /// A field the rule may not look at is never missing.
    pub(crate) fn is_blank(&self, mode: RuleMode) -> bool {
        self.rule_input(mode)
            .is_some_and(|value| value.is_none_or(Blank::is_blank))
    }
}

// ============================================================================
// FIELD READER
// ============================================================================

struct FieldReader<'a> {
    record: &'a Record,
    errors: ValidationErrors,
}

impl<'a> FieldReader<'a> {
    fn new(record: &'a Record) -> Self {
        Self {
            record,
            errors: ValidationErrors::new(),
        }
    }

    fn check<T>(
        &mut self,
        field: &'static str,
        value: T,
        result: Result<(), ValidationError>,
    ) -> Checked<T> {
        match result {
            Ok(()) => Checked::passed(value),
            Err(error) => {
                self.errors.add(error.or_field(field));
                Checked::failed(Some(value))
            }
        }
    }

    fn unreadable<T>(&mut self, error: ValidationError) -> Checked<T> {
        self.errors.add(error);
        Checked::failed(None)
    }

    /// Required string with no further shape constraint.
    fn text(&mut self, field: &'static str) -> Checked<&'a str> {
        match json::required_str(self.record, field) {
            Ok(value) => Checked::passed(value),
            Err(error) => self.unreadable(error),
        }
    }

    fn text_with<V>(&mut self, field: &'static str, validator: V) -> Checked<&'a str>
    where
        V: Validate<Input = str>,
    {
        match json::required_str(self.record, field) {
            Ok(value) => self.check(field, value, validator.validate(value)),
            Err(error) => self.unreadable(error),
        }
    }

    /// Optional string with no further shape constraint.
    fn optional(&mut self, field: &'static str) -> Checked<Option<&'a str>> {
        match json::optional_str(self.record, field) {
            Ok(value) => Checked::passed(value),
            Err(error) => self.unreadable(error),
        }
    }

    fn optional_text<V>(&mut self, field: &'static str, validator: V) -> Checked<Option<&'a str>>
    where
        V: Validate<Input = str>,
    {
        match json::optional_str(self.record, field) {
            Ok(None) => Checked::passed(None),
            Ok(Some(value)) => self.check(field, Some(value), validator.validate(value)),
            Err(error) => self.unreadable(error),
        }
    }

    fn choice<T>(&mut self, field: &'static str) -> Checked<T>
    where
        T: std::str::FromStr<Err = ValidationError>,
    {
        match json::required_str(self.record, field).and_then(str::parse) {
            Ok(value) => Checked::passed(value),
            Err(error) => self.unreadable(error.or_field(field)),
        }
    }

    fn flag(&mut self, field: &'static str) -> Checked<bool> {
        match json::required_bool(self.record, field) {
            Ok(value) => Checked::passed(value),
            Err(error) => self.unreadable(error),
        }
    }

    fn list(&mut self, field: &'static str) -> Checked<Vec<String>> {
        match json::string_array(self.record, field) {
            Ok(value) => Checked::passed(value),
            Err(error) => self.unreadable(error),
        }
    }
}

fn length(min: usize, max: usize) -> And<MinLength, MaxLength> {
    min_length(min).and(max_length(max))
}

// ============================================================================
// CANDIDATE
// ============================================================================

/// A submission after the static pass, before cross-field rules.
#[derive(Debug, Clone)]
pub(crate) struct Candidate<'a> {
    pub first_name: Checked<&'a str>,
    pub last_name: Checked<&'a str>,
    pub phone_prefix: Checked<&'a str>,
    pub phone_number: Checked<&'a str>,
    pub date_of_birth: Checked<&'a str>,
    pub gender: Checked<Gender>,
    pub nationality: Checked<&'a str>,

    pub nif_number: Checked<&'a str>,
    pub citizen_card_number: Checked<&'a str>,
    pub passport_number: Checked<Option<&'a str>>,
    pub id_expiry_date: Checked<&'a str>,
    pub residence_permit_type: Checked<&'a str>,
    pub residence_permit_number: Checked<&'a str>,
    pub residence_permit_expiry: Checked<&'a str>,
    pub have_criminal_record_certificate: Checked<bool>,
    pub issue_date: Checked<Option<&'a str>>,

    pub street: Checked<&'a str>,
    pub city: Checked<&'a str>,
    pub postal_code: Checked<&'a str>,
    pub country: Checked<&'a str>,

    pub vehicle_type: Checked<VehicleType>,
    pub brand: Checked<Option<&'a str>>,
    pub model: Checked<Option<&'a str>>,
    pub license_plate: Checked<Option<&'a str>>,
    pub driving_license_number: Checked<Option<&'a str>>,
    pub driving_license_expiry: Checked<Option<&'a str>>,
    pub insurance_policy_number: Checked<Option<&'a str>>,
    pub insurance_expiry: Checked<&'a str>,

    pub bank_name: Checked<&'a str>,
    pub account_holder_name: Checked<&'a str>,
    pub iban: Checked<&'a str>,
    pub swift_code: Checked<&'a str>,

    pub preferred_zones: Checked<Vec<String>>,
    pub preferred_hours: Checked<Vec<String>>,
    pub isothermal_bag: Checked<bool>,
    pub helmet: Checked<bool>,
    pub power_bank: Checked<bool>,
    pub worked_with_other_platform: Checked<bool>,
    pub other_platform_name: Checked<Option<&'a str>>,
}

impl<'a> Candidate<'a> {
    /// Runs the static pass. Errors come out in field order.
    pub(crate) fn read(record: &'a Record) -> (Self, ValidationErrors) {
        let mut r = FieldReader::new(record);

        let candidate = Self {
            first_name: r.text_with("firstName", length(2, 30)),
            last_name: r.text_with("lastName", length(2, 30)),
            phone_prefix: r.text("phonePrefix"),
            phone_number: r.text("phoneNumber"),
            date_of_birth: r.text_with("dateOfBirth", date()),
            gender: r.choice("gender"),
            nationality: r.text_with("nationality", length(2, 50)),

            nif_number: r.text_with("nifNumber", min_length(9)),
            citizen_card_number: r.text_with("citizenCardNumber", min_length(5)),
            passport_number: r.optional_text("passportNumber", min_length(5)),
            id_expiry_date: r.text_with("idExpiryDate", date()),
            residence_permit_type: r.text_with("residencePermitType", length(2, 50)),
            residence_permit_number: r.text_with("residencePermitNumber", length(2, 50)),
            residence_permit_expiry: r.text_with("residencePermitExpiry", date()),
            have_criminal_record_certificate: r.flag("haveCriminalRecordCertificate"),
            issue_date: r.optional("issueDate"),

            street: r.text_with("street", length(5, 100)),
            city: r.text_with("city", length(2, 50)),
            postal_code: r.text_with("postalCode", length(1, 10)),
            country: r.text_with("country", length(2, 50)),

            vehicle_type: r.choice("vehicleType"),
            brand: r.optional_text("brand", length(2, 50)),
            model: r.optional_text("model", length(2, 50)),
            license_plate: r.optional_text("licensePlate", length(2, 50)),
            driving_license_number: r.optional_text("drivingLicenseNumber", length(2, 50)),
            driving_license_expiry: r.optional_text("drivingLicenseExpiry", date()),
            insurance_policy_number: r.optional_text("insurancePolicyNumber", length(2, 50)),
            insurance_expiry: r.text_with("insuranceExpiry", date()),

            bank_name: r.text_with("bankName", length(2, 50)),
            account_holder_name: r.text_with("accountHolderName", length(2, 100)),
            iban: r.text_with("iban", length(15, 34)),
            swift_code: r.text_with("swiftCode", length(8, 11)),

            preferred_zones: r.list("preferredZones"),
            preferred_hours: r.list("preferredHours"),
            isothermal_bag: r.flag("isothermalBag"),
            helmet: r.flag("helmet"),
            power_bank: r.flag("powerBank"),
            worked_with_other_platform: r.flag("workedWithOtherPlatform"),
            other_platform_name: r.optional("otherPlatformName"),
        };

        (candidate, r.errors)
    }

    /// Builds the normalized record. `None` if any field failed its static
    /// checks.
    pub(crate) fn into_record(self, phone_number: String) -> Option<OnboardingRecord> {
        let owned = |value: &str| value.to_owned();

        Some(OnboardingRecord {
            first_name: self.first_name.into_valid().map(owned)?,
            last_name: self.last_name.into_valid().map(owned)?,
            phone_number,
            date_of_birth: self.date_of_birth.into_valid().map(owned)?,
            gender: self.gender.into_valid()?,
            nationality: self.nationality.into_valid().map(owned)?,

            nif_number: self.nif_number.into_valid().map(owned)?,
            citizen_card_number: self.citizen_card_number.into_valid().map(owned)?,
            passport_number: self.passport_number.into_valid()?.map(owned),
            id_expiry_date: self.id_expiry_date.into_valid().map(owned)?,
            residence_permit_type: self.residence_permit_type.into_valid().map(owned)?,
            residence_permit_number: self.residence_permit_number.into_valid().map(owned)?,
            residence_permit_expiry: self.residence_permit_expiry.into_valid().map(owned)?,
            have_criminal_record_certificate: self.have_criminal_record_certificate.into_valid()?,
            issue_date: self.issue_date.into_valid()?.map(owned),

            street: self.street.into_valid().map(owned)?,
            city: self.city.into_valid().map(owned)?,
            postal_code: self.postal_code.into_valid().map(owned)?,
            country: self.country.into_valid().map(owned)?,

            vehicle_type: self.vehicle_type.into_valid()?,
            brand: self.brand.into_valid()?.map(owned),
            model: self.model.into_valid()?.map(owned),
            license_plate: self.license_plate.into_valid()?.map(owned),
            driving_license_number: self.driving_license_number.into_valid()?.map(owned),
            driving_license_expiry: self.driving_license_expiry.into_valid()?.map(owned),
            insurance_policy_number: self.insurance_policy_number.into_valid()?.map(owned),
            insurance_expiry: self.insurance_expiry.into_valid().map(owned)?,

            bank_name: self.bank_name.into_valid().map(owned)?,
            account_holder_name: self.account_holder_name.into_valid().map(owned)?,
            iban: self.iban.into_valid().map(owned)?,
            swift_code: self.swift_code.into_valid().map(owned)?,

            preferred_zones: self.preferred_zones.into_valid()?,
            preferred_hours: self.preferred_hours.into_valid()?,
            isothermal_bag: self.isothermal_bag.into_valid()?,
            helmet: self.helmet.into_valid()?,
            power_bank: self.power_bank.into_valid()?,
            worked_with_other_platform: self.worked_with_other_platform.into_valid()?,
            other_platform_name: self.other_platform_name.into_valid()?.map(owned),
        })
    }
}
