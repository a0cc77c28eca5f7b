//! Normalized output of a successful validation.

use std::fmt;
use std::str::FromStr;

use deligo_validator::foundation::ValidationError;
use serde::{Deserialize, Serialize};
use serde_json::Value;

// ============================================================================
// ENUMS
// ============================================================================

/// Declared gender of a delivery partner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Gender {
    Male,
    Female,
    Other,
}

impl Gender {
    pub const ALL: [Self; 3] = [Self::Male, Self::Female, Self::Other];

    /// Wire spellings, in declaration order.
    pub const NAMES: &'static [&'static str] = &["MALE", "FEMALE", "OTHER"];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Male => "MALE",
            Self::Female => "FEMALE",
            Self::Other => "OTHER",
        }
    }
}

/// Vehicle a partner delivers with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VehicleType {
    #[serde(rename = "BICYCLE")]
    Bicycle,
    #[serde(rename = "E-BIKE")]
    EBike,
    #[serde(rename = "SCOOTER")]
    Scooter,
    #[serde(rename = "MOTORBIKE")]
    Motorbike,
    #[serde(rename = "CAR")]
    Car,
}

impl VehicleType {
    pub const ALL: [Self; 5] = [
        Self::Bicycle,
        Self::EBike,
        Self::Scooter,
        Self::Motorbike,
        Self::Car,
    ];

    /// Wire spellings, in declaration order.
    pub const NAMES: &'static [&'static str] = &["BICYCLE", "E-BIKE", "SCOOTER", "MOTORBIKE", "CAR"];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Bicycle => "BICYCLE",
            Self::EBike => "E-BIKE",
            Self::Scooter => "SCOOTER",
            Self::Motorbike => "MOTORBIKE",
            Self::Car => "CAR",
        }
    }

    /// Motorised vehicles need a licence plate, driving licence and insurance.
    #[must_use]
    pub const fn requires_credentials(self) -> bool {
        matches!(self, Self::Scooter | Self::Motorbike | Self::Car)
    }
}

macro_rules! wire_enum {
    ($ty:ty) => {
        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $ty {
            type Err = ValidationError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::ALL
                    .into_iter()
                    .find(|variant| variant.as_str() == s)
                    .ok_or_else(|| ValidationError::one_of("", Self::NAMES, s.to_owned()))
            }
        }
    };
}

wire_enum!(Gender);
wire_enum!(VehicleType);

// ============================================================================
// RECORD
// ============================================================================

/// A validated onboarding submission.
///
/// Same fields as the submitted form, minus the phone prefix: `phone_number`
/// holds the canonical `+<calling code><national number>` form. Optional
/// fields left blank on the form are `None`. Dates are passed through as
/// submitted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OnboardingRecord {
    // identity and contact
    pub first_name: String,
    pub last_name: String,
    pub phone_number: String,
    pub date_of_birth: String,
    pub gender: Gender,
    pub nationality: String,

    // government identity
    pub nif_number: String,
    pub citizen_card_number: String,
    pub passport_number: Option<String>,
    pub id_expiry_date: String,
    pub residence_permit_type: String,
    pub residence_permit_number: String,
    pub residence_permit_expiry: String,
    pub have_criminal_record_certificate: bool,
    pub issue_date: Option<String>,

    // address
    pub street: String,
    pub city: String,
    pub postal_code: String,
    pub country: String,

    // vehicle
    pub vehicle_type: VehicleType,
    pub brand: Option<String>,
    pub model: Option<String>,
    pub license_plate: Option<String>,
    pub driving_license_number: Option<String>,
    pub driving_license_expiry: Option<String>,
    pub insurance_policy_number: Option<String>,
    pub insurance_expiry: String,

    // banking
    pub bank_name: String,
    pub account_holder_name: String,
    pub iban: String,
    pub swift_code: String,

    // operational preferences
    pub preferred_zones: Vec<String>,
    pub preferred_hours: Vec<String>,
    pub isothermal_bag: bool,
    pub helmet: bool,
    pub power_bank: bool,
    pub worked_with_other_platform: bool,
    pub other_platform_name: Option<String>,
}

impl OnboardingRecord {
    /// Serializes the record to camelCase JSON.
    ///
    /// # Errors
    ///
    /// Propagates `serde_json` failures; none occur for this type in practice.
    pub fn to_json(&self) -> serde_json::Result<Value> {
        serde_json::to_value(self)
    }
}
