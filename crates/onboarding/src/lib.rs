//! # deligo-onboarding
//!
//! Validation rule set for DeliGo delivery-partner onboarding forms.
//!
//! A submission is a flat JSON object with identity, government ID, address,
//! vehicle, banking and operational-preference fields. Validation runs in
//! two passes:
//!
//! 1. **Static pass**: every field is checked on its own (JSON type,
//!    required-ness, length, enum membership, date shape) in schema order.
//! 2. **Cross-field pass**: phone validity (prefix + national number),
//!    vehicle credentials for motorised vehicles, the other-platform name,
//!    the criminal-record issue date and its format.
//!
//! All failures are collected. On success the phone number is rewritten to
//! E.164 and the prefix dropped.
//!
//! ```
//! use deligo_onboarding::validate_submission;
//! use serde_json::json;
//!
//! let errors = validate_submission(&json!({ "vehicleType": "TRUCK" })).unwrap_err();
//! assert!(errors.has_field("vehicleType"));
//! assert!(errors.has_field("firstName"));
//! ```
//!
//! [`RuleMode`] picks whether cross-field rules look at fields that already
//! failed their own checks.

#![allow(clippy::result_large_err)]

mod record;
mod rules;
mod schema;
mod validator;

pub use record::{Gender, OnboardingRecord, VehicleType};
pub use rules::{ParseRuleModeError, RuleMode};
pub use validator::{OnboardingValidator, validate_submission};

pub use deligo_validator::foundation::{ValidationError, ValidationErrors};
