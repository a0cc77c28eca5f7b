//! # deligo-validator
//!
//! A composable, type-safe validation framework for DeliGo form payloads.
//!
//! ## Quick Start
//!
//! ```
//! use deligo_validator::prelude::*;
//!
//! let name = min_length(2).and(max_length(30));
//! assert!(name.validate("Ana").is_ok());
//! assert!(name.validate("A").is_err());
//! ```
//!
//! ## Creating Validators
//!
//! Use the [`validator!`] macro for parameterised rule/error pairs, or
//! implement [`Validate`](foundation::Validate) by hand.
//!
//! ## Built-in Validators
//!
//! - **String**: [`MinLength`](validators::MinLength), [`MaxLength`](validators::MaxLength)
//! - **Date**: [`Date`](validators::Date)
//! - **Phone**: [`Phone`](validators::Phone), [`parse_phone`](validators::parse_phone)
//!
//! [`json`] extracts typed fields from `serde_json` records for rule sets
//! that validate whole submissions.

#![allow(clippy::result_large_err)]

pub mod combinators;
pub mod foundation;
pub mod json;
mod macros;
pub mod prelude;
pub mod validators;
