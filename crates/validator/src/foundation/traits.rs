//! The `Validate` trait and its extension methods.

use crate::combinators::And;
use crate::foundation::ValidationError;

/// A check over one input value.
///
/// The input type is part of the trait so a string rule cannot be applied
/// to a boolean field. Validators report at most one error; the caller
/// attaches the field path.
///
/// ```
/// use deligo_validator::foundation::{Validate, ValidationError};
///
/// struct NoSpaces;
///
/// impl Validate for NoSpaces {
///     type Input = str;
///
///     fn validate(&self, input: &str) -> Result<(), ValidationError> {
///         if input.contains(' ') {
///             Err(ValidationError::new("no_spaces", "Must not contain spaces"))
///         } else {
///             Ok(())
///         }
///     }
/// }
///
/// assert!(NoSpaces.validate("PT50000201231234567890154").is_ok());
/// assert!(NoSpaces.validate("PT50 0002").is_err());
/// ```
pub trait Validate {
    /// `?Sized` so `str` can be validated without an allocation.
    type Input: ?Sized;

    fn validate(&self, input: &Self::Input) -> Result<(), ValidationError>;
}

impl<V: Validate + ?Sized> Validate for &V {
    type Input = V::Input;

    fn validate(&self, input: &Self::Input) -> Result<(), ValidationError> {
        (**self).validate(input)
    }
}

impl<V: Validate + ?Sized> Validate for Box<V> {
    type Input = V::Input;

    fn validate(&self, input: &Self::Input) -> Result<(), ValidationError> {
        (**self).validate(input)
    }
}

/// Combinator methods, implemented for every [`Validate`] type.
///
/// ```
/// use deligo_validator::prelude::*;
///
/// let city = min_length(2).and(max_length(50));
/// assert!(city.validate("Lisboa").is_ok());
/// assert!(city.validate("L").is_err());
/// ```
pub trait ValidateExt: Validate + Sized {
    /// Requires `other` to pass as well; stops at the first failure.
    fn and<V>(self, other: V) -> And<Self, V>
    where
        V: Validate<Input = Self::Input>,
    {
        And::new(self, other)
    }
}

impl<T: Validate> ValidateExt for T {}
