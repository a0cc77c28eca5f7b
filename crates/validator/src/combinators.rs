//! Composing validators.
//!
//! Field constraints in a form are usually a conjunction of simpler checks,
//! e.g. a length range is a minimum and a maximum. [`And`] runs both and
//! reports the first bound that was violated.

use crate::foundation::{Validate, ValidationError};

/// Both validators must pass; the first failure is returned.
///
/// ```
/// use deligo_validator::combinators::And;
/// use deligo_validator::foundation::Validate;
/// use deligo_validator::validators::{max_length, min_length};
///
/// let postal_code = And::new(min_length(1), max_length(10));
/// assert!(postal_code.validate("1100-053").is_ok());
/// assert_eq!(postal_code.validate("").unwrap_err().code, "min_length");
/// assert_eq!(postal_code.validate("1100-053-PT").unwrap_err().code, "max_length");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct And<L, R> {
    first: L,
    second: R,
}

impl<L, R> And<L, R> {
    pub const fn new(first: L, second: R) -> Self {
        Self { first, second }
    }
}

impl<L, R> Validate for And<L, R>
where
    L: Validate,
    R: Validate<Input = L::Input>,
{
    type Input = L::Input;

    fn validate(&self, input: &Self::Input) -> Result<(), ValidationError> {
        self.first.validate(input)?;
        self.second.validate(input)
    }
}
