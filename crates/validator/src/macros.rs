//! `validator!`: declare a parameterised validator in one block.
//!
//! The macro expands to a `Copy` struct with public fields, a constructor,
//! the [`Validate`](crate::foundation::Validate) impl and a factory
//! function named after the rule.
//!
//! ```
//! use deligo_validator::validator;
//! use deligo_validator::foundation::{Validate, ValidationError};
//!
//! validator! {
//!     /// At most `max` digits.
//!     pub MaxDigits { max: usize } for str;
//!     rule(self, input) { input.chars().filter(char::is_ascii_digit).count() <= self.max }
//!     error(self, input) {
//!         ValidationError::new("max_digits", format!("At most {} digits", self.max))
//!     }
//!     new(max: usize) { Self { max } }
//!     fn max_digits(max: usize);
//! }
//!
//! assert!(max_digits(9).validate("912 345 678").is_ok());
//! assert!(max_digits(9).validate("9123456789").is_err());
//! ```

#[macro_export]
macro_rules! validator {
    (
        $(#[$meta:meta])*
        $vis:vis $name:ident { $($field:ident: $fty:ty),+ $(,)? } for $input:ty;
        rule($self_:ident, $inp:ident) $rule:block
        error($self2:ident, $einp:ident) $err:block
        new($($narg:ident: $naty:ty),* $(,)?) $new_body:block
        fn $factory:ident($($farg:ident: $faty:ty),* $(,)?);
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        $vis struct $name {
            $(pub $field: $fty,)+
        }

        impl $name {
            #[must_use]
            pub const fn new($($narg: $naty),*) -> Self $new_body
        }

        impl $crate::foundation::Validate for $name {
            type Input = $input;

            #[allow(unused_variables)]
            fn validate(&$self_, $inp: &Self::Input) -> Result<(), $crate::foundation::ValidationError> {
                if $rule {
                    return Ok(());
                }
                let $einp = $inp;
                Err($err)
            }
        }

        #[must_use]
        $vis const fn $factory($($farg: $faty),*) -> $name {
            $name::new($($farg),*)
        }
    };
}

#[cfg(test)]
mod tests {
    use crate::foundation::{Validate, ValidationError};

    validator! {
        Prefixed { prefix: char } for str;
        rule(self, input) { input.starts_with(self.prefix) }
        error(self, input) {
            ValidationError::new("prefix", "Missing prefix")
                .with_param("prefix", self.prefix.to_string())
                .with_param("actual", input.to_string())
        }
        new(prefix: char) { Self { prefix } }
        fn prefixed(prefix: char);
    }

    #[test]
    fn test_expansion() {
        let validator = prefixed('+');
        assert_eq!(validator, Prefixed::new('+'));
        assert!(validator.validate("+351").is_ok());

        let error = validator.validate("351").unwrap_err();
        assert_eq!(error.param("prefix"), Some("+"));
        assert_eq!(error.param("actual"), Some("351"));
    }
}
