//! String length bounds.
//!
//! Length counts chars (Unicode scalar values) unless a validator is built
//! with `bytes`, so "João" has length 4 and a byte length of 5.

use crate::foundation::ValidationError;

/// Unit used to measure a string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum LengthMode {
    #[default]
    Chars,
    Bytes,
}

impl LengthMode {
    #[inline]
    pub fn measure(self, input: &str) -> usize {
        match self {
            Self::Chars => input.chars().count(),
            Self::Bytes => input.len(),
        }
    }
}

crate::validator! {
    /// Lower length bound, inclusive.
    pub MinLength { min: usize, mode: LengthMode } for str;
    rule(self, input) { self.mode.measure(input) >= self.min }
    error(self, input) { ValidationError::min_length("", self.min, self.mode.measure(input)) }
    new(min: usize) { Self { min, mode: LengthMode::Chars } }
    fn min_length(min: usize);
}

crate::validator! {
    /// Upper length bound, inclusive.
    pub MaxLength { max: usize, mode: LengthMode } for str;
    rule(self, input) { self.mode.measure(input) <= self.max }
    error(self, input) { ValidationError::max_length("", self.max, self.mode.measure(input)) }
    new(max: usize) { Self { max, mode: LengthMode::Chars } }
    fn max_length(max: usize);
}

impl MinLength {
    #[must_use]
    pub const fn bytes(min: usize) -> Self {
        Self {
            min,
            mode: LengthMode::Bytes,
        }
    }
}

impl MaxLength {
    #[must_use]
    pub const fn bytes(max: usize) -> Self {
        Self {
            max,
            mode: LengthMode::Bytes,
        }
    }
}
