//! Everything a rule set needs in one import.
//!
//! ```
//! use deligo_validator::prelude::*;
//!
//! let nationality = min_length(2).and(max_length(50));
//! assert!(nationality.validate("Portuguese").is_ok());
//! assert!(date().validate("2030-01-31").is_ok());
//! ```

pub use crate::combinators::And;
pub use crate::foundation::{Validate, ValidateExt, ValidationError, ValidationErrors};

#[allow(clippy::wildcard_imports)]
pub use crate::validators::*;
