//! Built-in validators
//!
//! - [`MinLength`], [`MaxLength`]: string length bounds
//! - [`Date`]: calendar dates and timestamps
//! - [`Phone`]: international phone numbers checked against libphonenumber
//!   region metadata

pub mod date;
pub mod length;
pub mod phone;

pub use date::{Date, date, parse_date};
pub use length::{LengthMode, MaxLength, MinLength, max_length, min_length};
pub use phone::{ParsedPhone, Phone, parse_phone, phone};
