//! Normalization of raw cell text.
//!
//! - **name**: join-key form of patient names
//! - **numeric**: exam values with decimal comma support
//! - **datetime**: result timestamps in display form

pub mod datetime;
pub mod name;
pub mod numeric;

pub use datetime::{DISPLAY_FORMAT, normalize_timestamp, parse_timestamp};
pub use name::normalize_name;
pub use numeric::{coerce_integer, normalize_numeric};
