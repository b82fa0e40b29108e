//! Value normalization and facility resolution.
//!
//! Everything here is pure: a bad cell becomes `None`, never an error.

pub mod facility;
pub mod normalization;

pub use facility::{FacilityResolver, resolve_facility};
pub use normalization::{
    DISPLAY_FORMAT, coerce_integer, normalize_name, normalize_numeric, normalize_timestamp,
    parse_timestamp,
};
