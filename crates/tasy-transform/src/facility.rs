//! Facility code resolution.

use tasy_model::{FacilityCatalog, FacilityMode};

/// Looks up a requesting sector in the facility catalog.
///
/// The sector is trimmed and uppercased; when that key is absent the lookup
/// is retried with a single leading space, matching catalog keys written with
/// stray leading whitespace.
pub fn resolve_facility(raw_sector: Option<&str>, catalog: &FacilityCatalog) -> Option<i64> {
    let key = raw_sector?.trim().to_uppercase();
    catalog
        .get(&key)
        .or_else(|| catalog.get(&format!(" {key}")))
}

/// Facility assignment for one run, in either configured mode.
#[derive(Debug, Clone, Copy)]
pub enum FacilityResolver<'a> {
    /// Every record gets the same code.
    Fixed(i64),
    /// Each record's sector is looked up.
    PerRow(&'a FacilityCatalog),
}

impl<'a> FacilityResolver<'a> {
    pub fn new(mode: &FacilityMode, catalog: &'a FacilityCatalog) -> Self {
        match mode {
            FacilityMode::Fixed { code, .. } => Self::Fixed(*code),
            FacilityMode::PerRow => Self::PerRow(catalog),
        }
    }

    /// Code for a record whose sector cell holds `raw_sector`.
    pub fn resolve(&self, raw_sector: Option<&str>) -> Option<i64> {
        match self {
            Self::Fixed(code) => Some(*code),
            Self::PerRow(catalog) => resolve_facility(raw_sector, catalog),
        }
    }

    /// Whether records need a sector column at all.
    pub fn needs_sector(&self) -> bool {
        matches!(self, Self::PerRow(_))
    }
}
