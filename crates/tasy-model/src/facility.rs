//! Facility catalog.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::{ModelError, Result};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Facility {
    /// Name as written in the configuration.
    pub name: String,
    pub code: i64,
}

/// Facility name to integer code lookup.
///
/// Keys are stored uppercased but not trimmed: some catalogs carry names with
/// a stray leading space, and the resolver retries with one prepended.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FacilityCatalog {
    facilities: Vec<Facility>,
    by_key: BTreeMap<String, i64>,
}

impl FacilityCatalog {
    /// Builds a catalog, keeping declaration order for listing.
    ///
    /// Several spellings may map to the same code; a repeated key keeps the
    /// last code, like the underlying JSON object would.
    pub fn new<I, S>(entries: I) -> Result<Self>
    where
        I: IntoIterator<Item = (S, i64)>,
        S: Into<String>,
    {
        let mut catalog = Self::default();
        for (name, code) in entries {
            let name = name.into();
            if code <= 0 {
                return Err(ModelError::InvalidFacilityCode { name, code });
            }
            catalog.by_key.insert(name.to_uppercase(), code);
            catalog.facilities.retain(|existing| existing.name != name);
            catalog.facilities.push(Facility { name, code });
        }
        Ok(catalog)
    }

    /// Exact lookup on an already uppercased key.
    pub fn get(&self, key: &str) -> Option<i64> {
        self.by_key.get(key).copied()
    }

    /// Finds a facility by its configured name, ignoring case and
    /// surrounding whitespace.
    pub fn find_by_name(&self, name: &str) -> Option<&Facility> {
        let wanted = name.trim().to_uppercase();
        self.facilities
            .iter()
            .find(|facility| facility.name.trim().to_uppercase() == wanted)
    }

    /// Facilities in declaration order.
    pub fn facilities(&self) -> &[Facility] {
        &self.facilities
    }

    /// Facilities ordered by code, then name.
    pub fn sorted_by_code(&self) -> Vec<&Facility> {
        let mut sorted: Vec<&Facility> = self.facilities.iter().collect();
        sorted.sort_by(|a, b| a.code.cmp(&b.code).then_with(|| a.name.cmp(&b.name)));
        sorted
    }

    pub fn first(&self) -> Option<&Facility> {
        self.facilities.first()
    }

    pub fn len(&self) -> usize {
        self.facilities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.facilities.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_non_positive_codes() {
        let error = FacilityCatalog::new([("MATRIZ", 0)]).unwrap_err();
        assert!(matches!(error, ModelError::InvalidFacilityCode { code: 0, .. }));
    }

    #[test]
    fn keeps_declaration_order_and_aliases() {
        let catalog =
            FacilityCatalog::new([("MATRIZ", 1), ("Filial Norte", 7), ("Matriz Centro", 1)])
                .unwrap();
        let names: Vec<&str> = catalog.facilities().iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["MATRIZ", "Filial Norte", "Matriz Centro"]);
        assert_eq!(catalog.get("FILIAL NORTE"), Some(7));
        assert_eq!(catalog.get("MATRIZ CENTRO"), Some(1));
        assert_eq!(catalog.find_by_name(" filial norte ").map(|f| f.code), Some(7));
    }

    #[test]
    fn sorted_by_code_breaks_ties_by_name() {
        let catalog = FacilityCatalog::new([("B", 2), ("Z", 1), ("A", 2)]).unwrap();
        let codes: Vec<(&str, i64)> = catalog
            .sorted_by_code()
            .into_iter()
            .map(|f| (f.name.as_str(), f.code))
            .collect();
        assert_eq!(codes, vec![("Z", 1), ("A", 2), ("B", 2)]);
    }
}
