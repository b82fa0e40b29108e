//! Header candidate lists for column auto-detection.
//!
//! Each logical field of a source table is found by scanning the table's
//! headers in order and taking the first one that case-insensitively equals
//! a candidate. The lists are plain data so they can be tested and extended
//! without touching the detection code.

use std::collections::HashSet;

/// Patient display name in lab and registry tables.
pub const NAME_CANDIDATES: &[&str] = &["name", "patient", "nm_paciente", "paciente", "nome"];

/// Visit/encounter identifier in the registry table.
pub const VISIT_CANDIDATES: &[&str] = &["atendimento", "nr_atendimento"];

/// Result timestamp in lab tables.
pub const TIMESTAMP_CANDIDATES: &[&str] = &["dthr_os", "dt_resultado"];

/// Requesting sector, used when facilities are resolved per row.
pub const SECTOR_CANDIDATES: &[&str] = &["setor_solic", "setor"];

#[derive(Debug, Clone)]
pub struct CaseInsensitiveSet {
    names: HashSet<String>,
}

impl CaseInsensitiveSet {
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            names: names
                .into_iter()
                .map(|name| name.as_ref().to_lowercase())
                .collect(),
        }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.contains(&name.to_lowercase())
    }

    /// First header, in table order, that belongs to the set.
    pub fn first_match<'a, S>(&self, headers: &'a [S]) -> Option<&'a str>
    where
        S: AsRef<str>,
    {
        headers
            .iter()
            .map(AsRef::as_ref)
            .find(|header| self.contains(header))
    }
}
