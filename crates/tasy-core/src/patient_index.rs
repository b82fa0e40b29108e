//! Registry lookup from normalized patient name to visit identifier.

use std::collections::BTreeMap;

use tracing::{debug, warn};

use tasy_ingest::CsvTable;
use tasy_transform::normalize_name;

use crate::columns::RegistryColumns;

#[derive(Debug, Clone, Default)]
struct IndexEntry {
    visit_id: Option<String>,
    display_name: Option<String>,
}

/// Normalized name to visit identifier, built once per run.
///
/// When two registry rows normalize to the same name the later row
/// overwrites the earlier one, even if its identifier cell is empty.
/// Overwrites are counted and reported once.
#[derive(Debug, Clone, Default)]
pub struct PatientIndex {
    entries: BTreeMap<String, IndexEntry>,
    duplicates: usize,
}

impl PatientIndex {
    pub fn build_index(table: &CsvTable, columns: RegistryColumns) -> Self {
        let index = Self::from_entries((0..table.row_count()).map(|row| {
            (
                table.cell(row, columns.name),
                table.cell(row, columns.visit),
            )
        }));
        debug!(
            registry_rows = table.row_count(),
            patients = index.len(),
            "patient index built"
        );
        index
    }

    /// Builds an index from `(name, visit identifier)` pairs in row order.
    ///
    /// Rows whose name normalizes to the empty string are skipped.
    pub fn from_entries<'a, I>(rows: I) -> Self
    where
        I: IntoIterator<Item = (Option<&'a str>, Option<&'a str>)>,
    {
        let mut index = Self::default();
        for (name, visit_id) in rows {
            let normalized = normalize_name(name);
            if normalized.is_empty() {
                continue;
            }
            let entry = IndexEntry {
                visit_id: visit_id
                    .map(str::trim)
                    .filter(|value| !value.is_empty())
                    .map(str::to_string),
                display_name: name.map(str::to_string),
            };
            if index.entries.insert(normalized, entry).is_some() {
                index.duplicates += 1;
            }
        }
        if index.duplicates > 0 {
            warn!(
                duplicates = index.duplicates,
                "registry has repeated patient names; the last row of each wins"
            );
        }
        index
    }

    /// Visit identifier for a normalized name.
    pub fn lookup(&self, normalized_name: &str) -> Option<&str> {
        self.entries
            .get(normalized_name)
            .and_then(|entry| entry.visit_id.as_deref())
    }

    /// Registry spelling of a normalized name.
    pub fn display_name(&self, normalized_name: &str) -> Option<&str> {
        self.entries
            .get(normalized_name)
            .and_then(|entry| entry.display_name.as_deref())
    }

    /// Number of registry rows that overwrote an earlier row.
    pub fn duplicates(&self) -> usize {
        self.duplicates
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
