//! Column detection for lab and registry tables.

use std::fmt;

use tasy_ingest::CsvTable;
use tasy_model::{
    CaseInsensitiveSet, ExamCategory, NAME_CANDIDATES, SECTOR_CANDIDATES, TIMESTAMP_CANDIDATES,
    VISIT_CANDIDATES,
};

use crate::error::{CoreError, Result};

/// Which input a table plays in a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableRole {
    Lab(ExamCategory),
    Registry,
}

impl fmt::Display for TableRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Lab(ExamCategory::Basic) => f.write_str("basic results"),
            Self::Lab(ExamCategory::Supplementary) => f.write_str("supplementary results"),
            Self::Registry => f.write_str("patient registry"),
        }
    }
}

/// Detected column positions of a lab result table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LabColumns {
    pub name: usize,
    pub timestamp: usize,
    /// Requesting sector, used only when facilities are resolved per row.
    pub sector: Option<usize>,
}

/// Detected column positions of the patient registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RegistryColumns {
    pub name: usize,
    pub visit: usize,
}

pub fn detect_lab_columns(table: &CsvTable, category: ExamCategory) -> Result<LabColumns> {
    let role = TableRole::Lab(category);
    Ok(LabColumns {
        name: name_column(table, role)?,
        timestamp: required_column(table, role, "result timestamp", TIMESTAMP_CANDIDATES)?,
        sector: find_column(table, SECTOR_CANDIDATES),
    })
}

/// Fails when the registry has no visit identifier column: without it no
/// record can be matched.
pub fn detect_registry_columns(table: &CsvTable) -> Result<RegistryColumns> {
    let role = TableRole::Registry;
    Ok(RegistryColumns {
        name: name_column(table, role)?,
        visit: required_column(table, role, "visit identifier", VISIT_CANDIDATES)?,
    })
}

/// First candidate header in table order, else the first column.
fn name_column(table: &CsvTable, role: TableRole) -> Result<usize> {
    if table.headers.is_empty() {
        return Err(CoreError::EmptyTable { table: role });
    }
    Ok(find_column(table, NAME_CANDIDATES).unwrap_or(0))
}

fn required_column(
    table: &CsvTable,
    role: TableRole,
    field: &'static str,
    candidates: &[&str],
) -> Result<usize> {
    find_column(table, candidates).ok_or_else(|| CoreError::MissingColumn {
        table: role,
        field,
        expected: candidates.join(", "),
        available: table.headers.join(", "),
    })
}

fn find_column(table: &CsvTable, candidates: &[&str]) -> Option<usize> {
    let set = CaseInsensitiveSet::new(candidates);
    let header = set.first_match(&table.headers)?;
    table.column_index(header)
}
