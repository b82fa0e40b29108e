//! Per-source preprocessing of lab result tables.

use std::collections::BTreeMap;

use tracing::debug;

use tasy_ingest::CsvTable;
use tasy_map::ExamColumnMap;
use tasy_model::{ExamCategory, ExamCode, ReconciledRecord};
use tasy_transform::{FacilityResolver, normalize_name, normalize_numeric, normalize_timestamp};

use crate::columns::LabColumns;
use crate::patient_index::PatientIndex;

/// One lab table after preprocessing.
#[derive(Debug, Clone)]
pub struct PreparedSource {
    pub category: ExamCategory,
    /// One record per table row, in table order.
    pub records: Vec<ReconciledRecord>,
    pub exam_map: ExamColumnMap,
}

impl PreparedSource {
    /// Records whose name had no visit identifier in the registry.
    pub fn unmatched(&self) -> impl Iterator<Item = &ReconciledRecord> {
        self.records.iter().filter(|record| !record.is_matched())
    }
}

/// Turns every row of a lab table into a [`ReconciledRecord`].
///
/// Mapped exam cells are parsed as numbers and stored under their canonical
/// code; unmapped exams get no key at all. The visit identifier comes from
/// the patient index and stays empty on a miss.
pub fn preprocess_source(
    table: &CsvTable,
    columns: LabColumns,
    exam_map: ExamColumnMap,
    index: &PatientIndex,
    facility: &FacilityResolver<'_>,
) -> PreparedSource {
    let category = exam_map.category;
    let exam_columns: Vec<(&ExamCode, usize)> = exam_map
        .bindings
        .iter()
        .filter_map(|binding| {
            table
                .column_index(&binding.source_column)
                .map(|column| (&binding.code, column))
        })
        .collect();

    let mut records = Vec::with_capacity(table.row_count());
    for row in 0..table.row_count() {
        let raw_name = table.cell(row, columns.name);
        let normalized_name = normalize_name(raw_name);
        let visit_id = index.lookup(&normalized_name).map(str::to_string);
        if visit_id.is_none() {
            debug!(category = %category, row = row + 1, "patient not found in registry");
        }
        let exam_values: BTreeMap<ExamCode, Option<f64>> = exam_columns
            .iter()
            .map(|(code, column)| ((*code).clone(), normalize_numeric(table.cell(row, *column))))
            .collect();
        records.push(ReconciledRecord {
            display_name: raw_name.map(str::to_string),
            normalized_name,
            visit_id,
            facility_code: facility.resolve(columns.sector.and_then(|c| table.cell(row, c))),
            result_timestamp: normalize_timestamp(table.cell(row, columns.timestamp)),
            exam_values,
            category,
        });
    }
    PreparedSource {
        category,
        records,
        exam_map,
    }
}
