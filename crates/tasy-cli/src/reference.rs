//! Reference listings of the loaded configuration.

use tasy_config::TasyConfig;
use tasy_model::Facility;

use crate::types::ExamReferenceRow;

/// Exam catalog sorted by code, optionally filtered by a case-insensitive
/// search over code, name and aliases.
pub fn exam_reference(config: &TasyConfig, search: Option<&str>) -> Vec<ExamReferenceRow> {
    let mut exams: Vec<_> = config
        .exams()
        .iter()
        .filter(|exam| search.is_none_or(|text| exam.matches_search(text)))
        .collect();
    exams.sort_by(|a, b| a.code.cmp(&b.code));
    exams
        .into_iter()
        .map(|exam| ExamReferenceRow {
            tasy_code: exam.code.tasy_code().to_string(),
            name: exam.display_name.clone(),
            lab_columns: exam.source_aliases.join(", "),
        })
        .collect()
}

/// Facilities sorted by code.
pub fn facility_reference(config: &TasyConfig) -> Vec<&Facility> {
    config.facilities().sorted_by_code()
}
