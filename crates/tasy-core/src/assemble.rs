//! Projection of merged records into import rows.

use tracing::debug;

use tasy_model::{OutputRow, OutputSchema, Protocol, ReconciledRecord};
use tasy_transform::coerce_integer;

use crate::error::{CoreError, Result};
use crate::patient_index::PatientIndex;

/// Builds the import rows, in record order.
///
/// Records without a visit identifier are dropped. For the rest the visit
/// identifier must be integral and a facility code must be present; either
/// failure aborts the whole assembly. A missing display name is taken from
/// the registry spelling of the same normalized name.
pub fn assemble_output(
    records: &[ReconciledRecord],
    schema: &OutputSchema,
    protocol: Protocol,
    index: &PatientIndex,
) -> Result<Vec<OutputRow>> {
    let mut rows = Vec::with_capacity(records.len());
    for record in records {
        let Some(raw_visit) = record.visit_id.as_deref() else {
            continue;
        };
        let visit_id = coerce_integer(raw_visit).ok_or_else(|| CoreError::InvalidVisitId {
            value: raw_visit.to_string(),
        })?;
        let facility_code = record
            .facility_code
            .ok_or(CoreError::MissingFacility { visit_id })?;
        let patient_name = record
            .display_name
            .clone()
            .or_else(|| index.display_name(&record.normalized_name).map(str::to_string));
        rows.push(OutputRow {
            patient_name,
            visit_id,
            result_timestamp: record.result_timestamp.clone(),
            protocol,
            facility_code,
            exam_values: schema
                .exam_columns
                .iter()
                .map(|code| record.exam_value(code))
                .collect(),
        });
    }
    debug!(
        records = records.len(),
        rows = rows.len(),
        dropped = records.len() - rows.len(),
        "output rows assembled"
    );
    Ok(rows)
}
