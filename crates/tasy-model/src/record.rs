//! Per-row records flowing through a reconciliation run.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::exam::{ExamCategory, ExamCode};
use crate::options::Protocol;

pub const COL_PATIENT_NAME: &str = "NM_PACIENTE";
pub const COL_VISIT_ID: &str = "NR_ATENDIMENTO";
pub const COL_RESULT_TIMESTAMP: &str = "DT_RESULTADO";
pub const COL_PROTOCOL: &str = "DS_PROTOCOLO";
pub const COL_FACILITY_CODE: &str = "CD_ESTABELECIMENTO";

/// Fixed leading columns of the import table, in order.
pub const FIXED_OUTPUT_COLUMNS: [&str; 5] = [
    COL_PATIENT_NAME,
    COL_VISIT_ID,
    COL_RESULT_TIMESTAMP,
    COL_PROTOCOL,
    COL_FACILITY_CODE,
];

/// Merge key of a record: normalized name plus normalized timestamp.
///
/// Two missing timestamps compare equal.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct JoinKey {
    pub normalized_name: String,
    pub result_timestamp: Option<String>,
}

/// One lab row after normalization and patient lookup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReconciledRecord {
    /// Name as written in the source row, if any.
    pub display_name: Option<String>,
    pub normalized_name: String,
    pub visit_id: Option<String>,
    pub facility_code: Option<i64>,
    pub result_timestamp: Option<String>,
    /// Values by canonical code. A missing key means the source had no
    /// column for that exam; `Some(None)` means the column was empty or
    /// unparseable.
    pub exam_values: BTreeMap<ExamCode, Option<f64>>,
    /// Source table the record came from.
    pub category: ExamCategory,
}

impl ReconciledRecord {
    pub fn join_key(&self) -> JoinKey {
        JoinKey {
            normalized_name: self.normalized_name.clone(),
            result_timestamp: self.result_timestamp.clone(),
        }
    }

    pub fn is_matched(&self) -> bool {
        self.visit_id.is_some()
    }

    /// Value for one exam, flattening "no column" and "empty cell".
    pub fn exam_value(&self, code: &ExamCode) -> Option<f64> {
        self.exam_values.get(code).copied().flatten()
    }
}

/// Column layout of the import table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputSchema {
    pub exam_columns: Vec<ExamCode>,
}

impl OutputSchema {
    pub fn new(exam_columns: Vec<ExamCode>) -> Self {
        Self { exam_columns }
    }

    /// All header names: the fixed columns followed by the exam columns.
    pub fn column_names(&self) -> Vec<String> {
        FIXED_OUTPUT_COLUMNS
            .iter()
            .map(|name| (*name).to_string())
            .chain(self.exam_columns.iter().map(|code| code.as_str().to_string()))
            .collect()
    }

    pub fn width(&self) -> usize {
        FIXED_OUTPUT_COLUMNS.len() + self.exam_columns.len()
    }
}

/// One row of the import table.
///
/// Visit identifier and facility code are already integers here; rows that
/// could not satisfy that never become an `OutputRow`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputRow {
    pub patient_name: Option<String>,
    pub visit_id: i64,
    pub result_timestamp: Option<String>,
    pub protocol: Protocol,
    pub facility_code: i64,
    /// One value per [`OutputSchema::exam_columns`] entry, same order.
    pub exam_values: Vec<Option<f64>>,
}
