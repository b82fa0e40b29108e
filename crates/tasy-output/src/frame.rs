//! Typed frames for the output files.

use polars::prelude::{Column, DataFrame, IntoColumn, NamedFrom, Series};

use tasy_core::UnmatchedReport;
use tasy_model::{
    COL_FACILITY_CODE, COL_PATIENT_NAME, COL_PROTOCOL, COL_RESULT_TIMESTAMP, COL_VISIT_ID,
    OutputRow, OutputSchema,
};

use crate::error::OutputError;

/// Single column of the inconsistency report.
pub const UNMATCHED_COLUMN: &str = "Paciente";

/// Import table with the fixed columns first, then one `f64` column per
/// exam in schema order.
pub fn build_output_frame(rows: &[OutputRow], schema: &OutputSchema) -> Result<DataFrame, OutputError> {
    let mut columns: Vec<Column> = Vec::with_capacity(schema.width());
    columns.push(
        Series::new(
            COL_PATIENT_NAME.into(),
            rows.iter().map(|row| row.patient_name.clone()).collect::<Vec<_>>(),
        )
        .into_column(),
    );
    columns.push(
        Series::new(
            COL_VISIT_ID.into(),
            rows.iter().map(|row| row.visit_id).collect::<Vec<i64>>(),
        )
        .into_column(),
    );
    columns.push(
        Series::new(
            COL_RESULT_TIMESTAMP.into(),
            rows.iter()
                .map(|row| row.result_timestamp.clone())
                .collect::<Vec<_>>(),
        )
        .into_column(),
    );
    columns.push(
        Series::new(
            COL_PROTOCOL.into(),
            rows.iter()
                .map(|row| row.protocol.label().to_string())
                .collect::<Vec<_>>(),
        )
        .into_column(),
    );
    columns.push(
        Series::new(
            COL_FACILITY_CODE.into(),
            rows.iter().map(|row| row.facility_code).collect::<Vec<i64>>(),
        )
        .into_column(),
    );
    for (position, code) in schema.exam_columns.iter().enumerate() {
        let values: Vec<Option<f64>> = rows
            .iter()
            .map(|row| row.exam_values.get(position).copied().flatten())
            .collect();
        columns.push(Series::new(code.as_str().into(), values).into_column());
    }
    DataFrame::new(columns).map_err(|source| OutputError::Frame {
        table: "import",
        source,
    })
}

/// Inconsistency report: sorted distinct patient names.
pub fn build_unmatched_frame(report: &UnmatchedReport) -> Result<DataFrame, OutputError> {
    let names: Vec<String> = report.names.iter().cloned().collect();
    DataFrame::new(vec![Series::new(UNMATCHED_COLUMN.into(), names).into_column()]).map_err(
        |source| OutputError::Frame {
            table: "inconsistency report",
            source,
        },
    )
}
