//! One reconciliation run, from loaded tables to import rows.
//!
//! Every table-level check runs before any row is processed, so a bad input
//! fails the run without producing partial results.

use std::time::Instant;

use tracing::{info, info_span, warn};

use tasy_config::TasyConfig;
use tasy_ingest::CsvTable;
use tasy_map::{AliasSuggestion, ExamColumnMap, map_exam_columns, suggest_aliases};
use tasy_model::{ExamCategory, OutputRow, OutputSchema, RunOptions};
use tasy_transform::FacilityResolver;

use crate::assemble::assemble_output;
use crate::columns::{LabColumns, detect_lab_columns, detect_registry_columns};
use crate::error::Result;
use crate::merge::merge_sources;
use crate::patient_index::PatientIndex;
use crate::preprocess::{PreparedSource, preprocess_source};
use crate::unmatched::UnmatchedReport;

/// Tables of one run, fully loaded.
#[derive(Debug, Clone)]
pub struct RunInputs {
    pub basic: CsvTable,
    pub supplementary: Option<CsvTable>,
    pub registry: CsvTable,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunStats {
    pub registry_rows: usize,
    pub registry_duplicates: usize,
    pub basic_rows: usize,
    pub supplementary_rows: Option<usize>,
    pub merged_records: usize,
    pub output_rows: usize,
    /// Merged records left out for lacking a visit identifier.
    pub dropped_records: usize,
}

#[derive(Debug, Clone)]
pub struct RunOutcome {
    pub rows: Vec<OutputRow>,
    pub schema: OutputSchema,
    pub unmatched: UnmatchedReport,
    /// Column mapping of each lab source, basic first.
    pub exam_maps: Vec<ExamColumnMap>,
    pub suggestions: Vec<AliasSuggestion>,
    pub stats: RunStats,
}

pub fn run_reconciliation(
    config: &TasyConfig,
    options: &RunOptions,
    inputs: &RunInputs,
) -> Result<RunOutcome> {
    let run_start = Instant::now();

    let registry_columns = detect_registry_columns(&inputs.registry)?;
    let basic_columns = detect_lab_columns(&inputs.basic, ExamCategory::Basic)?;
    let supplementary_columns = inputs
        .supplementary
        .as_ref()
        .map(|table| detect_lab_columns(table, ExamCategory::Supplementary))
        .transpose()?;

    let index = info_span!("index").in_scope(|| {
        let start = Instant::now();
        let index = PatientIndex::build_index(&inputs.registry, registry_columns);
        info!(
            registry_rows = inputs.registry.row_count(),
            patients = index.len(),
            duplicates = index.duplicates(),
            duration_ms = start.elapsed().as_millis(),
            "index complete"
        );
        index
    });

    let facility = FacilityResolver::new(&options.facility, config.facilities());
    let mut suggestions = Vec::new();
    let mut prepare = |table: &CsvTable, category: ExamCategory, columns: LabColumns| {
        info_span!("preprocess", category = %category).in_scope(|| {
            let start = Instant::now();
            if facility.needs_sector() && columns.sector.is_none() {
                warn!(
                    category = %category,
                    "no sector column; facility codes stay empty for this source"
                );
            }
            let exam_map = map_exam_columns(&table.headers, category, config);
            for suggestion in suggest_aliases(&table.headers, &exam_map, config) {
                warn!(
                    category = %category,
                    exam = %suggestion.code,
                    alias = %suggestion.alias,
                    column = %suggestion.source_column,
                    score = suggestion.score,
                    "possible alias for unbound exam; column not used"
                );
                suggestions.push(suggestion);
            }
            let prepared = preprocess_source(table, columns, exam_map, &index, &facility);
            info!(
                category = %category,
                rows = prepared.records.len(),
                exams_bound = prepared.exam_map.len(),
                unmatched = prepared.unmatched().count(),
                duration_ms = start.elapsed().as_millis(),
                "preprocess complete"
            );
            prepared
        })
    };

    let basic = prepare(&inputs.basic, ExamCategory::Basic, basic_columns);
    let supplementary = match (&inputs.supplementary, supplementary_columns) {
        (Some(table), Some(columns)) => {
            Some(prepare(table, ExamCategory::Supplementary, columns))
        }
        _ => None,
    };

    let unmatched = UnmatchedReport::collect(
        basic
            .unmatched()
            .chain(supplementary.iter().flat_map(PreparedSource::unmatched)),
    );
    let mut exam_maps = vec![basic.exam_map];
    exam_maps.extend(supplementary.as_ref().map(|source| source.exam_map.clone()));

    let merged = info_span!("merge").in_scope(|| {
        let start = Instant::now();
        let merged = merge_sources(basic.records, supplementary.map(|source| source.records));
        info!(
            records = merged.len(),
            duration_ms = start.elapsed().as_millis(),
            "merge complete"
        );
        merged
    });

    let schema = config.output_schema().clone();
    let rows = info_span!("assemble").in_scope(|| -> Result<Vec<OutputRow>> {
        let start = Instant::now();
        let rows = assemble_output(&merged, &schema, options.protocol, &index)?;
        info!(
            rows = rows.len(),
            columns = schema.width(),
            duration_ms = start.elapsed().as_millis(),
            "assemble complete"
        );
        Ok(rows)
    })?;

    let stats = RunStats {
        registry_rows: inputs.registry.row_count(),
        registry_duplicates: index.duplicates(),
        basic_rows: inputs.basic.row_count(),
        supplementary_rows: inputs.supplementary.as_ref().map(CsvTable::row_count),
        merged_records: merged.len(),
        output_rows: rows.len(),
        dropped_records: merged.len() - rows.len(),
    };
    info!(
        output_rows = stats.output_rows,
        unmatched_rows = unmatched.row_count,
        duration_ms = run_start.elapsed().as_millis(),
        "reconciliation complete"
    );
    Ok(RunOutcome {
        rows,
        schema,
        unmatched,
        exam_maps,
        suggestions,
        stats,
    })
}
