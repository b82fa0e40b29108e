//! Import run orchestration: configuration to written files.

use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result, bail};
use tracing::{debug, info, info_span};

use tasy_config::TasyConfig;
use tasy_core::{RunInputs, run_reconciliation};
use tasy_ingest::{CsvTable, read_csv_table};
use tasy_model::{FacilityMode, RunOptions};
use tasy_output::{OutputOptions, write_outputs};

use crate::logging::redact_value;
use crate::types::ImportResult;

/// Input files and parameters of one import run.
#[derive(Debug, Clone)]
pub struct ImportRequest {
    pub basic: PathBuf,
    pub supplementary: Option<PathBuf>,
    pub patients: PathBuf,
    pub options: RunOptions,
    /// Where to write; `None` runs everything but writes nothing.
    pub output: Option<OutputOptions>,
}

/// Picks the facility mode of a run.
///
/// Per-row resolution when asked for; otherwise the named facility, or the
/// first configured one when no name is given.
pub fn select_facility(
    config: &TasyConfig,
    name: Option<&str>,
    from_sector: bool,
) -> Result<FacilityMode> {
    if from_sector {
        return Ok(FacilityMode::PerRow);
    }
    let catalog = config.facilities();
    let facility = match name {
        Some(name) => match catalog.find_by_name(name) {
            Some(facility) => facility,
            None => {
                let available: Vec<&str> = catalog
                    .facilities()
                    .iter()
                    .map(|facility| facility.name.trim())
                    .collect();
                bail!(
                    "unknown facility {name:?}; configured facilities: {}",
                    available.join(", ")
                );
            }
        },
        None => match catalog.first() {
            Some(facility) => facility,
            None => bail!("no facilities configured"),
        },
    };
    Ok(FacilityMode::Fixed {
        name: facility.name.trim().to_string(),
        code: facility.code,
    })
}

/// Loads every input table fully before any processing starts.
pub fn ingest(request: &ImportRequest) -> Result<RunInputs> {
    let span = info_span!("ingest");
    let _guard = span.enter();
    let start = Instant::now();
    let registry = read_table(&request.patients, "patient registry")?;
    let basic = read_table(&request.basic, "basic results")?;
    let supplementary = request
        .supplementary
        .as_deref()
        .map(|path| read_table(path, "supplementary results"))
        .transpose()?;
    info!(
        registry_rows = registry.row_count(),
        basic_rows = basic.row_count(),
        supplementary_rows = ?supplementary.as_ref().map(CsvTable::row_count),
        duration_ms = start.elapsed().as_millis(),
        "ingest complete"
    );
    Ok(RunInputs {
        basic,
        supplementary,
        registry,
    })
}

fn read_table(path: &Path, label: &str) -> Result<CsvTable> {
    read_csv_table(path).with_context(|| format!("read {label} table {}", path.display()))
}

pub fn run_import(config: &TasyConfig, request: &ImportRequest) -> Result<ImportResult> {
    let inputs = ingest(request)?;
    let outcome =
        run_reconciliation(config, &request.options, &inputs).context("reconcile lab results")?;
    for name in &outcome.unmatched.names {
        debug!(patient = %redact_value(name), "patient not found in registry");
    }

    let written = match &request.output {
        Some(output) => {
            let span = info_span!("output");
            let _guard = span.enter();
            let start = Instant::now();
            let written = write_outputs(
                output,
                &request.options.facility,
                &outcome.rows,
                &outcome.schema,
                &outcome.unmatched,
            )
            .with_context(|| format!("write outputs to {}", output.output_dir.display()))?;
            info!(
                import = %written.import_path.display(),
                duration_ms = start.elapsed().as_millis(),
                "output complete"
            );
            Some(written)
        }
        None => {
            info!("dry run; no files written");
            None
        }
    };

    Ok(ImportResult {
        outcome,
        options: request.options.clone(),
        written,
        config_version: config.version().map(str::to_string),
        config_updated: config.last_updated().map(str::to_string),
    })
}
