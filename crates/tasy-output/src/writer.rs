//! Atomic CSV writing of the output files.
//!
//! Each file is first written to a temporary file in the output directory.
//! The temporaries are renamed into place only once every write succeeded;
//! on any failure they are deleted, leaving no partial output behind.
//! A run without unmatched names removes the report of an earlier run so it
//! cannot be mistaken for the current one.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use chrono::NaiveDateTime;
use polars::prelude::{CsvWriter, DataFrame, SerWriter};
use tempfile::NamedTempFile;
use tracing::info;

use tasy_core::UnmatchedReport;
use tasy_model::{FacilityMode, OutputRow, OutputSchema};

use crate::error::OutputError;
use crate::frame::{build_output_frame, build_unmatched_frame};

pub const UNMATCHED_FILE_NAME: &str = "Relatorio_Inconsistencias.csv";

#[derive(Debug, Clone)]
pub struct OutputOptions {
    pub output_dir: PathBuf,
    /// Field separator byte, `,` by default.
    pub separator: u8,
    /// Stamp used in the import file name.
    pub generated_at: NaiveDateTime,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WrittenOutputs {
    pub import_path: PathBuf,
    /// Present only when the run had unmatched patient names.
    pub unmatched_path: Option<PathBuf>,
}

/// `Planilha_Importacao_TASY_{facility}_{YYYYmmdd_HHMMSS}.csv`
pub fn output_file_name(facility: &FacilityMode, generated_at: NaiveDateTime) -> String {
    format!(
        "Planilha_Importacao_TASY_{}_{}.csv",
        facility.file_label(),
        generated_at.format("%Y%m%d_%H%M%S")
    )
}

pub fn write_outputs(
    options: &OutputOptions,
    facility: &FacilityMode,
    rows: &[OutputRow],
    schema: &OutputSchema,
    unmatched: &UnmatchedReport,
) -> Result<WrittenOutputs, OutputError> {
    let dir = options.output_dir.as_path();
    fs::create_dir_all(dir).map_err(|source| OutputError::io(dir, source))?;

    let mut import_frame = build_output_frame(rows, schema)?;
    let mut unmatched_frame = if unmatched.is_empty() {
        None
    } else {
        Some(build_unmatched_frame(unmatched)?)
    };

    let import_path = dir.join(output_file_name(facility, options.generated_at));
    let import_temp = write_temp(dir, &import_path, &mut import_frame, options.separator)?;
    let report_path = dir.join(UNMATCHED_FILE_NAME);
    let unmatched_staged = match unmatched_frame.as_mut() {
        Some(frame) => Some(write_temp(dir, &report_path, frame, options.separator)?),
        None => {
            remove_stale_report(&report_path)?;
            None
        }
    };

    persist(import_temp, &import_path)?;
    let unmatched_path = match unmatched_staged {
        Some(temp) => {
            if let Err(error) = persist(temp, &report_path) {
                let _ = fs::remove_file(&import_path);
                return Err(error);
            }
            Some(report_path)
        }
        None => None,
    };

    info!(
        path = %import_path.display(),
        rows = import_frame.height(),
        unmatched_written = unmatched_path.is_some(),
        "outputs written"
    );
    Ok(WrittenOutputs {
        import_path,
        unmatched_path,
    })
}

fn write_temp(
    dir: &Path,
    target: &Path,
    frame: &mut DataFrame,
    separator: u8,
) -> Result<NamedTempFile, OutputError> {
    let mut temp = NamedTempFile::new_in(dir).map_err(|source| OutputError::io(dir, source))?;
    CsvWriter::new(temp.as_file_mut())
        .include_header(true)
        .with_separator(separator)
        .finish(frame)
        .map_err(|source| OutputError::Csv {
            path: target.to_path_buf(),
            source,
        })?;
    temp.as_file()
        .sync_all()
        .map_err(|source| OutputError::io(target, source))?;
    Ok(temp)
}

fn remove_stale_report(path: &Path) -> Result<(), OutputError> {
    match fs::remove_file(path) {
        Ok(()) => {
            info!(path = %path.display(), "removed inconsistency report of an earlier run");
            Ok(())
        }
        Err(error) if error.kind() == io::ErrorKind::NotFound => Ok(()),
        Err(source) => Err(OutputError::io(path, source)),
    }
}

fn persist(temp: NamedTempFile, target: &Path) -> Result<(), OutputError> {
    temp.persist(target)
        .map(|_| ())
        .map_err(|error| OutputError::io(target, error.error))
}
