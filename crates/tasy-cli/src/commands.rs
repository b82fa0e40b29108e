use std::path::Path;
use std::time::Instant;

use anyhow::{Context, Result};
use chrono::Local;
use comfy_table::{Cell, CellAlignment, Table};
use tracing::{info, info_span};

use tasy_cli::pipeline::{ImportRequest, run_import, select_facility};
use tasy_cli::reference::{exam_reference, facility_reference};
use tasy_cli::types::ImportResult;
use tasy_config::{TasyConfig, load_config, resolve_config_path};
use tasy_model::RunOptions;
use tasy_output::OutputOptions;

use crate::cli::{ExamsArgs, RunArgs};
use crate::summary::{apply_table_style, dim_cell, header_cell};

fn load(config_path: Option<&Path>) -> Result<TasyConfig> {
    let path = resolve_config_path(config_path);
    let span = info_span!("load_config", path = %path.display());
    let _guard = span.enter();
    let start = Instant::now();
    let config = load_config(&path).context("load configuration")?;
    info!(
        duration_ms = start.elapsed().as_millis(),
        "load_config complete"
    );
    Ok(config)
}

pub fn run_import_command(args: &RunArgs, config_path: Option<&Path>) -> Result<ImportResult> {
    let config = load(config_path)?;
    let facility = select_facility(
        &config,
        args.facility.as_deref(),
        args.facility_from_sector,
    )?;
    let request = ImportRequest {
        basic: args.basic.clone(),
        supplementary: args.supplementary.clone(),
        patients: args.patients.clone(),
        options: RunOptions::new(args.protocol.into(), facility),
        output: (!args.dry_run).then(|| OutputOptions {
            output_dir: args.output_dir.clone(),
            separator: args.separator,
            generated_at: Local::now().naive_local(),
        }),
    };
    run_import(&config, &request)
}

pub fn run_exams(args: &ExamsArgs, config_path: Option<&Path>) -> Result<()> {
    let config = load(config_path)?;
    let rows = exam_reference(&config, args.search.as_deref());
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("TASY code"),
        header_cell("Exam"),
        header_cell("Lab columns"),
    ]);
    apply_table_style(&mut table);
    for row in &rows {
        table.add_row(vec![
            Cell::new(&row.tasy_code),
            Cell::new(&row.name),
            dim_cell(&row.lab_columns),
        ]);
    }
    println!("{table}");
    println!("Shown {} of {} exams", rows.len(), config.exams().len());
    Ok(())
}

pub fn run_facilities(config_path: Option<&Path>) -> Result<()> {
    let config = load(config_path)?;
    let mut table = Table::new();
    table.set_header(vec![header_cell("Code"), header_cell("Facility")]);
    apply_table_style(&mut table);
    if let Some(column) = table.column_mut(0) {
        column.set_cell_alignment(CellAlignment::Right);
    }
    for facility in facility_reference(&config) {
        table.add_row(vec![Cell::new(facility.code), Cell::new(facility.name.trim())]);
    }
    println!("{table}");
    Ok(())
}
