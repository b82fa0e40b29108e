use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use tasy_cli::logging::log_data_enabled;
use tasy_cli::types::ImportResult;
use tasy_model::FacilityMode;

pub fn print_summary(result: &ImportResult) {
    let outcome = &result.outcome;
    let mut table = Table::new();
    table.set_header(vec![header_cell("Item"), header_cell("Value")]);
    apply_summary_table_style(&mut table);
    table.add_row(vec![
        Cell::new("Config"),
        Cell::new(format!(
            "v{} ({})",
            result.config_version.as_deref().unwrap_or("N/A"),
            result.config_updated.as_deref().unwrap_or("N/A")
        )),
    ]);
    table.add_row(vec![Cell::new("Facility"), facility_cell(&result.options.facility)]);
    table.add_row(vec![
        Cell::new("Protocol"),
        Cell::new(result.options.protocol.label()),
    ]);
    table.add_row(vec![
        Cell::new("Total records"),
        Cell::new(outcome.rows.len()).add_attribute(Attribute::Bold),
    ]);
    table.add_row(vec![
        Cell::new("Inconsistencies"),
        count_cell(outcome.unmatched.row_count, Color::Yellow),
    ]);
    table.add_row(vec![
        Cell::new("Dropped (no visit)"),
        count_cell(outcome.stats.dropped_records, Color::Yellow),
    ]);
    if outcome.stats.registry_duplicates > 0 {
        table.add_row(vec![
            Cell::new("Registry duplicates"),
            count_cell(outcome.stats.registry_duplicates, Color::Yellow),
        ]);
    }
    match &result.written {
        Some(written) => {
            table.add_row(vec![
                Cell::new("Import table"),
                Cell::new(written.import_path.display()),
            ]);
            table.add_row(vec![
                Cell::new("Inconsistency report"),
                match &written.unmatched_path {
                    Some(path) => Cell::new(path.display()),
                    None => dim_cell("-"),
                },
            ]);
        }
        None => {
            table.add_row(vec![Cell::new("Output"), dim_cell("dry run, nothing written")]);
        }
    }
    align_column(&mut table, 0, CellAlignment::Left);
    println!("{table}");

    if !outcome.suggestions.is_empty() {
        print_suggestions(result);
    }
    if !outcome.unmatched.is_empty() {
        println!();
        if log_data_enabled() {
            println!("Patients not found in the registry:");
            for name in &outcome.unmatched.names {
                println!("  - {name}");
            }
        } else {
            println!(
                "{} distinct patient(s) not found in the registry (use --log-data to list them)",
                outcome.unmatched.names.len()
            );
        }
    }
}

fn print_suggestions(result: &ImportResult) {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Exam"),
        header_cell("Alias"),
        header_cell("Lab column"),
        header_cell("Similarity"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 3, CellAlignment::Right);
    for suggestion in &result.outcome.suggestions {
        table.add_row(vec![
            Cell::new(suggestion.code.as_str()),
            Cell::new(&suggestion.alias),
            Cell::new(&suggestion.source_column).fg(Color::Yellow),
            Cell::new(format!("{:.2}", suggestion.score)),
        ]);
    }
    println!();
    println!("Possible aliases (not used):");
    println!("{table}");
}

fn facility_cell(mode: &FacilityMode) -> Cell {
    match mode {
        FacilityMode::Fixed { name, code } => Cell::new(format!("{name} (code {code})")),
        FacilityMode::PerRow => Cell::new("per row, from requesting sector"),
    }
}

fn count_cell(count: usize, color: Color) -> Cell {
    if count > 0 {
        Cell::new(count).fg(color).add_attribute(Attribute::Bold)
    } else {
        dim_cell(count)
    }
}

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn apply_summary_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

pub fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

pub fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
