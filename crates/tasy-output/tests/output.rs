use std::collections::BTreeSet;
use std::fs;

use chrono::NaiveDate;
use polars::prelude::DataType;

use tasy_core::UnmatchedReport;
use tasy_model::{ExamCode, FacilityMode, OutputRow, OutputSchema, Protocol};
use tasy_output::{
    OutputOptions, UNMATCHED_FILE_NAME, build_output_frame, build_unmatched_frame,
    output_file_name, write_outputs,
};

fn code(raw: &str) -> ExamCode {
    ExamCode::from_tasy_code(raw).unwrap()
}

fn schema() -> OutputSchema {
    OutputSchema::new(vec![code("20"), code("10")])
}

fn rows() -> Vec<OutputRow> {
    vec![
        OutputRow {
            patient_name: Some("Ana Silva".to_string()),
            visit_id: 1001,
            result_timestamp: Some("01/01/2024 10:00:00".to_string()),
            protocol: Protocol::Mensal,
            facility_code: 1,
            exam_values: vec![Some(7.0), None],
        },
        OutputRow {
            patient_name: None,
            visit_id: 1002,
            result_timestamp: None,
            protocol: Protocol::Mensal,
            facility_code: 1,
            exam_values: vec![None, Some(12.5)],
        },
    ]
}

fn fixed() -> FacilityMode {
    FacilityMode::Fixed {
        name: "MATRIZ".to_string(),
        code: 1,
    }
}

fn options(dir: &std::path::Path) -> OutputOptions {
    OutputOptions {
        output_dir: dir.to_path_buf(),
        separator: b',',
        generated_at: NaiveDate::from_ymd_opt(2024, 5, 10)
            .unwrap()
            .and_hms_opt(14, 3, 9)
            .unwrap(),
    }
}

fn report(names: &[&str]) -> UnmatchedReport {
    UnmatchedReport {
        names: names.iter().map(|n| (*n).to_string()).collect::<BTreeSet<_>>(),
        row_count: names.len(),
    }
}

#[test]
fn frame_has_fixed_columns_then_exams_with_types() {
    let df = build_output_frame(&rows(), &schema()).unwrap();
    let names: Vec<&str> = df
        .get_column_names()
        .iter()
        .map(|name| name.as_str())
        .collect();
    assert_eq!(
        names,
        vec![
            "NM_PACIENTE",
            "NR_ATENDIMENTO",
            "DT_RESULTADO",
            "DS_PROTOCOLO",
            "CD_ESTABELECIMENTO",
            "NR_EXAME_20",
            "NR_EXAME_10",
        ]
    );
    assert_eq!(df.height(), 2);
    assert_eq!(df.column("NR_ATENDIMENTO").unwrap().dtype(), &DataType::Int64);
    assert_eq!(df.column("CD_ESTABELECIMENTO").unwrap().dtype(), &DataType::Int64);
    assert_eq!(df.column("NR_EXAME_10").unwrap().dtype(), &DataType::Float64);
    let visits = df.column("NR_ATENDIMENTO").unwrap().i64().unwrap();
    assert_eq!(visits.get(1), Some(1002));
    let exam = df.column("NR_EXAME_10").unwrap().f64().unwrap();
    assert_eq!(exam.get(0), None);
    assert_eq!(exam.get(1), Some(12.5));
    let protocol = df.column("DS_PROTOCOLO").unwrap().str().unwrap();
    assert_eq!(protocol.get(0), Some("MENSAL"));
}

#[test]
fn empty_run_still_has_every_column() {
    let df = build_output_frame(&[], &schema()).unwrap();
    assert_eq!(df.width(), 7);
    assert_eq!(df.height(), 0);
}

#[test]
fn unmatched_frame_is_sorted() {
    let df = build_unmatched_frame(&report(&["Zeca", "Carlos Souza"])).unwrap();
    let names = df.column("Paciente").unwrap().str().unwrap();
    assert_eq!(names.get(0), Some("Carlos Souza"));
    assert_eq!(names.get(1), Some("Zeca"));
}

#[test]
fn file_name_carries_facility_and_stamp() {
    let stamp = options(std::path::Path::new(".")).generated_at;
    assert_eq!(
        output_file_name(&fixed(), stamp),
        "Planilha_Importacao_TASY_MATRIZ_20240510_140309.csv"
    );
    assert_eq!(
        output_file_name(&FacilityMode::PerRow, stamp),
        "Planilha_Importacao_TASY_POR_SETOR_20240510_140309.csv"
    );
}

#[test]
fn writes_both_files() {
    let dir = tempfile::tempdir().expect("temp dir");
    let written = write_outputs(
        &options(dir.path()),
        &fixed(),
        &rows(),
        &schema(),
        &report(&["Carlos Souza"]),
    )
    .expect("write outputs");

    let import = fs::read_to_string(&written.import_path).expect("read import");
    let mut lines = import.lines();
    assert_eq!(
        lines.next(),
        Some(
            "NM_PACIENTE,NR_ATENDIMENTO,DT_RESULTADO,DS_PROTOCOLO,CD_ESTABELECIMENTO,NR_EXAME_20,NR_EXAME_10"
        )
    );
    assert!(lines.next().unwrap().starts_with("Ana Silva,1001,01/01/2024 10:00:00,MENSAL,1,"));

    let unmatched_path = written.unmatched_path.expect("unmatched report");
    assert_eq!(unmatched_path, dir.path().join(UNMATCHED_FILE_NAME));
    let report = fs::read_to_string(unmatched_path).expect("read report");
    assert_eq!(report.lines().collect::<Vec<_>>(), vec!["Paciente", "Carlos Souza"]);

    let leftovers = fs::read_dir(dir.path()).unwrap().count();
    assert_eq!(leftovers, 2);
}

#[test]
fn no_report_without_unmatched_rows() {
    let dir = tempfile::tempdir().expect("temp dir");
    let mut options = options(&dir.path().join("nested"));
    options.separator = b';';
    let written = write_outputs(&options, &fixed(), &rows(), &schema(), &report(&[]))
        .expect("write outputs");
    assert!(written.unmatched_path.is_none());
    let import = fs::read_to_string(&written.import_path).expect("read import");
    assert!(import.starts_with("NM_PACIENTE;NR_ATENDIMENTO;"));
}

#[test]
fn blank_named_unmatched_rows_write_no_report() {
    let dir = tempfile::tempdir().expect("temp dir");
    let blank_only = UnmatchedReport {
        names: BTreeSet::new(),
        row_count: 2,
    };
    let written = write_outputs(&options(dir.path()), &fixed(), &rows(), &schema(), &blank_only)
        .expect("write outputs");
    assert!(written.unmatched_path.is_none());
    assert!(!dir.path().join(UNMATCHED_FILE_NAME).exists());
}

#[test]
fn earlier_report_is_removed_when_nothing_is_unmatched() {
    let dir = tempfile::tempdir().expect("temp dir");
    let stale = dir.path().join(UNMATCHED_FILE_NAME);
    fs::write(&stale, "Paciente\nCarlos Souza\n").expect("write earlier report");
    let written = write_outputs(&options(dir.path()), &fixed(), &rows(), &schema(), &report(&[]))
        .expect("write outputs");
    assert!(written.unmatched_path.is_none());
    assert!(!stale.exists());
    assert!(written.import_path.exists());
}

#[test]
fn facility_name_with_path_separators_stays_in_output_dir() {
    let dir = tempfile::tempdir().expect("temp dir");
    let facility = FacilityMode::Fixed {
        name: "UTI/ADULTO".to_string(),
        code: 3,
    };
    let written = write_outputs(&options(dir.path()), &facility, &rows(), &schema(), &report(&[]))
        .expect("write outputs");
    assert_eq!(written.import_path.parent(), Some(dir.path()));
    assert_eq!(
        written.import_path.file_name().and_then(|name| name.to_str()),
        Some("Planilha_Importacao_TASY_UTI_ADULTO_20240510_140309.csv")
    );
}
