use std::fs;
use std::path::Path;

use tasy_ingest::{IngestError, read_csv_table, read_csv_table_from_reader};

#[test]
fn reads_semicolon_export_with_bom() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("basico.csv");
    fs::write(
        &path,
        "\u{feff} Nome ;DTHR_OS;hb\nAna Silva;01/01/2024 10:00:00;12,5\n;;\nCarlos;;\n",
    )
    .expect("write table");

    let table = read_csv_table(&path).expect("read table");
    assert_eq!(table.headers, vec!["Nome", "DTHR_OS", "hb"]);
    assert_eq!(table.row_count(), 2);
    assert_eq!(table.cell(0, 2), Some("12,5"));
    assert_eq!(table.cell(1, 0), Some("Carlos"));
    assert_eq!(table.cell(1, 1), None);
    assert_eq!(table.column_index("hb"), Some(2));
    assert_eq!(table.column_index("HB"), None);
}

#[test]
fn leading_blank_lines_are_skipped_and_cells_keep_spaces() {
    let table = read_csv_table_from_reader(
        b"\n , \nnome,atendimento\n Ana ,123\n",
        Path::new("inline.csv"),
    )
    .expect("read table");
    assert_eq!(table.headers, vec!["nome", "atendimento"]);
    assert_eq!(table.cell(0, 0), Some(" Ana "));
    assert_eq!(table.cell(0, 1), Some("123"));
}

#[test]
fn short_rows_are_padded() {
    let table = read_csv_table_from_reader(b"a,b,c\n1\n1,2,3,4\n", Path::new("inline.csv"))
        .expect("read table");
    assert_eq!(table.rows[0], vec!["1", "", ""]);
    assert_eq!(table.rows[1], vec!["1", "2", "3"]);
}

#[test]
fn latin1_names_are_decoded() {
    let mut data = b"nome;atendimento\n".to_vec();
    data.extend_from_slice(&[0x4A, 0x6F, 0xE3, 0x6F]);
    data.extend_from_slice(b";42\n");
    let table = read_csv_table_from_reader(&data, Path::new("latin1.csv")).expect("read table");
    assert_eq!(table.cell(0, 0), Some("João"));
}

#[test]
fn empty_input_yields_empty_table() {
    let table = read_csv_table_from_reader(b"", Path::new("empty.csv")).expect("read table");
    assert!(table.headers.is_empty());
    assert!(table.is_empty());
}

#[test]
fn missing_file_reports_path() {
    let dir = tempfile::tempdir().expect("temp dir");
    let error = read_csv_table(&dir.path().join("absent.csv")).unwrap_err();
    assert!(matches!(error, IngestError::Io { .. }));
    assert!(error.to_string().contains("absent.csv"));
}
