use std::path::Path;

use tasy_cli::reference::{exam_reference, facility_reference};
use tasy_config::{TasyConfig, parse_config};

const CONFIG: &str = r#"{
    "exames": [
        {"codigo_tasy": 30, "nome": "Ureia", "categoria": "basico", "colunas_lab": ["ureia", "UR"]},
        {"codigo_tasy": 12, "nome": "Hemoglobina", "categoria": "basico", "colunas_lab": ["hb", "HB", "C_Hb"]},
        {"codigo_tasy": 25, "nome": "Ferritina", "categoria": "resultados2", "colunas_lab": ["ferritina"]}
    ],
    "estabelecimentos": {"FILIAL": 9, "MATRIZ": 1}
}"#;

fn config() -> TasyConfig {
    parse_config(CONFIG, Path::new("inline.json")).expect("config")
}

fn render(config: &TasyConfig, search: Option<&str>) -> String {
    exam_reference(config, search)
        .iter()
        .map(|row| format!("{} | {} | {}", row.tasy_code, row.name, row.lab_columns))
        .collect::<Vec<_>>()
        .join("\n")
}

#[test]
fn exam_listing_is_sorted_by_code() {
    insta::assert_snapshot!(render(&config(), None), @r"
    12 | Hemoglobina | hb, HB, C_Hb
    25 | Ferritina | ferritina
    30 | Ureia | ureia, UR
    ");
}

#[test]
fn exam_search_matches_aliases_and_names() {
    insta::assert_snapshot!(render(&config(), Some("c_hb")), @"12 | Hemoglobina | hb, HB, C_Hb");
    insta::assert_snapshot!(render(&config(), Some("ferr")), @"25 | Ferritina | ferritina");
    assert_eq!(render(&config(), Some("nothing")), "");
}

#[test]
fn facilities_are_listed_by_code() {
    let config = config();
    let codes: Vec<i64> = facility_reference(&config)
        .iter()
        .map(|facility| facility.code)
        .collect();
    assert_eq!(codes, vec![1, 9]);
}
