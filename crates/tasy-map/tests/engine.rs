use std::path::Path;

use tasy_config::{TasyConfig, parse_config};
use tasy_map::{ExamBinding, SUGGESTION_THRESHOLD, map_exam_columns, suggest_aliases};
use tasy_model::{ExamCategory, ExamCode};

const CONFIG: &str = r#"{
    "exams": [
        {"tasy_code": 1001, "name": "Hemoglobina", "category": "basico", "lab_columns": ["hb", "C_Hb"]},
        {"tasy_code": 1002, "name": "Glicose", "category": "basico", "lab_columns": ["glicose", "GLI"]},
        {"tasy_code": 1003, "name": "Creatinina", "category": "basico", "lab_columns": ["creatinina"]},
        {"tasy_code": 2001, "name": "Ferritina", "category": "resultados2", "lab_columns": ["ferritina", "hb"]}
    ],
    "estabelecimentos": {"MATRIZ": 1}
}"#;

fn config() -> TasyConfig {
    parse_config(CONFIG, Path::new("inline.json")).expect("config")
}

fn code(raw: &str) -> ExamCode {
    ExamCode::from_tasy_code(raw).unwrap()
}

#[test]
fn first_declared_alias_wins() {
    let columns = ["nome", "C_Hb", "hb"];
    let map = map_exam_columns(&columns, ExamCategory::Basic, &config());
    assert_eq!(map.source_column(&code("1001")), Some("hb"));
}

#[test]
fn falls_back_to_later_alias() {
    let columns = vec!["C_Hb".to_string(), "GLI".to_string()];
    let map = map_exam_columns(&columns, ExamCategory::Basic, &config());
    assert_eq!(
        map.bindings,
        vec![
            ExamBinding {
                code: code("1001"),
                source_column: "C_Hb".to_string(),
            },
            ExamBinding {
                code: code("1002"),
                source_column: "GLI".to_string(),
            },
        ]
    );
    assert_eq!(map.unbound, vec![code("1003")]);
}

#[test]
fn matching_is_exact_and_per_category() {
    let columns = ["HB", "ferritina", "hb"];
    let basic = map_exam_columns(&columns, ExamCategory::Basic, &config());
    assert_eq!(basic.source_column(&code("1001")), Some("hb"));
    assert_eq!(basic.source_column(&code("2001")), None);

    let supplementary = map_exam_columns(&columns, ExamCategory::Supplementary, &config());
    assert_eq!(supplementary.len(), 1);
    assert_eq!(supplementary.source_column(&code("2001")), Some("ferritina"));
}

#[test]
fn no_columns_binds_nothing() {
    let columns: [&str; 0] = [];
    let map = map_exam_columns(&columns, ExamCategory::Basic, &config());
    assert!(map.is_empty());
    assert_eq!(map.unbound.len(), 3);
}

#[test]
fn suggests_case_and_separator_variants() {
    let config = config();
    let columns = ["nome", "CREATININA", "Glicose ", "xyz"];
    let map = map_exam_columns(&columns, ExamCategory::Basic, &config);
    let suggestions = suggest_aliases(&columns, &map, &config);
    let pairs: Vec<(&str, &str)> = suggestions
        .iter()
        .map(|s| (s.code.as_str(), s.source_column.as_str()))
        .collect();
    assert_eq!(
        pairs,
        vec![
            ("NR_EXAME_1002", "Glicose "),
            ("NR_EXAME_1003", "CREATININA"),
        ]
    );
    assert!(suggestions.iter().all(|s| s.score >= SUGGESTION_THRESHOLD));
}

#[test]
fn bound_columns_are_not_suggested() {
    let config = config();
    let columns = ["hb", "glicose", "creatinina"];
    let map = map_exam_columns(&columns, ExamCategory::Basic, &config);
    assert!(suggest_aliases(&columns, &map, &config).is_empty());
}

#[test]
fn column_map_serializes_canonical_codes() {
    let map = map_exam_columns(&["GLI"], ExamCategory::Basic, &config());
    let json = serde_json::to_value(&map).expect("serialize map");
    assert_eq!(json["bindings"][0]["code"], "NR_EXAME_1002");
    assert_eq!(json["bindings"][0]["source_column"], "GLI");
    assert_eq!(json["unbound"].as_array().map(Vec::len), Some(2));
}
