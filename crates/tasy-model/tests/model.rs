//! Tests for tasy-model types.

use tasy_model::{ExamCategory, ExamCode, ExamDefinition, FacilityMode, Protocol, RunOptions};

fn hemoglobin() -> ExamDefinition {
    ExamDefinition {
        code: ExamCode::from_tasy_code("1001").unwrap(),
        display_name: "Hemoglobina".to_string(),
        category: ExamCategory::Basic,
        source_aliases: vec!["hb".to_string(), "C_Hb".to_string()],
    }
}

#[test]
fn exam_definition_serializes_with_config_spelling() {
    let json = serde_json::to_value(hemoglobin()).expect("serialize exam");
    assert_eq!(json["code"], "NR_EXAME_1001");
    assert_eq!(json["category"], "basico");
}

#[test]
fn category_deserializes_aliases() {
    let basic: ExamCategory = serde_json::from_str("\"basic\"").unwrap();
    let supp: ExamCategory = serde_json::from_str("\"resultados2\"").unwrap();
    assert_eq!(basic, ExamCategory::Basic);
    assert_eq!(supp, ExamCategory::Supplementary);
}

#[test]
fn search_covers_code_name_and_aliases() {
    let exam = hemoglobin();
    assert!(exam.matches_search("1001"));
    assert!(exam.matches_search("hemo"));
    assert!(exam.matches_search("c_hb"));
    assert!(exam.matches_search(""));
    assert!(!exam.matches_search("glicose"));
}

#[test]
fn run_options_round_trip() {
    let options = RunOptions::new(
        Protocol::Semestral,
        FacilityMode::Fixed {
            name: "MATRIZ".to_string(),
            code: 1,
        },
    );
    let json = serde_json::to_string(&options).expect("serialize options");
    let round: RunOptions = serde_json::from_str(&json).expect("deserialize options");
    assert_eq!(round, options);
    assert!(json.contains("SEMESTRAL"));
}
