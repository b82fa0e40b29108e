//! Raw JSON shape of the configuration document.
//!
//! Field names follow the historical Portuguese spelling, with English
//! aliases accepted on input.

use serde::Deserialize;
use serde_json::{Map, Value};

use tasy_model::ExamCategory;

#[derive(Debug, Clone, Deserialize)]
pub struct ConfigDocument {
    #[serde(alias = "exames")]
    pub exams: Vec<ExamEntry>,
    /// Facility name to code. Kept as a JSON object so declaration order
    /// survives parsing. Required: every output row needs a facility.
    #[serde(alias = "facilities")]
    pub estabelecimentos: Map<String, Value>,
    #[serde(default)]
    pub ordem_colunas_tasy: Option<Vec<String>>,
    #[serde(default)]
    pub versao: Option<Value>,
    #[serde(default)]
    pub ultima_atualizacao: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ExamEntry {
    /// Numeric or textual TASY code.
    #[serde(alias = "codigo_tasy")]
    pub tasy_code: Value,
    #[serde(alias = "nome")]
    pub name: String,
    #[serde(alias = "categoria")]
    pub category: ExamCategory,
    #[serde(alias = "colunas_lab")]
    pub lab_columns: Vec<String>,
}

/// Renders a scalar JSON value the way it would be typed by hand.
pub(crate) fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(text) => Some(text.clone()),
        Value::Number(number) => Some(number.to_string()),
        _ => None,
    }
}
