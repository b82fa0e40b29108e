//! Validated, immutable run configuration.

use std::collections::{BTreeMap, BTreeSet};

use serde_json::Value;
use tracing::warn;

use tasy_model::{
    ExamCategory, ExamCode, ExamDefinition, FIXED_OUTPUT_COLUMNS, FacilityCatalog, OutputSchema,
};

use crate::document::{ConfigDocument, scalar_text};
use crate::error::ConfigError;

/// Exam catalog plus facility catalog, loaded once and shared by reference
/// with every run.
#[derive(Debug, Clone)]
pub struct TasyConfig {
    exams: Vec<ExamDefinition>,
    facilities: FacilityCatalog,
    output_schema: OutputSchema,
    version: Option<String>,
    last_updated: Option<String>,
}

impl TasyConfig {
    /// Validates a parsed document.
    pub fn from_document(document: ConfigDocument) -> Result<Self, ConfigError> {
        let mut exams = Vec::with_capacity(document.exams.len());
        let mut seen = BTreeSet::new();
        for entry in document.exams {
            let raw_code = scalar_text(&entry.tasy_code).ok_or_else(|| {
                ConfigError::invalid(format!(
                    "exam {:?} has a non-scalar tasy_code: {}",
                    entry.name, entry.tasy_code
                ))
            })?;
            let code = ExamCode::from_tasy_code(&raw_code)?;
            if !seen.insert(code.clone()) {
                return Err(ConfigError::DuplicateExamCode {
                    code: code.to_string(),
                });
            }
            if entry.lab_columns.is_empty() {
                return Err(ConfigError::NoAliases {
                    code: code.to_string(),
                });
            }
            exams.push(ExamDefinition {
                code,
                display_name: entry.name.trim().to_string(),
                category: entry.category,
                source_aliases: entry.lab_columns,
            });
        }
        warn_on_alias_overlap(&exams);

        if document.estabelecimentos.is_empty() {
            return Err(ConfigError::invalid("no facilities configured"));
        }
        let mut facility_entries = Vec::with_capacity(document.estabelecimentos.len());
        for (name, value) in &document.estabelecimentos {
            facility_entries.push((name.clone(), facility_code(name, value)?));
        }
        let facilities = FacilityCatalog::new(facility_entries)?;

        let exam_columns = match &document.ordem_colunas_tasy {
            Some(order) => exam_columns_from_order(order)?,
            None => exams.iter().map(|exam| exam.code.clone()).collect(),
        };

        Ok(Self {
            exams,
            facilities,
            output_schema: OutputSchema::new(exam_columns),
            version: document.versao.as_ref().and_then(scalar_text),
            last_updated: document.ultima_atualizacao,
        })
    }

    /// All exams in declaration order.
    pub fn exams(&self) -> &[ExamDefinition] {
        &self.exams
    }

    /// Exams of one category in declaration order.
    pub fn exams_in(&self, category: ExamCategory) -> impl Iterator<Item = &ExamDefinition> {
        self.exams
            .iter()
            .filter(move |exam| exam.category == category)
    }

    pub fn exam(&self, code: &ExamCode) -> Option<&ExamDefinition> {
        self.exams.iter().find(|exam| &exam.code == code)
    }

    pub fn facilities(&self) -> &FacilityCatalog {
        &self.facilities
    }

    pub fn output_schema(&self) -> &OutputSchema {
        &self.output_schema
    }

    pub fn version(&self) -> Option<&str> {
        self.version.as_deref()
    }

    pub fn last_updated(&self) -> Option<&str> {
        self.last_updated.as_deref()
    }
}

fn facility_code(name: &str, value: &Value) -> Result<i64, ConfigError> {
    let invalid = || ConfigError::InvalidFacilityCode {
        name: name.to_string(),
        value: value.to_string(),
    };
    let code = match value {
        Value::Number(number) => number.as_i64().ok_or_else(invalid)?,
        Value::String(text) => text.trim().parse::<i64>().map_err(|_| invalid())?,
        _ => return Err(invalid()),
    };
    if code <= 0 {
        return Err(invalid());
    }
    Ok(code)
}

/// Exam columns from an explicit order list, skipping the fixed header
/// names the list usually starts with.
fn exam_columns_from_order(order: &[String]) -> Result<Vec<ExamCode>, ConfigError> {
    let mut columns = Vec::new();
    let mut seen = BTreeSet::new();
    for name in order {
        let trimmed = name.trim();
        if FIXED_OUTPUT_COLUMNS.contains(&trimmed) {
            continue;
        }
        let code = ExamCode::parse(trimmed)?;
        if seen.insert(code.clone()) {
            columns.push(code);
        }
    }
    Ok(columns)
}

fn warn_on_alias_overlap(exams: &[ExamDefinition]) {
    let mut owners: BTreeMap<(ExamCategory, &str), &ExamCode> = BTreeMap::new();
    for exam in exams {
        for alias in &exam.source_aliases {
            match owners.get(&(exam.category, alias.as_str())) {
                Some(owner) if *owner != &exam.code => {
                    warn!(
                        category = %exam.category,
                        alias = %alias,
                        first = %owner,
                        second = %exam.code,
                        "lab column alias shared by two exams; both read the same column"
                    );
                }
                Some(_) => {}
                None => {
                    owners.insert((exam.category, alias.as_str()), &exam.code);
                }
            }
        }
    }
}
