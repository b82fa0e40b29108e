//! Exam catalog types.
//!
//! An exam is identified downstream by its canonical code, which is the
//! numeric TASY exam code prefixed with [`EXAM_CODE_PREFIX`]. Lab sources
//! name the same exam with many different column headers; those headers are
//! kept as an ordered alias list on each [`ExamDefinition`].

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{ModelError, Result};

/// Namespace tag carried by every canonical exam code.
pub const EXAM_CODE_PREFIX: &str = "NR_EXAME_";

/// Canonical exam code (e.g. `NR_EXAME_1234`).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ExamCode(String);

impl ExamCode {
    /// Builds a canonical code from a raw TASY exam code.
    ///
    /// The raw code is trimmed and must be non-empty and made of ASCII
    /// alphanumerics, so the resulting header is a safe column name.
    pub fn from_tasy_code(raw: &str) -> Result<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() || !trimmed.chars().all(|ch| ch.is_ascii_alphanumeric()) {
            return Err(ModelError::InvalidExamCode(raw.to_string()));
        }
        Ok(Self(format!("{EXAM_CODE_PREFIX}{trimmed}")))
    }

    /// Parses an already-prefixed canonical code.
    pub fn parse(canonical: &str) -> Result<Self> {
        let trimmed = canonical.trim();
        match trimmed.strip_prefix(EXAM_CODE_PREFIX) {
            Some(tail) => Self::from_tasy_code(tail),
            None => Err(ModelError::InvalidExamCode(canonical.to_string())),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The TASY code without the namespace tag.
    pub fn tasy_code(&self) -> &str {
        self.0.strip_prefix(EXAM_CODE_PREFIX).unwrap_or(&self.0)
    }
}

impl fmt::Display for ExamCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Which lab source table carries an exam.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ExamCategory {
    /// Basic exam results (required source).
    #[serde(rename = "basico", alias = "basic", alias = "BASIC")]
    Basic,
    /// Supplementary results (optional source).
    #[serde(rename = "resultados2", alias = "supplementary", alias = "SUPPLEMENTARY")]
    Supplementary,
}

impl ExamCategory {
    /// Configuration spelling of the category.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Basic => "basico",
            Self::Supplementary => "resultados2",
        }
    }

    /// Short human label used in logs and summaries.
    pub fn label(self) -> &'static str {
        match self {
            Self::Basic => "basic",
            Self::Supplementary => "supplementary",
        }
    }
}

impl fmt::Display for ExamCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for ExamCategory {
    type Err = ModelError;

    fn from_str(value: &str) -> Result<Self> {
        match value.trim().to_lowercase().as_str() {
            "basico" | "basic" => Ok(Self::Basic),
            "resultados2" | "supplementary" => Ok(Self::Supplementary),
            _ => Err(ModelError::UnknownCategory(value.to_string())),
        }
    }
}

/// One exam of the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExamDefinition {
    pub code: ExamCode,
    pub display_name: String,
    pub category: ExamCategory,
    /// Source column names that may carry this exam, in priority order.
    pub source_aliases: Vec<String>,
}

impl ExamDefinition {
    /// Returns true when `text` occurs (case-insensitively) in the code,
    /// the display name or any alias.
    pub fn matches_search(&self, text: &str) -> bool {
        let needle = text.trim().to_lowercase();
        if needle.is_empty() {
            return true;
        }
        self.code.tasy_code().to_lowercase().contains(&needle)
            || self.display_name.to_lowercase().contains(&needle)
            || self
                .source_aliases
                .iter()
                .any(|alias| alias.to_lowercase().contains(&needle))
    }
}
