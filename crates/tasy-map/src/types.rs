//! Exam column mapping types.

use serde::{Deserialize, Serialize};

use tasy_model::{ExamCategory, ExamCode};

/// A canonical exam bound to the source column that carries its value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExamBinding {
    pub code: ExamCode,
    /// Header exactly as it appears in the source table.
    pub source_column: String,
}

/// Result of mapping one source table's headers for one category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExamColumnMap {
    pub category: ExamCategory,
    /// Bound exams in catalog declaration order.
    pub bindings: Vec<ExamBinding>,
    /// Exams of the category with no alias present in the table.
    pub unbound: Vec<ExamCode>,
}

impl ExamColumnMap {
    /// Source column bound to `code`, if any.
    pub fn source_column(&self, code: &ExamCode) -> Option<&str> {
        self.bindings
            .iter()
            .find(|binding| &binding.code == code)
            .map(|binding| binding.source_column.as_str())
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}

/// A source column that looks like an unbound exam's alias.
///
/// Diagnostics only: suggestions are never bound automatically.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AliasSuggestion {
    pub code: ExamCode,
    /// Configured alias the column resembles.
    pub alias: String,
    pub source_column: String,
    /// Jaro-Winkler similarity of the normalized texts (0.0 to 1.0).
    pub score: f64,
}
