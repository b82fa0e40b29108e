//! Alias resolution.

use std::collections::BTreeSet;

use tracing::debug;

use tasy_config::TasyConfig;
use tasy_model::ExamCategory;

use crate::types::{ExamBinding, ExamColumnMap};

/// Binds each exam of `category` to the first of its aliases present in
/// `columns`.
///
/// Aliases are compared exactly, in the order the catalog declares them;
/// the table's own column order plays no part. Exams with no alias present
/// are listed as unbound.
pub fn map_exam_columns<S>(
    columns: &[S],
    category: ExamCategory,
    config: &TasyConfig,
) -> ExamColumnMap
where
    S: AsRef<str>,
{
    let present: BTreeSet<&str> = columns.iter().map(AsRef::as_ref).collect();
    let mut bindings = Vec::new();
    let mut unbound = Vec::new();
    for exam in config.exams_in(category) {
        let alias = exam
            .source_aliases
            .iter()
            .find(|alias| present.contains(alias.as_str()));
        match alias {
            Some(alias) => bindings.push(ExamBinding {
                code: exam.code.clone(),
                source_column: alias.clone(),
            }),
            None => unbound.push(exam.code.clone()),
        }
    }
    debug!(
        category = %category,
        bound = bindings.len(),
        unbound = unbound.len(),
        "exam columns mapped"
    );
    ExamColumnMap {
        category,
        bindings,
        unbound,
    }
}
