//! Near-miss alias diagnostics.

use std::collections::BTreeSet;

use rapidfuzz::distance::jaro_winkler::similarity as jaro_similarity;

use tasy_config::TasyConfig;

use crate::types::{AliasSuggestion, ExamColumnMap};
use crate::utils::normalize_text;

/// Minimum similarity for a column to be reported as a possible alias.
pub const SUGGESTION_THRESHOLD: f64 = 0.92;

/// Finds source columns that closely resemble an alias of an unbound exam.
///
/// Columns already bound to some exam are skipped. At most one suggestion is
/// made per exam: the best-scoring column. Ties keep the earlier alias,
/// then the earlier column.
pub fn suggest_aliases<S>(
    columns: &[S],
    map: &ExamColumnMap,
    config: &TasyConfig,
) -> Vec<AliasSuggestion>
where
    S: AsRef<str>,
{
    let bound: BTreeSet<&str> = map
        .bindings
        .iter()
        .map(|binding| binding.source_column.as_str())
        .collect();
    let candidates: Vec<(&str, String)> = columns
        .iter()
        .map(AsRef::as_ref)
        .filter(|column| !bound.contains(column))
        .map(|column| (column, normalize_text(column)))
        .collect();

    let mut suggestions = Vec::new();
    for code in &map.unbound {
        let Some(exam) = config.exam(code) else {
            continue;
        };
        let mut best: Option<AliasSuggestion> = None;
        for alias in &exam.source_aliases {
            let normalized_alias = normalize_text(alias);
            for (column, normalized_column) in &candidates {
                let score = jaro_similarity(normalized_alias.chars(), normalized_column.chars());
                if score < SUGGESTION_THRESHOLD {
                    continue;
                }
                if best.as_ref().is_none_or(|current| score > current.score) {
                    best = Some(AliasSuggestion {
                        code: code.clone(),
                        alias: alias.clone(),
                        source_column: (*column).to_string(),
                        score,
                    });
                }
            }
        }
        suggestions.extend(best);
    }
    suggestions
}
