//! Outer join of the basic and supplementary sources.

use std::cmp::Ordering;
use std::collections::BTreeMap;

use tasy_model::{ExamCategory, JoinKey, ReconciledRecord};
use tasy_transform::parse_timestamp;

/// Merges two preprocessed sources on (normalized name, result timestamp).
///
/// Without a supplementary source the basic records pass through untouched.
/// Otherwise every key of either side appears in the result: keys found on
/// both sides produce one record per pair of rows (basic rows outermost),
/// one-sided keys keep their rows as they are. Keys are ordered by name and
/// then chronologically; see [`compare_keys`].
pub fn merge_sources(
    basic: Vec<ReconciledRecord>,
    supplementary: Option<Vec<ReconciledRecord>>,
) -> Vec<ReconciledRecord> {
    let Some(supplementary) = supplementary else {
        return basic;
    };

    let mut groups: BTreeMap<JoinKey, (Vec<ReconciledRecord>, Vec<ReconciledRecord>)> =
        BTreeMap::new();
    for record in basic {
        groups.entry(record.join_key()).or_default().0.push(record);
    }
    for record in supplementary {
        groups.entry(record.join_key()).or_default().1.push(record);
    }

    let mut groups: Vec<(JoinKey, (Vec<ReconciledRecord>, Vec<ReconciledRecord>))> =
        groups.into_iter().collect();
    groups.sort_by(|(a, _), (b, _)| compare_keys(a, b));

    let mut merged = Vec::new();
    for (_, (left, right)) in groups {
        match (left.is_empty(), right.is_empty()) {
            (false, false) => {
                for basic_record in &left {
                    for supplementary_record in &right {
                        merged.push(combine(basic_record, supplementary_record));
                    }
                }
            }
            (false, true) => merged.extend(left),
            (true, _) => merged.extend(right),
        }
    }
    merged
}

/// Join key order: name, then parsed timestamp. Timestamps that do not
/// parse sort after those that do, by text; missing timestamps sort last.
pub fn compare_keys(a: &JoinKey, b: &JoinKey) -> Ordering {
    a.normalized_name
        .cmp(&b.normalized_name)
        .then_with(|| compare_timestamps(a.result_timestamp.as_deref(), b.result_timestamp.as_deref()))
}

fn compare_timestamps(a: Option<&str>, b: Option<&str>) -> Ordering {
    match (a, b) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Greater,
        (Some(_), None) => Ordering::Less,
        (Some(a), Some(b)) => match (parse_timestamp(a), parse_timestamp(b)) {
            (Some(x), Some(y)) => x.cmp(&y).then_with(|| a.cmp(b)),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => a.cmp(b),
        },
    }
}

/// Basic side wins for name, visit and facility; exam values are unioned.
fn combine(basic: &ReconciledRecord, supplementary: &ReconciledRecord) -> ReconciledRecord {
    let mut exam_values = basic.exam_values.clone();
    for (code, value) in &supplementary.exam_values {
        exam_values.entry(code.clone()).or_insert(*value);
    }
    ReconciledRecord {
        display_name: basic
            .display_name
            .clone()
            .or_else(|| supplementary.display_name.clone()),
        normalized_name: basic.normalized_name.clone(),
        visit_id: basic
            .visit_id
            .clone()
            .or_else(|| supplementary.visit_id.clone()),
        facility_code: basic.facility_code.or(supplementary.facility_code),
        result_timestamp: basic.result_timestamp.clone(),
        exam_values,
        category: ExamCategory::Basic,
    }
}
