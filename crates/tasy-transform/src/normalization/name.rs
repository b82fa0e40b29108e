//! Patient name normalization.

/// Join-key form of a patient name.
///
/// Trims, lowercases and replaces each non-overlapping double space with a
/// single one. The replacement runs once, so a run of three spaces keeps two;
/// existing output files were produced this way and keys must stay stable.
/// A missing name yields the empty string.
pub fn normalize_name(value: Option<&str>) -> String {
    match value {
        Some(raw) => raw.trim().to_lowercase().replace("  ", " "),
        None => String::new(),
    }
}
