//! Numeric normalization.

/// Parses an exam value, accepting a decimal comma.
///
/// Empty, whitespace-only and unparseable input yields `None`, as does `NaN`.
pub fn normalize_numeric(value: Option<&str>) -> Option<f64> {
    let trimmed = value?.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed
        .replace(',', ".")
        .parse::<f64>()
        .ok()
        .filter(|number| !number.is_nan())
}

/// Coerces an identifier cell to an integer.
///
/// Accepts plain integers and integral floats such as `123.0`, the form
/// spreadsheet exports give to numeric identifier columns.
pub fn coerce_integer(value: &str) -> Option<i64> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }
    if let Ok(number) = trimmed.parse::<i64>() {
        return Some(number);
    }
    let number = trimmed.parse::<f64>().ok()?;
    if !number.is_finite() || number.fract() != 0.0 {
        return None;
    }
    if number < i64::MIN as f64 || number >= i64::MAX as f64 {
        return None;
    }
    Some(number as i64)
}
