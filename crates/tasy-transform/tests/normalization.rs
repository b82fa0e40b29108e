use proptest::prelude::*;
use tasy_transform::{
    DISPLAY_FORMAT, coerce_integer, normalize_name, normalize_numeric, normalize_timestamp,
    parse_timestamp,
};

#[test]
fn name_examples() {
    assert_eq!(normalize_name(Some(" João  DA Silva ")), "joão da silva");
    assert_eq!(normalize_name(Some("CARLOS SOUZA")), "carlos souza");
}

#[test]
fn numeric_examples() {
    assert_eq!(normalize_numeric(Some("12,5")), Some(12.5));
    assert_eq!(normalize_numeric(Some("")), None);
    assert_eq!(normalize_numeric(Some("abc")), None);
}

#[test]
fn rendered_timestamps_parse_back() {
    let rendered = normalize_timestamp(Some("2024-01-31 23:59:59")).unwrap();
    assert_eq!(rendered, "31/01/2024 23:59:59");
    let parsed = parse_timestamp(&rendered).unwrap();
    assert_eq!(parsed.format(DISPLAY_FORMAT).to_string(), rendered);
}

proptest! {
    #[test]
    fn name_normalization_is_trimmed_and_lowercase(raw in "[ a-zA-Z]{0,24}") {
        let normalized = normalize_name(Some(&raw));
        prop_assert_eq!(normalized.trim(), normalized.as_str());
        prop_assert_eq!(normalized.to_lowercase(), normalized.clone());
        prop_assert!(normalized.len() <= raw.len());
    }

    #[test]
    fn names_without_space_runs_are_stable(words in proptest::collection::vec("[a-z]{1,8}", 1..5)) {
        let name = words.join(" ");
        prop_assert_eq!(normalize_name(Some(&name)), name.clone());
        prop_assert_eq!(normalize_name(Some(&normalize_name(Some(&name)))), name);
    }

    #[test]
    fn numeric_never_panics(raw in "\\PC{0,16}") {
        let _ = normalize_numeric(Some(&raw));
        let _ = coerce_integer(&raw);
    }

    #[test]
    fn decimal_comma_matches_point(int in 0u32..100_000, frac in 0u32..100) {
        let comma = format!("{int},{frac:02}");
        let point = format!("{int}.{frac:02}");
        prop_assert_eq!(normalize_numeric(Some(&comma)), normalize_numeric(Some(&point)));
        prop_assert!(normalize_numeric(Some(&comma)).is_some());
    }

    #[test]
    fn integers_coerce_from_float_text(value in -1_000_000i64..1_000_000) {
        prop_assert_eq!(coerce_integer(&value.to_string()), Some(value));
        prop_assert_eq!(coerce_integer(&format!("{value}.0")), Some(value));
    }
}
