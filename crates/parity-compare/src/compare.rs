//! Source-vs-target cell comparison.

use crate::normalize::{NormalizedValue, canonical_text, list_items, normalize_cell};

/// Absolute tolerance for numeric equality.
const NUMBER_TOLERANCE: f64 = 1e-9;

/// Comparison type of a scalar outcome, reported as the mismatch note.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScalarKind {
    Date,
    Number,
    Bool,
    Text,
}

impl ScalarKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Date => "date",
            Self::Number => "number",
            Self::Bool => "bool",
            Self::Text => "string",
        }
    }
}

/// Type-specific payload of a comparison.
#[derive(Debug, Clone, PartialEq)]
pub enum CompareDetail {
    /// List comparison: source items absent from the target, plus the full
    /// normalized target list for display.
    List {
        missing: Vec<String>,
        target_items: Vec<String>,
    },
    /// Scalar comparison: the two canonical values.
    Scalar {
        kind: ScalarKind,
        source: String,
        target: String,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct ComparisonOutcome {
    pub matched: bool,
    pub detail: CompareDetail,
}

/// Compares a source cell against a target cell.
///
/// Decision order:
/// 1. List mode when either raw value starts with `[`, or contains a comma
///    that is not a thousands separator inside an otherwise numeric value.
///    Equality is an asymmetric subset test: every source item must appear
///    in the target list; target-only items are not a mismatch.
/// 2. Matching scalar types compare with type rules: dates by ISO string,
///    numbers within an absolute tolerance, booleans canonically. A boolean
///    against a literal `0`/`1` number compares as a boolean.
/// 3. Everything else falls back to case-insensitive trimmed string equality
///    of the canonical values.
///
/// Total over all inputs; malformed values degrade to string comparison.
pub fn compare_cells(source: &str, target: &str) -> ComparisonOutcome {
    if is_list_cell(source) || is_list_cell(target) {
        let source_items = list_items(source);
        let target_items = list_items(target);
        let missing: Vec<String> = source_items
            .iter()
            .filter(|item| !target_items.contains(item))
            .cloned()
            .collect();
        return ComparisonOutcome {
            matched: missing.is_empty(),
            detail: CompareDetail::List {
                missing,
                target_items,
            },
        };
    }

    let source_value = normalize_cell(source);
    let target_value = normalize_cell(target);
    let (matched, kind) = match (&source_value, &target_value) {
        (NormalizedValue::Date(a), NormalizedValue::Date(b)) => (a == b, ScalarKind::Date),
        (NormalizedValue::Number(a), NormalizedValue::Number(b)) => {
            ((a - b).abs() < NUMBER_TOLERANCE, ScalarKind::Number)
        }
        (NormalizedValue::Bool(a), NormalizedValue::Bool(b)) => (a == b, ScalarKind::Bool),
        (NormalizedValue::Bool(flag), NormalizedValue::Number(number))
        | (NormalizedValue::Number(number), NormalizedValue::Bool(flag))
            if *number == 0.0 || *number == 1.0 =>
        {
            ((*number == 1.0) == *flag, ScalarKind::Bool)
        }
        _ => {
            let a = canonical_text(&source_value);
            let b = canonical_text(&target_value);
            (a == b, ScalarKind::Text)
        }
    };
    ComparisonOutcome {
        matched,
        detail: CompareDetail::Scalar {
            kind,
            source: canonical_text(&source_value),
            target: canonical_text(&target_value),
        },
    }
}

/// True when the raw value should be treated as a list. A comma does not
/// count when stripping commas leaves a plain number: `1,234.50` is a
/// thousands-separated numeric cell, not a two-item list.
fn is_list_cell(raw: &str) -> bool {
    if raw.starts_with('[') {
        return true;
    }
    raw.contains(',') && normalize_as_number(raw).is_none()
}

fn normalize_as_number(raw: &str) -> Option<f64> {
    match normalize_cell(raw) {
        NormalizedValue::Number(number) => Some(number),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_match(source: &str, target: &str) {
        let outcome = compare_cells(source, target);
        assert!(outcome.matched, "{source:?} vs {target:?}: {outcome:?}");
    }

    fn assert_mismatch(source: &str, target: &str) -> ComparisonOutcome {
        let outcome = compare_cells(source, target);
        assert!(!outcome.matched, "{source:?} vs {target:?}: {outcome:?}");
        outcome
    }

    #[test]
    fn subset_list_matches() {
        assert_match("a,b", "a,b,c");
    }

    #[test]
    fn superset_list_mismatch_reports_missing_items() {
        let outcome = assert_mismatch("a,b,c", "a,b");
        match outcome.detail {
            CompareDetail::List {
                missing,
                target_items,
            } => {
                assert_eq!(missing, ["c"]);
                assert_eq!(target_items, ["a", "b"]);
            }
            other => panic!("expected list detail, got {other:?}"),
        }
    }

    #[test]
    fn json_array_against_comma_list() {
        assert_match(r#"["X", "y"]"#, "x, y, z");
    }

    #[test]
    fn list_items_compare_case_insensitively() {
        assert_match("Alpha, Beta", "beta, alpha, gamma");
    }

    #[test]
    fn thousands_separated_number_is_not_a_list() {
        assert_match("1,234.50", "1234.5");
    }

    #[test]
    fn numeric_tolerance() {
        assert_match("1.0000000001", "1.0000000002");
        assert_mismatch("1.5", "1.6");
    }

    #[test]
    fn day_first_date_against_iso() {
        assert_match("02/03/2024", "2024-03-02");
        assert_mismatch("03/02/2024", "2024-03-02");
    }

    #[test]
    fn boolean_token_equivalence() {
        assert_match("Yes", "true");
        assert_match("No", "0");
        assert_match("1", "TRUE");
        assert_mismatch("Yes", "false");
    }

    #[test]
    fn case_insensitive_string_fallback() {
        assert_match("Alice", "alice");
        assert_match("  padded  ", "padded");
    }

    #[test]
    fn mixed_types_fall_back_to_string_equality() {
        let outcome = assert_mismatch("42", "forty-two");
        match outcome.detail {
            CompareDetail::Scalar { kind, .. } => assert_eq!(kind, ScalarKind::Text),
            other => panic!("expected scalar detail, got {other:?}"),
        }
    }

    #[test]
    fn empty_against_empty_matches() {
        assert_match("", "  ");
    }

    #[test]
    fn empty_against_value_mismatches() {
        assert_mismatch("", "x");
    }

    #[test]
    fn scalar_detail_carries_canonical_values() {
        let outcome = assert_mismatch("2 Mar 2024", "2024-04-01");
        assert_eq!(
            outcome.detail,
            CompareDetail::Scalar {
                kind: ScalarKind::Date,
                source: "2024-03-02".to_string(),
                target: "2024-04-01".to_string(),
            }
        );
    }
}
