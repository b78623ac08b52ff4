//! Cell classification into typed canonical values.

use std::sync::LazyLock;

use regex::Regex;

use crate::dates::parse_flexible_date;

/// Strict numeric shape after thousands separators are stripped: optional
/// sign, digits, optional decimal fraction.
static NUMBER_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[-+]?\d+(\.\d+)?$").expect("invalid number regex"));

/// Boolean tokens accepted by the classifier, lowercased. `1` and `0` are
/// listed for completeness but are claimed by the numeric branch first; the
/// comparator bridges the number/boolean gap when needed.
const TRUE_TOKENS: &[&str] = &["true", "yes", "1"];
const FALSE_TOKENS: &[&str] = &["false", "no", "0"];

/// The typed canonical form of a single cell.
#[derive(Debug, Clone, PartialEq)]
pub enum NormalizedValue {
    Empty,
    Number(f64),
    /// ISO calendar date, `yyyy-mm-dd`; time-of-day already discarded.
    Date(String),
    Bool(bool),
    /// Lowercased, trimmed text. The terminal fallback: anything that is not
    /// empty, numeric, a date, or a boolean token lands here.
    Text(String),
}

/// Classifies one raw cell. Never fails; unparsable values degrade to
/// [`NormalizedValue::Text`].
pub fn normalize_cell(raw: &str) -> NormalizedValue {
    let unescaped = unescape_entities(raw.trim());
    let value = unescaped.trim();
    if value.is_empty() {
        return NormalizedValue::Empty;
    }
    let compact = value.replace(',', "");
    if NUMBER_PATTERN.is_match(&compact)
        && let Ok(number) = compact.parse::<f64>()
    {
        return NormalizedValue::Number(number);
    }
    if let Some(date) = parse_flexible_date(value) {
        return NormalizedValue::Date(date.format("%Y-%m-%d").to_string());
    }
    let lower = value.to_lowercase();
    if TRUE_TOKENS.contains(&lower.as_str()) {
        return NormalizedValue::Bool(true);
    }
    if FALSE_TOKENS.contains(&lower.as_str()) {
        return NormalizedValue::Bool(false);
    }
    NormalizedValue::Text(lower)
}

/// Canonical display text for a normalized value, used by the string-equality
/// fallback and by callers that need a printable form.
pub fn canonical_text(value: &NormalizedValue) -> String {
    match value {
        NormalizedValue::Empty => String::new(),
        NormalizedValue::Number(number) => format_number(*number),
        NormalizedValue::Date(iso) => iso.clone(),
        NormalizedValue::Bool(flag) => flag.to_string(),
        NormalizedValue::Text(text) => text.clone(),
    }
}

/// Splits a list-valued cell into normalized items.
///
/// A `[`..`]` cell is parsed as a strict JSON array first; each element is
/// stringified, trimmed, lowercased, and blanks are dropped. On parse failure
/// or for any other cell, the value splits on commas with the same per-item
/// normalization. Empty input yields an empty list.
pub fn list_items(raw: &str) -> Vec<String> {
    let value = raw.trim();
    if value.is_empty() || value.eq_ignore_ascii_case("nan") {
        return Vec::new();
    }
    if value.starts_with('[')
        && value.ends_with(']')
        && let Ok(serde_json::Value::Array(items)) = serde_json::from_str::<serde_json::Value>(value)
    {
        return items
            .iter()
            .map(json_item_text)
            .filter(|item| !item.is_empty())
            .collect();
    }
    value
        .split(',')
        .map(|item| item.trim().to_lowercase())
        .filter(|item| !item.is_empty())
        .collect()
}

fn json_item_text(item: &serde_json::Value) -> String {
    match item {
        serde_json::Value::String(text) => text.trim().to_lowercase(),
        other => other.to_string().trim().to_lowercase(),
    }
}

/// Decodes `&amp;`-style entities exported systems leave in cell text.
/// Unknown entities leave the input untouched.
fn unescape_entities(value: &str) -> String {
    if !value.contains('&') {
        return value.to_string();
    }
    match quick_xml::escape::unescape(value) {
        Ok(decoded) => decoded.into_owned(),
        Err(_) => value.to_string(),
    }
}

fn format_number(number: f64) -> String {
    if number.fract() == 0.0 && number.abs() < 1e15 {
        format!("{}", number as i64)
    } else {
        format!("{number}")
    }
}
