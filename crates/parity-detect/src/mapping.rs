//! Field-mapping extraction from workbook sheets.

use tracing::debug;

use parity_model::{FieldMapping, Table, Workbook};

/// Sheet-name fragment that marks an explicit mapping sheet.
const MAPPING_SHEET_TOKEN: &str = "mapping";

/// Header fragments identifying the source column of a complex mapping
/// sheet, and the target column. The relaxed probes run only when the
/// primary probes leave a side unresolved.
const COMPLEX_SOURCE_PRIMARY: &str = "api name";
const COMPLEX_TARGET_PRIMARY: &[&str] = &["velaris api", "velaris attribute"];

/// One extraction strategy: a name for logging plus a total extraction
/// function. Strategies are tried in fixed order, first non-empty wins.
type Strategy = (&'static str, fn(&Table) -> FieldMapping);

const STRATEGIES: &[Strategy] = &[("simple", extract_simple), ("complex", extract_complex)];

/// Extracts a field mapping from a workbook.
///
/// Resolution order: sheets whose name contains `mapping` (case-insensitive)
/// are tried first, each strategy in order per sheet; when none of those
/// yields pairs, each strategy is tried across all sheets in workbook order.
/// Returns an empty mapping when nothing matches; the caller is expected to
/// fall back to an identity mapping over shared column names.
pub fn detect_mapping(workbook: &Workbook) -> FieldMapping {
    for sheet in workbook.sheets() {
        if !sheet.name.to_lowercase().contains(MAPPING_SHEET_TOKEN) {
            continue;
        }
        for &(strategy_name, extract) in STRATEGIES {
            let mapping = extract(&sheet.table);
            if !mapping.is_empty() {
                debug!(
                    sheet = %sheet.name,
                    strategy = strategy_name,
                    pairs = mapping.len(),
                    "mapping extracted from named mapping sheet"
                );
                return mapping;
            }
        }
    }
    for &(strategy_name, extract) in STRATEGIES {
        for sheet in workbook.sheets() {
            let mapping = extract(&sheet.table);
            if !mapping.is_empty() {
                debug!(
                    sheet = %sheet.name,
                    strategy = strategy_name,
                    pairs = mapping.len(),
                    "mapping extracted by workbook-wide scan"
                );
                return mapping;
            }
        }
    }
    FieldMapping::new()
}

/// Simple strategy: the first two columns are (source, target); a row
/// contributes a pair when both trimmed cells are non-empty. Later
/// duplicate source keys overwrite earlier ones.
fn extract_simple(table: &Table) -> FieldMapping {
    let mut mapping = FieldMapping::new();
    if table.columns().len() < 2 {
        return mapping;
    }
    for record in table.records() {
        let cells = record.values();
        let source = cells[0].trim();
        let target = cells[1].trim();
        if !source.is_empty() && !target.is_empty() {
            mapping.insert(source, target);
        }
    }
    mapping
}

/// Complex strategy: locate a source column whose header names an API field
/// and a target column carrying the target system's attribute header, then
/// extract pairs row-by-row under the simple strategy's non-empty rule.
fn extract_complex(table: &Table) -> FieldMapping {
    let mut source_column = None;
    let mut target_column = None;
    for column in table.columns() {
        let lower = column.to_lowercase();
        if source_column.is_none()
            && (lower.contains(COMPLEX_SOURCE_PRIMARY)
                || (lower.contains("api") && lower.contains("name")))
        {
            source_column = Some(column.as_str());
        }
        if target_column.is_none()
            && COMPLEX_TARGET_PRIMARY
                .iter()
                .any(|token| lower.contains(token))
        {
            target_column = Some(column.as_str());
        }
    }
    // Relaxed probe for sides the primary headers did not resolve.
    if target_column.is_none() {
        for column in table.columns() {
            let lower = column.to_lowercase();
            if lower.contains("velaris") && (lower.contains("api") || lower.contains("attribute")) {
                target_column = Some(column.as_str());
                break;
            }
        }
    }
    let (Some(source_column), Some(target_column)) = (source_column, target_column) else {
        return FieldMapping::new();
    };
    let mut mapping = FieldMapping::new();
    for record in table.records() {
        let source = record.get(source_column).trim();
        let target = record.get(target_column).trim();
        if !source.is_empty() && !target.is_empty() {
            mapping.insert(source, target);
        }
    }
    mapping
}
