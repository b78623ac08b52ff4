//! Identifier-column resolution for one reconciliation run.

use tracing::debug;

use parity_detect::candidate_id_column;
use parity_model::{FieldMapping, ParityError, Table};

/// Configuration steering identifier resolution. Explicit overrides win;
/// otherwise the mapping is scanned for a pair whose source side matches one
/// of the hints, fixing both columns at once; the header heuristics run
/// last, per table.
#[derive(Debug, Clone, Default)]
pub struct IdentifierHints {
    /// Lowercased source-column names that mark the identifier pair inside a
    /// detected mapping (e.g. `external id`).
    pub mapping_hints: Vec<String>,
    pub source_override: Option<String>,
    pub target_override: Option<String>,
}

/// Resolves the (source, target) identifier column names.
pub fn resolve_identifiers(
    mapping: &FieldMapping,
    source: &Table,
    target: &Table,
    hints: &IdentifierHints,
    workbook_name: &str,
) -> Result<(String, String), ParityError> {
    let mut source_id = hints.source_override.clone();
    let mut target_id = hints.target_override.clone();

    if (source_id.is_none() || target_id.is_none()) && !hints.mapping_hints.is_empty() {
        for (mapped_source, mapped_target) in mapping.iter() {
            let key = mapped_source.trim().to_lowercase();
            if hints.mapping_hints.iter().any(|hint| *hint == key) {
                debug!(
                    source = mapped_source,
                    target = mapped_target,
                    "identifier pair taken from mapping hint"
                );
                source_id.get_or_insert_with(|| mapped_source.to_string());
                target_id.get_or_insert_with(|| mapped_target.to_string());
                break;
            }
        }
    }

    let source_id = match source_id {
        Some(column) => column,
        None => candidate_id_column(source.columns())
            .map(ToString::to_string)
            .ok_or_else(|| ParityError::IdentifierNotFound {
                workbook: workbook_name.to_string(),
                side: "source".to_string(),
            })?,
    };
    let target_id = match target_id {
        Some(column) => column,
        None => candidate_id_column(target.columns())
            .map(ToString::to_string)
            .ok_or_else(|| ParityError::IdentifierNotFound {
                workbook: workbook_name.to_string(),
                side: "target".to_string(),
            })?,
    };
    Ok((source_id, target_id))
}
