//! The single-pass reconciliation algorithm.

use std::collections::{BTreeMap, BTreeSet};

use tracing::{debug, warn};

use parity_compare::{CompareDetail, compare_cells};
use parity_model::{Extra, FieldMapping, Mismatch, Missing, ReconciliationReport, Table};

const DEFAULT_MISSING_NOTE: &str = "Missing in target";
const DEFAULT_EXTRA_NOTE: &str = "Extra in target";

/// Optional reference-table check that enriches the note of a missing
/// record: when the source record carries a related key (e.g. a parent
/// entity's identifier) that exists in the reference table, the note says
/// so. Any failure here downgrades silently to the plain note.
#[derive(Debug, Clone)]
pub struct ReferenceCheck<'a> {
    pub table: &'a Table,
    /// Source columns probed in order; the first non-blank value is the
    /// related key.
    pub key_columns: &'a [String],
    /// Reference-table column holding known keys; falls back to the first
    /// column when `None` or unknown.
    pub reference_column: Option<&'a str>,
    pub present_note: &'a str,
    pub absent_note: &'a str,
}

/// Inputs of one reconciliation run. The engine embeds no business-specific
/// column names; identifier columns, mapping, and notes all arrive here.
#[derive(Debug, Clone)]
pub struct ReconcileInput<'a> {
    pub source: &'a Table,
    pub target: &'a Table,
    pub mapping: &'a FieldMapping,
    pub source_id: &'a str,
    pub target_id: &'a str,
    pub reference: Option<ReferenceCheck<'a>>,
    pub missing_note: Option<&'a str>,
    pub extra_note: Option<&'a str>,
}

impl<'a> ReconcileInput<'a> {
    pub fn new(
        source: &'a Table,
        target: &'a Table,
        mapping: &'a FieldMapping,
        source_id: &'a str,
        target_id: &'a str,
    ) -> Self {
        Self {
            source,
            target,
            mapping,
            source_id,
            target_id,
            reference: None,
            missing_note: None,
            extra_note: None,
        }
    }
}

/// Reconciles one (source, target) table pair.
///
/// Deterministic single pass over each table (plus the lookup build over the
/// target): identical inputs produce identical reports, entry order included.
/// Records with a blank identifier participate in no report category.
pub fn reconcile(input: &ReconcileInput<'_>) -> ReconciliationReport {
    let mut report = ReconciliationReport::default();

    // Target lookup keyed by lowercased-trimmed identifier. Duplicates
    // overwrite: the last row wins. Known limitation, surfaced as a warning
    // rather than corrected.
    let mut target_rows: BTreeMap<String, usize> = BTreeMap::new();
    for (index, record) in input.target.records().enumerate() {
        let id = record.get(input.target_id).trim();
        if id.is_empty() {
            continue;
        }
        if let Some(previous) = target_rows.insert(id.to_lowercase(), index) {
            warn!(
                id = %id,
                kept_row = index,
                dropped_row = previous,
                "duplicate target identifier, keeping the later row"
            );
        }
    }

    let mut seen: BTreeSet<String> = BTreeSet::new();
    let source_id_key = input.source_id.trim().to_lowercase();

    for record in input.source.records() {
        let id = record.get(input.source_id).trim();
        if id.is_empty() {
            continue;
        }
        let key = id.to_lowercase();
        seen.insert(key.clone());

        let target_record = target_rows
            .get(&key)
            .and_then(|&index| input.target.record(index));

        // A target row whose every field is blank is a placeholder, not a
        // match.
        let usable = target_record.filter(|record| !record.is_blank());
        let Some(target_record) = usable else {
            report.missing.push(missing_entry(input, id, &record));
            continue;
        };

        for (source_field, target_field) in input.mapping.iter() {
            if source_field.trim().to_lowercase() == source_id_key {
                continue;
            }
            if !input.source.has_column(source_field) || !input.target.has_column(target_field) {
                debug!(
                    source_field,
                    target_field, "mapped column absent from its table, pair skipped"
                );
                continue;
            }
            let source_value = record.get(source_field);
            let target_value = target_record.get(target_field);
            let outcome = compare_cells(source_value, target_value);
            if outcome.matched {
                continue;
            }
            let (target_display, note) = match outcome.detail {
                CompareDetail::List {
                    missing,
                    target_items,
                } => (
                    target_items.join(", "),
                    format!("Missing items: {}", missing.join(", ")),
                ),
                CompareDetail::Scalar { kind, .. } => {
                    (target_value.to_string(), kind.as_str().to_string())
                }
            };
            report.mismatches.push(Mismatch {
                id: id.to_string(),
                field: source_field.to_string(),
                source_value: source_value.to_string(),
                target_display,
                note,
            });
        }
    }

    let extra_note = input.extra_note.unwrap_or(DEFAULT_EXTRA_NOTE);
    let label_column = input.target.columns().first().cloned().unwrap_or_default();
    for record in input.target.records() {
        let id = record.get(input.target_id).trim();
        if id.is_empty() {
            continue;
        }
        if seen.contains(&id.to_lowercase()) {
            continue;
        }
        report.extras.push(Extra {
            id: id.to_string(),
            label: record.get(&label_column).to_string(),
            note: extra_note.to_string(),
        });
    }

    report
}

fn missing_entry(
    input: &ReconcileInput<'_>,
    id: &str,
    record: &parity_model::Record<'_>,
) -> Missing {
    let plain_note = input.missing_note.unwrap_or(DEFAULT_MISSING_NOTE);
    let Some(reference) = input.reference.as_ref() else {
        return Missing {
            id: id.to_string(),
            related_id: None,
            note: plain_note.to_string(),
        };
    };

    let related = reference
        .key_columns
        .iter()
        .map(|column| record.get(column).trim())
        .find(|value| !value.is_empty())
        .unwrap_or("");

    let note = if related.is_empty() {
        plain_note
    } else if reference_contains(reference, related) {
        reference.present_note
    } else {
        reference.absent_note
    };

    Missing {
        id: id.to_string(),
        related_id: Some(related.to_string()),
        note: note.to_string(),
    }
}

/// Membership probe against the reference table. Unknown columns fall back
/// to the table's first column; a column-less table simply reports absence.
fn reference_contains(reference: &ReferenceCheck<'_>, key: &str) -> bool {
    let column = reference
        .reference_column
        .filter(|name| reference.table.has_column(name))
        .or_else(|| reference.table.columns().first().map(String::as_str));
    let Some(column) = column else {
        return false;
    };
    let needle = key.to_lowercase();
    reference
        .table
        .records()
        .any(|record| record.get(column).trim().to_lowercase() == needle)
}
