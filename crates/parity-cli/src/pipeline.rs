//! Per-workbook reconciliation pipeline.
//!
//! One call of [`run_workbook`] is a pure function of the workbook contents
//! and the run configuration: load, detect mapping, locate sheets, resolve
//! identifiers, reconcile, write reports. Independent workbooks share no
//! state and may be processed in any order.

use std::path::{Path, PathBuf};

use anyhow::Result;
use tracing::{info, info_span};

use parity_detect::detect_mapping;
use parity_engine::{
    IdentifierHints, LocateSpec, ReconcileInput, ReferenceCheck, locate_tables, reconcile,
    resolve_identifiers,
};
use parity_model::{FieldMapping, Table, Workbook};
use parity_report::{CsvReportSink, write_report};

use crate::config::{ReferenceConfig, RunConfig};

/// What one successful workbook run produced.
#[derive(Debug, Clone)]
pub struct RunOutcome {
    pub workbook: PathBuf,
    pub entity: String,
    pub output_dir: PathBuf,
    pub mismatches: usize,
    pub missing: usize,
    pub extras: usize,
}

/// Reconciles one workbook and writes its reports under
/// `<output_root>/<entity>/`.
pub fn run_workbook(path: &Path, config: &RunConfig, output_root: &Path) -> Result<RunOutcome> {
    let entity = entity_name(path);
    let span = info_span!("workbook", entity = %entity);
    let _guard = span.enter();

    let workbook = parity_ingest::load_workbook(path)?;
    info!(sheets = workbook.len(), "workbook loaded");

    let mut mapping = detect_mapping(&workbook);
    if mapping.is_empty() && !config.default_mapping.is_empty() {
        info!("no mapping sheet detected, using configured default mapping");
        mapping = config.default_mapping.clone();
    }

    let locate_spec = LocateSpec {
        source_tokens: config.source_sheet_tokens.clone(),
        target_tokens: config.target_sheet_tokens.clone(),
    };
    let (source_index, target_index) = locate_tables(&workbook, &entity, &locate_spec)?;
    let source = &workbook.sheets()[source_index].table;
    let target = &workbook.sheets()[target_index].table;

    if mapping.is_empty() {
        mapping = FieldMapping::identity(source.columns(), target.columns());
        info!(pairs = mapping.len(), "using identity mapping over shared columns");
    }

    let hints = IdentifierHints {
        mapping_hints: config
            .identifier
            .mapping_hints
            .iter()
            .map(|hint| hint.to_lowercase())
            .collect(),
        source_override: config.identifier.source_column.clone(),
        target_override: config.identifier.target_column.clone(),
    };
    let (source_id, target_id) = resolve_identifiers(&mapping, source, target, &hints, &entity)?;
    info!(
        source_id = %source_id,
        target_id = %target_id,
        pairs = mapping.len(),
        "reconciling"
    );

    let mut input = ReconcileInput::new(source, target, &mapping, &source_id, &target_id);
    input.missing_note = config.missing_note.as_deref();
    input.extra_note = config.extra_note.as_deref();
    let reference_table = config
        .reference
        .as_ref()
        .and_then(|reference| find_reference_table(&workbook, reference));
    if let (Some(reference), Some(table)) = (config.reference.as_ref(), reference_table) {
        input.reference = Some(ReferenceCheck {
            table,
            key_columns: &reference.key_columns,
            reference_column: reference.reference_column.as_deref(),
            present_note: &reference.present_note,
            absent_note: &reference.absent_note,
        });
    }

    let report = reconcile(&input);
    info!(
        mismatches = report.mismatch_count(),
        missing = report.missing_count(),
        extras = report.extra_count(),
        "reconciliation finished"
    );

    let mut sink = CsvReportSink::new(output_root, &entity);
    write_report(&mut sink, &report, &config.titles)?;

    Ok(RunOutcome {
        workbook: path.to_path_buf(),
        entity: entity.clone(),
        output_dir: sink.entity_dir().to_path_buf(),
        mismatches: report.mismatch_count(),
        missing: report.missing_count(),
        extras: report.extra_count(),
    })
}

/// Report directory name for a workbook: the file stem with spaces
/// underscored.
pub fn entity_name(path: &Path) -> String {
    path.file_stem()
        .and_then(|stem| stem.to_str())
        .unwrap_or("workbook")
        .replace(' ', "_")
}

fn find_reference_table<'a>(
    workbook: &'a Workbook,
    reference: &ReferenceConfig,
) -> Option<&'a Table> {
    if reference.sheet_tokens.is_empty() {
        return None;
    }
    workbook
        .sheets()
        .iter()
        .find(|sheet| {
            let name = sheet.name.to_lowercase();
            reference
                .sheet_tokens
                .iter()
                .any(|token| name.contains(&token.to_lowercase()))
        })
        .map(|sheet| &sheet.table)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entity_name_underscores_spaces() {
        let path = Path::new("/data/Corporate Subscriptions to Target.xlsx");
        assert_eq!(entity_name(path), "Corporate_Subscriptions_to_Target");
    }
}
