//! Subcommand implementations.

use anyhow::Result;
use comfy_table::Table as DisplayTable;
use tracing::error;

use parity_detect::{candidate_id_column, detect_mapping};
use parity_engine::{LocateSpec, locate_tables};

use crate::cli::{InspectArgs, RunArgs};
use crate::config::RunConfig;
use crate::pipeline::{RunOutcome, entity_name, run_workbook};
use crate::summary::apply_table_style;

/// Outcome of one workbook within a batch: the run result or the error that
/// stopped it. A failure never aborts the rest of the batch.
pub enum WorkbookStatus {
    Succeeded(RunOutcome),
    Failed { entity: String, error: String },
}

pub struct BatchResult {
    pub statuses: Vec<WorkbookStatus>,
}

impl BatchResult {
    pub fn has_failures(&self) -> bool {
        self.statuses
            .iter()
            .any(|status| matches!(status, WorkbookStatus::Failed { .. }))
    }
}

/// Reconciles every workbook in order, isolating failures so partial
/// results from successful runs survive a structurally broken workbook.
pub fn run_batch(args: &RunArgs) -> Result<BatchResult> {
    let config = RunConfig::load_or_default(args.config.as_deref())?;
    let mut statuses = Vec::new();
    for workbook in &args.workbooks {
        match run_workbook(workbook, &config, &args.output_dir) {
            Ok(outcome) => statuses.push(WorkbookStatus::Succeeded(outcome)),
            Err(error) => {
                error!(
                    workbook = %workbook.display(),
                    error = %error,
                    "workbook failed, continuing with the rest"
                );
                statuses.push(WorkbookStatus::Failed {
                    entity: entity_name(workbook),
                    error: format!("{error:#}"),
                });
            }
        }
    }
    Ok(BatchResult { statuses })
}

/// Prints what detection would decide for a workbook: its sheets, the
/// extracted mapping size, the located source/target sheets, and the
/// identifier candidates.
pub fn run_inspect(args: &InspectArgs) -> Result<()> {
    let config = RunConfig::load_or_default(args.config.as_deref())?;
    let workbook = parity_ingest::load_workbook(&args.workbook)?;
    let entity = entity_name(&args.workbook);

    let mut table = DisplayTable::new();
    table.set_header(vec!["Sheet", "Columns", "Rows", "Identifier candidate"]);
    apply_table_style(&mut table);
    for sheet in workbook.sheets() {
        table.add_row(vec![
            sheet.name.clone(),
            sheet.table.columns().len().to_string(),
            sheet.table.row_count().to_string(),
            candidate_id_column(sheet.table.columns())
                .unwrap_or("-")
                .to_string(),
        ]);
    }
    println!("{table}");

    let mapping = detect_mapping(&workbook);
    println!("Detected mapping pairs: {}", mapping.len());

    let locate_spec = LocateSpec {
        source_tokens: config.source_sheet_tokens.clone(),
        target_tokens: config.target_sheet_tokens.clone(),
    };
    match locate_tables(&workbook, &entity, &locate_spec) {
        Ok((source_index, target_index)) => {
            println!(
                "Source sheet: {}",
                workbook.sheets()[source_index].name
            );
            println!(
                "Target sheet: {}",
                workbook.sheets()[target_index].name
            );
        }
        Err(error) => println!("Sheet location failed: {error}"),
    }
    Ok(())
}
