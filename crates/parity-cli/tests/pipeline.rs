use std::fs;
use std::path::Path;

use parity_cli::cli::RunArgs;
use parity_cli::commands::{WorkbookStatus, run_batch};
use parity_cli::config::{ReferenceConfig, RunConfig};
use parity_cli::pipeline::run_workbook;

fn write_workbook(dir: &Path) {
    fs::create_dir_all(dir).unwrap();
    fs::write(
        dir.join("mapping.csv"),
        "SF Attribute,Target Attribute\n\
         External ID,Record Key\n\
         Opportunity Name,Title\n\
         ACV,ACV\n\
         Tags,Tags\n",
    )
    .unwrap();
    fs::write(
        dir.join("salesforce export.csv"),
        "External ID,Opportunity Name,ACV,Tags,Account 18 digit ID\n\
         OP-1,Acme Renewal,\"1,234.50\",\"gold,priority\",ACC-1\n\
         OP-2,Globex Upsell,500,basic,ACC-2\n\
         OP-3,Initech Pilot,900,basic,ACC-404\n\
         ,Ghost Row,1,x,ACC-9\n",
    )
    .unwrap();
    fs::write(
        dir.join("velaris export.csv"),
        "Record Key,Title,ACV,Tags\n\
         op-1,acme renewal,1234.5,\"gold,priority,expansion\"\n\
         OP-2,Globex Upsell,650,basic\n\
         OP-9,Umbrella Trial,10,basic\n",
    )
    .unwrap();
    fs::write(
        dir.join("target accounts.csv"),
        "Known Account ID\nacc-1\nacc-2\n",
    )
    .unwrap();
}

fn run_config() -> RunConfig {
    RunConfig {
        source_sheet_tokens: vec!["salesforce".to_string()],
        target_sheet_tokens: vec!["velaris".to_string()],
        reference: Some(ReferenceConfig {
            sheet_tokens: vec!["accounts".to_string()],
            key_columns: vec!["Account 18 digit ID".to_string()],
            reference_column: Some("Known Account ID".to_string()),
            present_note: "Missing, account exists in target".to_string(),
            absent_note: "Missing, account unknown".to_string(),
        }),
        ..RunConfig::default()
    }
}

#[test]
fn end_to_end_run_over_csv_folder_workbook() {
    let base = tempfile::tempdir().unwrap();
    let workbook_dir = base.path().join("Opportunities Export");
    write_workbook(&workbook_dir);
    let output_root = base.path().join("output");

    let outcome = run_workbook(&workbook_dir, &run_config(), &output_root).unwrap();
    assert_eq!(outcome.entity, "Opportunities_Export");
    assert_eq!(outcome.mismatches, 1, "only the ACV difference on OP-2");
    assert_eq!(outcome.missing, 1, "OP-3 has no target record");
    assert_eq!(outcome.extras, 1, "OP-9 exists only in the target");

    let entity_dir = output_root.join("Opportunities_Export");
    let mismatch = fs::read_to_string(entity_dir.join("mismatch.csv")).unwrap();
    let mut lines = mismatch.lines();
    assert_eq!(
        lines.next().unwrap(),
        "ID,Field,Source Value,Target Value,Note"
    );
    assert_eq!(lines.next().unwrap(), "OP-2,ACV,500,650,number");

    // OP-3's account is unknown to the reference sheet; the note says so
    // and the related key is carried in its own column.
    let missing = fs::read_to_string(entity_dir.join("missing.csv")).unwrap();
    assert!(missing.contains("OP-3,ACC-404,\"Missing, account unknown\""));

    let extra = fs::read_to_string(entity_dir.join("extra.csv")).unwrap();
    assert!(extra.contains("OP-9,OP-9,Extra in target"));
}

#[test]
fn rerun_produces_identical_reports() {
    let base = tempfile::tempdir().unwrap();
    let workbook_dir = base.path().join("book");
    write_workbook(&workbook_dir);
    let output_root = base.path().join("output");
    let config = run_config();

    run_workbook(&workbook_dir, &config, &output_root).unwrap();
    let first = fs::read_to_string(output_root.join("book/mismatch.csv")).unwrap();
    run_workbook(&workbook_dir, &config, &output_root).unwrap();
    let second = fs::read_to_string(output_root.join("book/mismatch.csv")).unwrap();
    assert_eq!(first, second);
}

#[test]
fn one_broken_workbook_does_not_abort_the_batch() {
    let base = tempfile::tempdir().unwrap();
    let good_dir = base.path().join("good book");
    write_workbook(&good_dir);
    let output_root = base.path().join("output");

    let args = RunArgs {
        workbooks: vec![base.path().join("broken.xlsx"), good_dir],
        output_dir: output_root.clone(),
        config: None,
    };
    let result = run_batch(&args).unwrap();
    assert!(result.has_failures());
    assert_eq!(result.statuses.len(), 2);
    assert!(matches!(result.statuses[0], WorkbookStatus::Failed { .. }));
    assert!(matches!(result.statuses[1], WorkbookStatus::Succeeded(_)));

    // The successful run's reports survived the earlier failure.
    assert!(output_root.join("good_book/mismatch.csv").exists());
}

#[test]
fn missing_workbook_is_an_isolated_failure() {
    let base = tempfile::tempdir().unwrap();
    let output_root = base.path().join("output");
    let config = RunConfig::default();
    let result = run_workbook(
        &base.path().join("does-not-exist.xlsx"),
        &config,
        &output_root,
    );
    assert!(result.is_err());
    // Nothing was written for the failed run.
    assert!(!output_root.exists());
}
