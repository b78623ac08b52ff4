//! CSV persistence for rendered reports.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::info;

use crate::render::{ReportCategory, ReportSink};

/// Writes each report category to `<root>/<entity>/<category>.csv`,
/// creating directories as needed. Existing files are overwritten: reports
/// are pure functions of the run inputs.
pub struct CsvReportSink {
    entity_dir: PathBuf,
}

impl CsvReportSink {
    pub fn new(root: &Path, entity: &str) -> Self {
        Self {
            entity_dir: root.join(entity),
        }
    }

    pub fn entity_dir(&self) -> &Path {
        &self.entity_dir
    }
}

impl ReportSink for CsvReportSink {
    fn write(
        &mut self,
        category: ReportCategory,
        header: &[String],
        rows: &[Vec<String>],
    ) -> Result<()> {
        std::fs::create_dir_all(&self.entity_dir)
            .with_context(|| format!("create report dir: {}", self.entity_dir.display()))?;
        let path = self.entity_dir.join(format!("{}.csv", category.as_str()));
        let mut writer = csv::Writer::from_path(&path)
            .with_context(|| format!("open report file: {}", path.display()))?;
        writer.write_record(header)?;
        for row in rows {
            writer.write_record(row)?;
        }
        writer
            .flush()
            .with_context(|| format!("flush report file: {}", path.display()))?;
        info!(report = %path.display(), rows = rows.len(), "report written");
        Ok(())
    }
}
