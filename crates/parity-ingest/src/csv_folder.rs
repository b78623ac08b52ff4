//! CSV-folder table source: every `*.csv` file in a directory becomes one
//! named sheet, the file stem being the sheet name. Files load in name order
//! for deterministic sheet ordering.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use csv::ReaderBuilder;
use tracing::debug;

use parity_model::{Table, Workbook};

use crate::source::TableSource;

pub struct CsvFolderSource;

impl TableSource for CsvFolderSource {
    fn load(&self, locator: &Path) -> Result<Workbook> {
        read_csv_folder(locator)
    }
}

pub fn read_csv_folder(dir: &Path) -> Result<Workbook> {
    let mut files: Vec<PathBuf> = std::fs::read_dir(dir)
        .with_context(|| format!("read folder: {}", dir.display()))?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| {
            path.extension()
                .and_then(|ext| ext.to_str())
                .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"))
        })
        .collect();
    files.sort();

    let mut workbook = Workbook::new();
    for path in files {
        let name = path
            .file_stem()
            .and_then(|stem| stem.to_str())
            .unwrap_or_default()
            .to_string();
        let table = read_csv_table(&path)?;
        debug!(
            sheet = %name,
            columns = table.columns().len(),
            rows = table.row_count(),
            "csv sheet imported"
        );
        workbook.push(name, table);
    }
    Ok(workbook)
}

/// Reads one CSV file into a table. The first non-blank row supplies the
/// headers; short records are padded, fully blank records are dropped.
pub fn read_csv_table(path: &Path) -> Result<Table> {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_path(path)
        .with_context(|| format!("read csv: {}", path.display()))?;
    let mut raw_rows: Vec<Vec<String>> = Vec::new();
    for record in reader.records() {
        let record = record.with_context(|| format!("read record: {}", path.display()))?;
        let row: Vec<String> = record.iter().map(normalize_cell).collect();
        if row.iter().all(|value| value.trim().is_empty()) {
            continue;
        }
        raw_rows.push(row);
    }
    let mut rows = raw_rows.into_iter();
    let headers: Vec<String> = rows.next().unwrap_or_default();
    let mut table = Table::new(headers);
    for row in rows {
        table.push_row(row);
    }
    Ok(table)
}

fn normalize_cell(raw: &str) -> String {
    raw.trim().trim_matches('\u{feff}').to_string()
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;

    #[test]
    fn folder_becomes_workbook_in_name_order() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("b_target.csv"),
            "id,name\n1,alice\n",
        )
        .unwrap();
        fs::write(
            dir.path().join("a_source.csv"),
            "id,name\n1,Alice\n2,Bob\n",
        )
        .unwrap();
        fs::write(dir.path().join("notes.txt"), "ignored").unwrap();

        let workbook = read_csv_folder(dir.path()).unwrap();
        let names: Vec<&str> = workbook.sheets().iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, ["a_source", "b_target"]);
        assert_eq!(workbook.get("a_source").unwrap().row_count(), 2);
    }

    #[test]
    fn blank_rows_are_dropped_and_short_rows_padded() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data.csv");
        fs::write(&path, "id,name,email\n,,\n1,Alice\n").unwrap();
        let table = read_csv_table(&path).unwrap();
        assert_eq!(table.row_count(), 1);
        let record = table.record(0).unwrap();
        assert_eq!(record.get("name"), "Alice");
        assert_eq!(record.get("email"), "");
    }

    #[test]
    fn empty_file_yields_empty_table() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty.csv");
        fs::write(&path, "").unwrap();
        let table = read_csv_table(&path).unwrap();
        assert!(table.columns().is_empty());
        assert!(table.is_empty());
    }
}
