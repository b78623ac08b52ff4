use std::path::Path;

use anyhow::{Result, bail};

use parity_model::Workbook;

use crate::csv_folder::CsvFolderSource;
use crate::xlsx::XlsxTableSource;

/// Supplies workbooks to the reconciliation core. Implementations must
/// coerce every cell to a string (blank or absent becomes `""`) and preserve
/// sheet, column, and row order.
pub trait TableSource {
    fn load(&self, locator: &Path) -> Result<Workbook>;
}

/// Loads a workbook, picking the source implementation from the locator: a
/// directory is read as a CSV folder, a spreadsheet extension goes through
/// calamine.
pub fn load_workbook(path: &Path) -> Result<Workbook> {
    if path.is_dir() {
        return CsvFolderSource.load(path);
    }
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_lowercase)
        .unwrap_or_default();
    match extension.as_str() {
        "xlsx" | "xlsm" | "xls" | "xlsb" | "ods" => XlsxTableSource.load(path),
        other => bail!(
            "unsupported workbook '{}': unknown extension '{other}'",
            path.display()
        ),
    }
}
