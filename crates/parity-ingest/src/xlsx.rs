//! Excel workbook import (xlsx, xls, xlsb, ods) via calamine.
//!
//! One-way conversion into string tables: the first non-blank row of each
//! sheet supplies the headers, every following row becomes a record padded
//! to the header width. Numeric cells render integer-exact where the value
//! has no fraction; date cells render as ISO strings so the comparator can
//! classify them.

use std::path::Path;

use anyhow::{Context, Result};
use calamine::{Data, Reader, open_workbook_auto};
use tracing::debug;

use parity_model::{Table, Workbook};

use crate::source::TableSource;

pub struct XlsxTableSource;

impl TableSource for XlsxTableSource {
    fn load(&self, locator: &Path) -> Result<Workbook> {
        read_xlsx_workbook(locator)
    }
}

pub fn read_xlsx_workbook(path: &Path) -> Result<Workbook> {
    let mut reader = open_workbook_auto(path)
        .with_context(|| format!("open workbook: {}", path.display()))?;
    let sheet_names: Vec<String> = reader.sheet_names().to_vec();
    let mut workbook = Workbook::new();
    for sheet_name in &sheet_names {
        let range = reader
            .worksheet_range(sheet_name)
            .with_context(|| format!("read sheet '{sheet_name}': {}", path.display()))?;
        let mut rows = range
            .rows()
            .map(|row| row.iter().map(cell_text).collect::<Vec<String>>())
            .filter(|row| !row.iter().all(|value| value.trim().is_empty()));
        let headers: Vec<String> = rows
            .next()
            .map(|row| row.iter().map(|value| value.trim().to_string()).collect())
            .unwrap_or_default();
        let mut table = Table::new(headers);
        for row in rows {
            table.push_row(row);
        }
        debug!(
            sheet = %sheet_name,
            columns = table.columns().len(),
            rows = table.row_count(),
            "sheet imported"
        );
        workbook.push(sheet_name.clone(), table);
    }
    Ok(workbook)
}

fn cell_text(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(text) => text.trim().trim_matches('\u{feff}').to_string(),
        Data::Float(number) => format_float(*number),
        Data::Int(number) => number.to_string(),
        Data::Bool(flag) => if *flag { "TRUE" } else { "FALSE" }.to_string(),
        Data::Error(error) => format!("#{error:?}"),
        Data::DateTime(datetime) => match datetime.as_datetime() {
            Some(value) if value.time() == chrono::NaiveTime::MIN => {
                value.format("%Y-%m-%d").to_string()
            }
            Some(value) => value.format("%Y-%m-%d %H:%M:%S").to_string(),
            None => format_float(datetime.as_f64()),
        },
        Data::DateTimeIso(text) | Data::DurationIso(text) => text.clone(),
    }
}

/// Integers render without a decimal tail so `42` never becomes `42.0`.
fn format_float(number: f64) -> String {
    if number.fract() == 0.0 && number.abs() < 1e15 {
        format!("{}", number as i64)
    } else {
        format!("{number}")
    }
}
