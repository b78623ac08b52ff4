use serde::{Deserialize, Serialize};

/// An in-memory table: ordered column names plus ordered rows of string cells.
///
/// Every cell is a string; blank or absent cells are the empty string, never
/// a null marker. Rows are padded or truncated to the column count on insert,
/// so `Record::get` lookups never go out of bounds.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Table {
    columns: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl Table {
    pub fn new(columns: Vec<String>) -> Self {
        Self {
            columns,
            rows: Vec::new(),
        }
    }

    /// Appends a row, padding missing cells with `""` and dropping surplus
    /// cells beyond the column count.
    pub fn push_row(&mut self, mut row: Vec<String>) {
        row.resize(self.columns.len(), String::new());
        self.rows.push(row);
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.column_index(name).is_some()
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn record(&self, index: usize) -> Option<Record<'_>> {
        self.rows.get(index).map(|cells| Record { table: self, cells })
    }

    /// Iterates rows in insertion order.
    pub fn records(&self) -> impl Iterator<Item = Record<'_>> {
        self.rows.iter().map(|cells| Record { table: self, cells })
    }
}

/// A borrowed row view, addressable by column name.
#[derive(Debug, Clone, Copy)]
pub struct Record<'a> {
    table: &'a Table,
    cells: &'a [String],
}

impl<'a> Record<'a> {
    /// Returns the cell under `column`, or `""` when the column is unknown.
    pub fn get(&self, column: &str) -> &'a str {
        self.table
            .column_index(column)
            .and_then(|idx| self.cells.get(idx))
            .map_or("", String::as_str)
    }

    pub fn values(&self) -> &'a [String] {
        self.cells
    }

    /// True when every cell is blank after trimming.
    pub fn is_blank(&self) -> bool {
        self.cells.iter().all(|value| value.trim().is_empty())
    }
}

/// A named table inside a workbook.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Sheet {
    pub name: String,
    pub table: Table,
}

/// A named, order-preserving collection of tables.
///
/// Sheet order is load order; detection and fallback logic depend on it.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Workbook {
    sheets: Vec<Sheet>,
}

impl Workbook {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, name: impl Into<String>, table: Table) {
        self.sheets.push(Sheet {
            name: name.into(),
            table,
        });
    }

    pub fn sheets(&self) -> &[Sheet] {
        &self.sheets
    }

    pub fn sheet_at(&self, index: usize) -> Option<&Sheet> {
        self.sheets.get(index)
    }

    pub fn get(&self, name: &str) -> Option<&Table> {
        self.sheets
            .iter()
            .find(|sheet| sheet.name == name)
            .map(|sheet| &sheet.table)
    }

    pub fn len(&self) -> usize {
        self.sheets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sheets.is_empty()
    }
}
