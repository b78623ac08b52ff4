//! Report output.
//!
//! The engine produces an in-memory [`parity_model::ReconciliationReport`];
//! this crate renders it into ordered header-plus-rows blocks per category
//! and hands them to a [`ReportSink`]. The sink owns persistence and layout;
//! the bundled [`CsvReportSink`] writes one directory per reconciled entity
//! with `mismatch.csv`, `missing.csv`, and `extra.csv` inside.

pub mod csv_sink;
pub mod render;

pub use csv_sink::CsvReportSink;
pub use render::{ReportCategory, ReportSink, ReportTitles, write_report};
