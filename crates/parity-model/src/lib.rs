//! Shared data model for the parity reconciliation workspace.
//!
//! Everything downstream crates exchange lives here: in-memory tables with
//! string cells, ordered field mappings, the reconciliation report shape,
//! and the workspace error type.

pub mod error;
pub mod mapping;
pub mod report;
pub mod table;

pub use error::{ParityError, Result};
pub use mapping::FieldMapping;
pub use report::{Extra, Mismatch, Missing, ReconciliationReport};
pub use table::{Record, Sheet, Table, Workbook};
