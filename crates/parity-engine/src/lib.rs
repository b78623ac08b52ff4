//! Reconciliation engine.
//!
//! Ties the detectors and the comparator together: build a lookup over the
//! target table, walk the source table once, compare mapped fields per
//! record, and emit the three ordered report sets (mismatch, missing,
//! extra). Also hosts the workbook-level helpers the driver needs before a
//! run can start: locating the source/target sheets and resolving the
//! identifier columns.

pub mod engine;
pub mod identify;
pub mod locate;

pub use engine::{ReconcileInput, ReferenceCheck, reconcile};
pub use identify::{IdentifierHints, resolve_identifiers};
pub use locate::{LocateSpec, locate_tables};
