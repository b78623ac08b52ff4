//! Type-aware cell normalization and comparison.
//!
//! Both sides of a reconciliation arrive as raw strings. This crate
//! classifies a cell into a typed canonical form (empty, number, date,
//! boolean, text) and decides equality between a source cell and a target
//! cell, with dedicated subset semantics for list-valued cells.
//!
//! Normalization and comparison are total: unparsable input degrades to
//! text, nothing here returns an error or panics on malformed data.

pub mod compare;
pub mod dates;
pub mod normalize;

pub use compare::{CompareDetail, ComparisonOutcome, ScalarKind, compare_cells};
pub use dates::parse_flexible_date;
pub use normalize::{NormalizedValue, canonical_text, list_items, normalize_cell};
