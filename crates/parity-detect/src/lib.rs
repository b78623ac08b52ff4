//! Heuristic detectors for reconciliation inputs.
//!
//! Two detectors live here: the identifier-column picker, a pure function
//! over a table's header names driven by two versioned constant lists, and
//! the mapping detector, which extracts a source-to-target field mapping out
//! of a workbook by trying an ordered list of extraction strategies.
//!
//! Detection failure is a value, not an error: the identifier picker falls
//! back to the first column, the mapping detector returns an empty mapping
//! the caller replaces with an identity fallback.

pub mod id_column;
pub mod mapping;

pub use id_column::{FAVORITE_ID_HEADERS, ID_HEADER_TOKENS, candidate_id_column};
pub use mapping::detect_mapping;
