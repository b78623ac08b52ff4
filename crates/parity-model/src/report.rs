use serde::{Deserialize, Serialize};

/// A matched record pair whose mapped field values differ.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Mismatch {
    pub id: String,
    pub field: String,
    pub source_value: String,
    /// What the target side showed: the raw cell for scalar comparisons, the
    /// normalized list joined with `", "` for list comparisons.
    pub target_display: String,
    pub note: String,
}

/// A source record with no usable corresponding target record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Missing {
    pub id: String,
    /// Related parent-entity key read from the source record when a
    /// reference check is configured; `None` when no check ran.
    pub related_id: Option<String>,
    pub note: String,
}

/// A target record whose identifier never appeared in the source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Extra {
    pub id: String,
    /// Value of the target table's first column, used as a display label.
    pub label: String,
    pub note: String,
}

/// The three ordered outcome sequences of one reconciliation run.
///
/// Each sequence is in encounter order: mismatches and missing follow source
/// row order, extras follow target row order.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReconciliationReport {
    pub mismatches: Vec<Mismatch>,
    pub missing: Vec<Missing>,
    pub extras: Vec<Extra>,
}

impl ReconciliationReport {
    pub fn is_clean(&self) -> bool {
        self.mismatches.is_empty() && self.missing.is_empty() && self.extras.is_empty()
    }

    pub fn mismatch_count(&self) -> usize {
        self.mismatches.len()
    }

    pub fn missing_count(&self) -> usize {
        self.missing.len()
    }

    pub fn extra_count(&self) -> usize {
        self.extras.len()
    }
}
