//! Rendering a reconciliation report into sink rows.

use anyhow::Result;
use serde::{Deserialize, Serialize};

use parity_model::ReconciliationReport;

/// The three report categories, in emission order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportCategory {
    Mismatch,
    Missing,
    Extra,
}

impl ReportCategory {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Mismatch => "mismatch",
            Self::Missing => "missing",
            Self::Extra => "extra",
        }
    }
}

/// Receives rendered report blocks. Implementations own persistence; the
/// rows arrive already ordered and stringified.
pub trait ReportSink {
    fn write(
        &mut self,
        category: ReportCategory,
        header: &[String],
        rows: &[Vec<String>],
    ) -> Result<()>;
}

/// Column titles for the rendered reports, overridable per entity so a
/// bookings report can say "Booking ID" where an accounts report says
/// "Account ID".
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportTitles {
    pub id: String,
    pub related_id: String,
    pub label: String,
}

impl Default for ReportTitles {
    fn default() -> Self {
        Self {
            id: "ID".to_string(),
            related_id: "Related ID".to_string(),
            label: "Label".to_string(),
        }
    }
}

/// Renders all three categories of `report` into `sink`, in category order.
///
/// The missing block gains a related-id column only when at least one entry
/// carries one, i.e. when a reference check ran for the entity.
pub fn write_report(
    sink: &mut dyn ReportSink,
    report: &ReconciliationReport,
    titles: &ReportTitles,
) -> Result<()> {
    let mismatch_header = vec![
        titles.id.clone(),
        "Field".to_string(),
        "Source Value".to_string(),
        "Target Value".to_string(),
        "Note".to_string(),
    ];
    let mismatch_rows: Vec<Vec<String>> = report
        .mismatches
        .iter()
        .map(|entry| {
            vec![
                entry.id.clone(),
                entry.field.clone(),
                entry.source_value.clone(),
                entry.target_display.clone(),
                entry.note.clone(),
            ]
        })
        .collect();
    sink.write(ReportCategory::Mismatch, &mismatch_header, &mismatch_rows)?;

    let with_related = report.missing.iter().any(|entry| entry.related_id.is_some());
    let missing_header = if with_related {
        vec![
            titles.id.clone(),
            titles.related_id.clone(),
            "Note".to_string(),
        ]
    } else {
        vec![titles.id.clone(), "Note".to_string()]
    };
    let missing_rows: Vec<Vec<String>> = report
        .missing
        .iter()
        .map(|entry| {
            if with_related {
                vec![
                    entry.id.clone(),
                    entry.related_id.clone().unwrap_or_default(),
                    entry.note.clone(),
                ]
            } else {
                vec![entry.id.clone(), entry.note.clone()]
            }
        })
        .collect();
    sink.write(ReportCategory::Missing, &missing_header, &missing_rows)?;

    let extra_header = vec![
        titles.id.clone(),
        titles.label.clone(),
        "Note".to_string(),
    ];
    let extra_rows: Vec<Vec<String>> = report
        .extras
        .iter()
        .map(|entry| vec![entry.id.clone(), entry.label.clone(), entry.note.clone()])
        .collect();
    sink.write(ReportCategory::Extra, &extra_header, &extra_rows)?;

    Ok(())
}
