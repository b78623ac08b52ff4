//! Run configuration.
//!
//! The engine embeds no business-specific column or sheet names; everything
//! entity-specific (sheet name tokens, identifier hints, the default field
//! mapping, reference-check settings, report titles) arrives through this
//! JSON-backed configuration.

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use parity_model::FieldMapping;
use parity_report::ReportTitles;

/// Mapping source keys that mark the identifier pair by default.
const DEFAULT_ID_MAPPING_HINTS: &[&str] = &[
    "external id",
    "externalid",
    "external_id",
    "msafeid__c",
    "msafeid",
    "safeid",
];

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RunConfig {
    /// Sheet-name fragments identifying the source sheet. Empty means
    /// "largest non-mapping sheet".
    pub source_sheet_tokens: Vec<String>,
    /// Sheet-name fragments identifying the target sheet.
    pub target_sheet_tokens: Vec<String>,
    pub identifier: IdentifierConfig,
    /// Mapping used when no mapping sheet is detected. When this is empty
    /// too, the identity mapping over shared column names applies.
    pub default_mapping: FieldMapping,
    pub titles: ReportTitles,
    /// Overrides the note of plain missing entries.
    pub missing_note: Option<String>,
    /// Overrides the note of extra entries.
    pub extra_note: Option<String>,
    pub reference: Option<ReferenceConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct IdentifierConfig {
    /// Lowercased mapping source keys that pin the identifier pair.
    pub mapping_hints: Vec<String>,
    /// Explicit source identifier column, skipping detection.
    pub source_column: Option<String>,
    /// Explicit target identifier column, skipping detection.
    pub target_column: Option<String>,
}

impl Default for IdentifierConfig {
    fn default() -> Self {
        Self {
            mapping_hints: DEFAULT_ID_MAPPING_HINTS
                .iter()
                .map(|hint| (*hint).to_string())
                .collect(),
            source_column: None,
            target_column: None,
        }
    }
}

/// Settings of the missing-note enrichment check against an auxiliary
/// reference sheet.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ReferenceConfig {
    /// Sheet-name fragments locating the reference sheet in the workbook.
    pub sheet_tokens: Vec<String>,
    /// Source columns probed in order for the related key.
    pub key_columns: Vec<String>,
    /// Reference-sheet column holding known keys; first column when unset.
    pub reference_column: Option<String>,
    pub present_note: String,
    pub absent_note: String,
}

impl Default for ReferenceConfig {
    fn default() -> Self {
        Self {
            sheet_tokens: Vec::new(),
            key_columns: Vec::new(),
            reference_column: None,
            present_note: "Missing in target, related record present".to_string(),
            absent_note: "Missing in target".to_string(),
        }
    }
}

impl RunConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let file = std::fs::File::open(path)
            .with_context(|| format!("open config: {}", path.display()))?;
        let config: Self = serde_json::from_reader(file)
            .with_context(|| format!("parse config: {}", path.display()))?;
        Ok(config)
    }

    /// Loads the config at `path`, or the defaults when no path was given.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }
}
