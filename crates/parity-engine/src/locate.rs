//! Source/target sheet location inside a workbook.

use tracing::debug;

use parity_model::{ParityError, Workbook};

/// Sheet-name fragments that identify the source and target sheets. Empty
/// token lists skip name matching entirely and rely on the size fallback.
#[derive(Debug, Clone, Default)]
pub struct LocateSpec {
    pub source_tokens: Vec<String>,
    pub target_tokens: Vec<String>,
}

/// Resolves the (source, target) sheet indices of a workbook.
///
/// Each side takes the first sheet whose lowercased name contains any of its
/// tokens. Sides still unresolved fall back to the largest sheets by row
/// count whose names do not look like mapping sheets; when only one such
/// sheet exists it serves both sides. With no candidate sheets at all, the
/// run fails structurally.
pub fn locate_tables(
    workbook: &Workbook,
    workbook_name: &str,
    spec: &LocateSpec,
) -> Result<(usize, usize), ParityError> {
    let mut source = find_by_tokens(workbook, &spec.source_tokens);
    let mut target = find_by_tokens(workbook, &spec.target_tokens);

    if source.is_none() || target.is_none() {
        // Rank non-mapping sheets by size, original order breaking ties.
        let mut ranked: Vec<usize> = (0..workbook.len())
            .filter(|&index| {
                let sheet = &workbook.sheets()[index];
                !sheet.name.to_lowercase().contains("map")
            })
            .collect();
        ranked.sort_by_key(|&index| {
            (
                std::cmp::Reverse(workbook.sheets()[index].table.row_count()),
                index,
            )
        });
        match ranked.len() {
            0 => {
                return Err(ParityError::TablesNotFound {
                    workbook: workbook_name.to_string(),
                });
            }
            1 => {
                source = source.or(Some(ranked[0]));
                target = target.or(Some(ranked[0]));
            }
            _ => {
                source = source.or(Some(ranked[0]));
                target = target.or(Some(ranked[1]));
            }
        }
    }

    let (Some(source), Some(target)) = (source, target) else {
        return Err(ParityError::TablesNotFound {
            workbook: workbook_name.to_string(),
        });
    };
    debug!(
        source_sheet = %workbook.sheets()[source].name,
        target_sheet = %workbook.sheets()[target].name,
        "sheets located"
    );
    Ok((source, target))
}

fn find_by_tokens(workbook: &Workbook, tokens: &[String]) -> Option<usize> {
    if tokens.is_empty() {
        return None;
    }
    workbook.sheets().iter().position(|sheet| {
        let name = sheet.name.to_lowercase();
        tokens
            .iter()
            .any(|token| name.contains(&token.to_lowercase()))
    })
}
