//! Identifier-column detection over header names.

/// Known identifier headers, matched exactly against the original header
/// text. First column carrying any of these wins.
pub const FAVORITE_ID_HEADERS: &[&str] = &[
    "MsafeID__c",
    "External ID",
    "external id",
    "external_id",
    "id",
    "Id",
    "Opportunity 18 digit ID",
];

/// Identifier-ish substrings, in priority order, matched against lowercased
/// headers. The generic "id" token deliberately comes first: it reproduces
/// the scanning order the report consumers already rely on.
pub const ID_HEADER_TOKENS: &[&str] = &[
    "id",
    "external id",
    "externalid",
    "external_id",
    "safeid",
    "msafe",
    "opportunity",
    "booking",
    "subscription",
    "account 18",
    "account id",
    "salesforce",
    "salesforce id",
    "18 digit",
    "18digit",
];

/// Picks the identifier column from an ordered header list.
///
/// Priority: exact favorite header (columns scanned in table order), then
/// each token of [`ID_HEADER_TOKENS`] in order against lowercased headers,
/// then the first column. `None` only for a zero-column table.
pub fn candidate_id_column(columns: &[String]) -> Option<&str> {
    for column in columns {
        if FAVORITE_ID_HEADERS.contains(&column.as_str()) {
            return Some(column);
        }
    }
    for token in ID_HEADER_TOKENS {
        for column in columns {
            if column.to_lowercase().contains(token) {
                return Some(column);
            }
        }
    }
    columns.first().map(String::as_str)
}
