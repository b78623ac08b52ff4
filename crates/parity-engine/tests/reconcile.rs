use parity_detect::detect_mapping;
use parity_engine::{
    IdentifierHints, LocateSpec, ReconcileInput, locate_tables, reconcile, resolve_identifiers,
};
use parity_model::{FieldMapping, Table, Workbook};

fn table(columns: &[&str], rows: &[&[&str]]) -> Table {
    let mut table = Table::new(columns.iter().map(|c| (*c).to_string()).collect());
    for row in rows {
        table.push_row(row.iter().map(|v| (*v).to_string()).collect());
    }
    table
}

fn mapping(pairs: &[(&str, &str)]) -> FieldMapping {
    pairs
        .iter()
        .map(|(s, t)| ((*s).to_string(), (*t).to_string()))
        .collect()
}

#[test]
fn clean_reconciliation_across_type_tolerances() {
    // Case-insensitive names, subset tags, day-first dates, formatted
    // numbers, and boolean tokens all reconcile without findings.
    let source = table(
        &["id", "name", "tags", "renewal", "acv", "active"],
        &[&["1", "Alice", "x,y", "02/03/2024", "1,234.50", "Yes"]],
    );
    let target = table(
        &["id", "name", "tags", "renewal", "acv", "active"],
        &[&["1", "alice", "x,y,z", "2024-03-02", "1234.5", "true"]],
    );
    let map = mapping(&[
        ("id", "id"),
        ("name", "name"),
        ("tags", "tags"),
        ("renewal", "renewal"),
        ("acv", "acv"),
        ("active", "active"),
    ]);
    let report = reconcile(&ReconcileInput::new(&source, &target, &map, "id", "id"));
    assert!(report.is_clean(), "{report:?}");
}

#[test]
fn full_run_from_workbook_detection_to_report() {
    let mut workbook = Workbook::new();
    workbook.push(
        "Field Mapping",
        table(
            &["SF Attribute", "Target Attribute"],
            &[
                &["External ID", "Record Key"],
                &["Opportunity Name", "Title"],
                &["Stage", "Lifecycle Stage"],
            ],
        ),
    );
    workbook.push(
        "Salesforce Opportunities",
        table(
            &["External ID", "Opportunity Name", "Stage"],
            &[
                &["OP-1", "Acme Renewal", "Closed Won"],
                &["OP-2", "Globex Upsell", "Negotiation"],
                &["", "No Identifier", "Open"],
            ],
        ),
    );
    workbook.push(
        "Velaris Opportunities",
        table(
            &["Record Key", "Title", "Lifecycle Stage"],
            &[
                &["op-1", "Acme Renewal", "closed won"],
                &["OP-3", "Initech Pilot", "Onboarding"],
            ],
        ),
    );

    let detected = detect_mapping(&workbook);
    assert_eq!(detected.len(), 3);

    let spec = LocateSpec {
        source_tokens: vec!["salesforce".to_string()],
        target_tokens: vec!["velaris".to_string()],
    };
    let (source_index, target_index) = locate_tables(&workbook, "wb", &spec).unwrap();
    let source = &workbook.sheets()[source_index].table;
    let target = &workbook.sheets()[target_index].table;

    let hints = IdentifierHints {
        mapping_hints: vec!["external id".to_string()],
        ..IdentifierHints::default()
    };
    let (source_id, target_id) =
        resolve_identifiers(&detected, source, target, &hints, "wb").unwrap();
    assert_eq!(source_id, "External ID");
    assert_eq!(target_id, "Record Key");

    let report = reconcile(&ReconcileInput::new(
        source, target, &detected, &source_id, &target_id,
    ));

    // OP-1 matches fully; OP-2 is missing; OP-3 is extra; the blank-id
    // source row is nowhere.
    assert!(report.mismatches.is_empty(), "{:?}", report.mismatches);
    assert_eq!(report.missing.len(), 1);
    assert_eq!(report.missing[0].id, "OP-2");
    assert_eq!(report.extras.len(), 1);
    assert_eq!(report.extras[0].id, "OP-3");
    assert_eq!(report.extras[0].label, "OP-3");
}

#[test]
fn identity_fallback_drives_comparison_when_no_mapping_detected() {
    let source = table(
        &["id", "Shared", "Source Only"],
        &[&["1", "same", "ignored"]],
    );
    let target = table(
        &["id", "Shared", "Target Only"],
        &[&["1", "different", "ignored"]],
    );
    let map = FieldMapping::identity(source.columns(), target.columns());
    let pairs: Vec<(&str, &str)> = map.iter().collect();
    assert_eq!(pairs, [("id", "id"), ("Shared", "Shared")]);

    let report = reconcile(&ReconcileInput::new(&source, &target, &map, "id", "id"));
    assert_eq!(report.mismatches.len(), 1);
    assert_eq!(report.mismatches[0].field, "Shared");
}

#[test]
fn repeated_runs_produce_identical_reports() {
    let source = table(
        &["id", "v", "tags"],
        &[
            &["a", "1", "x"],
            &["b", "2", "y,z"],
            &["c", "3", ""],
            &["d", "4", "w"],
        ],
    );
    let target = table(
        &["id", "v", "tags"],
        &[
            &["b", "2", "y"],
            &["a", "9", "x"],
            &["e", "5", "q"],
        ],
    );
    let map = mapping(&[("id", "id"), ("v", "v"), ("tags", "tags")]);
    let input = ReconcileInput::new(&source, &target, &map, "id", "id");
    let first = reconcile(&input);
    let second = reconcile(&input);
    assert_eq!(first.mismatches, second.mismatches);
    assert_eq!(first.missing, second.missing);
    assert_eq!(first.extras, second.extras);

    // Ordering is source order for mismatches/missing, target order for
    // extras.
    let mismatch_ids: Vec<&str> = first.mismatches.iter().map(|m| m.id.as_str()).collect();
    assert_eq!(mismatch_ids, ["a", "b"]);
    let missing_ids: Vec<&str> = first.missing.iter().map(|m| m.id.as_str()).collect();
    assert_eq!(missing_ids, ["c", "d"]);
    let extra_ids: Vec<&str> = first.extras.iter().map(|e| e.id.as_str()).collect();
    assert_eq!(extra_ids, ["e"]);
}
