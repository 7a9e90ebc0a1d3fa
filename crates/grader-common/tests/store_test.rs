use chrono::NaiveDate;
use grader_common::{
    ExportError, ExportState, OsatsScores, Procedure, RecordInput, SessionStore, build, export,
};

fn record_for(name: &str) -> grader_common::GradingRecord {
    build(RecordInput {
        name: name.to_string(),
        date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
        procedure: Procedure::HJ,
        grader: "Grader".to_string(),
        time_entries: Vec::new(),
        total_time: String::new(),
        total_errors: 0,
        osats_scores: OsatsScores::new(),
    })
    .unwrap()
}

#[test]
fn test_empty_store_has_nothing_to_export() {
    let store = SessionStore::new();
    assert_eq!(store.state(), ExportState::Empty);
    assert!(store.last().is_none());
    assert_eq!(export(&store), Err(ExportError::NoDataToExport));
    assert_eq!(
        ExportError::NoDataToExport.to_string(),
        "No data to export. Please save entries first."
    );
}

#[test]
fn test_append_only_growth_keeps_prior_records() {
    let mut store = SessionStore::new();
    let mut snapshots = Vec::new();

    for (k, name) in ["first", "second", "third"].into_iter().enumerate() {
        let record = record_for(name);
        snapshots.push(record.clone());
        store.append(record);

        assert_eq!(store.len(), k + 1);
        assert_eq!(store.records(), snapshots.as_slice());
    }
    assert_eq!(store.state(), ExportState::HasData);
}

#[test]
fn test_export_targets_newest_record() {
    let mut store = SessionStore::new();
    store.append(record_for("Old Student"));
    store.append(record_for("New Student"));

    let csv = export(&store).unwrap();
    assert_eq!(csv.rows[0], vec!["Name".to_string(), "New Student".to_string()]);
    assert!(!csv.text().contains("Old Student"));
    assert_eq!(csv.filename, "New_Student_Grader_2024_01_01.csv");
}
