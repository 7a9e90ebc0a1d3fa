use chrono::NaiveDate;
use grader_common::{
    OsatsMetric, OsatsScores, Procedure, RecordInput, TimeEntry, ValidationError, build,
};

fn input(name: &str, grader: &str) -> RecordInput {
    RecordInput {
        name: name.to_string(),
        date: NaiveDate::from_ymd_opt(2024, 3, 5).unwrap(),
        procedure: Procedure::PJ,
        grader: grader.to_string(),
        time_entries: vec![TimeEntry::new("08:00:00", "ok", None, "")],
        total_time: String::new(),
        total_errors: 2,
        osats_scores: [(OsatsMetric::TimeAndMotion, "3")].into_iter().collect(),
    }
}

#[test]
fn test_missing_name_or_grader_is_rejected() {
    let cases = [
        ("", "Dr. Smith"),
        ("Jane Doe", ""),
        ("   ", "Dr. Smith"),
        ("Jane Doe", "\t\n"),
        ("", ""),
    ];
    for (name, grader) in cases {
        assert_eq!(
            build(input(name, grader)),
            Err(ValidationError::MissingRequiredField),
            "name={name:?} grader={grader:?}"
        );
    }
}

#[test]
fn test_non_blank_name_and_grader_build() {
    let record = build(input(" Jane ", "x")).expect("record should build");
    assert_eq!(record.name(), " Jane ");
    assert_eq!(record.grader(), "x");
}

#[test]
fn test_validation_message() {
    assert_eq!(
        ValidationError::MissingRequiredField.to_string(),
        "Please enter the Name and Grader information."
    );
}

#[test]
fn test_record_keeps_fields_and_iso_date() {
    let record = build(input("Jane Doe", "Dr. Smith")).unwrap();
    assert_eq!(record.date(), "2024-03-05");
    assert_eq!(record.procedure(), Procedure::PJ);
    assert_eq!(record.time_entries().len(), 1);
    assert_eq!(record.total_time(), "");
    assert_eq!(record.total_errors(), 2);

    let expected: OsatsScores = [(OsatsMetric::TimeAndMotion, "3")].into_iter().collect();
    assert_eq!(record.osats_scores(), &expected);
}

#[test]
fn test_builder_does_not_refilter_entries() {
    let mut raw = input("Jane Doe", "Dr. Smith");
    raw.time_entries = vec![
        TimeEntry::new("", "", None, ""),
        TimeEntry::new("", "second", None, ""),
    ];
    let record = build(raw).unwrap();
    assert_eq!(record.time_entries().len(), 2);
    assert_eq!(record.time_entries()[1].comment, "second");
}
