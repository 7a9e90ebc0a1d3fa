use crate::model::{GradingRecord, OsatsScores, Procedure, TimeEntry};
use chrono::NaiveDate;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Please enter the Name and Grader information.")]
    MissingRequiredField,
}

/// Field values for one record, as collected by the form.
///
/// `time_entries` must already be filtered; the builder keeps them as given.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordInput {
    pub name: String,
    pub date: NaiveDate,
    pub procedure: Procedure,
    pub grader: String,
    pub time_entries: Vec<TimeEntry>,
    pub total_time: String,
    pub total_errors: u32,
    pub osats_scores: OsatsScores,
}

/// Build a record, rejecting blank name or grader.
pub fn build(input: RecordInput) -> Result<GradingRecord, ValidationError> {
    if input.name.trim().is_empty() || input.grader.trim().is_empty() {
        return Err(ValidationError::MissingRequiredField);
    }

    Ok(GradingRecord {
        name: input.name,
        date: input.date.format("%Y-%m-%d").to_string(),
        procedure: input.procedure,
        grader: input.grader,
        time_entries: input.time_entries,
        total_time: input.total_time,
        total_errors: input.total_errors,
        osats_scores: input.osats_scores,
    })
}
