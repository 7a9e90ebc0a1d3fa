//! Raw form values as the input layer holds them between events.
//!
//! The form mirrors a dropdown-driven page: entry slots with clock
//! selections, a metric choice that may be left empty, and one score
//! selection per rubric metric. Saving turns it into a [`RecordInput`].

use crate::builder::RecordInput;
use crate::clock::ClockSelection;
use crate::model::{OsatsMetric, OsatsScores, Procedure, TimeEntry};
use chrono::NaiveDate;
use std::ops::RangeInclusive;
use thiserror::Error;

pub const DEFAULT_ENTRY_SLOTS: usize = 7;
pub const SCORE_CHOICES: RangeInclusive<u8> = 1..=5;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormError {
    #[error("Entry {index} does not exist (the form has {count} entries)")]
    NoSuchEntry { index: usize, count: usize },
    #[error("Score for {metric} must be between 1 and 5, got {score}")]
    ScoreOutOfRange { metric: OsatsMetric, score: u8 },
}

/// Inputs of one expandable entry on the form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EntrySlot {
    pub time: ClockSelection,
    pub comment: String,
    pub osats_metric: Option<OsatsMetric>,
    pub remarks: String,
}

impl EntrySlot {
    pub fn to_entry(&self) -> TimeEntry {
        TimeEntry::new(
            self.time.timestamp(),
            self.comment.clone(),
            self.osats_metric,
            self.remarks.clone(),
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormState {
    pub name: String,
    pub date: NaiveDate,
    pub procedure: Procedure,
    pub grader: String,
    entries: Vec<EntrySlot>,
    pub total_time: ClockSelection,
    pub total_errors: u32,
    scores: OsatsScores,
}

impl FormState {
    pub fn new(date: NaiveDate) -> Self {
        Self::with_slots(date, DEFAULT_ENTRY_SLOTS, Procedure::default())
    }

    /// A blank form dated today (local time).
    pub fn today() -> Self {
        Self::new(chrono::Local::now().date_naive())
    }

    pub fn with_slots(date: NaiveDate, slots: usize, procedure: Procedure) -> Self {
        let first_choice = SCORE_CHOICES.start().to_string();
        Self {
            name: String::new(),
            date,
            procedure,
            grader: String::new(),
            entries: vec![EntrySlot::default(); slots],
            total_time: ClockSelection::default(),
            total_errors: 0,
            scores: OsatsMetric::ALL
                .into_iter()
                .map(|m| (m, first_choice.clone()))
                .collect(),
        }
    }

    pub fn entries(&self) -> &[EntrySlot] {
        &self.entries
    }

    pub fn entry_count(&self) -> usize {
        self.entries.len()
    }

    /// Slot by 1-based index, as labelled on the form.
    pub fn entry_mut(&mut self, index: usize) -> Result<&mut EntrySlot, FormError> {
        let count = self.entries.len();
        if index == 0 || index > count {
            return Err(FormError::NoSuchEntry { index, count });
        }
        Ok(&mut self.entries[index - 1])
    }

    /// Append one empty slot and return the new slot count.
    pub fn add_entry(&mut self) -> usize {
        self.entries.push(EntrySlot::default());
        self.entries.len()
    }

    pub fn scores(&self) -> &OsatsScores {
        &self.scores
    }

    pub fn set_score(&mut self, metric: OsatsMetric, score: u8) -> Result<(), FormError> {
        if !SCORE_CHOICES.contains(&score) {
            return Err(FormError::ScoreOutOfRange { metric, score });
        }
        self.scores.insert(metric, score.to_string());
        Ok(())
    }

    /// Snapshot the form into builder input, keeping only retained entries.
    pub fn to_input(&self) -> RecordInput {
        RecordInput {
            name: self.name.clone(),
            date: self.date,
            procedure: self.procedure,
            grader: self.grader.clone(),
            time_entries: self
                .entries
                .iter()
                .map(EntrySlot::to_entry)
                .filter(TimeEntry::is_retained)
                .collect(),
            total_time: self.total_time.timestamp(),
            total_errors: self.total_errors,
            osats_scores: self.scores.clone(),
        }
    }
}
