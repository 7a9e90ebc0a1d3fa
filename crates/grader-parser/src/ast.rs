use chrono::NaiveDate;
use grader_common::clock::ClockTime;
use grader_common::{OsatsMetric, Procedure};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Script {
    pub lines: Vec<Line>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Line {
    pub command: Option<Command>,
    pub comment: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Command {
    // Procedure information
    Name(String),
    Grader(String),
    Date(DateValue),
    Procedure(Procedure),

    // Entries
    Entry(EntryCmd),
    AddEntry,

    // Summary
    TotalTime(ClockValue),
    Errors(u32),
    Score(ScoreCmd),

    // Events
    Save,
    Export,
    Preview,

    // Inspection
    Show,
    Records(RecordsCmd),
    Help,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DateValue {
    Today,
    On(NaiveDate),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ClockValue {
    Clear,
    Set(ClockTime),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntryCmd {
    /// 1-based slot number.
    pub index: usize,
    pub field: EntryField,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum EntryField {
    Time(ClockValue),
    Comment(String),
    Metric(Option<OsatsMetric>),
    Remarks(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreCmd {
    pub metric: OsatsMetric,
    pub score: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RecordsCmd {
    pub json: bool,
}
