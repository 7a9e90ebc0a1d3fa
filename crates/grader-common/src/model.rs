//! Grading record types shared by the builder, the session store and the export transform.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ModelError {
    #[error("Unknown procedure: {0} (expected one of GJ, PJ, HJ)")]
    UnknownProcedure(String),
    #[error("Unknown OSATS metric: {0}")]
    UnknownMetric(String),
}

/// Surgical procedure being graded.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Procedure {
    #[default]
    GJ,
    PJ,
    HJ,
}

impl Procedure {
    pub const ALL: [Procedure; 3] = [Procedure::GJ, Procedure::PJ, Procedure::HJ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Procedure::GJ => "GJ",
            Procedure::PJ => "PJ",
            Procedure::HJ => "HJ",
        }
    }
}

impl fmt::Display for Procedure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Procedure {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        Procedure::ALL
            .into_iter()
            .find(|p| p.as_str().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| ModelError::UnknownProcedure(s.to_string()))
    }
}

/// The seven OSATS rubric metrics.
///
/// Declaration order is the rubric order; `Ord` follows it, so ordered
/// collections keyed by metric iterate in rubric order.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum OsatsMetric {
    #[serde(rename = "Respect for tissue")]
    RespectForTissue,
    #[serde(rename = "Time and motion")]
    TimeAndMotion,
    #[serde(rename = "Instrument handling")]
    InstrumentHandling,
    #[serde(rename = "Knowledge of instruments")]
    KnowledgeOfInstruments,
    #[serde(rename = "Use of assistance")]
    UseOfAssistance,
    #[serde(rename = "Flow/forward progress")]
    FlowForwardProgress,
    #[serde(rename = "Knowledge of procedure")]
    KnowledgeOfProcedure,
}

impl OsatsMetric {
    pub const ALL: [OsatsMetric; 7] = [
        OsatsMetric::RespectForTissue,
        OsatsMetric::TimeAndMotion,
        OsatsMetric::InstrumentHandling,
        OsatsMetric::KnowledgeOfInstruments,
        OsatsMetric::UseOfAssistance,
        OsatsMetric::FlowForwardProgress,
        OsatsMetric::KnowledgeOfProcedure,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            OsatsMetric::RespectForTissue => "Respect for tissue",
            OsatsMetric::TimeAndMotion => "Time and motion",
            OsatsMetric::InstrumentHandling => "Instrument handling",
            OsatsMetric::KnowledgeOfInstruments => "Knowledge of instruments",
            OsatsMetric::UseOfAssistance => "Use of assistance",
            OsatsMetric::FlowForwardProgress => "Flow/forward progress",
            OsatsMetric::KnowledgeOfProcedure => "Knowledge of procedure",
        }
    }
}

impl fmt::Display for OsatsMetric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for OsatsMetric {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        OsatsMetric::ALL
            .into_iter()
            .find(|m| m.label().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| ModelError::UnknownMetric(s.to_string()))
    }
}

/// One timestamped observation made during the procedure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeEntry {
    pub timestamp: String,
    pub comment: String,
    pub osats_metric: Option<OsatsMetric>,
    pub remarks: String,
}

impl TimeEntry {
    pub fn new(
        timestamp: impl Into<String>,
        comment: impl Into<String>,
        osats_metric: Option<OsatsMetric>,
        remarks: impl Into<String>,
    ) -> Self {
        Self {
            timestamp: timestamp.into(),
            comment: comment.into(),
            osats_metric,
            remarks: remarks.into(),
        }
    }

    /// Label of the selected metric, or `""` for the "no selection" option.
    pub fn metric_label(&self) -> &'static str {
        self.osats_metric.map(|m| m.label()).unwrap_or("")
    }

    /// Whether the form keeps this slot when a record is saved.
    ///
    /// The metric clause compares a trimmed label against a single space, which
    /// never matches, so every slot is kept. Blank slots vanish later when the
    /// export prunes rows with empty cells.
    pub fn is_retained(&self) -> bool {
        !self.timestamp.is_empty()
            || !self.comment.trim().is_empty()
            || !self.remarks.trim().is_empty()
            || self.metric_label().trim() != " "
    }
}

/// Score selections keyed by metric, iterated in rubric order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OsatsScores(BTreeMap<OsatsMetric, String>);

impl OsatsScores {
    pub fn new() -> Self {
        Self(BTreeMap::new())
    }

    pub fn insert(&mut self, metric: OsatsMetric, score: impl Into<String>) -> Option<String> {
        self.0.insert(metric, score.into())
    }

    pub fn get(&self, metric: OsatsMetric) -> Option<&str> {
        self.0.get(&metric).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (OsatsMetric, &str)> {
        self.0.iter().map(|(m, s)| (*m, s.as_str()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<S: Into<String>> FromIterator<(OsatsMetric, S)> for OsatsScores {
    fn from_iter<I: IntoIterator<Item = (OsatsMetric, S)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(m, s)| (m, s.into())).collect())
    }
}

/// One completed grading submission.
///
/// Only [`crate::builder::build`] constructs records, so `name` and `grader`
/// are always non-blank.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GradingRecord {
    pub(crate) name: String,
    pub(crate) date: String,
    pub(crate) procedure: Procedure,
    pub(crate) grader: String,
    pub(crate) time_entries: Vec<TimeEntry>,
    pub(crate) total_time: String,
    pub(crate) total_errors: u32,
    pub(crate) osats_scores: OsatsScores,
}

impl GradingRecord {
    pub fn name(&self) -> &str {
        &self.name
    }

    /// ISO `YYYY-MM-DD` date.
    pub fn date(&self) -> &str {
        &self.date
    }

    pub fn procedure(&self) -> Procedure {
        self.procedure
    }

    pub fn grader(&self) -> &str {
        &self.grader
    }

    pub fn time_entries(&self) -> &[TimeEntry] {
        &self.time_entries
    }

    pub fn total_time(&self) -> &str {
        &self.total_time
    }

    pub fn total_errors(&self) -> u32 {
        self.total_errors
    }

    pub fn osats_scores(&self) -> &OsatsScores {
        &self.osats_scores
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn metric_labels_round_trip_through_from_str() {
        for metric in OsatsMetric::ALL {
            assert_eq!(metric.label().parse::<OsatsMetric>(), Ok(metric));
        }
        assert_eq!(
            "time AND motion".parse::<OsatsMetric>(),
            Ok(OsatsMetric::TimeAndMotion)
        );
        assert!("Bedside manner".parse::<OsatsMetric>().is_err());
    }

    #[test]
    fn procedure_parses_case_insensitively() {
        assert_eq!("pj".parse::<Procedure>(), Ok(Procedure::PJ));
        assert_eq!(
            "XJ".parse::<Procedure>(),
            Err(ModelError::UnknownProcedure("XJ".into()))
        );
    }

    #[test]
    fn scores_iterate_in_rubric_order() {
        let scores: OsatsScores = [
            (OsatsMetric::KnowledgeOfProcedure, "2"),
            (OsatsMetric::RespectForTissue, "4"),
            (OsatsMetric::UseOfAssistance, "3"),
        ]
        .into_iter()
        .collect();

        let order: Vec<OsatsMetric> = scores.iter().map(|(m, _)| m).collect();
        assert_eq!(
            order,
            vec![
                OsatsMetric::RespectForTissue,
                OsatsMetric::UseOfAssistance,
                OsatsMetric::KnowledgeOfProcedure,
            ]
        );
    }

    #[test]
    fn blank_entries_are_still_retained() {
        let blank = TimeEntry::new("", "   ", None, "");
        assert!(blank.is_retained());
    }

    #[test]
    fn scores_serialize_with_metric_labels() {
        let scores: OsatsScores = [(OsatsMetric::FlowForwardProgress, "5")]
            .into_iter()
            .collect();
        let json = serde_json::to_string(&scores).unwrap();
        assert_eq!(json, r#"{"Flow/forward progress":"5"}"#);
    }
}
