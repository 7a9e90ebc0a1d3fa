//! Flattening of the newest saved record into label/value CSV rows.
//!
//! Rows are generated in a fixed order, then every row that has an empty cell
//! is dropped. Pruning looks at all cells, labels included, and removes the
//! whole row rather than blanking the value; an unset total time therefore
//! produces no `Total Procedure Time` row at all.

use crate::csv;
use crate::model::{GradingRecord, OsatsMetric};
use crate::store::SessionStore;
use thiserror::Error;
use tracing::{debug, warn};

/// MIME type of the download artifact.
pub const CSV_MIME: &str = "text/csv";

pub const OSATS_HEADER: &str = "OSATS Metrics and Scores";

/// One output line. Label/value pairs, except the single-cell OSATS header.
pub type Row = Vec<String>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExportError {
    #[error("No data to export. Please save entries first.")]
    NoDataToExport,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CsvExport {
    pub filename: String,
    /// Rows after pruning, in output order.
    pub rows: Vec<Row>,
    pub bytes: Vec<u8>,
    pub osats_total: u64,
    /// Metrics whose score was not a whole number and counted as zero.
    pub coerced_scores: Vec<OsatsMetric>,
}

impl CsvExport {
    pub fn mime(&self) -> &'static str {
        CSV_MIME
    }

    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.bytes).into_owned()
    }
}

/// Export the most recently saved record of the session.
pub fn export(store: &SessionStore) -> Result<CsvExport, ExportError> {
    let record = store.last().ok_or(ExportError::NoDataToExport)?;
    Ok(export_record(record))
}

pub fn export_record(record: &GradingRecord) -> CsvExport {
    let flat = flatten(record);
    for metric in &flat.coerced_scores {
        warn!(
            metric = metric.label(),
            score = record.osats_scores().get(*metric).unwrap_or_default(),
            "non-numeric OSATS score counted as zero"
        );
    }

    let generated = flat.rows.len();
    let rows = prune(flat.rows);
    debug!(generated, kept = rows.len(), "pruned export rows");

    let bytes = csv::write_rows(&rows);
    CsvExport {
        filename: filename(record),
        rows,
        bytes,
        osats_total: flat.osats_total,
        coerced_scores: flat.coerced_scores,
    }
}

/// Rows before pruning, with the OSATS total computed alongside.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlatRecord {
    pub rows: Vec<Row>,
    pub osats_total: u64,
    pub coerced_scores: Vec<OsatsMetric>,
}

pub fn flatten(record: &GradingRecord) -> FlatRecord {
    let mut rows: Vec<Row> = vec![
        pair("Name", record.name()),
        pair("Date", record.date()),
        pair("Procedure", record.procedure().as_str()),
        pair("Grader", record.grader()),
    ];

    for (idx, entry) in record.time_entries().iter().enumerate() {
        let idx = idx + 1;
        rows.push(pair(format!("Time {idx}"), &entry.timestamp));
        rows.push(pair(format!("Comment {idx}"), &entry.comment));
        rows.push(pair(format!("OSATS Metric {idx}"), entry.metric_label()));
        rows.push(pair(format!("Remarks {idx}"), &entry.remarks));
    }

    rows.push(pair("Total Procedure Time", record.total_time()));
    rows.push(pair("Total Errors", record.total_errors().to_string()));
    rows.push(vec![OSATS_HEADER.to_string()]);

    let mut osats_total: u64 = 0;
    let mut coerced_scores = Vec::new();
    for (metric, score) in record.osats_scores().iter() {
        match score_value(score) {
            Some(value) => osats_total = osats_total.saturating_add(value),
            None => coerced_scores.push(metric),
        }
        rows.push(pair(metric.label(), score));
    }

    rows.push(pair("Total OSATS Score", osats_total.to_string()));

    FlatRecord {
        rows,
        osats_total,
        coerced_scores,
    }
}

/// Drop every row that has at least one empty cell.
pub fn prune(rows: Vec<Row>) -> Vec<Row> {
    rows.into_iter()
        .filter(|row| row.iter().all(|cell| !cell.is_empty()))
        .collect()
}

/// `{name}_{grader}_{date}.csv` with spaces and dashes turned into underscores.
///
/// Nothing else is sanitized; path separators in a name pass through.
pub fn filename(record: &GradingRecord) -> String {
    let name_safe = record.name().replace(' ', "_");
    let grader_safe = record.grader().replace(' ', "_");
    let date_safe = record.date().replace('-', "_");
    format!("{name_safe}_{grader_safe}_{date_safe}.csv")
}

fn score_value(score: &str) -> Option<u64> {
    if score.is_empty() || !score.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    score.parse().ok()
}

fn pair(label: impl Into<String>, value: impl Into<String>) -> Row {
    vec![label.into(), value.into()]
}
