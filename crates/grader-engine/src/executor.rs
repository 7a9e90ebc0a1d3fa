//! Command execution pipeline for the console form.
//!
//! `FormExecutor` owns the form state and the session store:
//! input → parse → apply to form / fire save or export → format
//!
//! Each line is handled to completion before the next one is read.

use crate::config::GraderConfig;
use crate::formatter::{HELP, format_form, format_records};
use grader_common::export::CsvExport;
use grader_common::{
    ExportError, FormError, FormState, SessionStore, ValidationError, build, export,
};
use grader_parser::{ClockValue, Command, DateValue, EntryField, ParseError, parse};
use std::path::{Component, Path, PathBuf};
use tracing::{debug, info, warn};

pub const SAVE_SUCCESS: &str = "Entry saved successfully!";

#[derive(Debug, thiserror::Error)]
pub enum ExecutorError {
    #[error("Parse error: {0}")]
    Parse(#[from] ParseError),

    #[error("{0}")]
    Form(#[from] FormError),

    #[error("{0}")]
    Validation(#[from] ValidationError),

    #[error("{0}")]
    Export(#[from] ExportError),

    #[error("Refusing to write '{0}' outside the export directory")]
    ExportPath(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result of executing a line.
pub struct ExecutionResult {
    /// Formatted output string for display.
    pub output: String,
    /// Whether execution was successful.
    pub success: bool,
}

/// A CSV file written to the export directory.
#[derive(Debug, Clone)]
pub struct ExportArtifact {
    pub path: PathBuf,
    pub csv: CsvExport,
}

pub struct FormExecutor {
    form: FormState,
    store: SessionStore,
    export_dir: PathBuf,
}

impl Default for FormExecutor {
    fn default() -> Self {
        Self::new(&GraderConfig::default())
    }
}

impl FormExecutor {
    pub fn new(config: &GraderConfig) -> Self {
        let form = FormState::with_slots(
            chrono::Local::now().date_naive(),
            config.form.default_entries,
            config.form.default_procedure,
        );
        Self::with_form(form, config.export.output_dir.clone())
    }

    pub fn with_form(form: FormState, export_dir: impl Into<PathBuf>) -> Self {
        Self {
            form,
            store: SessionStore::new(),
            export_dir: export_dir.into(),
        }
    }

    pub fn form(&self) -> &FormState {
        &self.form
    }

    pub fn store(&self) -> &SessionStore {
        &self.store
    }

    pub fn export_dir(&self) -> &Path {
        &self.export_dir
    }

    /// Execute a line of input.
    pub async fn execute_line(&mut self, line: &str) -> Result<ExecutionResult, ExecutorError> {
        let script = parse(line)?;

        let mut outputs = Vec::new();
        for script_line in script.lines {
            if let Some(cmd) = script_line.command {
                debug!(?cmd, "executing form command");
                outputs.push(self.execute(cmd).await?);
            }
        }

        Ok(ExecutionResult {
            output: outputs.join("\n"),
            success: true,
        })
    }

    pub async fn execute(&mut self, cmd: Command) -> Result<String, ExecutorError> {
        match cmd {
            Command::Name(name) => {
                self.form.name = name;
                Ok(format!("Name: {}", self.form.name))
            }
            Command::Grader(grader) => {
                self.form.grader = grader;
                Ok(format!("Grader: {}", self.form.grader))
            }
            Command::Date(value) => {
                self.form.date = match value {
                    DateValue::Today => chrono::Local::now().date_naive(),
                    DateValue::On(date) => date,
                };
                Ok(format!("Date: {}", self.form.date.format("%Y-%m-%d")))
            }
            Command::Procedure(procedure) => {
                self.form.procedure = procedure;
                Ok(format!("Procedure: {}", procedure))
            }

            Command::Entry(entry) => {
                let slot = self.form.entry_mut(entry.index)?;
                let what = match entry.field {
                    EntryField::Time(ClockValue::Set(time)) => {
                        slot.time.set(time);
                        format!("Time {}", time)
                    }
                    EntryField::Time(ClockValue::Clear) => {
                        slot.time.clear();
                        "Time cleared".to_string()
                    }
                    EntryField::Comment(comment) => {
                        slot.comment = comment;
                        "Comment set".to_string()
                    }
                    EntryField::Metric(metric) => {
                        slot.osats_metric = metric;
                        format!("OSATS Metric {}", slot.to_entry().metric_label())
                    }
                    EntryField::Remarks(remarks) => {
                        slot.remarks = remarks;
                        "Remarks set".to_string()
                    }
                };
                Ok(format!("Entry {}: {}", entry.index, what.trim_end()))
            }
            Command::AddEntry => {
                let count = self.add_entry();
                Ok(format!("Added entry {}", count))
            }

            Command::TotalTime(ClockValue::Set(time)) => {
                self.form.total_time.set(time);
                Ok(format!("Total Procedure Time: {}", time))
            }
            Command::TotalTime(ClockValue::Clear) => {
                self.form.total_time.clear();
                Ok("Total Procedure Time cleared".into())
            }
            Command::Errors(count) => {
                self.form.total_errors = count;
                Ok(format!("Total Errors: {}", count))
            }
            Command::Score(score) => {
                self.form.set_score(score.metric, score.score)?;
                Ok(format!("{} Score: {}", score.metric, score.score))
            }

            Command::Save => {
                self.save()?;
                Ok(SAVE_SUCCESS.into())
            }
            Command::Export => {
                let artifact = self.export().await?;
                Ok(format!(
                    "Download ready: {} ({} bytes, {})",
                    artifact.path.display(),
                    artifact.csv.bytes.len(),
                    artifact.csv.mime()
                ))
            }
            Command::Preview => {
                let csv = export(&self.store)?;
                Ok(format!("{}\n{}", csv.filename, csv.text().trim_end()))
            }

            Command::Show => Ok(format_form(&self.form)),
            Command::Records(opts) => {
                if opts.json {
                    Ok(serde_json::to_string_pretty(self.store.records())?)
                } else {
                    Ok(format_records(self.store.records()))
                }
            }
            Command::Help => Ok(HELP.into()),
        }
    }

    /// Build a record from the current form and append it to the session.
    ///
    /// Returns the number of saved records. A failed build leaves the session untouched.
    pub fn save(&mut self) -> Result<usize, ExecutorError> {
        let record = build(self.form.to_input())?;
        self.store.append(record);
        info!(
            records = self.store.len(),
            procedure = %self.form.procedure,
            "record saved"
        );
        Ok(self.store.len())
    }

    /// Export the newest record and write it into the export directory.
    ///
    /// The filename comes from the record unchanged, so one that is not a plain
    /// file name (absolute, `..`, nested) is refused before anything is written.
    pub async fn export(&mut self) -> Result<ExportArtifact, ExecutorError> {
        let csv = export(&self.store)?;
        let path = self.export_path(&csv.filename)?;
        tokio::fs::create_dir_all(&self.export_dir).await?;
        tokio::fs::write(&path, &csv.bytes).await?;
        info!(
            path = %path.display(),
            bytes = csv.bytes.len(),
            rows = csv.rows.len(),
            osats_total = csv.osats_total,
            "record exported"
        );
        Ok(ExportArtifact { path, csv })
    }

    fn export_path(&self, filename: &str) -> Result<PathBuf, ExecutorError> {
        let mut components = Path::new(filename).components();
        match (components.next(), components.next()) {
            (Some(Component::Normal(name)), None) => Ok(self.export_dir.join(name)),
            _ => {
                warn!(filename, "export filename leaves the export directory");
                Err(ExecutorError::ExportPath(filename.to_string()))
            }
        }
    }

    pub fn add_entry(&mut self) -> usize {
        let count = self.form.add_entry();
        debug!(count, "entry slot added");
        count
    }
}
