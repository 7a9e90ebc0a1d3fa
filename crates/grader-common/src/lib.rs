pub mod builder;
pub mod clock;
pub mod csv;
pub mod export;
pub mod form;
pub mod model;
pub mod store;

pub use builder::{RecordInput, ValidationError, build};
pub use export::{CsvExport, ExportError, Row, export, export_record};
pub use form::{FormError, FormState};
pub use model::{GradingRecord, ModelError, OsatsMetric, OsatsScores, Procedure, TimeEntry};
pub use store::{ExportState, SessionStore};
