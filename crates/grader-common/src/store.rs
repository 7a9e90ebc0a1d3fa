use crate::model::GradingRecord;

/// Whether the session has anything to export.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportState {
    Empty,
    HasData,
}

/// Records saved during the current session. Append-only.
#[derive(Debug, Clone, Default)]
pub struct SessionStore {
    records: Vec<GradingRecord>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self {
            records: Vec::new(),
        }
    }

    pub fn append(&mut self, record: GradingRecord) {
        self.records.push(record);
    }

    pub fn last(&self) -> Option<&GradingRecord> {
        self.records.last()
    }

    pub fn records(&self) -> &[GradingRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn state(&self) -> ExportState {
        if self.records.is_empty() {
            ExportState::Empty
        } else {
            ExportState::HasData
        }
    }
}
