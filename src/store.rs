use chrono::{DateTime, Utc};
use tracing::{error, info};

use crate::models::StudentRecord;
use crate::source::{fetch_records, LoadError, RecordSource};

/// Holds the loaded collection and the ready flag. The collection is replaced
/// atomically by `load` and read-only otherwise; a failed load leaves an
/// empty-but-ready store so the dashboard renders its empty state instead of
/// spinning forever.
#[derive(Debug, Default)]
pub struct RecordStore {
    records: Vec<StudentRecord>,
    ready: bool,
    loaded_at: Option<DateTime<Utc>>,
}

impl RecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store from records that were validated elsewhere (fixtures,
    /// embedders that already hold the dataset in memory).
    pub fn from_records(records: Vec<StudentRecord>) -> Self {
        Self {
            records,
            ready: true,
            loaded_at: Some(Utc::now()),
        }
    }

    pub async fn load(&mut self, source: &RecordSource) -> Result<usize, LoadError> {
        match fetch_records(source).await {
            Ok(records) => {
                let count = records.len();
                self.records = records;
                self.ready = true;
                self.loaded_at = Some(Utc::now());
                info!("loaded {} records from {}", count, source.describe());
                Ok(count)
            }
            Err(err) => {
                self.records = Vec::new();
                self.ready = true;
                self.loaded_at = None;
                error!("load from {} failed: {}", source.describe(), err);
                Err(err)
            }
        }
    }

    pub fn records(&self) -> &[StudentRecord] {
        &self.records
    }

    pub fn is_ready(&self) -> bool {
        self.ready
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn loaded_at(&self) -> Option<DateTime<Utc>> {
        self.loaded_at
    }

    pub fn find(&self, student_id: &str) -> Option<&StudentRecord> {
        self.records
            .iter()
            .find(|record| record.student_id == student_id)
    }
}
