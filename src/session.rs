use chrono::{DateTime, Utc};
use thiserror::Error;
use tracing::debug;

use crate::models::{AggregateStats, PairwisePoint, PersonaSummary, ProfileEntry, StudentRecord};
use crate::project;
use crate::source::{LoadError, RecordSource};
use crate::stats;
use crate::store::RecordStore;
use crate::table::{self, InvalidSortKey, SortConfig, SortKey};

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown student id: {0}")]
pub struct UnknownStudent(pub String);

/// One dashboard session: the record store plus the only mutable UI state
/// (selection, sort, search). Every derived view is recomputed from the
/// collection on access, so the projections can never drift out of sync with
/// the table. The presentation layer holds exactly one of these per view.
#[derive(Debug, Default)]
pub struct DashboardSession {
    store: RecordStore,
    selected_id: Option<String>,
    sort: Option<SortConfig>,
    search_term: String,
}

impl DashboardSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Session over records that are already in memory (fixtures, embedders
    /// with their own ingestion). Selection defaults to the first record.
    pub fn from_records(records: Vec<StudentRecord>) -> Self {
        let mut session = Self {
            store: RecordStore::from_records(records),
            selected_id: None,
            sort: None,
            search_term: String::new(),
        };
        session.reset_selection();
        session
    }

    /// Replace the collection from `source`. Selection, sort, and search are
    /// reset either way; on failure the store is left empty-but-ready and the
    /// error is returned for the caller to report.
    pub async fn load(&mut self, source: &RecordSource) -> Result<usize, LoadError> {
        let result = self.store.load(source).await;
        self.sort = None;
        self.search_term.clear();
        self.reset_selection();
        result
    }

    fn reset_selection(&mut self) {
        self.selected_id = self
            .store
            .records()
            .first()
            .map(|record| record.student_id.clone());
    }

    pub fn is_ready(&self) -> bool {
        self.store.is_ready()
    }

    pub fn loaded_at(&self) -> Option<DateTime<Utc>> {
        self.store.loaded_at()
    }

    pub fn collection(&self) -> &[StudentRecord] {
        self.store.records()
    }

    /// `None` until the store is ready and non-empty; presentation code never
    /// sees the NaN means an empty collection would produce.
    pub fn aggregate_stats(&self) -> Option<AggregateStats> {
        if !self.store.is_ready() || self.store.is_empty() {
            return None;
        }
        Some(stats::aggregate(self.store.records()))
    }

    pub fn group_summary(&self) -> Vec<PersonaSummary> {
        project::group_by_persona(self.store.records())
    }

    pub fn pairwise_points(&self) -> Vec<PairwisePoint> {
        project::pairwise_points(self.store.records())
    }

    pub fn profile(&self, student_id: &str) -> Vec<ProfileEntry> {
        let stats = match self.aggregate_stats() {
            Some(stats) => stats,
            None => return Vec::new(),
        };
        project::profile(self.store.find(student_id), &stats)
    }

    pub fn selected_profile(&self) -> Vec<ProfileEntry> {
        match &self.selected_id {
            Some(id) => self.profile(id),
            None => Vec::new(),
        }
    }

    pub fn table_view(&self) -> Vec<StudentRecord> {
        table::view(self.store.records(), self.sort, &self.search_term)
    }

    pub fn selected(&self) -> Option<&StudentRecord> {
        self.selected_id
            .as_deref()
            .and_then(|id| self.store.find(id))
    }

    pub fn sort_config(&self) -> Option<SortConfig> {
        self.sort
    }

    pub fn search_term(&self) -> &str {
        &self.search_term
    }

    /// Focus a record for the profile view. An unknown id fails the call and
    /// leaves the current selection in place.
    pub fn set_selection(&mut self, student_id: &str) -> Result<(), UnknownStudent> {
        if self.store.find(student_id).is_none() {
            return Err(UnknownStudent(student_id.to_string()));
        }
        self.selected_id = Some(student_id.to_string());
        debug!("selection changed to {}", student_id);
        Ok(())
    }

    /// Sort request from a column header, keyed by dataset field name. An
    /// unknown key fails the call and leaves the sort state in place.
    pub fn request_sort(&mut self, key: &str) -> Result<(), InvalidSortKey> {
        let key: SortKey = key.parse()?;
        self.toggle_sort(key);
        Ok(())
    }

    pub fn toggle_sort(&mut self, key: SortKey) {
        let config = table::next_sort(self.sort, key);
        self.sort = Some(config);
        debug!("sort set to {} {:?}", config.key, config.direction);
    }

    pub fn set_search_term(&mut self, term: impl Into<String>) {
        self.search_term = term.into();
        debug!("search term set to {:?}", self.search_term);
    }
}
