use std::collections::HashSet;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::warn;

use crate::models::StudentRecord;

/// Where the record set comes from. The load is one-shot; there is no
/// polling or refresh beyond an explicit reload.
#[derive(Debug, Clone)]
pub enum RecordSource {
    Url(String),
    JsonFile(PathBuf),
    CsvFile(PathBuf),
}

impl RecordSource {
    pub fn url(url: impl Into<String>) -> Self {
        RecordSource::Url(url.into())
    }

    pub fn json_file(path: impl Into<PathBuf>) -> Self {
        RecordSource::JsonFile(path.into())
    }

    pub fn csv_file(path: impl Into<PathBuf>) -> Self {
        RecordSource::CsvFile(path.into())
    }

    pub fn describe(&self) -> String {
        match self {
            RecordSource::Url(url) => url.clone(),
            RecordSource::JsonFile(path) | RecordSource::CsvFile(path) => {
                path.display().to_string()
            }
        }
    }
}

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("fetch failed: {0}")]
    Fetch(#[from] reqwest::Error),
    #[error("read failed: {0}")]
    Read(#[from] std::io::Error),
    #[error("malformed record data: {0}")]
    Malformed(#[from] serde_json::Error),
    #[error("malformed csv data: {0}")]
    MalformedCsv(#[from] csv::Error),
    #[error("schema violation: {0}")]
    Schema(String),
}

/// Retrieve and validate a full record set. Either every record comes back
/// validated or the whole load fails; callers never see a partial collection.
pub async fn fetch_records(source: &RecordSource) -> Result<Vec<StudentRecord>, LoadError> {
    let records = match source {
        RecordSource::Url(url) => {
            let response = reqwest::get(url.as_str()).await?.error_for_status()?;
            response.json::<Vec<StudentRecord>>().await?
        }
        RecordSource::JsonFile(path) => {
            let bytes = tokio::fs::read(path).await?;
            serde_json::from_slice(&bytes)?
        }
        RecordSource::CsvFile(path) => read_csv(path)?,
    };

    validate(&records)?;
    Ok(records)
}

fn read_csv(path: &Path) -> Result<Vec<StudentRecord>, LoadError> {
    let mut reader = csv::Reader::from_path(path)?;
    let mut records = Vec::new();

    for result in reader.deserialize::<StudentRecord>() {
        records.push(result?);
    }

    Ok(records)
}

/// Reject duplicate ids and non-finite scores; out-of-range (but well-typed)
/// scores are kept and logged so one odd row cannot blank the dashboard.
pub fn validate(records: &[StudentRecord]) -> Result<(), LoadError> {
    let mut seen = HashSet::new();

    for record in records {
        if !seen.insert(record.student_id.as_str()) {
            return Err(LoadError::Schema(format!(
                "duplicate student_id {}",
                record.student_id
            )));
        }

        for (field, value) in [
            ("comprehension", record.comprehension),
            ("attention", record.attention),
            ("focus", record.focus),
            ("retention", record.retention),
            ("assessment_score", record.assessment_score),
        ] {
            if !value.is_finite() {
                return Err(LoadError::Schema(format!(
                    "non-finite {} for {}",
                    field, record.student_id
                )));
            }
            if !(0.0..=100.0).contains(&value) {
                warn!(
                    "{}: {} = {} outside expected 0-100 range",
                    record.student_id, field, value
                );
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_record(student_id: &str) -> StudentRecord {
        StudentRecord {
            student_id: student_id.to_string(),
            name: "Student_1".to_string(),
            class: "A".to_string(),
            comprehension: 72.0,
            attention: 61.0,
            focus: 55.0,
            retention: 80.0,
            assessment_score: 74.0,
            engagement_time: 12.5,
            learning_persona: StudentRecord::PERSONA_BALANCED.to_string(),
        }
    }

    #[test]
    fn duplicate_ids_are_a_schema_violation() {
        let records = vec![sample_record("S001"), sample_record("S001")];
        let err = validate(&records).unwrap_err();
        assert!(matches!(err, LoadError::Schema(_)));
    }

    #[test]
    fn distinct_ids_pass_validation() {
        let records = vec![sample_record("S001"), sample_record("S002")];
        assert!(validate(&records).is_ok());
    }

    #[test]
    fn non_finite_score_is_rejected() {
        let mut record = sample_record("S001");
        record.focus = f64::NAN;
        let err = validate(&[record]).unwrap_err();
        assert!(matches!(err, LoadError::Schema(_)));
    }

    #[test]
    fn out_of_range_score_is_kept() {
        let mut record = sample_record("S001");
        record.attention = 104.0;
        assert!(validate(&[record]).is_ok());
    }

    #[test]
    fn empty_collection_is_valid() {
        assert!(validate(&[]).is_ok());
    }
}
