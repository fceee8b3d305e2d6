use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use crate::models::StudentRecord;

/// Sortable table columns. Keys parse from the dataset field names so column
/// headers in the presentation layer wire straight through.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortKey {
    StudentId,
    Name,
    Class,
    Comprehension,
    Attention,
    Focus,
    Retention,
    AssessmentScore,
    EngagementTime,
    LearningPersona,
}

impl SortKey {
    pub fn field_name(&self) -> &'static str {
        match self {
            SortKey::StudentId => "student_id",
            SortKey::Name => "name",
            SortKey::Class => "class",
            SortKey::Comprehension => "comprehension",
            SortKey::Attention => "attention",
            SortKey::Focus => "focus",
            SortKey::Retention => "retention",
            SortKey::AssessmentScore => "assessment_score",
            SortKey::EngagementTime => "engagement_time",
            SortKey::LearningPersona => "learning_persona",
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.field_name())
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown sort key: {0}")]
pub struct InvalidSortKey(pub String);

impl FromStr for SortKey {
    type Err = InvalidSortKey;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "student_id" => Ok(SortKey::StudentId),
            "name" => Ok(SortKey::Name),
            "class" => Ok(SortKey::Class),
            "comprehension" => Ok(SortKey::Comprehension),
            "attention" => Ok(SortKey::Attention),
            "focus" => Ok(SortKey::Focus),
            "retention" => Ok(SortKey::Retention),
            "assessment_score" => Ok(SortKey::AssessmentScore),
            "engagement_time" => Ok(SortKey::EngagementTime),
            "learning_persona" => Ok(SortKey::LearningPersona),
            other => Err(InvalidSortKey(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Ascending,
    Descending,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortConfig {
    pub key: SortKey,
    pub direction: SortDirection,
}

/// Sort toggle: re-requesting the active ascending key flips to descending;
/// anything else (new key, or the same key while descending) lands ascending.
pub fn next_sort(current: Option<SortConfig>, requested: SortKey) -> SortConfig {
    match current {
        Some(SortConfig {
            key,
            direction: SortDirection::Ascending,
        }) if key == requested => SortConfig {
            key: requested,
            direction: SortDirection::Descending,
        },
        _ => SortConfig {
            key: requested,
            direction: SortDirection::Ascending,
        },
    }
}

fn compare_f64(a: f64, b: f64) -> Ordering {
    a.partial_cmp(&b).unwrap_or(Ordering::Equal)
}

fn compare(a: &StudentRecord, b: &StudentRecord, key: SortKey) -> Ordering {
    match key {
        SortKey::StudentId => a.student_id.cmp(&b.student_id),
        SortKey::Name => a.name.cmp(&b.name),
        SortKey::Class => a.class.cmp(&b.class),
        SortKey::LearningPersona => a.learning_persona.cmp(&b.learning_persona),
        SortKey::Comprehension => compare_f64(a.comprehension, b.comprehension),
        SortKey::Attention => compare_f64(a.attention, b.attention),
        SortKey::Focus => compare_f64(a.focus, b.focus),
        SortKey::Retention => compare_f64(a.retention, b.retention),
        SortKey::AssessmentScore => compare_f64(a.assessment_score, b.assessment_score),
        SortKey::EngagementTime => compare_f64(a.engagement_time, b.engagement_time),
    }
}

pub fn matches_search(record: &StudentRecord, term: &str) -> bool {
    if term.is_empty() {
        return true;
    }
    let needle = term.to_lowercase();
    record.name.to_lowercase().contains(&needle) || record.class.to_lowercase().contains(&needle)
}

/// The table rows: case-insensitive name/class filter plus a stable
/// single-key sort. No sort config preserves collection order; ties keep
/// their relative collection order in either direction.
pub fn view(
    records: &[StudentRecord],
    sort: Option<SortConfig>,
    search_term: &str,
) -> Vec<StudentRecord> {
    let mut rows: Vec<StudentRecord> = records
        .iter()
        .filter(|record| matches_search(record, search_term))
        .cloned()
        .collect();

    if let Some(config) = sort {
        rows.sort_by(|a, b| {
            let ordering = compare(a, b, config.key);
            match config.direction {
                SortDirection::Ascending => ordering,
                SortDirection::Descending => ordering.reverse(),
            }
        });
    }

    rows
}
