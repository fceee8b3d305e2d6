use crate::models::{
    AggregateStats, PairwisePoint, PersonaSummary, ProfileEntry, Skill, StudentRecord,
};
use crate::stats::round1;

/// Mean assessment score per learning persona. Groups keep first-appearance
/// order so chart series stay stable across recomputes; singleton personas
/// appear with their single score as the mean.
pub fn group_by_persona(records: &[StudentRecord]) -> Vec<PersonaSummary> {
    let mut groups: Vec<(String, f64, usize)> = Vec::new();

    for record in records {
        match groups
            .iter_mut()
            .find(|(persona, _, _)| *persona == record.learning_persona)
        {
            Some((_, total, count)) => {
                *total += record.assessment_score;
                *count += 1;
            }
            None => groups.push((record.learning_persona.clone(), record.assessment_score, 1)),
        }
    }

    groups
        .into_iter()
        .map(|(persona, total, count)| PersonaSummary {
            persona,
            avg_score: round1(total / count as f64),
            count,
        })
        .collect()
}

/// One (attention, assessment_score) point per record, input order preserved.
pub fn pairwise_points(records: &[StudentRecord]) -> Vec<PairwisePoint> {
    records
        .iter()
        .map(|record| PairwisePoint {
            x: record.attention,
            y: record.assessment_score,
            persona: record.learning_persona.clone(),
        })
        .collect()
}

/// Radar profile for one record against the population: four entries in
/// `Skill::ALL` order, raw selected value paired with the rounded population
/// mean. No record selected means no profile.
pub fn profile(record: Option<&StudentRecord>, stats: &AggregateStats) -> Vec<ProfileEntry> {
    let record = match record {
        Some(record) => record,
        None => return Vec::new(),
    };

    Skill::ALL
        .iter()
        .map(|&skill| ProfileEntry {
            skill,
            selected: record.skill(skill),
            average: stats.skill_mean(skill),
        })
        .collect()
}
