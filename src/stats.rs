use crate::models::{AggregateStats, Skill, SkillMean, StudentRecord};

/// Round to one decimal place, half away from zero. Display values and the
/// profile comparison both use this.
pub fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Population means over the collection. An empty collection yields NaN means
/// (the session layer maps that to `None` before anything reaches a chart).
pub fn aggregate(records: &[StudentRecord]) -> AggregateStats {
    let count = records.len() as f64;
    let avg_score_raw = records.iter().map(|r| r.assessment_score).sum::<f64>() / count;

    let skill_means = Skill::ALL
        .iter()
        .map(|&skill| {
            let mean_raw = records.iter().map(|r| r.skill(skill)).sum::<f64>() / count;
            SkillMean {
                skill,
                mean: round1(mean_raw),
                mean_raw,
            }
        })
        .collect();

    AggregateStats {
        avg_score: round1(avg_score_raw),
        avg_score_raw,
        skill_means,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(student_id: &str, assessment_score: f64) -> StudentRecord {
        StudentRecord {
            student_id: student_id.to_string(),
            name: format!("Student_{}", student_id),
            class: "A".to_string(),
            comprehension: 60.0,
            attention: 50.0,
            focus: 70.0,
            retention: 40.0,
            assessment_score,
            engagement_time: 10.0,
            learning_persona: StudentRecord::PERSONA_BALANCED.to_string(),
        }
    }

    #[test]
    fn avg_score_is_the_rounded_mean() {
        let records = vec![record("1", 80.0), record("2", 60.0), record("3", 100.0)];
        let stats = aggregate(&records);
        assert_eq!(stats.avg_score, 80.0);
        assert_eq!(stats.avg_score_raw, 80.0);
    }

    #[test]
    fn avg_score_rounds_to_one_decimal() {
        let records = vec![record("1", 70.0), record("2", 71.0), record("3", 71.0)];
        let stats = aggregate(&records);
        // 212 / 3 = 70.666...
        assert_eq!(stats.avg_score, 70.7);
        assert!((stats.avg_score_raw - 70.666_666).abs() < 0.001);
    }

    #[test]
    fn skill_means_follow_canonical_order() {
        let records = vec![record("1", 80.0), record("2", 60.0)];
        let stats = aggregate(&records);

        let order: Vec<Skill> = stats.skill_means.iter().map(|m| m.skill).collect();
        assert_eq!(order, Skill::ALL.to_vec());
        assert_eq!(stats.skill_mean(Skill::Comprehension), 60.0);
        assert_eq!(stats.skill_mean(Skill::Attention), 50.0);
        assert_eq!(stats.skill_mean(Skill::Focus), 70.0);
        assert_eq!(stats.skill_mean(Skill::Retention), 40.0);
    }

    #[test]
    fn skill_means_keep_the_raw_value_alongside() {
        let mut a = record("1", 80.0);
        let mut b = record("2", 60.0);
        a.focus = 70.0;
        b.focus = 70.5;
        let stats = aggregate(&[a, b]);

        let focus = &stats.skill_means[2];
        assert_eq!(focus.skill, Skill::Focus);
        assert_eq!(focus.mean, 70.3);
        assert_eq!(focus.mean_raw, 70.25);
    }

    #[test]
    fn empty_collection_yields_nan_means() {
        let stats = aggregate(&[]);
        assert!(stats.avg_score.is_nan());
        assert!(stats.skill_mean(Skill::Retention).is_nan());
    }

    #[test]
    fn round1_is_half_away_from_zero() {
        assert_eq!(round1(70.65), 70.7);
        assert_eq!(round1(70.64), 70.6);
        assert_eq!(round1(-2.35), -2.4);
    }
}
