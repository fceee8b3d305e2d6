use std::fmt;

use serde::{Deserialize, Serialize};

/// The four cognitive skills tracked per student, in canonical chart order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Skill {
    Comprehension,
    Attention,
    Focus,
    Retention,
}

impl Skill {
    pub const ALL: [Skill; 4] = [
        Skill::Comprehension,
        Skill::Attention,
        Skill::Focus,
        Skill::Retention,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Skill::Comprehension => "comprehension",
            Skill::Attention => "attention",
            Skill::Focus => "focus",
            Skill::Retention => "retention",
        }
    }
}

impl fmt::Display for Skill {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One student's cognitive and assessment data point. Field names follow the
/// dataset exactly; every field is mandatory, so a record missing any of them
/// fails deserialization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StudentRecord {
    pub student_id: String,
    pub name: String,
    pub class: String,
    pub comprehension: f64,
    pub attention: f64,
    pub focus: f64,
    pub retention: f64,
    pub assessment_score: f64,
    pub engagement_time: f64,
    pub learning_persona: String,
}

impl StudentRecord {
    // Persona labels produced by the upstream clustering pipeline. Grouping
    // accepts any label; these are the known vocabulary.
    pub const PERSONA_BALANCED: &'static str = "Balanced Average";
    pub const PERSONA_HIGH_SKILL: &'static str = "High-Skill Achiever";
    pub const PERSONA_LOW_ENGAGEMENT: &'static str = "Low Engagement/Struggler";

    pub fn skill(&self, skill: Skill) -> f64 {
        match skill {
            Skill::Comprehension => self.comprehension,
            Skill::Attention => self.attention,
            Skill::Focus => self.focus,
            Skill::Retention => self.retention,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SkillMean {
    pub skill: Skill,
    /// Mean rounded to one decimal, as displayed and charted.
    pub mean: f64,
    pub mean_raw: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AggregateStats {
    pub avg_score: f64,
    pub avg_score_raw: f64,
    /// Per-skill means in `Skill::ALL` order.
    pub skill_means: Vec<SkillMean>,
}

impl AggregateStats {
    pub fn skill_mean(&self, skill: Skill) -> f64 {
        self.skill_means
            .iter()
            .find(|entry| entry.skill == skill)
            .map(|entry| entry.mean)
            .unwrap_or(f64::NAN)
    }
}

/// Mean assessment score for one learning persona.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PersonaSummary {
    pub persona: String,
    pub avg_score: f64,
    pub count: usize,
}

/// One attention-vs-score point for the correlation chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PairwisePoint {
    pub x: f64,
    pub y: f64,
    pub persona: String,
}

/// One radar-chart axis: the selected student's raw value against the
/// (display-rounded) population average.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProfileEntry {
    pub skill: Skill,
    pub selected: f64,
    pub average: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn skill_order_is_canonical() {
        assert_eq!(
            Skill::ALL,
            [
                Skill::Comprehension,
                Skill::Attention,
                Skill::Focus,
                Skill::Retention
            ]
        );
    }

    #[test]
    fn record_parses_dataset_field_names() {
        let json = r#"{
            "student_id": "S001",
            "name": "Student_1",
            "class": "A",
            "comprehension": 72,
            "attention": 61,
            "focus": 55,
            "retention": 80,
            "assessment_score": 74,
            "engagement_time": 12.5,
            "learning_persona": "Balanced Average"
        }"#;

        let record: StudentRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.student_id, "S001");
        assert_eq!(record.skill(Skill::Attention), 61.0);
        assert_eq!(record.learning_persona, StudentRecord::PERSONA_BALANCED);
    }

    #[test]
    fn record_missing_field_is_rejected() {
        let json = r#"{
            "student_id": "S001",
            "name": "Student_1",
            "class": "A",
            "comprehension": 72,
            "attention": 61,
            "focus": 55,
            "retention": 80,
            "engagement_time": 12.5,
            "learning_persona": "Balanced Average"
        }"#;

        assert!(serde_json::from_str::<StudentRecord>(json).is_err());
    }

    #[test]
    fn skill_mean_lookup_falls_back_to_nan() {
        let stats = AggregateStats {
            avg_score: 0.0,
            avg_score_raw: 0.0,
            skill_means: Vec::new(),
        };
        assert!(stats.skill_mean(Skill::Focus).is_nan());
    }
}
