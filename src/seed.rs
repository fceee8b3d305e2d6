use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::models::StudentRecord;
use crate::stats::round1;

// Assessment score model used by the upstream data pipeline.
const WEIGHT_COMPREHENSION: f64 = 0.30;
const WEIGHT_ATTENTION: f64 = 0.20;
const WEIGHT_FOCUS: f64 = 0.25;
const WEIGHT_RETENTION: f64 = 0.15;
const ENGAGEMENT_FACTOR: f64 = 2.5;

const CLASS_LABELS: [(&str, f64); 3] = [("A", 0.4), ("B", 0.3), ("C", 0.3)];

/// Deterministic synthetic dataset: same `(count, rng_seed)` always yields
/// the same records. Ids run `S001..`, values stay inside the ranges the real
/// pipeline produces, and personas come from the known vocabulary (threshold
/// rules standing in for the upstream clustering).
pub fn generate(count: usize, rng_seed: u64) -> Vec<StudentRecord> {
    let mut rng = StdRng::seed_from_u64(rng_seed);

    (0..count)
        .map(|index| {
            let comprehension = rng.gen_range(50..100) as f64;
            let attention = rng.gen_range(40..95) as f64;
            let focus = rng.gen_range(45..90) as f64;
            let retention = rng.gen_range(40..95) as f64;
            let engagement_time = round1(rng.gen_range(5.0..20.0));

            let raw_score = comprehension * WEIGHT_COMPREHENSION
                + attention * WEIGHT_ATTENTION
                + focus * WEIGHT_FOCUS
                + retention * WEIGHT_RETENTION
                + engagement_time * ENGAGEMENT_FACTOR
                + rng.gen_range(-5.0..5.0);
            let assessment_score = raw_score.round().clamp(0.0, 100.0);

            let skill_avg = (comprehension + attention + focus + retention) / 4.0;

            StudentRecord {
                student_id: format!("S{:03}", index + 1),
                name: format!("Student_{}", index + 1),
                class: pick_class(&mut rng),
                comprehension,
                attention,
                focus,
                retention,
                assessment_score,
                engagement_time,
                learning_persona: persona_for(skill_avg, engagement_time).to_string(),
            }
        })
        .collect()
}

fn pick_class(rng: &mut StdRng) -> String {
    let roll: f64 = rng.gen();
    let mut cumulative = 0.0;
    for (label, share) in CLASS_LABELS {
        cumulative += share;
        if roll < cumulative {
            return label.to_string();
        }
    }
    CLASS_LABELS[CLASS_LABELS.len() - 1].0.to_string()
}

fn persona_for(skill_avg: f64, engagement_time: f64) -> &'static str {
    if skill_avg < 65.0 && engagement_time < 8.0 {
        StudentRecord::PERSONA_LOW_ENGAGEMENT
    } else if skill_avg >= 75.0 {
        StudentRecord::PERSONA_HIGH_SKILL
    } else {
        StudentRecord::PERSONA_BALANCED
    }
}
