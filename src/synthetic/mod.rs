/// Rule-based synthetic corpus generation
///
/// Produces archetype-labeled employees in fixed proportions, scores each one
/// with the additive factor rules in [`scoring`], clamps the score into its
/// archetype's band and derives probability and label from the clamped score.
/// Output is training input only and is never served.
pub mod scoring;

use crate::risk::AttritionLabel;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};
use tracing::info;

/// Departments present in the generated corpus
pub const DEPARTMENTS: [&str; 7] = [
    "IT",
    "Sales",
    "Marketing",
    "HR",
    "Finance",
    "Operations",
    "Support",
];

/// Fraction of records generated from the high-risk archetype
pub const HIGH_RISK_SHARE: f64 = 0.25;

/// Fraction of records generated from the medium-risk archetype
pub const MEDIUM_RISK_SHARE: f64 = 0.35;

/// High-risk records are forced to at least this score
pub const HIGH_RISK_SCORE_FLOOR: f64 = 65.0;

/// Low-risk records are forced to at most this score
pub const LOW_RISK_SCORE_CEILING: f64 = 35.0;

/// Bounded integer noise added to every raw score
pub const SCORE_NOISE_BOUND: i32 = 8;

/// Probabilities are capped just below certainty
pub const MAX_ATTRITION_PROBABILITY: f64 = 0.99;

/// Synthetic generation profile with distinct sampling distributions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, EnumString, Display)]
pub enum RiskArchetype {
    High,
    Medium,
    Low,
}

impl RiskArchetype {
    fn satisfaction_range(&self) -> (f64, f64) {
        match self {
            RiskArchetype::High => (0.15, 0.40),
            RiskArchetype::Medium => (0.40, 0.65),
            RiskArchetype::Low => (0.70, 0.95),
        }
    }

    fn evaluation_range(&self) -> (f64, f64) {
        match self {
            RiskArchetype::High => (0.30, 0.65),
            RiskArchetype::Medium => (0.55, 0.75),
            RiskArchetype::Low => (0.75, 0.95),
        }
    }

    fn project_choices(&self) -> &'static [u32] {
        match self {
            // Too few or too many
            RiskArchetype::High => &[1, 8, 9, 10],
            RiskArchetype::Medium => &[2, 5, 6],
            RiskArchetype::Low => &[3, 4],
        }
    }

    fn work_hours_range(&self) -> (f64, f64) {
        match self {
            RiskArchetype::High => (60.0, 75.0),
            RiskArchetype::Medium => (48.0, 58.0),
            RiskArchetype::Low => (38.0, 48.0),
        }
    }

    /// Salary growth per year of experience; high-risk employees are underpaid
    fn salary_per_year(&self) -> f64 {
        match self {
            RiskArchetype::High => 1_500.0,
            RiskArchetype::Medium => 2_000.0,
            RiskArchetype::Low => 2_800.0,
        }
    }

    /// Force the raw score into this archetype's band
    pub fn clamp_score(&self, score: f64) -> f64 {
        match self {
            RiskArchetype::High => score.max(HIGH_RISK_SCORE_FLOOR),
            RiskArchetype::Medium => score.clamp(LOW_RISK_SCORE_CEILING, HIGH_RISK_SCORE_FLOOR),
            RiskArchetype::Low => score.min(LOW_RISK_SCORE_CEILING),
        }
    }
}

/// One generated employee with its computed labels
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SyntheticRecord {
    pub department: String,
    pub age: u32,
    pub experience: u32,
    pub salary: f64,
    pub satisfaction: f64,
    pub last_evaluation: f64,
    pub project_count: u32,
    pub work_hours: u32,
    pub performance_score: f64,
    /// Archetype-clamped score accumulator
    pub attrition_score: f64,
    pub attrition_probability: f64,
    pub attrition: AttritionLabel,
    pub archetype: RiskArchetype,
}

/// Seeded generator producing training-quality labeled employees
pub struct SyntheticLabelGenerator {
    rng: ChaCha8Rng,
}

impl SyntheticLabelGenerator {
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    /// Generate `n` records: 25% high-risk, 35% medium-risk, rest low-risk
    pub fn generate(&mut self, n: usize) -> Vec<SyntheticRecord> {
        let high_count = (n as f64 * HIGH_RISK_SHARE) as usize;
        let medium_count = (n as f64 * MEDIUM_RISK_SHARE) as usize;

        let mut records = Vec::with_capacity(n);
        for i in 0..n {
            let archetype = if i < high_count {
                RiskArchetype::High
            } else if i < high_count + medium_count {
                RiskArchetype::Medium
            } else {
                RiskArchetype::Low
            };
            records.push(self.generate_one(archetype));
        }

        info!(
            records = records.len(),
            high = high_count,
            medium = medium_count,
            low = n - high_count - medium_count,
            "Generated synthetic corpus"
        );

        records
    }

    fn generate_one(&mut self, archetype: RiskArchetype) -> SyntheticRecord {
        let department = *DEPARTMENTS
            .choose(&mut self.rng)
            .expect("department table is non-empty");
        let age = self.rng.gen_range(22..65u32);
        let experience = self.rng.gen_range(0..(age - 21)).min(40);

        let (satisfaction_lo, satisfaction_hi) = archetype.satisfaction_range();
        let satisfaction = self.rng.gen_range(satisfaction_lo..satisfaction_hi);

        let (evaluation_lo, evaluation_hi) = archetype.evaluation_range();
        let last_evaluation = self.rng.gen_range(evaluation_lo..evaluation_hi);

        let project_count = *archetype
            .project_choices()
            .choose(&mut self.rng)
            .expect("project table is non-empty");

        let (hours_lo, hours_hi) = archetype.work_hours_range();
        let work_hours = self.rng.gen_range(hours_lo..hours_hi);

        let base_salary =
            scoring::BASE_SALARY + f64::from(experience) * archetype.salary_per_year();
        let salary = base_salary
            * scoring::department_multiplier(department)
            * self.rng.gen_range(0.95..1.05);

        let performance_score = scoring::performance_score(
            last_evaluation,
            project_count,
            satisfaction,
            work_hours,
        );

        let raw_score = scoring::attrition_score(
            satisfaction,
            work_hours,
            project_count,
            last_evaluation,
            salary,
            experience,
            department,
        ) + f64::from(self.rng.gen_range(-SCORE_NOISE_BOUND..=SCORE_NOISE_BOUND));

        let attrition_score = archetype.clamp_score(raw_score);
        let attrition_probability = round_to(
            (attrition_score / 100.0).clamp(0.0, MAX_ATTRITION_PROBABILITY),
            3,
        );
        let attrition = AttritionLabel::from_probability(attrition_probability);

        SyntheticRecord {
            department: department.to_string(),
            age,
            experience,
            salary: round_to(salary, 2),
            satisfaction: round_to(satisfaction, 3),
            last_evaluation: round_to(last_evaluation, 3),
            project_count,
            work_hours: work_hours as u32,
            performance_score: round_to(performance_score, 2),
            attrition_score,
            attrition_probability,
            attrition,
            archetype,
        }
    }
}

fn round_to(value: f64, decimals: u32) -> f64 {
    let factor = 10f64.powi(decimals as i32);
    (value * factor).round() / factor
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_archetype_proportions_are_exact() {
        let mut generator = SyntheticLabelGenerator::with_seed(42);
        let records = generator.generate(1000);

        let high = records
            .iter()
            .filter(|r| r.archetype == RiskArchetype::High)
            .count();
        let medium = records
            .iter()
            .filter(|r| r.archetype == RiskArchetype::Medium)
            .count();
        let low = records
            .iter()
            .filter(|r| r.archetype == RiskArchetype::Low)
            .count();

        assert_eq!(high, 250);
        assert_eq!(medium, 350);
        assert_eq!(low, 400);
    }

    #[test]
    fn test_archetype_score_bands_hold() {
        let mut generator = SyntheticLabelGenerator::with_seed(7);
        for record in generator.generate(1000) {
            match record.archetype {
                RiskArchetype::High => assert!(
                    record.attrition_score >= HIGH_RISK_SCORE_FLOOR,
                    "high-risk score {}",
                    record.attrition_score
                ),
                RiskArchetype::Medium => assert!(
                    (LOW_RISK_SCORE_CEILING..=HIGH_RISK_SCORE_FLOOR)
                        .contains(&record.attrition_score),
                    "medium-risk score {}",
                    record.attrition_score
                ),
                RiskArchetype::Low => assert!(
                    record.attrition_score <= LOW_RISK_SCORE_CEILING,
                    "low-risk score {}",
                    record.attrition_score
                ),
            }
        }
    }

    #[test]
    fn test_probabilities_and_attributes_in_domain() {
        let mut generator = SyntheticLabelGenerator::with_seed(3);
        for record in generator.generate(500) {
            assert!((0.0..=MAX_ATTRITION_PROBABILITY).contains(&record.attrition_probability));
            assert!((22..=64).contains(&record.age));
            assert!(record.experience <= 40);
            assert!(record.salary > 0.0);
            assert!((0.0..=1.0).contains(&record.satisfaction));
            assert!((0.0..=1.0).contains(&record.last_evaluation));
            assert!(record.work_hours <= 80);
            assert!(DEPARTMENTS.contains(&record.department.as_str()));
        }
    }

    #[test]
    fn test_labels_follow_probability() {
        let mut generator = SyntheticLabelGenerator::with_seed(19);
        for record in generator.generate(500) {
            assert_eq!(
                record.attrition,
                AttritionLabel::from_probability(record.attrition_probability)
            );
        }
    }

    #[test]
    fn test_high_risk_records_are_labeled_leave() {
        let mut generator = SyntheticLabelGenerator::with_seed(5);
        for record in generator.generate(400) {
            if record.archetype == RiskArchetype::High {
                // Score >= 65 implies probability >= 0.65
                assert_eq!(record.attrition, AttritionLabel::Leave);
            }
            if record.archetype == RiskArchetype::Low {
                assert_eq!(record.attrition, AttritionLabel::Stay);
            }
        }
    }

    #[test]
    fn test_generation_is_reproducible() {
        let mut first = SyntheticLabelGenerator::with_seed(42);
        let mut second = SyntheticLabelGenerator::with_seed(42);

        let a = first.generate(50);
        let b = second.generate(50);

        for (x, y) in a.iter().zip(b.iter()) {
            assert_eq!(x.salary, y.salary);
            assert_eq!(x.attrition_score, y.attrition_score);
            assert_eq!(x.department, y.department);
        }
    }

    #[test]
    fn test_clamp_score_bands() {
        assert_eq!(RiskArchetype::High.clamp_score(40.0), 65.0);
        assert_eq!(RiskArchetype::High.clamp_score(90.0), 90.0);
        assert_eq!(RiskArchetype::Medium.clamp_score(10.0), 35.0);
        assert_eq!(RiskArchetype::Medium.clamp_score(80.0), 65.0);
        assert_eq!(RiskArchetype::Medium.clamp_score(50.0), 50.0);
        assert_eq!(RiskArchetype::Low.clamp_score(60.0), 35.0);
        assert_eq!(RiskArchetype::Low.clamp_score(10.0), 10.0);
    }
}
