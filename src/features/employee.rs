use serde::{Deserialize, Serialize};
use validator::Validate;

/// Raw employee attributes as supplied by the caller
///
/// Only age, experience, salary and department are mandatory; the remaining
/// fields default to the values the models were trained with (see
/// [`FeatureDefaults`]). Ranges are enforced before encoding, never clamped.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct EmployeeRecord {
    /// Age in years
    #[validate(range(min = 18, max = 70))]
    pub age: u32,

    /// Total professional experience in years
    #[validate(range(max = 50))]
    pub experience: u32,

    /// Annual salary
    #[validate(range(exclusive_min = 0.0))]
    pub salary: f64,

    /// Department name, must be known to the fitted encoding
    pub department: String,

    /// Satisfaction level in [0, 1]
    #[validate(range(min = 0.0, max = 1.0))]
    pub satisfaction: Option<f64>,

    /// Last evaluation score in [0, 1]
    #[validate(range(min = 0.0, max = 1.0))]
    pub last_evaluation: Option<f64>,

    /// Number of concurrent projects
    pub project_count: Option<u32>,

    /// Weekly work hours
    #[validate(range(max = 80))]
    pub work_hours: Option<u32>,
}

impl EmployeeRecord {
    pub fn new(age: u32, experience: u32, salary: f64, department: impl Into<String>) -> Self {
        Self {
            age,
            experience,
            salary,
            department: department.into(),
            satisfaction: None,
            last_evaluation: None,
            project_count: None,
            work_hours: None,
        }
    }

    pub fn with_satisfaction(mut self, satisfaction: f64) -> Self {
        self.satisfaction = Some(satisfaction);
        self
    }

    pub fn with_last_evaluation(mut self, last_evaluation: f64) -> Self {
        self.last_evaluation = Some(last_evaluation);
        self
    }

    pub fn with_project_count(mut self, project_count: u32) -> Self {
        self.project_count = Some(project_count);
        self
    }

    pub fn with_work_hours(mut self, work_hours: u32) -> Self {
        self.work_hours = Some(work_hours);
        self
    }
}

/// Defaults substituted for missing optional fields
///
/// The trained models assume these exact values fill missing history, so the
/// struct is persisted with the encoder and must round-trip unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureDefaults {
    pub satisfaction: f64,
    pub last_evaluation: f64,
    pub project_count: u32,
    pub work_hours: u32,
}

impl Default for FeatureDefaults {
    fn default() -> Self {
        Self {
            satisfaction: 0.7,
            last_evaluation: 0.7,
            project_count: 3,
            work_hours: 40,
        }
    }
}
