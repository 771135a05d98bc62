//! Rule-based scoring used to label the synthetic corpus
//!
//! Each factor is a pure function over one attribute so the thresholds can be
//! tested independently of the generator's randomness. The numeric values
//! define the label distribution the models are fit against and must not
//! drift.

/// Salary floor common to all experience levels
pub const BASE_SALARY: f64 = 40_000.0;

/// Expected salary growth per year of experience
pub const EXPECTED_SALARY_PER_YEAR: f64 = 2_500.0;

/// Hand-tuned per-department salary multipliers
pub const DEPARTMENT_SALARY_MULTIPLIERS: [(&str, f64); 7] = [
    ("IT", 1.3),
    ("Sales", 1.2),
    ("Finance", 1.25),
    ("Marketing", 1.1),
    ("HR", 1.0),
    ("Operations", 1.05),
    ("Support", 0.95),
];

// Satisfaction is the biggest factor
pub const SATISFACTION_CRITICAL: f64 = 0.3;
pub const SATISFACTION_LOW: f64 = 0.5;
pub const SATISFACTION_MODERATE: f64 = 0.7;
pub const SATISFACTION_CRITICAL_POINTS: f64 = 50.0;
pub const SATISFACTION_LOW_POINTS: f64 = 30.0;
pub const SATISFACTION_MODERATE_POINTS: f64 = 10.0;

pub const OVERWORK_SEVERE_HOURS: f64 = 60.0;
pub const OVERWORK_MILD_HOURS: f64 = 52.0;
pub const UNDERWORK_HOURS: f64 = 38.0;
pub const OVERWORK_SEVERE_POINTS: f64 = 30.0;
pub const OVERWORK_MILD_POINTS: f64 = 15.0;
pub const UNDERWORK_POINTS: f64 = 5.0;

pub const PROJECT_OVERLOAD: u32 = 7;
pub const PROJECT_UNDERLOAD: u32 = 2;
pub const PROJECT_OVERLOAD_POINTS: f64 = 20.0;
pub const PROJECT_UNDERLOAD_POINTS: f64 = 15.0;

pub const EVALUATION_POOR: f64 = 0.5;
pub const EVALUATION_POOR_POINTS: f64 = 15.0;

pub const UNDERPAID_SEVERE_RATIO: f64 = 0.80;
pub const UNDERPAID_MILD_RATIO: f64 = 0.90;
pub const UNDERPAID_SEVERE_POINTS: f64 = 20.0;
pub const UNDERPAID_MILD_POINTS: f64 = 10.0;

// Performance blend weights (out of 100)
pub const PERFORMANCE_EVALUATION_WEIGHT: f64 = 40.0;
pub const PERFORMANCE_PROJECT_WEIGHT: f64 = 30.0;
pub const PERFORMANCE_SATISFACTION_WEIGHT: f64 = 20.0;
pub const PERFORMANCE_HOURS_WEIGHT: f64 = 10.0;

/// Project count at which utilization saturates
pub const PROJECT_FULL_UTILIZATION: f64 = 5.0;

/// Weekly hours treated as the healthy baseline
pub const IDEAL_WORK_HOURS: f64 = 45.0;

/// Multiplier for a department, 1.0 for departments outside the table
pub fn department_multiplier(department: &str) -> f64 {
    DEPARTMENT_SALARY_MULTIPLIERS
        .iter()
        .find(|(name, _)| *name == department)
        .map(|(_, multiplier)| *multiplier)
        .unwrap_or(1.0)
}

/// Salary an employee of this experience and department would expect
pub fn expected_salary(experience: u32, department: &str) -> f64 {
    (BASE_SALARY + f64::from(experience) * EXPECTED_SALARY_PER_YEAR)
        * department_multiplier(department)
}

pub fn satisfaction_factor(satisfaction: f64) -> f64 {
    if satisfaction < SATISFACTION_CRITICAL {
        SATISFACTION_CRITICAL_POINTS
    } else if satisfaction < SATISFACTION_LOW {
        SATISFACTION_LOW_POINTS
    } else if satisfaction < SATISFACTION_MODERATE {
        SATISFACTION_MODERATE_POINTS
    } else {
        0.0
    }
}

pub fn work_hours_factor(work_hours: f64) -> f64 {
    if work_hours > OVERWORK_SEVERE_HOURS {
        OVERWORK_SEVERE_POINTS
    } else if work_hours > OVERWORK_MILD_HOURS {
        OVERWORK_MILD_POINTS
    } else if work_hours < UNDERWORK_HOURS {
        UNDERWORK_POINTS
    } else {
        0.0
    }
}

pub fn project_load_factor(project_count: u32) -> f64 {
    if project_count > PROJECT_OVERLOAD {
        PROJECT_OVERLOAD_POINTS
    } else if project_count < PROJECT_UNDERLOAD {
        PROJECT_UNDERLOAD_POINTS
    } else {
        0.0
    }
}

pub fn evaluation_factor(last_evaluation: f64) -> f64 {
    if last_evaluation < EVALUATION_POOR {
        EVALUATION_POOR_POINTS
    } else {
        0.0
    }
}

pub fn salary_gap_factor(salary: f64, experience: u32, department: &str) -> f64 {
    let expected = expected_salary(experience, department);
    if salary < expected * UNDERPAID_SEVERE_RATIO {
        UNDERPAID_SEVERE_POINTS
    } else if salary < expected * UNDERPAID_MILD_RATIO {
        UNDERPAID_MILD_POINTS
    } else {
        0.0
    }
}

/// Sum of the five factor contributions, before noise and archetype clamping
pub fn attrition_score(
    satisfaction: f64,
    work_hours: f64,
    project_count: u32,
    last_evaluation: f64,
    salary: f64,
    experience: u32,
    department: &str,
) -> f64 {
    satisfaction_factor(satisfaction)
        + work_hours_factor(work_hours)
        + project_load_factor(project_count)
        + evaluation_factor(last_evaluation)
        + salary_gap_factor(salary, experience, department)
}

/// Deterministic performance blend on the 0-100 scale
pub fn performance_score(
    last_evaluation: f64,
    project_count: u32,
    satisfaction: f64,
    work_hours: f64,
) -> f64 {
    let utilization = (f64::from(project_count) / PROJECT_FULL_UTILIZATION).min(1.0);
    let hours_balance = 1.0 - (work_hours - IDEAL_WORK_HOURS).abs() / IDEAL_WORK_HOURS;

    last_evaluation * PERFORMANCE_EVALUATION_WEIGHT
        + utilization * PERFORMANCE_PROJECT_WEIGHT
        + satisfaction * PERFORMANCE_SATISFACTION_WEIGHT
        + hours_balance * PERFORMANCE_HOURS_WEIGHT
}
