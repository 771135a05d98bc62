use crate::error::{EngineError, Result};
use crate::features::employee::{EmployeeRecord, FeatureDefaults};
use ndarray::Array2;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Number of columns in the model feature vector
pub const FEATURE_COUNT: usize = 8;

/// Column order shared by training and inference. Reordering silently shifts
/// predictions, so this is the load-bearing constant of the whole crate.
pub const FEATURE_COLUMNS: [&str; FEATURE_COUNT] = [
    "age",
    "experience",
    "salary",
    "satisfaction_level",
    "last_evaluation_score",
    "project_count",
    "work_hours",
    "department_code",
];

/// Bijection from department name to integer code
///
/// Fit once over the training corpus's distinct departments, sorted so the
/// assignment is independent of record order. Lookups for departments outside
/// the fitted set fail explicitly; a silent default would mask skew between
/// the encoder and the training set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DepartmentEncoding {
    codes: BTreeMap<String, usize>,
}

impl DepartmentEncoding {
    /// Fit the encoding from an iterator of department names
    pub fn fit<I, S>(departments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let distinct: std::collections::BTreeSet<String> =
            departments.into_iter().map(Into::into).collect();

        let codes = distinct
            .into_iter()
            .enumerate()
            .map(|(code, name)| (name, code))
            .collect();

        Self { codes }
    }

    /// Look up the code for a department
    pub fn code(&self, department: &str) -> Result<usize> {
        self.codes
            .get(department)
            .copied()
            .ok_or_else(|| EngineError::UnknownDepartment(department.to_string()))
    }

    /// Department names in code order
    pub fn departments(&self) -> Vec<&str> {
        let mut names: Vec<(&str, usize)> = self
            .codes
            .iter()
            .map(|(name, &code)| (name.as_str(), code))
            .collect();
        names.sort_by_key(|&(_, code)| code);
        names.into_iter().map(|(name, _)| name).collect()
    }

    pub fn len(&self) -> usize {
        self.codes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }
}

/// Maps a raw employee record to the fixed-order feature vector
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureEncoder {
    departments: DepartmentEncoding,
    defaults: FeatureDefaults,
}

impl FeatureEncoder {
    pub fn new(departments: DepartmentEncoding, defaults: FeatureDefaults) -> Self {
        Self {
            departments,
            defaults,
        }
    }

    pub fn departments(&self) -> &DepartmentEncoding {
        &self.departments
    }

    pub fn defaults(&self) -> &FeatureDefaults {
        &self.defaults
    }

    pub fn n_features(&self) -> usize {
        FEATURE_COUNT
    }

    /// Encode one employee into the fixed column order
    pub fn encode(&self, employee: &EmployeeRecord) -> Result<[f64; FEATURE_COUNT]> {
        let department_code = self.departments.code(&employee.department)?;

        Ok([
            f64::from(employee.age),
            f64::from(employee.experience),
            employee.salary,
            employee.satisfaction.unwrap_or(self.defaults.satisfaction),
            employee
                .last_evaluation
                .unwrap_or(self.defaults.last_evaluation),
            f64::from(employee.project_count.unwrap_or(self.defaults.project_count)),
            f64::from(employee.work_hours.unwrap_or(self.defaults.work_hours)),
            department_code as f64,
        ])
    }

    /// Encode a batch of employees into an (n, 8) matrix
    pub fn encode_matrix(&self, employees: &[EmployeeRecord]) -> Result<Array2<f64>> {
        let mut data = Vec::with_capacity(employees.len() * FEATURE_COUNT);
        for employee in employees {
            data.extend_from_slice(&self.encode(employee)?);
        }

        Array2::from_shape_vec((employees.len(), FEATURE_COUNT), data)
            .map_err(|e| EngineError::Model(format!("Failed to build feature matrix: {}", e)))
    }
}
