use crate::artifacts::ModelArtifactSet;
use crate::error::Result;
use crate::risk::{AttritionLabel, RiskTier};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;
use validator::Validate;

use crate::features::EmployeeRecord;

/// Combined prediction for one employee
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PredictionResult {
    pub attrition_label: AttritionLabel,
    pub attrition_probability: f64,
    pub performance_score: f64,
    pub risk_tier: RiskTier,
}

/// Serving pipeline over an immutable artifact set
///
/// The artifact set is injected at construction and shared read-only for the
/// process lifetime; every prediction runs validate → encode → scale →
/// predict with no shared mutable state, so one pipeline can serve
/// concurrent callers behind an `Arc` without locking.
pub struct PredictionPipeline {
    artifacts: ModelArtifactSet,
}

impl PredictionPipeline {
    pub fn new(artifacts: ModelArtifactSet) -> Self {
        Self { artifacts }
    }

    /// Load the persisted artifact set and build a pipeline over it
    pub fn load(dir: impl AsRef<Path>) -> Result<Self> {
        Ok(Self::new(ModelArtifactSet::load(dir)?))
    }

    pub fn artifacts(&self) -> &ModelArtifactSet {
        &self.artifacts
    }

    /// Predict attrition, performance and risk tier for one employee
    pub fn predict_one(&self, employee: &EmployeeRecord) -> Result<PredictionResult> {
        employee.validate()?;

        let features = self.artifacts.encoder.encode(employee)?;

        let scaled = self.artifacts.attrition_scaler.transform_row(&features)?;
        let attrition_probability = self.artifacts.attrition_model.predict_proba_one(&scaled)?;
        let attrition_label = AttritionLabel::from_probability(attrition_probability);

        let scaled = self.artifacts.performance_scaler.transform_row(&features)?;
        let raw_performance = self.artifacts.performance_model.predict_one(&scaled)?;
        let performance_score = raw_performance.clamp(0.0, 100.0);

        let risk_tier = RiskTier::from_probability(attrition_probability);

        debug!(
            "Prediction served for {}: probability {:.3}, tier {}",
            employee.department, attrition_probability, risk_tier
        );

        Ok(PredictionResult {
            attrition_label,
            attrition_probability,
            performance_score,
            risk_tier,
        })
    }

    /// Predict for a batch, degrading per item
    ///
    /// Each record's outcome is independent: a failure (unknown department,
    /// out-of-range field) is reported in that record's slot and the rest of
    /// the batch is still served.
    pub fn predict_batch(&self, employees: &[EmployeeRecord]) -> Vec<Result<PredictionResult>> {
        employees
            .iter()
            .map(|employee| self.predict_one(employee))
            .collect()
    }
}
