use crate::error::{EngineError, Result};
use crate::model::{to_dense_matrix, Model};
use ndarray::{Array1, Array2};
use serde::{Deserialize, Serialize};
use smartcore::linalg::basic::matrix::DenseMatrix;
use smartcore::tree::decision_tree_regressor::{
    DecisionTreeRegressor, DecisionTreeRegressorParameters,
};
use tracing::debug;

/// Number of boosting stages
pub const N_BOOSTING_STAGES: usize = 100;

/// Maximum depth per stage tree
pub const MAX_STAGE_DEPTH: u16 = 5;

/// Shrinkage applied to each stage's contribution
pub const LEARNING_RATE: f64 = 0.1;

/// Continuous performance-score regressor
///
/// Gradient boosting over shallow regression trees: the prediction starts at
/// the training-target mean and each stage fits the residuals of the current
/// ensemble, contributing through a fixed learning rate.
#[derive(Serialize, Deserialize)]
pub struct PerformanceRegressor {
    baseline: f64,
    stages: Vec<DecisionTreeRegressor<f64, f64, DenseMatrix<f64>, Vec<f64>>>,
    n_features: usize,
    trained: bool,
}

impl PerformanceRegressor {
    pub fn new() -> Self {
        Self {
            baseline: 0.0,
            stages: Vec::new(),
            n_features: 0,
            trained: false,
        }
    }

    /// Fit the boosted ensemble on scaled features and continuous targets
    pub fn fit(&mut self, features: &Array2<f64>, targets: &[f64]) -> Result<()> {
        let n_samples = features.nrows();
        if n_samples == 0 || n_samples != targets.len() {
            return Err(EngineError::Model(format!(
                "Regressor fit requires matching non-empty features and targets, got {} rows and {} targets",
                n_samples,
                targets.len()
            )));
        }

        let baseline = targets.iter().sum::<f64>() / n_samples as f64;
        let x = to_dense_matrix(features);

        let mut current: Vec<f64> = vec![baseline; n_samples];
        let mut stages = Vec::with_capacity(N_BOOSTING_STAGES);

        for _ in 0..N_BOOSTING_STAGES {
            let residuals: Vec<f64> = targets
                .iter()
                .zip(current.iter())
                .map(|(&y, &f)| y - f)
                .collect();

            let params = DecisionTreeRegressorParameters::default().with_max_depth(MAX_STAGE_DEPTH);
            let stage = DecisionTreeRegressor::fit(&x, &residuals, params)
                .map_err(|e| EngineError::Model(format!("Failed to fit boosting stage: {}", e)))?;

            let corrections = stage
                .predict(&x)
                .map_err(|e| EngineError::Model(format!("Stage prediction failed: {}", e)))?;
            for (f, correction) in current.iter_mut().zip(corrections.iter()) {
                *f += LEARNING_RATE * correction;
            }

            stages.push(stage);
        }

        self.baseline = baseline;
        self.stages = stages;
        self.n_features = features.ncols();
        self.trained = true;

        debug!(
            stages = N_BOOSTING_STAGES,
            samples = n_samples,
            "Performance regressor fit complete"
        );

        Ok(())
    }

    /// Predict raw (unclamped) scores per row
    pub fn predict(&self, features: &Array2<f64>) -> Result<Array1<f64>> {
        if !self.trained {
            return Err(EngineError::Model(
                "Performance regressor not trained".to_string(),
            ));
        }
        if features.ncols() != self.n_features {
            return Err(EngineError::Model(format!(
                "Regressor fit on {} features, got {}",
                self.n_features,
                features.ncols()
            )));
        }

        let x = to_dense_matrix(features);
        let mut predictions = vec![self.baseline; features.nrows()];

        for stage in &self.stages {
            let corrections = stage
                .predict(&x)
                .map_err(|e| EngineError::Model(format!("Stage prediction failed: {}", e)))?;
            for (prediction, correction) in predictions.iter_mut().zip(corrections.iter()) {
                *prediction += LEARNING_RATE * correction;
            }
        }

        Ok(Array1::from_vec(predictions))
    }

    /// Predict the raw score for a single scaled row
    pub fn predict_one(&self, features: &[f64]) -> Result<f64> {
        let matrix = Array2::from_shape_vec((1, features.len()), features.to_vec())
            .map_err(|e| EngineError::Model(format!("Failed to build feature row: {}", e)))?;
        Ok(self.predict(&matrix)?[0])
    }
}

impl Default for PerformanceRegressor {
    fn default() -> Self {
        Self::new()
    }
}

impl Model for PerformanceRegressor {
    fn name(&self) -> &'static str {
        "performance_regressor"
    }

    fn n_features(&self) -> Option<usize> {
        self.trained.then_some(self.n_features)
    }

    fn is_trained(&self) -> bool {
        self.trained
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Piecewise target a depth-limited tree ensemble can recover
    fn step_data(n: usize) -> (Array2<f64>, Vec<f64>) {
        let mut data = Vec::new();
        let mut targets = Vec::new();

        for i in 0..n {
            let x = i as f64 / n as f64 * 10.0;
            data.extend_from_slice(&[x, x * 0.5]);
            targets.push(if x < 5.0 { 20.0 } else { 80.0 });
        }

        (Array2::from_shape_vec((n, 2), data).unwrap(), targets)
    }

    #[test]
    fn test_untrained_regressor_rejects_predict() {
        let regressor = PerformanceRegressor::new();
        assert!(!regressor.is_trained());
        assert!(regressor.predict_one(&[0.0, 0.0]).is_err());
    }

    #[test]
    fn test_boosting_recovers_step_function() {
        let (x, y) = step_data(100);
        let mut regressor = PerformanceRegressor::new();
        regressor.fit(&x, &y).unwrap();

        assert!(regressor.is_trained());
        assert_eq!(regressor.n_features(), Some(2));

        let low = regressor.predict_one(&[2.0, 1.0]).unwrap();
        let high = regressor.predict_one(&[8.0, 4.0]).unwrap();

        assert!((low - 20.0).abs() < 5.0, "low prediction {}", low);
        assert!((high - 80.0).abs() < 5.0, "high prediction {}", high);
    }

    #[test]
    fn test_fit_is_deterministic() {
        let (x, y) = step_data(60);

        let mut first = PerformanceRegressor::new();
        first.fit(&x, &y).unwrap();
        let mut second = PerformanceRegressor::new();
        second.fit(&x, &y).unwrap();

        let point = [3.0, 1.5];
        assert_eq!(
            first.predict_one(&point).unwrap(),
            second.predict_one(&point).unwrap()
        );
    }

    #[test]
    fn test_feature_count_mismatch_rejected() {
        let (x, y) = step_data(40);
        let mut regressor = PerformanceRegressor::new();
        regressor.fit(&x, &y).unwrap();

        assert!(regressor.predict_one(&[1.0]).is_err());
    }
}
