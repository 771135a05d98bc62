/// Trainable predictors behind the pipeline
///
/// Both models consume scaled 8-column feature rows and are serde-serializable
/// so the trainer can persist them as part of the artifact set:
/// - Attrition: bagged decision trees with vote-fraction probabilities
/// - Performance: gradient-boosted regression trees
pub mod classifier;
pub mod metrics;
pub mod regressor;

pub use classifier::AttritionClassifier;
pub use metrics::TrainingMetrics;
pub use regressor::PerformanceRegressor;

use ndarray::Array2;
use smartcore::linalg::basic::matrix::DenseMatrix;

/// Common capability surface for the two trained models
///
/// The artifact loader uses this seam to verify that a persisted model is
/// trained and agrees with the encoder on feature count; any model family
/// implementing it is substitutable.
pub trait Model: Send + Sync {
    /// Human-readable model name
    fn name(&self) -> &'static str;

    /// Number of features the model was fit on, None until trained
    fn n_features(&self) -> Option<usize>;

    /// Check if model is trained
    fn is_trained(&self) -> bool;
}

pub(crate) fn to_dense_matrix(arr: &Array2<f64>) -> DenseMatrix<f64> {
    let shape = arr.shape();
    let data: Vec<f64> = arr.iter().copied().collect();
    DenseMatrix::new(shape[0], shape[1], data, false)
}
