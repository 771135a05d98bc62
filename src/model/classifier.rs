use crate::error::{EngineError, Result};
use crate::model::{to_dense_matrix, Model};
use ndarray::{Array1, Array2};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use smartcore::linalg::basic::matrix::DenseMatrix;
use smartcore::tree::decision_tree_classifier::{
    DecisionTreeClassifier, DecisionTreeClassifierParameters, SplitCriterion,
};
use tracing::debug;

/// Number of bootstrap trees in the ensemble
pub const N_TREES: usize = 100;

/// Maximum depth per tree
pub const MAX_TREE_DEPTH: u16 = 10;

/// Minimum samples required to split an internal node
pub const MIN_SAMPLES_SPLIT: usize = 5;

/// Minimum samples required at a leaf node
pub const MIN_SAMPLES_LEAF: usize = 2;

/// Binary attrition classifier
///
/// A bagged ensemble of Gini decision trees, each fit on a bootstrap sample
/// drawn from a seeded stream. The positive-class probability is the fraction
/// of trees voting Leave, which keeps probabilities meaningful across the
/// whole [0, 1] range for risk tiering.
#[derive(Serialize, Deserialize)]
pub struct AttritionClassifier {
    trees: Vec<DecisionTreeClassifier<f64, i32, DenseMatrix<f64>, Vec<i32>>>,
    n_features: usize,
    trained: bool,
}

impl AttritionClassifier {
    pub fn new() -> Self {
        Self {
            trees: Vec::new(),
            n_features: 0,
            trained: false,
        }
    }

    /// Fit the ensemble on scaled features and binary labels (1 = Leave)
    pub fn fit(&mut self, features: &Array2<f64>, labels: &[i32], seed: u64) -> Result<()> {
        let n_samples = features.nrows();
        if n_samples == 0 || n_samples != labels.len() {
            return Err(EngineError::Model(format!(
                "Classifier fit requires matching non-empty features and labels, got {} rows and {} labels",
                n_samples,
                labels.len()
            )));
        }

        let n_features = features.ncols();
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let mut trees = Vec::with_capacity(N_TREES);

        for _ in 0..N_TREES {
            let mut data = Vec::with_capacity(n_samples * n_features);
            let mut sample_labels = Vec::with_capacity(n_samples);

            for _ in 0..n_samples {
                let row = rng.gen_range(0..n_samples);
                data.extend(features.row(row).iter().copied());
                sample_labels.push(labels[row]);
            }

            let x = DenseMatrix::new(n_samples, n_features, data, false);
            let params = DecisionTreeClassifierParameters::default()
                .with_criterion(SplitCriterion::Gini)
                .with_max_depth(MAX_TREE_DEPTH)
                .with_min_samples_split(MIN_SAMPLES_SPLIT)
                .with_min_samples_leaf(MIN_SAMPLES_LEAF);

            let tree = DecisionTreeClassifier::fit(&x, &sample_labels, params)
                .map_err(|e| EngineError::Model(format!("Failed to fit tree: {}", e)))?;
            trees.push(tree);
        }

        self.trees = trees;
        self.n_features = n_features;
        self.trained = true;

        debug!(
            trees = N_TREES,
            samples = n_samples,
            "Attrition classifier fit complete"
        );

        Ok(())
    }

    /// Probability of the positive (Leave) class per row
    pub fn predict_proba(&self, features: &Array2<f64>) -> Result<Array1<f64>> {
        if !self.trained {
            return Err(EngineError::Model(
                "Attrition classifier not trained".to_string(),
            ));
        }
        if features.ncols() != self.n_features {
            return Err(EngineError::Model(format!(
                "Classifier fit on {} features, got {}",
                self.n_features,
                features.ncols()
            )));
        }

        let x = to_dense_matrix(features);
        let mut votes = vec![0.0; features.nrows()];

        for tree in &self.trees {
            let predictions = tree
                .predict(&x)
                .map_err(|e| EngineError::Model(format!("Tree prediction failed: {}", e)))?;
            for (vote, &prediction) in votes.iter_mut().zip(predictions.iter()) {
                if prediction == 1 {
                    *vote += 1.0;
                }
            }
        }

        let n_trees = self.trees.len() as f64;
        Ok(Array1::from_iter(votes.into_iter().map(|v| v / n_trees)))
    }

    /// Probability of the positive class for a single scaled row
    pub fn predict_proba_one(&self, features: &[f64]) -> Result<f64> {
        let matrix = Array2::from_shape_vec((1, features.len()), features.to_vec())
            .map_err(|e| EngineError::Model(format!("Failed to build feature row: {}", e)))?;
        Ok(self.predict_proba(&matrix)?[0])
    }
}

impl Default for AttritionClassifier {
    fn default() -> Self {
        Self::new()
    }
}

impl Model for AttritionClassifier {
    fn name(&self) -> &'static str {
        "attrition_classifier"
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

    /// Two well-separated clusters: label 1 around (10, 10), label 0 around (0, 0)
    fn separable_data(n_per_class: usize) -> (Array2<f64>, Vec<i32>) {
        let mut data = Vec::new();
        let mut labels = Vec::new();

        for i in 0..n_per_class {
            let jitter = (i % 7) as f64 * 0.1;
            data.extend_from_slice(&[jitter, jitter + 0.2]);
            labels.push(0);
            data.extend_from_slice(&[10.0 + jitter, 10.0 - jitter]);
            labels.push(1);
        }

        let x = Array2::from_shape_vec((n_per_class * 2, 2), data).unwrap();
        (x, labels)
    }

    #[test]
    fn test_untrained_classifier_rejects_predict() {
        let classifier = AttritionClassifier::new();
        assert!(!classifier.is_trained());
        assert!(classifier.predict_proba_one(&[0.0, 0.0]).is_err());
    }

    #[test]
    fn test_fit_and_separate_clusters() {
        let (x, y) = separable_data(30);
        let mut classifier = AttritionClassifier::new();
        classifier.fit(&x, &y, 7).unwrap();

        assert!(classifier.is_trained());
        assert_eq!(classifier.n_features(), Some(2));

        let leave = classifier.predict_proba_one(&[10.0, 10.0]).unwrap();
        let stay = classifier.predict_proba_one(&[0.0, 0.0]).unwrap();

        assert!(leave > 0.9, "positive cluster probability {}", leave);
        assert!(stay < 0.1, "negative cluster probability {}", stay);
    }

    #[test]
    fn test_probabilities_are_bounded() {
        let (x, y) = separable_data(20);
        let mut classifier = AttritionClassifier::new();
        classifier.fit(&x, &y, 11).unwrap();

        let probabilities = classifier.predict_proba(&x).unwrap();
        for &p in probabilities.iter() {
            assert!((0.0..=1.0).contains(&p));
        }
    }

    #[test]
    fn test_same_seed_reproduces_probabilities() {
        let (x, y) = separable_data(15);

        let mut first = AttritionClassifier::new();
        first.fit(&x, &y, 42).unwrap();
        let mut second = AttritionClassifier::new();
        second.fit(&x, &y, 42).unwrap();

        let point = [5.0, 5.0];
        assert_eq!(
            first.predict_proba_one(&point).unwrap(),
            second.predict_proba_one(&point).unwrap()
        );
    }

    #[test]
    fn test_feature_count_mismatch_rejected() {
        let (x, y) = separable_data(15);
        let mut classifier = AttritionClassifier::new();
        classifier.fit(&x, &y, 3).unwrap();

        assert!(classifier.predict_proba_one(&[1.0, 2.0, 3.0]).is_err());
    }
}
