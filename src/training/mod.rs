//! One-shot offline training
//!
//! Fits the department encoding, both scalers and both models from a corpus,
//! evaluates on held-out splits and hands back the artifact set together with
//! the evaluation metrics. Nothing is persisted unless the whole run
//! succeeds.

use crate::artifacts::ModelArtifactSet;
use crate::config::TrainingSettings;
use crate::corpus::{read_corpus_csv, CorpusDiagnostics, CorpusRecord};
use crate::error::{EngineError, Result};
use crate::features::{DepartmentEncoding, FeatureDefaults, FeatureEncoder};
use crate::model::metrics::{accuracy, r2_score, rmse};
use crate::model::{AttritionClassifier, PerformanceRegressor, TrainingMetrics};
use crate::risk::{AttritionLabel, LEAVE_THRESHOLD};
use crate::scaling::StandardScaler;
use ndarray::Array2;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::path::Path;
use tracing::info;

/// Smallest corpus the trainer accepts
pub const MIN_CORPUS_RECORDS: usize = 30;

/// Smallest per-class count the trainer accepts
pub const MIN_CLASS_RECORDS: usize = 5;

/// Fits and evaluates the full artifact set
pub struct Trainer {
    settings: TrainingSettings,
}

impl Trainer {
    pub fn new(settings: TrainingSettings) -> Self {
        Self { settings }
    }

    /// Train from a corpus file (see the interchange format in `corpus`)
    pub fn train_from_csv(
        &self,
        path: impl AsRef<Path>,
    ) -> Result<(ModelArtifactSet, TrainingMetrics)> {
        let records = read_corpus_csv(path)?;
        self.train(&records)
    }

    /// Train both models and report held-out metrics
    pub fn train(&self, corpus: &[CorpusRecord]) -> Result<(ModelArtifactSet, TrainingMetrics)> {
        let diagnostics = CorpusDiagnostics::describe(corpus);
        if diagnostics.records < MIN_CORPUS_RECORDS
            || diagnostics.leave < MIN_CLASS_RECORDS
            || diagnostics.stay < MIN_CLASS_RECORDS
        {
            return Err(EngineError::TrainingDataInsufficient {
                records: diagnostics.records,
                leave: diagnostics.leave,
                stay: diagnostics.stay,
                min_records: MIN_CORPUS_RECORDS,
                min_per_class: MIN_CLASS_RECORDS,
            });
        }

        info!(
            records = diagnostics.records,
            leave = diagnostics.leave,
            stay = diagnostics.stay,
            departments = diagnostics.departments,
            "Training on corpus"
        );

        // Encoding and feature matrix are shared by both tasks; the split,
        // scaler and model of each task are fully independent.
        let encoding = DepartmentEncoding::fit(corpus.iter().map(|r| r.department.clone()));
        let encoder = FeatureEncoder::new(encoding, FeatureDefaults::default());

        let employees: Vec<_> = corpus.iter().map(|r| r.to_employee()).collect();
        let features = encoder.encode_matrix(&employees)?;

        let labels: Vec<i32> = corpus
            .iter()
            .map(|r| i32::from(r.attrition == AttritionLabel::Leave))
            .collect();
        let targets: Vec<f64> = corpus.iter().map(|r| r.performance_score).collect();

        // Attrition task: stratified split keeps the class ratio in both halves
        let (train_idx, test_idx) =
            stratified_split(&labels, self.settings.test_fraction, self.settings.seed);

        let x_train = select_rows(&features, &train_idx);
        let x_test = select_rows(&features, &test_idx);
        let y_train: Vec<i32> = train_idx.iter().map(|&i| labels[i]).collect();
        let y_test: Vec<i32> = test_idx.iter().map(|&i| labels[i]).collect();

        let attrition_scaler = StandardScaler::fit(&x_train)?;
        let mut attrition_model = AttritionClassifier::new();
        attrition_model.fit(
            &attrition_scaler.transform(&x_train)?,
            &y_train,
            self.settings.seed,
        )?;

        let probabilities = attrition_model.predict_proba(&attrition_scaler.transform(&x_test)?)?;
        let predictions: Vec<i32> = probabilities
            .iter()
            .map(|&p| i32::from(p > LEAVE_THRESHOLD))
            .collect();
        let classifier_accuracy = accuracy(&y_test, &predictions);

        info!(
            "Attrition classifier trained on {} records - held-out accuracy: {:.4}",
            train_idx.len(),
            classifier_accuracy
        );

        // Performance task: plain shuffled split, its own scaler
        let (perf_train_idx, perf_test_idx) =
            shuffled_split(corpus.len(), self.settings.test_fraction, self.settings.seed);

        let x_perf_train = select_rows(&features, &perf_train_idx);
        let x_perf_test = select_rows(&features, &perf_test_idx);
        let t_train: Vec<f64> = perf_train_idx.iter().map(|&i| targets[i]).collect();
        let t_test: Vec<f64> = perf_test_idx.iter().map(|&i| targets[i]).collect();

        let performance_scaler = StandardScaler::fit(&x_perf_train)?;
        let mut performance_model = PerformanceRegressor::new();
        performance_model.fit(&performance_scaler.transform(&x_perf_train)?, &t_train)?;

        let regressor_predictions =
            performance_model.predict(&performance_scaler.transform(&x_perf_test)?)?;
        let predicted: Vec<f64> = regressor_predictions.to_vec();
        let regressor_rmse = rmse(&t_test, &predicted);
        let regressor_r2 = r2_score(&t_test, &predicted);

        info!(
            "Performance regressor trained - RMSE: {:.4}, R2: {:.4}",
            regressor_rmse, regressor_r2
        );

        let artifacts = ModelArtifactSet {
            encoder,
            attrition_scaler,
            attrition_model,
            performance_scaler,
            performance_model,
        };

        let metrics = TrainingMetrics {
            accuracy: classifier_accuracy,
            rmse: regressor_rmse,
            r2: regressor_r2,
            train_records: train_idx.len(),
            test_records: test_idx.len(),
        };

        Ok((artifacts, metrics))
    }

    /// Train and atomically persist the artifact set
    ///
    /// The swap happens only after every fit and evaluation succeeded, so a
    /// failed run never leaves a partial set behind.
    pub fn train_and_save(
        &self,
        corpus: &[CorpusRecord],
        dir: impl AsRef<Path>,
    ) -> Result<TrainingMetrics> {
        let (artifacts, metrics) = self.train(corpus)?;
        artifacts.save(dir)?;
        Ok(metrics)
    }
}

impl Default for Trainer {
    fn default() -> Self {
        Self::new(TrainingSettings::default())
    }
}

/// Class-preserving train/test split: each class is shuffled and divided
/// separately so both halves keep the corpus class ratio.
fn stratified_split(labels: &[i32], test_fraction: f64, seed: u64) -> (Vec<usize>, Vec<usize>) {
    let mut positive: Vec<usize> = Vec::new();
    let mut negative: Vec<usize> = Vec::new();
    for (i, &label) in labels.iter().enumerate() {
        if label == 1 {
            positive.push(i);
        } else {
            negative.push(i);
        }
    }

    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    positive.shuffle(&mut rng);
    negative.shuffle(&mut rng);

    let test_pos = (positive.len() as f64 * test_fraction).round() as usize;
    let test_neg = (negative.len() as f64 * test_fraction).round() as usize;

    let test: Vec<usize> = positive[..test_pos]
        .iter()
        .chain(negative[..test_neg].iter())
        .copied()
        .collect();
    let train: Vec<usize> = positive[test_pos..]
        .iter()
        .chain(negative[test_neg..].iter())
        .copied()
        .collect();

    (train, test)
}

/// Plain shuffled train/test split
fn shuffled_split(n: usize, test_fraction: f64, seed: u64) -> (Vec<usize>, Vec<usize>) {
    let mut indices: Vec<usize> = (0..n).collect();
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    indices.shuffle(&mut rng);

    let test_count = (n as f64 * test_fraction).round() as usize;
    let test = indices[..test_count].to_vec();
    let train = indices[test_count..].to_vec();

    (train, test)
}

fn select_rows(features: &Array2<f64>, indices: &[usize]) -> Array2<f64> {
    let mut data = Vec::with_capacity(indices.len() * features.ncols());
    for &i in indices {
        data.extend(features.row(i).iter().copied());
    }
    Array2::from_shape_vec((indices.len(), features.ncols()), data)
        .expect("row selection preserves shape")
}
