use crate::error::{EngineError, Result};
use ndarray::{Array1, Array2, Axis};
use serde::{Deserialize, Serialize};

/// Column-wise standardizer fit at training time
///
/// Transforms features as (x - mean) / std using statistics from the training
/// rows. Zero-variance columns are passed through unchanged so the transform
/// never divides by zero. One instance exists per downstream model; the two
/// are fit independently and must never be swapped.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StandardScaler {
    means: Array1<f64>,
    stds: Array1<f64>,
}

impl StandardScaler {
    /// Fit per-column mean and standard deviation
    pub fn fit(features: &Array2<f64>) -> Result<Self> {
        if features.nrows() == 0 {
            return Err(EngineError::Model(
                "Cannot fit scaler on an empty matrix".to_string(),
            ));
        }

        let means = features
            .mean_axis(Axis(0))
            .ok_or_else(|| EngineError::Model("Failed to compute column means".to_string()))?;
        let stds = features.std_axis(Axis(0), 0.0);

        Ok(Self { means, stds })
    }

    pub fn n_features(&self) -> usize {
        self.means.len()
    }

    /// Standardize a matrix of feature rows
    pub fn transform(&self, features: &Array2<f64>) -> Result<Array2<f64>> {
        if features.ncols() != self.n_features() {
            return Err(EngineError::Model(format!(
                "Scaler fit on {} features, got {}",
                self.n_features(),
                features.ncols()
            )));
        }

        let mut scaled = features.clone();
        for (j, mut column) in scaled.columns_mut().into_iter().enumerate() {
            let std = self.stds[j];
            if std == 0.0 {
                continue;
            }
            let mean = self.means[j];
            column.mapv_inplace(|x| (x - mean) / std);
        }

        Ok(scaled)
    }

    /// Standardize a single feature row
    pub fn transform_row(&self, row: &[f64]) -> Result<Vec<f64>> {
        if row.len() != self.n_features() {
            return Err(EngineError::Model(format!(
                "Scaler fit on {} features, got {}",
                self.n_features(),
                row.len()
            )));
        }

        Ok(row
            .iter()
            .enumerate()
            .map(|(j, &x)| {
                let std = self.stds[j];
                if std == 0.0 {
                    x
                } else {
                    (x - self.means[j]) / std
                }
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn test_transform_standardizes_training_rows() {
        let features = array![
            [1.0, 10.0, 5.0],
            [2.0, 20.0, 5.0],
            [3.0, 30.0, 5.0],
            [4.0, 40.0, 5.0],
        ];

        let scaler = StandardScaler::fit(&features).unwrap();
        let scaled = scaler.transform(&features).unwrap();

        for j in 0..2 {
            let column = scaled.column(j);
            let mean: f64 = column.iter().sum::<f64>() / column.len() as f64;
            let var: f64 =
                column.iter().map(|&x| (x - mean) * (x - mean)).sum::<f64>() / column.len() as f64;

            assert!(mean.abs() < 1e-9, "column {} mean {}", j, mean);
            assert!((var.sqrt() - 1.0).abs() < 1e-9, "column {} std", j);
        }
    }

    #[test]
    fn test_zero_variance_column_is_untouched() {
        let features = array![[1.0, 5.0], [2.0, 5.0], [3.0, 5.0]];

        let scaler = StandardScaler::fit(&features).unwrap();
        let scaled = scaler.transform(&features).unwrap();

        for i in 0..3 {
            assert_eq!(scaled[[i, 1]], 5.0);
        }
    }

    #[test]
    fn test_transform_row_matches_matrix_transform() {
        let features = array![[1.0, 10.0], [2.0, 20.0], [3.0, 30.0]];
        let scaler = StandardScaler::fit(&features).unwrap();

        let scaled = scaler.transform(&features).unwrap();
        let row = scaler.transform_row(&[2.0, 20.0]).unwrap();

        assert!((row[0] - scaled[[1, 0]]).abs() < 1e-12);
        assert!((row[1] - scaled[[1, 1]]).abs() < 1e-12);
    }

    #[test]
    fn test_feature_count_mismatch_rejected() {
        let features = array![[1.0, 2.0], [3.0, 4.0]];
        let scaler = StandardScaler::fit(&features).unwrap();

        assert!(scaler.transform_row(&[1.0, 2.0, 3.0]).is_err());
        assert!(scaler.transform(&array![[1.0], [2.0]]).is_err());
    }

    #[test]
    fn test_fit_on_empty_matrix_rejected() {
        let features = Array2::<f64>::zeros((0, 3));
        assert!(StandardScaler::fit(&features).is_err());
    }
}
