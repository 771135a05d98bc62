use serde::{Deserialize, Serialize};

/// Held-out evaluation metrics reported by the trainer
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainingMetrics {
    /// Classifier accuracy on its held-out split
    pub accuracy: f64,

    /// Regressor root mean squared error on its held-out split
    pub rmse: f64,

    /// Regressor coefficient of determination on its held-out split
    pub r2: f64,

    /// Records used for training (classifier split)
    pub train_records: usize,

    /// Records held out for evaluation (classifier split)
    pub test_records: usize,
}

/// Fraction of matching label pairs
pub fn accuracy(y_true: &[i32], y_pred: &[i32]) -> f64 {
    if y_true.is_empty() {
        return 0.0;
    }

    let correct = y_true
        .iter()
        .zip(y_pred.iter())
        .filter(|(t, p)| t == p)
        .count();
    correct as f64 / y_true.len() as f64
}

/// Root mean squared error
pub fn rmse(y_true: &[f64], y_pred: &[f64]) -> f64 {
    if y_true.is_empty() {
        return 0.0;
    }

    let mse = y_true
        .iter()
        .zip(y_pred.iter())
        .map(|(&t, &p)| (t - p) * (t - p))
        .sum::<f64>()
        / y_true.len() as f64;
    mse.sqrt()
}

/// Coefficient of determination (1 - SS_res / SS_tot)
pub fn r2_score(y_true: &[f64], y_pred: &[f64]) -> f64 {
    if y_true.is_empty() {
        return 0.0;
    }

    let mean = y_true.iter().sum::<f64>() / y_true.len() as f64;
    let ss_tot: f64 = y_true.iter().map(|&t| (t - mean) * (t - mean)).sum();
    let ss_res: f64 = y_true
        .iter()
        .zip(y_pred.iter())
        .map(|(&t, &p)| (t - p) * (t - p))
        .sum();

    if ss_tot == 0.0 {
        return 0.0;
    }
    1.0 - ss_res / ss_tot
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accuracy() {
        assert_eq!(accuracy(&[1, 0, 1, 0], &[1, 0, 0, 0]), 0.75);
        assert_eq!(accuracy(&[], &[]), 0.0);
    }

    #[test]
    fn test_rmse_of_exact_prediction_is_zero() {
        let y = [10.0, 20.0, 30.0];
        assert_eq!(rmse(&y, &y), 0.0);
    }

    #[test]
    fn test_rmse_known_value() {
        let value = rmse(&[0.0, 0.0], &[3.0, 4.0]);
        let expected = (12.5f64).sqrt();
        assert!((value - expected).abs() < 1e-12);
    }

    #[test]
    fn test_r2_bounds() {
        let y_true = [1.0, 2.0, 3.0, 4.0];
        assert!((r2_score(&y_true, &y_true) - 1.0).abs() < 1e-12);

        // Predicting the mean everywhere gives exactly zero
        let mean_pred = [2.5, 2.5, 2.5, 2.5];
        assert!(r2_score(&y_true, &mean_pred).abs() < 1e-12);
    }

    #[test]
    fn test_r2_degenerate_targets() {
        assert_eq!(r2_score(&[5.0, 5.0], &[5.0, 5.0]), 0.0);
    }
}
