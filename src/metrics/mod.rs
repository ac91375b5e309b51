//! Evaluation metrics for binary diagnosis.
//!
//! Accuracy and confusion counts for predictions in {0, 1}, where 1 means
//! disease present.

use serde::{Deserialize, Serialize};

/// Compute classification accuracy.
///
/// accuracy = `correct_predictions` / `total_predictions`
///
/// # Panics
///
/// Panics if the slices have different lengths or are empty.
///
/// # Examples
///
/// ```
/// use corazon::metrics::accuracy;
///
/// let y_true = vec![0, 1, 1, 0];
/// let y_pred = vec![0, 1, 0, 0];
/// assert_eq!(accuracy(&y_pred, &y_true), 0.75);
/// ```
#[must_use]
pub fn accuracy(y_pred: &[u8], y_true: &[u8]) -> f32 {
    assert_eq!(y_pred.len(), y_true.len(), "Vectors must have same length");
    assert!(!y_true.is_empty(), "Vectors cannot be empty");

    let correct = y_pred
        .iter()
        .zip(y_true.iter())
        .filter(|(p, t)| p == t)
        .count();

    correct as f32 / y_true.len() as f32
}

/// Binary confusion counts with derived rates.
///
/// Positive class is 1 (disease present).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfusionMatrix {
    /// Predicted 1, actual 1.
    pub true_positives: usize,
    /// Predicted 1, actual 0.
    pub false_positives: usize,
    /// Predicted 0, actual 0.
    pub true_negatives: usize,
    /// Predicted 0, actual 1.
    pub false_negatives: usize,
}

impl ConfusionMatrix {
    /// Tallies confusion counts from aligned prediction/label slices.
    ///
    /// # Panics
    ///
    /// Panics if the slices have different lengths.
    #[must_use]
    pub fn from_labels(y_pred: &[u8], y_true: &[u8]) -> Self {
        assert_eq!(y_pred.len(), y_true.len(), "Vectors must have same length");

        let mut cm = Self::default();
        for (&p, &t) in y_pred.iter().zip(y_true.iter()) {
            match (p, t) {
                (1, 1) => cm.true_positives += 1,
                (1, 0) => cm.false_positives += 1,
                (0, 0) => cm.true_negatives += 1,
                _ => cm.false_negatives += 1,
            }
        }
        cm
    }

    /// Total number of classified samples.
    #[must_use]
    pub fn total(&self) -> usize {
        self.true_positives + self.false_positives + self.true_negatives + self.false_negatives
    }

    /// Fraction of correct classifications; 0.0 for an empty matrix.
    #[must_use]
    pub fn accuracy(&self) -> f32 {
        let total = self.total();
        if total == 0 {
            return 0.0;
        }
        (self.true_positives + self.true_negatives) as f32 / total as f32
    }

    /// TP / (TP + FP); 0.0 when nothing was predicted positive.
    #[must_use]
    pub fn precision(&self) -> f32 {
        let denom = self.true_positives + self.false_positives;
        if denom == 0 {
            return 0.0;
        }
        self.true_positives as f32 / denom as f32
    }

    /// TP / (TP + FN); 0.0 when no positives exist.
    #[must_use]
    pub fn recall(&self) -> f32 {
        let denom = self.true_positives + self.false_negatives;
        if denom == 0 {
            return 0.0;
        }
        self.true_positives as f32 / denom as f32
    }

    /// Harmonic mean of precision and recall; 0.0 when both are zero.
    #[must_use]
    pub fn f1(&self) -> f32 {
        let p = self.precision();
        let r = self.recall();
        if p + r == 0.0 {
            return 0.0;
        }
        2.0 * p * r / (p + r)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accuracy_all_correct() {
        assert_eq!(accuracy(&[0, 1, 1], &[0, 1, 1]), 1.0);
    }

    #[test]
    fn test_accuracy_half_correct() {
        assert_eq!(accuracy(&[0, 0, 1, 1], &[0, 1, 0, 1]), 0.5);
    }

    #[test]
    #[should_panic(expected = "same length")]
    fn test_accuracy_length_mismatch_panics() {
        let _ = accuracy(&[0, 1], &[0]);
    }

    #[test]
    fn test_confusion_counts() {
        let cm = ConfusionMatrix::from_labels(&[1, 1, 0, 0, 1], &[1, 0, 0, 1, 1]);
        assert_eq!(cm.true_positives, 2);
        assert_eq!(cm.false_positives, 1);
        assert_eq!(cm.true_negatives, 1);
        assert_eq!(cm.false_negatives, 1);
        assert_eq!(cm.total(), 5);
    }

    #[test]
    fn test_confusion_accuracy_matches_accuracy_fn() {
        let y_pred = [1, 1, 0, 0, 1];
        let y_true = [1, 0, 0, 1, 1];
        let cm = ConfusionMatrix::from_labels(&y_pred, &y_true);
        assert_eq!(cm.accuracy(), accuracy(&y_pred, &y_true));
    }

    #[test]
    fn test_precision_recall_f1() {
        let cm = ConfusionMatrix {
            true_positives: 6,
            false_positives: 2,
            true_negatives: 10,
            false_negatives: 3,
        };
        assert!((cm.precision() - 0.75).abs() < 1e-6);
        assert!((cm.recall() - 6.0 / 9.0).abs() < 1e-6);
        let p = 0.75_f32;
        let r = 6.0_f32 / 9.0;
        assert!((cm.f1() - 2.0 * p * r / (p + r)).abs() < 1e-6);
    }

    #[test]
    fn test_empty_matrix_rates_are_zero() {
        let cm = ConfusionMatrix::default();
        assert_eq!(cm.accuracy(), 0.0);
        assert_eq!(cm.precision(), 0.0);
        assert_eq!(cm.recall(), 0.0);
        assert_eq!(cm.f1(), 0.0);
    }
}
