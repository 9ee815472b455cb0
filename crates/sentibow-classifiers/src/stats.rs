//! Evaluation statistics for class predictions.
//!
//! Precision, recall and F1 are computed one-vs-rest per class. A ratio with a
//! zero denominator (no predictions or no support for a class) is reported as 0.
use std::fmt;

use serde::Serialize;

use crate::data_handling::{count_classes, Dataset};
use crate::error::{ClassifierError, Result};
use crate::models::ClassifierModel;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClassMetrics {
    pub precision: f64,
    pub recall: f64,
    pub f1: f64,
    /// Number of true examples of this class.
    pub support: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClassificationReport {
    pub accuracy: f64,
    pub per_class: Vec<ClassMetrics>,
    /// `confusion[truth][predicted]`
    pub confusion: Vec<Vec<usize>>,
}

fn check_lengths(truth: &[usize], predicted: &[usize]) -> Result<()> {
    if truth.len() != predicted.len() {
        return Err(ClassifierError::DimensionMismatch {
            expected: truth.len(),
            found: predicted.len(),
        });
    }
    if truth.is_empty() {
        return Err(ClassifierError::InsufficientData(
            "cannot evaluate an empty set of predictions".to_string(),
        ));
    }
    Ok(())
}

fn ratio(num: usize, den: usize) -> f64 {
    if den == 0 {
        0.0
    } else {
        num as f64 / den as f64
    }
}

/// Fraction of positions where `predicted` equals `truth`.
pub fn accuracy(truth: &[usize], predicted: &[usize]) -> Result<f64> {
    check_lengths(truth, predicted)?;
    let correct = truth
        .iter()
        .zip(predicted.iter())
        .filter(|(t, p)| t == p)
        .count();
    Ok(ratio(correct, truth.len()))
}

/// Square count matrix indexed `[truth][predicted]` covering every class that
/// appears on either side.
pub fn confusion_matrix(truth: &[usize], predicted: &[usize]) -> Result<Vec<Vec<usize>>> {
    check_lengths(truth, predicted)?;
    let num_classes = count_classes(truth)?.max(count_classes(predicted)?);
    let mut matrix = vec![vec![0usize; num_classes]; num_classes];
    for (&t, &p) in truth.iter().zip(predicted.iter()) {
        matrix[t][p] += 1;
    }
    Ok(matrix)
}

pub fn classification_report(truth: &[usize], predicted: &[usize]) -> Result<ClassificationReport> {
    let confusion = confusion_matrix(truth, predicted)?;
    let num_classes = confusion.len();

    let per_class = (0..num_classes)
        .map(|class| {
            let true_pos = confusion[class][class];
            let predicted_pos: usize = confusion.iter().map(|row| row[class]).sum();
            let support: usize = confusion[class].iter().sum();
            let precision = ratio(true_pos, predicted_pos);
            let recall = ratio(true_pos, support);
            let f1 = if precision + recall > 0.0 {
                2.0 * precision * recall / (precision + recall)
            } else {
                0.0
            };
            ClassMetrics {
                precision,
                recall,
                f1,
                support,
            }
        })
        .collect();

    Ok(ClassificationReport {
        accuracy: accuracy(truth, predicted)?,
        per_class,
        confusion,
    })
}

/// Predict every row of `dataset` with `model` and score the result.
pub fn evaluate<M: ClassifierModel + ?Sized>(
    model: &M,
    dataset: &Dataset,
) -> Result<ClassificationReport> {
    let predicted = model.predict_batch(&dataset.x)?;
    let report = classification_report(dataset.y.as_slice(), &predicted)?;
    log::debug!(
        "{} accuracy on {} examples: {:.4}",
        model.name(),
        dataset.n_samples(),
        report.accuracy
    );
    Ok(report)
}

impl fmt::Display for ClassificationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "{:>8} {:>10} {:>10} {:>10} {:>8}",
            "class", "precision", "recall", "f1", "support"
        )?;
        for (class, m) in self.per_class.iter().enumerate() {
            writeln!(
                f,
                "{:>8} {:>10.4} {:>10.4} {:>10.4} {:>8}",
                class, m.precision, m.recall, m.f1, m.support
            )?;
        }
        write!(f, "accuracy: {:.4}", self.accuracy)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn report_on_known_predictions() {
        let truth = [1, 1, 1, 0, 0];
        let predicted = [1, 1, 0, 0, 1];
        let report = classification_report(&truth, &predicted).unwrap();

        assert_relative_eq!(report.accuracy, 0.6);
        assert_eq!(report.confusion, vec![vec![1, 1], vec![1, 2]]);

        let positive = &report.per_class[1];
        assert_relative_eq!(positive.precision, 2.0 / 3.0);
        assert_relative_eq!(positive.recall, 2.0 / 3.0);
        assert_relative_eq!(positive.f1, 2.0 / 3.0);
        assert_eq!(positive.support, 3);
    }

    #[test]
    fn zero_division_reports_zero() {
        let report = classification_report(&[0, 0], &[0, 0]).unwrap();
        assert_eq!(report.per_class.len(), 1);
        assert_relative_eq!(report.per_class[0].f1, 1.0);

        let report = classification_report(&[1, 1], &[0, 0]).unwrap();
        assert_eq!(report.per_class[0].precision, 0.0);
        assert_eq!(report.per_class[0].recall, 0.0);
        assert_eq!(report.per_class[1].precision, 0.0);
        assert_eq!(report.per_class[1].f1, 0.0);
    }

    #[test]
    fn mismatched_or_empty_inputs_error() {
        assert!(accuracy(&[0, 1], &[0]).is_err());
        assert!(accuracy(&[], &[]).is_err());
    }

    #[test]
    fn out_of_range_labels_error() {
        assert!(matches!(
            confusion_matrix(&[0, 1], &[usize::MAX, 0]),
            Err(ClassifierError::InvalidParameter(_))
        ));
        assert!(classification_report(&[usize::MAX], &[0]).is_err());
    }
}
