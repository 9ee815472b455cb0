//! Multinomial Naive Bayes with additive (Laplace) smoothing.
//!
//! Training estimates one prior per class and one smoothed word distribution
//! per class from a bag-of-words matrix. Inference scores a vector in log
//! space, `log P(c) + Σ_w x_w · log P(w|c)`, which avoids the underflow of
//! multiplying many small probabilities.
//!
//! Classes are the contiguous index range `0..=max(label)`. A class inside
//! that range with no training examples gets prior 0 and a log-posterior of
//! `-inf`, so it is never predicted and receives probability 0. If the
//! likelihood rules out every class (only possible without smoothing), the
//! decision falls back to the priors.
use rayon::prelude::*;

use crate::data_handling::count_classes;
use crate::error::{ClassifierError, Result};
use crate::math::{Array1, Array2};
use crate::models::classifier_trait::ClassifierModel;

/// Smoothing constant used when none is given.
pub const DEFAULT_DELTA: f64 = 1.0;

#[derive(Debug, Clone)]
struct TrainedState {
    class_priors: Array1<f64>,
    conditional_probabilities: Vec<Array1<f64>>,
    log_conditionals: Vec<Array1<f64>>,
    vocab_size: usize,
}

/// Naive Bayes estimator. Starts untrained, is populated exactly once by
/// [`NaiveBayes::fit`] and is read-only afterwards.
#[derive(Debug, Clone)]
pub struct NaiveBayes {
    delta: f64,
    state: Option<TrainedState>,
}

impl Default for NaiveBayes {
    fn default() -> Self {
        Self::new()
    }
}

impl NaiveBayes {
    pub fn new() -> Self {
        Self::with_smoothing(DEFAULT_DELTA)
    }

    /// Untrained model whose [`ClassifierModel::fit`] uses `delta`.
    pub fn with_smoothing(delta: f64) -> Self {
        NaiveBayes { delta, state: None }
    }

    pub fn smoothing(&self) -> f64 {
        self.delta
    }

    /// Estimate class priors and smoothed conditional word probabilities.
    ///
    /// # Arguments
    ///
    /// * `features` - Bag-of-words matrix, one row per example.
    /// * `labels` - Class index of each row.
    /// * `delta` - Laplace smoothing constant, must be `>= 0`.
    ///
    /// # Errors
    ///
    /// * `InsufficientData` for an empty training set or a matrix without columns.
    /// * `InvalidParameter` for a negative or NaN `delta`, for negative or
    ///   non-finite feature values and for labels `>= MAX_CLASSES`.
    /// * `DimensionMismatch` when `labels` and `features` disagree on the row count.
    /// * `AlreadyTrained` if the model was fitted before.
    pub fn fit(&mut self, features: &Array2<f64>, labels: &[usize], delta: f64) -> Result<()> {
        if self.state.is_some() {
            return Err(ClassifierError::AlreadyTrained);
        }
        if delta.is_nan() || delta < 0.0 {
            return Err(ClassifierError::InvalidParameter(format!(
                "smoothing delta must be non-negative, got {}",
                delta
            )));
        }
        if features.nrows() == 0 {
            return Err(ClassifierError::InsufficientData(
                "cannot fit on an empty training set".to_string(),
            ));
        }
        if labels.len() != features.nrows() {
            return Err(ClassifierError::DimensionMismatch {
                expected: features.nrows(),
                found: labels.len(),
            });
        }
        if features.ncols() == 0 {
            return Err(ClassifierError::InsufficientData(
                "feature matrix has no columns (empty vocabulary)".to_string(),
            ));
        }
        check_feature_values(features.as_slice())?;
        let num_classes = count_classes(labels)?;

        let class_priors = estimate_class_priors(labels, num_classes);
        for (class, &prior) in class_priors.iter().enumerate() {
            if prior == 0.0 {
                log::warn!(
                    "Class {} has no training examples; it will never be predicted",
                    class
                );
            }
        }

        let conditional_probabilities =
            estimate_conditional_probabilities(features, labels, class_priors.len(), delta);
        let log_conditionals = conditional_probabilities
            .iter()
            .map(|probs| probs.mapv(|&p| p.ln()))
            .collect();

        log::info!(
            "Fitted Naive Bayes on {} examples: {} classes, {} features, delta={}",
            features.nrows(),
            class_priors.len(),
            features.ncols(),
            delta
        );

        self.delta = delta;
        self.state = Some(TrainedState {
            class_priors,
            conditional_probabilities,
            log_conditionals,
            vocab_size: features.ncols(),
        });
        Ok(())
    }

    fn trained(&self) -> Result<&TrainedState> {
        self.state.as_ref().ok_or(ClassifierError::UntrainedModel)
    }

    pub fn is_trained(&self) -> bool {
        self.state.is_some()
    }

    /// Feature width seen at training time.
    pub fn vocab_size(&self) -> Option<usize> {
        self.state.as_ref().map(|s| s.vocab_size)
    }

    /// Number of classes, 0 while untrained.
    pub fn num_classes(&self) -> usize {
        self.state.as_ref().map_or(0, |s| s.class_priors.len())
    }

    pub fn class_priors(&self) -> Result<&Array1<f64>> {
        Ok(&self.trained()?.class_priors)
    }

    /// Per-class word distributions, indexed by class.
    pub fn conditional_probabilities(&self) -> Result<&[Array1<f64>]> {
        Ok(&self.trained()?.conditional_probabilities)
    }

    /// Log-posterior (up to the shared evidence term) of every class.
    pub fn posteriors(&self, feature: &Array1<f64>) -> Result<Array1<f64>> {
        let state = self.trained()?;
        if feature.len() != state.vocab_size {
            return Err(ClassifierError::DimensionMismatch {
                expected: state.vocab_size,
                found: feature.len(),
            });
        }
        check_feature_values(feature.as_slice())?;

        let log_posteriors = state
            .class_priors
            .iter()
            .zip(state.log_conditionals.iter())
            .map(|(&prior, log_cond)| {
                if prior == 0.0 {
                    return f64::NEG_INFINITY;
                }
                // zero entries are skipped so that 0 * -inf never yields NaN
                let log_likelihood: f64 = feature
                    .iter()
                    .zip(log_cond.iter())
                    .filter(|&(&x, _)| x != 0.0)
                    .map(|(&x, &log_p)| x * log_p)
                    .sum();
                prior.ln() + log_likelihood
            })
            .collect();
        Ok(log_posteriors)
    }

    /// Log-posteriors used for prediction. When every class scores `-inf`
    /// (possible with `delta == 0`), the log-priors take their place so the
    /// decision falls back to the most frequent class.
    fn decision_scores(&self, feature: &Array1<f64>) -> Result<Array1<f64>> {
        let log_posteriors = self.posteriors(feature)?;
        if log_posteriors.iter().all(|&v| v == f64::NEG_INFINITY) {
            return Ok(self.trained()?.class_priors.mapv(|&p| p.ln()));
        }
        Ok(log_posteriors)
    }

    /// Class with the highest log-posterior. Ties go to the lowest class index.
    pub fn predict(&self, feature: &Array1<f64>) -> Result<usize> {
        Ok(self.predict_with_proba(feature)?.0)
    }

    /// Softmax of the log-posteriors; sums to 1.
    pub fn predict_proba(&self, feature: &Array1<f64>) -> Result<Array1<f64>> {
        Ok(self.decision_scores(feature)?.softmax())
    }

    /// Predicted class and class probabilities from a single scoring pass.
    pub fn predict_with_proba(&self, feature: &Array1<f64>) -> Result<(usize, Array1<f64>)> {
        let scores = self.decision_scores(feature)?;
        let label = scores
            .argmax()
            .ok_or_else(|| ClassifierError::InsufficientData("model has no classes".to_string()))?;
        Ok((label, scores.softmax()))
    }
}

impl ClassifierModel for NaiveBayes {
    fn fit(&mut self, x: &Array2<f64>, y: &[usize]) -> Result<()> {
        let delta = self.delta;
        NaiveBayes::fit(self, x, y, delta)
    }

    fn predict(&self, x: &Array1<f64>) -> Result<usize> {
        NaiveBayes::predict(self, x)
    }

    fn predict_proba(&self, x: &Array1<f64>) -> Result<Array1<f64>> {
        NaiveBayes::predict_proba(self, x)
    }

    fn name(&self) -> &str {
        "multinomial_naive_bayes"
    }
}

fn check_feature_values(values: &[f64]) -> Result<()> {
    match values.iter().find(|v| !(v.is_finite() && **v >= 0.0)) {
        Some(bad) => Err(ClassifierError::InvalidParameter(format!(
            "feature values must be finite and non-negative, found {}",
            bad
        ))),
        None => Ok(()),
    }
}

/// `prior[c] = count(c) / n` over `c in 0..num_classes`.
fn estimate_class_priors(labels: &[usize], num_classes: usize) -> Array1<f64> {
    let mut counts = vec![0usize; num_classes];
    for &label in labels {
        counts[label] += 1;
    }
    let n = labels.len() as f64;
    counts.into_iter().map(|c| c as f64 / n).collect()
}

/// `P(w|c) = (count(c,w) + delta) / (Σ_w count(c,w) + delta * V)`, one class
/// per rayon task.
fn estimate_conditional_probabilities(
    features: &Array2<f64>,
    labels: &[usize],
    num_classes: usize,
    delta: f64,
) -> Vec<Array1<f64>> {
    let vocab_size = features.ncols();
    (0..num_classes)
        .into_par_iter()
        .map(|class| {
            let mut counts = Array1::<f64>::zeros(vocab_size);
            for (row, _) in labels
                .iter()
                .enumerate()
                .filter(|&(_, &label)| label == class)
            {
                for (word, &value) in features.row_slice(row).iter().enumerate() {
                    counts[word] += value;
                }
            }

            let denominator = counts.sum() + delta * vocab_size as f64;
            if denominator > 0.0 {
                counts.mapv(|&count| (count + delta) / denominator)
            } else {
                // nothing observed and no smoothing: uniform keeps the row a distribution
                Array1::from_elem(vocab_size, 1.0 / vocab_size as f64)
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn toy() -> (Array2<f64>, Vec<usize>) {
        // vocab: good, movie, bad
        let x = Array2::from_shape_vec((2, 3), vec![1.0, 1.0, 0.0, 0.0, 1.0, 1.0]).unwrap();
        (x, vec![1, 0])
    }

    #[test]
    fn priors_and_conditionals_are_distributions() {
        let (x, y) = toy();
        let mut nb = NaiveBayes::new();
        nb.fit(&x, &y, 1.0).unwrap();

        let priors = nb.class_priors().unwrap();
        assert_relative_eq!(priors[0], 0.5);
        assert_relative_eq!(priors[1], 0.5);

        for probs in nb.conditional_probabilities().unwrap() {
            assert_relative_eq!(probs.sum(), 1.0, epsilon = 1e-12);
            assert!(probs.iter().all(|&p| p > 0.0));
        }

        // class 1 saw good + movie: (1+1)/(2+3), bad unseen: 1/5
        let class1 = &nb.conditional_probabilities().unwrap()[1];
        assert_relative_eq!(class1[0], 0.4);
        assert_relative_eq!(class1[1], 0.4);
        assert_relative_eq!(class1[2], 0.2);
    }

    #[test]
    fn posteriors_follow_log_linear_rule() {
        let (x, y) = toy();
        let mut nb = NaiveBayes::new();
        nb.fit(&x, &y, 1.0).unwrap();

        let feature = Array1::from_vec(vec![2.0, 0.0, 1.0]);
        let post = nb.posteriors(&feature).unwrap();
        let expected_c1 = 0.5f64.ln() + 2.0 * 0.4f64.ln() + 0.2f64.ln();
        assert_relative_eq!(post[1], expected_c1, epsilon = 1e-12);
    }

    #[test]
    fn inference_before_fit_fails() {
        let nb = NaiveBayes::new();
        let feature = Array1::from_vec(vec![1.0]);
        assert_eq!(nb.predict(&feature), Err(ClassifierError::UntrainedModel));
        assert_eq!(nb.predict_proba(&feature), Err(ClassifierError::UntrainedModel));
        assert_eq!(nb.posteriors(&feature), Err(ClassifierError::UntrainedModel));
        assert!(nb.class_priors().is_err());
    }

    #[test]
    fn wrong_feature_width_fails() {
        let (x, y) = toy();
        let mut nb = NaiveBayes::new();
        nb.fit(&x, &y, 1.0).unwrap();
        let err = nb.predict(&Array1::from_vec(vec![1.0, 0.0])).unwrap_err();
        assert_eq!(
            err,
            ClassifierError::DimensionMismatch {
                expected: 3,
                found: 2
            }
        );
    }

    #[test]
    fn fit_validates_inputs() {
        let (x, y) = toy();

        let mut nb = NaiveBayes::new();
        assert!(matches!(
            nb.fit(&x, &y, -0.5),
            Err(ClassifierError::InvalidParameter(_))
        ));
        assert!(matches!(
            nb.fit(&x, &y, f64::NAN),
            Err(ClassifierError::InvalidParameter(_))
        ));

        let empty = Array2::from_shape_vec((0, 3), vec![]).unwrap();
        assert!(matches!(
            nb.fit(&empty, &[], 1.0),
            Err(ClassifierError::InsufficientData(_))
        ));

        assert!(matches!(
            nb.fit(&x, &[1], 1.0),
            Err(ClassifierError::DimensionMismatch { .. })
        ));
        assert!(!nb.is_trained());

        nb.fit(&x, &y, 1.0).unwrap();
        assert_eq!(nb.fit(&x, &y, 1.0), Err(ClassifierError::AlreadyTrained));
    }

    #[test]
    fn zero_count_class_is_never_predicted() {
        // labels 0 and 2, class 1 has no examples
        let x = Array2::from_shape_vec((2, 2), vec![1.0, 0.0, 0.0, 1.0]).unwrap();
        let mut nb = NaiveBayes::new();
        nb.fit(&x, &[0, 2], 1.0).unwrap();

        assert_eq!(nb.num_classes(), 3);
        assert_eq!(nb.class_priors().unwrap()[1], 0.0);

        let feature = Array1::from_vec(vec![1.0, 1.0]);
        let post = nb.posteriors(&feature).unwrap();
        assert_eq!(post[1], f64::NEG_INFINITY);

        let proba = nb.predict_proba(&feature).unwrap();
        assert_eq!(proba[1], 0.0);
        assert_relative_eq!(proba.sum(), 1.0, epsilon = 1e-12);
        assert_ne!(nb.predict(&feature).unwrap(), 1);
    }

    #[test]
    fn zero_delta_does_not_produce_nan() {
        let (x, y) = toy();
        let mut nb = NaiveBayes::new();
        nb.fit(&x, &y, 0.0).unwrap();

        // "good" never appears under class 0, so P(good|0) == 0
        assert_eq!(nb.conditional_probabilities().unwrap()[0][0], 0.0);

        let post = nb.posteriors(&Array1::from_vec(vec![0.0, 1.0, 0.0])).unwrap();
        assert!(post.iter().all(|v| !v.is_nan()));
        assert_eq!(nb.predict(&Array1::from_vec(vec![1.0, 0.0, 0.0])).unwrap(), 1);
    }

    #[test]
    fn model_is_shareable_across_threads() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<NaiveBayes>();
    }

    #[test]
    fn trait_fit_uses_configured_delta() {
        let (x, y) = toy();
        let mut nb = NaiveBayes::with_smoothing(0.5);
        ClassifierModel::fit(&mut nb, &x, &y).unwrap();
        assert_eq!(nb.smoothing(), 0.5);
        // class 1: (1 + 0.5) / (2 + 1.5)
        assert_relative_eq!(
            nb.conditional_probabilities().unwrap()[1][0],
            1.5 / 3.5,
            epsilon = 1e-12
        );
        assert_eq!(nb.name(), "multinomial_naive_bayes");
    }

    #[test]
    fn oversized_labels_are_rejected_without_panicking() {
        let x = Array2::from_shape_vec((1, 1), vec![1.0]).unwrap();
        let mut nb = NaiveBayes::new();
        assert!(matches!(
            nb.fit(&x, &[usize::MAX], 1.0),
            Err(ClassifierError::InvalidParameter(_))
        ));
        assert!(matches!(
            nb.fit(&x, &[4_000_000_000], 1.0),
            Err(ClassifierError::InvalidParameter(_))
        ));
        assert!(!nb.is_trained());
    }

    #[test]
    fn all_classes_ruled_out_falls_back_to_priors() {
        // no smoothing, class 1 empty; a vector holding both words is
        // impossible under class 0 and class 2 alike
        let x = Array2::from_shape_vec((3, 2), vec![1.0, 0.0, 0.0, 1.0, 0.0, 1.0]).unwrap();
        let mut nb = NaiveBayes::new();
        nb.fit(&x, &[0, 2, 2], 0.0).unwrap();

        let feature = Array1::from_vec(vec![1.0, 1.0]);
        let post = nb.posteriors(&feature).unwrap();
        assert!(post.iter().all(|&v| v == f64::NEG_INFINITY));

        let proba = nb.predict_proba(&feature).unwrap();
        assert_eq!(proba[1], 0.0);
        assert_relative_eq!(proba[0], 1.0 / 3.0, epsilon = 1e-12);
        assert_relative_eq!(proba[2], 2.0 / 3.0, epsilon = 1e-12);
        assert_eq!(nb.predict(&feature).unwrap(), 2);

        let (label, joint) = nb.predict_with_proba(&feature).unwrap();
        assert_eq!(label, 2);
        assert_eq!(joint, proba);
    }
}
