//! Data structures for labeled text and their vectorized form.
//!
//! `Example` is one parsed line of input; `Dataset` is the feature matrix and
//! label vector handed to an estimator. Also contains the holdout split used
//! when no separate evaluation file is available.
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use crate::error::{ClassifierError, Result};
use crate::math::{Array1, Array2};

/// Class labels must be strictly below this bound.
pub const MAX_CLASSES: usize = 1024;

/// Number of classes implied by `labels`, `max(label) + 1`, or 0 for no labels.
///
/// # Errors
///
/// `InvalidParameter` when a label is `>= MAX_CLASSES`.
pub fn count_classes(labels: &[usize]) -> Result<usize> {
    match labels.iter().max() {
        None => Ok(0),
        Some(&max) if max < MAX_CLASSES => Ok(max + 1),
        Some(&max) => Err(ClassifierError::InvalidParameter(format!(
            "class label {} is out of range, labels must be below {}",
            max, MAX_CLASSES
        ))),
    }
}

/// A tokenized sentence and its class label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Example {
    pub words: Vec<String>,
    pub label: usize,
}

impl Example {
    pub fn new(words: Vec<String>, label: usize) -> Self {
        Example { words, label }
    }
}

#[derive(Debug, Clone)]
pub struct Dataset {
    pub x: Array2<f64>,
    pub y: Array1<usize>,
}

impl Dataset {
    pub fn new(x: Array2<f64>, y: Array1<usize>) -> Result<Self> {
        if x.nrows() != y.len() {
            return Err(ClassifierError::DimensionMismatch {
                expected: x.nrows(),
                found: y.len(),
            });
        }
        count_classes(y.as_slice())?;
        Ok(Dataset { x, y })
    }

    pub fn n_samples(&self) -> usize {
        self.x.nrows()
    }

    pub fn n_features(&self) -> usize {
        self.x.ncols()
    }

    /// Number of classes implied by the label range, `max(label) + 1`.
    pub fn num_classes(&self) -> usize {
        self.y.iter().max().map_or(0, |&max| max.saturating_add(1))
    }

    /// Example count per class index, including empty classes inside the range.
    pub fn class_counts(&self) -> Vec<usize> {
        let mut counts = vec![0usize; self.num_classes()];
        for &label in self.y.iter() {
            counts[label] += 1;
        }
        counts
    }

    pub fn log_input_data_summary(&self) {
        log::info!("----- Input Data Summary -----");
        log::info!("{} examples, {} vocabulary features", self.n_samples(), self.n_features());
        for (class, count) in self.class_counts().iter().enumerate() {
            log::info!("class {}: {} examples", class, count);
        }
        log::info!("-------------------------------");
    }
}

/// Shuffle `examples` with a seeded RNG and split them into a training part
/// holding `fraction` of the rows and a held-out remainder.
pub fn train_test_split(
    examples: &[Example],
    fraction: f32,
    seed: u64,
) -> Result<(Vec<Example>, Vec<Example>)> {
    if !(fraction > 0.0 && fraction < 1.0) {
        return Err(ClassifierError::InvalidParameter(format!(
            "train fraction must lie strictly between 0 and 1, got {}",
            fraction
        )));
    }

    let mut rng = StdRng::seed_from_u64(seed);
    let mut indices: Vec<usize> = (0..examples.len()).collect();
    indices.shuffle(&mut rng);

    let n_train = (examples.len() as f32 * fraction).round() as usize;
    let (train_idx, test_idx) = indices.split_at(n_train.min(examples.len()));

    let pick = |idx: &[usize]| idx.iter().map(|&i| examples[i].clone()).collect::<Vec<_>>();
    Ok((pick(train_idx), pick(test_idx)))
}
