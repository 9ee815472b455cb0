use crate::error::Result;
use crate::math::{Array1, Array2};

/// The contract evaluation and the pipeline rely on. Labels are class indices
/// in a contiguous range starting at 0.
pub trait ClassifierModel {
    /// Fit the model on a `[n_examples, n_features]` matrix.
    fn fit(&mut self, x: &Array2<f64>, y: &[usize]) -> Result<()>;

    /// Most likely class for a single feature vector.
    fn predict(&self, x: &Array1<f64>) -> Result<usize>;

    /// Probability distribution over classes for a single feature vector.
    fn predict_proba(&self, x: &Array1<f64>) -> Result<Array1<f64>>;

    fn predict_batch(&self, x: &Array2<f64>) -> Result<Vec<usize>> {
        (0..x.nrows()).map(|row| self.predict(&x.row(row))).collect()
    }

    /// Optional human readable name for the model
    fn name(&self) -> &str {
        "classifier"
    }
}
