use thiserror::Error;

use crate::math::ShapeError;

/// Failures raised by the estimator and the dataset helpers.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ClassifierError {
    #[error("model has not been trained; call fit before inference")]
    UntrainedModel,

    #[error("model is already trained; fit can only be called once")]
    AlreadyTrained,

    #[error("dimension mismatch: expected {expected}, found {found}")]
    DimensionMismatch { expected: usize, found: usize },

    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("insufficient data: {0}")]
    InsufficientData(String),

    #[error(transparent)]
    Shape(#[from] ShapeError),
}

pub type Result<T> = std::result::Result<T, ClassifierError>;
