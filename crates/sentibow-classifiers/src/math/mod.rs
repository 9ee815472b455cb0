//! Small dense containers used for feature vectors and feature matrices.
//!
//! `Array1` holds a single bag-of-words vector (or a per-class table row) and
//! `Array2` holds a row-major batch of vectors, one row per example.
pub mod matrix;
pub mod vector;

pub use matrix::{Array2, ShapeError};
pub use vector::Array1;
