//! sentibow-classifiers: bag-of-words sentiment classification.
//!
//! Raw labeled lines are read and tokenized (`io`, `preprocessing`), turned
//! into a first-occurrence vocabulary (`vocab`) and bag-of-words vectors, and
//! used to fit a multinomial Naive Bayes model with Laplace smoothing
//! (`models`). `pipeline` bundles these steps for raw text and `stats`
//! scores predictions against held-out labels.
pub mod config;
pub mod data_handling;
pub mod error;
pub mod io;
pub mod math;
pub mod models;
pub mod pipeline;
pub mod preprocessing;
pub mod stats;
pub mod vocab;

pub use data_handling::Example;
pub use error::ClassifierError;
pub use models::NaiveBayes;
pub use pipeline::SentimentPipeline;
pub use preprocessing::vectorize;
pub use vocab::{build_vocab, Vocabulary};
