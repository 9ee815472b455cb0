pub mod classifier_trait;
pub mod naive_bayes;

pub use classifier_trait::ClassifierModel;
pub use naive_bayes::NaiveBayes;
