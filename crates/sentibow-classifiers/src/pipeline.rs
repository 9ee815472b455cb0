//! End-to-end text classifier: tokenizer settings, vocabulary, vectorizer mode
//! and a Naive Bayes model trained together on one set of examples.
use crate::config::ModelConfig;
use crate::data_handling::Example;
use crate::error::{ClassifierError, Result};
use crate::math::Array1;
use crate::models::NaiveBayes;
use crate::preprocessing::{tokenize, vectorize, vectorize_examples};
use crate::stats::{evaluate, ClassificationReport};
use crate::vocab::{build_vocab, Vocabulary};

/// Classification of a single raw text.
#[derive(Debug, Clone, PartialEq)]
pub struct Prediction {
    pub text: String,
    pub label: usize,
    pub probabilities: Array1<f64>,
}

#[derive(Debug, Clone)]
pub struct SentimentPipeline {
    config: ModelConfig,
    vocab: Vocabulary,
    model: NaiveBayes,
}

impl SentimentPipeline {
    pub fn new(config: ModelConfig) -> Self {
        let model = NaiveBayes::with_smoothing(config.delta);
        SentimentPipeline {
            config,
            vocab: Vocabulary::default(),
            model,
        }
    }

    pub fn config(&self) -> &ModelConfig {
        &self.config
    }

    pub fn vocabulary(&self) -> &Vocabulary {
        &self.vocab
    }

    pub fn model(&self) -> &NaiveBayes {
        &self.model
    }

    /// Build the vocabulary from `examples`, vectorize them and fit the model.
    pub fn fit(&mut self, examples: &[Example]) -> Result<()> {
        if self.model.is_trained() {
            return Err(ClassifierError::AlreadyTrained);
        }
        if examples.is_empty() {
            return Err(ClassifierError::InsufficientData(
                "no training examples".to_string(),
            ));
        }

        let vocab = build_vocab(examples);
        let dataset = vectorize_examples(examples, &vocab, self.config.vectorizer)?;
        dataset.log_input_data_summary();

        self.model
            .fit(&dataset.x, dataset.y.as_slice(), self.config.delta)?;
        self.vocab = vocab;
        Ok(())
    }

    /// Tokenize `text` with the configured tokenizer and vectorize it.
    pub fn vectorize_text(&self, text: &str) -> Array1<f64> {
        let tokens = tokenize(text, &self.config.tokenizer);
        vectorize(&tokens, &self.vocab, self.config.vectorizer.is_binary())
    }

    pub fn predict_text(&self, text: &str) -> Result<usize> {
        self.model.predict(&self.vectorize_text(text))
    }

    pub fn predict_proba_text(&self, text: &str) -> Result<Array1<f64>> {
        self.model.predict_proba(&self.vectorize_text(text))
    }

    pub fn classify(&self, text: &str) -> Result<Prediction> {
        let (label, probabilities) = self.model.predict_with_proba(&self.vectorize_text(text))?;
        Ok(Prediction {
            text: text.to_string(),
            label,
            probabilities,
        })
    }

    /// Score the model on already tokenized, labeled examples.
    pub fn evaluate(&self, examples: &[Example]) -> Result<ClassificationReport> {
        if !self.model.is_trained() {
            return Err(ClassifierError::UntrainedModel);
        }
        let dataset = vectorize_examples(examples, &self.vocab, self.config.vectorizer)?;
        evaluate(&self.model, &dataset)
    }
}
