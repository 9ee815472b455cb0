//! Tokenization and bag-of-words vectorization.
//!
//! Tokens are produced by whitespace splitting with optional lowercasing;
//! anything finer (punctuation stripping, stemming) is left to the caller.
//! Vectorization maps a token sequence onto the feature layout of a
//! `Vocabulary` and silently drops out-of-vocabulary tokens.
use crate::config::{TokenizerConfig, VectorizerMode};
use crate::data_handling::{Dataset, Example};
use crate::error::Result;
use crate::math::{Array1, Array2};
use crate::vocab::Vocabulary;

/// Split `text` on whitespace.
pub fn tokenize(text: &str, config: &TokenizerConfig) -> Vec<String> {
    text.split_whitespace()
        .map(|token| {
            if config.lowercase {
                token.to_lowercase()
            } else {
                token.to_string()
            }
        })
        .collect()
}

/// Bag-of-words vector of length `vocab.len()`.
///
/// In binary mode a present word is set to 1 however often it repeats; in
/// count mode each occurrence adds 1. Tokens missing from `vocab` are skipped.
pub fn vectorize<S: AsRef<str>>(tokens: &[S], vocab: &Vocabulary, binary: bool) -> Array1<f64> {
    let mut bow = Array1::<f64>::zeros(vocab.len());
    for token in tokens {
        if let Some(idx) = vocab.get(token.as_ref()) {
            if binary {
                bow[idx] = 1.0;
            } else {
                bow[idx] += 1.0;
            }
        }
    }
    bow
}

/// Vectorize every example and stack the results into a `Dataset`.
pub fn vectorize_examples(
    examples: &[Example],
    vocab: &Vocabulary,
    mode: VectorizerMode,
) -> Result<Dataset> {
    let rows = examples
        .iter()
        .map(|e| vectorize(&e.words, vocab, mode.is_binary()))
        .collect::<Vec<_>>();
    let x = Array2::from_rows(rows, vocab.len())?;
    let y = examples.iter().map(|e| e.label).collect::<Array1<usize>>();
    Dataset::new(x, y)
}
