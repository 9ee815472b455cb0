use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// How token occurrences are written into a bag-of-words vector.
#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum VectorizerMode {
    /// Presence only: every in-vocabulary token contributes 1.
    Binary,
    /// Frequency histogram.
    #[default]
    Count,
}

impl VectorizerMode {
    pub fn is_binary(self) -> bool {
        matches!(self, VectorizerMode::Binary)
    }
}

impl FromStr for VectorizerMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "binary" => Ok(VectorizerMode::Binary),
            "count" | "full" | "frequency" => Ok(VectorizerMode::Count),
            _ => Err(format!(
                "Unknown vectorizer mode: {}. Expected one of: binary, count",
                s
            )),
        }
    }
}

impl fmt::Display for VectorizerMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VectorizerMode::Binary => write!(f, "binary"),
            VectorizerMode::Count => write!(f, "count"),
        }
    }
}

/// Text normalisation applied before vocabulary lookup.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct TokenizerConfig {
    pub lowercase: bool,
}

impl Default for TokenizerConfig {
    fn default() -> Self {
        Self { lowercase: true }
    }
}

/// Central configuration for the sentiment pipeline.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct ModelConfig {
    /// Laplace smoothing constant, must be non-negative.
    pub delta: f64,
    pub vectorizer: VectorizerMode,
    pub tokenizer: TokenizerConfig,
}

impl ModelConfig {
    pub fn new(delta: f64, vectorizer: VectorizerMode) -> Self {
        Self {
            delta,
            vectorizer,
            tokenizer: TokenizerConfig::default(),
        }
    }
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            delta: 1.0,
            vectorizer: VectorizerMode::Count,
            tokenizer: TokenizerConfig::default(),
        }
    }
}
