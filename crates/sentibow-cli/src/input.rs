use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::ArgMatches;
use serde::{Deserialize, Serialize};

use sentibow_classifiers::config::{ModelConfig, VectorizerMode};

use crate::util::validate_text_file;

/// Settings for the `evaluate` and `predict` subcommands.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassifyConfig {
    /// Labeled `<text>\t<label>` training file.
    pub train_data: String,
    /// Labeled evaluation file. When absent a holdout split of `train_data` is used.
    pub test_data: Option<String>,
    /// Unlabeled texts to classify, one per line.
    pub input_data: Option<String>,
    /// Prediction output (TSV); stdout when absent.
    pub output_file: Option<String>,
    pub model: ModelConfig,
    pub train_fraction: f32,
    pub seed: u64,
}

impl Default for ClassifyConfig {
    fn default() -> Self {
        ClassifyConfig {
            train_data: String::new(),
            test_data: None,
            input_data: None,
            output_file: None,
            model: ModelConfig::default(),
            train_fraction: 0.8,
            seed: 42,
        }
    }
}

fn opt_string(matches: &ArgMatches, id: &str) -> Option<String> {
    matches.try_get_one::<String>(id).ok().flatten().cloned()
}

impl ClassifyConfig {
    pub fn from_json_file(config_path: &PathBuf) -> Result<Self> {
        let config_json = fs::read_to_string(config_path)
            .with_context(|| format!("Failed to read config file: {:?}", config_path))?;
        serde_json::from_str(&config_json)
            .with_context(|| format!("Failed to parse config file: {:?}", config_path))
    }

    /// Load the JSON config (or defaults) and apply command line overrides.
    pub fn from_arguments(config_path: Option<&PathBuf>, matches: &ArgMatches) -> Result<Self> {
        let mut config = match config_path {
            Some(path) => Self::from_json_file(path)?,
            None => ClassifyConfig::default(),
        };

        if let Some(train_data) = opt_string(matches, "train_data") {
            config.train_data = train_data;
        }
        if let Some(test_data) = opt_string(matches, "test_data") {
            config.test_data = Some(test_data);
        }
        if let Some(input_data) = opt_string(matches, "input_data") {
            config.input_data = Some(input_data);
        }
        if let Some(output_file) = opt_string(matches, "output_file") {
            config.output_file = Some(output_file);
        }
        if let Some(mode) = opt_string(matches, "vectorizer") {
            config.model.vectorizer = mode
                .parse::<VectorizerMode>()
                .map_err(anyhow::Error::msg)?;
        }
        if let Ok(Some(&delta)) = matches.try_get_one::<f64>("delta") {
            config.model.delta = delta;
        }

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.train_data.is_empty() {
            anyhow::bail!("No training data given; pass --train_data or set train_data in the config");
        }
        validate_text_file(&self.train_data)?;
        if let Some(test_data) = &self.test_data {
            validate_text_file(test_data)?;
        }
        if let Some(input_data) = &self.input_data {
            validate_text_file(input_data)?;
        }
        Ok(())
    }
}
