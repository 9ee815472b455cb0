use std::fs::File;
use std::io::BufWriter;

use anyhow::{Context, Result};

use sentibow_classifiers::data_handling::{train_test_split, Example};
use sentibow_classifiers::io::{read_sentiment_examples, read_texts, write_predictions};
use sentibow_classifiers::pipeline::Prediction;
use sentibow_classifiers::stats::ClassificationReport;
use sentibow_classifiers::SentimentPipeline;

use crate::input::ClassifyConfig;

fn train_pipeline(config: &ClassifyConfig, examples: &[Example]) -> Result<SentimentPipeline> {
    let mut pipeline = SentimentPipeline::new(config.model.clone());
    pipeline
        .fit(examples)
        .context("Failed to train the classifier")?;
    log::info!(
        "Trained on {} examples with a vocabulary of {} words ({} vectors, delta={})",
        examples.len(),
        pipeline.vocabulary().len(),
        config.model.vectorizer,
        config.model.delta
    );
    Ok(pipeline)
}

/// Train on `train_data` and score on `test_data`, or on a holdout split when
/// no test file is configured.
pub fn run_evaluation(config: &ClassifyConfig) -> Result<ClassificationReport> {
    let examples = read_sentiment_examples(&config.train_data, &config.model.tokenizer)?;

    let (train, test) = match &config.test_data {
        Some(path) => {
            let test = read_sentiment_examples(path, &config.model.tokenizer)?;
            (examples, test)
        }
        None => {
            log::info!(
                "No test data given; holding out {:.0}% of the training data (seed {})",
                (1.0 - config.train_fraction) * 100.0,
                config.seed
            );
            train_test_split(&examples, config.train_fraction, config.seed)?
        }
    };

    let pipeline = train_pipeline(config, &train)?;
    let report = pipeline
        .evaluate(&test)
        .context("Failed to evaluate the classifier")?;
    Ok(report)
}

/// Train on `train_data` and classify every line of `input_data`.
pub fn run_prediction(config: &ClassifyConfig) -> Result<Vec<Prediction>> {
    let input = config
        .input_data
        .as_ref()
        .context("No input file given; pass --input or set input_data in the config")?;

    let examples = read_sentiment_examples(&config.train_data, &config.model.tokenizer)?;
    let pipeline = train_pipeline(config, &examples)?;

    let texts = read_texts(input)?;
    let predictions = texts
        .iter()
        .map(|text| pipeline.classify(text))
        .collect::<Result<Vec<_>, _>>()?;
    log::info!("Classified {} texts from {}", predictions.len(), input);
    Ok(predictions)
}

pub fn write_prediction_output(predictions: &[Prediction], output_file: Option<&str>) -> Result<()> {
    match output_file {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create output file: {}", path))?;
            write_predictions(BufWriter::new(file), predictions)
        }
        None => write_predictions(std::io::stdout().lock(), predictions),
    }
}
