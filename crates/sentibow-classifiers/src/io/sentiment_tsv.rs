//! Reader for labeled sentiment files: one `<text>\t<label>` pair per line.
//!
//! Blank lines are ignored and blank fields at either end of a line are
//! dropped. Lines with the wrong number of fields, a label that is not a
//! non-negative integer below `MAX_CLASSES`, or invalid UTF-8 are skipped with
//! a warning; only I/O failures abort the read.
use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;

use anyhow::{Context, Result};

use crate::config::TokenizerConfig;
use crate::data_handling::{Example, MAX_CLASSES};
use crate::preprocessing::tokenize;

/// Line counts from one read, for logging and tests.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReadSummary {
    pub parsed: usize,
    pub skipped: usize,
}

/// Read and tokenize the labeled examples in `path`.
pub fn read_sentiment_examples<P: AsRef<Path>>(
    path: P,
    tokenizer: &TokenizerConfig,
) -> Result<Vec<Example>> {
    let file = File::open(&path)
        .with_context(|| format!("Failed to open sentiment file: {}", path.as_ref().display()))?;
    let (examples, summary) = read_sentiment_examples_from_reader(file, tokenizer)
        .with_context(|| format!("Failed to read sentiment file: {}", path.as_ref().display()))?;
    log::info!(
        "Read {} examples from {} ({} lines skipped)",
        summary.parsed,
        path.as_ref().display(),
        summary.skipped
    );
    Ok(examples)
}

pub fn read_sentiment_examples_from_reader<R: Read>(
    reader: R,
    tokenizer: &TokenizerConfig,
) -> Result<(Vec<Example>, ReadSummary)> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(b'\t')
        .has_headers(false)
        .flexible(true)
        .quoting(false)
        .from_reader(reader);

    let mut examples = Vec::new();
    let mut summary = ReadSummary::default();

    for result in reader.records() {
        let record = match result {
            Ok(record) => record,
            Err(err) if matches!(err.kind(), csv::ErrorKind::Utf8 { .. }) => {
                log::warn!("Skipping line with invalid UTF-8: {}", err);
                summary.skipped += 1;
                continue;
            }
            Err(err) => return Err(err).context("Failed to read record"),
        };
        let line = record.position().map_or(0, |pos| pos.line());

        // blank fields at either end are dropped, as if the line were trimmed
        let fields: Vec<&str> = record.iter().collect();
        let start = fields.iter().position(|field| !field.trim().is_empty());
        let end = fields.iter().rposition(|field| !field.trim().is_empty());
        let fields = match (start, end) {
            (Some(start), Some(end)) => &fields[start..=end],
            _ => continue,
        };

        if fields.len() != 2 {
            log::warn!(
                "Skipping malformed line {}: expected 2 tab-separated fields, found {}",
                line,
                fields.len()
            );
            summary.skipped += 1;
            continue;
        }

        let text = fields[0].trim();
        let label = match fields[1].trim().parse::<usize>() {
            Ok(label) if label < MAX_CLASSES => label,
            Ok(label) => {
                log::warn!(
                    "Skipping line {} with out-of-range label {} (must be below {})",
                    line,
                    label,
                    MAX_CLASSES
                );
                summary.skipped += 1;
                continue;
            }
            Err(_) => {
                log::warn!(
                    "Skipping line {} with invalid label '{}'",
                    line,
                    fields[1].trim()
                );
                summary.skipped += 1;
                continue;
            }
        };

        examples.push(Example::new(tokenize(text, tokenizer), label));
        summary.parsed += 1;
    }

    Ok((examples, summary))
}

/// Non-empty lines of `path`, trimmed. Used for unlabeled prediction input.
pub fn read_texts<P: AsRef<Path>>(path: P) -> Result<Vec<String>> {
    let file = File::open(&path)
        .with_context(|| format!("Failed to open input file: {}", path.as_ref().display()))?;
    let mut texts = Vec::new();
    for (idx, line) in BufReader::new(file).lines().enumerate() {
        let line = line.with_context(|| format!("Failed to read line {}", idx + 1))?;
        let trimmed = line.trim();
        if !trimmed.is_empty() {
            texts.push(trimmed.to_string());
        }
    }
    Ok(texts)
}
