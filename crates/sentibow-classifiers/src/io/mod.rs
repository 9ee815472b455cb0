pub mod predictions;
pub mod sentiment_tsv;

pub use predictions::write_predictions;
pub use sentiment_tsv::{
    read_sentiment_examples, read_sentiment_examples_from_reader, read_texts, ReadSummary,
};
