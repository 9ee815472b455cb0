//! Word → feature index mapping.
//!
//! Indices follow first-occurrence order over the training examples, so the
//! same corpus in the same order always produces the same feature layout.
use std::collections::HashMap;

use crate::data_handling::Example;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Vocabulary {
    index: HashMap<String, usize>,
    words: Vec<String>,
}

impl Vocabulary {
    /// Builds a vocabulary from an ordered sequence of words. Repeated words
    /// keep the index of their first occurrence.
    pub fn from_words<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut vocab = Vocabulary::default();
        for word in words {
            vocab.insert(word.as_ref());
        }
        vocab
    }

    fn insert(&mut self, word: &str) {
        if !self.index.contains_key(word) {
            self.index.insert(word.to_string(), self.words.len());
            self.words.push(word.to_string());
        }
    }

    pub fn get(&self, word: &str) -> Option<usize> {
        self.index.get(word).copied()
    }

    pub fn contains(&self, word: &str) -> bool {
        self.index.contains_key(word)
    }

    /// Word stored at feature position `idx`.
    pub fn word(&self, idx: usize) -> Option<&str> {
        self.words.get(idx).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// `(word, index)` pairs in index order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> {
        self.words.iter().enumerate().map(|(idx, w)| (w.as_str(), idx))
    }
}

/// Assign every distinct word in `examples` the next free index, scanning
/// examples and their words in order.
pub fn build_vocab(examples: &[Example]) -> Vocabulary {
    let vocab = Vocabulary::from_words(examples.iter().flat_map(|e| e.words.iter()));
    log::debug!(
        "Built vocabulary of {} words from {} examples",
        vocab.len(),
        examples.len()
    );
    vocab
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ex(words: &[&str], label: usize) -> Example {
        Example::new(words.iter().map(|w| w.to_string()).collect(), label)
    }

    #[test]
    fn indices_follow_first_occurrence() {
        let examples = vec![ex(&["good", "movie"], 1), ex(&["bad", "movie", "good"], 0)];
        let vocab = build_vocab(&examples);

        assert_eq!(vocab.len(), 3);
        assert_eq!(vocab.get("good"), Some(0));
        assert_eq!(vocab.get("movie"), Some(1));
        assert_eq!(vocab.get("bad"), Some(2));
        assert_eq!(vocab.word(2), Some("bad"));
        assert_eq!(vocab.get("awful"), None);
    }

    #[test]
    fn no_case_folding() {
        let vocab = build_vocab(&[ex(&["Good", "good", "good!"], 1)]);
        assert_eq!(vocab.len(), 3);
    }

    #[test]
    fn iter_is_in_index_order() {
        let vocab = Vocabulary::from_words(["b", "a", "b", "c"]);
        let pairs: Vec<_> = vocab.iter().collect();
        assert_eq!(pairs, vec![("b", 0), ("a", 1), ("c", 2)]);
    }

    #[test]
    fn empty_corpus_gives_empty_vocab() {
        let vocab = build_vocab(&[]);
        assert!(vocab.is_empty());
    }
}
