//! Bag-of-words token counting over a vocabulary fixed at fit time.

use ndarray::Array2;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::sync::LazyLock;

use crate::error::{Result, SpamError};

/// Words of at least two word characters.
static TOKEN_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b\w\w+\b").expect("token pattern is valid")
});

/// Splits text into lower-cased word tokens, in order of appearance.
pub fn tokenize(text: &str) -> Vec<String> {
    let text = text.to_lowercase();
    TOKEN_PATTERN
        .find_iter(&text)
        .map(|m| m.as_str().to_string())
        .collect()
}

/// Maps vocabulary tokens to column positions and counts them per document.
///
/// Column positions follow sorted token order, so two vectorizers fitted on
/// the same text always agree.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CountVectorizer {
    vocab: BTreeMap<String, usize>,
}

impl CountVectorizer {
    /// Builds the vocabulary from the given documents.
    pub fn fit<S: AsRef<str>>(docs: &[S]) -> Result<Self> {
        let tokens: BTreeSet<String> = docs
            .iter()
            .flat_map(|d| tokenize(d.as_ref()))
            .collect();

        if tokens.is_empty() {
            return Err(SpamError::EmptyVocabulary);
        }

        let vocab = tokens
            .into_iter()
            .enumerate()
            .map(|(idx, token)| (token, idx))
            .collect();

        Ok(CountVectorizer { vocab })
    }

    /// Fits the vocabulary and returns the count matrix of the same documents.
    pub fn fit_transform<S: AsRef<str>>(docs: &[S]) -> Result<(Self, Array2<f64>)> {
        let vectorizer = Self::fit(docs)?;
        let counts = vectorizer.transform(docs);
        Ok((vectorizer, counts))
    }

    /// One row of token counts per document. Tokens outside the vocabulary
    /// are dropped.
    pub fn transform<S: AsRef<str>>(&self, docs: &[S]) -> Array2<f64> {
        let mut counts = Array2::zeros((docs.len(), self.vocab.len()));

        for (row, doc) in docs.iter().enumerate() {
            for token in tokenize(doc.as_ref()) {
                if let Some(&col) = self.vocab.get(&token) {
                    counts[[row, col]] += 1.0;
                }
            }
        }

        counts
    }

    pub fn vocabulary_len(&self) -> usize {
        self.vocab.len()
    }

    pub fn index_of(&self, token: &str) -> Option<usize> {
        self.vocab.get(token).copied()
    }
}
