//! Multinomial Naive Bayes spam model paired with its fitted vectorizer.

use linfa::prelude::*;
use linfa_bayes::MultinomialNb;
use ndarray::Array1;
use rmp_serde::{decode::from_read, encode::write_named};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;
use std::time::SystemTime;
use tracing::info;

use crate::dataset::{Corpus, DatasetSplit, LABEL_SPAM, Sample};
use crate::error::{Result, SpamError};
use crate::vectorizer::CountVectorizer;

/// Counts describing the data a model was fitted on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrainingSummary {
    pub observations: usize,
    pub spam: usize,
    pub ham: usize,
}

/// Trained spam classifier.
///
/// The classifier only ever sees features produced by the vectorizer it was
/// fitted with; both halves live and die together.
#[derive(Serialize, Deserialize)]
pub struct SpamModel {
    model: MultinomialNb<f64, usize>,
    vectorizer: CountVectorizer,
    summary: TrainingSummary,
}

impl SpamModel {
    /// Fits the vectorizer and the classifier on the given samples.
    pub fn fit(samples: &[Sample]) -> Result<Self> {
        if samples.is_empty() {
            return Err(SpamError::EmptyTrainingSet);
        }

        let texts: Vec<&str> = samples.iter().map(|s| s.text.as_str()).collect();
        let (vectorizer, x) = CountVectorizer::fit_transform(&texts)?;
        let y: Array1<usize> = samples.iter().map(|s| s.label).collect();

        let dataset = Dataset::new(x, y);
        let model = MultinomialNb::params().fit(&dataset)?;

        let spam = samples.iter().filter(|s| s.label == LABEL_SPAM).count();
        let summary = TrainingSummary {
            observations: samples.len(),
            spam,
            ham: samples.len() - spam,
        };

        Ok(SpamModel {
            model,
            vectorizer,
            summary,
        })
    }

    /// Splits the corpus and fits on the training partition.
    ///
    /// The held-out partition is handed back untouched; scoring it is left
    /// to the caller.
    pub fn train(corpus: &Corpus, test_ratio: f64, seed: Option<u64>) -> Result<(Self, DatasetSplit)> {
        let split = corpus.train_test_split(test_ratio, seed)?;
        let model = Self::fit(&split.train)?;
        info!(
            "fitted model on {} messages ({} spam, {} ham), vocabulary of {} tokens",
            model.summary.observations,
            model.summary.spam,
            model.summary.ham,
            model.vectorizer.vocabulary_len()
        );
        Ok((model, split))
    }

    /// Predicts a label per text: 1 for spam, 0 otherwise.
    pub fn predict<S: AsRef<str>>(&self, texts: &[S]) -> Array1<usize> {
        let x = self.vectorizer.transform(texts);
        self.model.predict(&x)
    }

    /// Share of samples whose predicted label matches their own.
    pub fn evaluate_on(&self, samples: &[Sample]) -> f64 {
        if samples.is_empty() {
            return 0.0;
        }

        let texts: Vec<&str> = samples.iter().map(|s| s.text.as_str()).collect();
        let predicted = self.predict(&texts);
        let correct = predicted
            .iter()
            .zip(samples)
            .filter(|(p, s)| **p == s.label)
            .count();

        correct as f64 / samples.len() as f64
    }

    /// Counts of the data the model was fitted on.
    pub fn summary(&self) -> TrainingSummary {
        self.summary
    }

    /// Number of tokens known to the paired vectorizer.
    pub fn vocabulary_len(&self) -> usize {
        self.vectorizer.vocabulary_len()
    }

    /// Load a snapshot if it is up-to-date, or retrain if the CSV is newer.
    pub fn load_or_train_if_stale(
        snapshot_path: &Path,
        csv_path: &Path,
        corpus: &Corpus,
        test_ratio: f64,
        seed: Option<u64>,
    ) -> Result<Self> {
        let snapshot_mtime = snapshot_path
            .metadata()
            .and_then(|m| m.modified())
            .unwrap_or(SystemTime::UNIX_EPOCH);

        let csv_mtime = csv_path
            .metadata()
            .and_then(|m| m.modified())
            .unwrap_or(SystemTime::UNIX_EPOCH);

        if snapshot_path.exists() && csv_mtime <= snapshot_mtime {
            info!("loading model snapshot from {:?} (up-to-date)", snapshot_path);
            return Self::load_from_file(snapshot_path);
        }

        info!("training model (data is newer or snapshot missing)");
        let (model, _) = Self::train(corpus, test_ratio, seed)?;
        info!("saving model snapshot to {:?}", snapshot_path);
        model.save_to_file(snapshot_path)?;
        Ok(model)
    }

    /// Saves the model to a binary `.msgpack` file.
    pub fn save_to_file(&self, path: &Path) -> Result<()> {
        let file = File::create(path)?;
        let mut writer = BufWriter::new(file);
        write_named(&mut writer, self)?;
        Ok(())
    }

    /// Loads the model from a binary `.msgpack` file.
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let file = File::open(path)?;
        let reader = BufReader::new(file);
        Ok(from_read(reader)?)
    }
}
