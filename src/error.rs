//! Error types for spam-predictor

use thiserror::Error;

/// Result type alias for library operations
pub type Result<T> = std::result::Result<T, SpamError>;

/// Errors raised while loading data, training or querying the model
#[derive(Error, Debug)]
pub enum SpamError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The CSV source could not be read
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// A data row did not carry exactly a category and a message
    #[error("malformed row at line {line}: expected 2 fields, found {fields}")]
    MalformedRow { line: u64, fields: usize },

    /// Split ratio outside of `[0, 1)`
    #[error("invalid test ratio {0}, expected a value in [0, 1)")]
    InvalidTestRatio(f64),

    /// Nothing left to train on after the split
    #[error("training partition is empty")]
    EmptyTrainingSet,

    /// The training text produced no tokens at all
    #[error("empty vocabulary: training text contains no tokens")]
    EmptyVocabulary,

    /// Feature matrix could not be shaped
    #[error("feature matrix error: {0}")]
    Shape(#[from] ndarray::ShapeError),

    /// Classifier fitting failed
    #[error("training failed: {0}")]
    Training(#[from] linfa_bayes::NaiveBayesError),

    /// Snapshot could not be written
    #[error("failed to encode model snapshot: {0}")]
    SnapshotEncode(#[from] rmp_serde::encode::Error),

    /// Snapshot could not be read back
    #[error("failed to decode model snapshot: {0}")]
    SnapshotDecode(#[from] rmp_serde::decode::Error),

    /// Configuration error
    #[error("configuration error: {0}")]
    Config(String),
}
