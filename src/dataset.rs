//! Labeled message corpus loaded from a two-column `category,message` CSV.

use rand::rngs::StdRng;
use rand::seq::{IndexedRandom, SliceRandom};
use rand::{Rng, SeedableRng, rng};
use std::fs::File;
use std::io::Read;
use std::path::Path;
use std::str::FromStr;
use tracing::debug;

use crate::error::{Result, SpamError};

/// Label of a spam message.
pub const LABEL_SPAM: usize = 1;
/// Label of a legitimate ("ham") message.
pub const LABEL_HAM: usize = 0;

/// Held-out share used when none is configured.
pub const DEFAULT_TEST_RATIO: f64 = 0.25;

/// Maps a raw category to its binary label.
pub fn label_for(category: &str) -> usize {
    if category == "spam" { LABEL_SPAM } else { LABEL_HAM }
}

/// A single labeled message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sample {
    pub category: String,
    pub text: String,
    pub label: usize,
}

impl Sample {
    pub fn new(category: impl Into<String>, text: impl Into<String>) -> Self {
        let category = category.into();
        let label = label_for(&category);
        Sample {
            category,
            text: text.into(),
            label,
        }
    }

    pub fn is_spam(&self) -> bool {
        self.label == LABEL_SPAM
    }
}

/// Message class used when sampling from the corpus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageClass {
    Spam,
    Ham,
}

impl MessageClass {
    pub fn as_str(&self) -> &'static str {
        match self {
            MessageClass::Spam => "spam",
            MessageClass::Ham => "ham",
        }
    }
}

impl FromStr for MessageClass {
    type Err = ();

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "spam" => Ok(MessageClass::Spam),
            "ham" => Ok(MessageClass::Ham),
            _ => Err(()),
        }
    }
}

/// A helper type for holding train/test splits.
#[derive(Debug, Clone)]
pub struct DatasetSplit {
    pub train: Vec<Sample>,
    pub test: Vec<Sample>,
}

/// The full set of labeled messages, read once and never modified.
#[derive(Debug, Clone, Default)]
pub struct Corpus {
    samples: Vec<Sample>,
}

impl Corpus {
    pub fn new(samples: Vec<Sample>) -> Self {
        Corpus { samples }
    }

    /// Loads the corpus from a CSV file on disk.
    pub fn from_csv(path: &Path) -> Result<Self> {
        let file = File::open(path)?;
        let corpus = Self::from_reader(file)?;
        debug!("loaded {} rows from {:?}", corpus.len(), path);
        Ok(corpus)
    }

    /// Reads `category,message` rows, dropping the first (header) row.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let mut rdr = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_reader(reader);

        let mut samples = vec![];
        for (i, result) in rdr.records().enumerate() {
            let record = result?;
            if i == 0 {
                continue;
            }
            if record.len() != 2 {
                return Err(SpamError::MalformedRow {
                    line: record.position().map(|p| p.line()).unwrap_or_default(),
                    fields: record.len(),
                });
            }
            samples.push(Sample::new(&record[0], &record[1]));
        }

        Ok(Corpus { samples })
    }

    /// Number of samples, header excluded.
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// True when no sample was loaded.
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// All samples in file order.
    pub fn samples(&self) -> &[Sample] {
        &self.samples
    }

    /// Binary label of every sample, in file order.
    pub fn labels(&self) -> Vec<usize> {
        self.samples.iter().map(|s| s.label).collect()
    }

    /// Samples labeled spam.
    pub fn spam(&self) -> impl Iterator<Item = &Sample> {
        self.samples.iter().filter(|s| s.is_spam())
    }

    /// Samples not labeled spam.
    pub fn ham(&self) -> impl Iterator<Item = &Sample> {
        self.samples.iter().filter(|s| !s.is_spam())
    }

    /// Picks a random message text of the given class, if the corpus has any.
    pub fn random_message<R: Rng + ?Sized>(&self, class: MessageClass, rng: &mut R) -> Option<&str> {
        let pool: Vec<&Sample> = match class {
            MessageClass::Spam => self.spam().collect(),
            MessageClass::Ham => self.ham().collect(),
        };
        pool.choose(rng).copied().map(|s| s.text.as_str())
    }

    /// Randomly splits the corpus into train and held-out partitions.
    ///
    /// The held-out partition gets `ceil(len * test_ratio)` samples. With a
    /// seed the shuffle is reproducible; without one it uses the thread RNG.
    pub fn train_test_split(&self, test_ratio: f64, seed: Option<u64>) -> Result<DatasetSplit> {
        if !(0.0..1.0).contains(&test_ratio) {
            return Err(SpamError::InvalidTestRatio(test_ratio));
        }

        let mut data = self.samples.clone();
        match seed {
            Some(seed) => data.shuffle(&mut StdRng::seed_from_u64(seed)),
            None => data.shuffle(&mut rng()),
        }

        let test_size = ((data.len() as f64) * test_ratio).ceil() as usize;
        let train = data.split_off(test_size);

        Ok(DatasetSplit { train, test: data })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CSV: &str = "Category,Message\n\
        ham,\"Go until jurong point, crazy..\"\n\
        ham,Ok lar... Joking wif u oni...\n\
        spam,Free entry in 2 a wkly comp to win FA Cup final tkts\n\
        ham,U dun say so early hor... U c already then say...\n\
        spam,WINNER!! You have been selected to receive a prize reward!\n";

    #[test]
    fn test_label_mapping() {
        assert_eq!(label_for("spam"), 1);
        assert_eq!(label_for("ham"), 0);
        assert_eq!(label_for("Spam"), 0);
        assert_eq!(label_for(""), 0);
    }

    #[test]
    fn test_header_row_is_dropped() {
        let corpus = Corpus::from_reader("Category,Message\nspam,X\nham,Y\n".as_bytes()).unwrap();
        assert_eq!(corpus.len(), 2);
        assert_eq!(corpus.labels(), vec![1, 0]);
        assert_eq!(corpus.samples()[0].text, "X");
    }

    #[test]
    fn test_quoted_commas_survive() {
        let corpus = Corpus::from_reader(CSV.as_bytes()).unwrap();
        assert_eq!(corpus.len(), 5);
        assert_eq!(corpus.samples()[0].text, "Go until jurong point, crazy..");
        assert_eq!(corpus.spam().count(), 2);
        assert_eq!(corpus.ham().count(), 3);
    }

    #[test]
    fn test_unreadable_header_row_is_an_error() {
        let err = Corpus::from_reader(&b"\xff\xfe,Message\nspam,X\n"[..]).unwrap_err();
        assert!(matches!(err, SpamError::Csv(_)));
    }

    #[test]
    fn test_empty_source_yields_empty_corpus() {
        let corpus = Corpus::from_reader("".as_bytes()).unwrap();
        assert!(corpus.is_empty());
    }

    #[test]
    fn test_malformed_row_is_rejected() {
        let err = Corpus::from_reader("Category,Message\nspam,X\nham\n".as_bytes()).unwrap_err();
        assert!(matches!(err, SpamError::MalformedRow { line: 3, fields: 1 }));
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let err = Corpus::from_csv(Path::new("does/not/exist.csv")).unwrap_err();
        assert!(matches!(err, SpamError::Io(_)));
    }

    #[test]
    fn test_split_sizes() {
        let corpus = Corpus::from_reader(CSV.as_bytes()).unwrap();
        let split = corpus.train_test_split(0.25, Some(7)).unwrap();
        assert_eq!(split.test.len(), 2);
        assert_eq!(split.train.len(), 3);

        let split = corpus.train_test_split(0.0, None).unwrap();
        assert!(split.test.is_empty());
        assert_eq!(split.train.len(), 5);
    }

    #[test]
    fn test_seeded_split_is_reproducible() {
        let corpus = Corpus::from_reader(CSV.as_bytes()).unwrap();
        let a = corpus.train_test_split(0.4, Some(42)).unwrap();
        let b = corpus.train_test_split(0.4, Some(42)).unwrap();
        assert_eq!(a.train, b.train);
        assert_eq!(a.test, b.test);
    }

    #[test]
    fn test_split_rejects_bad_ratio() {
        let corpus = Corpus::from_reader(CSV.as_bytes()).unwrap();
        assert!(matches!(
            corpus.train_test_split(1.0, None),
            Err(SpamError::InvalidTestRatio(_))
        ));
        assert!(corpus.train_test_split(-0.1, None).is_err());
    }

    #[test]
    fn test_message_class_parsing() {
        assert_eq!("spam".parse(), Ok(MessageClass::Spam));
        assert_eq!("ham".parse(), Ok(MessageClass::Ham));
        assert!("SPAM".parse::<MessageClass>().is_err());
    }

    #[test]
    fn test_random_message_respects_class() {
        let corpus = Corpus::from_reader(CSV.as_bytes()).unwrap();
        let mut rng = StdRng::seed_from_u64(1);
        for _ in 0..10 {
            let text = corpus.random_message(MessageClass::Spam, &mut rng).unwrap();
            assert!(corpus.spam().any(|s| s.text == text));
        }

        let empty = Corpus::default();
        assert!(empty.random_message(MessageClass::Ham, &mut rng).is_none());
    }
}
