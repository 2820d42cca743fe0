//! # spam-predictor
//!
//! Flag SMS-style messages as spam with a bag-of-words Naive Bayes classifier.
//!
//! Messages are read from a two-column `category,message` CSV, tokenized into
//! word counts by a [`CountVectorizer`] and fitted with a
//! [`linfa-bayes`](https://crates.io/crates/linfa-bayes) multinomial Naive Bayes
//! classifier. The fitted pair is served over HTTP by the `spam-predictor`
//! binary (see [`api`]).
//!
//! The crate also ships a tiny Euclidean nearest-neighbor helper in
//! [`neighbors`], used by the `neighbors` binary.
//!
//! ## Example
//! ```rust
//! use spam_predictor::{Corpus, SpamModel};
//!
//! let csv = "Category,Message\n\
//!     spam,WINNER! claim your free prize now\n\
//!     ham,see you at lunch tomorrow\n";
//! let corpus = Corpus::from_reader(csv.as_bytes()).unwrap();
//! let (model, _held_out) = SpamModel::train(&corpus, 0.0, Some(7)).unwrap();
//!
//! let labels = model.predict(&["claim your free prize"]);
//! assert_eq!(labels[0], 1);
//! ```

pub mod api;
pub mod config;
pub mod dataset;
pub mod error;
pub mod model;
pub mod neighbors;
pub mod vectorizer;

pub use api::{AppContext, router};
pub use config::ServiceConfig;
pub use dataset::{Corpus, DatasetSplit, MessageClass, Sample, label_for};
pub use error::{Result, SpamError};
pub use model::{SpamModel, TrainingSummary};
pub use neighbors::{NeighborError, distance, nearest};
pub use vectorizer::CountVectorizer;
