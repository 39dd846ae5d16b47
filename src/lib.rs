//! Text baselines library
//!
//! Preprocessing, word-vector document embeddings, regex baseline classifiers,
//! embedding drift analysis and classification metrics.

pub mod cli;
pub mod config;
pub mod error;
pub mod input;
pub mod output;
pub mod processing;

pub use config::Config;
pub use error::{Result, TextBaselinesError};
pub use output::metrics::{Average, Metrics, MethodScores};
pub use processing::drift::{analyze_drift, DriftReport};
pub use processing::embeddings::{embed_mean, embed_tfidf_weighted};
pub use processing::regex_classifier::{classify_dual, classify_single, Label, RegexClassifier};
pub use processing::text_processor::{
    normalize, normalize_as, Normalized, OutputType, TextProcessor,
};
pub use processing::tfidf::{TermWeights, TfidfVectorizer};
pub use processing::word_vectors::{KeyedVectors, WordVectors};
