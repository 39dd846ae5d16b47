//! Text processing and analysis module

pub mod text_processor;
pub mod stopwords;
pub mod stem;
pub mod lemmatize;
pub mod word_vectors;
pub mod tfidf;
pub mod embeddings;
pub mod regex_classifier;
pub mod drift;
