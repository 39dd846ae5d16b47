//! Term weighting for the weighted document embedder

use crate::error::{Result, TextBaselinesError};
use log::{debug, info};
use regex::Regex;
use sprs::CsMat;
use std::collections::{BTreeMap, HashMap, HashSet};

/// A term-weight provider fitted over some vocabulary.
///
/// `vectorize` returns one sparse row per document whose columns line up with
/// `feature_names`.
pub trait TermWeights {
    fn vectorize(&self, documents: &[String]) -> Result<CsMat<f32>>;

    fn feature_names(&self) -> &[String];
}

/// TF-IDF vectorizer with smoothed IDF and L2 row normalization.
///
/// Tokens are runs of two or more word characters in lowercased text.
#[derive(Debug, Clone)]
pub struct TfidfVectorizer {
    token_regex: Regex,
    vocabulary: HashMap<String, usize>,
    feature_names: Vec<String>,
    idf: Vec<f32>,
}

impl Default for TfidfVectorizer {
    fn default() -> Self {
        Self::new()
    }
}

impl TfidfVectorizer {
    pub fn new() -> Self {
        Self {
            token_regex: Regex::new(r"\b\w\w+\b").expect("Invalid token regex"),
            vocabulary: HashMap::new(),
            feature_names: Vec::new(),
            idf: Vec::new(),
        }
    }

    pub fn is_fitted(&self) -> bool {
        !self.feature_names.is_empty()
    }

    pub fn idf(&self) -> &[f32] {
        &self.idf
    }

    fn tokens<'a>(&self, lowered: &'a str) -> Vec<&'a str> {
        self.token_regex.find_iter(lowered).map(|m| m.as_str()).collect()
    }

    /// Learn the vocabulary and IDF weights from `corpus`
    pub fn fit<S: AsRef<str>>(&mut self, corpus: &[S]) -> Result<()> {
        if corpus.is_empty() {
            return Err(TextBaselinesError::invalid_argument(
                "cannot fit a TF-IDF vectorizer on an empty corpus",
            ));
        }

        let mut document_frequency: BTreeMap<String, usize> = BTreeMap::new();
        for doc in corpus {
            let lowered = doc.as_ref().to_lowercase();
            let unique: HashSet<&str> = self.tokens(&lowered).into_iter().collect();
            for token in unique {
                *document_frequency.entry(token.to_string()).or_insert(0) += 1;
            }
        }

        if document_frequency.is_empty() {
            return Err(TextBaselinesError::invalid_argument(
                "corpus contains no tokens; vocabulary would be empty",
            ));
        }

        let n_docs = corpus.len() as f32;
        self.vocabulary.clear();
        self.feature_names.clear();
        self.idf.clear();

        // BTreeMap iteration gives the sorted feature order.
        for (idx, (term, df)) in document_frequency.into_iter().enumerate() {
            self.idf.push(((1.0 + n_docs) / (1.0 + df as f32)).ln() + 1.0);
            self.vocabulary.insert(term.clone(), idx);
            self.feature_names.push(term);
        }

        info!(
            "Fitted TF-IDF vocabulary of {} terms over {} documents",
            self.feature_names.len(),
            corpus.len()
        );
        Ok(())
    }

    pub fn fit_transform(&mut self, corpus: &[String]) -> Result<CsMat<f32>> {
        self.fit(corpus)?;
        self.vectorize(corpus)
    }
}

impl TermWeights for TfidfVectorizer {
    fn vectorize(&self, documents: &[String]) -> Result<CsMat<f32>> {
        if !self.is_fitted() {
            return Err(TextBaselinesError::invalid_argument(
                "TF-IDF vectorizer must be fitted before vectorizing",
            ));
        }

        let mut indptr = Vec::with_capacity(documents.len() + 1);
        let mut indices = Vec::new();
        let mut data = Vec::new();
        indptr.push(0usize);

        for doc in documents {
            let lowered = doc.to_lowercase();
            let mut counts: BTreeMap<usize, f32> = BTreeMap::new();
            for token in self.tokens(&lowered) {
                if let Some(&col) = self.vocabulary.get(token) {
                    *counts.entry(col).or_insert(0.0) += 1.0;
                }
            }

            let weighted: Vec<(usize, f32)> = counts
                .into_iter()
                .map(|(col, tf)| (col, tf * self.idf[col]))
                .collect();
            let norm = weighted.iter().map(|(_, w)| w * w).sum::<f32>().sqrt();

            for (col, weight) in weighted {
                indices.push(col);
                data.push(if norm > 0.0 { weight / norm } else { 0.0 });
            }
            indptr.push(indices.len());
        }

        debug!("Vectorized {} documents into {} non-zero weights", documents.len(), data.len());
        Ok(CsMat::new(
            (documents.len(), self.feature_names.len()),
            indptr,
            indices,
            data,
        ))
    }

    fn feature_names(&self) -> &[String] {
        &self.feature_names
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn corpus() -> Vec<String> {
        vec![
            "the movie was great".to_string(),
            "the movie was terrible".to_string(),
            "a great great cast".to_string(),
        ]
    }

    #[test]
    fn test_vocabulary_is_sorted_and_skips_single_chars() {
        let mut tfidf = TfidfVectorizer::new();
        tfidf.fit(&corpus()).unwrap();

        assert_eq!(
            tfidf.feature_names(),
            &["cast", "great", "movie", "terrible", "the", "was"]
        );
    }

    #[test]
    fn test_smoothed_idf() {
        let mut tfidf = TfidfVectorizer::new();
        tfidf.fit(&corpus()).unwrap();

        // "cast" appears in 1 of 3 documents, "great" in 2 of 3.
        let cast = tfidf.idf()[0];
        let great = tfidf.idf()[1];
        assert!((cast - ((4.0f32 / 2.0).ln() + 1.0)).abs() < 1e-6);
        assert!((great - ((4.0f32 / 3.0).ln() + 1.0)).abs() < 1e-6);
    }

    #[test]
    fn test_rows_are_unit_norm() {
        let mut tfidf = TfidfVectorizer::new();
        let matrix = tfidf.fit_transform(&corpus()).unwrap();

        assert_eq!(matrix.rows(), 3);
        assert_eq!(matrix.cols(), 6);
        for row in matrix.outer_iterator() {
            let norm: f32 = row.iter().map(|(_, w)| w * w).sum::<f32>().sqrt();
            assert!((norm - 1.0).abs() < 1e-5);
        }
    }

    #[test]
    fn test_unknown_terms_give_empty_row() {
        let mut tfidf = TfidfVectorizer::new();
        tfidf.fit(&corpus()).unwrap();

        let matrix = tfidf.vectorize(&["completely unseen words".to_string()]).unwrap();
        assert_eq!(matrix.nnz(), 0);
        assert_eq!(matrix.rows(), 1);
    }

    #[test]
    fn test_vectorize_before_fit_fails() {
        let tfidf = TfidfVectorizer::new();
        let err = tfidf.vectorize(&corpus()).unwrap_err();
        assert!(matches!(err, TextBaselinesError::InvalidArgument(_)));
    }
}
