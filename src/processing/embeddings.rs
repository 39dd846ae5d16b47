//! Document embeddings from word vectors
//!
//! Both builders produce one row per input text with the word-vector width as
//! column count. A text none of whose tokens resolve gets the zero vector.

use crate::error::{Result, TextBaselinesError};
use crate::processing::text_processor;
use crate::processing::tfidf::TermWeights;
use crate::processing::word_vectors::WordVectors;
use log::{debug, info};
use ndarray::{Array1, Array2, ArrayView1};
use std::collections::{HashMap, HashSet};
use std::time::Instant;

/// Mean of the word vectors of each text's tokens.
///
/// Tokens missing from `vectors` are skipped; repeated tokens count once per
/// occurrence.
pub fn embed_mean<S: AsRef<str>>(
    texts: &[S],
    vectors: &dyn WordVectors,
    remove_stopwords: bool,
    stopwords: Option<&HashSet<String>>,
) -> Result<Array2<f32>> {
    let start_time = Instant::now();
    let processor = text_processor::shared();
    let dim = vectors.dimension();
    let mut embeddings = Array2::zeros((texts.len(), dim));
    let mut empty_docs = 0;

    for (i, text) in texts.iter().enumerate() {
        let tokens = processor.normalize(text.as_ref(), remove_stopwords, stopwords)?;

        let mut sum = Array1::<f32>::zeros(dim);
        let mut resolved = 0usize;
        for token in &tokens {
            if let Some(vector) = vectors.get(token) {
                sum += &vector;
                resolved += 1;
            }
        }

        if resolved == 0 {
            debug!("Document {} has no tokens in the vector model, using zero vector", i);
            empty_docs += 1;
            continue;
        }

        embeddings.row_mut(i).assign(&(sum / resolved as f32));
    }

    info!(
        "Built {} mean embeddings ({} zero vectors) in {:.2?}",
        texts.len(),
        empty_docs,
        start_time.elapsed()
    );
    Ok(embeddings)
}

/// Word vectors averaged with per-document term weights.
///
/// Each text is vectorized by `term_weights` after the same normalization used
/// for token lookup. A token contributes `weight * vector` to the sum and
/// `weight` to the total only when it has both a vector and a non-zero weight
/// in its document.
pub fn embed_tfidf_weighted<S: AsRef<str>>(
    texts: &[S],
    vectors: &dyn WordVectors,
    term_weights: &dyn TermWeights,
    remove_stopwords: bool,
    stopwords: Option<&HashSet<String>>,
) -> Result<Array2<f32>> {
    let start_time = Instant::now();
    let processor = text_processor::shared();
    let dim = vectors.dimension();

    let token_lists = texts
        .iter()
        .map(|text| processor.normalize(text.as_ref(), remove_stopwords, stopwords))
        .collect::<Result<Vec<_>>>()?;
    let joined: Vec<String> = token_lists.iter().map(|tokens| tokens.join(" ")).collect();

    let feature_names = term_weights.feature_names();
    let weight_matrix = term_weights.vectorize(&joined)?;
    if weight_matrix.rows() != texts.len() || weight_matrix.cols() != feature_names.len() {
        return Err(TextBaselinesError::invalid_argument(format!(
            "term-weight matrix is {}x{}, expected {}x{}",
            weight_matrix.rows(),
            weight_matrix.cols(),
            texts.len(),
            feature_names.len()
        )));
    }

    let mut embeddings = Array2::zeros((texts.len(), dim));
    let mut empty_docs = 0;

    for (i, (tokens, row)) in token_lists.iter().zip(weight_matrix.outer_iterator()).enumerate() {
        let weights: HashMap<&str, f32> = row
            .iter()
            .filter(|(_, w)| **w != 0.0)
            .map(|(col, &w)| (feature_names[col].as_str(), w))
            .collect();

        let mut weighted_sum = Array1::<f32>::zeros(dim);
        let mut total_weight = 0.0f32;
        let mut contributions = 0usize;

        for token in tokens {
            let (Some(vector), Some(&weight)) = (vectors.get(token), weights.get(token.as_str()))
            else {
                continue;
            };
            weighted_sum.scaled_add(weight, &vector);
            total_weight += weight;
            contributions += 1;
        }

        if contributions == 0 || total_weight == 0.0 {
            debug!("Document {} has no weighted tokens in the vector model, using zero vector", i);
            empty_docs += 1;
            continue;
        }

        embeddings.row_mut(i).assign(&(weighted_sum / total_weight));
    }

    info!(
        "Built {} TF-IDF weighted embeddings ({} zero vectors) in {:.2?}",
        texts.len(),
        empty_docs,
        start_time.elapsed()
    );
    Ok(embeddings)
}

pub fn l2_norm(v: ArrayView1<f32>) -> f32 {
    v.dot(&v).sqrt()
}

/// Cosine similarity; 0.0 when either vector has zero norm
pub fn cosine_similarity(a: ArrayView1<f32>, b: ArrayView1<f32>) -> Result<f32> {
    if a.len() != b.len() {
        return Err(TextBaselinesError::invalid_argument(format!(
            "Embedding dimensions don't match: {} vs {}",
            a.len(),
            b.len()
        )));
    }

    let norm_a = l2_norm(a);
    let norm_b = l2_norm(b);

    if norm_a == 0.0 || norm_b == 0.0 {
        Ok(0.0)
    } else {
        Ok(a.dot(&b) / (norm_a * norm_b))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::processing::word_vectors::KeyedVectors;
    use ndarray::array;
    use sprs::CsMat;

    fn cat_dog() -> KeyedVectors {
        KeyedVectors::from_pairs(vec![("cat", vec![1.0, 0.0]), ("dog", vec![3.0, 0.0])], 2).unwrap()
    }

    /// Fixed per-document weights, one map per document.
    struct FixedWeights {
        names: Vec<String>,
        rows: Vec<HashMap<&'static str, f32>>,
    }

    impl FixedWeights {
        fn new(rows: Vec<Vec<(&'static str, f32)>>) -> Self {
            let mut names: Vec<String> = rows
                .iter()
                .flatten()
                .map(|(name, _)| name.to_string())
                .collect();
            names.sort();
            names.dedup();
            Self {
                names,
                rows: rows.into_iter().map(|r| r.into_iter().collect()).collect(),
            }
        }
    }

    impl TermWeights for FixedWeights {
        fn vectorize(&self, documents: &[String]) -> Result<CsMat<f32>> {
            let mut indptr = vec![0];
            let mut indices = Vec::new();
            let mut data = Vec::new();
            for row in self.rows.iter().take(documents.len()) {
                for (col, name) in self.names.iter().enumerate() {
                    if let Some(&w) = row.get(name.as_str()) {
                        indices.push(col);
                        data.push(w);
                    }
                }
                indptr.push(indices.len());
            }
            Ok(CsMat::new((indptr.len() - 1, self.names.len()), indptr, indices, data))
        }

        fn feature_names(&self) -> &[String] {
            &self.names
        }
    }

    #[test]
    fn test_mean_of_resolved_vectors() {
        let embeddings = embed_mean(&["cat dog"], &cat_dog(), false, None).unwrap();
        assert_eq!(embeddings, array![[2.0f32, 0.0]]);
    }

    #[test]
    fn test_mean_counts_repeats_and_skips_unknown() {
        let embeddings =
            embed_mean(&["Cat, cat... DOG and a bird"], &cat_dog(), false, None).unwrap();
        let expected = (1.0 + 1.0 + 3.0) / 3.0;
        assert!((embeddings[[0, 0]] - expected).abs() < 1e-6);
        assert_eq!(embeddings[[0, 1]], 0.0);
    }

    #[test]
    fn test_unresolved_text_gets_zero_vector() {
        let embeddings = embed_mean(&["bird fish", "", "cat"], &cat_dog(), false, None).unwrap();

        assert_eq!(embeddings.shape(), &[3, 2]);
        assert_eq!(embeddings.row(0).to_vec(), vec![0.0, 0.0]);
        assert_eq!(embeddings.row(1).to_vec(), vec![0.0, 0.0]);
        assert_eq!(embeddings.row(2).to_vec(), vec![1.0, 0.0]);
    }

    #[test]
    fn test_stopwords_are_removed_before_lookup() {
        let stopwords: HashSet<String> = ["dog".to_string()].into_iter().collect();
        let embeddings = embed_mean(&["cat dog"], &cat_dog(), true, Some(&stopwords)).unwrap();
        assert_eq!(embeddings, array![[1.0f32, 0.0]]);
    }

    #[test]
    fn test_missing_stopwords_propagates_invalid_argument() {
        let err = embed_mean(&["cat dog"], &cat_dog(), true, None).unwrap_err();
        assert!(matches!(err, TextBaselinesError::InvalidArgument(_)));
    }

    #[test]
    fn test_zero_weight_token_is_excluded() {
        let weights = FixedWeights::new(vec![vec![("cat", 2.0), ("dog", 0.0)]]);
        let embeddings =
            embed_tfidf_weighted(&["cat dog"], &cat_dog(), &weights, false, None).unwrap();
        assert_eq!(embeddings, array![[1.0f32, 0.0]]);
    }

    #[test]
    fn test_weighted_average() {
        let weights = FixedWeights::new(vec![vec![("cat", 1.0), ("dog", 3.0)]]);
        let embeddings =
            embed_tfidf_weighted(&["cat dog"], &cat_dog(), &weights, false, None).unwrap();
        // (1*1 + 3*3) / (1 + 3)
        assert!((embeddings[[0, 0]] - 2.5).abs() < 1e-6);
    }

    #[test]
    fn test_weighted_without_weights_is_zero_vector() {
        let weights = FixedWeights::new(vec![vec![("bird", 1.0)], vec![]]);
        let embeddings =
            embed_tfidf_weighted(&["cat dog", "cat"], &cat_dog(), &weights, false, None).unwrap();
        assert_eq!(embeddings, array![[0.0f32, 0.0], [0.0, 0.0]]);
    }

    #[test]
    fn test_weighted_rejects_misaligned_matrix() {
        let weights = FixedWeights::new(vec![vec![("cat", 1.0)]]);
        let err =
            embed_tfidf_weighted(&["cat", "dog"], &cat_dog(), &weights, false, None).unwrap_err();
        assert!(matches!(err, TextBaselinesError::InvalidArgument(_)));
    }

    #[test]
    fn test_cosine_similarity() {
        let a = array![1.0f32, 2.0, 3.0];
        let zero = array![0.0f32, 0.0, 0.0];

        assert!((cosine_similarity(a.view(), a.view()).unwrap() - 1.0).abs() < 1e-6);
        assert_eq!(cosine_similarity(a.view(), zero.view()).unwrap(), 0.0);
        assert!(cosine_similarity(a.view(), array![1.0f32].view()).is_err());
    }
}
