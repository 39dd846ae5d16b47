//! Embedding drift between an original and a tuned embedding matrix

use crate::error::{Result, TextBaselinesError};
use crate::processing::embeddings::{cosine_similarity, l2_norm};
use log::info;
use ndarray::ArrayView2;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Per-word drift measurements; all vectors are parallel.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DriftReport {
    pub words: Vec<String>,
    pub indices: Vec<usize>,
    pub similarities: Vec<f32>,
    pub distances: Vec<f32>,
    pub relative_changes: Vec<f32>,
    pub valid_count: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SeriesStats {
    pub mean: f32,
    pub min: f32,
    pub max: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DriftSummary {
    pub valid_count: usize,
    pub similarity: Option<SeriesStats>,
    pub distance: Option<SeriesStats>,
    pub relative_change: Option<SeriesStats>,
}

impl SeriesStats {
    fn of(values: &[f32]) -> Option<Self> {
        if values.is_empty() {
            return None;
        }
        let sum: f32 = values.iter().sum();
        let min = values.iter().copied().fold(f32::INFINITY, f32::min);
        let max = values.iter().copied().fold(f32::NEG_INFINITY, f32::max);
        Some(Self {
            mean: sum / values.len() as f32,
            min,
            max,
        })
    }
}

impl DriftReport {
    pub fn summary(&self) -> DriftSummary {
        DriftSummary {
            valid_count: self.valid_count,
            similarity: SeriesStats::of(&self.similarities),
            distance: SeriesStats::of(&self.distances),
            relative_change: SeriesStats::of(&self.relative_changes),
        }
    }
}

/// Compare each word's original and tuned vectors.
///
/// Words with `idx >= vocab_size` or an all-zero original row are skipped.
/// A tuned row with zero norm gets similarity 0.0.
pub fn analyze_drift(
    original: ArrayView2<f32>,
    tuned: ArrayView2<f32>,
    word_index: &HashMap<String, usize>,
    vocab_size: usize,
) -> Result<DriftReport> {
    if original.shape() != tuned.shape() {
        return Err(TextBaselinesError::invalid_argument(format!(
            "original embeddings are {:?} but tuned embeddings are {:?}",
            original.shape(),
            tuned.shape()
        )));
    }

    let mut entries: Vec<(&String, usize)> = word_index
        .iter()
        .map(|(word, &idx)| (word, idx))
        .filter(|&(_, idx)| idx < vocab_size)
        .collect();
    entries.sort_by(|a, b| a.1.cmp(&b.1).then_with(|| a.0.cmp(b.0)));

    let mut report = DriftReport::default();

    for (word, idx) in entries {
        if idx >= original.nrows() {
            return Err(TextBaselinesError::invalid_argument(format!(
                "index {} for '{}' is outside the {} embedding rows",
                idx,
                word,
                original.nrows()
            )));
        }

        let orig_vec = original.row(idx);
        if orig_vec.iter().all(|&v| v == 0.0) {
            continue;
        }
        let orig_norm = l2_norm(orig_vec);
        if orig_norm == 0.0 {
            // Non-zero components that underflow when squared
            continue;
        }

        let tuned_vec = tuned.row(idx);
        let distance = l2_norm((&orig_vec - &tuned_vec).view());

        report.words.push(word.clone());
        report.indices.push(idx);
        report.similarities.push(cosine_similarity(orig_vec, tuned_vec)?);
        report.distances.push(distance);
        report.relative_changes.push(distance / orig_norm);
    }

    report.valid_count = report.indices.len();
    info!("Analyzed drift for {} of {} indexed words", report.valid_count, word_index.len());
    Ok(report)
}
