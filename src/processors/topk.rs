//! Top-k ranking of classifier outputs.

use crate::core::errors::{GlyphError, GlyphResult, ProcessingStage, SimpleError};
use std::cmp::Ordering;

/// The ranked head of a probability vector.
#[derive(Debug, Clone, PartialEq)]
pub struct TopkResult {
    /// Class indexes, most probable first.
    pub indexes: Vec<usize>,
    /// Scores matching `indexes`.
    pub scores: Vec<f32>,
}

impl TopkResult {
    /// The top-1 entry.
    pub fn best(&self) -> Option<(usize, f32)> {
        Some((*self.indexes.first()?, *self.scores.first()?))
    }

    pub fn iter(&self) -> impl Iterator<Item = (usize, f32)> + '_ {
        self.indexes.iter().copied().zip(self.scores.iter().copied())
    }
}

/// Extracts the `k` highest-scoring classes from a probability vector.
///
/// Ties are broken by the lower class index, and NaN scores rank below
/// everything else, so the ordering is total and repeatable.
#[derive(Debug, Clone, Copy)]
pub struct Topk {
    k: usize,
}

impl Topk {
    /// Creates a new Topk processor.
    ///
    /// # Errors
    ///
    /// Returns a configuration error when `k` is zero.
    pub fn new(k: usize) -> GlyphResult<Self> {
        if k == 0 {
            return Err(GlyphError::config_error("k must be greater than 0"));
        }
        Ok(Self { k })
    }

    /// Ranks the scores of a single prediction.
    ///
    /// When fewer than `k` classes exist, all of them are returned.
    pub fn process(&self, prediction: &[f32]) -> GlyphResult<TopkResult> {
        if prediction.is_empty() {
            return Err(GlyphError::processing_error(
                ProcessingStage::PostProcessing,
                "cannot rank an empty prediction",
                SimpleError::new("classifier returned no scores"),
            ));
        }

        let mut indexed_scores: Vec<(usize, f32)> = prediction.iter().copied().enumerate().collect();
        indexed_scores.sort_by(rank_order);
        indexed_scores.truncate(self.k);

        let (indexes, scores) = indexed_scores.into_iter().unzip();
        Ok(TopkResult { indexes, scores })
    }
}

fn rank_key(score: f32) -> f32 {
    // -0.0 + 0.0 == +0.0, so signed zeros compare equal under total_cmp
    if score.is_nan() {
        f32::NEG_INFINITY
    } else {
        score + 0.0
    }
}

fn rank_order(a: &(usize, f32), b: &(usize, f32)) -> Ordering {
    rank_key(b.1).total_cmp(&rank_key(a.1)).then(a.0.cmp(&b.0))
}
