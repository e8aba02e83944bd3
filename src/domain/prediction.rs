//! Prediction results and the JSON payloads built from them.

use crate::processors::{LabelMapper, TopkResult};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One entry of a ranked prediction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RankedClass {
    pub index: usize,
    pub confidence: f32,
}

/// Outcome of classifying one image.
#[derive(Debug, Clone, PartialEq)]
pub struct Prediction {
    /// Index of the most probable class.
    pub class_index: usize,
    /// Probability of that class.
    pub confidence: f32,
    /// Highest-probability classes, descending.
    pub top_k: Vec<RankedClass>,
    /// The full probability vector, in class order.
    pub probabilities: Vec<f32>,
}

impl Prediction {
    /// Builds a prediction from a ranked head and the full vector.
    ///
    /// Returns `None` when the ranking is empty.
    pub fn from_ranking(ranking: &TopkResult, probabilities: Vec<f32>) -> Option<Self> {
        let (class_index, confidence) = ranking.best()?;
        let top_k = ranking
            .iter()
            .map(|(index, confidence)| RankedClass { index, confidence })
            .collect();
        Some(Self {
            class_index,
            confidence,
            top_k,
            probabilities,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DigitScore {
    pub digit: usize,
    pub confidence: f32,
}

/// Success payload of `POST /predict/digit`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DigitResponse {
    pub success: bool,
    pub prediction: usize,
    pub confidence: f32,
    pub top_3: Vec<DigitScore>,
    pub all_probabilities: Vec<f32>,
}

impl From<Prediction> for DigitResponse {
    fn from(p: Prediction) -> Self {
        Self {
            success: true,
            prediction: p.class_index,
            confidence: p.confidence,
            top_3: p
                .top_k
                .iter()
                .map(|r| DigitScore {
                    digit: r.index,
                    confidence: r.confidence,
                })
                .collect(),
            all_probabilities: p.probabilities,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LetterScore {
    pub letter: char,
    pub confidence: f32,
}

/// Success payload of `POST /predict/letter`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LetterResponse {
    pub success: bool,
    pub prediction: char,
    pub confidence: f32,
    pub top_3: Vec<LetterScore>,
    pub all_probabilities: Vec<f32>,
}

impl LetterResponse {
    /// Labels the prediction with `labels`; the same mapping covers the
    /// top-1 and every ranked entry.
    pub fn from_prediction(p: Prediction, labels: LabelMapper) -> Self {
        let letter = |index| labels.letter(index).unwrap_or(crate::core::UNKNOWN_LABEL);
        Self {
            success: true,
            prediction: letter(p.class_index),
            confidence: p.confidence,
            top_3: p
                .top_k
                .iter()
                .map(|r| LetterScore {
                    letter: letter(r.index),
                    confidence: r.confidence,
                })
                .collect(),
            all_probabilities: p.probabilities,
        }
    }
}

/// Load state of a model as reported by `/health`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LoadState {
    #[serde(rename = "loaded")]
    Loaded,
    #[serde(rename = "not loaded")]
    NotLoaded,
}

impl From<bool> for LoadState {
    fn from(loaded: bool) -> Self {
        if loaded {
            LoadState::Loaded
        } else {
            LoadState::NotLoaded
        }
    }
}

/// Payload of `GET /health`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthStatus {
    pub mnist_model: LoadState,
    pub emnist_model: LoadState,
}

/// Payload of `GET /`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HomeResponse {
    pub status: String,
    pub message: String,
    pub endpoints: BTreeMap<String, String>,
}

impl Default for HomeResponse {
    fn default() -> Self {
        let endpoints = [
            ("/predict/digit", "Predict digit (0-9)"),
            ("/predict/letter", "Predict letter (A-Z)"),
            ("/health", "Check model status"),
        ]
        .into_iter()
        .map(|(path, description)| (path.to_string(), description.to_string()))
        .collect();
        Self {
            status: "running".to_string(),
            message: "MNIST/EMNIST Recognition API".to_string(),
            endpoints,
        }
    }
}
