//! The shared, constructed-once state behind every request.

use crate::core::config::ServiceConfig;
use crate::core::constants::{DIGIT_CLASSES, TOP_K};
use crate::core::errors::{GlyphError, GlyphResult, ProcessingStage, SimpleError};
use crate::core::traits::Classifier;
use crate::domain::{DigitResponse, HealthStatus, LetterResponse, ModelKind, Prediction};
use crate::models::OnnxClassifier;
use crate::processors::{ImageDecoder, LabelMapper, Normalizer, Topk};
use image::DynamicImage;
use std::path::Path;
use std::sync::Arc;

/// A classifier together with the label space it was loaded with.
#[derive(Debug, Clone)]
pub struct LoadedModel {
    pub classifier: Arc<dyn Classifier>,
    pub labels: LabelMapper,
}

impl LoadedModel {
    /// Wraps a classifier, picking its label space from `kind`.
    ///
    /// For letters the index scheme is fixed here from the output width.
    pub fn new(kind: ModelKind, classifier: Arc<dyn Classifier>) -> Self {
        let labels = match kind {
            ModelKind::Digit => LabelMapper::Digit,
            ModelKind::Letter => LabelMapper::letters(classifier.num_classes()),
        };
        Self { classifier, labels }
    }
}

/// Loaded models and the processing pipeline shared by all handlers.
#[derive(Debug)]
pub struct ServiceContext {
    digit: Option<LoadedModel>,
    letter: Option<LoadedModel>,
    decoder: ImageDecoder,
    normalizer: Normalizer,
    topk: Topk,
}

impl ServiceContext {
    /// Builds a context from already-constructed classifiers.
    ///
    /// A digit classifier whose output is not exactly ten classes is logged
    /// and left unloaded.
    pub fn new(
        digit: Option<Arc<dyn Classifier>>,
        letter: Option<Arc<dyn Classifier>>,
    ) -> GlyphResult<Self> {
        let digit = digit.filter(|c| {
            let fits = c.num_classes() == DIGIT_CLASSES;
            if !fits {
                tracing::error!(
                    model = ModelKind::Digit.display_name(),
                    engine = %c.engine_info(),
                    expected = DIGIT_CLASSES,
                    actual = c.num_classes(),
                    "digit model has the wrong output width, leaving it unloaded"
                );
            }
            fits
        });
        Ok(Self {
            digit: digit.map(|c| LoadedModel::new(ModelKind::Digit, c)),
            letter: letter.map(|c| LoadedModel::new(ModelKind::Letter, c)),
            decoder: ImageDecoder::new(),
            normalizer: Normalizer::new(),
            topk: Topk::new(TOP_K)?,
        })
    }

    /// Loads both classifiers named by `config`.
    ///
    /// A missing or broken model is logged and left unloaded; the service
    /// keeps running and the matching route answers with an error.
    pub fn load(config: &ServiceConfig) -> GlyphResult<Self> {
        let digit = load_classifier(ModelKind::Digit, &config.digit_model_path(), config);
        let letter = load_classifier(ModelKind::Letter, &config.letter_model_path(), config);
        Self::new(digit, letter)
    }

    /// Loads only the classifier for `kind`.
    pub fn load_only(config: &ServiceConfig, kind: ModelKind) -> GlyphResult<Self> {
        match kind {
            ModelKind::Digit => Self::new(
                load_classifier(kind, &config.digit_model_path(), config),
                None,
            ),
            ModelKind::Letter => Self::new(
                None,
                load_classifier(kind, &config.letter_model_path(), config),
            ),
        }
    }

    pub fn model(&self, kind: ModelKind) -> Option<&LoadedModel> {
        match kind {
            ModelKind::Digit => self.digit.as_ref(),
            ModelKind::Letter => self.letter.as_ref(),
        }
    }

    pub fn is_loaded(&self, kind: ModelKind) -> bool {
        self.model(kind).is_some()
    }

    pub fn health(&self) -> HealthStatus {
        HealthStatus {
            mnist_model: self.is_loaded(ModelKind::Digit).into(),
            emnist_model: self.is_loaded(ModelKind::Letter).into(),
        }
    }

    /// Returns the model for `kind` or the "not loaded" error.
    pub fn require(&self, kind: ModelKind) -> GlyphResult<&LoadedModel> {
        self.model(kind).ok_or_else(|| GlyphError::model_unavailable(kind.display_name()))
    }

    /// Decodes and normalizes an encoded image, then classifies it.
    pub fn predict_encoded(&self, kind: ModelKind, encoded: &str) -> GlyphResult<Prediction> {
        let model = self.require(kind)?;
        tracing::debug!(%kind, payload_len = encoded.len(), "received prediction request");
        let img = self.decoder.decode(encoded)?;
        self.classify(kind, model, &img)
    }

    /// Classifies an already-decoded image.
    pub fn predict_image(&self, kind: ModelKind, img: &DynamicImage) -> GlyphResult<Prediction> {
        let model = self.require(kind)?;
        self.classify(kind, model, img)
    }

    pub fn predict_digit(&self, encoded: &str) -> GlyphResult<DigitResponse> {
        Ok(self.predict_encoded(ModelKind::Digit, encoded)?.into())
    }

    pub fn predict_letter(&self, encoded: &str) -> GlyphResult<LetterResponse> {
        let labels = self.require(ModelKind::Letter)?.labels;
        let prediction = self.predict_encoded(ModelKind::Letter, encoded)?;
        Ok(LetterResponse::from_prediction(prediction, labels))
    }

    pub fn predict_digit_image(&self, img: &DynamicImage) -> GlyphResult<DigitResponse> {
        Ok(self.predict_image(ModelKind::Digit, img)?.into())
    }

    pub fn predict_letter_image(&self, img: &DynamicImage) -> GlyphResult<LetterResponse> {
        let labels = self.require(ModelKind::Letter)?.labels;
        let prediction = self.predict_image(ModelKind::Letter, img)?;
        Ok(LetterResponse::from_prediction(prediction, labels))
    }

    /// Reads an image file for the offline CLI path.
    pub fn decode_file(&self, path: impl AsRef<Path>) -> GlyphResult<DynamicImage> {
        self.decoder.decode_file(path)
    }

    fn classify(
        &self,
        kind: ModelKind,
        model: &LoadedModel,
        img: &DynamicImage,
    ) -> GlyphResult<Prediction> {
        let tensor = self.normalizer.normalize(img)?;
        let probabilities = model.classifier.predict(&tensor)?;
        let ranking = self.topk.process(&probabilities)?;
        let prediction = Prediction::from_ranking(&ranking, probabilities).ok_or_else(|| {
            GlyphError::processing_error(
                ProcessingStage::PostProcessing,
                "empty ranking",
                SimpleError::new(format!("{} returned no classes", model.classifier.name())),
            )
        })?;
        tracing::debug!(
            %kind,
            class_index = prediction.class_index,
            confidence = prediction.confidence,
            "prediction complete"
        );
        Ok(prediction)
    }
}

fn load_classifier(
    kind: ModelKind,
    path: &Path,
    config: &ServiceConfig,
) -> Option<Arc<dyn Classifier>> {
    if !path.exists() {
        tracing::warn!(
            model = kind.display_name(),
            path = %path.display(),
            "model file not found, {} predictions are disabled",
            kind
        );
        return None;
    }
    match OnnxClassifier::load(path, &config.inference) {
        Ok(classifier) => {
            tracing::info!(
                model = kind.display_name(),
                engine = %classifier.engine_info(),
                "model ready"
            );
            Some(Arc::new(classifier))
        }
        Err(e) => {
            tracing::error!(
                model = kind.display_name(),
                path = %path.display(),
                error = %e,
                "failed to load model"
            );
            None
        }
    }
}
