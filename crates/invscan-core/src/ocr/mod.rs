//! OCR boundary: image preprocessing and the scan pipeline.
//!
//! Text recognition itself is an external collaborator behind the
//! [`TextRecognizer`] trait; this module only prepares images for it and
//! maps whatever text comes back onto invoice fields.

mod preprocessing;

pub use preprocessing::{ImagePreprocessor, binarize, otsu_threshold, stretch_contrast};

use std::path::Path;

use image::DynamicImage;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::error::Result;
use crate::invoice::FieldMapper;
use crate::models::config::PreprocessConfig;
use crate::models::extraction::ExtractionResult;

/// Text returned by an OCR engine.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RecognizedText {
    /// Recognized text, lines separated by `\n`.
    pub text: String,

    /// Engine-reported confidence (0-100), when available.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f32>,
}

impl RecognizedText {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            confidence: None,
        }
    }

    pub fn with_confidence(mut self, confidence: f32) -> Self {
        self.confidence = Some(confidence);
        self
    }
}

/// An OCR engine turning a preprocessed image into text.
pub trait TextRecognizer {
    fn recognize(&self, image: &DynamicImage) -> Result<RecognizedText>;
}

/// Everything produced by one scan: raw text, mapped fields and the OCR
/// engine's own confidence.
///
/// The raw text is kept so an editor can fall back to manual
/// transcription when nothing could be mapped.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScanOutcome {
    pub text: String,
    pub data: ExtractionResult,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ocr_confidence: Option<f32>,
}

impl ScanOutcome {
    /// Map recognized text onto invoice fields.
    pub fn from_recognized(recognized: RecognizedText) -> Self {
        let data = FieldMapper::new().map(&recognized.text);
        Self {
            text: recognized.text,
            data,
            ocr_confidence: recognized.confidence,
        }
    }

    /// True when no field could be mapped and the user must transcribe.
    pub fn needs_manual_entry(&self) -> bool {
        self.data.is_empty()
    }
}

/// Preprocess, recognize, then map fields.
pub struct ScanPipeline<R> {
    preprocessor: ImagePreprocessor,
    recognizer: R,
    mapper: FieldMapper,
}

impl<R: TextRecognizer> ScanPipeline<R> {
    pub fn new(recognizer: R) -> Self {
        Self {
            preprocessor: ImagePreprocessor::new(),
            recognizer,
            mapper: FieldMapper::new(),
        }
    }

    pub fn with_preprocess_config(mut self, config: &PreprocessConfig) -> Self {
        self.preprocessor = ImagePreprocessor::from_config(config);
        self
    }

    /// Open an image file and run the pipeline on it.
    pub fn process_path(&self, path: &Path) -> Result<ScanOutcome> {
        let image = image::open(path)?;
        self.process(&image)
    }

    /// Run the full pipeline on an image.
    pub fn process(&self, image: &DynamicImage) -> Result<ScanOutcome> {
        let prepared = self.preprocessor.process(image)?;
        let recognized = self.recognizer.recognize(&prepared)?;

        info!(
            "Recognized {} characters (confidence: {:?})",
            recognized.text.len(),
            recognized.confidence
        );

        let data = self.mapper.map(&recognized.text);
        if data.is_empty() {
            warn!("No invoice fields found in recognized text");
        }

        Ok(ScanOutcome {
            text: recognized.text,
            data,
            ocr_confidence: recognized.confidence,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::InvscanError;
    use image::{GrayImage, Luma};
    use std::cell::Cell;

    struct FixedRecognizer {
        text: &'static str,
        seen_binary: Cell<bool>,
    }

    impl TextRecognizer for FixedRecognizer {
        fn recognize(&self, image: &DynamicImage) -> Result<RecognizedText> {
            let gray = image.to_luma8();
            self.seen_binary
                .set(gray.pixels().all(|p| p[0] == 0 || p[0] == 255));
            Ok(RecognizedText::new(self.text).with_confidence(87.5))
        }
    }

    struct FailingRecognizer;

    impl TextRecognizer for FailingRecognizer {
        fn recognize(&self, _image: &DynamicImage) -> Result<RecognizedText> {
            Err(InvscanError::Recognition("engine unavailable".to_string()))
        }
    }

    fn page() -> DynamicImage {
        DynamicImage::ImageLuma8(GrayImage::from_fn(20, 10, |x, _| {
            if x % 2 == 0 { Luma([30]) } else { Luma([220]) }
        }))
    }

    #[test]
    fn test_pipeline_maps_recognized_text() {
        let recognizer = FixedRecognizer {
            text: "Invoice #: INV-0042\nDate: 03/15/2024",
            seen_binary: Cell::new(false),
        };
        let pipeline = ScanPipeline::new(recognizer);

        let outcome = pipeline.process(&page()).unwrap();

        assert_eq!(outcome.data.invoice_number, "INV-0042");
        assert_eq!(outcome.data.invoice_date, "2024-03-15");
        assert_eq!(outcome.ocr_confidence, Some(87.5));
        assert!(!outcome.needs_manual_entry());
        assert!(pipeline.recognizer.seen_binary.get());
    }

    #[test]
    fn test_pipeline_keeps_text_when_nothing_maps() {
        let pipeline = ScanPipeline::new(FixedRecognizer {
            text: "smudged",
            seen_binary: Cell::new(false),
        });

        let outcome = pipeline.process(&page()).unwrap();
        assert_eq!(outcome.text, "smudged");
        assert!(outcome.needs_manual_entry());
    }

    #[test]
    fn test_pipeline_uses_preprocess_config() {
        let config = PreprocessConfig {
            contrast_stretch: false,
            binarize: false,
            ..Default::default()
        };
        let pipeline = ScanPipeline::new(FixedRecognizer {
            text: "",
            seen_binary: Cell::new(true),
        })
        .with_preprocess_config(&config);

        pipeline.process(&page()).unwrap();
        assert!(!pipeline.recognizer.seen_binary.get());
    }

    #[test]
    fn test_pipeline_propagates_recognition_errors() {
        let pipeline = ScanPipeline::new(FailingRecognizer);
        assert!(matches!(
            pipeline.process(&page()),
            Err(InvscanError::Recognition(_))
        ));
    }

    #[test]
    fn test_pipeline_rejects_empty_image() {
        let pipeline = ScanPipeline::new(FailingRecognizer);
        let empty = DynamicImage::ImageLuma8(GrayImage::new(0, 0));
        assert!(matches!(
            pipeline.process(&empty),
            Err(InvscanError::Preprocess(_))
        ));
    }

    #[test]
    fn test_pipeline_reports_unreadable_files() {
        let pipeline = ScanPipeline::new(FailingRecognizer);
        assert!(matches!(
            pipeline.process_path(Path::new("/nonexistent/scan.png")),
            Err(InvscanError::Image(_))
        ));
    }

    #[test]
    fn test_outcome_serialization() {
        let outcome = ScanOutcome::from_recognized(RecognizedText::new("").with_confidence(12.0));
        let json = serde_json::to_value(&outcome).unwrap();
        assert_eq!(json["ocrConfidence"], 12.0);
        assert_eq!(json["text"], "");
        assert!(json["data"]["items"].as_array().unwrap().is_empty());
    }
}
