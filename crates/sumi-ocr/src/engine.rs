use std::io::Cursor;
use std::path::{Path, PathBuf};

use leptess::LepTess;

use sumi_core::engine::{Recognizer, RecognizerBuilder};
use sumi_core::error::EngineError;
use sumi_core::language;
use sumi_core::text::{DefaultPostprocessor, Postprocessor};
use sumi_types::{CanonicalImage, LanguageCode, RecognitionResult};

use crate::tsv;

/// A Tesseract instance bound to one language. The traineddata selection is
/// a construction-time property, so language changes mean a new instance.
pub struct TesseractRecognizer {
    tess: LepTess,
    language: LanguageCode,
    tag: &'static str,
}

// The Tesseract handle is only ever used from one thread at a time, behind
// the pipeline lock.
unsafe impl Send for TesseractRecognizer {}

impl TesseractRecognizer {
    pub fn new(language: LanguageCode, datapath: Option<&Path>) -> Result<Self, EngineError> {
        let tag = language::engine_locale(language);
        let datapath = datapath.map(|p| p.to_string_lossy().into_owned());
        let tess = LepTess::new(datapath.as_deref(), tag).map_err(|e| EngineError::Init {
            language,
            tag: tag.to_string(),
            reason: e.to_string(),
        })?;
        Ok(Self {
            tess,
            language,
            tag,
        })
    }
}

impl Recognizer for TesseractRecognizer {
    fn language(&self) -> LanguageCode {
        self.language
    }

    fn engine_tag(&self) -> &str {
        self.tag
    }

    /// Feed the canonical bitmap to Tesseract as PNG bytes and assemble the
    /// TSV result into lines. Only the text survives; per-word confidence
    /// and geometry are dropped during assembly.
    fn recognize(&mut self, image: &CanonicalImage) -> Result<RecognitionResult, EngineError> {
        let png = encode_png(image)?;
        self.tess
            .set_image_from_mem(&png)
            .map_err(|e| EngineError::Recognize {
                reason: format!("failed to load image into tesseract: {e}"),
            })?;
        // Canonical images carry no DPI metadata; 300 keeps the recognizer
        // in its calibrated range.
        self.tess.set_source_resolution(300);

        let table = self
            .tess
            .get_tsv_text(0)
            .map_err(|e| EngineError::Recognize {
                reason: format!("tesseract produced no readable output: {e}"),
            })?;

        let post = DefaultPostprocessor;
        let lines: Vec<String> = tsv::assemble_lines(&table)
            .into_iter()
            .map(|line| post.process(&line))
            .filter(|line| !line.is_empty())
            .collect();

        Ok(RecognitionResult::new(lines))
    }
}

fn encode_png(image: &CanonicalImage) -> Result<Vec<u8>, EngineError> {
    let rgb = image::RgbImage::from_raw(image.width(), image.height(), image.pixels().to_vec())
        .ok_or_else(|| EngineError::Recognize {
            reason: "canonical image buffer does not match its dimensions".into(),
        })?;
    let mut png = Vec::new();
    rgb.write_to(&mut Cursor::new(&mut png), image::ImageFormat::Png)
        .map_err(|e| EngineError::Recognize {
            reason: format!("png encoding failed: {e}"),
        })?;
    Ok(png)
}

/// Builds [`TesseractRecognizer`] handles against one traineddata directory.
pub struct TesseractBuilder {
    datapath: Option<PathBuf>,
}

impl TesseractBuilder {
    /// `datapath` overrides the engine's compiled-in traineddata location.
    pub fn new(datapath: Option<PathBuf>) -> Self {
        Self { datapath }
    }
}

impl RecognizerBuilder for TesseractBuilder {
    fn build(&self, language: LanguageCode) -> Result<Box<dyn Recognizer>, EngineError> {
        tracing::info!(
            language = %language,
            tag = language::engine_locale(language),
            "loading tesseract engine"
        );
        let recognizer = TesseractRecognizer::new(language, self.datapath.as_deref())?;
        Ok(Box::new(recognizer))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // These touch a real Tesseract install and its traineddata; run with
    // `cargo test -- --ignored` on a machine that has them.

    #[test]
    #[ignore]
    fn builds_an_english_engine() {
        let engine = TesseractRecognizer::new(LanguageCode::En, None).unwrap();
        assert_eq!(engine.engine_tag(), "eng");
        assert_eq!(engine.language(), LanguageCode::En);
    }

    #[test]
    #[ignore]
    fn blank_image_recognizes_to_an_empty_result() {
        let mut engine = TesseractRecognizer::new(LanguageCode::En, None).unwrap();
        let blank = CanonicalImage::from_rgb8(64, 64, vec![255; 64 * 64 * 3]).unwrap();
        let result = engine.recognize(&blank).unwrap();
        assert!(result.is_empty());
        assert_eq!(result.joined(), "");
    }

    #[test]
    fn png_encoding_preserves_dimensions() {
        let image = CanonicalImage::from_rgb8(7, 3, vec![9; 7 * 3 * 3]).unwrap();
        let png = encode_png(&image).unwrap();
        let decoded = image::load_from_memory(&png).unwrap();
        assert_eq!(decoded.width(), 7);
        assert_eq!(decoded.height(), 3);
    }
}
