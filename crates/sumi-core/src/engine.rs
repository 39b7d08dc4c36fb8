//! The engine handle seam. The pipeline owns recognizers only through these
//! traits so the orchestrator is testable without a live Tesseract install.

use sumi_types::{CanonicalImage, LanguageCode, RecognitionResult};

use crate::error::EngineError;

/// One live recognition-engine instance bound to the language it was built
/// with. Instances are never reconfigured in place; a language change means a
/// new instance.
pub trait Recognizer: Send {
    /// The language code the instance was constructed for.
    fn language(&self) -> LanguageCode;

    /// The engine-native locale tag the instance was constructed with
    /// (e.g. "jpn" for a Tesseract Japanese engine).
    fn engine_tag(&self) -> &str;

    /// Run recognition and return the detected lines in the engine's own
    /// order. Zero lines is a valid result.
    fn recognize(&mut self, image: &CanonicalImage) -> Result<RecognitionResult, EngineError>;
}

/// Constructs engine handles. Construction is expensive (traineddata
/// loading), so callers build once per language and reuse the handle.
pub trait RecognizerBuilder: Send + Sync {
    fn build(&self, language: LanguageCode) -> Result<Box<dyn Recognizer>, EngineError>;
}
