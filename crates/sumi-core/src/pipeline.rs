//! Pipeline orchestrator: owns the canonical image, the latest recognition
//! result and the engine handle, and sequences acquisition → normalization →
//! recognition.

use std::sync::Arc;

use sumi_types::{CanonicalImage, ImageInput, LanguageCode, RecognitionResult};

use crate::engine::{Recognizer, RecognizerBuilder};
use crate::error::{EngineError, ImageError, PipelineError};
use crate::normalize;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineState {
    /// No image acquired yet.
    Idle,
    /// A canonical image is present, no result for it yet.
    ImageLoaded,
    /// Image and result both present.
    Recognized,
}

pub struct Pipeline {
    builder: Box<dyn RecognizerBuilder>,
    engine: Box<dyn Recognizer>,
    // Arc'd so preview collaborators can hold a snapshot; only the pipeline
    // ever replaces it.
    image: Option<Arc<CanonicalImage>>,
    result: Option<RecognitionResult>,
}

impl Pipeline {
    pub fn new(
        builder: Box<dyn RecognizerBuilder>,
        language: LanguageCode,
    ) -> Result<Self, EngineError> {
        let engine = builder.build(language)?;
        Ok(Self {
            builder,
            engine,
            image: None,
            result: None,
        })
    }

    pub fn state(&self) -> PipelineState {
        match (&self.image, &self.result) {
            (None, _) => PipelineState::Idle,
            (Some(_), None) => PipelineState::ImageLoaded,
            (Some(_), Some(_)) => PipelineState::Recognized,
        }
    }

    pub fn language(&self) -> LanguageCode {
        self.engine.language()
    }

    pub fn engine_tag(&self) -> &str {
        self.engine.engine_tag()
    }

    pub fn image(&self) -> Option<&CanonicalImage> {
        self.image.as_deref()
    }

    /// Cheap shared handle to the current image, for display snapshots.
    pub fn image_handle(&self) -> Option<Arc<CanonicalImage>> {
        self.image.clone()
    }

    pub fn result(&self) -> Option<&RecognitionResult> {
        self.result.as_ref()
    }

    /// Normalize a raw source and make it the current image, dropping any
    /// prior result. On failure the previous image and result are untouched.
    pub fn acquire(&mut self, input: ImageInput) -> Result<(), ImageError> {
        let image = normalize::normalize(input)?;
        tracing::debug!(
            width = image.width(),
            height = image.height(),
            "image acquired"
        );
        self.image = Some(Arc::new(image));
        self.result = None;
        Ok(())
    }

    /// Run recognition on the current image, replacing any prior result.
    /// With no image present this is a no-op: `Ok(None)`, nothing changes.
    pub fn recognize(&mut self) -> Result<Option<&RecognitionResult>, EngineError> {
        let Some(image) = self.image.as_deref() else {
            return Ok(None);
        };
        let result = self.engine.recognize(image)?;
        tracing::debug!(lines = result.lines().len(), "recognition finished");
        self.result = Some(result);
        Ok(self.result.as_ref())
    }

    /// The one entry point every acquisition source goes through:
    /// acquisition auto-triggers recognition.
    pub fn acquire_and_recognize(&mut self, input: ImageInput) -> Result<(), PipelineError> {
        self.acquire(input)?;
        self.recognize()?;
        Ok(())
    }

    /// Switch the engine to `language`. Same-code switches are idempotent
    /// and skip the rebuild (`Ok(false)`). The new handle is fully
    /// constructed before the old one is dropped; on failure the old handle
    /// stays in place.
    pub fn set_language(&mut self, language: LanguageCode) -> Result<bool, EngineError> {
        if self.engine.language() == language {
            return Ok(false);
        }
        let next = self.builder.build(language)?;
        self.engine = next;
        tracing::info!(language = %language, tag = self.engine.engine_tag(), "engine rebuilt");
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use sumi_types::ImageInput;

    use super::*;
    use crate::language;

    /// Fake engine: one line naming the image dimensions and the engine's
    /// locale tag, so results are attributable to both image and engine.
    struct FakeRecognizer {
        language: LanguageCode,
        tag: String,
    }

    impl Recognizer for FakeRecognizer {
        fn language(&self) -> LanguageCode {
            self.language
        }

        fn engine_tag(&self) -> &str {
            &self.tag
        }

        fn recognize(&mut self, image: &CanonicalImage) -> Result<RecognitionResult, EngineError> {
            if image.width() == 1 {
                // 1-pixel-wide images stand in for "no text detected".
                return Ok(RecognitionResult::default());
            }
            Ok(RecognitionResult::new(vec![format!(
                "{}x{} {}",
                image.width(),
                image.height(),
                self.tag
            )]))
        }
    }

    #[derive(Default)]
    struct FakeBuilder {
        builds: Arc<AtomicUsize>,
        fail: bool,
    }

    impl RecognizerBuilder for FakeBuilder {
        fn build(&self, language: LanguageCode) -> Result<Box<dyn Recognizer>, EngineError> {
            if self.fail {
                return Err(EngineError::Init {
                    language,
                    tag: language::engine_locale(language).to_string(),
                    reason: "traineddata missing".into(),
                });
            }
            self.builds.fetch_add(1, Ordering::SeqCst);
            Ok(Box::new(FakeRecognizer {
                language,
                tag: language::engine_locale(language).to_string(),
            }))
        }
    }

    fn pipeline() -> (Pipeline, Arc<AtomicUsize>) {
        let builds = Arc::new(AtomicUsize::new(0));
        let builder = FakeBuilder {
            builds: builds.clone(),
            fail: false,
        };
        let pipeline = Pipeline::new(Box::new(builder), LanguageCode::En).unwrap();
        (pipeline, builds)
    }

    fn png(width: u32, height: u32) -> Vec<u8> {
        let image = image::RgbImage::from_pixel(width, height, image::Rgb([0, 0, 0]));
        let mut bytes = Vec::new();
        image
            .write_to(&mut Cursor::new(&mut bytes), image::ImageFormat::Png)
            .unwrap();
        bytes
    }

    #[test]
    fn starts_idle_and_recognize_is_a_no_op() {
        let (mut pipeline, _) = pipeline();
        assert_eq!(pipeline.state(), PipelineState::Idle);

        let result = pipeline.recognize().unwrap();
        assert!(result.is_none());
        assert_eq!(pipeline.state(), PipelineState::Idle);
    }

    #[test]
    fn acquisition_then_recognition_walks_the_states() {
        let (mut pipeline, _) = pipeline();

        pipeline.acquire(ImageInput::Encoded(png(8, 4))).unwrap();
        assert_eq!(pipeline.state(), PipelineState::ImageLoaded);

        pipeline.recognize().unwrap();
        assert_eq!(pipeline.state(), PipelineState::Recognized);
        assert_eq!(pipeline.result().unwrap().joined(), "8x4 eng");
    }

    #[test]
    fn acquire_and_recognize_lands_in_recognized() {
        let (mut pipeline, _) = pipeline();
        pipeline
            .acquire_and_recognize(ImageInput::Encoded(png(8, 4)))
            .unwrap();
        assert_eq!(pipeline.state(), PipelineState::Recognized);
    }

    #[test]
    fn new_image_supersedes_prior_result_completely() {
        let (mut pipeline, _) = pipeline();
        pipeline
            .acquire_and_recognize(ImageInput::Encoded(png(8, 4)))
            .unwrap();
        let first = pipeline.result().unwrap().joined();

        pipeline
            .acquire_and_recognize(ImageInput::Encoded(png(6, 2)))
            .unwrap();
        let second = pipeline.result().unwrap();

        assert_eq!(pipeline.state(), PipelineState::Recognized);
        assert_eq!(second.joined(), "6x2 eng");
        assert!(!second.lines().iter().any(|line| *line == first));
    }

    #[test]
    fn acquisition_alone_clears_the_result() {
        let (mut pipeline, _) = pipeline();
        pipeline
            .acquire_and_recognize(ImageInput::Encoded(png(8, 4)))
            .unwrap();

        pipeline.acquire(ImageInput::Encoded(png(6, 2))).unwrap();
        assert_eq!(pipeline.state(), PipelineState::ImageLoaded);
        assert!(pipeline.result().is_none());
    }

    #[test]
    fn failed_acquisition_leaves_everything_untouched() {
        let (mut pipeline, _) = pipeline();
        pipeline
            .acquire_and_recognize(ImageInput::Encoded(png(8, 4)))
            .unwrap();

        let err = pipeline
            .acquire_and_recognize(ImageInput::Encoded(b"garbage".to_vec()))
            .unwrap_err();
        assert!(matches!(err, PipelineError::Image(_)));
        assert_eq!(pipeline.state(), PipelineState::Recognized);
        assert_eq!(pipeline.result().unwrap().joined(), "8x4 eng");
        assert_eq!(pipeline.image().unwrap().width(), 8);
    }

    #[test]
    fn no_detected_text_is_an_empty_result_not_an_error() {
        let (mut pipeline, _) = pipeline();
        pipeline
            .acquire_and_recognize(ImageInput::Encoded(png(1, 4)))
            .unwrap();

        assert_eq!(pipeline.state(), PipelineState::Recognized);
        let result = pipeline.result().unwrap();
        assert!(result.is_empty());
        assert_eq!(result.joined(), "");
    }

    #[test]
    fn recognition_is_idempotent_per_image() {
        let (mut pipeline, _) = pipeline();
        pipeline
            .acquire_and_recognize(ImageInput::Encoded(png(8, 4)))
            .unwrap();
        let first = pipeline.result().unwrap().clone();

        pipeline.recognize().unwrap();
        assert_eq!(pipeline.state(), PipelineState::Recognized);
        assert_eq!(*pipeline.result().unwrap(), first);
    }

    #[test]
    fn language_switch_rebuilds_the_handle() {
        let (mut pipeline, builds) = pipeline();
        assert_eq!(builds.load(Ordering::SeqCst), 1);
        assert_eq!(pipeline.engine_tag(), "eng");

        assert!(pipeline.set_language(LanguageCode::Ja).unwrap());
        assert_eq!(pipeline.language(), LanguageCode::Ja);
        assert_eq!(pipeline.engine_tag(), "jpn");
        assert_eq!(builds.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn same_language_switch_is_idempotent() {
        let (mut pipeline, builds) = pipeline();
        assert!(!pipeline.set_language(LanguageCode::En).unwrap());
        assert_eq!(builds.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn language_switch_does_not_touch_pipeline_state() {
        let (mut pipeline, _) = pipeline();
        pipeline
            .acquire_and_recognize(ImageInput::Encoded(png(8, 4)))
            .unwrap();

        pipeline.set_language(LanguageCode::Ja).unwrap();
        // The old-language result stays until recognition is re-requested.
        assert_eq!(pipeline.state(), PipelineState::Recognized);
        assert_eq!(pipeline.result().unwrap().joined(), "8x4 eng");

        pipeline.recognize().unwrap();
        assert_eq!(pipeline.result().unwrap().joined(), "8x4 jpn");
    }

    #[test]
    fn failed_rebuild_keeps_the_old_handle() {
        let (mut pipeline, _) = pipeline();
        pipeline
            .acquire_and_recognize(ImageInput::Encoded(png(8, 4)))
            .unwrap();

        // Swap in a builder that always fails, then try to switch.
        pipeline.builder = Box::new(FakeBuilder {
            builds: Arc::new(AtomicUsize::new(0)),
            fail: true,
        });
        let err = pipeline.set_language(LanguageCode::Ja).unwrap_err();
        assert!(matches!(err, EngineError::Init { .. }));

        assert_eq!(pipeline.language(), LanguageCode::En);
        assert_eq!(pipeline.engine_tag(), "eng");
        // Still fully usable.
        pipeline.recognize().unwrap();
        assert_eq!(pipeline.result().unwrap().joined(), "8x4 eng");
    }
}
