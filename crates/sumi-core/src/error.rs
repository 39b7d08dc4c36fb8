use sumi_types::LanguageCode;
use thiserror::Error;

/// Acquisition/normalization failure. Recoverable: the pipeline keeps its
/// previous image and result.
#[derive(Debug, Error)]
pub enum ImageError {
    #[error("unreadable image: {reason}")]
    Unreadable { reason: String },
}

impl ImageError {
    pub fn unreadable(reason: impl Into<String>) -> Self {
        Self::Unreadable {
            reason: reason.into(),
        }
    }
}

/// Engine construction or recognition failure. Recoverable for that
/// operation: the prior engine handle stays usable.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("failed to initialize \"{language}\" engine (locale \"{tag}\"): {reason}")]
    Init {
        language: LanguageCode,
        tag: String,
        reason: String,
    },
    #[error("recognition failed: {reason}")]
    Recognize { reason: String },
}

/// Either half of an acquire-then-recognize step.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error(transparent)]
    Image(#[from] ImageError),
    #[error(transparent)]
    Engine(#[from] EngineError),
}
