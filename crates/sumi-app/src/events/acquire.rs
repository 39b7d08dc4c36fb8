use std::sync::Arc;

use kanal::AsyncSender;
use sumi_core::error::PipelineError;
use sumi_types::{AppEvent, CanonicalImage, ImageInput};

use crate::state::AppState;

/// Snapshot taken under the pipeline lock after the blocking step, so events
/// can be emitted without holding it.
struct Acquired {
    outcome: Result<(), PipelineError>,
    image: Option<Arc<CanonicalImage>>,
    text: Option<String>,
}

/// The single acquire-then-recognize entry every acquisition source calls.
/// Normalization and recognition run on the blocking pool; a result that a
/// newer request superseded while it was in flight is dropped, not shown.
pub async fn handle_acquire(
    state: &Arc<AppState>,
    input: ImageInput,
    display_tx: &AsyncSender<AppEvent>,
) -> anyhow::Result<()> {
    let ticket = state.next_generation();

    let worker_state = Arc::clone(state);
    let acquired = tokio::task::spawn_blocking(move || {
        let mut pipeline = worker_state.pipeline.lock();
        let outcome = pipeline.acquire_and_recognize(input);
        Acquired {
            image: pipeline.image_handle(),
            text: pipeline.result().map(|r| r.joined()),
            outcome,
        }
    })
    .await?;

    if state.is_stale(ticket) {
        tracing::debug!("acquisition superseded while in flight; dropping result");
        return Ok(());
    }

    match acquired.outcome {
        Ok(()) => {
            if let Some(image) = acquired.image {
                display_tx.send(AppEvent::ImageLoaded(image)).await?;
            }
            display_tx
                .send(AppEvent::ShowText(acquired.text.unwrap_or_default()))
                .await?;
        }
        Err(PipelineError::Image(err)) => {
            // The prior image and result are untouched; the snapshot above
            // describes them, so nothing is re-emitted.
            tracing::warn!("acquisition failed: {err}");
            display_tx
                .send(AppEvent::Status {
                    message: err.to_string(),
                })
                .await?;
        }
        Err(PipelineError::Engine(err)) => {
            // The new image did load; only recognition failed.
            tracing::error!("recognition failed: {err}");
            if let Some(image) = acquired.image {
                display_tx.send(AppEvent::ImageLoaded(image)).await?;
            }
            display_tx
                .send(AppEvent::Status {
                    message: err.to_string(),
                })
                .await?;
        }
    }

    Ok(())
}
