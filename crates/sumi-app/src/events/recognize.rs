use std::sync::Arc;

use kanal::AsyncSender;
use sumi_types::AppEvent;

use crate::state::AppState;

/// Re-run recognition on the current image. Without an image this is a
/// no-op: no result, no state change, nothing displayed.
pub async fn handle_recognize(
    state: &Arc<AppState>,
    display_tx: &AsyncSender<AppEvent>,
) -> anyhow::Result<()> {
    {
        let pipeline = state.pipeline.lock();
        if pipeline.image().is_none() {
            tracing::debug!("recognition requested without an image");
            return Ok(());
        }
    }

    let ticket = state.next_generation();
    let worker_state = Arc::clone(state);
    let outcome = tokio::task::spawn_blocking(move || {
        let mut pipeline = worker_state.pipeline.lock();
        pipeline
            .recognize()
            .map(|result| result.map(|r| r.joined()))
    })
    .await?;

    if state.is_stale(ticket) {
        tracing::debug!("recognition superseded while in flight; dropping result");
        return Ok(());
    }

    match outcome {
        Ok(Some(text)) => {
            display_tx.send(AppEvent::ShowText(text)).await?;
        }
        Ok(None) => {
            // Presence was checked above and images are only ever replaced,
            // never removed; this arm is unreachable in practice.
        }
        Err(err) => {
            tracing::error!("recognition failed: {err}");
            display_tx
                .send(AppEvent::Status {
                    message: err.to_string(),
                })
                .await?;
        }
    }

    Ok(())
}
