use std::sync::Arc;

use kanal::AsyncSender;
use sumi_io::clipboard;
use sumi_types::AppEvent;

use crate::state::AppState;

/// Copy the caller's selection, or the full recognized text when there is no
/// selection. Confirms with the localized `text_copied` status.
pub async fn handle_copy(
    state: &Arc<AppState>,
    selection: Option<String>,
    display_tx: &AsyncSender<AppEvent>,
) -> anyhow::Result<()> {
    let text = match selection {
        Some(selection) => selection,
        None => {
            let pipeline = state.pipeline.lock();
            match pipeline.result() {
                Some(result) => result.joined(),
                None => {
                    tracing::debug!("copy requested before any recognition");
                    return Ok(());
                }
            }
        }
    };

    let copied = tokio::task::spawn_blocking(move || clipboard::copy_text(&text)).await?;
    match copied {
        Ok(()) => {
            let message = state.registry.read().await.current_strings().text_copied.clone();
            display_tx.send(AppEvent::Status { message }).await?;
        }
        Err(err) => {
            tracing::warn!("clipboard write failed: {err:#}");
            display_tx
                .send(AppEvent::Status {
                    message: format!("copy failed: {err}"),
                })
                .await?;
        }
    }

    Ok(())
}
