use std::sync::Arc;

use kanal::AsyncSender;
use sumi_io::clipboard::{self, ClipboardPayload};
use sumi_types::{AppEvent, ImageInput};

use crate::state::AppState;

use super::acquire::handle_acquire;

/// Read the clipboard and funnel whatever it holds into the acquisition
/// path. An image wins over a path list; the first path of a list is used.
pub async fn handle_paste(
    state: &Arc<AppState>,
    display_tx: &AsyncSender<AppEvent>,
) -> anyhow::Result<()> {
    let payload = tokio::task::spawn_blocking(clipboard::read_payload).await?;

    match payload {
        Ok(Some(ClipboardPayload::Image(bitmap))) => {
            handle_acquire(state, ImageInput::Native(bitmap), display_tx).await
        }
        Ok(Some(ClipboardPayload::Paths(paths))) => match paths.into_iter().next() {
            Some(path) => handle_acquire(state, ImageInput::Path(path), display_tx).await,
            None => Ok(()),
        },
        Ok(None) => {
            tracing::debug!("clipboard holds neither an image nor file paths");
            display_tx
                .send(AppEvent::Status {
                    message: "clipboard has no image".into(),
                })
                .await?;
            Ok(())
        }
        Err(err) => {
            tracing::warn!("clipboard read failed: {err:#}");
            display_tx
                .send(AppEvent::Status {
                    message: format!("clipboard unavailable: {err}"),
                })
                .await?;
            Ok(())
        }
    }
}
