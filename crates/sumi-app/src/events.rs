use std::sync::Arc;

use kanal::{AsyncReceiver, AsyncSender};
use sumi_types::{AppEvent, DropPayload, ImageInput};

use crate::state::AppState;

pub mod acquire;
pub mod change_language;
pub mod copy_text;
pub mod paste;
pub mod recognize;
pub mod show_info;

use acquire::handle_acquire;
use change_language::handle_change_language;
use copy_text::handle_copy;
use paste::handle_paste;
use recognize::handle_recognize;
use show_info::handle_show_info;

/// App's main loop
pub async fn event_loop(
    state: Arc<AppState>,
    frontend_rx: AsyncReceiver<AppEvent>,
    display_tx: AsyncSender<AppEvent>,
) -> anyhow::Result<()> {
    tracing::info!("event loop started");
    loop {
        let event = frontend_rx.recv().await?;
        if matches!(event, AppEvent::Shutdown) {
            // Cascade so the display loop drains its queue and stops too.
            let _ = display_tx.send(AppEvent::Shutdown).await;
            return Ok(());
        }
        handle_event(&state, event, &display_tx).await?;
    }
}

pub(crate) async fn handle_event(
    state: &Arc<AppState>,
    event: AppEvent,
    display_tx: &AsyncSender<AppEvent>,
) -> anyhow::Result<()> {
    match event {
        AppEvent::OpenImage(path) => {
            handle_acquire(state, ImageInput::Path(path), display_tx).await
        }
        AppEvent::PasteClipboard => handle_paste(state, display_tx).await,
        AppEvent::DropImage(DropPayload::Bytes(bytes)) => {
            handle_acquire(state, ImageInput::Encoded(bytes), display_tx).await
        }
        AppEvent::DropImage(DropPayload::Paths(paths)) => match paths.into_iter().next() {
            Some(path) => handle_acquire(state, ImageInput::Path(path), display_tx).await,
            None => {
                tracing::warn!("drop payload carried no files");
                Ok(())
            }
        },
        AppEvent::Recognize => handle_recognize(state, display_tx).await,
        AppEvent::ChangeLanguage(code) => handle_change_language(state, code, display_tx).await,
        AppEvent::CopyText { selection } => handle_copy(state, selection, display_tx).await,
        AppEvent::ShowInfo => handle_show_info(state, display_tx).await,
        // Handled by the loop itself.
        AppEvent::Shutdown => Ok(()),
        other => {
            tracing::debug!(event = ?other, "display-bound event on the app channel, ignoring");
            Ok(())
        }
    }
}
