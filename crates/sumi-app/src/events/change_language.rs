use std::sync::Arc;

use kanal::AsyncSender;
use sumi_types::{AppEvent, LanguageCode};

use crate::state::AppState;

/// One atomic configuration change: rebuild the engine for `code`, then move
/// the registry selection and refresh the translated strings. If the rebuild
/// fails, selection, strings and the old engine all stay as they were.
pub async fn handle_change_language(
    state: &Arc<AppState>,
    code: LanguageCode,
    display_tx: &AsyncSender<AppEvent>,
) -> anyhow::Result<()> {
    let worker_state = Arc::clone(state);
    let outcome = tokio::task::spawn_blocking(move || {
        let mut pipeline = worker_state.pipeline.lock();
        pipeline.set_language(code)
    })
    .await?;

    match outcome {
        Ok(rebuilt) => {
            let strings = {
                let mut registry = state.registry.write().await;
                registry.set_current(code);
                registry.current_strings().clone()
            };
            if rebuilt {
                tracing::info!(language = %code, "language changed");
            }
            display_tx
                .send(AppEvent::LanguageChanged { code, strings })
                .await?;
        }
        Err(err) => {
            tracing::warn!("language switch failed: {err}");
            display_tx
                .send(AppEvent::Status {
                    message: err.to_string(),
                })
                .await?;
        }
    }

    Ok(())
}
