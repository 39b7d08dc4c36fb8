use std::sync::Arc;

use kanal::AsyncSender;
use sumi_types::AppEvent;

use crate::state::AppState;

pub async fn handle_show_info(
    state: &Arc<AppState>,
    display_tx: &AsyncSender<AppEvent>,
) -> anyhow::Result<()> {
    let (title, body) = {
        let registry = state.registry.read().await;
        let strings = registry.current_strings();
        (strings.info_title.clone(), strings.dependencies_info.clone())
    };

    display_tx.send(AppEvent::Info { title, body }).await?;
    Ok(())
}
