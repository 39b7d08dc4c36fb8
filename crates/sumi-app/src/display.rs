use std::sync::Arc;

use kanal::AsyncReceiver;
use tokio::sync::RwLock;

use sumi_config::Config;
use sumi_core::language;
use sumi_types::AppEvent;

/// Stand-in for the widget layer: renders display-bound events to stdout.
/// The preview surface gets dimensions, the text surface the joined result,
/// and status lines are gated by config.
pub async fn display_loop(
    display_rx: AsyncReceiver<AppEvent>,
    config: Arc<RwLock<Config>>,
) -> anyhow::Result<()> {
    loop {
        let event = display_rx.recv().await?;
        match event {
            AppEvent::Shutdown => return Ok(()),
            AppEvent::ImageLoaded(image) => {
                // A widget surface would scale and paint the bitmap; the
                // terminal announces its dimensions.
                println!("[image {}x{}]", image.width(), image.height());
            }
            AppEvent::ShowText(text) => {
                println!("{text}");
            }
            AppEvent::LanguageChanged { code, strings } => {
                println!("[language: {} {}]", code, language::native_name(code));
                println!("{}", strings.drag_drop);
            }
            AppEvent::Status { message } => {
                if config.read().await.ui.status_messages {
                    println!("[{message}]");
                }
            }
            AppEvent::Info { title, body } => {
                println!("== {title} ==");
                println!("{body}");
            }
            other => {
                tracing::debug!(event = ?other, "frontend event on the display channel, ignoring");
            }
        }
    }
}
