use std::sync::Arc;

use kanal::{AsyncReceiver, AsyncSender};
use sumi_types::AppEvent;
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;

use crate::display::display_loop;
use crate::events::event_loop;
use crate::io::watcher_io;
use crate::state::AppState;

/// Centralized channel management
pub struct ChannelSet {
    pub frontend_to_app: (AsyncSender<AppEvent>, AsyncReceiver<AppEvent>),
    pub app_to_display: (AsyncSender<AppEvent>, AsyncReceiver<AppEvent>),
}

impl ChannelSet {
    pub fn new() -> Self {
        Self {
            frontend_to_app: kanal::bounded_async(64), // user commands
            app_to_display: kanal::bounded_async(256), // recognition output bursts
        }
    }
}

/// Application controller for task spawning and lifecycle
pub struct AppController {
    channels: ChannelSet,
    state: Arc<AppState>,
    cancel_token: CancellationToken,
}

impl AppController {
    pub fn new(state: Arc<AppState>) -> Self {
        Self {
            channels: ChannelSet::new(),
            state,
            cancel_token: CancellationToken::new(),
        }
    }

    /// Queue an event as if the frontend had sent it. Used to seed startup
    /// work (initial language announcement, `--image`).
    pub async fn submit(&self, event: AppEvent) {
        if let Err(e) = self.channels.frontend_to_app.0.send(event).await {
            tracing::error!("failed to queue startup event: {e}");
        }
    }

    pub fn spawn_tasks(&self) -> JoinSet<anyhow::Result<()>> {
        let mut tasks = JoinSet::new();

        // Event loop
        tasks.spawn(event_loop(
            self.state.clone(),
            self.channels.frontend_to_app.1.clone(),
            self.channels.app_to_display.0.clone(),
        ));

        // Display collaborator loop
        tasks.spawn(display_loop(
            self.channels.app_to_display.1.clone(),
            self.state.config.clone(),
        ));

        // Terminal command watcher
        tasks.spawn(watcher_io(
            self.channels.frontend_to_app.0.clone(),
            self.cancel_token.child_token(),
        ));

        tasks
    }

    pub fn shutdown(&self) {
        self.cancel_token.cancel();
    }
}
