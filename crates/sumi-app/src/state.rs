use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use parking_lot::Mutex;
use tokio::sync::RwLock;

use sumi_config::Config;
use sumi_core::language::LanguageRegistry;
use sumi_core::pipeline::Pipeline;

pub struct AppState {
    pub config: Arc<RwLock<Config>>,
    pub registry: RwLock<LanguageRegistry>,
    /// The pipeline mutex is the single serialization point for recognition
    /// and engine rebuilds; both happen on the blocking pool.
    pub pipeline: Mutex<Pipeline>,
    generation: AtomicU64,
}

impl AppState {
    pub fn new(config: Config, registry: LanguageRegistry, pipeline: Pipeline) -> Self {
        Self {
            config: Arc::new(RwLock::new(config)),
            registry: RwLock::new(registry),
            pipeline: Mutex::new(pipeline),
            generation: AtomicU64::new(0),
        }
    }

    /// Take the ticket for a new acquisition/recognition request. Issuing a
    /// ticket supersedes every earlier one.
    pub fn next_generation(&self) -> u64 {
        self.generation.fetch_add(1, Ordering::SeqCst) + 1
    }

    /// True when a newer request superseded `ticket`; its result must be
    /// dropped, not displayed.
    pub fn is_stale(&self, ticket: u64) -> bool {
        self.generation.load(Ordering::SeqCst) != ticket
    }
}
