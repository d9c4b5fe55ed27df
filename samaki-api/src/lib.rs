pub mod config;
pub mod handlers;

use samaki_assistant::engine::AssistantEngine;
use std::sync::Arc;
use std::time::Duration;

/// Wall-clock cap per chat turn.
pub const TURN_TIMEOUT: Duration = Duration::from_secs(30);

/// Shared application state injected into handlers.
pub struct AppState {
    pub engine: Arc<AssistantEngine>,
    pub turn_timeout: Duration,
}

impl AppState {
    pub fn new(engine: Arc<AssistantEngine>) -> Self {
        Self {
            engine,
            turn_timeout: TURN_TIMEOUT,
        }
    }

    pub fn with_turn_timeout(mut self, turn_timeout: Duration) -> Self {
        self.turn_timeout = turn_timeout;
        self
    }
}
