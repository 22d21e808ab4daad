//! CLI command implementations.

pub mod ask;
pub mod demo;
pub mod onboard;

use std::sync::Arc;

use iterthought_agents::ResponseAgent;
use iterthought_backend::OllamaClient;
use iterthought_config::AppConfig;

/// Build a response agent wired to the configured backend.
pub(crate) fn build_responder(config: &AppConfig) -> ResponseAgent {
    let client = Arc::new(OllamaClient::from_config(&config.backend));
    ResponseAgent::new(client, &config.backend.model)
}
