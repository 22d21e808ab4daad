//! `iterthought demo` — run both strategies against the example query.

use anyhow::Context;
use iterthought_agents::{AutonomousLoop, GuidedLoop};
use iterthought_config::AppConfig;

const EXAMPLE_QUERY: &str = "How many r are present in the word Raspberry?";

pub async fn run() -> anyhow::Result<()> {
    let config = AppConfig::load().context("Failed to load config")?;
    let knowledge = config.knowledge_base();

    println!("=== Autonomous Iteration of Thought (AIoT) ===");
    let autonomous = AutonomousLoop::new(super::build_responder(&config), config.loops.max_iterations);
    let outcome = autonomous
        .run(EXAMPLE_QUERY, &knowledge)
        .await
        .context("Autonomous loop failed")?;
    println!("Final response (AIoT): {}\n", outcome.response);

    println!("=== Guided Iteration of Thought (GIoT) ===");
    let guided = GuidedLoop::new(super::build_responder(&config), config.loops.guided_iterations);
    let outcome = guided
        .run(EXAMPLE_QUERY, &knowledge)
        .await
        .context("Guided loop failed")?;
    println!("Final response (GIoT): {}", outcome.response);

    Ok(())
}
