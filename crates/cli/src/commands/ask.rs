//! `iterthought ask` — run one refinement strategy against a query.

use anyhow::Context;
use iterthought_agents::{AutonomousLoop, GuidedLoop};
use iterthought_config::AppConfig;

use crate::Mode;

pub async fn run(
    query: &str,
    mode: Mode,
    max_iterations: Option<u32>,
    iterations: Option<u32>,
) -> anyhow::Result<()> {
    let config = AppConfig::load().context("Failed to load config")?;
    let knowledge = config.knowledge_base();
    let responder = super::build_responder(&config);

    let outcome = match mode {
        Mode::Autonomous => {
            let cap = max_iterations.unwrap_or(config.loops.max_iterations);
            AutonomousLoop::new(responder, cap)
                .run(query, &knowledge)
                .await
                .context("Autonomous loop failed")?
        }
        Mode::Guided => {
            let rounds = iterations.unwrap_or(config.loops.guided_iterations);
            GuidedLoop::new(responder, rounds)
                .run(query, &knowledge)
                .await
                .context("Guided loop failed")?
        }
    };

    tracing::info!(
        rounds = outcome.rounds,
        stopped_by_marker = outcome.stopped_by_marker,
        "Run complete"
    );

    println!("{}", outcome.response);

    Ok(())
}
