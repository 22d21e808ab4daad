//! The autonomous iteration loop (AIoT) — the model decides when to stop.
//!
//! State machine: Initial → Iterating → Stopped.
//!
//! - **Initial**: seed prompt, one response, policy check, counter = 1
//! - **Iterating**: while the policy says continue and the counter is
//!   within the cap, refine and respond again
//! - **Stopped**: the last response is returned, whether or not it
//!   carries the stop marker

use std::sync::Arc;

use iterthought_core::error::BackendError;
use iterthought_core::knowledge::KnowledgeBase;
use iterthought_core::outcome::IterationOutcome;
use iterthought_core::stopping::{MarkerStopPolicy, StopPolicy};
use tracing::{debug, info, warn};

use crate::refine::RefinementAgent;
use crate::respond::ResponseAgent;
use crate::SEED_PROMPT;

/// Drives refinement until the stopping policy fires or the cap is hit.
pub struct AutonomousLoop {
    responder: ResponseAgent,
    refiner: RefinementAgent,
    policy: Arc<dyn StopPolicy>,
    max_iterations: u32,
}

impl AutonomousLoop {
    /// Create a loop with the default marker stopping policy.
    ///
    /// `max_iterations = 0` disables refinement entirely: only the seed
    /// response is produced.
    pub fn new(responder: ResponseAgent, max_iterations: u32) -> Self {
        Self {
            responder,
            refiner: RefinementAgent::new(),
            policy: Arc::new(MarkerStopPolicy),
            max_iterations,
        }
    }

    /// Replace the stopping policy.
    pub fn with_policy(mut self, policy: Arc<dyn StopPolicy>) -> Self {
        self.policy = policy;
        self
    }

    /// Run the loop to completion for one query.
    pub async fn run(
        &self,
        query: &str,
        knowledge: &KnowledgeBase,
    ) -> Result<IterationOutcome, BackendError> {
        info!(max_iterations = self.max_iterations, "Autonomous loop: seed round");

        let mut response = self.responder.respond(query, SEED_PROMPT, knowledge).await?;
        let mut stop = self.policy.should_stop(&response);
        let mut iteration: u32 = 1;
        let mut rounds: u32 = 0;

        while !stop && iteration <= self.max_iterations {
            debug!(iteration, "Autonomous loop: refinement round");

            let instruction = self.refiner.refine(query, &response);
            response = self.responder.respond(query, &instruction, knowledge).await?;
            stop = self.policy.should_stop(&response);
            iteration += 1;
            rounds += 1;
        }

        if stop {
            info!(rounds, "Autonomous loop: stop marker emitted");
        } else {
            warn!(rounds, "Autonomous loop: iteration cap reached without stop marker");
        }

        Ok(IterationOutcome {
            response,
            rounds,
            stopped_by_marker: stop,
        })
    }
}
