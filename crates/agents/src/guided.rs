//! The guided iteration loop (GIoT) — a fixed round count, no policy.
//!
//! Seed round, `iterations - 1` middle refinement rounds, then one
//! mandatory closing round whose instruction demands a final answer.
//! The closing round always executes, so the minimum is two backend
//! calls regardless of the configured count.

use iterthought_core::error::BackendError;
use iterthought_core::knowledge::KnowledgeBase;
use iterthought_core::outcome::IterationOutcome;
use tracing::{debug, info};

use crate::refine::RefinementAgent;
use crate::respond::ResponseAgent;
use crate::SEED_PROMPT;

/// Appended to the closing round's refinement instruction.
pub const FINAL_ANSWER_INSTRUCTION: &str = "\n\nPlease provide your final answer.";

/// Drives a fixed number of refinement rounds plus a forced-answer round.
pub struct GuidedLoop {
    responder: ResponseAgent,
    refiner: RefinementAgent,
    iterations: u32,
}

impl GuidedLoop {
    /// Create a loop performing `iterations` total rounds before the
    /// closing round. `iterations <= 1` skips the middle rounds.
    pub fn new(responder: ResponseAgent, iterations: u32) -> Self {
        Self {
            responder,
            refiner: RefinementAgent::new(),
            iterations,
        }
    }

    /// Run the fixed pipeline for one query.
    pub async fn run(
        &self,
        query: &str,
        knowledge: &KnowledgeBase,
    ) -> Result<IterationOutcome, BackendError> {
        info!(iterations = self.iterations, "Guided loop: seed round");

        let mut response = self.responder.respond(query, SEED_PROMPT, knowledge).await?;
        let mut rounds: u32 = 0;

        for round in 1..self.iterations {
            debug!(round, "Guided loop: refinement round");

            let instruction = self.refiner.refine(query, &response);
            response = self.responder.respond(query, &instruction, knowledge).await?;
            rounds += 1;
        }

        // Closing round: always executes, regardless of content
        debug!("Guided loop: closing round");
        let instruction = format!(
            "{}{}",
            self.refiner.refine(query, &response),
            FINAL_ANSWER_INSTRUCTION
        );
        response = self.responder.respond(query, &instruction, knowledge).await?;
        rounds += 1;

        info!(rounds, "Guided loop: complete");

        Ok(IterationOutcome {
            response,
            rounds,
            stopped_by_marker: false,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::SequentialMockGenerator;
    use std::sync::Arc;

    fn guided(backend: Arc<SequentialMockGenerator>, iterations: u32) -> GuidedLoop {
        GuidedLoop::new(ResponseAgent::new(backend, "mock-model"), iterations)
    }

    #[tokio::test]
    async fn three_iterations_is_four_calls() {
        let backend = Arc::new(SequentialMockGenerator::repeating("draft"));
        let outcome = guided(backend.clone(), 3)
            .run("q", &KnowledgeBase::new())
            .await
            .unwrap();

        // seed + 2 middle refinement rounds + closing
        assert_eq!(backend.call_count(), 4);
        assert_eq!(outcome.rounds, 3);
        assert!(!outcome.stopped_by_marker);
    }

    #[tokio::test]
    async fn one_iteration_is_two_calls() {
        let backend = Arc::new(SequentialMockGenerator::repeating("draft"));
        guided(backend.clone(), 1)
            .run("q", &KnowledgeBase::new())
            .await
            .unwrap();

        assert_eq!(backend.call_count(), 2);
    }

    #[tokio::test]
    async fn zero_iterations_still_two_calls() {
        let backend = Arc::new(SequentialMockGenerator::repeating("draft"));
        let outcome = guided(backend.clone(), 0)
            .run("q", &KnowledgeBase::new())
            .await
            .unwrap();

        assert_eq!(backend.call_count(), 2);
        assert_eq!(outcome.rounds, 1);
    }

    #[tokio::test]
    async fn closing_instruction_demands_final_answer() {
        let backend = Arc::new(SequentialMockGenerator::repeating("draft"));
        guided(backend.clone(), 3)
            .run("why?", &KnowledgeBase::new())
            .await
            .unwrap();

        let prompts = backend.prompts();
        let closing = prompts.last().unwrap();

        // The instruction half of the composite prompt ends with the
        // forced-answer demand; the question label follows it.
        let (instruction, _) = closing.split_once("\n\nQuestion:").unwrap();
        assert!(instruction.ends_with("Please provide your final answer."));
        assert!(instruction.starts_with("Please refine your previous answer: 'draft'"));

        // Middle rounds never demand a final answer
        for prompt in &prompts[..prompts.len() - 1] {
            assert!(!prompt.contains("Please provide your final answer."));
        }
    }

    #[tokio::test]
    async fn result_is_closing_round_response() {
        let backend = Arc::new(SequentialMockGenerator::new(vec![
            "seed response".into(),
            "closing response".into(),
        ]));
        let outcome = guided(backend, 1)
            .run("q", &KnowledgeBase::new())
            .await
            .unwrap();

        assert_eq!(outcome.response, "closing response");
    }

    #[tokio::test]
    async fn marker_in_middle_round_does_not_stop() {
        // No policy is consulted: the pipeline runs to the closing round
        // even when a response already carries the marker.
        let backend = Arc::new(SequentialMockGenerator::new(vec![
            "Final Answer: early".into(),
            "middle".into(),
            "middle again".into(),
            "closing".into(),
        ]));
        let outcome = guided(backend.clone(), 3)
            .run("q", &KnowledgeBase::new())
            .await
            .unwrap();

        assert_eq!(backend.call_count(), 4);
        assert_eq!(outcome.response, "closing");
    }

    #[tokio::test]
    async fn backend_error_propagates() {
        let backend = Arc::new(SequentialMockGenerator::failing("connection refused"));
        let result = guided(backend, 3).run("q", &KnowledgeBase::new()).await;
        assert!(result.is_err());
    }
}
