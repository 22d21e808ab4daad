//! The iteration-of-thought refinement loops — the heart of iterthought.
//!
//! Two control strategies over a generative backend:
//!
//! 1. **Autonomous** ([`AutonomousLoop`]) — the model decides when to
//!    stop by emitting a stop marker; an iteration cap bounds the run.
//! 2. **Guided** ([`GuidedLoop`]) — a fixed number of refinement rounds
//!    followed by one mandatory forced-answer round.
//!
//! Both strategies drive the same two agents: the response agent sends a
//! composed prompt to the backend, and the refinement agent turns the
//! prior response into the next instruction. Execution is strictly
//! sequential — each backend call is fully drained before the next step.

pub mod autonomous;
pub mod guided;
pub mod refine;
pub mod respond;

pub use autonomous::AutonomousLoop;
pub use guided::{GuidedLoop, FINAL_ANSWER_INSTRUCTION};
pub use refine::RefinementAgent;
pub use respond::ResponseAgent;

/// The instruction used for the first backend call of either loop.
pub const SEED_PROMPT: &str = "Provide a detailed answer to the following question.";

#[cfg(test)]
pub(crate) mod test_helpers;
