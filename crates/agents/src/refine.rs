//! RefinementAgent — turns the prior response into the next instruction.

/// Produces the refinement instruction for the next round.
///
/// A pure function of its two inputs: no side effects, no backend call.
#[derive(Debug, Clone, Copy, Default)]
pub struct RefinementAgent;

impl RefinementAgent {
    pub fn new() -> Self {
        Self
    }

    /// Build the instruction asking the backend to improve on
    /// `last_response` for `query`.
    pub fn refine(&self, query: &str, last_response: &str) -> String {
        format!(
            "Please refine your previous answer: '{last_response}' \
             considering any missing details for the question: '{query}'."
        )
    }
}
