//! IterationOutcome — the result of running one refinement loop.

use serde::{Deserialize, Serialize};

/// What a loop run produced and how it got there.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IterationOutcome {
    /// The last response the backend produced.
    ///
    /// May or may not contain the stop marker if the iteration cap was
    /// hit first.
    pub response: String,

    /// How many refinement rounds actually executed (the seed call is
    /// not a refinement round; the guided loop's closing round is).
    pub rounds: u32,

    /// Whether the stopping policy ended the run.
    ///
    /// Always false for the guided loop, which never consults a policy.
    pub stopped_by_marker: bool,
}
