//! StopPolicy — decides when autonomous iteration should terminate.
//!
//! The backend has no structured termination field in this protocol; the
//! model signals completion by emitting a literal marker phrase. The
//! marker check is deliberately case-sensitive and substring-based for
//! compatibility with existing fixtures.

/// The literal phrase the model emits to end autonomous iteration.
pub const STOP_MARKER: &str = "Final Answer";

/// Inspects a response and declares whether iteration should terminate.
pub trait StopPolicy: Send + Sync {
    fn should_stop(&self, response: &str) -> bool;
}

/// Stops when [`STOP_MARKER`] appears anywhere in the response.
///
/// No case-insensitivity, no normalization.
#[derive(Debug, Clone, Copy, Default)]
pub struct MarkerStopPolicy;

impl StopPolicy for MarkerStopPolicy {
    fn should_stop(&self, response: &str) -> bool {
        response.contains(STOP_MARKER)
    }
}
