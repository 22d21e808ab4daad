//! Generator trait — the abstraction over the text-generation backend.
//!
//! A Generator knows how to send one prompt to a model and return the
//! accumulated textual response. The refinement loops call `generate()`
//! without knowing which backend is being used — pure polymorphism.
//!
//! Implementations: the Ollama streaming client, test mocks.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::BackendError;

/// One generation call: a model identifier and the prompt to send.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationRequest {
    /// The model to use (e.g., "llama3.1")
    pub model: String,

    /// The full prompt text for this call
    pub prompt: String,
}

impl GenerationRequest {
    pub fn new(model: impl Into<String>, prompt: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            prompt: prompt.into(),
        }
    }
}

/// The result of decoding one streamed response.
///
/// Carries both the accumulated text and the number of malformed stream
/// chunks that were skipped along the way, so callers can decide whether
/// a high skip ratio should be treated as a failure.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DecodeOutcome {
    /// Concatenation of all well-formed text fragments, in arrival order.
    pub text: String,

    /// How many malformed chunks were skipped during decoding.
    pub skipped: usize,
}

impl DecodeOutcome {
    /// True when no text fragment was ever decoded.
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

/// The core Generator trait.
///
/// Sends one request and returns the backend's complete response text.
/// The call blocks (asynchronously) until the backend's stream is fully
/// drained or the transport fails.
#[async_trait]
pub trait Generator: Send + Sync {
    /// A human-readable name for this backend (e.g., "ollama").
    fn name(&self) -> &str;

    /// Issue one generation request and return the accumulated text.
    async fn generate(
        &self,
        request: GenerationRequest,
    ) -> std::result::Result<String, BackendError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_serializes_to_wire_shape() {
        let req = GenerationRequest::new("llama3.1", "Hello");
        let json = serde_json::to_value(&req).unwrap();
        assert_eq!(json["model"], "llama3.1");
        assert_eq!(json["prompt"], "Hello");
    }

    #[test]
    fn decode_outcome_emptiness() {
        assert!(DecodeOutcome::default().is_empty());
        let outcome = DecodeOutcome {
            text: "hi".into(),
            skipped: 3,
        };
        assert!(!outcome.is_empty());
    }
}
