//! ResponseAgent — composes prompts and calls the generation backend.

use std::sync::Arc;

use iterthought_core::error::BackendError;
use iterthought_core::generator::{GenerationRequest, Generator};
use iterthought_core::inject::{ContextInjector, NoopInjector};
use iterthought_core::knowledge::KnowledgeBase;
use tracing::debug;

/// Sends one composed prompt per call to the backend.
///
/// The composite prompt is the instruction, a blank-line separator, the
/// literal label `Question:`, and the query. The knowledge base is routed
/// through the [`ContextInjector`] seam; the default injector ignores it.
pub struct ResponseAgent {
    generator: Arc<dyn Generator>,
    model: String,
    injector: Arc<dyn ContextInjector>,
}

impl ResponseAgent {
    /// Create a new response agent with the no-op context injector.
    pub fn new(generator: Arc<dyn Generator>, model: impl Into<String>) -> Self {
        Self {
            generator,
            model: model.into(),
            injector: Arc::new(NoopInjector),
        }
    }

    /// Replace the context injector.
    pub fn with_injector(mut self, injector: Arc<dyn ContextInjector>) -> Self {
        self.injector = injector;
        self
    }

    /// Compose the prompt for `query` under `instruction` and generate
    /// one response.
    pub async fn respond(
        &self,
        query: &str,
        instruction: &str,
        knowledge: &KnowledgeBase,
    ) -> Result<String, BackendError> {
        let composite = format!("{instruction}\n\nQuestion: {query}");
        let prompt = self.injector.inject(&composite, knowledge);

        debug!(
            backend = self.generator.name(),
            model = %self.model,
            prompt_len = prompt.len(),
            "Requesting response"
        );

        self.generator
            .generate(GenerationRequest::new(&self.model, prompt))
            .await
    }
}
