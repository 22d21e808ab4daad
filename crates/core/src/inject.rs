//! ContextInjector — the seam for merging knowledge-base content into a prompt.
//!
//! The original design accepted a knowledge base but never used it. We keep
//! that surface as an explicit extension point: the response agent routes
//! every composed prompt through an injector, and the default implementation
//! returns the prompt unchanged.

use crate::knowledge::KnowledgeBase;

/// Merges retrieved knowledge-base content into a composed prompt.
pub trait ContextInjector: Send + Sync {
    /// Produce the final prompt from the composed prompt and the knowledge base.
    fn inject(&self, prompt: &str, knowledge: &KnowledgeBase) -> String;
}

/// The default injector: forwards the prompt untouched.
///
/// Matches the original behavior where the knowledge base was accepted
/// but never incorporated.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopInjector;

impl ContextInjector for NoopInjector {
    fn inject(&self, prompt: &str, _knowledge: &KnowledgeBase) -> String {
        prompt.to_string()
    }
}
