//! KnowledgeBase — an opaque topic-to-content mapping.
//!
//! The loops forward it unchanged; only a [`ContextInjector`] ever reads
//! it. The core logic never interprets its content.
//!
//! [`ContextInjector`]: crate::inject::ContextInjector

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// An opaque mapping from topic keys to textual content.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct KnowledgeBase(HashMap<String, String>);

impl KnowledgeBase {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace one topic entry.
    pub fn insert(&mut self, topic: impl Into<String>, content: impl Into<String>) {
        self.0.insert(topic.into(), content.into());
    }

    /// Look up one topic's content.
    pub fn get(&self, topic: &str) -> Option<&str> {
        self.0.get(topic).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Iterate over (topic, content) pairs.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl From<HashMap<String, String>> for KnowledgeBase {
    fn from(map: HashMap<String, String>) -> Self {
        Self(map)
    }
}

impl FromIterator<(String, String)> for KnowledgeBase {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}
