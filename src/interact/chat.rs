//! Canned keyword responder for the chat panel.

use crate::data::ChatScript;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct KeywordGroup {
    pub keywords: Vec<String>,
    pub response: String,
}

/// Ordered keyword groups plus a fallback. First match wins.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChatResponder {
    groups: Vec<KeywordGroup>,
    fallback: String,
}

impl ChatResponder {
    pub fn new(script: &ChatScript) -> Self {
        let groups = script
            .responses
            .iter()
            .map(|group| KeywordGroup {
                keywords: group
                    .keywords
                    .iter()
                    .map(|k| k.trim().to_lowercase())
                    .filter(|k| !k.is_empty())
                    .collect(),
                response: group.response.clone(),
            })
            .collect();

        Self {
            groups,
            fallback: script.fallback.clone(),
        }
    }

    /// Reply to `query`, or `None` when there is nothing to send.
    pub fn respond(&self, query: &str) -> Option<&str> {
        let query = query.trim();
        if query.is_empty() {
            return None;
        }
        let query = query.to_lowercase();

        let reply = self
            .groups
            .iter()
            .find(|group| group.keywords.iter().any(|k| query.contains(k.as_str())))
            .map_or(self.fallback.as_str(), |group| group.response.as_str());
        Some(reply)
    }

    pub fn groups(&self) -> &[KeywordGroup] {
        &self.groups
    }

    pub fn fallback(&self) -> &str {
        &self.fallback
    }
}
