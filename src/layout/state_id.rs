//! Identifiers for the named states a `StatefulLayout` can switch between.
//!
//! The reserved content state is a dedicated enum variant rather than a
//! string convention, so code that must treat it specially (for example
//! `clear_states`) matches on it instead of comparing against a literal.

use std::fmt::{Display, Formatter, Result as FmtResult};

use serde::{Deserialize, Serialize};

/// String form of the reserved content state.
const CONTENT: &str = "content";

/// Identifier for a registered layout state.
///
/// `Content` is reserved for the container's original inline child and is
/// always preserved by `clear_states`. Every other state is `Named` with a
/// caller-defined name such as `"loading"` or `"error"`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum StateId {
    /// The reserved state holding the container's original inline child.
    Content,
    /// A caller-defined state.
    Named(String),
}

impl StateId {
    /// Creates a state identifier from a name, mapping the literal
    /// `"content"` back to the reserved variant.
    pub fn named(name: impl Into<String>) -> Self {
        let name = name.into();
        if name == CONTENT {
            StateId::Content
        } else {
            StateId::Named(name)
        }
    }

    /// Gets the string form of this identifier, as used in the persisted
    /// instance state.
    pub fn as_str(&self) -> &str {
        match self {
            StateId::Content => CONTENT,
            StateId::Named(name) => name,
        }
    }
}

impl Display for StateId {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.as_str())
    }
}

impl From<&str> for StateId {
    fn from(name: &str) -> Self {
        StateId::named(name)
    }
}

impl From<String> for StateId {
    fn from(name: String) -> Self {
        StateId::named(name)
    }
}

impl From<StateId> for String {
    fn from(id: StateId) -> Self {
        id.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::StateId;

    #[test]
    fn test_named_maps_reserved_literal_to_content() {
        assert_eq!(StateId::named("content"), StateId::Content);
        assert_eq!(StateId::from("content"), StateId::Content);
        assert_eq!(
            StateId::named("loading"),
            StateId::Named("loading".to_string())
        );
    }

    #[test]
    fn test_string_form_round_trip() {
        assert_eq!(StateId::Content.as_str(), "content");
        assert_eq!(StateId::named("error").to_string(), "error");
        assert_eq!(StateId::from("empty".to_string()).as_str(), "empty");
    }

    #[test]
    fn test_serde_uses_string_form() {
        let json = serde_json::to_string(&StateId::Content).unwrap();
        assert_eq!(json, "\"content\"");

        let restored: StateId = serde_json::from_str("\"loading\"").unwrap();
        assert_eq!(restored, StateId::Named("loading".to_string()));

        let content: StateId = serde_json::from_str("\"content\"").unwrap();
        assert_eq!(content, StateId::Content);
    }
}
