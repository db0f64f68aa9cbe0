//! Identifier newtypes with smart constructors.
//!
//! Identifiers validate non-empty strings at construction time.
//! The raw tuple constructor is never exported - use `ContentId::new`.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unique identifier of a content item within a collection.
///
/// Also identifies the card rendered for that item: a wall never shows two
/// cards for the same content.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ContentId(String);

impl ContentId {
    /// Smart constructor: validates non-empty id.
    pub fn new(raw: impl Into<String>) -> Result<Self, InvalidContentId> {
        let raw = raw.into();
        if raw.trim().is_empty() {
            return Err(InvalidContentId::Empty);
        }
        Ok(Self(raw))
    }

    /// Borrow the id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ContentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for ContentId {
    type Error = InvalidContentId;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<ContentId> for String {
    fn from(id: ContentId) -> Self {
        id.0
    }
}

// ===== Error Types =====

/// Rejected content id.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InvalidContentId {
    /// Id was empty or whitespace only.
    #[error("Content ID cannot be empty")]
    Empty,
}

// ===== Tests =====

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn content_id_accepts_simple_alphanumeric() {
        let id = ContentId::new("abc123");
        assert!(id.is_ok(), "Simple alphanumeric should be accepted");
    }

    #[test]
    fn content_id_rejects_empty_string() {
        assert_eq!(ContentId::new(""), Err(InvalidContentId::Empty));
    }

    #[test]
    fn content_id_rejects_whitespace_only() {
        assert_eq!(ContentId::new("   "), Err(InvalidContentId::Empty));
    }

    #[test]
    fn content_id_display_matches_as_str() {
        let id = ContentId::new("post-42").unwrap();
        assert_eq!(id.to_string(), "post-42");
        assert_eq!(id.as_str(), "post-42");
    }

    #[test]
    fn content_id_deserializes_from_json_string() {
        let id: ContentId = serde_json::from_str("\"c1\"").unwrap();
        assert_eq!(id.as_str(), "c1");
    }

    #[test]
    fn content_id_deserialize_rejects_empty_string() {
        let result: Result<ContentId, _> = serde_json::from_str("\"\"");
        assert!(result.is_err(), "Empty id must not deserialize");
    }
}
