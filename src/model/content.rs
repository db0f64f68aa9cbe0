//! Content items delivered by a collection.
//!
//! A `ContentItem` is the unit the upstream stream delivers: one social post
//! with optional media attachments. The wall never mutates items; it turns
//! each one into a card via a `CardFactory`.

use super::identifiers::ContentId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Kind of media attached to a content item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttachmentKind {
    /// Still image.
    Photo,
    /// Video (rendered as a poster frame).
    Video,
    /// Rich link preview.
    Link,
}

/// Media attached to a content item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attachment {
    /// Media kind.
    pub kind: AttachmentKind,
    /// Source URL of the media.
    #[serde(default)]
    pub url: Option<String>,
    /// Rendered height in pixels, once the media has loaded.
    #[serde(default)]
    pub height: Option<u32>,
}

/// One piece of social content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentItem {
    /// Unique id within the collection.
    pub id: ContentId,
    /// Display name of the author.
    #[serde(default)]
    pub author: Option<String>,
    /// Body text.
    #[serde(default)]
    pub body: String,
    /// Media attachments, in display order.
    #[serde(default)]
    pub attachments: Vec<Attachment>,
    /// When the content was created upstream.
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    /// Height already measured upstream, in pixels. Takes precedence over
    /// any estimate a card factory would compute.
    #[serde(default)]
    pub height: Option<u32>,
}

impl ContentItem {
    /// Create a text-only item.
    pub fn text(id: ContentId, body: impl Into<String>) -> Self {
        Self {
            id,
            author: None,
            body: body.into(),
            attachments: Vec::new(),
            created_at: None,
            height: None,
        }
    }

    /// Builder: set the author.
    pub fn with_author(mut self, author: impl Into<String>) -> Self {
        self.author = Some(author.into());
        self
    }

    /// Builder: set a pre-measured height.
    pub fn with_height(mut self, height: u32) -> Self {
        self.height = Some(height);
        self
    }

    /// Builder: append an attachment.
    pub fn with_attachment(mut self, attachment: Attachment) -> Self {
        self.attachments.push(attachment);
        self
    }

    /// Sum of the known attachment heights.
    pub fn attachment_height(&self) -> u32 {
        self.attachments.iter().filter_map(|a| a.height).sum()
    }
}
