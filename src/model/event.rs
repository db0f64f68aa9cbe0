//! Events delivered by a content stream.

use super::content::ContentItem;
use super::identifiers::ContentId;

/// One change to the collection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContentEvent {
    /// New content arrived.
    Add(ContentItem),
    /// Content was deleted upstream.
    Remove(ContentId),
    /// Media inside a card finished loading at a new height.
    ImageLoaded {
        /// Content whose media loaded.
        id: ContentId,
        /// New card height in pixels.
        height: u32,
    },
}

impl ContentEvent {
    /// Id of the content this event concerns.
    pub fn id(&self) -> &ContentId {
        match self {
            ContentEvent::Add(item) => &item.id,
            ContentEvent::Remove(id) | ContentEvent::ImageLoaded { id, .. } => id,
        }
    }
}
