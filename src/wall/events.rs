//! Outward notifications from a wall.

use crate::model::ContentId;
use serde::Serialize;

/// Something observable happened on the wall.
///
/// Events queue up inside the wall until drained; the component layer and
/// the renderer consume them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum WallEvent {
    /// A card was placed in a column.
    CardAdded {
        /// Content shown by the card.
        id: ContentId,
        /// Column the picker chose.
        column: usize,
    },
    /// A card left the wall or the stash.
    CardRemoved {
        /// Content that was removed.
        id: ContentId,
    },
    /// A card's height changed after its media loaded.
    ImageLoaded {
        /// Content whose media loaded.
        id: ContentId,
        /// Column holding the card.
        column: usize,
        /// New card height in pixels.
        height: u32,
    },
    /// Every column was torn down and rebuilt.
    ColumnsRebuilt {
        /// Column count after the rebuild.
        columns: usize,
        /// Rebuild counter.
        generation: u64,
    },
    /// An item arrived past the current goal and is held for "show more".
    Stashed {
        /// Content that was held back.
        id: ContentId,
        /// Items now waiting in the stash.
        waiting: usize,
    },
}

impl WallEvent {
    /// Whether this event put a new card on the wall.
    pub fn is_card_added(&self) -> bool {
        matches!(self, WallEvent::CardAdded { .. })
    }
}
