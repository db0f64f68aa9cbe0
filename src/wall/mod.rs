//! The media wall: layout engine plus stream bookkeeping.
//!
//! - `view`: `WallView` lifecycle, debounced resize, content routing
//! - `stash`: `MoreStash` goal counter and held-back items
//! - `events`: `WallEvent` notifications

pub mod events;
pub mod stash;
pub mod view;

pub use events::WallEvent;
pub use stash::MoreStash;
pub use view::{WallOptions, WallPhase, WallView, DEFAULT_INITIAL};
