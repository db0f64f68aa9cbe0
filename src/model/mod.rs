//! Domain model: content items, stream events, key actions, identifiers and errors.

pub mod content;
pub mod error;
pub mod event;
pub mod identifiers;
pub mod key_action;

pub use content::{Attachment, AttachmentKind, ContentItem};
pub use error::{AppError, ConfigurationError, InputError, ParseError, WallError};
pub use event::ContentEvent;
pub use identifiers::{ContentId, InvalidContentId};
pub use key_action::KeyAction;
