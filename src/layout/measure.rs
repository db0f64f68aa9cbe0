//! Card handles and the `Measurable` capability.
//!
//! The layout algorithm never talks to a rendering engine directly. It only
//! needs two things from a card: which content it shows, and how tall it is
//! right now. Both are expressed as traits so the engine can run against the
//! real text cards used by the binary, or against fakes in tests.

use crate::model::{ContentId, ContentItem};
use std::fmt;
use unicode_width::UnicodeWidthStr;

/// Anything with a rendered height in pixels.
///
/// `None` means the height cannot be measured yet (e.g. the card is not
/// attached anywhere). Callers treat that as 0.
pub trait Measurable {
    /// Current rendered height, if measurable.
    fn height(&self) -> Option<u32>;
}

/// A rendered card for one content item.
pub trait Card: Measurable + fmt::Debug {
    /// Content this card renders.
    fn id(&self) -> &ContentId;

    /// Record a new rendered height, e.g. after an image inside the card
    /// finished loading.
    fn set_height(&mut self, height: u32);
}

/// Builds cards for content items.
pub trait CardFactory {
    /// Card type produced.
    type Card: Card;

    /// Create the card view for `item`.
    fn create(&self, item: ContentItem) -> Self::Card;
}

/// Default card: the content item plus its last measured height.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardView {
    content: ContentItem,
    height: Option<u32>,
}

impl CardView {
    /// Wrap `content` with an initial height.
    pub fn new(content: ContentItem, height: Option<u32>) -> Self {
        Self { content, height }
    }

    /// The content shown by this card.
    pub fn content(&self) -> &ContentItem {
        &self.content
    }
}

impl Measurable for CardView {
    fn height(&self) -> Option<u32> {
        self.height
    }
}

impl Card for CardView {
    fn id(&self) -> &ContentId {
        &self.content.id
    }

    fn set_height(&mut self, height: u32) {
        self.height = Some(height);
    }
}

/// Estimates card height from wrapped body text.
///
/// Height = chrome + wrapped lines * line height + loaded attachment heights.
/// An item that already carries a measured height keeps it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextCardFactory {
    /// Text width available inside a card, in character cells.
    pub text_width: usize,
    /// Pixels per text line.
    pub line_height: u32,
    /// Fixed pixels for author line, borders and padding.
    pub chrome: u32,
}

impl Default for TextCardFactory {
    fn default() -> Self {
        Self {
            text_width: 34,
            line_height: 16,
            chrome: 48,
        }
    }
}

impl TextCardFactory {
    /// Number of wrapped lines `body` occupies at `text_width` cells.
    ///
    /// Every hard line break starts a new line; an empty body takes no lines.
    pub fn wrapped_lines(&self, body: &str) -> u32 {
        if body.is_empty() {
            return 0;
        }
        let width = self.text_width.max(1);
        body.lines()
            .map(|line| UnicodeWidthStr::width(line).div_ceil(width).max(1) as u32)
            .sum()
    }

    /// Estimated height in pixels for `item`.
    pub fn estimate(&self, item: &ContentItem) -> u32 {
        self.chrome + self.wrapped_lines(&item.body) * self.line_height + item.attachment_height()
    }
}

impl CardFactory for TextCardFactory {
    type Card = CardView;

    fn create(&self, item: ContentItem) -> CardView {
        let height = item.height.unwrap_or_else(|| self.estimate(&item));
        CardView::new(item, Some(height))
    }
}
