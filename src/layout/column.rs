//! A single wall column.
//!
//! A column is a vertical list holding a subset of the wall's cards. It does
//! no streaming of its own: cards only arrive through `add`, routed by the
//! layout engine. While the wall is bounded (initial page, before "show
//! more"), a column shows at most `max_visible_items` cards; the rest stay
//! owned but hidden until `set_bounded(false)`.

use super::measure::Card;
use crate::model::ContentId;
use tracing::debug;

/// One vertical list of cards.
#[derive(Debug)]
pub struct ColumnView<C> {
    cards: Vec<C>,
    max_visible_items: Option<usize>,
    bounded: bool,
    attached: bool,
}

impl<C: Card> ColumnView<C> {
    /// Create an empty, attached column.
    ///
    /// # Arguments
    ///
    /// * `max_visible_items` - Per-column visible limit while bounded
    ///   (`None` = no limit)
    /// * `bounded` - Whether the limit is enforced initially
    pub fn new(max_visible_items: Option<usize>, bounded: bool) -> Self {
        Self {
            cards: Vec::new(),
            max_visible_items,
            bounded,
            attached: true,
        }
    }

    /// Per-column visible limit for a wall-wide limit of `total` split over
    /// `column_count` columns.
    ///
    /// Rounds up so every column can show at least one card.
    pub fn max_visible_for(total: Option<usize>, column_count: usize) -> Option<usize> {
        total.map(|total| total.div_ceil(column_count.max(1)).max(1))
    }

    /// Insert `card` at `index` (clamped to the current length), or append
    /// when `index` is `None`. Returns the position used.
    pub fn add(&mut self, card: C, index: Option<usize>) -> usize {
        let position = index.map_or(self.cards.len(), |i| i.min(self.cards.len()));
        self.cards.insert(position, card);
        position
    }

    /// Remove the card showing `id`.
    pub fn remove(&mut self, id: &ContentId) -> Option<C> {
        let position = self.cards.iter().position(|card| card.id() == id)?;
        Some(self.cards.remove(position))
    }

    /// Whether this column holds the card for `id`.
    pub fn contains(&self, id: &ContentId) -> bool {
        self.cards.iter().any(|card| card.id() == id)
    }

    /// Mutable access to the card for `id`.
    pub fn card_mut(&mut self, id: &ContentId) -> Option<&mut C> {
        self.cards.iter_mut().find(|card| card.id() == id)
    }

    /// Detach every card from this column and hand them back alive.
    pub fn clear(&mut self) -> Vec<C> {
        std::mem::take(&mut self.cards)
    }

    /// Take the column out of its container.
    pub fn detach(&mut self) {
        self.attached = false;
    }

    /// Dispose of the column together with any cards still in it.
    ///
    /// Consumes the column: it is detached, then dropped with its cards at
    /// the end of this call. Use [`clear`](ColumnView::clear) first to keep
    /// the cards.
    pub fn destroy(mut self) {
        self.detach();
        debug!(cards = self.cards.len(), "Destroying column");
    }

    /// Whether the column is currently attached to its container.
    pub fn is_attached(&self) -> bool {
        self.attached
    }

    /// Toggle enforcement of `max_visible_items`.
    pub fn set_bounded(&mut self, bounded: bool) {
        self.bounded = bounded;
    }

    /// Whether the visible limit is enforced.
    pub fn is_bounded(&self) -> bool {
        self.bounded
    }

    /// Per-column visible limit.
    pub fn max_visible_items(&self) -> Option<usize> {
        self.max_visible_items
    }

    /// All cards in column order, hidden ones included.
    pub fn cards(&self) -> &[C] {
        &self.cards
    }

    /// Cards currently shown.
    pub fn visible_cards(&self) -> &[C] {
        match (self.bounded, self.max_visible_items) {
            (true, Some(limit)) => &self.cards[..limit.min(self.cards.len())],
            _ => &self.cards,
        }
    }

    /// Ids of all cards in column order.
    pub fn ids(&self) -> impl Iterator<Item = &ContentId> {
        self.cards.iter().map(|card| card.id())
    }

    /// Number of cards held.
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    /// Whether the column holds no cards.
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Live height: sum of the visible cards' heights.
    ///
    /// A detached column measures 0. A card that cannot be measured counts as
    /// 0; shortest-column picking will then favour this column until the card
    /// reports a real height.
    pub fn height(&self) -> u32 {
        if !self.attached {
            return 0;
        }
        self.visible_cards()
            .iter()
            .map(|card| {
                card.height().unwrap_or_else(|| {
                    debug!(card = %card.id(), "Card height not measurable, counting as 0");
                    0
                })
            })
            .sum()
    }
}
