//! WallView - the layout engine wired to a content stream and a container.
//!
//! The view turns content items into cards, decides whether they go on the
//! wall or into the "show more" stash, and keeps the column count in step
//! with the container width. Resizes are debounced; the owner drives time
//! forward by calling [`WallView::tick`].
//!
//! # Lifecycle
//!
//! ```text
//! Unmounted --mount--> MountedInitial --show_more--> MountedExpanded
//!     \                      \                             \
//!      +---------------------+------------destroy----------+--> Disposed
//! ```
//!
//! Content may arrive before mounting; the mount relayout re-places it.
//! Once disposed, every mutating call fails with `WallError::IllegalState`.

use super::events::WallEvent;
use super::stash::MoreStash;
use crate::layout::{
    Card, CardFactory, ColumnOverride, ColumnPicker, LayoutEngine, LayoutOptions, PickColumn,
    DEFAULT_MIN_CONTENT_WIDTH,
};
use crate::model::{ConfigurationError, ContentId, ContentItem, WallError};
use crate::schedule::debounce::DEFAULT_DEBOUNCE;
use crate::schedule::Debouncer;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

/// Items shown before "show more" is used.
pub const DEFAULT_INITIAL: usize = 50;

// ===== Options =====

/// Construction options for [`WallView`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WallOptions {
    /// Instance id scoping the column style rule.
    pub instance_id: String,
    /// Minimum card width in pixels when auto-fitting.
    pub min_content_width: u32,
    /// Explicit column count; `None` auto-fits to the container.
    pub columns: Option<usize>,
    /// Column picking strategy.
    pub picker: ColumnPicker,
    /// Items shown before "show more".
    pub initial: usize,
    /// Items added per "show more"; `None` derives two rows from the column count.
    pub show_more: Option<usize>,
    /// Resize debounce window.
    pub debounce: Duration,
}

impl Default for WallOptions {
    fn default() -> Self {
        Self {
            instance_id: "0".to_string(),
            min_content_width: DEFAULT_MIN_CONTENT_WIDTH,
            columns: None,
            picker: ColumnPicker::default(),
            initial: DEFAULT_INITIAL,
            show_more: None,
            debounce: DEFAULT_DEBOUNCE,
        }
    }
}

impl WallOptions {
    /// Check option values that cannot be clamped.
    ///
    /// # Errors
    ///
    /// `ConfigurationError` for a zero minimum width, zero explicit columns
    /// or a zero debounce window.
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        if self.min_content_width == 0 {
            return Err(ConfigurationError::ZeroMinContentWidth);
        }
        if self.columns == Some(0) {
            return Err(ConfigurationError::ZeroColumns);
        }
        if self.debounce.is_zero() {
            return Err(ConfigurationError::ZeroDebounce);
        }
        Ok(())
    }

    fn layout_options(&self) -> LayoutOptions {
        LayoutOptions {
            instance_id: self.instance_id.clone(),
            min_content_width: self.min_content_width,
            columns: self.columns,
            picker: self.picker,
            max_visible_items: Some(self.initial),
            more_amount: self.show_more,
        }
    }
}

/// Where a wall is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WallPhase {
    /// Built, no container yet.
    Unmounted,
    /// Attached and showing the bounded initial page.
    MountedInitial,
    /// Attached and expanded by "show more".
    MountedExpanded,
    /// Destroyed.
    Disposed,
}

impl WallPhase {
    /// Whether a container is attached.
    pub fn is_mounted(self) -> bool {
        matches!(self, WallPhase::MountedInitial | WallPhase::MountedExpanded)
    }
}

// ===== WallView =====

/// Masonry wall over a card factory.
#[derive(Debug)]
pub struct WallView<F: CardFactory> {
    options: WallOptions,
    factory: F,
    engine: LayoutEngine<F::Card>,
    stash: MoreStash,
    resize: Debouncer<u32>,
    phase: WallPhase,
    events: Vec<WallEvent>,
}

impl<F: CardFactory> WallView<F> {
    /// Build an unmounted wall.
    ///
    /// # Errors
    ///
    /// `ConfigurationError` for invalid options.
    pub fn new(options: WallOptions, factory: F) -> Result<Self, WallError> {
        let picker = Box::new(options.picker);
        Self::with_picker(options, factory, picker)
    }

    /// Build an unmounted wall with a custom column picker.
    ///
    /// # Errors
    ///
    /// `ConfigurationError` for invalid options.
    pub fn with_picker(
        options: WallOptions,
        factory: F,
        picker: Box<dyn PickColumn>,
    ) -> Result<Self, WallError> {
        options.validate()?;
        let engine = LayoutEngine::with_picker(options.layout_options(), picker)?;
        Ok(Self {
            stash: MoreStash::new(options.initial),
            resize: Debouncer::new(options.debounce),
            options,
            factory,
            engine,
            phase: WallPhase::Unmounted,
            events: Vec::new(),
        })
    }

    // ===== Lifecycle =====

    /// Attach to a container `width` pixels wide and lay out.
    ///
    /// Mounting a mounted wall only refits to the new width.
    ///
    /// # Errors
    ///
    /// `IllegalState` after destroy.
    pub fn mount(&mut self, width: u32) -> Result<(), WallError> {
        self.ensure_live("mount")?;
        if self.engine.is_auto_fit() {
            self.engine.fit_to_width(width)?;
        } else {
            self.engine.track_container_width(width);
        }
        if self.phase == WallPhase::Unmounted {
            self.phase = WallPhase::MountedInitial;
        }
        info!(width, columns = self.engine.column_count(), "Wall mounted");
        self.rebuild(None)
    }

    /// Record a container resize.
    ///
    /// Ignored before mount. A fixed column count only records the width for
    /// a later return to auto-fit. Otherwise the width waits out the debounce
    /// window and is applied by a later [`tick`](WallView::tick).
    ///
    /// # Errors
    ///
    /// `IllegalState` after destroy.
    pub fn resize(&mut self, width: u32, now: Instant) -> Result<(), WallError> {
        self.ensure_live("resize")?;
        if !self.phase.is_mounted() {
            debug!(width, "Resize before mount ignored");
            return Ok(());
        }
        if !self.engine.is_auto_fit() {
            self.engine.track_container_width(width);
            return Ok(());
        }
        self.resize.call(now, width);
        Ok(())
    }

    /// Run deferred work that is due at `now`.
    ///
    /// Returns whether the columns were rebuilt.
    ///
    /// # Errors
    ///
    /// `IllegalState` after destroy.
    pub fn tick(&mut self, now: Instant) -> Result<bool, WallError> {
        self.ensure_live("tick")?;
        let Some(width) = self.resize.poll(now) else {
            return Ok(false);
        };
        if !self.engine.is_auto_fit() {
            return Ok(false);
        }
        if self.engine.fit_to_width(width)? {
            self.rebuild(None)?;
            return Ok(true);
        }
        debug!(width, "Debounced resize kept column count");
        Ok(false)
    }

    /// Tear down every column and card and cancel pending work.
    ///
    /// # Errors
    ///
    /// `IllegalState` if already destroyed.
    pub fn destroy(&mut self) -> Result<(), WallError> {
        self.ensure_live("destroy")?;
        self.resize.cancel();
        self.engine.destroy()?;
        self.stash.clear();
        self.events.clear();
        self.phase = WallPhase::Disposed;
        info!("Wall destroyed");
        Ok(())
    }

    // ===== Content =====

    /// Add a content item.
    ///
    /// Returns the column the card went to, or `None` when the goal is
    /// exhausted and the item was stashed for "show more".
    ///
    /// # Errors
    ///
    /// `IllegalState` after destroy.
    pub fn add(&mut self, item: ContentItem) -> Result<Option<usize>, WallError> {
        self.ensure_live("add")?;
        if let Some(column) = self.engine.column_of(&item.id) {
            warn!(card = %item.id, "Content already on the wall");
            return Ok(Some(column));
        }
        if self.stash.contains(&item.id) {
            warn!(card = %item.id, "Content already stashed");
            return Ok(None);
        }
        if !self.stash.admit() {
            let id = item.id.clone();
            self.stash.hold(item);
            debug!(card = %id, waiting = self.stash.len(), "Stashed content");
            self.events.push(WallEvent::Stashed {
                id,
                waiting: self.stash.len(),
            });
            return Ok(None);
        }
        self.place(item).map(Some)
    }

    fn place(&mut self, item: ContentItem) -> Result<usize, WallError> {
        let card = self.factory.create(item);
        let id = card.id().clone();
        let column = self.engine.insert(card, None)?;
        self.events.push(WallEvent::CardAdded { id, column });
        Ok(column)
    }

    /// Remove a content item from the wall or the stash.
    ///
    /// Returns whether anything was removed.
    ///
    /// # Errors
    ///
    /// `IllegalState` after destroy.
    pub fn remove(&mut self, id: &ContentId) -> Result<bool, WallError> {
        self.ensure_live("remove")?;
        let removed = self.engine.remove(id)?.is_some() || self.stash.remove(id).is_some();
        if removed {
            self.events.push(WallEvent::CardRemoved { id: id.clone() });
        } else {
            debug!(card = %id, "Remove of unknown content ignored");
        }
        Ok(removed)
    }

    /// A card's media finished loading and it is now `height` pixels tall.
    ///
    /// Returns the column holding the card, or `None` if the item is still
    /// stashed (its height is kept for when it is placed).
    ///
    /// # Errors
    ///
    /// `IllegalState` after destroy; `UnknownCard` if the id is neither on
    /// the wall nor stashed.
    pub fn image_loaded(&mut self, id: &ContentId, height: u32) -> Result<Option<usize>, WallError> {
        self.ensure_live("update card height")?;
        if let Some(card) = self.engine.card_mut(id)? {
            card.set_height(height);
            let column = self
                .engine
                .refresh_height(id)?
                .ok_or_else(|| WallError::UnknownCard(id.clone()))?;
            self.events.push(WallEvent::ImageLoaded {
                id: id.clone(),
                column,
                height,
            });
            return Ok(Some(column));
        }
        match self.stash.get_mut(id) {
            Some(item) => {
                item.height = Some(height);
                Ok(None)
            }
            None => Err(WallError::UnknownCard(id.clone())),
        }
    }

    /// Leave the bounded initial page and admit `count` more items.
    ///
    /// `count` defaults to the configured "show more" amount, or two rows of
    /// the current column count. Stashed items are released first, in
    /// arrival order. Returns how many were released.
    ///
    /// # Errors
    ///
    /// `IllegalState` after destroy.
    pub fn show_more(&mut self, count: Option<usize>) -> Result<usize, WallError> {
        self.ensure_live("show more")?;
        let amount = count
            .or(self.engine.more_amount())
            .unwrap_or(self.engine.column_count() * 2);

        self.engine.show_more()?;
        if self.phase == WallPhase::MountedInitial {
            self.phase = WallPhase::MountedExpanded;
        }
        self.stash.raise_goal(amount);

        let mut released = 0;
        while let Some(item) = self.stash.release() {
            self.place(item)?;
            released += 1;
        }
        info!(amount, released, waiting = self.stash.len(), "Show more");
        Ok(released)
    }

    /// Rebuild every column, optionally changing how the count is chosen.
    ///
    /// # Errors
    ///
    /// `IllegalState` after destroy.
    pub fn relayout(&mut self, column_override: Option<ColumnOverride>) -> Result<(), WallError> {
        self.ensure_live("relayout")?;
        self.rebuild(column_override)
    }

    fn rebuild(&mut self, column_override: Option<ColumnOverride>) -> Result<(), WallError> {
        self.engine.relayout(column_override)?;
        if !self.engine.is_auto_fit() {
            if let Some(width) = self.resize.cancel() {
                self.engine.track_container_width(width);
            }
        }
        self.events.push(WallEvent::ColumnsRebuilt {
            columns: self.engine.column_count(),
            generation: self.engine.generation(),
        });
        Ok(())
    }

    fn ensure_live(&self, operation: &'static str) -> Result<(), WallError> {
        if self.phase == WallPhase::Disposed {
            Err(WallError::disposed(operation))
        } else {
            Ok(())
        }
    }

    // ===== Queries =====

    /// Take every event queued since the last drain.
    pub fn drain_events(&mut self) -> Vec<WallEvent> {
        std::mem::take(&mut self.events)
    }

    /// Lifecycle phase.
    pub fn phase(&self) -> WallPhase {
        self.phase
    }

    /// Options the wall was built with.
    pub fn options(&self) -> &WallOptions {
        &self.options
    }

    /// Underlying layout engine.
    pub fn engine(&self) -> &LayoutEngine<F::Card> {
        &self.engine
    }

    /// Card factory.
    pub fn factory(&self) -> &F {
        &self.factory
    }

    /// Items held for "show more".
    pub fn stash(&self) -> &MoreStash {
        &self.stash
    }

    /// Current column count.
    pub fn column_count(&self) -> usize {
        self.engine.column_count()
    }

    /// Whether a resize is waiting out its debounce window.
    pub fn resize_pending(&self) -> bool {
        self.resize.is_pending()
    }

    /// When the next deferred work is due.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.resize.deadline()
    }

    /// Card ids per column, top to bottom.
    pub fn snapshot(&self) -> Vec<Vec<ContentId>> {
        self.engine.snapshot()
    }
}

#[cfg(test)]
#[path = "view_tests.rs"]
mod tests;
