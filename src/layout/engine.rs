//! LayoutEngine - column count, column lifecycle and card placement.
//!
//! The engine owns every column and, through them, every card. It keeps the
//! original arrival order of cards separately so a relayout can rebuild the
//! columns deterministically: all columns are torn down, recreated, and every
//! card is re-placed in arrival order through the active picker.
//!
//! # Invariants
//!
//! - `column_count >= 1`
//! - after construction, `relayout`, `insert` and `remove`:
//!   `columns.len() == column_count` and `column_heights.len() >= columns.len()`
//! - every id in `order` is held by exactly one column
//! - once destroyed, every mutating call returns `WallError::IllegalState`
//!   without touching state
//!
//! `set_column_count` and `fit_columns` only change the configured count;
//! the columns themselves follow on the next `relayout`.

use super::column::ColumnView;
use super::measure::Card;
use super::picker::{ColumnPicker, PickColumn, PickContext, PickerState};
use super::style::ColumnStyle;
use crate::model::{ConfigurationError, ContentId, WallError};
use std::collections::HashMap;
use std::num::NonZeroUsize;
use tracing::{debug, info, warn};

/// Default minimum card width in pixels when fitting columns to a container.
pub const DEFAULT_MIN_CONTENT_WIDTH: u32 = 300;

/// How a relayout should determine the column count.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnOverride {
    /// Force a column count and stop auto-fitting.
    Fixed(NonZeroUsize),
    /// Resume auto-fitting from the container width.
    AutoFit,
}

/// Construction options for [`LayoutEngine`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayoutOptions {
    /// Instance id used to scope the column style rule.
    pub instance_id: String,
    /// Minimum card width in pixels for auto-fit.
    pub min_content_width: u32,
    /// Explicit column count; disables auto-fit.
    pub columns: Option<usize>,
    /// Column picking strategy.
    pub picker: ColumnPicker,
    /// Wall-wide visible limit while bounded.
    pub max_visible_items: Option<usize>,
    /// Pagination batch size; derived as `2 * columns` when unset.
    pub more_amount: Option<usize>,
}

impl Default for LayoutOptions {
    fn default() -> Self {
        Self {
            instance_id: "0".to_string(),
            min_content_width: DEFAULT_MIN_CONTENT_WIDTH,
            columns: None,
            picker: ColumnPicker::default(),
            max_visible_items: None,
            more_amount: None,
        }
    }
}

/// Column layout and placement engine.
#[derive(Debug)]
pub struct LayoutEngine<C> {
    columns: Vec<ColumnView<C>>,
    column_count: usize,
    column_heights: Vec<u32>,
    auto_fit: bool,
    min_content_width: u32,
    last_container_width: Option<u32>,
    picker: Box<dyn PickColumn>,
    picker_state: PickerState,
    order: Vec<ContentId>,
    bounded: bool,
    max_visible_items: Option<usize>,
    more_amount: Option<usize>,
    style: ColumnStyle,
    generation: u64,
    destroyed: bool,
}

impl<C: Card> LayoutEngine<C> {
    /// Create an engine with one of the built-in pickers.
    ///
    /// # Errors
    ///
    /// Returns `ConfigurationError` for a zero `min_content_width` or an
    /// explicit zero `columns`.
    pub fn new(options: LayoutOptions) -> Result<Self, WallError> {
        let picker = Box::new(options.picker);
        Self::with_picker(options, picker)
    }

    /// Create an engine with a custom picker.
    ///
    /// # Errors
    ///
    /// Same as [`LayoutEngine::new`].
    pub fn with_picker(
        options: LayoutOptions,
        picker: Box<dyn PickColumn>,
    ) -> Result<Self, WallError> {
        if options.min_content_width == 0 {
            return Err(ConfigurationError::ZeroMinContentWidth.into());
        }
        if options.columns == Some(0) {
            return Err(ConfigurationError::ZeroColumns.into());
        }

        // Auto-fit walls start with a single unsized column; the real count
        // arrives with the first container width.
        let mut engine = Self {
            columns: Vec::new(),
            column_count: 1,
            column_heights: vec![0],
            auto_fit: options.columns.is_none(),
            min_content_width: options.min_content_width,
            last_container_width: None,
            picker,
            picker_state: PickerState::default(),
            order: Vec::new(),
            bounded: true,
            max_visible_items: options.max_visible_items,
            more_amount: options.more_amount,
            style: ColumnStyle::new(options.instance_id, 1),
            generation: 0,
            destroyed: false,
        };
        if let Some(columns) = options.columns {
            engine.column_count = 0;
            engine.set_column_count(columns)?;
        }
        engine.columns = engine.fresh_columns();
        Ok(engine)
    }

    // ===== Column count =====

    /// Column count for `container_width` with cards at least
    /// `min_content_width` wide. Never less than 1.
    pub fn columns_for_width(container_width: u32, min_content_width: u32) -> usize {
        if min_content_width == 0 {
            return 1;
        }
        ((container_width / min_content_width) as usize).max(1)
    }

    /// Fit the column count to a container width.
    ///
    /// Returns whether the count changed. A width equal to the last fitted
    /// width does no work at all.
    ///
    /// # Errors
    ///
    /// `IllegalState` after destroy; `ConfigurationError` for a zero
    /// `min_content_width`.
    pub fn fit_columns(
        &mut self,
        container_width: u32,
        min_content_width: u32,
    ) -> Result<bool, WallError> {
        self.ensure_live("fit columns")?;
        if min_content_width == 0 {
            return Err(ConfigurationError::ZeroMinContentWidth.into());
        }
        if self.last_container_width == Some(container_width) {
            return Ok(false);
        }
        self.last_container_width = Some(container_width);
        self.min_content_width = min_content_width;

        let desired = Self::columns_for_width(container_width, min_content_width);
        debug!(container_width, min_content_width, desired, "Fitting columns");
        self.set_column_count(desired)
    }

    /// Record the container width without fitting to it.
    ///
    /// Pinned walls keep tracking their container so that resuming auto-fit
    /// derives the count from the current width.
    pub fn track_container_width(&mut self, container_width: u32) {
        self.last_container_width = Some(container_width);
    }

    /// Fit using the configured minimum content width.
    ///
    /// # Errors
    ///
    /// `IllegalState` after destroy.
    pub fn fit_to_width(&mut self, container_width: u32) -> Result<bool, WallError> {
        self.fit_columns(container_width, self.min_content_width)
    }

    /// Set the configured column count.
    ///
    /// Updates the column style and height table and derives the pagination
    /// batch size if unset. Existing columns are left alone until the next
    /// relayout.
    ///
    /// # Errors
    ///
    /// `IllegalState` after destroy; `ConfigurationError` for zero.
    pub fn set_column_count(&mut self, count: usize) -> Result<bool, WallError> {
        self.ensure_live("set column count")?;
        if count == 0 {
            return Err(ConfigurationError::ZeroColumns.into());
        }
        if count == self.column_count {
            return Ok(false);
        }

        self.column_count = count;
        self.style.set_column_count(count);
        if self.column_heights.len() < count {
            self.column_heights.resize(count, 0);
        }
        if self.more_amount.is_none() {
            // Show more displays two new rows
            self.more_amount = Some(count * 2);
        }
        info!(columns = count, "Column count changed");
        Ok(true)
    }

    // ===== Relayout =====

    /// Tear down and rebuild every column, re-placing all cards in arrival order.
    ///
    /// # Arguments
    ///
    /// * `column_override` - `Some(Fixed(n))` pins the count and disables
    ///   auto-fit; `Some(AutoFit)` re-enables auto-fit; `None` keeps the
    ///   current mode (re-fitting from the last container width if auto-fit).
    ///
    /// # Errors
    ///
    /// `IllegalState` after destroy.
    pub fn relayout(&mut self, column_override: Option<ColumnOverride>) -> Result<(), WallError> {
        self.ensure_live("relayout")?;

        match column_override {
            Some(ColumnOverride::Fixed(count)) => {
                self.auto_fit = false;
                self.set_column_count(count.get())?;
            }
            Some(ColumnOverride::AutoFit) => {
                self.auto_fit = true;
                self.refit()?;
            }
            None if self.auto_fit => self.refit()?,
            None => {}
        }

        // Detach every card, keeping it alive for re-insertion
        let mut pool: HashMap<ContentId, C> = HashMap::with_capacity(self.order.len());
        for mut column in std::mem::take(&mut self.columns) {
            for card in column.clear() {
                pool.insert(card.id().clone(), card);
            }
            column.destroy();
        }

        self.columns = self.fresh_columns();
        self.column_heights = vec![0; self.column_count];
        self.picker_state.reset();
        self.generation += 1;

        let order = std::mem::take(&mut self.order);
        let total = order.len();
        let mut kept = Vec::with_capacity(total);
        for (index, id) in order.into_iter().enumerate() {
            match pool.remove(&id) {
                Some(card) => {
                    self.place(card, Some(index), index, total);
                    kept.push(id);
                }
                None => warn!(card = %id, "Card missing from columns during relayout"),
            }
        }
        self.order = kept;

        info!(
            columns = self.column_count,
            cards = self.order.len(),
            generation = self.generation,
            "Relayout complete"
        );
        Ok(())
    }

    fn refit(&mut self) -> Result<(), WallError> {
        if let Some(width) = self.last_container_width {
            let desired = Self::columns_for_width(width, self.min_content_width);
            self.set_column_count(desired)?;
        }
        Ok(())
    }

    fn fresh_columns(&self) -> Vec<ColumnView<C>> {
        let per_column = ColumnView::<C>::max_visible_for(self.max_visible_items, self.column_count);
        (0..self.column_count)
            .map(|_| ColumnView::new(per_column, self.bounded))
            .collect()
    }

    // ===== Placement =====

    /// Place a new card.
    ///
    /// The card joins the end of the arrival order, then the picker chooses
    /// its column. With `forced_index`, the card's position within the column
    /// is derived from it.
    ///
    /// Returns the column index used. A card whose id is already on the wall
    /// is dropped and the existing card's column is returned.
    ///
    /// # Errors
    ///
    /// `IllegalState` after destroy.
    pub fn insert(&mut self, card: C, forced_index: Option<usize>) -> Result<usize, WallError> {
        self.ensure_live("insert")?;
        if let Some(existing) = self.column_of(card.id()) {
            warn!(card = %card.id(), "Card already on the wall, ignoring insert");
            return Ok(existing);
        }

        self.order.push(card.id().clone());
        let total = self.order.len();
        let card_index = forced_index.unwrap_or(total - 1);
        Ok(self.place(card, forced_index, card_index, total))
    }

    fn place(
        &mut self,
        card: C,
        forced_index: Option<usize>,
        card_index: usize,
        total_cards: usize,
    ) -> usize {
        if self.columns.is_empty() {
            self.columns = self.fresh_columns();
        }
        let live_columns = self.columns.len();
        let ctx = PickContext {
            column_count: self.column_count,
            live_columns,
            heights: &self.column_heights,
            bounded: self.bounded,
            max_visible_items: self.max_visible_items,
            card_index,
            total_cards,
        };
        let picked = self.picker.pick(&mut self.picker_state, &ctx);
        let target = if picked >= live_columns {
            warn!(picked, live_columns, "Picker returned out-of-range column, clamping");
            live_columns - 1
        } else {
            picked
        };

        let column = &mut self.columns[target];
        let position = forced_index.map(|forced| forced.div_ceil(live_columns).min(column.len()));
        debug!(card = %card.id(), column = target, ?position, "Placing card");
        column.add(card, position);

        let height = column.height();
        if self.column_heights.len() <= target {
            self.column_heights.resize(target + 1, 0);
        }
        self.column_heights[target] = height;
        target
    }

    /// Remove the card for `id`, returning it.
    ///
    /// # Errors
    ///
    /// `IllegalState` after destroy.
    pub fn remove(&mut self, id: &ContentId) -> Result<Option<C>, WallError> {
        self.ensure_live("remove")?;
        let Some(index) = self.column_of(id) else {
            return Ok(None);
        };
        let card = self.columns[index].remove(id);
        self.order.retain(|existing| existing != id);
        self.column_heights[index] = self.columns[index].height();
        debug!(card = %id, column = index, "Removed card");
        Ok(card)
    }

    /// Mutable access to the card for `id`.
    ///
    /// Call [`LayoutEngine::refresh_height`] after changing its height.
    ///
    /// # Errors
    ///
    /// `IllegalState` after destroy.
    pub fn card_mut(&mut self, id: &ContentId) -> Result<Option<&mut C>, WallError> {
        self.ensure_live("access card")?;
        Ok(self.columns.iter_mut().find_map(|column| column.card_mut(id)))
    }

    /// Re-measure the column holding `id` and update its cached height.
    ///
    /// Returns the column index, or `None` if no column holds the card.
    ///
    /// # Errors
    ///
    /// `IllegalState` after destroy.
    pub fn refresh_height(&mut self, id: &ContentId) -> Result<Option<usize>, WallError> {
        self.ensure_live("refresh height")?;
        let Some(index) = self.column_of(id) else {
            return Ok(None);
        };
        self.column_heights[index] = self.columns[index].height();
        Ok(Some(index))
    }

    /// Leave the bounded initial page: every column shows all its cards and
    /// round-robin uses every column.
    ///
    /// # Errors
    ///
    /// `IllegalState` after destroy.
    pub fn show_more(&mut self) -> Result<(), WallError> {
        self.ensure_live("show more")?;
        self.bounded = false;
        for column in &mut self.columns {
            column.set_bounded(false);
        }
        for index in 0..self.columns.len() {
            self.column_heights[index] = self.columns[index].height();
        }
        Ok(())
    }

    /// Destroy every column and card.
    ///
    /// # Errors
    ///
    /// `IllegalState` if already destroyed.
    pub fn destroy(&mut self) -> Result<(), WallError> {
        self.ensure_live("destroy")?;
        for column in self.columns.drain(..) {
            column.destroy();
        }
        self.order.clear();
        self.column_heights.clear();
        self.picker_state.reset();
        self.destroyed = true;
        info!("Layout engine destroyed");
        Ok(())
    }

    fn ensure_live(&self, operation: &'static str) -> Result<(), WallError> {
        if self.destroyed {
            Err(WallError::disposed(operation))
        } else {
            Ok(())
        }
    }

    // ===== Queries =====

    /// Index of the column holding `id`.
    pub fn column_of(&self, id: &ContentId) -> Option<usize> {
        self.columns.iter().position(|column| column.contains(id))
    }

    /// Whether the wall holds a card for `id`.
    pub fn contains(&self, id: &ContentId) -> bool {
        self.column_of(id).is_some()
    }

    /// Configured column count.
    pub fn column_count(&self) -> usize {
        self.column_count
    }

    /// Current columns.
    pub fn columns(&self) -> &[ColumnView<C>] {
        &self.columns
    }

    /// Cached column heights.
    pub fn column_heights(&self) -> &[u32] {
        &self.column_heights
    }

    /// Card ids in arrival order.
    pub fn order(&self) -> &[ContentId] {
        &self.order
    }

    /// Number of cards on the wall.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Whether the wall holds no cards.
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Number of cards currently visible across all columns.
    pub fn visible_len(&self) -> usize {
        self.columns.iter().map(|c| c.visible_cards().len()).sum()
    }

    /// Whether column count follows the container width.
    pub fn is_auto_fit(&self) -> bool {
        self.auto_fit
    }

    /// Whether the wall is still on its bounded initial page.
    pub fn is_bounded(&self) -> bool {
        self.bounded
    }

    /// Wall-wide visible limit while bounded.
    pub fn max_visible_items(&self) -> Option<usize> {
        self.max_visible_items
    }

    /// Pagination batch size.
    pub fn more_amount(&self) -> Option<usize> {
        self.more_amount
    }

    /// Minimum card width used for auto-fit.
    pub fn min_content_width(&self) -> u32 {
        self.min_content_width
    }

    /// Last container width passed to `fit_columns`.
    pub fn container_width(&self) -> Option<u32> {
        self.last_container_width
    }

    /// Column width rule.
    pub fn style(&self) -> &ColumnStyle {
        &self.style
    }

    /// Number of column rebuilds so far.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Picker cursor state.
    pub fn picker_state(&self) -> &PickerState {
        &self.picker_state
    }

    /// Whether `destroy` has been called.
    pub fn is_destroyed(&self) -> bool {
        self.destroyed
    }

    /// Card ids per column, top to bottom.
    pub fn snapshot(&self) -> Vec<Vec<ContentId>> {
        self.columns
            .iter()
            .map(|column| column.ids().cloned().collect())
            .collect()
    }
}

#[cfg(test)]
#[path = "engine_tests.rs"]
mod tests;
