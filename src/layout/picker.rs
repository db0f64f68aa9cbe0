//! Column picking strategies.
//!
//! A picker decides which column receives the next card. Pickers are pure
//! functions of an explicit [`PickContext`] snapshot of engine state plus the
//! picker's own cursor state in [`PickerState`]; they never reach into the
//! engine.
//!
//! Two strategies ship:
//!
//! - [`ColumnPicker::RoundRobin`]: cycle through columns. While the wall is
//!   bounded the cycle is capped at the initial item count so a 4-column wall
//!   showing 2 items does not leave gaps.
//! - [`ColumnPicker::ShortestColumn`]: put the card in the shortest column,
//!   once every column has been seeded round-robin.
//!
//! Custom strategies implement [`PickColumn`]. The engine clamps whatever
//! index they return into range.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::model::ConfigurationError;

/// Read-only view of engine state handed to a picker.
#[derive(Debug, Clone, Copy)]
pub struct PickContext<'a> {
    /// Configured column count.
    pub column_count: usize,
    /// Number of columns that currently exist.
    pub live_columns: usize,
    /// Cached column heights, indexed by column.
    pub heights: &'a [u32],
    /// Whether the wall is still on its initial, bounded page.
    pub bounded: bool,
    /// Wall-wide visible item limit while bounded.
    pub max_visible_items: Option<usize>,
    /// Position of the card being placed among all cards in the wall.
    pub card_index: usize,
    /// Number of cards in the wall, including the one being placed.
    pub total_cards: usize,
}

/// Cursor state shared by the built-in pickers.
///
/// Owned by the engine and reset at the start of every relayout.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PickerState {
    /// Last round-robin column; `None` before the first pick.
    round_robin_cursor: Option<usize>,
    /// Column chosen by the last shortest-column scan.
    shortest_hint: usize,
}

impl PickerState {
    /// Forget all cursor positions.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Last column handed out by round-robin.
    pub fn round_robin_cursor(&self) -> Option<usize> {
        self.round_robin_cursor
    }

    /// Column chosen by the last shortest-column scan.
    pub fn shortest_hint(&self) -> usize {
        self.shortest_hint
    }
}

/// A column selection strategy.
pub trait PickColumn: fmt::Debug {
    /// Choose the column index for the card described by `ctx`.
    fn pick(&self, state: &mut PickerState, ctx: &PickContext<'_>) -> usize;
}

/// Built-in strategies, selectable by name in configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ColumnPicker {
    /// Cycle through columns in order.
    #[default]
    RoundRobin,
    /// Fill the shortest column first.
    ShortestColumn,
}

impl ColumnPicker {
    /// Configuration name of this picker.
    pub fn as_str(self) -> &'static str {
        match self {
            ColumnPicker::RoundRobin => "round-robin",
            ColumnPicker::ShortestColumn => "shortest-column",
        }
    }
}

impl fmt::Display for ColumnPicker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ColumnPicker {
    type Err = ConfigurationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "round-robin" | "roundRobin" => Ok(ColumnPicker::RoundRobin),
            "shortest-column" | "shortestColumn" => Ok(ColumnPicker::ShortestColumn),
            other => Err(ConfigurationError::UnknownPicker(other.to_string())),
        }
    }
}

impl PickColumn for ColumnPicker {
    fn pick(&self, state: &mut PickerState, ctx: &PickContext<'_>) -> usize {
        match self {
            ColumnPicker::RoundRobin => round_robin(state, ctx),
            ColumnPicker::ShortestColumn => shortest_column(state, ctx),
        }
    }
}

/// Round-robin pick.
///
/// While bounded, the cycle length is `min(max_visible_items, column_count)`
/// (a zero or missing limit means `column_count`). Unbounded, it is
/// `column_count`. The cycle length is never below 1.
pub fn round_robin(state: &mut PickerState, ctx: &PickContext<'_>) -> usize {
    let columns = ctx.column_count.max(1);
    let cap = if ctx.bounded {
        let max_visible = ctx.max_visible_items.filter(|&n| n > 0).unwrap_or(columns);
        max_visible.min(columns).max(1)
    } else {
        columns
    };

    let next = match state.round_robin_cursor {
        None => 0,
        Some(cursor) => (cursor + 1) % cap,
    };
    state.round_robin_cursor = Some(next);
    next
}

/// Shortest-column pick.
///
/// Defers to [`round_robin`] for the first card and while the wall holds no
/// more cards than it has columns. Otherwise scans column heights left to
/// right: a strictly shorter column becomes the target, and the first column
/// whose height equals the current minimum stops the scan. The earliest
/// column wins ties.
pub fn shortest_column(state: &mut PickerState, ctx: &PickContext<'_>) -> usize {
    if ctx.card_index == 0 || ctx.total_cards <= ctx.live_columns {
        return round_robin(state, ctx);
    }

    let mut target = state.shortest_hint;
    let mut shortest: Option<u32> = None;
    for index in 0..ctx.live_columns {
        let height = ctx.heights.get(index).copied().unwrap_or(0);
        match shortest {
            None => {
                shortest = Some(height);
                target = index;
            }
            Some(current) if height < current => {
                shortest = Some(height);
                target = index;
            }
            Some(current) if height == current => break,
            Some(_) => {}
        }
    }

    if target >= ctx.live_columns {
        target = 0;
    }
    state.shortest_hint = target;
    target
}

#[cfg(test)]
#[path = "picker_tests.rs"]
mod tests;
