//! Per-instance column width rule.
//!
//! Columns flow as plain blocks side by side, each `100 / n` percent wide.
//! The rule is scoped to one wall instance so several walls can share a page.

use std::fmt;

/// Class applied to the wall root, suffixed with the instance id.
pub const WALL_CLASS_PREFIX: &str = "streamhub-media-wall-";
/// Class applied to every column.
pub const COLUMN_CLASS: &str = "hub-wall-column";

/// Width rule for the columns of one wall instance.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnStyle {
    instance_id: String,
    column_count: usize,
}

impl ColumnStyle {
    /// Rule for `column_count` columns in wall `instance_id`.
    pub fn new(instance_id: impl Into<String>, column_count: usize) -> Self {
        Self {
            instance_id: instance_id.into(),
            column_count: column_count.max(1),
        }
    }

    /// Replace the column count.
    pub fn set_column_count(&mut self, column_count: usize) {
        self.column_count = column_count.max(1);
    }

    /// Id of the wall instance the rule is scoped to.
    pub fn instance_id(&self) -> &str {
        &self.instance_id
    }

    /// Column width as a percentage of the container.
    pub fn width_percent(&self) -> f64 {
        100.0 / self.column_count as f64
    }

    /// Id of the `<style>` element holding the rule.
    pub fn element_id(&self) -> String {
        format!("wall-style-{}", self.instance_id)
    }

    /// Rendered CSS rule.
    pub fn css(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for ColumnStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            ".{}{} .{} {{ width: {}%; }}",
            WALL_CLASS_PREFIX,
            self.instance_id,
            COLUMN_CLASS,
            self.width_percent()
        )
    }
}
