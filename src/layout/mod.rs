//! Layout core - column count, column picking and card placement.
//!
//! # Module Structure
//!
//! - `measure`: `Measurable`/`Card` capabilities, `CardView`, card factories
//! - `column`: `ColumnView` - one vertical list of cards
//! - `picker`: `ColumnPicker` strategies and `PickerState`
//! - `style`: `ColumnStyle` - per-instance column width rule
//! - `engine`: `LayoutEngine` - owns the columns and routes every card

pub mod column;
pub mod engine;
pub mod measure;
pub mod picker;
pub mod style;

pub use column::ColumnView;
pub use engine::{ColumnOverride, LayoutEngine, LayoutOptions, DEFAULT_MIN_CONTENT_WIDTH};
pub use measure::{Card, CardFactory, CardView, Measurable, TextCardFactory};
pub use picker::{ColumnPicker, PickColumn, PickContext, PickerState};
pub use style::ColumnStyle;
