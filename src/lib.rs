//! Media Wall (mediawall)
//!
//! Responsive multi-column masonry wall for a stream of content cards.
//!
//! Pure Core / Impure Shell:
//! - `layout`, `wall`, `component` and `schedule` are deterministic and take
//!   the current `Instant` as an argument.
//! - `source`, `view` and `logging` own the terminal, stdin and files.

pub mod component;
pub mod config;
pub mod layout;
pub mod logging;
pub mod model;
pub mod parser;
pub mod schedule;
pub mod source;
pub mod view;
pub mod wall;

// Re-export main loop integration
pub mod integration;
