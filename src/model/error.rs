//! Error types for the media wall.
//!
//! Hierarchical error taxonomy built with `thiserror`. Domain errors compose
//! into [`AppError`] via `From`, so the binary can propagate everything with `?`.
//!
//! # Error Hierarchy
//!
//! - [`AppError`] - Top-level error for the binary
//!   - [`WallError`] - Layout/wall failures (configuration, use after destroy)
//!   - [`InputError`] - Content source failures (file not found, IO)
//!   - [`ParseError`] - Malformed content event lines
//!   - `ConfigError` - Unreadable or invalid config file
//!   - `LoggingError` - Log file setup failures
//!   - `std::io::Error` - Terminal failures
//!
//! # Recovery Strategy
//!
//! Parse errors are **non-fatal**: a malformed line is logged and skipped and
//! the wall keeps streaming. Configuration errors fail fast when the wall is
//! built. `IllegalState` is a programming error on the caller's side and aborts
//! the single call that hit it.
//!
//! Height measurement is deliberately *not* an error: an unmeasurable card
//! counts as 0 pixels (see `layout::measure`).

use super::identifiers::ContentId;
use std::path::PathBuf;
use thiserror::Error;

/// Top-level application error.
#[derive(Debug, Error)]
pub enum AppError {
    /// Wall layout or lifecycle failure.
    #[error("Wall error: {0}")]
    Wall(#[from] WallError),

    /// Failed to read content events.
    #[error("Failed to read input: {0}")]
    InputRead(#[from] InputError),

    /// Failed to parse a content event line.
    #[error("Failed to parse content event: {0}")]
    Parse(#[from] ParseError),

    /// Config file could not be loaded.
    #[error("Configuration file error: {0}")]
    Config(#[from] crate::config::ConfigError),

    /// Invalid option value outside the wall itself.
    #[error("Invalid configuration: {0}")]
    Configuration(#[from] ConfigurationError),

    /// Log file could not be set up.
    #[error("Logging setup failed: {0}")]
    Logging(#[from] crate::logging::LoggingError),

    /// Terminal or TUI rendering error.
    #[error("Terminal error: {0}")]
    Terminal(#[from] std::io::Error),
}

/// Errors raised by the layout engine, wall view and wall component.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WallError {
    /// Invalid configuration value; raised at construction or `configure`.
    #[error("Invalid configuration: {0}")]
    Configuration(#[from] ConfigurationError),

    /// Operation invoked after `destroy()`.
    ///
    /// The wall performs no mutation before returning this.
    #[error("Cannot {operation}: wall has been destroyed")]
    IllegalState {
        /// Name of the rejected operation.
        operation: &'static str,
    },

    /// A card-addressed operation named content the wall does not hold.
    #[error("Unknown card: {0}")]
    UnknownCard(ContentId),
}

impl WallError {
    /// Shorthand for [`WallError::IllegalState`].
    pub fn disposed(operation: &'static str) -> Self {
        Self::IllegalState { operation }
    }
}

/// Invalid user-supplied wall options.
///
/// Width-derived column counts never produce this: they are clamped to 1.
/// Only explicit values given by the embedder are rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigurationError {
    /// `min_content_width` must be positive.
    #[error("min_content_width must be greater than 0")]
    ZeroMinContentWidth,

    /// An explicit `columns` value must be positive.
    #[error("columns must be greater than 0")]
    ZeroColumns,

    /// The debounce window must be positive.
    #[error("debounce_ms must be greater than 0")]
    ZeroDebounce,

    /// Unrecognised column picker name.
    #[error("Unknown column picker '{0}' (expected 'round-robin' or 'shortest-column')")]
    UnknownPicker(String),

    /// Unrecognised post button kind.
    #[error("Unknown post button kind '{0}'")]
    UnknownPostButton(String),

    /// Unrecognised font size preset.
    #[error("Unknown font size '{0}' (expected small, medium or large)")]
    UnknownFontSize(String),

    /// Link color was not a `#rrggbb` hex string.
    #[error("Invalid color '{0}' (expected #rrggbb)")]
    InvalidColor(String),
}

/// Errors encountered when reading content events from a file or stdin.
#[derive(Debug, Error)]
pub enum InputError {
    /// The specified file does not exist.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::path::PathBuf;
    /// use mediawall::model::error::InputError;
    ///
    /// let err = InputError::FileNotFound {
    ///     path: PathBuf::from("/tmp/missing.jsonl")
    /// };
    /// assert!(err.to_string().contains("/tmp/missing.jsonl"));
    /// ```
    #[error("File not found: {path}")]
    FileNotFound {
        /// The path that was not found.
        path: PathBuf,
    },

    /// No input source: no file argument and stdin is a terminal.
    #[error("No input source: provide a file path or pipe data to stdin")]
    NoInput,

    /// Generic I/O error reading from the input source.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors encountered when parsing a content event line.
///
/// Non-fatal: the line is logged and skipped.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// The line is not valid JSON, or does not match any event shape.
    ///
    /// # Examples
    ///
    /// ```
    /// use mediawall::model::error::ParseError;
    ///
    /// let err = ParseError::InvalidJson {
    ///     line: 42,
    ///     message: "expected value".to_string()
    /// };
    /// assert!(err.to_string().contains("line 42"));
    /// ```
    #[error("Invalid JSON at line {line}: {message}")]
    InvalidJson {
        /// 1-based line number.
        line: usize,
        /// Parser message from `serde_json`.
        message: String,
    },

    /// A required field was missing from an event.
    #[error("Missing required field '{field}' at line {line}")]
    MissingField {
        /// 1-based line number.
        line: usize,
        /// Name of the missing field.
        field: &'static str,
    },

    /// The `op` tag names an operation this reader does not know.
    #[error("Unknown operation '{op}' at line {line}")]
    UnknownOperation {
        /// 1-based line number.
        line: usize,
        /// The unrecognised tag.
        op: String,
    },
}
