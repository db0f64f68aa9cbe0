//! Content event sources.
//!
//! - File loading for read-once input
//! - Stdin for piped input (live streaming)
//! - Unified [`InputSource`] enum for both
//!
//! Sources hand back raw lines. Parsing happens in [`crate::integration`] so
//! line numbers stay attached to errors.

use crate::model::error::InputError;
use std::path::PathBuf;

pub mod file;
pub mod stdin;

pub use file::FileSource;
pub use stdin::StdinSource;

/// Unified input source for JSONL content events.
#[derive(Debug)]
pub enum InputSource {
    /// Read-once file.
    File(FileSource),
    /// Piped stdin, streamed until EOF.
    Stdin(StdinSource),
}

impl InputSource {
    /// Lines that arrived since the last poll. Never blocks.
    ///
    /// - File: every line on the first call, nothing afterwards
    /// - Stdin: whatever the reader thread has delivered so far
    ///
    /// # Errors
    ///
    /// Returns `InputError::Io` when the underlying reader failed.
    pub fn poll(&mut self) -> Result<Vec<String>, InputError> {
        match self {
            InputSource::File(f) => Ok(f.drain_lines()),
            InputSource::Stdin(s) => s.poll(),
        }
    }

    /// Whether more lines may still arrive.
    pub fn is_live(&self) -> bool {
        match self {
            InputSource::File(_) => false,
            InputSource::Stdin(s) => !s.is_complete(),
        }
    }
}

/// Pick the input source: the file when one is given, piped stdin otherwise.
///
/// # Errors
///
/// - `InputError::FileNotFound` if the file does not exist
/// - `InputError::NoInput` if no file is given and stdin is a terminal
/// - `InputError::Io` for read failures
pub fn detect_input_source(file: Option<PathBuf>) -> Result<InputSource, InputError> {
    match file {
        Some(path) => Ok(InputSource::File(FileSource::new(path)?)),
        None => Ok(InputSource::Stdin(StdinSource::new()?)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn file_source_yields_all_lines_once() {
        let path = std::env::temp_dir().join("mediawall_source_poll_once.jsonl");
        fs::write(&path, "{\"id\":\"a\"}\n{\"id\":\"b\"}\n").unwrap();

        let mut source = detect_input_source(Some(path.clone())).unwrap();
        let _ = fs::remove_file(&path);

        assert!(!source.is_live());
        assert_eq!(source.poll().unwrap().len(), 2);
        assert!(source.poll().unwrap().is_empty());
    }

    #[test]
    fn missing_file_is_reported() {
        let path = PathBuf::from("/nonexistent/mediawall/feed.jsonl");
        let err = detect_input_source(Some(path.clone())).unwrap_err();
        assert!(matches!(err, InputError::FileNotFound { path: p } if p == path));
    }

    #[test]
    fn stdin_variant_is_live_until_complete() {
        let mut source = InputSource::Stdin(StdinSource::from_reader(&b"{\"id\":\"a\"}\n"[..]));
        let mut lines = Vec::new();
        for _ in 0..200 {
            lines.extend(source.poll().unwrap());
            if !source.is_live() {
                break;
            }
            std::thread::sleep(std::time::Duration::from_millis(5));
        }
        assert!(!source.is_live());
        assert_eq!(lines, vec!["{\"id\":\"a\"}".to_string()]);
    }
}
