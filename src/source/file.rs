//! Read-once file source.

use crate::model::error::InputError;
use std::fs;
use std::path::{Path, PathBuf};

/// A JSONL file loaded in full at construction.
#[derive(Debug)]
pub struct FileSource {
    path: PathBuf,
    lines: Option<Vec<String>>,
}

impl FileSource {
    /// Load every line of `path`.
    ///
    /// # Errors
    ///
    /// Returns `InputError::FileNotFound` if the file does not exist and
    /// `InputError::Io` if it cannot be read.
    pub fn new(path: impl AsRef<Path>) -> Result<Self, InputError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(InputError::FileNotFound {
                path: path.to_path_buf(),
            });
        }
        let content = fs::read_to_string(path)?;
        let lines = content.lines().map(str::to_string).collect();
        tracing::debug!(path = %path.display(), "Loaded content file");
        Ok(Self {
            path: path.to_path_buf(),
            lines: Some(lines),
        })
    }

    /// All lines on the first call, then nothing.
    pub fn drain_lines(&mut self) -> Vec<String> {
        self.lines.take().unwrap_or_default()
    }

    /// Path the lines were read from.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_file(name: &str, content: &str) -> PathBuf {
        let path = std::env::temp_dir().join(name);
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn new_reads_all_lines() {
        let path = temp_file("mediawall_file_all_lines.jsonl", "one\ntwo\nthree");
        let mut source = FileSource::new(&path).unwrap();
        let _ = fs::remove_file(&path);

        assert_eq!(source.path(), path.as_path());
        assert_eq!(source.drain_lines(), vec!["one", "two", "three"]);
    }

    #[test]
    fn second_drain_is_empty() {
        let path = temp_file("mediawall_file_second_drain.jsonl", "one\n");
        let mut source = FileSource::new(&path).unwrap();
        let _ = fs::remove_file(&path);

        source.drain_lines();
        assert!(source.drain_lines().is_empty());
    }

    #[test]
    fn missing_file_is_not_found() {
        let err = FileSource::new("/nonexistent/feed.jsonl").unwrap_err();
        assert!(matches!(err, InputError::FileNotFound { .. }));
    }
}
