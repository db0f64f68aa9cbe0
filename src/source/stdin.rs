//! Stdin source for piped input.
//!
//! A background thread reads lines and forwards them over a channel so the
//! event loop can poll without blocking. Works for streams that keep
//! producing (`tail -f feed.jsonl | mediawall`) and for ones that end
//! (`cat feed.jsonl | mediawall`).

use crate::model::error::InputError;
use std::io::{BufRead, BufReader, IsTerminal, Read};
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::thread;

enum Chunk {
    Line(String),
    Failed(std::io::Error),
}

/// Line stream read from stdin (or any reader in tests).
#[derive(Debug)]
pub struct StdinSource {
    rx: Receiver<Chunk>,
    complete: bool,
}

impl StdinSource {
    /// Start reading piped stdin.
    ///
    /// # Errors
    ///
    /// Returns `InputError::NoInput` when stdin is an interactive terminal.
    pub fn new() -> Result<Self, InputError> {
        let stdin = std::io::stdin();
        if stdin.is_terminal() {
            return Err(InputError::NoInput);
        }
        Ok(Self::from_reader(stdin))
    }

    /// Read lines from `reader` on a background thread.
    pub fn from_reader<R: Read + Send + 'static>(reader: R) -> Self {
        let (tx, rx) = mpsc::channel();
        thread::spawn(move || {
            for line in BufReader::new(reader).lines() {
                let chunk = match line {
                    Ok(line) => Chunk::Line(line),
                    Err(err) => Chunk::Failed(err),
                };
                let failed = matches!(chunk, Chunk::Failed(_));
                if tx.send(chunk).is_err() || failed {
                    break;
                }
            }
            // Dropping the sender signals EOF
        });
        Self {
            rx,
            complete: false,
        }
    }

    /// Lines received since the last poll. Never blocks.
    ///
    /// # Errors
    ///
    /// Returns `InputError::Io` if the reader failed. Lines received before
    /// the failure were returned by earlier polls; the source is complete
    /// afterwards.
    pub fn poll(&mut self) -> Result<Vec<String>, InputError> {
        let mut lines = Vec::new();
        while !self.complete {
            match self.rx.try_recv() {
                Ok(Chunk::Line(line)) => lines.push(line),
                Ok(Chunk::Failed(err)) => {
                    self.complete = true;
                    return Err(InputError::Io(err));
                }
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => {
                    tracing::debug!("Stdin reached EOF");
                    self.complete = true;
                }
            }
        }
        Ok(lines)
    }

    /// Whether EOF was reached.
    pub fn is_complete(&self) -> bool {
        self.complete
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn read_all(source: &mut StdinSource) -> Vec<String> {
        let mut lines = Vec::new();
        for _ in 0..200 {
            lines.extend(source.poll().unwrap());
            if source.is_complete() {
                break;
            }
            thread::sleep(Duration::from_millis(5));
        }
        lines
    }

    struct FailingReader;

    impl Read for FailingReader {
        fn read(&mut self, _buf: &mut [u8]) -> std::io::Result<usize> {
            Err(std::io::Error::other("broken pipe"))
        }
    }

    #[test]
    fn delivers_lines_without_newlines() {
        let mut source = StdinSource::from_reader(&b"{\"line\": 1}\n{\"line\": 2}\n"[..]);
        assert_eq!(read_all(&mut source), vec!["{\"line\": 1}", "{\"line\": 2}"]);
        assert!(source.is_complete());
    }

    #[test]
    fn trailing_partial_line_is_delivered_at_eof() {
        let mut source = StdinSource::from_reader(&b"first\nsecond"[..]);
        assert_eq!(read_all(&mut source), vec!["first", "second"]);
    }

    #[test]
    fn empty_input_completes() {
        let mut source = StdinSource::from_reader(&b""[..]);
        assert!(read_all(&mut source).is_empty());
        assert!(source.is_complete());
        assert!(source.poll().unwrap().is_empty());
    }

    #[test]
    fn read_failure_is_reported_once() {
        let mut source = StdinSource::from_reader(FailingReader);
        let mut result = Ok(Vec::new());
        for _ in 0..200 {
            result = source.poll();
            if result.is_err() || source.is_complete() {
                break;
            }
            thread::sleep(Duration::from_millis(5));
        }
        assert!(matches!(result, Err(InputError::Io(_))));
        assert!(source.is_complete());
        assert!(source.poll().unwrap().is_empty());
    }
}
