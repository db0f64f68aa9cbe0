//! Glue between the content stream and the wall component.
//!
//! Pure functions used by the event loop, testable without a terminal.

use crate::component::WallComponent;
use crate::layout::CardFactory;
use crate::model::{ContentEvent, ParseError, WallError};
use crate::parser;
use std::time::Instant;
use tracing::warn;

/// Parse raw JSONL lines into content events.
///
/// `starting_line_number` is the 1-based number of the first line. Returns
/// the parsed events and the errors for lines that failed, in input order.
pub fn process_lines(
    lines: Vec<String>,
    starting_line_number: usize,
) -> (Vec<ContentEvent>, Vec<ParseError>) {
    let mut events = Vec::new();
    let mut errors = Vec::new();

    for (index, line) in lines.into_iter().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        match parser::parse_event(&line, starting_line_number + index) {
            Ok(event) => events.push(event),
            Err(err) => errors.push(err),
        }
    }

    (events, errors)
}

/// Feed events into the component. Returns how many were applied.
///
/// Events naming content the wall does not hold are logged and skipped.
///
/// # Errors
///
/// Propagates any other `WallError`, such as use after destroy.
pub fn apply_events<F: CardFactory + Clone>(
    component: &mut WallComponent<F>,
    events: Vec<ContentEvent>,
    now: Instant,
) -> Result<usize, WallError> {
    let mut applied = 0;
    for event in events {
        let result = match event {
            ContentEvent::Add(item) => component.add(item, now).map(|_| ()),
            ContentEvent::Remove(id) => component.remove(&id, now).map(|_| ()),
            ContentEvent::ImageLoaded { id, height } => {
                component.image_loaded(&id, height, now).map(|_| ())
            }
        };
        match result {
            Ok(()) => applied += 1,
            Err(WallError::UnknownCard(id)) => {
                warn!(id = %id, "Skipping event for unknown card");
            }
            Err(err) => return Err(err),
        }
    }
    Ok(applied)
}
