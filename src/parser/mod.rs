//! JSONL parser for content stream events.
//!
//! Each line is one event. A line with an `op` field is an explicit
//! operation; any other object is taken to be a content item to add.
//!
//! ```text
//! {"id":"c1","body":"hello"}                    add (implicit)
//! {"op":"add","content":{"id":"c1",...}}        add
//! {"op":"remove","id":"c1"}                     remove
//! {"op":"image_loaded","id":"c1","height":240}  image loaded
//! ```

use crate::model::{ContentEvent, ContentId, ContentItem, ParseError};
use serde_json::{Map, Value};

const OP_ADD: &str = "add";
const OP_REMOVE: &str = "remove";
const OP_IMAGE_LOADED: &str = "image_loaded";

/// Parse one JSONL line into an event.
///
/// # Errors
///
/// Returns `ParseError` naming `line_number` when the line is not a JSON
/// object, lacks a required field, or names an unknown operation.
pub fn parse_event(raw: &str, line_number: usize) -> Result<ContentEvent, ParseError> {
    let invalid = |message: String| ParseError::InvalidJson {
        line: line_number,
        message,
    };
    let value: Value = serde_json::from_str(raw).map_err(|e| invalid(e.to_string()))?;
    let Value::Object(mut object) = value else {
        return Err(invalid("expected a JSON object".to_string()));
    };

    let op = match object.remove("op") {
        None => return parse_content(Value::Object(object), line_number).map(ContentEvent::Add),
        Some(Value::String(op)) => op,
        Some(other) => {
            return Err(ParseError::UnknownOperation {
                line: line_number,
                op: other.to_string(),
            })
        }
    };

    match op.as_str() {
        OP_ADD => {
            let content = object.remove("content").ok_or(ParseError::MissingField {
                line: line_number,
                field: "content",
            })?;
            parse_content(content, line_number).map(ContentEvent::Add)
        }
        OP_REMOVE => Ok(ContentEvent::Remove(parse_id(&object, line_number)?)),
        OP_IMAGE_LOADED => {
            let id = parse_id(&object, line_number)?;
            let height = object
                .get("height")
                .ok_or(ParseError::MissingField {
                    line: line_number,
                    field: "height",
                })?
                .as_u64()
                .and_then(|h| u32::try_from(h).ok())
                .ok_or_else(|| invalid("height must be a non-negative integer".to_string()))?;
            Ok(ContentEvent::ImageLoaded { id, height })
        }
        _ => Err(ParseError::UnknownOperation {
            line: line_number,
            op,
        }),
    }
}

fn parse_content(value: Value, line_number: usize) -> Result<ContentItem, ParseError> {
    if value.get("id").is_none() {
        return Err(ParseError::MissingField {
            line: line_number,
            field: "id",
        });
    }
    serde_json::from_value(value).map_err(|e| ParseError::InvalidJson {
        line: line_number,
        message: e.to_string(),
    })
}

fn parse_id(object: &Map<String, Value>, line_number: usize) -> Result<ContentId, ParseError> {
    let missing = ParseError::MissingField {
        line: line_number,
        field: "id",
    };
    let raw = object.get("id").and_then(Value::as_str).ok_or(missing.clone())?;
    ContentId::new(raw).map_err(|_| missing)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(raw: &str) -> ContentId {
        ContentId::new(raw).unwrap()
    }

    #[test]
    fn bare_object_is_an_add() {
        let event = parse_event(r#"{"id":"c1","body":"hello","author":"ann"}"#, 1).unwrap();
        let ContentEvent::Add(item) = event else {
            panic!("expected add, got {event:?}");
        };
        assert_eq!(item.id, id("c1"));
        assert_eq!(item.body, "hello");
        assert_eq!(item.author.as_deref(), Some("ann"));
    }

    #[test]
    fn explicit_add_with_attachments() {
        let line = r#"{"op":"add","content":{"id":"c2","attachments":[{"kind":"photo","height":120}],"created_at":"2025-01-02T03:04:05Z"}}"#;
        let ContentEvent::Add(item) = parse_event(line, 1).unwrap() else {
            panic!("expected add");
        };
        assert_eq!(item.attachments.len(), 1);
        assert_eq!(item.attachment_height(), 120);
        assert!(item.created_at.is_some());
    }

    #[test]
    fn remove_and_image_loaded() {
        assert_eq!(
            parse_event(r#"{"op":"remove","id":"c1"}"#, 1).unwrap(),
            ContentEvent::Remove(id("c1"))
        );
        assert_eq!(
            parse_event(r#"{"op":"image_loaded","id":"c1","height":240}"#, 1).unwrap(),
            ContentEvent::ImageLoaded {
                id: id("c1"),
                height: 240
            }
        );
    }

    #[test]
    fn malformed_json_keeps_line_number() {
        let err = parse_event(r#"{"id":"c1""#, 42).unwrap_err();
        assert!(matches!(err, ParseError::InvalidJson { line: 42, .. }));
    }

    #[test]
    fn non_object_is_invalid() {
        assert!(matches!(
            parse_event("[1,2]", 3),
            Err(ParseError::InvalidJson { line: 3, .. })
        ));
    }

    #[test]
    fn missing_fields_are_named() {
        let cases = [
            (r#"{"body":"no id"}"#, "id"),
            (r#"{"op":"add"}"#, "content"),
            (r#"{"op":"remove"}"#, "id"),
            (r#"{"op":"remove","id":"  "}"#, "id"),
            (r#"{"op":"image_loaded","id":"c1"}"#, "height"),
        ];
        for (line, field) in cases {
            assert_eq!(
                parse_event(line, 7),
                Err(ParseError::MissingField { line: 7, field }),
                "{line}"
            );
        }
    }

    #[test]
    fn negative_height_is_invalid() {
        let err = parse_event(r#"{"op":"image_loaded","id":"c1","height":-5}"#, 2).unwrap_err();
        assert!(matches!(err, ParseError::InvalidJson { line: 2, .. }));
    }

    #[test]
    fn unknown_operation_is_reported() {
        assert_eq!(
            parse_event(r#"{"op":"pin","id":"c1"}"#, 9),
            Err(ParseError::UnknownOperation {
                line: 9,
                op: "pin".to_string()
            })
        );
    }
}
