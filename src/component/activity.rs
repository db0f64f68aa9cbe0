//! Activity emission for analytics.
//!
//! The component reports a handful of lifecycle activities (`init`, `load`,
//! `request_more`, `modal_load`). Each is serialized to JSON with its
//! context and handed to an [`ActivitySink`]. In debug mode the JSON is
//! written to the log instead of the sink; a disabled emitter (designer or
//! share preview) sends nothing.

use crate::model::ContentItem;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::cell::RefCell;
use std::fmt;
use std::io::Write;
use std::rc::Rc;
use tracing::{debug, warn};

/// Activity vocabulary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivityType {
    /// The wall was created with a collection.
    Init,
    /// The initial page finished loading.
    Load,
    /// The reader asked for more content.
    RequestMore,
    /// A card was opened in the modal.
    ModalLoad,
}

/// Who is emitting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ActivityContext {
    /// Embedding application name.
    pub app_name: Option<String>,
    /// Component name.
    pub name: &'static str,
    /// Component kind.
    #[serde(rename = "type")]
    pub kind: &'static str,
    /// Component version.
    pub version: &'static str,
    /// Component instance id.
    pub uuid: String,
    /// Collection network.
    pub network: String,
    /// Collection site id.
    pub site_id: String,
    /// Collection id, once known.
    pub collection_id: Option<String>,
}

impl ActivityContext {
    /// Context for the media wall instance `uuid` on `network`/`site_id`.
    pub fn new(uuid: impl Into<String>, network: impl Into<String>, site_id: impl Into<String>) -> Self {
        Self {
            app_name: None,
            name: "Media Wall",
            kind: "App",
            version: env!("CARGO_PKG_VERSION"),
            uuid: uuid.into(),
            network: network.into(),
            site_id: site_id.into(),
            collection_id: None,
        }
    }
}

/// One emitted activity.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Activity {
    /// Emitter context.
    pub context: ActivityContext,
    /// What happened.
    #[serde(rename = "type")]
    pub kind: ActivityType,
    /// Content involved, if any.
    pub data: Option<ContentItem>,
    /// When it happened.
    pub timestamp: DateTime<Utc>,
}

// ===== Sinks =====

/// Destination for activities.
pub trait ActivitySink: fmt::Debug {
    /// Deliver one activity.
    fn deliver(&mut self, activity: &Activity);
}

/// Writes each activity as one JSON line.
#[derive(Debug)]
pub struct JsonLinesSink<W: Write + fmt::Debug> {
    writer: W,
}

impl<W: Write + fmt::Debug> JsonLinesSink<W> {
    /// Sink writing to `writer`.
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    /// Recover the writer.
    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write + fmt::Debug> ActivitySink for JsonLinesSink<W> {
    fn deliver(&mut self, activity: &Activity) {
        let result = serde_json::to_writer(&mut self.writer, activity)
            .map_err(std::io::Error::from)
            .and_then(|()| self.writer.write_all(b"\n"))
            .and_then(|()| self.writer.flush());
        if let Err(error) = result {
            warn!(%error, "Failed to write activity");
        }
    }
}

/// Logs each activity at `info`.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl ActivitySink for TracingSink {
    fn deliver(&mut self, activity: &Activity) {
        match serde_json::to_string(activity) {
            Ok(json) => tracing::info!(activity = %json, "Activity"),
            Err(error) => warn!(%error, "Failed to serialize activity"),
        }
    }
}

/// Keeps every activity in a shared list.
#[derive(Debug, Default, Clone)]
pub struct RecordingSink {
    delivered: Rc<RefCell<Vec<Activity>>>,
}

impl RecordingSink {
    /// Empty recorder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Kinds delivered so far, in order.
    pub fn kinds(&self) -> Vec<ActivityType> {
        self.delivered.borrow().iter().map(|a| a.kind).collect()
    }

    /// Activities delivered so far.
    pub fn activities(&self) -> Vec<Activity> {
        self.delivered.borrow().clone()
    }
}

impl ActivitySink for RecordingSink {
    fn deliver(&mut self, activity: &Activity) {
        self.delivered.borrow_mut().push(activity.clone());
    }
}

// ===== Emitter =====

/// Builds activities and routes them to a sink.
#[derive(Debug)]
pub struct ActivityEmitter {
    context: ActivityContext,
    sink: Box<dyn ActivitySink>,
    disabled: bool,
    debug: bool,
    sent: usize,
}

impl ActivityEmitter {
    /// Emitter for `context`.
    pub fn new(context: ActivityContext, sink: Box<dyn ActivitySink>) -> Self {
        Self {
            context,
            sink,
            disabled: false,
            debug: false,
            sent: 0,
        }
    }

    /// Suppress delivery (designer and share previews).
    pub fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    /// Log activities instead of delivering them.
    pub fn debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    /// Record the collection id once content reveals it.
    pub fn set_collection_id(&mut self, id: Option<String>) {
        if self.context.collection_id.is_none() {
            self.context.collection_id = id;
        }
    }

    /// Emit `kind`, optionally about `content`.
    ///
    /// Returns the activity built, even when it was not delivered.
    pub fn send(&mut self, kind: ActivityType, content: Option<&ContentItem>) -> Activity {
        let activity = Activity {
            context: self.context.clone(),
            kind,
            data: content.cloned(),
            timestamp: Utc::now(),
        };
        if self.debug {
            match serde_json::to_string_pretty(&activity) {
                Ok(json) => debug!("Activity {json}"),
                Err(error) => warn!(%error, "Failed to serialize activity"),
            }
        } else if !self.disabled {
            self.sink.deliver(&activity);
            self.sent += 1;
        }
        activity
    }

    /// Number of activities delivered.
    pub fn sent(&self) -> usize {
        self.sent
    }

    /// Emitter context.
    pub fn context(&self) -> &ActivityContext {
        &self.context
    }
}
