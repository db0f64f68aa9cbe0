//! WallComponent - a wall with header, theme, analytics and runtime configuration.
//!
//! # Module Structure
//!
//! - `collection`: `CollectionRef` identity and sameness
//! - `header`: post button kinds and header visibility
//! - `theme`: font presets and link-color derived button colors
//! - `activity`: analytics activities and sinks
//! - `goal`: initial-load detection
//!
//! The component owns one [`WallView`] at a time. Some configuration changes
//! (initial count, modal, collection) rebuild the wall from scratch; the
//! component keeps the content it has seen so a rebuilt wall can be refilled
//! without going back to the source.

pub mod activity;
pub mod collection;
pub mod goal;
pub mod header;
pub mod theme;

pub use activity::{
    Activity, ActivityContext, ActivityEmitter, ActivitySink, ActivityType, JsonLinesSink,
    RecordingSink, TracingSink,
};
pub use collection::{is_same_collection, CollectionRef};
pub use goal::LoadGoalWatcher;
pub use header::{HeaderOptions, HeaderView, PostButton, PostButtonKind, PostConfig};
pub use theme::{FontSize, Rgb, Theme};

use crate::layout::{CardFactory, ColumnOverride};
use crate::model::{ConfigurationError, ContentId, ContentItem, WallError};
use crate::wall::{WallEvent, WallOptions, WallView};
use std::num::NonZeroUsize;
use std::time::Instant;
use tracing::{debug, info};
use uuid::Uuid;

// ===== Options =====

/// Construction options for [`WallComponent`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComponentOptions {
    /// Wall options. The instance id is replaced by the component uuid.
    pub wall: WallOptions,
    /// Collection shown.
    pub collection: Option<CollectionRef>,
    /// Header options.
    pub header: HeaderOptions,
    /// Link color for themed buttons.
    pub link_color: Option<Rgb>,
    /// Card text size.
    pub font_size: Option<FontSize>,
    /// Whether cards open in a modal when focused.
    pub modal: bool,
    /// Running inside the designer preview.
    pub in_designer: bool,
    /// Running inside a share preview.
    pub in_share: bool,
    /// Log activities instead of delivering them.
    pub debug_activities: bool,
    /// Embedding application name.
    pub app_name: Option<String>,
}

impl Default for ComponentOptions {
    fn default() -> Self {
        Self {
            wall: WallOptions::default(),
            collection: None,
            header: HeaderOptions::default(),
            link_color: None,
            font_size: None,
            modal: true,
            in_designer: false,
            in_share: false,
            debug_activities: false,
            app_name: None,
        }
    }
}

/// Runtime configuration change.
///
/// Every field is "leave alone" when `None`. Nested options distinguish
/// setting a value from clearing it: `columns: Some(None)` returns to
/// auto-fit, `collection: Some(None)` drops the collection.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigureOpts {
    /// Pin (`Some(Some(n))`) or auto-fit (`Some(None)`) the column count.
    pub columns: Option<Option<usize>>,
    /// New initial goal; rebuilds the wall.
    pub initial: Option<usize>,
    /// New "show more" amount; rebuilds the wall.
    pub show_more: Option<Option<usize>>,
    /// Enable or disable the modal; rebuilds the wall.
    pub modal: Option<bool>,
    /// Swap collections; rebuilds wall and header when it differs.
    pub collection: Option<Option<CollectionRef>>,
    /// New post button kind; rebuilds the header.
    pub post_button: Option<Option<PostButtonKind>>,
    /// Editor title field; rebuilds the header.
    pub show_title: Option<bool>,
    /// Editor attachment requirement; rebuilds the header.
    pub media_required: Option<bool>,
    /// New link color; rebuilds the header when it changes.
    pub link_color: Option<Option<Rgb>>,
    /// New font size.
    pub font_size: Option<Option<FontSize>>,
}

// ===== WallComponent =====

/// Media wall component.
#[derive(Debug)]
pub struct WallComponent<F: CardFactory + Clone> {
    uuid: Uuid,
    style_prefix: String,
    options: ComponentOptions,
    factory: F,
    wall: WallView<F>,
    header: HeaderView,
    theme: Theme,
    history: Vec<ContentItem>,
    container_width: Option<u32>,
    emitter: Option<ActivityEmitter>,
    sink: Option<Box<dyn ActivitySink>>,
    goal: Option<LoadGoalWatcher>,
    events: Vec<WallEvent>,
    destroyed: bool,
}

impl<F: CardFactory + Clone> WallComponent<F> {
    /// Build a component. Emits `Init` when a collection is configured.
    ///
    /// # Errors
    ///
    /// `ConfigurationError` for invalid wall options.
    pub fn new(
        options: ComponentOptions,
        factory: F,
        sink: Box<dyn ActivitySink>,
    ) -> Result<Self, WallError> {
        let uuid = Uuid::new_v4();
        let theme = Theme::new(options.link_color, options.font_size);
        let header = HeaderView::new(options.header.clone(), options.collection.clone(), &theme);
        let wall = WallView::new(wall_options(&options, &uuid), factory.clone())?;

        let mut component = Self {
            style_prefix: format!("[lf-wall-uuid=\"{uuid}\"] "),
            uuid,
            options,
            factory,
            wall,
            header,
            theme,
            history: Vec::new(),
            container_width: None,
            emitter: None,
            sink: Some(sink),
            goal: None,
            events: Vec::new(),
            destroyed: false,
        };
        component.init_activity();
        info!(uuid = %component.uuid, "Wall component created");
        Ok(component)
    }

    fn init_activity(&mut self) {
        if self.emitter.is_some() {
            return;
        }
        let Some(collection) = self.options.collection.as_ref() else {
            return;
        };
        let Some(sink) = self.sink.take() else {
            return;
        };
        let mut context = ActivityContext::new(
            self.uuid.to_string(),
            collection.network.clone(),
            collection.site_id.clone(),
        );
        context.app_name = self.options.app_name.clone();
        context.collection_id = collection.id.clone();

        let mut emitter = ActivityEmitter::new(context, sink)
            .disabled(self.options.in_designer || self.options.in_share)
            .debug(self.options.debug_activities);
        emitter.send(ActivityType::Init, None);
        self.emitter = Some(emitter);
        self.goal = Some(LoadGoalWatcher::new());
    }

    // ===== Lifecycle =====

    /// Attach to a container `width` pixels wide.
    ///
    /// # Errors
    ///
    /// `IllegalState` after destroy.
    pub fn mount(&mut self, width: u32, now: Instant) -> Result<(), WallError> {
        self.ensure_live("mount")?;
        self.container_width = Some(width);
        self.wall.mount(width)?;
        self.collect(now);
        Ok(())
    }

    /// Container resized.
    ///
    /// # Errors
    ///
    /// `IllegalState` after destroy.
    pub fn resize(&mut self, width: u32, now: Instant) -> Result<(), WallError> {
        self.ensure_live("resize")?;
        self.container_width = Some(width);
        self.wall.resize(width, now)
    }

    /// Run deferred work due at `now`: debounced resize and the load check.
    ///
    /// Returns whether the columns were rebuilt.
    ///
    /// # Errors
    ///
    /// `IllegalState` after destroy.
    pub fn tick(&mut self, now: Instant) -> Result<bool, WallError> {
        self.ensure_live("tick")?;
        let rebuilt = self.wall.tick(now)?;
        self.collect(now);
        if self.goal.as_mut().is_some_and(|goal| goal.poll(now)) {
            self.send(ActivityType::Load, None);
        }
        Ok(rebuilt)
    }

    /// The wall scrolled into view: lay out again.
    ///
    /// # Errors
    ///
    /// `IllegalState` after destroy.
    pub fn entered_view(&mut self, now: Instant) -> Result<(), WallError> {
        self.ensure_live("relayout")?;
        self.wall.relayout(None)?;
        self.collect(now);
        Ok(())
    }

    /// Tear down wall, header, theme and analytics, cancelling all timers.
    ///
    /// # Errors
    ///
    /// `IllegalState` if already destroyed.
    pub fn destroy(&mut self) -> Result<(), WallError> {
        self.ensure_live("destroy")?;
        self.header.destroy();
        if let Some(goal) = self.goal.as_mut() {
            goal.cancel();
        }
        self.goal = None;
        self.emitter = None;
        self.theme = Theme::default();
        self.wall.destroy()?;
        self.history.clear();
        self.events.clear();
        self.destroyed = true;
        info!(uuid = %self.uuid, "Wall component destroyed");
        Ok(())
    }

    // ===== Content =====

    /// Add content from the collection.
    ///
    /// # Errors
    ///
    /// `IllegalState` after destroy.
    pub fn add(&mut self, item: ContentItem, now: Instant) -> Result<Option<usize>, WallError> {
        self.ensure_live("add")?;
        if !self.history.iter().any(|seen| seen.id == item.id) {
            self.history.push(item.clone());
        }
        let placed = self.wall.add(item)?;
        self.collect(now);
        Ok(placed)
    }

    /// Remove content.
    ///
    /// # Errors
    ///
    /// `IllegalState` after destroy.
    pub fn remove(&mut self, id: &ContentId, now: Instant) -> Result<bool, WallError> {
        self.ensure_live("remove")?;
        self.history.retain(|seen| &seen.id != id);
        let removed = self.wall.remove(id)?;
        self.collect(now);
        Ok(removed)
    }

    /// A card's media loaded.
    ///
    /// # Errors
    ///
    /// `IllegalState` after destroy; `UnknownCard` for unseen content.
    pub fn image_loaded(
        &mut self,
        id: &ContentId,
        height: u32,
        now: Instant,
    ) -> Result<Option<usize>, WallError> {
        self.ensure_live("update card height")?;
        let column = self.wall.image_loaded(id, height)?;
        if let Some(seen) = self.history.iter_mut().find(|seen| &seen.id == id) {
            seen.height = Some(height);
        }
        self.collect(now);
        Ok(column)
    }

    /// Reader asked for more. Emits `RequestMore`.
    ///
    /// # Errors
    ///
    /// `IllegalState` after destroy.
    pub fn show_more(&mut self, count: Option<usize>, now: Instant) -> Result<usize, WallError> {
        self.ensure_live("show more")?;
        self.send(ActivityType::RequestMore, None);
        let released = self.wall.show_more(count)?;
        self.collect(now);
        Ok(released)
    }

    /// Reader opened a card. Emits `ModalLoad` when the modal is enabled.
    ///
    /// # Errors
    ///
    /// `IllegalState` after destroy.
    pub fn focus_content(&mut self, id: &ContentId) -> Result<(), WallError> {
        self.ensure_live("focus content")?;
        if !self.options.modal {
            debug!(card = %id, "Modal disabled, focus ignored");
            return Ok(());
        }
        let content = self.history.iter().find(|seen| &seen.id == id).cloned();
        self.send(ActivityType::ModalLoad, content.as_ref());
        Ok(())
    }

    fn send(&mut self, kind: ActivityType, content: Option<&ContentItem>) {
        if let Some(emitter) = self.emitter.as_mut() {
            emitter.send(kind, content);
        }
    }

    /// Move wall events to the outward queue, feeding the load watcher.
    fn collect(&mut self, now: Instant) {
        let events = self.wall.drain_events();
        let added = events.iter().filter(|event| event.is_card_added()).count();
        if added > 0 {
            if let Some(emitter) = self.emitter.as_mut() {
                let id = self.options.collection.as_ref().and_then(|c| c.id.clone());
                emitter.set_collection_id(id);
            }
        }
        let mut loaded = false;
        if let Some(goal) = self.goal.as_mut() {
            let remaining = self.wall.stash().goal();
            for _ in 0..added {
                loaded |= goal.card_added(now, remaining);
            }
        }
        if loaded {
            self.send(ActivityType::Load, None);
        }
        self.events.extend(events);
    }

    // ===== Configuration =====

    /// Change configuration at runtime.
    ///
    /// `None` restores defaults: the theme is removed and the collection
    /// dropped.
    ///
    /// # Errors
    ///
    /// `IllegalState` after destroy; `ConfigurationError` for an explicit
    /// zero column count.
    pub fn configure(&mut self, opts: Option<ConfigureOpts>, now: Instant) -> Result<(), WallError> {
        self.ensure_live("configure")?;
        let Some(opts) = opts else {
            self.options.link_color = None;
            self.options.font_size = None;
            self.theme = Theme::default();
            return self.configure(
                Some(ConfigureOpts {
                    collection: Some(None),
                    ..ConfigureOpts::default()
                }),
                now,
            );
        };

        let mut rebuild_wall = false;
        let mut rebuild_header = false;

        if let Some(link_color) = opts.link_color {
            if link_color != self.options.link_color {
                rebuild_header = true;
            }
            self.options.link_color = link_color;
        }
        if let Some(font_size) = opts.font_size {
            self.options.font_size = font_size;
        }
        self.theme = Theme::new(self.options.link_color, self.options.font_size);

        if let Some(columns) = opts.columns {
            let column_override = match columns {
                Some(count) => ColumnOverride::Fixed(
                    NonZeroUsize::new(count).ok_or(ConfigurationError::ZeroColumns)?,
                ),
                None => ColumnOverride::AutoFit,
            };
            self.options.wall.columns = columns;
            self.wall.relayout(Some(column_override))?;
        }
        if let Some(initial) = opts.initial {
            self.options.wall.initial = initial;
            rebuild_wall = true;
        }
        if let Some(show_more) = opts.show_more {
            self.options.wall.show_more = show_more;
            rebuild_wall = true;
        }
        if let Some(modal) = opts.modal {
            self.options.modal = modal;
            rebuild_wall = true;
        }
        let collection_changed = opts.collection.is_some();
        if let Some(collection) = opts.collection {
            let same = is_same_collection(self.options.collection.as_ref(), collection.as_ref());
            if !same {
                info!(?collection, "Collection changed");
                self.options.collection = collection;
                self.history.clear();
                rebuild_wall = true;
                rebuild_header = true;
            }
        }
        if let Some(post_button) = opts.post_button {
            self.options.header.post_button = post_button;
            rebuild_header = true;
        }
        if let Some(show_title) = opts.show_title {
            self.options.header.post_config.show_title = show_title;
            rebuild_header = true;
        }
        if let Some(media_required) = opts.media_required {
            self.options.header.post_config.media_required = media_required;
            rebuild_header = true;
        }

        if rebuild_wall {
            self.rebuild_wall()?;
        }
        if rebuild_header {
            self.header.destroy();
            self.header = HeaderView::new(
                self.options.header.clone(),
                self.options.collection.clone(),
                &self.theme,
            );
            debug!("Header rebuilt");
        }
        if collection_changed {
            self.init_activity();
        }
        self.collect(now);
        Ok(())
    }

    /// Replace the wall with a fresh one built from the current options and
    /// refill it from the retained history.
    fn rebuild_wall(&mut self) -> Result<(), WallError> {
        let mut wall = WallView::new(wall_options(&self.options, &self.uuid), self.factory.clone())?;
        self.wall.destroy()?;
        if let Some(width) = self.container_width {
            wall.mount(width)?;
        }
        for item in &self.history {
            wall.add(item.clone())?;
        }
        // A rebuilt wall is not watched for the initial load
        self.events.extend(wall.drain_events());
        self.wall = wall;
        info!(cards = self.history.len(), "Wall rebuilt");
        Ok(())
    }

    fn ensure_live(&self, operation: &'static str) -> Result<(), WallError> {
        if self.destroyed {
            Err(WallError::disposed(operation))
        } else {
            Ok(())
        }
    }

    // ===== Queries =====

    /// Take every wall event queued since the last drain.
    pub fn drain_events(&mut self) -> Vec<WallEvent> {
        std::mem::take(&mut self.events)
    }

    /// Instance id.
    pub fn uuid(&self) -> Uuid {
        self.uuid
    }

    /// Attribute selector scoping this instance's styles.
    pub fn style_prefix(&self) -> &str {
        &self.style_prefix
    }

    /// Current options.
    pub fn options(&self) -> &ComponentOptions {
        &self.options
    }

    /// The wall.
    pub fn wall(&self) -> &WallView<F> {
        &self.wall
    }

    /// The header.
    pub fn header(&self) -> &HeaderView {
        &self.header
    }

    /// Current theme.
    pub fn theme(&self) -> &Theme {
        &self.theme
    }

    /// Collection shown.
    pub fn collection(&self) -> Option<&CollectionRef> {
        self.options.collection.as_ref()
    }

    /// Content retained for wall rebuilds.
    pub fn history(&self) -> &[ContentItem] {
        &self.history
    }

    /// Analytics emitter, once a collection is known.
    pub fn emitter(&self) -> Option<&ActivityEmitter> {
        self.emitter.as_ref()
    }

    /// When the next deferred work is due.
    pub fn next_deadline(&self) -> Option<Instant> {
        let goal = self.goal.as_ref().and_then(LoadGoalWatcher::deadline);
        match (self.wall.next_deadline(), goal) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        }
    }

    /// Whether `destroy` was called.
    pub fn is_destroyed(&self) -> bool {
        self.destroyed
    }
}

fn wall_options(options: &ComponentOptions, uuid: &Uuid) -> WallOptions {
    WallOptions {
        instance_id: uuid.simple().to_string(),
        ..options.wall.clone()
    }
}

#[cfg(test)]
#[path = "component_tests.rs"]
mod tests;
