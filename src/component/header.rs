//! Wall header with the optional post button.
//!
//! The header shows a post button only when all of these hold: a button kind
//! is configured and maps to a supported button, a collection is set for
//! posts to go to, and either an auth delegate can log the user in or the
//! embedder forces the button.

use super::collection::CollectionRef;
use super::theme::{Rgb, Theme};
use crate::model::ConfigurationError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use tracing::debug;

/// Accepted video mimetypes for uploads.
pub const VIDEO_MIMETYPES: [&str; 14] = [
    "video/avi",
    "video/mp4",
    "video/x-ms-wmv",
    "video/x-ms-asf",
    "video/x-msvideo",
    "video/mpeg",
    "video/quicktime",
    "video/x-qtc",
    "video/x-dv",
    "video/x-m4v",
    "video/3gpp",
    "video/3gpp2",
    "video/webm",
    "video/ogg",
];

/// Accepted photo mimetypes for uploads.
pub const PHOTO_MIMETYPES: [&str; 1] = ["image/*"];

// ===== Post button kinds =====

/// What kind of post button sits atop the wall.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[allow(missing_docs)]
pub enum PostButtonKind {
    Audio,
    AudioAndPhoto,
    AudioAndPhotoAndVideo,
    AudioAndVideo,
    Content,
    ContentWithAudio,
    ContentWithAudioAndPhoto,
    ContentWithAudioAndPhotoAndVideo,
    ContentWithAudioAndVideo,
    ContentWithPhoto,
    ContentWithPhotoAndVideo,
    ContentWithVideo,
    Photo,
    PhotoAndVideo,
    Video,
}

impl PostButtonKind {
    /// Every kind, in declaration order.
    pub const ALL: [PostButtonKind; 15] = [
        PostButtonKind::Audio,
        PostButtonKind::AudioAndPhoto,
        PostButtonKind::AudioAndPhotoAndVideo,
        PostButtonKind::AudioAndVideo,
        PostButtonKind::Content,
        PostButtonKind::ContentWithAudio,
        PostButtonKind::ContentWithAudioAndPhoto,
        PostButtonKind::ContentWithAudioAndPhotoAndVideo,
        PostButtonKind::ContentWithAudioAndVideo,
        PostButtonKind::ContentWithPhoto,
        PostButtonKind::ContentWithPhotoAndVideo,
        PostButtonKind::ContentWithVideo,
        PostButtonKind::Photo,
        PostButtonKind::PhotoAndVideo,
        PostButtonKind::Video,
    ];

    /// Configuration name, e.g. `contentWithPhoto`.
    pub fn as_str(self) -> &'static str {
        match self {
            PostButtonKind::Audio => "audio",
            PostButtonKind::AudioAndPhoto => "audioAndPhoto",
            PostButtonKind::AudioAndPhotoAndVideo => "audioAndPhotoAndVideo",
            PostButtonKind::AudioAndVideo => "audioAndVideo",
            PostButtonKind::Content => "content",
            PostButtonKind::ContentWithAudio => "contentWithAudio",
            PostButtonKind::ContentWithAudioAndPhoto => "contentWithAudioAndPhoto",
            PostButtonKind::ContentWithAudioAndPhotoAndVideo => "contentWithAudioAndPhotoAndVideo",
            PostButtonKind::ContentWithAudioAndVideo => "contentWithAudioAndVideo",
            PostButtonKind::ContentWithPhoto => "contentWithPhoto",
            PostButtonKind::ContentWithPhotoAndVideo => "contentWithPhotoAndVideo",
            PostButtonKind::ContentWithVideo => "contentWithVideo",
            PostButtonKind::Photo => "photo",
            PostButtonKind::PhotoAndVideo => "photoAndVideo",
            PostButtonKind::Video => "video",
        }
    }

    /// The button this kind builds, or `None` for kinds the header cannot
    /// render (the audio family).
    pub fn button(self) -> Option<PostButton> {
        let photo = || PHOTO_MIMETYPES.to_vec();
        let video = || VIDEO_MIMETYPES.to_vec();
        let both = || [VIDEO_MIMETYPES.as_slice(), PHOTO_MIMETYPES.as_slice()].concat();
        let button = match self {
            PostButtonKind::Photo => PostButton::upload(photo()),
            PostButtonKind::Video => PostButton::upload(video()),
            PostButtonKind::PhotoAndVideo => PostButton::upload(both()),
            PostButtonKind::Content => PostButton::editor(Vec::new()),
            PostButtonKind::ContentWithPhoto => PostButton::editor(photo()),
            PostButtonKind::ContentWithVideo => PostButton::editor(video()),
            PostButtonKind::ContentWithPhotoAndVideo => PostButton::editor(both()),
            _ => return None,
        };
        Some(button)
    }
}

impl fmt::Display for PostButtonKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PostButtonKind {
    type Err = ConfigurationError;

    /// Parse a configuration name. `true` is shorthand for `contentWithPhoto`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == "true" {
            return Ok(PostButtonKind::ContentWithPhoto);
        }
        PostButtonKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| ConfigurationError::UnknownPostButton(s.to_string()))
    }
}

// ===== Buttons =====

/// Which widget a post button opens.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonStyle {
    /// Straight to a media upload picker.
    Upload,
    /// A text editor, optionally with media attachments.
    Editor {
        /// Whether attachments may be added.
        media_enabled: bool,
    },
}

/// A concrete post button.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostButton {
    /// Widget opened.
    pub style: ButtonStyle,
    /// Accepted upload mimetypes.
    pub mimetypes: Vec<&'static str>,
}

impl PostButton {
    fn upload(mimetypes: Vec<&'static str>) -> Self {
        Self {
            style: ButtonStyle::Upload,
            mimetypes,
        }
    }

    fn editor(mimetypes: Vec<&'static str>) -> Self {
        Self {
            style: ButtonStyle::Editor {
                media_enabled: !mimetypes.is_empty(),
            },
            mimetypes,
        }
    }

    /// Button caption.
    pub fn label(&self) -> &'static str {
        match self.style {
            ButtonStyle::Upload => "Post Photo",
            ButtonStyle::Editor { .. } => "Post",
        }
    }
}

// ===== Header =====

/// Post editor settings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PostConfig {
    /// Show a title field in the editor.
    pub show_title: bool,
    /// Require an attachment before posting.
    pub media_required: bool,
}

/// Header construction options.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeaderOptions {
    /// Configured button kind.
    pub post_button: Option<PostButtonKind>,
    /// Show the button even without an auth delegate.
    pub force_button_render: bool,
    /// Editor settings.
    pub post_config: PostConfig,
    /// Whether an auth delegate that can log users in is installed.
    pub auth_delegate: bool,
}

/// Header above the wall.
#[derive(Debug, Clone, PartialEq)]
pub struct HeaderView {
    options: HeaderOptions,
    button: Option<PostButton>,
    collection: Option<CollectionRef>,
    styles: BTreeMap<String, Rgb>,
    destroyed: bool,
}

impl HeaderView {
    /// Header for `collection`, styled by `theme`.
    pub fn new(options: HeaderOptions, collection: Option<CollectionRef>, theme: &Theme) -> Self {
        let button = options.post_button.and_then(|kind| {
            let button = kind.button();
            if button.is_none() {
                debug!(kind = %kind, "Post button kind has no header button");
            }
            button
        });
        Self {
            options,
            button,
            collection,
            styles: theme.button_styles("post"),
            destroyed: false,
        }
    }

    /// Point posts at a different collection.
    pub fn set_collection(&mut self, collection: Option<CollectionRef>) {
        self.collection = collection;
    }

    /// Whether the post button is shown.
    pub fn post_button_visible(&self) -> bool {
        !self.destroyed
            && self.button.is_some()
            && self.collection.is_some()
            && (self.options.force_button_render || self.options.auth_delegate)
    }

    /// The shown post button.
    pub fn post_button(&self) -> Option<&PostButton> {
        if self.post_button_visible() {
            self.button.as_ref()
        } else {
            None
        }
    }

    /// Options the header was built with.
    pub fn options(&self) -> &HeaderOptions {
        &self.options
    }

    /// Button colors, unprefixed (`textColor`, `borderColor`, ...).
    pub fn styles(&self) -> &BTreeMap<String, Rgb> {
        &self.styles
    }

    /// Hide the header for good.
    pub fn destroy(&mut self) {
        self.destroyed = true;
        self.button = None;
    }

    /// Whether `destroy` was called.
    pub fn is_destroyed(&self) -> bool {
        self.destroyed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn visible_options(kind: PostButtonKind) -> HeaderOptions {
        HeaderOptions {
            post_button: Some(kind),
            auth_delegate: true,
            ..HeaderOptions::default()
        }
    }

    fn collection() -> Option<CollectionRef> {
        Some(CollectionRef::new("n", "1", "a"))
    }

    #[test]
    fn every_kind_round_trips_its_name() {
        for kind in PostButtonKind::ALL {
            assert_eq!(kind.as_str().parse::<PostButtonKind>().unwrap(), kind);
        }
    }

    #[test]
    fn true_means_content_with_photo() {
        assert_eq!(
            "true".parse::<PostButtonKind>().unwrap(),
            PostButtonKind::ContentWithPhoto
        );
        assert_eq!(
            "selfie".parse::<PostButtonKind>(),
            Err(ConfigurationError::UnknownPostButton("selfie".to_string()))
        );
    }

    #[test]
    fn audio_kinds_build_no_button() {
        let unsupported: Vec<_> = PostButtonKind::ALL
            .into_iter()
            .filter(|kind| kind.button().is_none())
            .collect();
        assert_eq!(unsupported.len(), 8);
        assert!(unsupported
            .iter()
            .all(|kind| kind.as_str().to_lowercase().contains("audio")));
    }

    #[test]
    fn button_media_matches_kind() {
        let editor = PostButtonKind::Content.button().unwrap();
        assert_eq!(editor.style, ButtonStyle::Editor { media_enabled: false });

        let upload = PostButtonKind::PhotoAndVideo.button().unwrap();
        assert_eq!(upload.style, ButtonStyle::Upload);
        assert_eq!(upload.mimetypes.len(), 15);
        assert_eq!(upload.mimetypes.last(), Some(&"image/*"));
    }

    #[test]
    fn visible_with_button_collection_and_auth() {
        let header = HeaderView::new(
            visible_options(PostButtonKind::Photo),
            collection(),
            &Theme::default(),
        );
        assert!(header.post_button_visible());
        assert_eq!(header.post_button().unwrap().label(), "Post Photo");
    }

    #[test]
    fn hidden_without_collection_or_auth() {
        let no_collection = HeaderView::new(
            visible_options(PostButtonKind::Photo),
            None,
            &Theme::default(),
        );
        let no_auth = HeaderView::new(
            HeaderOptions {
                auth_delegate: false,
                ..visible_options(PostButtonKind::Photo)
            },
            collection(),
            &Theme::default(),
        );
        assert!(!no_collection.post_button_visible());
        assert!(!no_auth.post_button_visible());
    }

    #[test]
    fn forced_button_skips_auth() {
        let header = HeaderView::new(
            HeaderOptions {
                auth_delegate: false,
                force_button_render: true,
                ..visible_options(PostButtonKind::Content)
            },
            collection(),
            &Theme::default(),
        );
        assert!(header.post_button_visible());
    }

    #[test]
    fn collection_can_arrive_later() {
        let mut header = HeaderView::new(
            visible_options(PostButtonKind::Video),
            None,
            &Theme::default(),
        );
        header.set_collection(collection());
        assert!(header.post_button_visible());
        header.destroy();
        assert!(!header.post_button_visible());
    }

    #[test]
    fn styles_come_from_theme() {
        let theme = Theme::new(Some(Rgb::new(0, 0, 0x80)), None);
        let header = HeaderView::new(HeaderOptions::default(), None, &theme);
        assert_eq!(header.styles()["textColor"], Rgb::WHITE);
    }
}
