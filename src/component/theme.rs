//! Theme: font-size presets and link-color derived button colors.
//!
//! A link color fans out into a full set of button colors for each themable
//! element (`post`, `showMore`). Dark link colors get the dark variant (white
//! text, blackened borders); light ones get the light variant.

use crate::model::ConfigurationError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Elements that receive generated colors.
pub const THEMABLE_ELEMENTS: [&str; 2] = ["post", "showMore"];

// ===== Font size =====

/// Card text size preset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FontSize {
    /// Compact text.
    Small,
    /// Default text.
    Medium,
    /// Large text.
    Large,
}

impl FontSize {
    /// Pixels per line of card text.
    pub fn line_height(self) -> u32 {
        match self {
            FontSize::Small => 14,
            FontSize::Medium => 16,
            FontSize::Large => 20,
        }
    }
}

impl FromStr for FontSize {
    type Err = ConfigurationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "small" => Ok(FontSize::Small),
            "medium" => Ok(FontSize::Medium),
            "large" => Ok(FontSize::Large),
            _ => Err(ConfigurationError::UnknownFontSize(s.to_string())),
        }
    }
}

// ===== Colors =====

/// 24-bit color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Rgb {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
}

impl Rgb {
    /// Color from channels.
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Pure white.
    pub const WHITE: Rgb = Rgb::new(0xff, 0xff, 0xff);
    /// Pure black.
    pub const BLACK: Rgb = Rgb::new(0, 0, 0);

    /// Raise HSL lightness by `amount` percentage points.
    pub fn lighten(self, amount: u8) -> Self {
        self.shift_lightness(f64::from(amount) / 100.0)
    }

    /// Lower HSL lightness by `amount` percentage points.
    pub fn blacken(self, amount: u8) -> Self {
        self.shift_lightness(-f64::from(amount) / 100.0)
    }

    /// Relative luminance in `[0, 1]` (sRGB weights, no gamma).
    pub fn luminance(self) -> f64 {
        (0.2126 * f64::from(self.r) + 0.7152 * f64::from(self.g) + 0.0722 * f64::from(self.b))
            / 255.0
    }

    fn shift_lightness(self, delta: f64) -> Self {
        let (h, s, l) = self.to_hsl();
        Self::from_hsl(h, s, (l + delta).clamp(0.0, 1.0))
    }

    fn to_hsl(self) -> (f64, f64, f64) {
        let r = f64::from(self.r) / 255.0;
        let g = f64::from(self.g) / 255.0;
        let b = f64::from(self.b) / 255.0;
        let max = r.max(g).max(b);
        let min = r.min(g).min(b);
        let l = (max + min) / 2.0;
        let d = max - min;
        if d == 0.0 {
            return (0.0, 0.0, l);
        }
        let s = d / (1.0 - (2.0 * l - 1.0).abs());
        let h = if max == r {
            60.0 * ((g - b) / d).rem_euclid(6.0)
        } else if max == g {
            60.0 * ((b - r) / d + 2.0)
        } else {
            60.0 * ((r - g) / d + 4.0)
        };
        (h, s, l)
    }

    fn from_hsl(h: f64, s: f64, l: f64) -> Self {
        let c = (1.0 - (2.0 * l - 1.0).abs()) * s;
        let x = c * (1.0 - ((h / 60.0).rem_euclid(2.0) - 1.0).abs());
        let m = l - c / 2.0;
        let (r, g, b) = match h {
            h if h < 60.0 => (c, x, 0.0),
            h if h < 120.0 => (x, c, 0.0),
            h if h < 180.0 => (0.0, c, x),
            h if h < 240.0 => (0.0, x, c),
            h if h < 300.0 => (x, 0.0, c),
            _ => (c, 0.0, x),
        };
        let channel = |v: f64| ((v + m) * 255.0).round().clamp(0.0, 255.0) as u8;
        Self::new(channel(r), channel(g), channel(b))
    }
}

impl FromStr for Rgb {
    type Err = ConfigurationError;

    /// Parse `#rrggbb` or `#rgb`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ConfigurationError::InvalidColor(s.to_string());
        let hex = s.trim().strip_prefix('#').ok_or_else(invalid)?;
        if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(invalid());
        }
        let channel = |digits: &str| u8::from_str_radix(digits, 16).map_err(|_| invalid());
        match hex.len() {
            6 => Ok(Self::new(
                channel(&hex[0..2])?,
                channel(&hex[2..4])?,
                channel(&hex[4..6])?,
            )),
            3 => {
                let doubled: String = hex.chars().flat_map(|c| [c, c]).collect();
                Self::from_str(&format!("#{doubled}"))
            }
            _ => Err(invalid()),
        }
    }
}

impl TryFrom<String> for Rgb {
    type Error = ConfigurationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Rgb> for String {
    fn from(color: Rgb) -> Self {
        color.to_string()
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

// ===== Generated button colors =====

/// Which generated palette a link color gets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Variant {
    /// Dark link color: white text, blackened accents.
    Dark,
    /// Light link color: black text, lightened accents.
    Light,
}

impl Variant {
    /// Palette for `color`.
    pub fn for_color(color: Rgb) -> Self {
        if color.luminance() < 0.5 {
            Variant::Dark
        } else {
            Variant::Light
        }
    }
}

#[derive(Debug, Clone, Copy)]
enum Derive {
    Same,
    Shift(u8),
    Text,
}

/// Button style properties and how each derives from the link color.
const BUTTON_STYLES: [(&str, Derive); 9] = [
    ("activeBackgroundColor", Derive::Shift(5)),
    ("activeBorderColor", Derive::Shift(20)),
    ("activeTextColor", Derive::Text),
    ("backgroundColor", Derive::Same),
    ("borderColor", Derive::Shift(15)),
    ("hoverBackgroundColor", Derive::Same),
    ("hoverBorderColor", Derive::Same),
    ("hoverTextColor", Derive::Text),
    ("textColor", Derive::Text),
];

/// Colors for every button property of `prefix`, keyed `prefixPropertyName`.
pub fn generate_colors(prefix: &str, link_color: Rgb) -> BTreeMap<String, Rgb> {
    let variant = Variant::for_color(link_color);
    BUTTON_STYLES
        .iter()
        .map(|(property, derive)| {
            let color = match (derive, variant) {
                (Derive::Same, _) => link_color,
                (Derive::Shift(amount), Variant::Dark) => link_color.blacken(*amount),
                (Derive::Shift(amount), Variant::Light) => link_color.lighten(*amount),
                (Derive::Text, Variant::Dark) => Rgb::WHITE,
                (Derive::Text, Variant::Light) => Rgb::BLACK,
            };
            (prefixed(prefix, property), color)
        })
        .collect()
}

fn prefixed(prefix: &str, property: &str) -> String {
    let mut chars = property.chars();
    match chars.next() {
        Some(first) => format!("{prefix}{}{}", first.to_ascii_uppercase(), chars.as_str()),
        None => prefix.to_string(),
    }
}

// ===== Theme =====

/// Resolved theme for one wall.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Theme {
    font_size: Option<FontSize>,
    link_color: Option<Rgb>,
    colors: BTreeMap<String, Rgb>,
}

impl Theme {
    /// Theme for a link color and font size.
    ///
    /// Without a link color no button colors are generated.
    pub fn new(link_color: Option<Rgb>, font_size: Option<FontSize>) -> Self {
        let colors = link_color
            .map(|color| {
                THEMABLE_ELEMENTS
                    .iter()
                    .flat_map(|prefix| generate_colors(prefix, color))
                    .collect()
            })
            .unwrap_or_default();
        Self {
            font_size,
            link_color,
            colors,
        }
    }

    /// Configured link color.
    pub fn link_color(&self) -> Option<Rgb> {
        self.link_color
    }

    /// Configured font size.
    pub fn font_size(&self) -> Option<FontSize> {
        self.font_size
    }

    /// Generated color for `key` (e.g. `postBackgroundColor`).
    pub fn color(&self, key: &str) -> Option<Rgb> {
        self.colors.get(key).copied()
    }

    /// Every generated color.
    pub fn colors(&self) -> &BTreeMap<String, Rgb> {
        &self.colors
    }

    /// Button styles for `prefix` with the prefix stripped
    /// (`postTextColor` → `textColor`).
    pub fn button_styles(&self, prefix: &str) -> BTreeMap<String, Rgb> {
        BUTTON_STYLES
            .iter()
            .filter_map(|(property, _)| {
                self.color(&prefixed(prefix, property))
                    .map(|color| (property.to_string(), color))
            })
            .collect()
    }

    /// Pixels per line of card text; the medium preset when unset.
    pub fn line_height(&self) -> u32 {
        self.font_size.unwrap_or(FontSize::Medium).line_height()
    }
}
