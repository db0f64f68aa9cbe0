//! Configuration file loading with precedence handling.

use crate::component::{
    CollectionRef, ComponentOptions, FontSize, HeaderOptions, PostButtonKind, Rgb,
};
use crate::layout::{ColumnPicker, DEFAULT_MIN_CONTENT_WIDTH};
use crate::model::ConfigurationError;
use crate::wall::{WallOptions, DEFAULT_INITIAL};
use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;
use tracing::warn;

/// Environment variable naming the config file.
pub const ENV_CONFIG: &str = "MEDIAWALL_CONFIG";
/// Environment variable pinning the column count.
pub const ENV_COLUMNS: &str = "MEDIAWALL_COLUMNS";
/// Environment variable selecting the column picker.
pub const ENV_PICKER: &str = "MEDIAWALL_PICKER";

/// Errors that can occur during config loading.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Failed to read config file.
    #[error("Failed to read config file at {path}: {reason}")]
    ReadError {
        /// Path that failed to read.
        path: PathBuf,
        /// Reason for failure.
        reason: String,
    },

    /// Config file contains invalid TOML or unknown keys.
    #[error("Invalid TOML in {path}: {reason}")]
    ParseError {
        /// Path with invalid TOML.
        path: PathBuf,
        /// Parse error details.
        reason: String,
    },
}

/// TOML configuration file structure.
///
/// All fields are optional. Corresponds to `~/.config/mediawall/config.toml`:
///
/// ```toml
/// min_content_width = 280
/// picker = "shortest-column"
/// initial = 30
/// link_color = "#3366cc"
///
/// [collection]
/// network = "labs.fyre.co"
/// site_id = "315833"
/// article_id = "custom-1"
/// ```
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    /// Minimum card width in pixels when auto-fitting.
    #[serde(default)]
    pub min_content_width: Option<u32>,

    /// Fixed column count.
    #[serde(default)]
    pub columns: Option<usize>,

    /// Column picking strategy.
    #[serde(default)]
    pub picker: Option<ColumnPicker>,

    /// Items shown before "show more".
    #[serde(default)]
    pub initial: Option<usize>,

    /// Items added per "show more".
    #[serde(default)]
    pub show_more: Option<usize>,

    /// Resize debounce window in milliseconds.
    #[serde(default)]
    pub debounce_ms: Option<u64>,

    /// Link color for themed buttons, `#rrggbb`.
    #[serde(default)]
    pub link_color: Option<Rgb>,

    /// Card text size preset.
    #[serde(default)]
    pub font_size: Option<FontSize>,

    /// Post button shown in the header.
    #[serde(default)]
    pub post_button: Option<PostButtonKind>,

    /// Collection the wall shows; enables activity reporting.
    #[serde(default)]
    pub collection: Option<CollectionRef>,

    /// Pixels per terminal column.
    #[serde(default)]
    pub cell_width_px: Option<u32>,

    /// Pixels per terminal row.
    #[serde(default)]
    pub cell_height_px: Option<u32>,

    /// File that receives activities as JSON lines.
    #[serde(default)]
    pub activity_log_path: Option<PathBuf>,

    /// Path to log file for tracing output.
    #[serde(default)]
    pub log_file_path: Option<PathBuf>,
}

/// Resolved configuration after applying precedence rules.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedConfig {
    /// Minimum card width in pixels.
    pub min_content_width: u32,
    /// Fixed column count; `None` auto-fits.
    pub columns: Option<usize>,
    /// Column picker.
    pub picker: ColumnPicker,
    /// Items shown before "show more".
    pub initial: usize,
    /// Items per "show more"; `None` derives it from the column count.
    pub show_more: Option<usize>,
    /// Resize debounce window in milliseconds.
    pub debounce_ms: u64,
    /// Link color.
    pub link_color: Option<Rgb>,
    /// Font size preset.
    pub font_size: Option<FontSize>,
    /// Header post button.
    pub post_button: Option<PostButtonKind>,
    /// Collection shown.
    pub collection: Option<CollectionRef>,
    /// Pixels per terminal column.
    pub cell_width_px: u32,
    /// Pixels per terminal row.
    pub cell_height_px: u32,
    /// Activity output file; activities go to the log when unset.
    pub activity_log_path: Option<PathBuf>,
    /// Path to log file for tracing output.
    pub log_file_path: PathBuf,
}

impl Default for ResolvedConfig {
    fn default() -> Self {
        Self {
            min_content_width: DEFAULT_MIN_CONTENT_WIDTH,
            columns: None,
            picker: ColumnPicker::default(),
            initial: DEFAULT_INITIAL,
            show_more: None,
            debounce_ms: 200,
            link_color: None,
            font_size: None,
            post_button: None,
            collection: None,
            cell_width_px: 8,
            cell_height_px: 16,
            activity_log_path: None,
            log_file_path: default_log_path(),
        }
    }
}

impl ResolvedConfig {
    /// Wall options for these settings.
    ///
    /// # Errors
    ///
    /// `ConfigurationError` for values the wall rejects (zero widths,
    /// zero columns, zero debounce).
    pub fn wall_options(&self) -> Result<WallOptions, ConfigurationError> {
        let options = WallOptions {
            min_content_width: self.min_content_width,
            columns: self.columns,
            picker: self.picker,
            initial: self.initial,
            show_more: self.show_more,
            debounce: Duration::from_millis(self.debounce_ms),
            ..WallOptions::default()
        };
        options.validate()?;
        Ok(options)
    }

    /// Component options for these settings.
    ///
    /// A configured post button is always rendered: there is no sign-in
    /// flow in a terminal.
    ///
    /// # Errors
    ///
    /// Same as [`ResolvedConfig::wall_options`].
    pub fn component_options(&self) -> Result<ComponentOptions, ConfigurationError> {
        Ok(ComponentOptions {
            wall: self.wall_options()?,
            collection: self.collection.clone(),
            header: HeaderOptions {
                post_button: self.post_button,
                force_button_render: true,
                ..HeaderOptions::default()
            },
            link_color: self.link_color,
            font_size: self.font_size,
            app_name: Some(env!("CARGO_PKG_NAME").to_string()),
            ..ComponentOptions::default()
        })
    }
}

/// Default log file path: `~/.local/state/mediawall/mediawall.log` on Linux,
/// `mediawall.log` in the working directory when no state dir exists.
pub fn default_log_path() -> PathBuf {
    match dirs::state_dir() {
        Some(state_dir) => state_dir.join("mediawall").join("mediawall.log"),
        None => PathBuf::from("mediawall.log"),
    }
}

/// Default config path: `~/.config/mediawall/config.toml` on Linux.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("mediawall").join("config.toml"))
}

/// Load a config file. A missing file is `Ok(None)`.
///
/// # Errors
///
/// Returns error if the file exists but cannot be read or parsed.
pub fn load_config_file(path: impl Into<PathBuf>) -> Result<Option<ConfigFile>, ConfigError> {
    let path = path.into();
    if !path.exists() {
        return Ok(None);
    }

    let contents = std::fs::read_to_string(&path).map_err(|e| ConfigError::ReadError {
        path: path.clone(),
        reason: e.to_string(),
    })?;

    let config = toml::from_str(&contents).map_err(|e| ConfigError::ParseError {
        path: path.clone(),
        reason: e.to_string(),
    })?;

    Ok(Some(config))
}

/// Locate and load the config file.
///
/// Precedence (highest to lowest):
/// 1. Explicit `config_path` (CLI `--config`)
/// 2. `MEDIAWALL_CONFIG` environment variable
/// 3. [`default_config_path`]
///
/// # Errors
///
/// Returns error only if a config file exists but cannot be read or parsed.
pub fn load_config_with_precedence(
    config_path: Option<PathBuf>,
) -> Result<Option<ConfigFile>, ConfigError> {
    if let Some(path) = config_path {
        return load_config_file(path);
    }
    if let Ok(env_path) = std::env::var(ENV_CONFIG) {
        return load_config_file(PathBuf::from(env_path));
    }
    match default_config_path() {
        Some(default_path) => load_config_file(default_path),
        None => Ok(None),
    }
}

/// Merge a config file over the defaults.
pub fn merge_config(config_file: Option<ConfigFile>) -> ResolvedConfig {
    let defaults = ResolvedConfig::default();
    let Some(config) = config_file else {
        return defaults;
    };

    ResolvedConfig {
        min_content_width: config
            .min_content_width
            .unwrap_or(defaults.min_content_width),
        columns: config.columns.or(defaults.columns),
        picker: config.picker.unwrap_or(defaults.picker),
        initial: config.initial.unwrap_or(defaults.initial),
        show_more: config.show_more.or(defaults.show_more),
        debounce_ms: config.debounce_ms.unwrap_or(defaults.debounce_ms),
        link_color: config.link_color.or(defaults.link_color),
        font_size: config.font_size.or(defaults.font_size),
        post_button: config.post_button.or(defaults.post_button),
        collection: config.collection.or(defaults.collection),
        cell_width_px: config.cell_width_px.unwrap_or(defaults.cell_width_px),
        cell_height_px: config.cell_height_px.unwrap_or(defaults.cell_height_px),
        activity_log_path: config.activity_log_path.or(defaults.activity_log_path),
        log_file_path: config.log_file_path.unwrap_or(defaults.log_file_path),
    }
}

/// Apply `MEDIAWALL_COLUMNS` and `MEDIAWALL_PICKER`.
///
/// Unparseable values are logged and ignored.
pub fn apply_env_overrides(mut config: ResolvedConfig) -> ResolvedConfig {
    if let Ok(raw) = std::env::var(ENV_COLUMNS) {
        match raw.trim().parse::<usize>() {
            Ok(columns) => config.columns = Some(columns),
            Err(_) => warn!(value = %raw, "Ignoring invalid {}", ENV_COLUMNS),
        }
    }
    if let Ok(raw) = std::env::var(ENV_PICKER) {
        match raw.trim().parse::<ColumnPicker>() {
            Ok(picker) => config.picker = picker,
            Err(err) => warn!(error = %err, "Ignoring invalid {}", ENV_PICKER),
        }
    }
    config
}

/// Overrides given on the command line. `None` leaves a setting alone.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CliOverrides {
    /// `--columns`
    pub columns: Option<usize>,
    /// `--min-content-width`
    pub min_content_width: Option<u32>,
    /// `--picker`
    pub picker: Option<ColumnPicker>,
    /// `--initial`
    pub initial: Option<usize>,
}

/// Apply CLI overrides, the highest precedence source.
///
/// Precedence chain: Defaults → Config File → Env Vars → CLI Args
pub fn apply_cli_overrides(mut config: ResolvedConfig, cli: CliOverrides) -> ResolvedConfig {
    if let Some(columns) = cli.columns {
        config.columns = Some(columns);
    }
    if let Some(width) = cli.min_content_width {
        config.min_content_width = width;
    }
    if let Some(picker) = cli.picker {
        config.picker = picker;
    }
    if let Some(initial) = cli.initial {
        config.initial = initial;
    }
    config
}

/// Run the whole chain: locate and merge the file, then env, then CLI.
///
/// # Errors
///
/// Returns error if a config file exists but cannot be read or parsed.
pub fn resolve(
    config_path: Option<PathBuf>,
    cli: CliOverrides,
) -> Result<ResolvedConfig, ConfigError> {
    let file = load_config_with_precedence(config_path)?;
    Ok(apply_cli_overrides(apply_env_overrides(merge_config(file)), cli))
}

#[cfg(test)]
#[path = "loader_tests.rs"]
mod tests;
