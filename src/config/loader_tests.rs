//! Tests for configuration file loading.

use super::*;
use serial_test::serial;
use std::env;
use std::fs;

fn write_temp(name: &str, content: &str) -> PathBuf {
    let path = env::temp_dir().join(name);
    fs::write(&path, content).expect("Failed to write test config");
    path
}

/// Removes the variable on creation and on drop so parallel tests stay clean.
struct EnvGuard(&'static str);

impl EnvGuard {
    fn new(name: &'static str) -> Self {
        env::remove_var(name);
        EnvGuard(name)
    }
}

impl Drop for EnvGuard {
    fn drop(&mut self) {
        env::remove_var(self.0);
    }
}

// ===== Paths =====

#[test]
fn default_config_path_ends_with_mediawall_config_toml() {
    let path = default_config_path().expect("Should have default path");
    let path_str = path.to_string_lossy();
    assert!(
        path_str.contains("mediawall") && path_str.ends_with("config.toml"),
        "got: {}",
        path_str
    );
}

#[test]
fn default_log_path_ends_with_mediawall_log() {
    let path = default_log_path();
    assert!(path.to_string_lossy().ends_with("mediawall.log"), "got: {path:?}");
    assert_eq!(ResolvedConfig::default().log_file_path, path);
}

// ===== load_config_file =====

#[test]
fn load_config_file_returns_ok_none_for_missing_file() {
    assert_eq!(load_config_file("/nonexistent/path/to/config.toml"), Ok(None));
}

#[test]
fn load_config_file_parses_valid_toml() {
    let config_path = write_temp(
        "mediawall_test_config.toml",
        r##"
min_content_width = 280
columns = 4
picker = "shortest-column"
initial = 30
show_more = 12
debounce_ms = 150
link_color = "#3366cc"
font_size = "large"
post_button = "photo"
cell_width_px = 10

[collection]
network = "labs.fyre.co"
site_id = "315833"
article_id = "custom-1"
"##,
    );

    let config = load_config_file(&config_path).unwrap().unwrap();
    fs::remove_file(&config_path).ok();

    assert_eq!(config.min_content_width, Some(280));
    assert_eq!(config.columns, Some(4));
    assert_eq!(config.picker, Some(ColumnPicker::ShortestColumn));
    assert_eq!(config.initial, Some(30));
    assert_eq!(config.show_more, Some(12));
    assert_eq!(config.debounce_ms, Some(150));
    assert_eq!(config.link_color, Some(Rgb::new(0x33, 0x66, 0xcc)));
    assert_eq!(config.font_size, Some(FontSize::Large));
    assert_eq!(config.post_button, Some(PostButtonKind::Photo));
    assert_eq!(config.cell_width_px, Some(10));
    assert_eq!(config.cell_height_px, None);
    assert_eq!(
        config.collection,
        Some(CollectionRef::new("labs.fyre.co", "315833", "custom-1"))
    );
}

#[test]
fn load_config_file_returns_error_for_invalid_toml() {
    let config_path = write_temp("mediawall_test_invalid.toml", "this is not valid TOML ][}{");

    let result = load_config_file(&config_path);
    fs::remove_file(&config_path).ok();

    match result {
        Err(ConfigError::ParseError { path, .. }) => assert_eq!(path, config_path),
        other => panic!("Expected ParseError, got {:?}", other),
    }
}

#[test]
fn config_file_rejects_unknown_fields() {
    let result: Result<ConfigFile, _> = toml::from_str("theme = \"base16-ocean\"");
    assert!(result.is_err());
}

#[test]
fn config_file_rejects_bad_values() {
    for toml in [
        "picker = \"tallest-column\"",
        "link_color = \"blue\"",
        "font_size = \"huge\"",
    ] {
        let result: Result<ConfigFile, _> = toml::from_str(toml);
        assert!(result.is_err(), "{toml} should be rejected");
    }
}

// ===== merge_config =====

#[test]
fn merge_config_uses_defaults_when_none() {
    let resolved = merge_config(None);
    assert_eq!(resolved, ResolvedConfig::default());
    assert_eq!(resolved.min_content_width, 300);
    assert_eq!(resolved.initial, 50);
    assert_eq!(resolved.debounce_ms, 200);
    assert_eq!(resolved.picker, ColumnPicker::RoundRobin);
}

#[test]
fn merge_config_keeps_defaults_for_missing_fields() {
    let resolved = merge_config(Some(ConfigFile {
        initial: Some(10),
        ..ConfigFile::default()
    }));
    assert_eq!(resolved.initial, 10);
    assert_eq!(resolved.min_content_width, 300);
    assert_eq!(resolved.columns, None);
    assert_eq!(resolved.cell_height_px, 16);
}

// ===== Env overrides =====

#[test]
#[serial(mediawall_env)]
fn env_overrides_columns_and_picker() {
    let _columns = EnvGuard::new(ENV_COLUMNS);
    let _picker = EnvGuard::new(ENV_PICKER);
    env::set_var(ENV_COLUMNS, "3");
    env::set_var(ENV_PICKER, "shortest-column");

    let result = apply_env_overrides(ResolvedConfig::default());

    assert_eq!(result.columns, Some(3));
    assert_eq!(result.picker, ColumnPicker::ShortestColumn);
    assert_eq!(result.initial, 50);
}

#[test]
#[serial(mediawall_env)]
fn env_overrides_ignore_invalid_values() {
    let _columns = EnvGuard::new(ENV_COLUMNS);
    let _picker = EnvGuard::new(ENV_PICKER);
    env::set_var(ENV_COLUMNS, "many");
    env::set_var(ENV_PICKER, "random");

    let base = ResolvedConfig::default();
    assert_eq!(apply_env_overrides(base.clone()), base);
}

#[test]
#[serial(mediawall_env)]
fn env_overrides_no_change_when_unset() {
    let _columns = EnvGuard::new(ENV_COLUMNS);
    let _picker = EnvGuard::new(ENV_PICKER);
    let base = ResolvedConfig::default();
    assert_eq!(apply_env_overrides(base.clone()), base);
}

// ===== Config path precedence =====

#[test]
#[serial(mediawall_config)]
fn explicit_path_beats_env_var() {
    let _guard = EnvGuard::new(ENV_CONFIG);
    let explicit = write_temp("mediawall_test_explicit.toml", "initial = 7");
    let from_env = write_temp("mediawall_test_env.toml", "initial = 9");
    env::set_var(ENV_CONFIG, &from_env);

    let result = load_config_with_precedence(Some(explicit.clone()));
    fs::remove_file(&explicit).ok();
    fs::remove_file(&from_env).ok();

    assert_eq!(result.unwrap().unwrap().initial, Some(7));
}

#[test]
#[serial(mediawall_config)]
fn env_var_used_without_explicit_path() {
    let _guard = EnvGuard::new(ENV_CONFIG);
    let from_env = write_temp("mediawall_test_env_only.toml", "initial = 9");
    env::set_var(ENV_CONFIG, &from_env);

    let result = load_config_with_precedence(None);
    fs::remove_file(&from_env).ok();

    assert_eq!(result.unwrap().unwrap().initial, Some(9));
}

// ===== CLI overrides and full chain =====

#[test]
fn cli_overrides_win() {
    let base = ResolvedConfig {
        columns: Some(2),
        ..ResolvedConfig::default()
    };
    let result = apply_cli_overrides(
        base,
        CliOverrides {
            columns: Some(6),
            min_content_width: Some(200),
            picker: Some(ColumnPicker::ShortestColumn),
            initial: Some(5),
        },
    );
    assert_eq!(result.columns, Some(6));
    assert_eq!(result.min_content_width, 200);
    assert_eq!(result.picker, ColumnPicker::ShortestColumn);
    assert_eq!(result.initial, 5);
}

#[test]
fn cli_overrides_empty_is_identity() {
    let base = ResolvedConfig::default();
    assert_eq!(apply_cli_overrides(base.clone(), CliOverrides::default()), base);
}

#[test]
#[serial(mediawall_env)]
fn precedence_chain_file_env_cli() {
    let _columns = EnvGuard::new(ENV_COLUMNS);
    let _picker = EnvGuard::new(ENV_PICKER);
    let path = write_temp(
        "mediawall_test_chain.toml",
        "columns = 2\ninitial = 20\npicker = \"shortest-column\"",
    );
    env::set_var(ENV_COLUMNS, "4");

    let resolved = resolve(
        Some(path.clone()),
        CliOverrides {
            initial: Some(5),
            ..CliOverrides::default()
        },
    );
    fs::remove_file(&path).ok();
    let resolved = resolved.unwrap();

    // env beats file, CLI beats both, untouched file values survive
    assert_eq!(resolved.columns, Some(4));
    assert_eq!(resolved.initial, 5);
    assert_eq!(resolved.picker, ColumnPicker::ShortestColumn);
}

// ===== Conversion =====

#[test]
fn wall_options_carry_resolved_values() {
    let resolved = ResolvedConfig {
        columns: Some(3),
        show_more: Some(9),
        debounce_ms: 50,
        ..ResolvedConfig::default()
    };
    let options = resolved.wall_options().unwrap();
    assert_eq!(options.columns, Some(3));
    assert_eq!(options.show_more, Some(9));
    assert_eq!(options.debounce, Duration::from_millis(50));
}

#[test]
fn wall_options_reject_zero_values() {
    let zero_columns = ResolvedConfig {
        columns: Some(0),
        ..ResolvedConfig::default()
    };
    assert_eq!(
        zero_columns.wall_options(),
        Err(ConfigurationError::ZeroColumns)
    );

    let zero_width = ResolvedConfig {
        min_content_width: 0,
        ..ResolvedConfig::default()
    };
    assert_eq!(
        zero_width.component_options().map(|_| ()),
        Err(ConfigurationError::ZeroMinContentWidth)
    );
}

#[test]
fn component_options_force_post_button() {
    let resolved = ResolvedConfig {
        post_button: Some(PostButtonKind::Content),
        link_color: Some(Rgb::new(0x10, 0x20, 0x30)),
        ..ResolvedConfig::default()
    };
    let options = resolved.component_options().unwrap();
    assert_eq!(options.header.post_button, Some(PostButtonKind::Content));
    assert!(options.header.force_button_render);
    assert_eq!(options.link_color, Some(Rgb::new(0x10, 0x20, 0x30)));
    assert_eq!(options.app_name.as_deref(), Some("mediawall"));
}
