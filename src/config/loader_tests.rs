//! Tests for configuration file loading and saving.

use super::*;
use serial_test::serial;
use std::env;
use std::fs;
use tempfile::TempDir;

/// RAII guard to ensure environment variable cleanup even under test parallelism.
/// Removes the var on drop, preventing test pollution in parallel execution.
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

#[test]
fn default_config_path_contains_quoteme_config_toml() {
    let path = default_config_path().expect("Should have default path");
    let path_str = path.to_string_lossy();
    assert!(
        path_str.contains("quoteme") && path_str.ends_with("config.toml"),
        "Path should contain 'quoteme' and end with 'config.toml', got: {}",
        path_str
    );
}

#[test]
fn default_save_dir_ends_with_quoteme_images() {
    let dir = default_save_dir();
    assert!(dir.ends_with("quoteme images"), "got: {:?}", dir);
}

#[test]
fn load_config_file_returns_ok_none_for_missing_file() {
    let result = load_config_file("/nonexistent/path/to/config.toml");
    assert_eq!(
        result,
        Ok(None),
        "Missing config file should return Ok(None), not an error"
    );
}

#[test]
fn load_config_file_parses_valid_toml() {
    let dir = TempDir::new().expect("temp dir");
    let config_path = dir.path().join("config.toml");

    let toml_content = r#"
save_directory = "/tmp/quotes"
auto_display = true
font_path = "/fonts/Bold.ttf"

[resolution]
width = 1920
height = 1080
"#;
    fs::write(&config_path, toml_content).expect("Failed to write test config");

    let config = load_config_file(&config_path)
        .expect("Should successfully parse valid TOML")
        .expect("Should return Some(ConfigFile) for existing file");

    assert_eq!(config.save_directory, Some(PathBuf::from("/tmp/quotes")));
    assert_eq!(config.auto_display, Some(true));
    assert_eq!(config.font_path, Some(PathBuf::from("/fonts/Bold.ttf")));
    assert_eq!(config.resolution, Some(Resolution::new(1920, 1080)));
    assert_eq!(config.data_dir, None);
}

#[test]
fn load_config_file_rejects_out_of_range_resolution() {
    let dir = TempDir::new().expect("temp dir");
    let config_path = dir.path().join("config.toml");

    for (width, height) in [(0, 800), (20000, 9000), (1200, 0)] {
        fs::write(
            &config_path,
            format!("[resolution]\nwidth = {width}\nheight = {height}\n"),
        )
        .expect("Failed to write test config");

        let result = load_config_file(&config_path);
        assert!(
            matches!(result, Err(ConfigError::ParseError { .. })),
            "{width}x{height} should be rejected, got: {:?}",
            result
        );
    }
}

#[test]
fn load_config_file_returns_error_for_invalid_toml() {
    let dir = TempDir::new().expect("temp dir");
    let config_path = dir.path().join("broken.toml");
    fs::write(&config_path, "this is not valid TOML ][}{").expect("write");

    match load_config_file(&config_path) {
        Err(ConfigError::ParseError { path, reason: _ }) => assert_eq!(path, config_path),
        other => panic!("Expected ParseError, got {:?}", other),
    }
}

#[test]
fn config_file_rejects_unknown_fields() {
    let result: Result<ConfigFile, _> = toml::from_str("theme = \"monokai\"");
    assert!(result.is_err(), "Unknown fields should be rejected");
}

#[test]
fn save_then_load_preserves_fields_and_creates_directory() {
    let dir = TempDir::new().expect("temp dir");
    let config_path = dir.path().join("nested").join("config.toml");

    let config = ConfigFile {
        save_directory: Some(PathBuf::from("/home/me/Pictures")),
        auto_display: Some(false),
        resolution: Some(Resolution::new(1080, 1920)),
        ..ConfigFile::default()
    };

    save_config_file(&config_path, &config).expect("save should succeed");
    let loaded = load_config_file(&config_path).expect("load").expect("exists");

    assert_eq!(loaded, config);
}

#[test]
fn saved_file_omits_unset_fields() {
    let dir = TempDir::new().expect("temp dir");
    let config_path = dir.path().join("config.toml");

    let config = ConfigFile {
        auto_display: Some(true),
        ..ConfigFile::default()
    };
    save_config_file(&config_path, &config).expect("save");

    let written = fs::read_to_string(&config_path).expect("read back");
    assert!(written.contains("auto_display = true"));
    assert!(!written.contains("save_directory"));
    assert!(!written.contains("resolution"));
}

#[test]
fn merge_config_uses_defaults_when_none() {
    assert_eq!(merge_config(None), ResolvedConfig::default());
}

#[test]
fn merge_config_overrides_with_config_file_values() {
    let config_file = ConfigFile {
        save_directory: Some(PathBuf::from("/srv/images")),
        auto_display: Some(true),
        log_file_path: Some(PathBuf::from("/var/log/quoteme.log")),
        font_path: None,
        italic_font_path: Some(PathBuf::from("/fonts/Italic.ttf")),
        data_dir: Some(PathBuf::from("/srv/data")),
        resolution: Some(Resolution::new(851, 315)),
    };

    let resolved = merge_config(Some(&config_file));

    assert_eq!(resolved.save_directory, PathBuf::from("/srv/images"));
    assert!(resolved.auto_display);
    assert_eq!(resolved.log_file_path, PathBuf::from("/var/log/quoteme.log"));
    assert_eq!(resolved.font_path, None);
    assert_eq!(
        resolved.italic_font_path,
        Some(PathBuf::from("/fonts/Italic.ttf"))
    );
    assert_eq!(resolved.data_dir, Some(PathBuf::from("/srv/data")));
    assert_eq!(resolved.resolution, Resolution::new(851, 315));
}

#[test]
fn merge_config_uses_defaults_for_none_fields() {
    let config_file = ConfigFile {
        auto_display: Some(true),
        ..ConfigFile::default()
    };

    let resolved = merge_config(Some(&config_file));
    let defaults = ResolvedConfig::default();

    assert!(resolved.auto_display);
    assert_eq!(resolved.resolution, defaults.resolution);
    assert_eq!(resolved.save_directory, defaults.save_directory);
    assert_eq!(resolved.log_file_path, defaults.log_file_path);
}

#[test]
#[serial(quoteme_env)]
fn apply_env_overrides_reads_resolution_and_unsplash_key() {
    let _res = EnvGuard::new(RESOLUTION_ENV);
    let _key = EnvGuard::new(UNSPLASH_KEY_ENV);

    env::set_var(RESOLUTION_ENV, "2560x1440");
    env::set_var(UNSPLASH_KEY_ENV, "secret");

    let result = apply_env_overrides(ResolvedConfig::default());

    assert_eq!(result.resolution, Resolution::new(2560, 1440));
    assert_eq!(result.unsplash_access_key.as_deref(), Some("secret"));
}

#[test]
#[serial(quoteme_env)]
fn apply_env_overrides_ignores_invalid_resolution() {
    let _res = EnvGuard::new(RESOLUTION_ENV);
    let _key = EnvGuard::new(UNSPLASH_KEY_ENV);

    env::set_var(RESOLUTION_ENV, "enormous");

    let base = ResolvedConfig::default();
    let result = apply_env_overrides(base.clone());

    assert_eq!(result, base);
}

#[test]
#[serial(quoteme_env)]
fn apply_env_overrides_no_change_when_env_vars_not_set() {
    let _res = EnvGuard::new(RESOLUTION_ENV);
    let _key = EnvGuard::new(UNSPLASH_KEY_ENV);

    let base = ResolvedConfig::default();
    assert_eq!(apply_env_overrides(base.clone()), base);
}

#[test]
#[serial(quoteme_env)]
fn apply_env_overrides_ignores_blank_unsplash_key() {
    let _res = EnvGuard::new(RESOLUTION_ENV);
    let _key = EnvGuard::new(UNSPLASH_KEY_ENV);

    env::set_var(UNSPLASH_KEY_ENV, "   ");

    assert_eq!(
        apply_env_overrides(ResolvedConfig::default()).unsplash_access_key,
        None
    );
}

#[test]
fn apply_cli_overrides_resolution() {
    let result = apply_cli_overrides(ResolvedConfig::default(), Some(Resolution::new(640, 480)));
    assert_eq!(result.resolution, Resolution::new(640, 480));
}

#[test]
fn apply_cli_overrides_no_overrides() {
    let base = ResolvedConfig::default();
    assert_eq!(apply_cli_overrides(base.clone(), None), base);
}

#[test]
#[serial(quoteme_config)]
fn load_config_with_precedence_prefers_explicit_path() {
    let _guard = EnvGuard::new(CONFIG_ENV);
    let dir = TempDir::new().expect("temp dir");

    let explicit_path = dir.path().join("explicit.toml");
    fs::write(&explicit_path, "auto_display = true\n").expect("write explicit");

    let env_path = dir.path().join("env.toml");
    fs::write(&env_path, "auto_display = false\n").expect("write env");
    env::set_var(CONFIG_ENV, &env_path);

    let config = load_config_with_precedence(Some(explicit_path))
        .expect("load")
        .expect("exists");
    assert_eq!(
        config.auto_display,
        Some(true),
        "Should use explicit path, not QUOTEME_CONFIG env var"
    );
}

#[test]
#[serial(quoteme_config)]
fn load_config_with_precedence_uses_env_var_when_no_explicit_path() {
    let _guard = EnvGuard::new(CONFIG_ENV);
    let dir = TempDir::new().expect("temp dir");

    let env_path = dir.path().join("env_only.toml");
    fs::write(&env_path, "save_directory = \"/from/env\"\n").expect("write env");
    env::set_var(CONFIG_ENV, &env_path);

    assert_eq!(resolve_config_path(None), Some(env_path.clone()));

    let config = load_config_with_precedence(None)
        .expect("load")
        .expect("exists");
    assert_eq!(config.save_directory, Some(PathBuf::from("/from/env")));
}

#[test]
#[serial(quoteme_config)]
fn resolve_config_path_falls_back_to_default() {
    let _guard = EnvGuard::new(CONFIG_ENV);
    assert_eq!(resolve_config_path(None), default_config_path());
}

#[test]
fn config_store_update_persists_change() {
    let dir = TempDir::new().expect("temp dir");
    let path = dir.path().join("config.toml");
    let mut store = ConfigStore::new(Some(path.clone()), ConfigFile::default());

    store
        .update(|file| file.resolution = Some(Resolution::new(1280, 720)))
        .expect("update should write");

    assert_eq!(store.file().resolution, Some(Resolution::new(1280, 720)));
    let on_disk = load_config_file(&path).expect("load").expect("exists");
    assert_eq!(on_disk.resolution, Some(Resolution::new(1280, 720)));
}

#[test]
fn in_memory_store_keeps_change_but_reports_no_path() {
    let mut store = ConfigStore::in_memory(ConfigFile::default());

    let result = store.update(|file| file.auto_display = Some(true));

    assert_eq!(result, Err(ConfigError::NoConfigPath));
    assert_eq!(store.file().auto_display, Some(true));
}
