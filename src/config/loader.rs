//! Configuration file loading, saving and precedence handling.

use crate::model::Resolution;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Environment variable naming an alternate config file.
pub const CONFIG_ENV: &str = "QUOTEME_CONFIG";
/// Environment variable overriding the image resolution (`WIDTHxHEIGHT`).
pub const RESOLUTION_ENV: &str = "QUOTEME_RESOLUTION";
/// Environment variable carrying the Unsplash API key.
pub const UNSPLASH_KEY_ENV: &str = "UNSPLASH_ACCESS_KEY";

/// Errors that can occur during config loading and saving.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Failed to read config file (permission issues, not a file).
    #[error("Failed to read config file at {path}: {reason}")]
    ReadError {
        /// Path that failed to read.
        path: PathBuf,
        /// Reason for failure.
        reason: String,
    },

    /// Config file contains invalid TOML syntax or unknown fields.
    #[error("Invalid TOML in {path}: {reason}")]
    ParseError {
        /// Path with invalid TOML.
        path: PathBuf,
        /// Parse error details.
        reason: String,
    },

    /// Failed to serialize or write the config file.
    #[error("Failed to write config file at {path}: {reason}")]
    WriteError {
        /// Path that failed to write.
        path: PathBuf,
        /// Reason for failure.
        reason: String,
    },

    /// No config location could be determined (no `--config`, no env var, no config dir).
    #[error("No configuration directory available on this platform")]
    NoConfigPath,
}

/// TOML configuration file structure.
///
/// All fields are optional - if not specified, hardcoded defaults are used.
/// Corresponds to `~/.config/quoteme/config.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    /// Directory images are saved to when no path is given.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub save_directory: Option<PathBuf>,

    /// Whether the shell startup hook was installed by `--enable`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auto_display: Option<bool>,

    /// Path to log file for tracing output.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log_file_path: Option<PathBuf>,

    /// TrueType/OpenType font used for the quote text.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_path: Option<PathBuf>,

    /// Font used for the author line. Falls back to `font_path`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub italic_font_path: Option<PathBuf>,

    /// Directory with `quotes.json`, `facts.json`, `jokes.json` overriding the built-in data.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_dir: Option<PathBuf>,

    /// Image resolution chosen with `--resolution`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resolution: Option<Resolution>,
}

/// Resolved configuration after applying precedence rules.
///
/// Created by merging defaults, config file, env vars, and CLI args.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedConfig {
    /// Image resolution.
    pub resolution: Resolution,
    /// Where images go when no path is given.
    pub save_directory: PathBuf,
    /// Auto-display as recorded in the config file.
    pub auto_display: bool,
    /// Path to log file for tracing output.
    pub log_file_path: PathBuf,
    /// Explicit quote font, if configured.
    pub font_path: Option<PathBuf>,
    /// Explicit author font, if configured.
    pub italic_font_path: Option<PathBuf>,
    /// Local data override directory.
    pub data_dir: Option<PathBuf>,
    /// Unsplash API key; without it backgrounds come from Picsum.
    pub unsplash_access_key: Option<String>,
}

impl Default for ResolvedConfig {
    fn default() -> Self {
        Self {
            resolution: Resolution::DEFAULT,
            save_directory: default_save_dir(),
            auto_display: false,
            log_file_path: default_log_path(),
            font_path: None,
            italic_font_path: None,
            data_dir: None,
            unsplash_access_key: None,
        }
    }
}

/// Resolve default log file path.
///
/// Returns `~/.local/state/quoteme/quoteme.log` on Linux,
/// or appropriate platform path on other systems.
///
/// If state directory cannot be determined, falls back to current directory.
pub fn default_log_path() -> PathBuf {
    if let Some(state_dir) = dirs::state_dir() {
        state_dir.join("quoteme").join("quoteme.log")
    } else {
        PathBuf::from("quoteme.log")
    }
}

/// Resolve default image directory: `~/Downloads/quoteme images`.
///
/// Falls back to `./quoteme images` when no home directory is known.
pub fn default_save_dir() -> PathBuf {
    dirs::download_dir()
        .or_else(|| dirs::home_dir().map(|home| home.join("Downloads")))
        .unwrap_or_default()
        .join("quoteme images")
}

/// Load configuration file from a specific path.
///
/// Returns `Ok(None)` if file doesn't exist (not an error - use defaults).
/// Returns `Err` if file exists but cannot be read or parsed.
///
/// # Errors
///
/// Returns error if file exists but has read or parse errors.
pub fn load_config_file(path: impl Into<PathBuf>) -> Result<Option<ConfigFile>, ConfigError> {
    let path = path.into();

    // Missing file is not an error - use defaults
    if !path.exists() {
        return Ok(None);
    }

    let contents = std::fs::read_to_string(&path).map_err(|e| ConfigError::ReadError {
        path: path.clone(),
        reason: e.to_string(),
    })?;

    let config: ConfigFile = toml::from_str(&contents).map_err(|e| ConfigError::ParseError {
        path: path.clone(),
        reason: e.to_string(),
    })?;

    Ok(Some(config))
}

/// Write a config file, creating its parent directory.
///
/// # Errors
///
/// Returns `ConfigError::WriteError` if serialization, directory creation or
/// the write itself fails.
pub fn save_config_file(path: &Path, config: &ConfigFile) -> Result<(), ConfigError> {
    let write_error = |reason: String| ConfigError::WriteError {
        path: path.to_path_buf(),
        reason,
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| write_error(e.to_string()))?;
    }

    let contents = toml::to_string_pretty(config).map_err(|e| write_error(e.to_string()))?;
    std::fs::write(path, contents).map_err(|e| write_error(e.to_string()))
}

/// Resolve default config file path.
///
/// Returns `~/.config/quoteme/config.toml` on Linux, appropriate path on other platforms.
/// Returns `None` if home directory cannot be determined.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("quoteme").join("config.toml"))
}

/// Pick the config file location.
///
/// Precedence (highest to lowest):
/// 1. Explicit `config_path` argument (CLI `--config`)
/// 2. `QUOTEME_CONFIG` environment variable
/// 3. Default path `~/.config/quoteme/config.toml`
pub fn resolve_config_path(config_path: Option<PathBuf>) -> Option<PathBuf> {
    config_path
        .or_else(|| std::env::var_os(CONFIG_ENV).map(PathBuf::from))
        .or_else(default_config_path)
}

/// Load configuration with precedence handling.
///
/// Missing config files are NOT errors - defaults are used.
///
/// # Errors
///
/// Returns error only if a config file exists but cannot be read or parsed.
pub fn load_config_with_precedence(
    config_path: Option<PathBuf>,
) -> Result<Option<ConfigFile>, ConfigError> {
    match resolve_config_path(config_path) {
        Some(path) => load_config_file(path),
        None => Ok(None),
    }
}

/// Merge config file into defaults to create resolved config.
///
/// For each field in `ConfigFile`, if `Some(value)`, use it; otherwise use default.
pub fn merge_config(config_file: Option<&ConfigFile>) -> ResolvedConfig {
    let defaults = ResolvedConfig::default();

    let Some(config) = config_file else {
        return defaults;
    };

    ResolvedConfig {
        resolution: config.resolution.unwrap_or(defaults.resolution),
        save_directory: config
            .save_directory
            .clone()
            .unwrap_or(defaults.save_directory),
        auto_display: config.auto_display.unwrap_or(defaults.auto_display),
        log_file_path: config
            .log_file_path
            .clone()
            .unwrap_or(defaults.log_file_path),
        font_path: config.font_path.clone(),
        italic_font_path: config.italic_font_path.clone(),
        data_dir: config.data_dir.clone(),
        unsplash_access_key: defaults.unsplash_access_key,
    }
}

/// Apply environment variable overrides to resolved config.
///
/// Checks for:
/// - `QUOTEME_RESOLUTION`: override resolution (ignored with a warning if invalid)
/// - `UNSPLASH_ACCESS_KEY`: enable Unsplash backgrounds
pub fn apply_env_overrides(mut config: ResolvedConfig) -> ResolvedConfig {
    if let Ok(raw) = std::env::var(RESOLUTION_ENV) {
        match raw.parse::<Resolution>() {
            Ok(resolution) => config.resolution = resolution,
            Err(e) => {
                tracing::warn!(value = %raw, error = %e, "Ignoring invalid QUOTEME_RESOLUTION");
            }
        }
    }

    if let Ok(key) = std::env::var(UNSPLASH_KEY_ENV) {
        if !key.trim().is_empty() {
            config.unsplash_access_key = Some(key);
        }
    }

    config
}

/// Apply CLI argument overrides to resolved config.
///
/// CLI args have the highest precedence and override all other sources.
/// Only applies overrides for flags that were explicitly set by the user.
///
/// Precedence chain: Defaults → Config File → Env Vars → CLI Args (highest)
pub fn apply_cli_overrides(
    mut config: ResolvedConfig,
    resolution_override: Option<Resolution>,
) -> ResolvedConfig {
    if let Some(resolution) = resolution_override {
        config.resolution = resolution;
    }

    config
}

/// A loaded config file together with where it lives, so commands can
/// persist changes back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigStore {
    path: Option<PathBuf>,
    file: ConfigFile,
}

impl ConfigStore {
    /// Store backed by the file at `path`; `None` behaves like [`ConfigStore::in_memory`].
    pub fn new(path: Option<PathBuf>, file: ConfigFile) -> Self {
        Self { path, file }
    }

    /// Store that only lives in memory; `save` reports `NoConfigPath`.
    pub fn in_memory(file: ConfigFile) -> Self {
        Self { path: None, file }
    }

    /// Where changes are written, if anywhere.
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Current file contents.
    pub fn file(&self) -> &ConfigFile {
        &self.file
    }

    /// Apply `change` and write the result to disk.
    ///
    /// # Errors
    ///
    /// Returns `NoConfigPath` for in-memory stores, or a write error. The
    /// in-memory copy keeps the change either way.
    pub fn update(&mut self, change: impl FnOnce(&mut ConfigFile)) -> Result<(), ConfigError> {
        change(&mut self.file);
        let path = self.path.as_deref().ok_or(ConfigError::NoConfigPath)?;
        save_config_file(path, &self.file)?;
        tracing::info!(path = %path.display(), "Config saved");
        Ok(())
    }
}

#[cfg(test)]
#[path = "loader_tests.rs"]
mod tests;
