//! Configuration module.
//!
//! A single TOML file holds the user's persistent choices (resolution, save
//! directory, auto-display). It is read at startup and written back by the
//! commands that change it.

pub mod loader;

pub use loader::{
    apply_cli_overrides, apply_env_overrides, default_config_path, default_log_path,
    default_save_dir, load_config_file, load_config_with_precedence, merge_config,
    resolve_config_path, save_config_file, ConfigError, ConfigFile, ConfigStore, ResolvedConfig,
};
