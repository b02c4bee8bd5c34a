//! Configuration Loading for Postdesk.
//!
//! [`ConfigLoader`] locates `config.toml`, deserializes it, applies the
//! environment overrides and validates the result.
//!
//! ## Configuration File Location
//!
//! 1. `POSTDESK_CONFIG`, when set, names the file explicitly.
//! 2. Otherwise `config.toml` inside the application config directory
//!    (see [`crate::utils::paths::get_app_config_dir`]).
//!
//! A missing file is not an error: the default [`AppConfig`] is used.
//!
//! ## Environment Overrides
//!
//! `POSTDESK_API_URL` replaces `api.base_url`.
//!
//! ## Validation
//!
//! - log level and format are normalized to lowercase and checked;
//! - `api.base_url` must be an `http://` or `https://` URL, trailing `/` is trimmed;
//! - `posts.page_size` must be greater than zero;
//! - relative `notifications.storage_path` and `logging.file_path` are resolved
//!   against the application data directory, and an absent storage path
//!   becomes `<data dir>/persistent-notifications.json`.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use super::defaults::DEFAULT_NOTIFICATION_STORAGE_FILE;
use super::types::AppConfig;
use crate::error::{ConfigError, CoreError};
use crate::utils::paths::{get_app_config_dir, get_app_data_dir};

/// Environment variable naming an explicit configuration file.
pub const CONFIG_PATH_ENV: &str = "POSTDESK_CONFIG";
/// Environment variable overriding `api.base_url`.
pub const API_URL_ENV: &str = "POSTDESK_API_URL";

/// `ConfigLoader` provides static methods to load and validate [`AppConfig`].
pub struct ConfigLoader;

impl ConfigLoader {
    /// Loads and validates the configuration for the running process.
    ///
    /// # Errors
    ///
    /// Returns a `CoreError` if the config or data directory cannot be
    /// determined, the file cannot be read or parsed, or validation fails.
    pub fn load() -> Result<AppConfig, CoreError> {
        Self::load_with(None, None)
    }

    /// Like [`ConfigLoader::load`], with explicit values (e.g. from command
    /// line flags) taking precedence over the environment.
    pub fn load_with(config_path: Option<PathBuf>, api_url: Option<String>) -> Result<AppConfig, CoreError> {
        let config_path = match config_path.or_else(|| env::var_os(CONFIG_PATH_ENV).map(PathBuf::from)) {
            Some(explicit) => explicit,
            None => get_app_config_dir()?.join("config.toml"),
        };
        let data_dir = get_app_data_dir()?;
        let api_url_override = api_url
            .or_else(|| env::var(API_URL_ENV).ok())
            .filter(|v| !v.trim().is_empty());

        Self::load_from(&config_path, &data_dir, api_url_override)
    }

    /// Loads the configuration from `config_path`, resolving relative paths
    /// against `data_dir`. A missing file yields the defaults.
    pub fn load_from(
        config_path: &Path,
        data_dir: &Path,
        api_url_override: Option<String>,
    ) -> Result<AppConfig, CoreError> {
        let mut config = match fs::read_to_string(config_path) {
            Ok(content) => Self::parse(&content)?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!("No configuration file at {:?}, using defaults", config_path);
                AppConfig::default()
            }
            Err(e) => {
                return Err(CoreError::Config(ConfigError::ReadError {
                    path: config_path.to_path_buf(),
                    source: e,
                }));
            }
        };

        if let Some(url) = api_url_override {
            debug!("Overriding api.base_url with {}", url);
            config.api.base_url = url;
        }

        Self::validate_config(&mut config, data_dir)?;
        Ok(config)
    }

    /// Parses TOML content. Blank content yields the defaults.
    pub fn parse(content: &str) -> Result<AppConfig, CoreError> {
        if content.trim().is_empty() {
            return Ok(AppConfig::default());
        }
        toml::from_str(content).map_err(|e| CoreError::Config(ConfigError::ParseError(e)))
    }

    /// Validates a parsed `AppConfig` in place, normalizing values and
    /// resolving relative paths against `data_dir`.
    pub fn validate_config(config: &mut AppConfig, data_dir: &Path) -> Result<(), CoreError> {
        let level_lower = config.logging.level.to_lowercase();
        match level_lower.as_str() {
            "trace" | "debug" | "info" | "warn" | "error" => config.logging.level = level_lower,
            _ => {
                return Err(validation_error(format!(
                    "Invalid log level: '{}'. Must be one of trace, debug, info, warn, error.",
                    config.logging.level
                )));
            }
        }

        let format_lower = config.logging.format.to_lowercase();
        match format_lower.as_str() {
            "text" | "json" => config.logging.format = format_lower,
            _ => {
                return Err(validation_error(format!(
                    "Invalid log format: '{}'. Must be one of text, json.",
                    config.logging.format
                )));
            }
        }

        let base_url = config.api.base_url.trim().trim_end_matches('/').to_string();
        let has_host = base_url
            .strip_prefix("https://")
            .or_else(|| base_url.strip_prefix("http://"))
            .map_or(false, |rest| !rest.is_empty());
        if !has_host {
            return Err(validation_error(format!(
                "Invalid api.base_url: '{}'. Must be an http:// or https:// URL.",
                config.api.base_url
            )));
        }
        config.api.base_url = base_url;

        if config.api.request_timeout_ms == Some(0) {
            return Err(validation_error("api.request_timeout_ms must be greater than zero.".to_string()));
        }

        if config.posts.page_size == 0 {
            return Err(validation_error("posts.page_size must be greater than zero.".to_string()));
        }

        let storage_path = config
            .notifications
            .storage_path
            .take()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_NOTIFICATION_STORAGE_FILE));
        config.notifications.storage_path = Some(resolve_against(data_dir, storage_path));

        if let Some(log_path) = config.logging.file_path.take() {
            config.logging.file_path = Some(resolve_against(data_dir, log_path));
        }

        Ok(())
    }
}

fn resolve_against(base: &Path, path: PathBuf) -> PathBuf {
    if path.is_absolute() {
        path
    } else {
        base.join(path)
    }
}

fn validation_error(message: String) -> CoreError {
    CoreError::Config(ConfigError::ValidationError(message))
}
