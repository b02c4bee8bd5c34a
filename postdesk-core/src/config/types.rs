//! Configuration Data Structures for Postdesk.
//!
//! These structs are populated by deserializing `config.toml`. Missing fields
//! take their values from [`super::defaults`], and unknown fields are rejected
//! via `#[serde(deny_unknown_fields)]`.

use super::defaults;
use serde::Deserialize;
use std::path::PathBuf;

/// Configuration settings for the logging subsystem.
///
/// ```
/// use postdesk_core::config::LoggingConfig;
///
/// let log_config: LoggingConfig = toml::from_str(r#"
/// level = "debug"
/// format = "json"
/// "#).unwrap();
/// assert_eq!(log_config.level, "debug");
/// assert_eq!(log_config.file_path, None);
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LoggingConfig {
    /// One of "trace", "debug", "info", "warn", "error" (case-insensitive).
    #[serde(default = "defaults::default_log_level")]
    pub level: String,
    /// Optional log file. Relative paths are resolved against the app data directory.
    #[serde(default = "defaults::default_log_file_path")]
    pub file_path: Option<PathBuf>,
    /// "text" or "json".
    #[serde(default = "defaults::default_log_format")]
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        defaults::default_logging_config()
    }
}

/// Settings for the REST backend the post repository talks to.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ApiConfig {
    /// Base URL, e.g. `https://jsonplaceholder.typicode.com`. Overridden by `POSTDESK_API_URL`.
    #[serde(default = "defaults::default_api_base_url")]
    pub base_url: String,
    /// Optional per-request timeout. `None` keeps the HTTP client's defaults.
    #[serde(default)]
    pub request_timeout_ms: Option<u64>,
}

impl Default for ApiConfig {
    fn default() -> Self {
        defaults::default_api_config()
    }
}

/// Settings for the notification engine.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NotificationsConfig {
    /// Location of the durable snapshot of persistent notifications.
    /// `None` means `<data dir>/persistent-notifications.json`.
    #[serde(default)]
    pub storage_path: Option<PathBuf>,
    #[serde(default = "defaults::default_success_duration_ms")]
    pub success_duration_ms: u64,
    #[serde(default = "defaults::default_info_duration_ms")]
    pub info_duration_ms: u64,
    #[serde(default = "defaults::default_warning_duration_ms")]
    pub warning_duration_ms: u64,
    #[serde(default = "defaults::default_error_duration_ms")]
    pub error_duration_ms: u64,
}

impl Default for NotificationsConfig {
    fn default() -> Self {
        defaults::default_notifications_config()
    }
}

/// Settings for the posts listing.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PostsConfig {
    /// Rows requested per page.
    #[serde(default = "defaults::default_page_size")]
    pub page_size: u32,
    /// Quiet period before a search input is applied.
    #[serde(default = "defaults::default_search_debounce_ms")]
    pub search_debounce_ms: u64,
}

impl Default for PostsConfig {
    fn default() -> Self {
        defaults::default_posts_config()
    }
}

/// Root configuration structure for Postdesk.
///
/// ```
/// use postdesk_core::config::AppConfig;
///
/// let loaded: AppConfig = toml::from_str(r#"
/// [logging]
/// level = "warn"
///
/// [posts]
/// page_size = 5
/// "#).unwrap();
/// assert_eq!(loaded.logging.level, "warn");
/// assert_eq!(loaded.posts.page_size, 5);
/// assert_eq!(loaded.posts.search_debounce_ms, 500);
/// ```
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AppConfig {
    #[serde(default = "defaults::default_logging_config")]
    pub logging: LoggingConfig,
    #[serde(default = "defaults::default_api_config")]
    pub api: ApiConfig,
    #[serde(default = "defaults::default_notifications_config")]
    pub notifications: NotificationsConfig,
    #[serde(default = "defaults::default_posts_config")]
    pub posts: PostsConfig,
}
