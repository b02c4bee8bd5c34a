//! Default configuration values for Postdesk.
//!
//! These functions are used by `serde`'s `default` attribute in the configuration
//! structures when a value is not specified in the configuration file.

use super::types::{ApiConfig, LoggingConfig, NotificationsConfig, PostsConfig};
use std::path::PathBuf;

/// Base URL used when neither the config file nor `POSTDESK_API_URL` provide one.
pub const DEFAULT_API_BASE_URL: &str = "https://jsonplaceholder.typicode.com";

/// File name of the durable notification snapshot inside the app data dir.
pub const DEFAULT_NOTIFICATION_STORAGE_FILE: &str = "persistent-notifications.json";

pub(crate) fn default_logging_config() -> LoggingConfig {
    LoggingConfig {
        level: default_log_level(),
        file_path: default_log_file_path(),
        format: default_log_format(),
    }
}

pub(crate) fn default_log_level() -> String {
    "info".to_string()
}

pub(crate) fn default_log_file_path() -> Option<PathBuf> {
    None // No log file by default
}

pub(crate) fn default_log_format() -> String {
    "text".to_string()
}

pub(crate) fn default_api_config() -> ApiConfig {
    ApiConfig {
        base_url: default_api_base_url(),
        request_timeout_ms: None,
    }
}

pub(crate) fn default_api_base_url() -> String {
    DEFAULT_API_BASE_URL.to_string()
}

pub(crate) fn default_notifications_config() -> NotificationsConfig {
    NotificationsConfig {
        storage_path: None,
        success_duration_ms: default_success_duration_ms(),
        info_duration_ms: default_info_duration_ms(),
        warning_duration_ms: default_warning_duration_ms(),
        error_duration_ms: default_error_duration_ms(),
    }
}

pub(crate) fn default_success_duration_ms() -> u64 {
    3000
}

pub(crate) fn default_info_duration_ms() -> u64 {
    2000
}

pub(crate) fn default_warning_duration_ms() -> u64 {
    4000
}

pub(crate) fn default_error_duration_ms() -> u64 {
    5000
}

pub(crate) fn default_posts_config() -> PostsConfig {
    PostsConfig {
        page_size: default_page_size(),
        search_debounce_ms: default_search_debounce_ms(),
    }
}

pub(crate) fn default_page_size() -> u32 {
    10
}

pub(crate) fn default_search_debounce_ms() -> u64 {
    500
}
