//! Error handling for the Postdesk core layer.
//!
//! The main error type for this crate is [`CoreError`], which encapsulates
//! more specific errors like [`ConfigError`] and [`LoggingError`].
//!
//! # Examples
//!
//! ```rust,ignore
//! use postdesk_core::error::{ConfigError, CoreError};
//!
//! fn require_base_url(url: &str) -> Result<(), CoreError> {
//!     if url.is_empty() {
//!         return Err(ConfigError::ValidationError("api.base_url is empty".to_string()).into());
//!     }
//!     Ok(())
//! }
//! ```

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for Postdesk.
///
/// Designed to be used as a common error type throughout the application,
/// often by wrapping more specific error types.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Errors related to configuration loading, parsing, or validation.
    #[error("Configuration Error: {0}")]
    Config(#[from] ConfigError),

    /// Errors that occur during the initialization of the logging system.
    #[error("Logging Initialization Failed: {0}")]
    LoggingInitialization(String),

    /// Errors related to filesystem operations, such as creating directories or writing files.
    #[error("Filesystem Error: {message} (Path: {path:?})")]
    Filesystem {
        message: String,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Error type for configuration-related operations.
///
/// Typically wrapped by [`CoreError::Config`].
#[derive(Debug, Error)]
pub enum ConfigError {
    /// An error occurred while attempting to read a configuration file.
    #[error("Failed to read configuration file from {path:?}")]
    ReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// An error occurred while parsing a configuration file (e.g., invalid TOML).
    #[error("Failed to parse configuration file: {0}")]
    ParseError(#[from] toml::de::Error),

    /// Configuration values were parsed but failed validation.
    #[error("Configuration validation failed: {0}")]
    ValidationError(String),

    /// A required base directory (config/data home) could not be determined.
    #[error("Could not determine base directory for {dir_type}")]
    DirectoryUnavailable { dir_type: String },
}

/// Error type for logging-related operations.
#[derive(Error, Debug)]
pub enum LoggingError {
    /// Failed to set or parse a log filter.
    #[error("Failed to set log filter: {0}")]
    FilterError(String),
}

impl From<LoggingError> for CoreError {
    fn from(err: LoggingError) -> Self {
        CoreError::LoggingInitialization(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;
    use std::io::{Error as IoError, ErrorKind};

    #[test]
    fn test_core_error_config_variant() {
        let core_err = CoreError::Config(ConfigError::ValidationError("Test validation".to_string()));

        assert_eq!(format!("{}", core_err), "Configuration Error: Configuration validation failed: Test validation");
        match core_err.source().and_then(|s| s.downcast_ref::<ConfigError>()) {
            Some(ConfigError::ValidationError(msg)) => assert_eq!(msg, "Test validation"),
            _ => panic!("Incorrect source for CoreError::Config"),
        }
    }

    #[test]
    fn test_core_error_filesystem_variant() {
        let path = PathBuf::from("/tmp/notifications.json");
        let core_err = CoreError::Filesystem {
            message: "File operation failed".to_string(),
            path: path.clone(),
            source: IoError::new(ErrorKind::PermissionDenied, "denied"),
        };

        assert_eq!(format!("{}", core_err), format!("Filesystem Error: File operation failed (Path: {:?})", path));
        assert_eq!(
            core_err.source().unwrap().downcast_ref::<IoError>().unwrap().kind(),
            ErrorKind::PermissionDenied
        );
    }

    #[test]
    fn test_config_error_parse_error_variant() {
        let toml_err: toml::de::Error = toml::from_str::<toml::Value>("this is not valid toml").unwrap_err();
        let display = format!("{}", toml_err);
        let config_err = ConfigError::ParseError(toml_err);

        assert_eq!(format!("{}", config_err), format!("Failed to parse configuration file: {}", display));
        assert!(config_err.source().unwrap().is::<toml::de::Error>());
    }

    #[test]
    fn test_config_error_directory_unavailable_variant() {
        let config_err = ConfigError::DirectoryUnavailable { dir_type: "Data".to_string() };
        assert_eq!(format!("{}", config_err), "Could not determine base directory for Data");
        assert!(config_err.source().is_none());
    }

    #[test]
    fn test_logging_error_converts_to_core_error() {
        let core_err: CoreError = LoggingError::FilterError("bad filter".to_string()).into();
        assert_eq!(format!("{}", core_err), "Logging Initialization Failed: Failed to set log filter: bad filter");
    }
}
