//! # Postdesk Core Library (`postdesk-core`)
//!
//! `postdesk-core` is the foundational library for the Postdesk posts manager.
//! It carries the ambient concerns every other crate relies on:
//!
//! - **Error Handling**: A unified error system through the `CoreError` enum and its
//!   associated specific error types `ConfigError` and `LoggingError`.
//! - **Configuration Management**: TOML-based loading of [`AppConfig`] with defaults,
//!   environment overrides and validation, through [`ConfigLoader`].
//! - **Logging**: A logging setup built on top of the `tracing` crate,
//!   configurable for console and file output in text or JSON format.
//! - **Utility Functions**: filesystem helpers (`utils::fs`) and application
//!   directory resolution (`utils::paths`).
//!
//! ## Usage
//!
//! ```rust,ignore
//! use postdesk_core::config::ConfigLoader;
//! use postdesk_core::logging::init_logging;
//! use postdesk_core::error::CoreError;
//!
//! fn main() -> Result<(), CoreError> {
//!     let config = ConfigLoader::load()?;
//!     init_logging(&config.logging, false)?;
//!     tracing::info!("Postdesk core initialized.");
//!     Ok(())
//! }
//! ```

pub mod error;
pub mod config;
pub mod logging;
pub mod utils;

// Re-export key types for convenience
pub use error::{CoreError, ConfigError, LoggingError};
pub use config::{
    AppConfig, ApiConfig, LoggingConfig, NotificationsConfig, PostsConfig, ConfigLoader,
};
pub use logging::{init_logging, init_minimal_logging};
pub use utils::ensure_dir_exists;
