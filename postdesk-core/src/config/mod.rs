//! Configuration Management for Postdesk.
//!
//! - [`types`]: the configuration schema ([`AppConfig`] and its sections).
//! - [`defaults`]: default values used when a field or section is missing.
//! - [`loader`]: [`ConfigLoader`], which finds, parses and validates the file.
//!
//! # Examples
//!
//! ```rust,ignore
//! use postdesk_core::config::ConfigLoader;
//!
//! match ConfigLoader::load() {
//!     Ok(config) => println!("API: {}", config.api.base_url),
//!     Err(e) => {
//!         postdesk_core::logging::init_minimal_logging();
//!         tracing::error!("Configuration error: {}", e);
//!     }
//! }
//! ```

pub mod defaults;
pub mod loader;
pub mod types;

pub use loader::ConfigLoader;
pub use types::{ApiConfig, AppConfig, LoggingConfig, NotificationsConfig, PostsConfig};
