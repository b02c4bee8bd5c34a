//! General Utilities for Postdesk Core.
//!
//! - [`fs`]: filesystem helpers (directory creation).
//! - [`paths`]: application-specific directory resolution.

pub mod fs;
pub mod paths;

pub use fs::ensure_dir_exists;
