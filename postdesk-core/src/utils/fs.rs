//! Filesystem Utilities.
//!
//! Helper functions for common filesystem operations. They integrate with the
//! crate's error handling by returning `CoreError::Filesystem`.
//!
//! Only synchronous startup code uses these; async callers go through `tokio::fs`.

use crate::error::CoreError;
use std::fs;
use std::path::Path;

/// Ensures that a directory exists at the given path, creating it and any
/// missing parents.
///
/// # Errors
///
/// Returns `CoreError::Filesystem` if the path exists but is not a directory,
/// or if directory creation fails.
pub fn ensure_dir_exists(path: &Path) -> Result<(), CoreError> {
    if path.exists() {
        if !path.is_dir() {
            Err(CoreError::Filesystem {
                message: "Path exists but is not a directory".to_string(),
                path: path.to_path_buf(),
                source: std::io::Error::new(
                    std::io::ErrorKind::AlreadyExists,
                    "Path exists but is not a directory",
                ),
            })
        } else {
            Ok(())
        }
    } else {
        fs::create_dir_all(path).map_err(|e| CoreError::Filesystem {
            message: "Failed to create directory".to_string(),
            path: path.to_path_buf(),
            source: e,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_ensure_dir_exists_creates_nested() {
        let dir = tempdir().unwrap();
        let nested = dir.path().join("a/b/c");
        ensure_dir_exists(&nested).unwrap();
        assert!(nested.is_dir());
        // Second call is a no-op.
        ensure_dir_exists(&nested).unwrap();
    }

    #[test]
    fn test_ensure_dir_exists_rejects_file() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("file.txt");
        fs::write(&file, "x").unwrap();
        match ensure_dir_exists(&file) {
            Err(CoreError::Filesystem { path, .. }) => assert_eq!(path, file),
            other => panic!("unexpected result: {:?}", other),
        }
    }
}
