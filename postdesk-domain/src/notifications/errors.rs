use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Failures of the durable notification snapshot. The engine logs and
/// swallows all of them.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Failed to read notification storage at {path:?}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to write notification storage at {path:?}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Malformed notification storage content: {0}")]
    Corrupt(#[from] serde_json::Error),

    #[error("Notification storage unavailable: {0}")]
    Unavailable(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages_display() {
        let err = StorageError::Unavailable("quota exceeded".to_string());
        assert_eq!(err.to_string(), "Notification storage unavailable: quota exceeded");

        let json_err = serde_json::from_str::<Vec<u8>>("{").unwrap_err();
        assert!(StorageError::from(json_err).to_string().starts_with("Malformed notification storage content"));
    }
}
