use thiserror::Error;

#[derive(Debug, Error)]
pub enum PostError {
    /// Any failed HTTP call: network failure, non-2xx status or an undecodable body.
    #[error("Transport error during '{operation}'{}: {message}", .status.map(|s| format!(" (status {})", s)).unwrap_or_default())]
    Transport {
        operation: String,
        status: Option<u16>,
        message: String,
    },

    #[error("Invalid post field '{field}': {reason}")]
    Validation { field: String, reason: String },

    #[error("Invalid API base URL '{url}': {reason}")]
    InvalidBaseUrl { url: String, reason: String },
}

impl PostError {
    pub fn transport(operation: impl Into<String>, status: Option<u16>, message: impl Into<String>) -> Self {
        PostError::Transport {
            operation: operation.into(),
            status,
            message: message.into(),
        }
    }

    /// HTTP status carried by a transport failure, if the server answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            PostError::Transport { status, .. } => *status,
            _ => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages_display() {
        assert_eq!(
            format!("{}", PostError::transport("get_by_id", Some(404), "Not Found")),
            "Transport error during 'get_by_id' (status 404): Not Found"
        );
        assert_eq!(
            format!("{}", PostError::transport("list", None, "connection refused")),
            "Transport error during 'list': connection refused"
        );
        assert_eq!(
            format!("{}", PostError::Validation { field: "title".into(), reason: "too short".into() }),
            "Invalid post field 'title': too short"
        );
    }

    #[test]
    fn test_not_found_detection() {
        assert!(PostError::transport("get_by_id", Some(404), "").is_not_found());
        assert!(!PostError::transport("get_by_id", Some(500), "").is_not_found());
        assert!(!PostError::Validation { field: "body".into(), reason: String::new() }.is_not_found());
    }
}
