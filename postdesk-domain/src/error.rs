//! Error module for the Postdesk domain layer.

use thiserror::Error;

use crate::posts::PostError;

/// A general Result type for domain operations.
pub type DomainResult<T> = Result<T, DomainError>;

/// The primary error type for the domain layer. Storage failures never
/// reach it: they are logged and swallowed where they happen.
#[derive(Debug, Error)]
pub enum DomainError {
    #[error(transparent)]
    Post(#[from] PostError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wrapped_errors_are_transparent() {
        let err: DomainError = PostError::transport("list", Some(503), "Service Unavailable").into();
        assert_eq!(err.to_string(), "Transport error during 'list' (status 503): Service Unavailable");
    }

    #[test]
    fn test_bad_base_url_surfaces_as_post_error() {
        let err: DomainError = PostError::InvalidBaseUrl { url: "::".into(), reason: "relative URL without a base".into() }.into();
        assert!(matches!(err, DomainError::Post(PostError::InvalidBaseUrl { .. })));
    }
}
