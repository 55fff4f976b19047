use thiserror::Error;

/// Unified error type for version-tagger operations
#[derive(Error, Debug)]
pub enum VersionTaggerError {
    #[error("Invalid version format: {0}")]
    Version(String),

    #[error("Version not found: {0}")]
    VersionNotFound(String),

    #[error("Unsupported ref: {0}")]
    Ref(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience type alias for Results in version-tagger
pub type Result<T> = std::result::Result<T, VersionTaggerError>;

impl VersionTaggerError {
    /// Create a version-format error with context
    pub fn version(msg: impl Into<String>) -> Self {
        VersionTaggerError::Version(msg.into())
    }

    /// Create a version-not-found error with context
    pub fn not_found(msg: impl Into<String>) -> Self {
        VersionTaggerError::VersionNotFound(msg.into())
    }

    /// Create an unsupported-ref error with context
    pub fn unsupported_ref(msg: impl Into<String>) -> Self {
        VersionTaggerError::Ref(msg.into())
    }

    /// Create a configuration error with context
    pub fn config(msg: impl Into<String>) -> Self {
        VersionTaggerError::Config(msg.into())
    }

    /// Create a transport error with context
    pub fn transport(msg: impl Into<String>) -> Self {
        VersionTaggerError::Transport(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = VersionTaggerError::config("missing major version");
        assert_eq!(
            err.to_string(),
            "Configuration error: missing major version"
        );
    }

    #[test]
    fn test_error_from_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: VersionTaggerError = io_err.into();
        assert!(err.to_string().contains("I/O error"));
    }

    #[test]
    fn test_error_constructors() {
        assert!(VersionTaggerError::version("x")
            .to_string()
            .contains("Invalid version format"));
        assert!(VersionTaggerError::not_found("9.9.9")
            .to_string()
            .contains("not found"));
        assert!(VersionTaggerError::unsupported_ref("refs/notes/commits")
            .to_string()
            .contains("Unsupported ref"));
        assert!(VersionTaggerError::transport("503")
            .to_string()
            .contains("Transport"));
    }

    #[test]
    fn test_error_messages_are_descriptive() {
        let error_pairs = vec![
            (VersionTaggerError::version("x"), "Invalid version format"),
            (VersionTaggerError::not_found("x"), "Version not found"),
            (VersionTaggerError::unsupported_ref("x"), "Unsupported ref"),
            (VersionTaggerError::config("x"), "Configuration error"),
            (VersionTaggerError::transport("x"), "Transport error"),
        ];

        for (err, expected_prefix) in error_pairs {
            let msg = err.to_string();
            assert!(
                msg.starts_with(expected_prefix),
                "Error message should start with '{}', but got '{}'",
                expected_prefix,
                msg
            );
        }
    }

    #[test]
    fn test_error_special_characters_in_messages() {
        let special_chars = vec![
            "message with\nnewline",
            "message with\ttab",
            "message with 'quotes'",
            "message with unicode: ñ",
        ];

        for msg in special_chars {
            let err = VersionTaggerError::version(msg);
            assert!(err.to_string().contains("Invalid version format"));
        }
    }
}
