//! Error types for mailsync operations.
//!
//! This module defines [`MailsyncError`], the primary error type used
//! throughout the application, and a [`Result`] type alias for convenience.
//!
//! # Error Handling Strategy
//!
//! - Use `MailsyncError` for domain-specific errors that need distinct handling
//! - Use `anyhow::Error` (via `MailsyncError::Other`) for unexpected errors
//! - `UnknownTemplate` is a routing signal, not a user-facing failure: during
//!   a sync it means "must create" and is handled internally

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for mailsync operations.
#[derive(Debug, Error)]
pub enum MailsyncError {
    /// The provider has no template with this name.
    #[error("Unknown template: {name}")]
    UnknownTemplate { name: String },

    /// A provider API call failed (transport, validation, or auth).
    #[error("API call failed: {message}")]
    ApiCallFailed { message: String },

    /// Failed to parse the override mapping file.
    #[error("Failed to parse mappings at {path}: {message}")]
    MappingsParseError { path: PathBuf, message: String },

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic wrapped error for anyhow interop.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Result type alias for mailsync operations.
pub type Result<T> = std::result::Result<T, MailsyncError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_template_displays_name() {
        let err = MailsyncError::UnknownTemplate {
            name: "welcome_v2".into(),
        };
        assert!(err.to_string().contains("welcome_v2"));
    }

    #[test]
    fn api_call_failed_displays_message() {
        let err = MailsyncError::ApiCallFailed {
            message: "HTTP 500 from /templates/add".into(),
        };
        assert!(err.to_string().contains("HTTP 500"));
    }

    #[test]
    fn mappings_parse_error_displays_path_and_message() {
        let err = MailsyncError::MappingsParseError {
            path: PathBuf::from("/templates/_mappings.yml"),
            message: "invalid syntax".into(),
        };
        let msg = err.to_string();
        assert!(msg.contains("_mappings.yml"));
        assert!(msg.contains("invalid syntax"));
    }

    #[test]
    fn io_error_converts_from_std() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file missing");
        let err: MailsyncError = io_err.into();
        assert!(matches!(err, MailsyncError::Io(_)));
    }

    #[test]
    fn result_type_alias_works() {
        fn returns_error() -> Result<()> {
            Err(MailsyncError::ApiCallFailed {
                message: "test".into(),
            })
        }
        assert!(returns_error().is_err());
    }
}
