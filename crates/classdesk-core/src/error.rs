//! Error types module
//!
//! This module provides the error taxonomy of the attachment pipeline. Local
//! validation failures, media host failures and preview failures each have their
//! own enum; `AppError` unifies them for callers that drive the whole pipeline.

use crate::models::UploadClassification;

/// Log level for error reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    /// Debug level - for expected errors like validation failures
    Debug,
    /// Warning level - for recoverable issues like host failures
    Warn,
    /// Error level - for unexpected failures
    Error,
}

/// Metadata for error presentation - defines how an error should be shown to the user.
/// This trait allows errors to self-describe their user-facing characteristics.
pub trait ErrorMetadata {
    /// Machine-readable error code (e.g., "UNSUPPORTED_FILE_TYPE")
    fn error_code(&self) -> &'static str;

    /// Whether the user can recover by retrying or correcting the input
    fn is_recoverable(&self) -> bool;

    /// Suggested action for the user
    fn suggested_action(&self) -> Option<&'static str>;

    /// User-facing message (may differ from internal error message)
    fn client_message(&self) -> String;

    /// Log level for this error
    fn log_level(&self) -> LogLevel;
}

/// Local rejection of a candidate file. No network call has been made.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("unsupported file type")]
    UnsupportedFileType { content_type: String },

    #[error("{} files must be under {}", .classification, .classification.size_limit_label())]
    FileTooLarge {
        classification: UploadClassification,
        size: u64,
    },

    #[error("{classification} uploads require a {field}")]
    MissingIdentifier {
        classification: UploadClassification,
        field: &'static str,
    },
}

/// Failure while talking to the media host, or before the request could be built.
#[derive(Debug, thiserror::Error)]
pub enum UploadError {
    #[error("invalid file type")]
    InvalidClassification(String),

    #[error("failed to build upload request: {0}")]
    Request(String),

    #[error("network error: {0}")]
    Network(String),

    /// Non-2xx answer; `message` is the host's human-readable reason.
    #[error("{message}")]
    Host { status: u16, message: String },

    #[error("invalid response from media host: {0}")]
    Decode(String),
}

/// The embedded document preview could not be rendered.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PreviewError {
    #[error("document preview failed to load: {url}")]
    FrameLoadFailed { url: String },
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Upload(#[from] UploadError),

    #[error(transparent)]
    Preview(#[from] PreviewError),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl ErrorMetadata for ValidationError {
    fn error_code(&self) -> &'static str {
        match self {
            ValidationError::UnsupportedFileType { .. } => "UNSUPPORTED_FILE_TYPE",
            ValidationError::FileTooLarge { .. } => "FILE_TOO_LARGE",
            ValidationError::MissingIdentifier { .. } => "MISSING_IDENTIFIER",
        }
    }

    fn is_recoverable(&self) -> bool {
        true
    }

    fn suggested_action(&self) -> Option<&'static str> {
        match self {
            ValidationError::UnsupportedFileType { .. } => {
                Some("Choose a JPEG, PNG, PDF, Word, PowerPoint or MP4 file")
            }
            ValidationError::FileTooLarge { .. } => Some("Choose a smaller file"),
            ValidationError::MissingIdentifier { .. } => {
                Some("Select the classroom or user this file belongs to")
            }
        }
    }

    fn client_message(&self) -> String {
        self.to_string()
    }

    fn log_level(&self) -> LogLevel {
        LogLevel::Debug
    }
}

impl ErrorMetadata for UploadError {
    fn error_code(&self) -> &'static str {
        match self {
            UploadError::InvalidClassification(_) => "INVALID_CLASSIFICATION",
            UploadError::Request(_) => "UPLOAD_REQUEST_ERROR",
            UploadError::Network(_) => "NETWORK_ERROR",
            UploadError::Host { .. } => "MEDIA_HOST_ERROR",
            UploadError::Decode(_) => "MEDIA_HOST_DECODE_ERROR",
        }
    }

    fn is_recoverable(&self) -> bool {
        !matches!(self, UploadError::InvalidClassification(_))
    }

    fn suggested_action(&self) -> Option<&'static str> {
        match self {
            UploadError::InvalidClassification(_) => None,
            UploadError::Network(_) => Some("Check your connection and try again"),
            _ => Some("Try uploading the file again"),
        }
    }

    fn client_message(&self) -> String {
        match self {
            UploadError::Host { message, .. } => message.clone(),
            UploadError::Network(_) => "Upload failed: could not reach the media host".to_string(),
            UploadError::Decode(_) | UploadError::Request(_) => "Upload failed".to_string(),
            UploadError::InvalidClassification(_) => self.to_string(),
        }
    }

    fn log_level(&self) -> LogLevel {
        match self {
            UploadError::InvalidClassification(_) | UploadError::Request(_) => LogLevel::Error,
            _ => LogLevel::Warn,
        }
    }
}

impl ErrorMetadata for PreviewError {
    fn error_code(&self) -> &'static str {
        "PREVIEW_FAILED"
    }

    fn is_recoverable(&self) -> bool {
        true
    }

    fn suggested_action(&self) -> Option<&'static str> {
        Some("Open the file in a new tab or download it")
    }

    fn client_message(&self) -> String {
        "Unable to preview this document".to_string()
    }

    fn log_level(&self) -> LogLevel {
        LogLevel::Warn
    }
}

impl ErrorMetadata for AppError {
    fn error_code(&self) -> &'static str {
        match self {
            AppError::Validation(e) => e.error_code(),
            AppError::Upload(e) => e.error_code(),
            AppError::Preview(e) => e.error_code(),
            AppError::Config(_) => "CONFIG_ERROR",
        }
    }

    fn is_recoverable(&self) -> bool {
        match self {
            AppError::Validation(e) => e.is_recoverable(),
            AppError::Upload(e) => e.is_recoverable(),
            AppError::Preview(e) => e.is_recoverable(),
            AppError::Config(_) => false,
        }
    }

    fn suggested_action(&self) -> Option<&'static str> {
        match self {
            AppError::Validation(e) => e.suggested_action(),
            AppError::Upload(e) => e.suggested_action(),
            AppError::Preview(e) => e.suggested_action(),
            AppError::Config(_) => Some("Check the environment configuration"),
        }
    }

    fn client_message(&self) -> String {
        match self {
            AppError::Validation(e) => e.client_message(),
            AppError::Upload(e) => e.client_message(),
            AppError::Preview(e) => e.client_message(),
            AppError::Config(msg) => msg.clone(),
        }
    }

    fn log_level(&self) -> LogLevel {
        match self {
            AppError::Validation(e) => e.log_level(),
            AppError::Upload(e) => e.log_level(),
            AppError::Preview(e) => e.log_level(),
            AppError::Config(_) => LogLevel::Error,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unsupported_type_message() {
        let err = ValidationError::UnsupportedFileType {
            content_type: "application/zip".to_string(),
        };
        assert_eq!(err.to_string(), "unsupported file type");
        assert_eq!(err.error_code(), "UNSUPPORTED_FILE_TYPE");
        assert!(err.is_recoverable());
        assert_eq!(err.log_level(), LogLevel::Debug);
    }

    #[test]
    fn test_file_too_large_message_names_limit() {
        let err = ValidationError::FileTooLarge {
            classification: UploadClassification::Profile,
            size: 3 * 1024 * 1024,
        };
        assert_eq!(err.to_string(), "profile files must be under 2MB");

        let err = ValidationError::FileTooLarge {
            classification: UploadClassification::Material,
            size: 60 * 1024 * 1024,
        };
        assert_eq!(err.to_string(), "material files must be under 50MB");
    }

    #[test]
    fn test_invalid_classification_message() {
        let err = UploadError::InvalidClassification("avatar".to_string());
        assert_eq!(err.to_string(), "invalid file type");
        assert!(!err.is_recoverable());
        assert_eq!(err.log_level(), LogLevel::Error);
    }

    #[test]
    fn test_host_error_surfaces_message() {
        let err = UploadError::Host {
            status: 400,
            message: "Upload preset not found".to_string(),
        };
        assert_eq!(err.to_string(), "Upload preset not found");
        assert_eq!(err.client_message(), "Upload preset not found");
        assert!(err.is_recoverable());
    }

    #[test]
    fn test_app_error_delegates_metadata() {
        let err = AppError::from(PreviewError::FrameLoadFailed {
            url: "https://res.cloudinary.com/demo/raw/upload/a.pdf".to_string(),
        });
        assert_eq!(err.error_code(), "PREVIEW_FAILED");
        assert_eq!(
            err.suggested_action(),
            Some("Open the file in a new tab or download it")
        );

        let err = AppError::Config("MEDIA_HOST_CLOUD_NAME must be set".to_string());
        assert!(!err.is_recoverable());
    }
}
