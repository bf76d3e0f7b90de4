use classdesk_core::{ErrorMetadata, LogLevel};

/// Backend API failures.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Not signed in")]
    Unauthenticated,

    #[error("Submission requires a {0}")]
    MissingIdentifier(&'static str),

    #[error("Failed to create HTTP client: {0}")]
    Client(String),

    #[error("Failed to send request: {0}")]
    Network(String),

    #[error("API request failed with status {status}: {message}")]
    Status { status: u16, message: String },

    #[error("Failed to decode response: {0}")]
    Decode(String),
}

impl ErrorMetadata for ApiError {
    fn error_code(&self) -> &'static str {
        match self {
            ApiError::Unauthenticated => "UNAUTHENTICATED",
            ApiError::MissingIdentifier(_) => "MISSING_IDENTIFIER",
            ApiError::Client(_) => "CLIENT_ERROR",
            ApiError::Network(_) => "NETWORK_ERROR",
            ApiError::Status { .. } => "API_ERROR",
            ApiError::Decode(_) => "DECODE_ERROR",
        }
    }

    fn is_recoverable(&self) -> bool {
        match self {
            ApiError::Network(_) => true,
            ApiError::Status { status, .. } => *status >= 500 || *status == 429,
            _ => false,
        }
    }

    fn suggested_action(&self) -> Option<&'static str> {
        match self {
            ApiError::Unauthenticated => Some("Sign in and try again"),
            ApiError::Network(_) => Some("Check your connection and try again"),
            ApiError::Status { status, .. } if *status >= 500 => {
                Some("Retry after a short delay")
            }
            _ => None,
        }
    }

    fn client_message(&self) -> String {
        match self {
            ApiError::Status { message, .. } => message.clone(),
            ApiError::Decode(_) | ApiError::Client(_) => "Unexpected server response".to_string(),
            _ => self.to_string(),
        }
    }

    fn log_level(&self) -> LogLevel {
        match self {
            ApiError::Unauthenticated | ApiError::MissingIdentifier(_) => LogLevel::Debug,
            ApiError::Network(_) | ApiError::Status { .. } => LogLevel::Warn,
            ApiError::Decode(_) | ApiError::Client(_) => LogLevel::Error,
        }
    }
}
