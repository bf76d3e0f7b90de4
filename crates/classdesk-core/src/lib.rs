//! Classdesk Core Library
//!
//! This crate provides the domain models, error types, configuration and
//! delivery URL rules shared by every Classdesk component.

pub mod config;
pub mod delivery_url;
pub mod error;
pub mod models;

// Re-export commonly used types
pub use config::{BackendConfig, ClientConfig, MediaHostConfig, UploadPresets, ViewerConfig};
pub use delivery_url::{to_download_url, to_inline_url, UrlDeriver};
pub use error::{AppError, ErrorMetadata, LogLevel, PreviewError, UploadError, ValidationError};
pub use models::{
    AttachmentRecord, AttachmentResponse, CandidateFile, FileIcon, MediaFamily, ResourceCategory,
    ResourceDescriptor, UploadClassification, UploadTarget,
};
