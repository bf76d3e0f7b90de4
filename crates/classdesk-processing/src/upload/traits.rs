//! Seams of the upload pipeline

use async_trait::async_trait;
use classdesk_core::{ResourceDescriptor, UploadError};

use super::types::ApprovedUpload;

/// Sends an approved file to the media host.
///
/// One request per call: no retry, no chunking. Failures are returned to the
/// caller as-is.
#[async_trait]
pub trait MediaUploader: Send + Sync {
    async fn upload(&self, approved: ApprovedUpload) -> Result<ResourceDescriptor, UploadError>;
}
