use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::file::CandidateFile;
use super::resource::ResourceDescriptor;

/// Attachment fields submitted to the backend once an upload has succeeded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttachmentRecord {
    pub url: String,
    pub file_name: String,
    pub file_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_size: Option<u64>,
}

impl AttachmentRecord {
    pub fn from_upload(descriptor: &ResourceDescriptor, file: &CandidateFile) -> Self {
        Self {
            url: descriptor.secure_url.clone(),
            file_name: file.name().to_string(),
            file_type: file.content_type().to_string(),
            file_size: Some(file.size()),
        }
    }
}

/// Attachment as stored by the backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttachmentResponse {
    #[serde(alias = "_id")]
    pub id: String,
    pub url: String,
    pub file_name: String,
    pub file_type: String,
    #[serde(default)]
    pub file_size: Option<u64>,
    #[serde(default)]
    pub uploaded_at: Option<DateTime<Utc>>,
}
