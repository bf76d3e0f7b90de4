use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::file::MediaFamily;

/// Host-side media kind. Also the path segment of the upload endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResourceCategory {
    Image,
    Video,
    Raw,
}

impl ResourceCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            ResourceCategory::Image => "image",
            ResourceCategory::Video => "video",
            ResourceCategory::Raw => "raw",
        }
    }
}

impl From<MediaFamily> for ResourceCategory {
    fn from(family: MediaFamily) -> Self {
        match family {
            MediaFamily::Image => ResourceCategory::Image,
            MediaFamily::Video => ResourceCategory::Video,
            MediaFamily::Document => ResourceCategory::Raw,
        }
    }
}

/// Canonical description of an uploaded resource, as returned by the media host.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResourceDescriptor {
    pub secure_url: String,
    pub public_id: String,
    /// Absent for most `raw` uploads.
    #[serde(default)]
    pub format: Option<String>,
    pub resource_type: ResourceCategory,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bytes: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_filename: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}
