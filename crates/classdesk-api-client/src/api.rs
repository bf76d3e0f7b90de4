//! Domain methods for the backend API client.
//!
//! Attachment types are re-exported from `classdesk_core::models`; wrapper
//! types for materials and profiles are defined here.

use chrono::{DateTime, Utc};
use classdesk_core::models::{AttachmentRecord, AttachmentResponse, UploadClassification};
use classdesk_processing::UploadedAttachment;
use serde::{Deserialize, Serialize};

use crate::{ApiClient, ApiError};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct MaterialRequest<'a> {
    title: &'a str,
    #[serde(flatten)]
    attachment: &'a AttachmentRecord,
}

/// Classroom material as stored by the backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MaterialResponse {
    #[serde(alias = "_id")]
    pub id: String,
    pub title: String,
    pub url: String,
    pub file_name: String,
    pub file_type: String,
    #[serde(default)]
    pub file_size: Option<u64>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

/// The signed-in user's profile. Matches PUT /users/{id}/profile-picture.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    #[serde(alias = "_id")]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub profile_picture: Option<String>,
}

/// Whatever the backend stored for an uploaded file.
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum SubmittedAttachment {
    ProfilePicture(UserProfile),
    Material(MaterialResponse),
    Attachment(AttachmentResponse),
}

impl ApiClient {
    /// Attach an uploaded file to an assignment submission.
    pub async fn submit_assignment_attachment(
        &self,
        assignment_id: &str,
        record: &AttachmentRecord,
    ) -> Result<AttachmentResponse, ApiError> {
        self.post_json(
            &format!(
                "/assignments/{}/attachments",
                urlencoding::encode(assignment_id)
            ),
            record,
        )
        .await
    }

    /// Publish an uploaded file as classroom material.
    pub async fn add_classroom_material(
        &self,
        classroom_id: &str,
        title: &str,
        record: &AttachmentRecord,
    ) -> Result<MaterialResponse, ApiError> {
        let body = MaterialRequest {
            title,
            attachment: record,
        };
        self.post_json(
            &format!("/classrooms/{}/materials", urlencoding::encode(classroom_id)),
            &body,
        )
        .await
    }

    /// List a classroom's materials.
    pub async fn list_classroom_materials(
        &self,
        classroom_id: &str,
    ) -> Result<Vec<MaterialResponse>, ApiError> {
        self.get(&format!(
            "/classrooms/{}/materials",
            urlencoding::encode(classroom_id)
        ))
        .await
    }

    /// Point the signed-in user's profile picture at an uploaded image.
    pub async fn update_profile_picture(&self, url: &str) -> Result<UserProfile, ApiError> {
        let identity = self.session().current().ok_or(ApiError::Unauthenticated)?;
        self.put_json(
            &format!(
                "/users/{}/profile-picture",
                urlencoding::encode(&identity.user_id)
            ),
            &serde_json::json!({ "profilePicture": url }),
        )
        .await
    }

    /// Submit a pipeline result to the record its classification belongs to.
    pub async fn submit_uploaded(
        &self,
        uploaded: &UploadedAttachment,
        title: Option<&str>,
    ) -> Result<SubmittedAttachment, ApiError> {
        let record = &uploaded.record;
        match uploaded.classification {
            UploadClassification::Profile => self
                .update_profile_picture(&record.url)
                .await
                .map(SubmittedAttachment::ProfilePicture),
            UploadClassification::Material => {
                let classroom_id = uploaded
                    .target
                    .classroom_id
                    .as_deref()
                    .ok_or(ApiError::MissingIdentifier("classroom id"))?;
                self.add_classroom_material(
                    classroom_id,
                    title.unwrap_or(&record.file_name),
                    record,
                )
                .await
                .map(SubmittedAttachment::Material)
            }
            UploadClassification::Assignment => {
                let assignment_id = uploaded
                    .target
                    .assignment_id
                    .as_deref()
                    .ok_or(ApiError::MissingIdentifier("assignment id"))?;
                self.submit_assignment_attachment(assignment_id, record)
                    .await
                    .map(SubmittedAttachment::Attachment)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_material_request_flattens_attachment() {
        let record = AttachmentRecord {
            url: "https://res.cloudinary.com/demo/raw/upload/fl_attachment/v1/w1.pdf".to_string(),
            file_name: "w1.pdf".to_string(),
            file_type: "application/pdf".to_string(),
            file_size: Some(10),
        };
        let body = MaterialRequest {
            title: "Week 1",
            attachment: &record,
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["title"], "Week 1");
        assert_eq!(json["fileName"], "w1.pdf");
        assert_eq!(json["fileSize"], 10);
    }
}
