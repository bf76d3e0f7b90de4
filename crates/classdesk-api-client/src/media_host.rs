//! Uploads to the media host.
//!
//! One multipart POST per file to `{api_base}/v1_1/{cloud}/{category}/upload`
//! with the file, the classification's unsigned preset and the destination
//! folder. Documents also ask for attachment delivery, and the returned URL is
//! rewritten to carry the forced-download marker.

use std::time::Duration;

use async_trait::async_trait;
use classdesk_core::delivery_url::insert_attachment_marker;
use classdesk_core::{ClientConfig, MediaHostConfig, ResourceDescriptor, UploadError};
use classdesk_processing::{ApprovedUpload, MediaUploader};
use reqwest::multipart::{Form, Part};
use reqwest::{Body, Client};
use serde::Deserialize;

/// Error body returned by the host on non-2xx responses.
#[derive(Deserialize)]
struct HostErrorBody {
    error: HostErrorMessage,
}

#[derive(Deserialize)]
struct HostErrorMessage {
    message: String,
}

#[derive(Clone, Debug)]
pub struct MediaHostClient {
    client: Client,
    config: MediaHostConfig,
}

impl MediaHostClient {
    pub fn new(config: &ClientConfig) -> Result<Self, UploadError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.media_host.upload_timeout_secs))
            .build()
            .map_err(|e| UploadError::Request(e.to_string()))?;

        Ok(Self {
            client,
            config: config.media_host.clone(),
        })
    }

    pub fn config(&self) -> &MediaHostConfig {
        &self.config
    }

    fn build_form(&self, approved: &ApprovedUpload, folder: &str) -> Result<Form, UploadError> {
        let file = approved.file();
        let part = Part::stream_with_length(Body::from(file.data()), file.size())
            .file_name(file.name().to_string())
            .mime_str(file.content_type())
            .map_err(|e| UploadError::Request(e.to_string()))?;

        let preset = self
            .config
            .presets
            .for_classification(approved.classification())
            .to_string();

        let mut form = Form::new()
            .part("file", part)
            .text("upload_preset", preset)
            .text("folder", folder.to_string());

        if approved.is_document() {
            form = form.text("flags", "attachment");
        }

        Ok(form)
    }
}

#[async_trait]
impl MediaUploader for MediaHostClient {
    async fn upload(&self, approved: ApprovedUpload) -> Result<ResourceDescriptor, UploadError> {
        let category = approved.resource_category();
        let url = self.config.upload_endpoint(category.as_str());
        let folder = approved.folder(&self.config.base_folder);
        let form = self.build_form(&approved, &folder)?;

        tracing::info!(
            file_name = %approved.file().name(),
            size = approved.file().size(),
            resource_type = category.as_str(),
            folder = %folder,
            assignment_id = ?approved.target().assignment_id,
            "Uploading to media host"
        );

        let response = self
            .client
            .post(&url)
            .multipart(form)
            .send()
            .await
            .map_err(|e| UploadError::Network(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| UploadError::Network(e.to_string()))?;

        if !status.is_success() {
            let message = serde_json::from_str::<HostErrorBody>(&body)
                .map(|b| b.error.message)
                .unwrap_or_else(|_| format!("Upload failed with status {}", status));
            tracing::warn!(status = status.as_u16(), message = %message, "Media host rejected upload");
            return Err(UploadError::Host {
                status: status.as_u16(),
                message,
            });
        }

        let mut descriptor: ResourceDescriptor =
            serde_json::from_str(&body).map_err(|e| UploadError::Decode(e.to_string()))?;

        if approved.is_document() {
            descriptor.secure_url = insert_attachment_marker(&descriptor.secure_url);
        }

        tracing::info!(
            public_id = %descriptor.public_id,
            secure_url = %descriptor.secure_url,
            "Media host upload complete"
        );

        Ok(descriptor)
    }
}
