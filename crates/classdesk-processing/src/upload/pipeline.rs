use std::sync::Arc;

use classdesk_core::models::{AttachmentRecord, CandidateFile, UploadClassification, UploadTarget};
use classdesk_core::AppError;

use super::traits::MediaUploader;
use super::types::UploadedAttachment;
use crate::validator::UploadGate;

/// Gate and uploader wired together.
///
/// The uploader is only reached with an [`super::ApprovedUpload`], so a
/// rejected file never causes a network call.
#[derive(Clone)]
pub struct AttachmentPipeline {
    gate: UploadGate,
    uploader: Arc<dyn MediaUploader>,
}

impl AttachmentPipeline {
    pub fn new(uploader: Arc<dyn MediaUploader>) -> Self {
        Self {
            gate: UploadGate::new(),
            uploader,
        }
    }

    pub fn gate(&self) -> &UploadGate {
        &self.gate
    }

    /// Run the pipeline for a classification given as text (form field, CLI flag).
    pub async fn run_named(
        &self,
        file: CandidateFile,
        classification: &str,
        target: &UploadTarget,
    ) -> Result<UploadedAttachment, AppError> {
        let classification: UploadClassification = classification.parse()?;
        self.run(file, classification, target).await
    }

    /// Run the pipeline: validate → upload.
    pub async fn run(
        &self,
        file: CandidateFile,
        classification: UploadClassification,
        target: &UploadTarget,
    ) -> Result<UploadedAttachment, AppError> {
        let approved = self.gate.validate(file, classification, target)?;
        let file = approved.file().clone();

        let descriptor = self.uploader.upload(approved).await?;
        let record = AttachmentRecord::from_upload(&descriptor, &file);

        tracing::info!(
            file_name = %file.name(),
            classification = %classification,
            public_id = %descriptor.public_id,
            "Attachment uploaded"
        );

        Ok(UploadedAttachment {
            descriptor,
            record,
            classification,
            target: target.clone(),
        })
    }
}
