//! Types for the upload pipeline.

use classdesk_core::models::{
    AttachmentRecord, CandidateFile, MediaFamily, ResourceCategory, ResourceDescriptor,
    UploadClassification, UploadTarget,
};

/// A candidate file that passed the upload gate.
///
/// Only [`crate::UploadGate`] constructs this, so holding one proves the file
/// was validated for its classification and target.
#[derive(Clone, Debug)]
pub struct ApprovedUpload {
    file: CandidateFile,
    classification: UploadClassification,
    family: MediaFamily,
    target: UploadTarget,
    folder_suffix: String,
}

impl ApprovedUpload {
    pub(crate) fn new(
        file: CandidateFile,
        classification: UploadClassification,
        family: MediaFamily,
        target: UploadTarget,
        folder_suffix: String,
    ) -> Self {
        Self {
            file,
            classification,
            family,
            target,
            folder_suffix,
        }
    }

    pub fn file(&self) -> &CandidateFile {
        &self.file
    }

    pub fn classification(&self) -> UploadClassification {
        self.classification
    }

    pub fn family(&self) -> MediaFamily {
        self.family
    }

    pub fn resource_category(&self) -> ResourceCategory {
        ResourceCategory::from(self.family)
    }

    /// Documents are delivered as attachments.
    pub fn is_document(&self) -> bool {
        self.family == MediaFamily::Document
    }

    pub fn target(&self) -> &UploadTarget {
        &self.target
    }

    /// Suffix appended to the configured base folder, e.g. `/assignments/c1/u1`.
    pub fn folder_suffix(&self) -> &str {
        &self.folder_suffix
    }

    /// Full destination folder under `base_folder`.
    pub fn folder(&self, base_folder: &str) -> String {
        format!("{}{}", base_folder.trim_end_matches('/'), self.folder_suffix)
    }
}

/// Result of a successful pipeline run.
#[derive(Clone, Debug)]
pub struct UploadedAttachment {
    pub descriptor: ResourceDescriptor,
    /// Fields to submit to the backend.
    pub record: AttachmentRecord,
    pub classification: UploadClassification,
    pub target: UploadTarget,
}
