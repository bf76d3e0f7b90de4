use classdesk_core::models::{CandidateFile, MediaFamily, UploadClassification, UploadTarget};
use classdesk_core::ValidationError;

use crate::upload::ApprovedUpload;

/// Upload gate
///
/// Checks a candidate file against the type and size policy of its
/// classification before anything touches the network. Rules run in order and
/// the first failing rule wins:
///
/// 1. the MIME type belongs to the image, document or video family
/// 2. the size is within the classification's ceiling
/// 3. the identifiers the destination folder needs are present
#[derive(Debug, Clone, Copy, Default)]
pub struct UploadGate;

impl UploadGate {
    pub fn new() -> Self {
        Self
    }

    /// Validate MIME family
    pub fn validate_content_type(&self, content_type: &str) -> Result<MediaFamily, ValidationError> {
        MediaFamily::from_content_type(content_type).ok_or_else(|| {
            ValidationError::UnsupportedFileType {
                content_type: content_type.to_string(),
            }
        })
    }

    /// Validate file size against the classification ceiling (inclusive)
    pub fn validate_file_size(
        &self,
        size: u64,
        classification: UploadClassification,
    ) -> Result<(), ValidationError> {
        if size > classification.max_size_bytes() {
            return Err(ValidationError::FileTooLarge {
                classification,
                size,
            });
        }

        Ok(())
    }

    /// Validate all rules and hand back a request the uploader accepts.
    pub fn validate(
        &self,
        file: CandidateFile,
        classification: UploadClassification,
        target: &UploadTarget,
    ) -> Result<ApprovedUpload, ValidationError> {
        let result = self.check(&file, classification, target);

        match result {
            Ok((family, folder_suffix)) => Ok(ApprovedUpload::new(
                file,
                classification,
                family,
                target.clone(),
                folder_suffix,
            )),
            Err(e) => {
                tracing::debug!(
                    file_name = %file.name(),
                    content_type = %file.content_type(),
                    size = file.size(),
                    classification = %classification,
                    reason = %e,
                    "Upload rejected"
                );
                Err(e)
            }
        }
    }

    fn check(
        &self,
        file: &CandidateFile,
        classification: UploadClassification,
        target: &UploadTarget,
    ) -> Result<(MediaFamily, String), ValidationError> {
        let family = self.validate_content_type(file.content_type())?;
        self.validate_file_size(file.size(), classification)?;
        let folder_suffix = classification.folder_suffix(target)?;
        Ok((family, folder_suffix))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bytes::Bytes;

    fn file_of(content_type: &str, size: usize) -> CandidateFile {
        CandidateFile::new("upload.bin", content_type, Bytes::from(vec![0u8; size]))
    }

    fn full_target() -> UploadTarget {
        UploadTarget::new().classroom("c1").owner("u1")
    }

    #[test]
    fn test_accepts_each_family() {
        let gate = UploadGate::new();
        for (ct, family) in [
            ("image/jpeg", MediaFamily::Image),
            ("image/jpg", MediaFamily::Image),
            ("image/png", MediaFamily::Image),
            ("application/pdf", MediaFamily::Document),
            ("application/msword", MediaFamily::Document),
            (
                "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
                MediaFamily::Document,
            ),
            ("application/vnd.ms-powerpoint", MediaFamily::Document),
            (
                "application/vnd.openxmlformats-officedocument.presentationml.presentation",
                MediaFamily::Document,
            ),
            ("video/mp4", MediaFamily::Video),
        ] {
            let approved = gate
                .validate(file_of(ct, 1024), UploadClassification::Material, &full_target())
                .unwrap();
            assert_eq!(approved.family(), family, "{}", ct);
        }
    }

    #[test]
    fn test_rejects_unsupported_types() {
        let gate = UploadGate::new();
        for ct in [
            "image/gif",
            "image/webp",
            "video/webm",
            "application/zip",
            "text/plain",
            "application/vnd.ms-excel",
            "",
        ] {
            let err = gate
                .validate(file_of(ct, 10), UploadClassification::Material, &full_target())
                .unwrap_err();
            assert_eq!(err.to_string(), "unsupported file type");
        }
    }

    #[test]
    fn test_size_ceiling_is_inclusive() {
        let gate = UploadGate::new();
        for classification in UploadClassification::ALL {
            let limit = classification.max_size_bytes();
            assert!(gate.validate_file_size(limit, classification).is_ok());
            let err = gate
                .validate_file_size(limit + 1, classification)
                .unwrap_err();
            assert_eq!(
                err.to_string(),
                format!(
                    "{} files must be under {}",
                    classification,
                    classification.size_limit_label()
                )
            );
        }
    }

    #[test]
    fn test_boundary_files_through_validate() {
        let gate = UploadGate::new();
        let limit = UploadClassification::Profile.max_size_bytes() as usize;

        assert!(gate
            .validate(
                file_of("image/png", limit),
                UploadClassification::Profile,
                &UploadTarget::new()
            )
            .is_ok());
        assert!(matches!(
            gate.validate(
                file_of("image/png", limit + 1),
                UploadClassification::Profile,
                &UploadTarget::new()
            ),
            Err(ValidationError::FileTooLarge { size, .. }) if size == limit as u64 + 1
        ));
    }

    #[test]
    fn test_type_rule_wins_over_size_rule() {
        let gate = UploadGate::new();
        let err = gate
            .validate(
                file_of("application/zip", 3 * 1024 * 1024),
                UploadClassification::Profile,
                &UploadTarget::new(),
            )
            .unwrap_err();
        assert!(matches!(err, ValidationError::UnsupportedFileType { .. }));
    }

    #[test]
    fn test_missing_identifier_rejected() {
        let gate = UploadGate::new();
        let err = gate
            .validate(
                file_of("application/pdf", 100),
                UploadClassification::Assignment,
                &UploadTarget::new().classroom("c1"),
            )
            .unwrap_err();
        assert!(matches!(
            err,
            ValidationError::MissingIdentifier { field: "owner id", .. }
        ));
    }

    #[test]
    fn test_approved_upload_carries_folder() {
        let gate = UploadGate::new();
        let approved = gate
            .validate(
                file_of("application/pdf", 100),
                UploadClassification::Assignment,
                &full_target().assignment("a9"),
            )
            .unwrap();
        assert_eq!(approved.folder_suffix(), "/assignments/c1/u1");
        assert_eq!(approved.target().assignment_id.as_deref(), Some("a9"));
        assert_eq!(approved.classification(), UploadClassification::Assignment);
    }
}
