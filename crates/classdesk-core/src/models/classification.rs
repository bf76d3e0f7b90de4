//! Upload classifications and the identifiers that place a file in the host's folders.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{UploadError, ValidationError};

const MIB: u64 = 1024 * 1024;

/// What an upload is for. Governs the size ceiling, destination folder and
/// delivery preset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UploadClassification {
    Profile,
    Material,
    Assignment,
}

impl UploadClassification {
    pub const ALL: [UploadClassification; 3] = [
        UploadClassification::Profile,
        UploadClassification::Material,
        UploadClassification::Assignment,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            UploadClassification::Profile => "profile",
            UploadClassification::Material => "material",
            UploadClassification::Assignment => "assignment",
        }
    }

    /// Largest accepted file, inclusive.
    pub fn max_size_bytes(&self) -> u64 {
        match self {
            UploadClassification::Profile => 2 * MIB,
            UploadClassification::Material => 50 * MIB,
            UploadClassification::Assignment => 10 * MIB,
        }
    }

    pub fn size_limit_label(&self) -> &'static str {
        match self {
            UploadClassification::Profile => "2MB",
            UploadClassification::Material => "50MB",
            UploadClassification::Assignment => "10MB",
        }
    }

    /// Folder suffix appended to the configured base folder.
    ///
    /// Identifiers the template needs must be present; a missing one is a
    /// validation error rather than an empty path segment.
    pub fn folder_suffix(&self, target: &UploadTarget) -> Result<String, ValidationError> {
        match self {
            UploadClassification::Profile => Ok("/profile_pics".to_string()),
            UploadClassification::Material => {
                let classroom = target.require_classroom(*self)?;
                Ok(format!("/classroom_materials/{}", classroom))
            }
            UploadClassification::Assignment => {
                let classroom = target.require_classroom(*self)?;
                let owner = target.require_owner(*self)?;
                Ok(format!("/assignments/{}/{}", classroom, owner))
            }
        }
    }
}

impl fmt::Display for UploadClassification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for UploadClassification {
    type Err = UploadError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "profile" => Ok(UploadClassification::Profile),
            "material" => Ok(UploadClassification::Material),
            "assignment" => Ok(UploadClassification::Assignment),
            _ => Err(UploadError::InvalidClassification(s.to_string())),
        }
    }
}

/// Identifiers describing where an upload belongs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadTarget {
    pub owner_id: Option<String>,
    pub classroom_id: Option<String>,
    pub assignment_id: Option<String>,
}

impl UploadTarget {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn owner(mut self, owner_id: impl Into<String>) -> Self {
        self.owner_id = Some(owner_id.into());
        self
    }

    pub fn classroom(mut self, classroom_id: impl Into<String>) -> Self {
        self.classroom_id = Some(classroom_id.into());
        self
    }

    pub fn assignment(mut self, assignment_id: impl Into<String>) -> Self {
        self.assignment_id = Some(assignment_id.into());
        self
    }

    fn require_classroom(
        &self,
        classification: UploadClassification,
    ) -> Result<&str, ValidationError> {
        non_empty(self.classroom_id.as_deref()).ok_or(ValidationError::MissingIdentifier {
            classification,
            field: "classroom id",
        })
    }

    fn require_owner(&self, classification: UploadClassification) -> Result<&str, ValidationError> {
        non_empty(self.owner_id.as_deref()).ok_or(ValidationError::MissingIdentifier {
            classification,
            field: "owner id",
        })
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}
