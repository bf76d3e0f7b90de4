//! Configuration module
//!
//! This module provides configuration for the media host, the classroom backend
//! and the document viewer. Everything is read from the environment (and an
//! optional `.env` file).

use std::env;

use crate::delivery_url::{UrlDeriver, DEFAULT_HOST_MARKER};
use crate::models::UploadClassification;

// Common constants
const MEDIA_HOST_API_BASE: &str = "https://api.cloudinary.com";
const MEDIA_BASE_FOLDER: &str = "classdesk";
const UPLOAD_TIMEOUT_SECS: u64 = 60;
const BACKEND_API_URL: &str = "http://localhost:5000";
const BACKEND_API_VERSION: &str = "v1";
const DOC_VIEWER_BASE: &str = "https://docs.google.com/viewer";
const DOC_VIEWER_LOADING_DELAY_MS: u64 = 1000;

/// One unsigned upload preset per classification.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UploadPresets {
    pub profile: String,
    pub material: String,
    pub assignment: String,
}

impl Default for UploadPresets {
    fn default() -> Self {
        Self {
            profile: "classdesk_profile".to_string(),
            material: "classdesk_materials".to_string(),
            assignment: "classdesk_assignments".to_string(),
        }
    }
}

impl UploadPresets {
    pub fn for_classification(&self, classification: UploadClassification) -> &str {
        match classification {
            UploadClassification::Profile => &self.profile,
            UploadClassification::Material => &self.material,
            UploadClassification::Assignment => &self.assignment,
        }
    }
}

/// Media host (upload + delivery) configuration
#[derive(Clone, Debug)]
pub struct MediaHostConfig {
    pub cloud_name: String,
    pub api_base: String,
    /// Hostname substring identifying delivery URLs of this host.
    pub delivery_marker: String,
    pub base_folder: String,
    pub presets: UploadPresets,
    pub upload_timeout_secs: u64,
}

impl MediaHostConfig {
    pub fn new(cloud_name: impl Into<String>) -> Self {
        Self {
            cloud_name: cloud_name.into(),
            api_base: MEDIA_HOST_API_BASE.to_string(),
            delivery_marker: DEFAULT_HOST_MARKER.to_string(),
            base_folder: MEDIA_BASE_FOLDER.to_string(),
            presets: UploadPresets::default(),
            upload_timeout_secs: UPLOAD_TIMEOUT_SECS,
        }
    }

    /// Upload endpoint for a resource category, e.g.
    /// `https://api.cloudinary.com/v1_1/demo/raw/upload`.
    pub fn upload_endpoint(&self, resource_category: &str) -> String {
        format!(
            "{}/v1_1/{}/{}/upload",
            self.api_base.trim_end_matches('/'),
            self.cloud_name,
            resource_category
        )
    }

    /// URL deriver recognizing this host's delivery URLs.
    pub fn url_deriver(&self) -> UrlDeriver {
        UrlDeriver::new(self.delivery_marker.as_str())
    }
}

/// Classroom backend configuration
#[derive(Clone, Debug)]
pub struct BackendConfig {
    pub api_url: String,
    pub api_version: String,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            api_url: BACKEND_API_URL.to_string(),
            api_version: BACKEND_API_VERSION.to_string(),
        }
    }
}

/// Embedded document viewer configuration
#[derive(Clone, Debug)]
pub struct ViewerConfig {
    pub viewer_base: String,
    pub loading_delay_ms: u64,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            viewer_base: DOC_VIEWER_BASE.to_string(),
            loading_delay_ms: DOC_VIEWER_LOADING_DELAY_MS,
        }
    }
}

/// Client configuration.
#[derive(Clone, Debug)]
pub struct ClientConfig {
    pub media_host: MediaHostConfig,
    pub backend: BackendConfig,
    pub viewer: ViewerConfig,
    pub environment: String,
}

impl ClientConfig {
    /// Defaults for everything except the cloud name.
    pub fn new(cloud_name: impl Into<String>) -> Self {
        Self {
            media_host: MediaHostConfig::new(cloud_name),
            backend: BackendConfig::default(),
            viewer: ViewerConfig::default(),
            environment: "development".to_string(),
        }
    }

    /// Check if the application is running in production mode
    pub fn is_production(&self) -> bool {
        let env = self.environment.to_lowercase();
        env == "production" || env == "prod"
    }

    pub fn from_env() -> Result<Self, anyhow::Error> {
        dotenvy::dotenv().ok();

        let environment = env::var("ENVIRONMENT")
            .or_else(|_| env::var("APP_ENV"))
            .unwrap_or_else(|_| "development".to_string());

        let defaults = UploadPresets::default();
        let presets = UploadPresets {
            profile: env::var("MEDIA_PRESET_PROFILE").unwrap_or(defaults.profile),
            material: env::var("MEDIA_PRESET_MATERIAL").unwrap_or(defaults.material),
            assignment: env::var("MEDIA_PRESET_ASSIGNMENT").unwrap_or(defaults.assignment),
        };

        let media_host = MediaHostConfig {
            cloud_name: env::var("MEDIA_HOST_CLOUD_NAME")
                .map_err(|_| anyhow::anyhow!("MEDIA_HOST_CLOUD_NAME must be set"))?,
            api_base: env::var("MEDIA_HOST_API_BASE")
                .unwrap_or_else(|_| MEDIA_HOST_API_BASE.to_string())
                .trim_end_matches('/')
                .to_string(),
            delivery_marker: env::var("MEDIA_HOST_DELIVERY_MARKER")
                .unwrap_or_else(|_| DEFAULT_HOST_MARKER.to_string())
                .to_lowercase(),
            base_folder: env::var("MEDIA_BASE_FOLDER")
                .unwrap_or_else(|_| MEDIA_BASE_FOLDER.to_string())
                .trim_matches('/')
                .to_string(),
            presets,
            upload_timeout_secs: env::var("MEDIA_UPLOAD_TIMEOUT_SECS")
                .unwrap_or_else(|_| UPLOAD_TIMEOUT_SECS.to_string())
                .parse()
                .unwrap_or(UPLOAD_TIMEOUT_SECS),
        };

        let backend = BackendConfig {
            api_url: env::var("CLASSDESK_API_URL")
                .or_else(|_| env::var("API_URL"))
                .unwrap_or_else(|_| BACKEND_API_URL.to_string())
                .trim_end_matches('/')
                .to_string(),
            api_version: env::var("CLASSDESK_API_VERSION")
                .unwrap_or_else(|_| BACKEND_API_VERSION.to_string()),
        };

        let viewer = ViewerConfig {
            viewer_base: env::var("DOC_VIEWER_BASE")
                .unwrap_or_else(|_| DOC_VIEWER_BASE.to_string()),
            loading_delay_ms: env::var("DOC_VIEWER_LOADING_DELAY_MS")
                .unwrap_or_else(|_| DOC_VIEWER_LOADING_DELAY_MS.to_string())
                .parse()
                .unwrap_or(DOC_VIEWER_LOADING_DELAY_MS),
        };

        let config = ClientConfig {
            media_host,
            backend,
            viewer,
            environment,
        };

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), anyhow::Error> {
        if self.media_host.cloud_name.trim().is_empty() {
            return Err(anyhow::anyhow!("MEDIA_HOST_CLOUD_NAME cannot be empty"));
        }

        if !is_http_url(&self.media_host.api_base) {
            return Err(anyhow::anyhow!(
                "MEDIA_HOST_API_BASE must be an http(s) URL"
            ));
        }

        if self.is_production() && !self.media_host.api_base.starts_with("https://") {
            return Err(anyhow::anyhow!(
                "MEDIA_HOST_API_BASE must use https in production"
            ));
        }

        if self.media_host.delivery_marker.trim().is_empty() {
            return Err(anyhow::anyhow!(
                "MEDIA_HOST_DELIVERY_MARKER cannot be empty"
            ));
        }

        for classification in UploadClassification::ALL {
            if self
                .media_host
                .presets
                .for_classification(classification)
                .trim()
                .is_empty()
            {
                return Err(anyhow::anyhow!(
                    "Upload preset for {} files cannot be empty",
                    classification
                ));
            }
        }

        if !is_http_url(&self.backend.api_url) {
            return Err(anyhow::anyhow!("CLASSDESK_API_URL must be an http(s) URL"));
        }

        if !is_http_url(&self.viewer.viewer_base) {
            return Err(anyhow::anyhow!("DOC_VIEWER_BASE must be an http(s) URL"));
        }

        Ok(())
    }

    /// API prefix of the classroom backend (e.g. "/api/v1").
    pub fn api_prefix(&self) -> String {
        format!("/api/{}", self.backend.api_version)
    }
}

fn is_http_url(value: &str) -> bool {
    value.starts_with("http://") || value.starts_with("https://")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = ClientConfig::new("demo");
        assert!(config.validate().is_ok());
        assert!(!config.is_production());
        assert_eq!(config.api_prefix(), "/api/v1");
    }

    #[test]
    fn test_upload_endpoint() {
        let mut config = ClientConfig::new("demo");
        assert_eq!(
            config.media_host.upload_endpoint("raw"),
            "https://api.cloudinary.com/v1_1/demo/raw/upload"
        );

        config.media_host.api_base = "http://127.0.0.1:1234/".to_string();
        assert_eq!(
            config.media_host.upload_endpoint("image"),
            "http://127.0.0.1:1234/v1_1/demo/image/upload"
        );
    }

    #[test]
    fn test_presets_per_classification() {
        let presets = UploadPresets::default();
        assert_eq!(
            presets.for_classification(UploadClassification::Profile),
            "classdesk_profile"
        );
        assert_eq!(
            presets.for_classification(UploadClassification::Material),
            "classdesk_materials"
        );
        assert_eq!(
            presets.for_classification(UploadClassification::Assignment),
            "classdesk_assignments"
        );
    }

    #[test]
    fn test_validate_rejects_empty_cloud_name() {
        let config = ClientConfig::new("  ");
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_plain_http_in_production() {
        let mut config = ClientConfig::new("demo");
        config.media_host.api_base = "http://api.cloudinary.com".to_string();
        assert!(config.validate().is_ok());

        config.environment = "Production".to_string();
        assert!(config.is_production());
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_empty_preset() {
        let mut config = ClientConfig::new("demo");
        config.media_host.presets.material = String::new();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("material"));
    }

    #[test]
    fn test_validate_rejects_bad_backend_url() {
        let mut config = ClientConfig::new("demo");
        config.backend.api_url = "localhost:5000".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_from_env_validates() {
        env::set_var("MEDIA_HOST_CLOUD_NAME", "demo");
        env::set_var("MEDIA_HOST_API_BASE", "ftp://api.cloudinary.com");
        let rejected = ClientConfig::from_env();

        env::set_var("MEDIA_HOST_API_BASE", "https://api.cloudinary.com/");
        let accepted = ClientConfig::from_env();

        env::remove_var("MEDIA_HOST_API_BASE");
        env::remove_var("MEDIA_HOST_CLOUD_NAME");

        assert!(rejected.is_err());
        assert_eq!(accepted.unwrap().media_host.api_base, "https://api.cloudinary.com");
    }
}
