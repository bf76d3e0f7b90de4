use classdesk_api_client::SessionService;
use classdesk_core::models::{FileIcon, MediaFamily, UploadClassification, UploadTarget};
use classdesk_core::MediaHostConfig;
use classdesk_processing::ApprovedUpload;
use serde::Serialize;

/// Gate verdict for a file that passed, as printed by `classdesk check`.
#[derive(Debug, Serialize)]
pub struct CheckReport {
    pub file_name: String,
    pub content_type: String,
    pub size: String,
    pub icon: FileIcon,
    pub family: MediaFamily,
    pub classification: UploadClassification,
    pub folder: String,
}

impl CheckReport {
    pub fn from_approved(approved: &ApprovedUpload, base_folder: &str) -> Self {
        let file = approved.file();
        Self {
            file_name: file.name().to_string(),
            content_type: file.content_type().to_string(),
            size: file.human_size(),
            icon: file.icon(),
            family: approved.family(),
            classification: approved.classification(),
            folder: approved.folder(base_folder),
        }
    }
}

/// Output of `classdesk inline-url` and `classdesk download-url`.
#[derive(Debug, PartialEq, Eq, Serialize)]
pub struct UrlReport {
    pub url: String,
    pub media_host: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inline_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub download_url: Option<String>,
}

impl UrlReport {
    pub fn inline(media_host: &MediaHostConfig, url: &str) -> Self {
        let deriver = media_host.url_deriver();
        Self {
            url: url.to_string(),
            media_host: deriver.is_media_host_url(url),
            inline_url: Some(deriver.to_inline_url(url)),
            download_url: None,
        }
    }

    pub fn download(media_host: &MediaHostConfig, url: &str, declared_type: Option<&str>) -> Self {
        let deriver = media_host.url_deriver();
        Self {
            url: url.to_string(),
            media_host: deriver.is_media_host_url(url),
            inline_url: None,
            download_url: Some(deriver.to_download_url(url, declared_type)),
        }
    }
}

/// Upload target from command-line flags. The owner falls back to the
/// signed-in user when `--owner` is not given.
pub fn target_from_args(
    owner: Option<String>,
    classroom: Option<String>,
    assignment: Option<String>,
    session: &SessionService,
) -> UploadTarget {
    UploadTarget {
        owner_id: owner.or_else(|| session.current().map(|identity| identity.user_id)),
        classroom_id: classroom,
        assignment_id: assignment,
    }
}

/// Initialize tracing for the CLI.
pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();
}
