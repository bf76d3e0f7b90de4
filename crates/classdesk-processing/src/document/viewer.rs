//! Document viewer state machine
//!
//! `Loading` → `Ready` after a short fixed delay, or `Error` when the embedded
//! preview frame reports a failure. In `Error` the user picks one of two
//! recovery actions; the preview is never retried automatically.

use std::time::Duration;

use classdesk_core::delivery_url::UrlDeriver;
use classdesk_core::{PreviewError, ViewerConfig};
use serde::Serialize;

/// How the resource should be presented.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RenderMode {
    #[default]
    View,
    Download,
}

impl std::str::FromStr for RenderMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "view" => Ok(RenderMode::View),
            "download" => Ok(RenderMode::Download),
            other => Err(format!("unknown render mode: {}", other)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewerState {
    Loading,
    Ready,
    Error(PreviewError),
}

/// What the hosting page should do.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "action", content = "url", rename_all = "snake_case")]
pub enum ViewerAction {
    /// Show the embeddable viewer pointed at this URL.
    Embed(String),
    /// Open the inline URL in a new browsing context.
    OpenInNewTab(String),
    /// Navigate the current tab; the browser downloads the resource.
    Navigate(String),
}

pub struct DocumentViewer {
    resource_url: String,
    declared_type: Option<String>,
    mode: RenderMode,
    state: ViewerState,
    deriver: UrlDeriver,
    config: ViewerConfig,
}

impl DocumentViewer {
    pub fn new(
        resource_url: impl Into<String>,
        declared_type: Option<String>,
        mode: RenderMode,
        deriver: UrlDeriver,
        config: ViewerConfig,
    ) -> Self {
        Self {
            resource_url: resource_url.into(),
            declared_type,
            mode,
            state: ViewerState::Loading,
            deriver,
            config,
        }
    }

    pub fn state(&self) -> &ViewerState {
        &self.state
    }

    pub fn mode(&self) -> RenderMode {
        self.mode
    }

    pub fn inline_url(&self) -> String {
        self.deriver.to_inline_url(&self.resource_url)
    }

    /// Download-derived URL for PDF/office files, the inline URL otherwise.
    pub fn download_url(&self) -> String {
        self.deriver
            .to_document_download_url(&self.resource_url, self.declared_type.as_deref())
    }

    /// Third-party viewer URL embedding the inline resource.
    pub fn embed_url(&self) -> String {
        format!(
            "{}?url={}&embedded=true",
            self.config.viewer_base,
            urlencoding::encode(&self.inline_url())
        )
    }

    /// Start the viewer. In view mode the state stays `Loading` for the
    /// configured delay, then turns `Ready`; download mode goes straight to a
    /// download navigation. Returns `None` once the frame has failed; the
    /// page then offers [`Self::recovery_actions`] instead of a new embed.
    pub async fn mount(&mut self) -> Option<ViewerAction> {
        if self.mode == RenderMode::Download {
            self.state = ViewerState::Ready;
            return Some(ViewerAction::Navigate(self.download_url()));
        }

        tokio::time::sleep(Duration::from_millis(self.config.loading_delay_ms)).await;

        match self.state {
            ViewerState::Error(_) => None,
            _ => {
                self.state = ViewerState::Ready;
                Some(ViewerAction::Embed(self.embed_url()))
            }
        }
    }

    /// The embedded frame reported a load failure.
    pub fn on_frame_error(&mut self) {
        let err = PreviewError::FrameLoadFailed {
            url: self.inline_url(),
        };
        tracing::warn!(url = %self.resource_url, error = %err, "Document preview failed");
        self.state = ViewerState::Error(err);
    }

    /// Actions offered to the user; empty unless the preview failed.
    pub fn recovery_actions(&self) -> Vec<ViewerAction> {
        match self.state {
            ViewerState::Error(_) => vec![
                ViewerAction::OpenInNewTab(self.inline_url()),
                ViewerAction::Navigate(self.download_url()),
            ],
            _ => Vec::new(),
        }
    }
}
