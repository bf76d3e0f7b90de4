//! User-selected files and their media families.

use bytes::Bytes;
use serde::{Deserialize, Serialize};
use std::path::Path;

const OCTET_STREAM: &str = "application/octet-stream";

/// The three families of media the pipeline accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaFamily {
    Image,
    Document,
    Video,
}

impl MediaFamily {
    pub const IMAGE_CONTENT_TYPES: &'static [&'static str] =
        &["image/jpeg", "image/jpg", "image/png"];
    pub const DOCUMENT_CONTENT_TYPES: &'static [&'static str] = &[
        "application/pdf",
        "application/msword",
        "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
        "application/vnd.ms-powerpoint",
        "application/vnd.openxmlformats-officedocument.presentationml.presentation",
    ];
    pub const VIDEO_CONTENT_TYPES: &'static [&'static str] = &["video/mp4"];

    /// Classify a MIME type. Parameters (`; charset=...`) and case are ignored.
    pub fn from_content_type(content_type: &str) -> Option<Self> {
        let normalized = normalize_content_type(content_type);
        let normalized = normalized.as_str();
        if Self::IMAGE_CONTENT_TYPES.contains(&normalized) {
            Some(MediaFamily::Image)
        } else if Self::DOCUMENT_CONTENT_TYPES.contains(&normalized) {
            Some(MediaFamily::Document)
        } else if Self::VIDEO_CONTENT_TYPES.contains(&normalized) {
            Some(MediaFamily::Video)
        } else {
            None
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            MediaFamily::Image => "image",
            MediaFamily::Document => "document",
            MediaFamily::Video => "video",
        }
    }
}

/// Icon shown next to a selected file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FileIcon {
    Image,
    Video,
    Pdf,
    Word,
    Slides,
    Generic,
}

impl FileIcon {
    pub fn for_content_type(content_type: &str) -> Self {
        let ct = normalize_content_type(content_type);
        if ct.starts_with("image/") {
            FileIcon::Image
        } else if ct.starts_with("video/") {
            FileIcon::Video
        } else if ct == "application/pdf" {
            FileIcon::Pdf
        } else if ct.contains("msword") || ct.contains("wordprocessingml") {
            FileIcon::Word
        } else if ct.contains("powerpoint") || ct.contains("presentationml") {
            FileIcon::Slides
        } else {
            FileIcon::Generic
        }
    }
}

/// A file the user picked or dropped, before validation.
///
/// The payload is a shared `Bytes` handle, so passing the file through the
/// gate and into the uploader never copies its contents.
#[derive(Debug, Clone)]
pub struct CandidateFile {
    name: String,
    content_type: String,
    data: Bytes,
}

impl CandidateFile {
    pub fn new(name: impl Into<String>, content_type: impl Into<String>, data: Bytes) -> Self {
        Self {
            name: name.into(),
            content_type: content_type.into(),
            data,
        }
    }

    /// Read a file from disk, taking its display name from the path and its
    /// MIME type from the extension.
    pub async fn from_path(path: impl AsRef<Path>) -> std::io::Result<Self> {
        let path = path.as_ref();
        let data = tokio::fs::read(path).await?;
        let name = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("file")
            .to_string();
        let content_type = content_type_for_filename(&name).to_string();

        Ok(Self::new(name, content_type, Bytes::from(data)))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn content_type(&self) -> &str {
        &self.content_type
    }

    pub fn size(&self) -> u64 {
        self.data.len() as u64
    }

    /// Cheap handle to the raw bytes.
    pub fn data(&self) -> Bytes {
        self.data.clone()
    }

    pub fn family(&self) -> Option<MediaFamily> {
        MediaFamily::from_content_type(&self.content_type)
    }

    pub fn icon(&self) -> FileIcon {
        FileIcon::for_content_type(&self.content_type)
    }

    pub fn human_size(&self) -> String {
        human_size(self.size())
    }
}

/// Map a filename's extension to the MIME type a browser would report for it.
pub fn content_type_for_filename(filename: &str) -> &'static str {
    let extension = Path::new(filename)
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase());

    match extension.as_deref() {
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("png") => "image/png",
        Some("pdf") => "application/pdf",
        Some("doc") => "application/msword",
        Some("docx") => "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
        Some("ppt") => "application/vnd.ms-powerpoint",
        Some("pptx") => {
            "application/vnd.openxmlformats-officedocument.presentationml.presentation"
        }
        Some("mp4") => "video/mp4",
        _ => OCTET_STREAM,
    }
}

/// Format a byte count the way the upload form displays it (`1.5 MB`).
pub fn human_size(bytes: u64) -> String {
    const KB: f64 = 1024.0;
    const MB: f64 = KB * 1024.0;

    let b = bytes as f64;
    if b >= MB {
        format!("{:.1} MB", b / MB)
    } else if b >= KB {
        format!("{:.1} KB", b / KB)
    } else {
        format!("{} B", bytes)
    }
}

fn normalize_content_type(content_type: &str) -> String {
    content_type
        .split(';')
        .next()
        .unwrap_or("")
        .trim()
        .to_lowercase()
}
