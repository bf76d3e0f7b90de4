//! Inline and forced-download variants of media host delivery URLs
//!
//! The host serves a resource inline from `.../upload/...` and as an attachment
//! from `.../upload/fl_attachment/...`. Toggling that one path segment is the
//! only difference between the two variants.
//!
//! # Example
//!
//! ```rust
//! use classdesk_core::delivery_url::{to_download_url, to_inline_url};
//!
//! let url = "https://res.cloudinary.com/demo/raw/upload/v1/notes.docx";
//! let download = to_download_url(url, None);
//! assert_eq!(download, "https://res.cloudinary.com/demo/raw/upload/fl_attachment/v1/notes.docx");
//! assert_eq!(to_inline_url(&download), url);
//! ```

use reqwest::Url;

/// Path segment every delivery URL contains.
pub const UPLOAD_SEGMENT: &str = "/upload/";
/// Delivery URL with the forced-download marker in place.
pub const ATTACHMENT_SEGMENT: &str = "/upload/fl_attachment/";
/// Default hostname substring identifying media host URLs.
pub const DEFAULT_HOST_MARKER: &str = "cloudinary.com";

const OFFICE_SUFFIXES: &[&str] = &["doc", "docx", "xls", "xlsx", "ppt", "pptx", "txt"];
const DOCUMENT_TYPE_HINTS: &[&str] = &["document", "word", "powerpoint", "pdf"];

/// Derives delivery URL variants for one media host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UrlDeriver {
    host_marker: String,
}

impl Default for UrlDeriver {
    fn default() -> Self {
        Self::new(DEFAULT_HOST_MARKER)
    }
}

impl UrlDeriver {
    pub fn new(host_marker: impl Into<String>) -> Self {
        Self {
            host_marker: host_marker.into().to_lowercase(),
        }
    }

    pub fn host_marker(&self) -> &str {
        &self.host_marker
    }

    /// Whether the URL's hostname belongs to the media host.
    pub fn is_media_host_url(&self, url: &str) -> bool {
        host(url)
            .map(|host| host.contains(&self.host_marker))
            .unwrap_or(false)
    }

    /// URL variant for embedding and previewing: the marker is removed.
    pub fn to_inline_url(&self, url: &str) -> String {
        if !self.is_media_host_url(url) {
            return url.to_string();
        }
        let mut inline = url.to_string();
        while inline.contains(ATTACHMENT_SEGMENT) {
            inline = inline.replacen(ATTACHMENT_SEGMENT, UPLOAD_SEGMENT, 1);
        }
        inline
    }

    /// URL variant that makes the browser download the resource.
    ///
    /// Only PDF and office documents get the marker; images and videos are
    /// returned unchanged.
    pub fn to_download_url(&self, url: &str, declared_type: Option<&str>) -> String {
        if !self.is_media_host_url(url) || !is_pdf_or_office(url, declared_type) {
            return url.to_string();
        }
        insert_attachment_marker(url)
    }

    /// Download URL for a stored document, where a `.pdf` suffix also counts
    /// as a document. Other resources get the inline URL.
    pub fn to_document_download_url(&self, url: &str, declared_type: Option<&str>) -> String {
        let inline = self.to_inline_url(url);
        if !self.is_media_host_url(&inline) || !is_document_download(&inline, declared_type) {
            return inline;
        }
        insert_attachment_marker(&inline)
    }
}

/// [`UrlDeriver::to_inline_url`] for the default media host.
pub fn to_inline_url(url: &str) -> String {
    UrlDeriver::default().to_inline_url(url)
}

/// [`UrlDeriver::to_download_url`] for the default media host.
pub fn to_download_url(url: &str, declared_type: Option<&str>) -> String {
    UrlDeriver::default().to_download_url(url, declared_type)
}

/// Insert `fl_attachment/` right after the first `/upload/`, unless it is
/// already there. URLs without `/upload/` are returned unchanged.
pub fn insert_attachment_marker(url: &str) -> String {
    if url.contains(ATTACHMENT_SEGMENT) || !url.contains(UPLOAD_SEGMENT) {
        return url.to_string();
    }
    url.replacen(UPLOAD_SEGMENT, ATTACHMENT_SEGMENT, 1)
}

/// PDF or office document, judged by filename suffix or declared MIME type.
///
/// The suffix list is the office formats only; a `.pdf` without a declared
/// type is not matched here (see [`is_document_download`]).
pub fn is_pdf_or_office(url: &str, declared_type: Option<&str>) -> bool {
    let by_suffix = file_extension(url)
        .map(|ext| OFFICE_SUFFIXES.contains(&ext.as_str()))
        .unwrap_or(false);

    by_suffix || declares_document(declared_type)
}

/// Whether a stored resource should be delivered as a download: PDF or office
/// by declared type, or by an office or `.pdf` filename suffix.
pub fn is_document_download(url: &str, declared_type: Option<&str>) -> bool {
    is_pdf_or_office(url, declared_type) || file_extension(url).as_deref() == Some("pdf")
}

fn declares_document(declared_type: Option<&str>) -> bool {
    declared_type
        .map(|t| {
            let t = t.to_lowercase();
            DOCUMENT_TYPE_HINTS.iter().any(|hint| t.contains(hint))
        })
        .unwrap_or(false)
}

/// Lowercased extension of the last path segment.
fn file_extension(url: &str) -> Option<String> {
    let parsed = Url::parse(url).ok()?;
    let segment = parsed.path_segments()?.next_back()?;
    let (_, ext) = segment.rsplit_once('.')?;
    Some(ext.to_lowercase())
}

fn host(url: &str) -> Option<String> {
    let parsed = Url::parse(url).ok()?;
    parsed.host_str().map(str::to_lowercase)
}

#[cfg(test)]
mod tests {
    use super::*;

    const RAW_DOCX: &str = "https://res.cloudinary.com/demo/raw/upload/v1700000000/classdesk/classroom_materials/c1/week1.docx";
    const RAW_PDF: &str = "https://res.cloudinary.com/demo/raw/upload/v1700000000/classdesk/assignments/c1/u1/essay.pdf";
    const IMAGE_PNG: &str = "https://res.cloudinary.com/demo/image/upload/v1700000000/classdesk/profile_pics/me.png";

    #[test]
    fn test_download_url_for_office_suffix() {
        assert_eq!(
            to_download_url(RAW_DOCX, None),
            "https://res.cloudinary.com/demo/raw/upload/fl_attachment/v1700000000/classdesk/classroom_materials/c1/week1.docx"
        );
    }

    #[test]
    fn test_download_url_for_declared_pdf() {
        let download = to_download_url(RAW_PDF, Some("application/pdf"));
        assert!(download.contains(ATTACHMENT_SEGMENT));
        assert_eq!(download.matches("fl_attachment").count(), 1);
    }

    #[test]
    fn test_pdf_suffix_alone_is_not_office() {
        // Only the declared type marks a PDF for download.
        assert_eq!(to_download_url(RAW_PDF, None), RAW_PDF);
    }

    #[test]
    fn test_download_url_leaves_images_alone() {
        assert_eq!(to_download_url(IMAGE_PNG, Some("image/png")), IMAGE_PNG);
        assert_eq!(to_download_url(IMAGE_PNG, None), IMAGE_PNG);
    }

    #[test]
    fn test_download_url_is_idempotent() {
        for (url, declared) in [
            (RAW_DOCX, None),
            (RAW_PDF, Some("application/pdf")),
            (IMAGE_PNG, Some("image/png")),
        ] {
            let once = to_download_url(url, declared);
            assert_eq!(to_download_url(&once, declared), once);
        }
    }

    #[test]
    fn test_inline_url_is_idempotent() {
        let download = to_download_url(RAW_DOCX, None);
        let once = to_inline_url(&download);
        assert_eq!(to_inline_url(&once), once);
        assert_eq!(to_inline_url(RAW_DOCX), RAW_DOCX);
    }

    #[test]
    fn test_inline_restores_download() {
        for (url, declared) in [
            (RAW_DOCX, None),
            (RAW_PDF, Some("application/vnd.ms-powerpoint")),
            (IMAGE_PNG, None),
        ] {
            let restored = to_inline_url(&to_download_url(url, declared));
            assert!(restored.contains(UPLOAD_SEGMENT));
            assert!(!restored.contains(ATTACHMENT_SEGMENT));
            assert_eq!(restored, url);
        }
    }

    #[test]
    fn test_inline_collapses_repeated_markers() {
        let url = "https://res.cloudinary.com/demo/raw/upload/fl_attachment/fl_attachment/v1/a.doc";
        let once = to_inline_url(url);
        assert_eq!(once, "https://res.cloudinary.com/demo/raw/upload/v1/a.doc");
        assert_eq!(to_inline_url(&once), once);
    }

    #[test]
    fn test_foreign_urls_unchanged() {
        let url = "https://example.com/file.pdf";
        assert_eq!(to_inline_url(url), url);
        assert_eq!(to_download_url(url, Some("application/pdf")), url);

        let lookalike = "https://example.com/cloudinary.com/raw/upload/a.docx";
        assert_eq!(to_download_url(lookalike, None), lookalike);
        assert_eq!(to_inline_url("not a url"), "not a url");
    }

    #[test]
    fn test_custom_host_marker() {
        let deriver = UrlDeriver::new("media.school.test");
        let url = "https://media.school.test/raw/upload/v1/a.pptx";
        assert!(deriver.is_media_host_url(url));
        assert_eq!(
            deriver.to_download_url(url, None),
            "https://media.school.test/raw/upload/fl_attachment/v1/a.pptx"
        );
        assert!(!deriver.is_media_host_url(RAW_DOCX));
    }

    #[test]
    fn test_is_pdf_or_office() {
        assert!(is_pdf_or_office("https://h/x/SLIDES.PPTX", None));
        assert!(is_pdf_or_office("https://h/x/notes.txt?dl=1", None));
        assert!(is_pdf_or_office(
            "https://h/x/blob",
            Some("application/vnd.openxmlformats-officedocument.wordprocessingml.document")
        ));
        assert!(!is_pdf_or_office("https://h/x/clip.mp4", Some("video/mp4")));
        assert!(!is_pdf_or_office("https://h/x/archive.zip", None));
    }

    #[test]
    fn test_insert_marker_without_upload_segment() {
        let url = "https://res.cloudinary.com/demo/raw/private/a.pdf";
        assert_eq!(insert_attachment_marker(url), url);
    }

    #[test]
    fn test_host() {
        assert_eq!(host("https://RES.cloudinary.com/a").as_deref(), Some("res.cloudinary.com"));
        assert_eq!(host("http://user@host.test:8080/x").as_deref(), Some("host.test"));
        assert_eq!(host("/relative/path"), None);
    }

    #[test]
    fn test_backslash_userinfo_is_not_media_host() {
        let url = "https://evil.example\\@res.cloudinary.com/raw/upload/v1/a.docx";
        assert!(!UrlDeriver::default().is_media_host_url(url));
        assert_eq!(to_download_url(url, None), url);
        assert_eq!(to_inline_url(url), url);
    }

    #[test]
    fn test_extension_comes_from_last_path_segment() {
        assert!(!is_pdf_or_office("https://files.docx/raw/upload/v1/blob", None));
        assert!(!is_pdf_or_office("https://h/reports.doc/summary", None));
        assert!(is_pdf_or_office("https://h/x/notes.txt#page=2", None));
    }

    #[test]
    fn test_document_download_counts_pdf_suffix() {
        assert!(is_document_download(RAW_PDF, None));
        assert!(!is_document_download(IMAGE_PNG, None));

        let deriver = UrlDeriver::default();
        let download = deriver.to_document_download_url(RAW_PDF, None);
        assert_eq!(
            download,
            "https://res.cloudinary.com/demo/raw/upload/fl_attachment/v1700000000/classdesk/assignments/c1/u1/essay.pdf"
        );
        assert_eq!(deriver.to_document_download_url(&download, None), download);
        assert_eq!(deriver.to_document_download_url(IMAGE_PNG, None), IMAGE_PNG);
    }
}
