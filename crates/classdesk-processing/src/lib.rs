//! Classdesk attachment processing
//!
//! The client-side half of the attachment pipeline: the upload gate, the
//! gate → uploader orchestration, and the document viewer that consumes
//! stored resource URLs. Talking to the media host is left to implementors of
//! [`MediaUploader`].

pub mod document;
pub mod upload;
pub mod validator;

pub use document::{DocumentViewer, RenderMode, ViewerAction, ViewerState};
pub use upload::{ApprovedUpload, AttachmentPipeline, MediaUploader, UploadedAttachment};
pub use validator::UploadGate;
