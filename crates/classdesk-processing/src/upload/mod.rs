//! Upload pipeline: validate → upload → describe.

pub mod pipeline;
pub mod traits;
pub mod types;

pub use pipeline::AttachmentPipeline;
pub use traits::MediaUploader;
pub use types::{ApprovedUpload, UploadedAttachment};
