pub mod attachment;
pub mod classification;
pub mod file;
pub mod resource;

pub use attachment::{AttachmentRecord, AttachmentResponse};
pub use classification::{UploadClassification, UploadTarget};
pub use file::{content_type_for_filename, human_size, CandidateFile, FileIcon, MediaFamily};
pub use resource::{ResourceCategory, ResourceDescriptor};
