pub mod archive_flow;
pub mod upload_flow;

pub use archive_flow::XmlArchiver;
pub use upload_flow::{Callbacks, ExtractionListener, UploadOrchestrator, UploadState};
