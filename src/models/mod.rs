pub mod credentials;
pub mod extraction;
pub mod file;
pub mod record;
pub mod sat_config;

pub use credentials::Credentials;
pub use extraction::{ExtractedData, ExtractionResponse, ExtractionResult};
pub use file::{CandidateFile, FileRef, PDF_MIME_TYPE, XML_MIME_TYPE};
pub use record::UploadRecord;
pub use sat_config::SatConfig;
