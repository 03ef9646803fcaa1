use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Registro de un archivo archivado; no se modifica después de crearse
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadRecord {
    pub file_name: String,
    pub storage_path: String,
    pub upload_timestamp: DateTime<Utc>,
    pub size_bytes: u64,
}

impl UploadRecord {
    pub fn new(
        file_name: impl Into<String>,
        storage_path: impl Into<String>,
        upload_timestamp: DateTime<Utc>,
        size_bytes: u64,
    ) -> Self {
        Self {
            file_name: file_name.into(),
            storage_path: storage_path.into(),
            upload_timestamp,
            size_bytes,
        }
    }
}
