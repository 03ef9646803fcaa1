//! Almacenamiento de objetos - capa de infraestructura
//!
//! Abstracción del bucket donde se archivan los XML. La ruta del objeto la
//! decide quien llama; aquí solo se valida y se escribe.

use crate::error::StorageError;
use async_trait::async_trait;
use serde_json::json;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tokio::fs;
use tracing::{debug, info};

/// Objeto escrito en el almacenamiento
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredObject {
    pub path: String,
    pub size_bytes: u64,
    /// Ubicación legible (ruta en disco, URL, etc.)
    pub location: String,
}

#[async_trait]
pub trait ObjectStorage: Send + Sync {
    /// Escribe `data` en `path` con metadatos personalizados
    async fn put(
        &self,
        path: &str,
        data: Vec<u8>,
        content_type: &str,
        metadata: &BTreeMap<String, String>,
    ) -> Result<StoredObject, StorageError>;
}

/// Rechaza rutas que podrían salirse de la raíz
fn validate_key(path: &str) -> Result<(), StorageError> {
    if path.is_empty() || path.starts_with('/') || path.split('/').any(|seg| seg == "..") {
        return Err(StorageError::InvalidKey(path.to_string()));
    }
    Ok(())
}

/// Almacenamiento en disco: el objeto más un `{archivo}.metadata.json` al lado
#[derive(Debug, Clone)]
pub struct LocalObjectStorage {
    root: PathBuf,
}

impl LocalObjectStorage {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn sidecar_path(object_path: &Path) -> PathBuf {
        let mut name = object_path.as_os_str().to_owned();
        name.push(".metadata.json");
        PathBuf::from(name)
    }
}

#[async_trait]
impl ObjectStorage for LocalObjectStorage {
    async fn put(
        &self,
        path: &str,
        data: Vec<u8>,
        content_type: &str,
        metadata: &BTreeMap<String, String>,
    ) -> Result<StoredObject, StorageError> {
        validate_key(path)?;

        let target = self.root.join(path);
        let write_failed = |source| StorageError::WriteFailed {
            path: path.to_string(),
            source,
        };

        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent).await.map_err(write_failed)?;
        }

        let size_bytes = data.len() as u64;
        fs::write(&target, data).await.map_err(write_failed)?;

        let sidecar = serde_json::to_vec_pretty(&json!({
            "contentType": content_type,
            "customMetadata": metadata,
        }))?;
        fs::write(Self::sidecar_path(&target), sidecar)
            .await
            .map_err(write_failed)?;

        info!("☁️ Objeto guardado: {} ({} bytes)", path, size_bytes);

        Ok(StoredObject {
            path: path.to_string(),
            size_bytes,
            location: target.display().to_string(),
        })
    }
}

/// Objeto guardado en [`MemoryObjectStorage`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemoryObject {
    pub data: Vec<u8>,
    pub content_type: String,
    pub metadata: BTreeMap<String, String>,
}

/// Almacenamiento en memoria, para pruebas
#[derive(Debug, Default)]
pub struct MemoryObjectStorage {
    objects: Mutex<BTreeMap<String, MemoryObject>>,
}

impl MemoryObjectStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, path: &str) -> Option<MemoryObject> {
        let objects = self.objects.lock().unwrap_or_else(|e| e.into_inner());
        objects.get(path).cloned()
    }

    pub fn paths(&self) -> Vec<String> {
        let objects = self.objects.lock().unwrap_or_else(|e| e.into_inner());
        objects.keys().cloned().collect()
    }
}

#[async_trait]
impl ObjectStorage for MemoryObjectStorage {
    async fn put(
        &self,
        path: &str,
        data: Vec<u8>,
        content_type: &str,
        metadata: &BTreeMap<String, String>,
    ) -> Result<StoredObject, StorageError> {
        validate_key(path)?;

        let size_bytes = data.len() as u64;
        let mut objects = self.objects.lock().unwrap_or_else(|e| e.into_inner());
        objects.insert(
            path.to_string(),
            MemoryObject {
                data,
                content_type: content_type.to_string(),
                metadata: metadata.clone(),
            },
        );
        debug!("Objeto en memoria: {}", path);

        Ok(StoredObject {
            path: path.to_string(),
            size_bytes,
            location: format!("memory://{}", path),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_key_rejects_traversal() {
        assert!(validate_key("xmls/AAA010101AAA/2026/10/1_a.xml").is_ok());
        assert!(validate_key("/etc/passwd").is_err());
        assert!(validate_key("xmls/../../secreto").is_err());
        assert!(validate_key("").is_err());
    }

    #[test]
    fn test_local_storage_writes_object_and_sidecar() {
        let dir = tempfile::tempdir().unwrap();
        let storage = LocalObjectStorage::new(dir.path());
        let mut metadata = BTreeMap::new();
        metadata.insert("rfc".to_string(), "AAA010101AAA".to_string());

        let stored = tokio_test::block_on(storage.put(
            "xmls/AAA010101AAA/2026/10/1760000000000_factura.xml",
            b"<cfdi:Comprobante/>".to_vec(),
            "application/xml",
            &metadata,
        ))
        .unwrap();

        assert_eq!(stored.size_bytes, 19);
        let object = dir
            .path()
            .join("xmls/AAA010101AAA/2026/10/1760000000000_factura.xml");
        assert_eq!(std::fs::read(&object).unwrap(), b"<cfdi:Comprobante/>");

        let sidecar: serde_json::Value = serde_json::from_slice(
            &std::fs::read(LocalObjectStorage::sidecar_path(&object)).unwrap(),
        )
        .unwrap();
        assert_eq!(sidecar["customMetadata"]["rfc"], "AAA010101AAA");
        assert_eq!(sidecar["contentType"], "application/xml");
    }

    #[tokio::test]
    async fn test_memory_storage_rejects_invalid_key() {
        let storage = MemoryObjectStorage::new();
        let err = storage
            .put("../fuera.xml", vec![1], "application/xml", &BTreeMap::new())
            .await
            .unwrap_err();
        assert!(matches!(err, StorageError::InvalidKey(_)));
        assert!(storage.paths().is_empty());
    }
}
