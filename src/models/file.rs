use std::path::{Path, PathBuf};
use tokio::fs;

pub const PDF_MIME_TYPE: &str = "application/pdf";
pub const XML_MIME_TYPE: &str = "application/xml";

/// Archivo candidato a subirse: nombre, tipo declarado, tamaño y contenido
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateFile {
    pub file_name: String,
    /// Tipo MIME declarado (no se inspecciona el contenido)
    pub mime_type: String,
    pub size_bytes: u64,
    pub contents: Vec<u8>,
}

impl CandidateFile {
    pub fn new(file_name: impl Into<String>, mime_type: impl Into<String>, contents: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            mime_type: mime_type.into(),
            size_bytes: contents.len() as u64,
            contents,
        }
    }

    /// Lee el archivo del disco; el tipo se deduce de la extensión
    pub async fn from_path(path: impl AsRef<Path>) -> std::io::Result<Self> {
        let path = path.as_ref();
        let contents = fs::read(path).await?;
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();
        let mime_type = mime_from_extension(&file_name);
        Ok(Self::new(file_name, mime_type, contents))
    }
}

/// Referencia a un archivo de la FIEL (.cer / .key); no se lee su contenido
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileRef {
    pub file_name: String,
    pub path: PathBuf,
}

impl FileRef {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();
        Self { file_name, path }
    }

    /// Extensión en minúsculas, sin el punto
    pub fn extension(&self) -> Option<String> {
        Path::new(&self.file_name)
            .extension()
            .map(|e| e.to_string_lossy().to_lowercase())
    }
}

pub fn mime_from_extension(file_name: &str) -> &'static str {
    match Path::new(file_name)
        .extension()
        .map(|e| e.to_string_lossy().to_lowercase())
        .as_deref()
    {
        Some("pdf") => PDF_MIME_TYPE,
        Some("xml") => XML_MIME_TYPE,
        _ => "application/octet-stream",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mime_from_extension_is_case_insensitive() {
        assert_eq!(mime_from_extension("Constancia.PDF"), PDF_MIME_TYPE);
        assert_eq!(mime_from_extension("factura.xml"), XML_MIME_TYPE);
        assert_eq!(mime_from_extension("foto.png"), "application/octet-stream");
        assert_eq!(mime_from_extension("sin_extension"), "application/octet-stream");
    }

    #[test]
    fn test_file_ref_extension() {
        let cer = FileRef::new("/tmp/fiel/00001000000500000001.CER");
        assert_eq!(cer.file_name, "00001000000500000001.CER");
        assert_eq!(cer.extension().as_deref(), Some("cer"));
        assert_eq!(FileRef::new("clave").extension(), None);
    }

    #[tokio::test]
    async fn test_from_path_reads_size_and_type() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("constancia.pdf");
        tokio::fs::write(&path, vec![b'%'; 256]).await.unwrap();

        let file = CandidateFile::from_path(&path).await.unwrap();
        assert_eq!(file.file_name, "constancia.pdf");
        assert_eq!(file.mime_type, PDF_MIME_TYPE);
        assert_eq!(file.size_bytes, 256);
    }
}
