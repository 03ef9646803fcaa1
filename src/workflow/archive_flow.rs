//! Archivo de XML (CFDI) - capa de flujo
//!
//! sesión SAT activa → inicio de sesión en el almacenamiento → ruta por RFC y fecha
//! → escritura con metadatos → alta en el historial

use crate::clients::AuthProvider;
use crate::error::{AppResult, CredentialError, StorageError};
use crate::infrastructure::ObjectStorage;
use crate::models::{CandidateFile, UploadRecord, XML_MIME_TYPE};
use crate::services::{plan_storage_path, HistoryLedger, SatSession};
use crate::utils::format_size;
use chrono::{DateTime, Datelike, Local, SecondsFormat, Utc};
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::{debug, info};

pub struct XmlArchiver {
    storage: Arc<dyn ObjectStorage>,
    auth: Arc<dyn AuthProvider>,
}

impl XmlArchiver {
    pub fn new(storage: Arc<dyn ObjectStorage>, auth: Arc<dyn AuthProvider>) -> Self {
        Self { storage, auth }
    }

    /// Archiva un XML bajo el RFC de la sesión y lo registra en el historial
    pub async fn archive(
        &self,
        session: &SatSession,
        ledger: &mut HistoryLedger,
        file: &CandidateFile,
        extra_metadata: &BTreeMap<String, String>,
    ) -> AppResult<UploadRecord> {
        self.archive_at(session, ledger, file, extra_metadata, Local::now())
            .await
    }

    async fn archive_at(
        &self,
        session: &SatSession,
        ledger: &mut HistoryLedger,
        file: &CandidateFile,
        extra_metadata: &BTreeMap<String, String>,
        now: DateTime<Local>,
    ) -> AppResult<UploadRecord> {
        let token = session.token().ok_or(CredentialError::NotConnected)?;

        if file.size_bytes == 0 || !file.file_name.to_lowercase().ends_with(".xml") {
            return Err(StorageError::NotXml(file.file_name.clone()).into());
        }

        let identity = self.auth.sign_in_with_token(token).await?;

        let rfc = session.rfc();
        let path = plan_storage_path(rfc, &file.file_name, &now);
        let metadata = build_metadata(rfc, &now, extra_metadata);

        info!(
            "📦 Archivando {} ({}) como {}",
            file.file_name,
            format_size(file.size_bytes),
            identity.uid
        );
        let stored = self
            .storage
            .put(&path, file.contents.clone(), XML_MIME_TYPE, &metadata)
            .await?;

        debug!("Ubicación del objeto: {}", stored.location);

        let record = UploadRecord::new(
            file.file_name.clone(),
            stored.path,
            now.with_timezone(&Utc),
            file.size_bytes,
        );
        ledger.append(record.clone())?;

        info!("✓ Guardado en {}", record.storage_path);
        Ok(record)
    }
}

fn build_metadata(
    rfc: &str,
    now: &DateTime<Local>,
    extra: &BTreeMap<String, String>,
) -> BTreeMap<String, String> {
    let mut metadata = BTreeMap::new();
    metadata.insert("rfc".to_string(), rfc.to_string());
    metadata.insert(
        "uploadDate".to_string(),
        now.with_timezone(&Utc)
            .to_rfc3339_opts(SecondsFormat::Millis, true),
    );
    metadata.insert("year".to_string(), now.year().to_string());
    metadata.insert("month".to_string(), format!("{:02}", now.month()));

    // Los metadatos del llamador van al final y pueden reemplazar los anteriores
    metadata.extend(extra.iter().map(|(k, v)| (k.clone(), v.clone())));
    metadata
}
