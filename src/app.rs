use crate::cli::Command;
use crate::clients::{HttpExtractionClient, SimulatedSatValidator, TokenAuthProvider};
use crate::config::Config;
use crate::infrastructure::{JsonFileStore, KeyValueStore, LocalObjectStorage};
use crate::models::{CandidateFile, Credentials, ExtractedData, FileRef};
use crate::services::{FileIntakeValidator, HistoryLedger, SatSession, SessionState};
use crate::utils::format_size;
use crate::utils::logging::{log_extraction_summary, log_startup};
use crate::workflow::{Callbacks, UploadOrchestrator, XmlArchiver};
use anyhow::{bail, Context, Result};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, error, info, warn};

/// Estructura principal de la aplicación
pub struct App {
    session: SatSession,
    ledger: HistoryLedger,
    orchestrator: UploadOrchestrator<HttpExtractionClient>,
    archiver: XmlArchiver,
    validator: SimulatedSatValidator,
}

/// Estadísticas de un lote de archivos
#[derive(Debug, Default)]
struct BatchStats {
    success: usize,
    failed: usize,
}

impl App {
    /// Inicializa la aplicación: carga el estado local y arma los clientes
    pub fn initialize(config: Config) -> Result<Self> {
        log_startup(&config);
        if config.auto_fill_form {
            debug!("auto_fill_form está activo pero todavía no tiene efecto");
        }

        let store: Arc<dyn KeyValueStore> = Arc::new(JsonFileStore::new(&config.data_dir));
        let session = SatSession::load(store.clone());
        let ledger = HistoryLedger::load(store, config.history_limit);

        let client = HttpExtractionClient::new(&config).context("no se pudo preparar el cliente HTTP")?;
        let orchestrator = UploadOrchestrator::new(client, FileIntakeValidator::new(&config));
        let archiver = XmlArchiver::new(
            Arc::new(LocalObjectStorage::new(&config.storage_root)),
            Arc::new(TokenAuthProvider),
        );

        Ok(Self {
            session,
            ledger,
            orchestrator,
            archiver,
            validator: SimulatedSatValidator::new(config.sat_validation_delay()),
        })
    }

    /// Ejecuta un subcomando
    pub async fn run(&mut self, command: Command) -> Result<()> {
        match command {
            Command::Extract { pdf } => self.extract(&pdf).await,
            Command::Connect {
                rfc,
                cer,
                key,
                password,
            } => self.connect(rfc, cer, key, password).await,
            Command::Status => {
                self.status();
                Ok(())
            }
            Command::Archive { files, meta } => {
                self.archive(&files, meta.into_iter().collect()).await
            }
            Command::History { limit } => {
                self.history(limit);
                Ok(())
            }
        }
    }

    async fn extract(&mut self, pdf: &Path) -> Result<()> {
        let file = CandidateFile::from_path(pdf)
            .await
            .with_context(|| format!("no se pudo leer {}", pdf.display()))?;

        let mut callbacks = Callbacks {
            on_data_extracted: |data: &ExtractedData| log_extraction_summary(data),
            on_error: |message: &str| error!("❌ {}", message),
        };

        self.orchestrator.reset();
        // El detalle ya lo reportó `on_error`
        let Ok(result) = self.orchestrator.upload(&file, &mut callbacks).await else {
            bail!("no se pudo extraer {}", file.file_name);
        };

        println!("{}", serde_json::to_string_pretty(&result.data)?);
        Ok(())
    }

    async fn connect(&mut self, rfc: String, cer: PathBuf, key: PathBuf, password: String) -> Result<()> {
        for path in [&cer, &key] {
            if !path.exists() {
                bail!("el archivo {} no existe", path.display());
            }
        }

        self.session.set_credentials(Credentials {
            rfc,
            key_file: Some(FileRef::new(key)),
            cer_file: Some(FileRef::new(cer)),
            password,
        })?;

        self.session.validate(&self.validator).await?;
        self.status();
        Ok(())
    }

    fn status(&self) {
        match self.session.state() {
            SessionState::Connected { .. } => {
                info!("🟢 Conectado al SAT: {}", self.session.rfc());
                if let Some(at) = self.session.last_updated() {
                    info!("Última actualización: {}", at.with_timezone(&chrono::Local).format("%Y-%m-%d %H:%M:%S"));
                }
            }
            SessionState::Disconnected => warn!("🔴 Sin sesión SAT. Usa `sat-intake connect`."),
        }
    }

    async fn archive(&mut self, files: &[PathBuf], meta: BTreeMap<String, String>) -> Result<()> {
        if !self.session.is_connected() {
            bail!("{}", crate::error::CredentialError::NotConnected);
        }

        let mut stats = BatchStats::default();
        for path in files {
            let file = match CandidateFile::from_path(path).await {
                Ok(file) => file,
                Err(e) => {
                    error!("❌ No se pudo leer {}: {}", path.display(), e);
                    stats.failed += 1;
                    continue;
                }
            };

            match self
                .archiver
                .archive(&self.session, &mut self.ledger, &file, &meta)
                .await
            {
                Ok(_) => stats.success += 1,
                Err(e) => {
                    error!("❌ {}: {}", file.file_name, e);
                    stats.failed += 1;
                }
            }
        }

        info!("\n{}", "=".repeat(60));
        info!("✅ Archivados: {}/{}", stats.success, files.len());
        info!("❌ Fallidos: {}", stats.failed);
        info!("{}", "=".repeat(60));

        if stats.failed > 0 {
            bail!("{} archivo(s) no se pudieron archivar", stats.failed);
        }
        Ok(())
    }

    fn history(&self, limit: usize) {
        let recent = self.ledger.recent(limit);
        if recent.is_empty() {
            info!("Historial vacío");
            return;
        }

        for record in recent {
            println!(
                "{}  {:>10}  {}",
                record.upload_timestamp.with_timezone(&chrono::Local).format("%Y-%m-%d %H:%M:%S"),
                format_size(record.size_bytes),
                record.storage_path
            );
        }
    }
}
