//! Credenciales FIEL y sesión SAT - capa de servicios
//!
//! `Disconnected --validate(ok)--> Connected`. `Connected` es terminal durante
//! la vida del proceso; no existe operación de desconexión.
//!
//! Solo se persisten el RFC, la bandera de conexión y el token (`nbk_sat_config`).
//! Los archivos y la contraseña viven únicamente en memoria.

use crate::clients::SatValidator;
use crate::error::{AppResult, CredentialError};
use crate::infrastructure::{load_json, save_json, KeyValueStore};
use crate::models::{Credentials, FileRef, SatConfig};
use crate::services::rfc::{is_valid_rfc, normalize_rfc};
use chrono::{DateTime, Utc};
use std::sync::Arc;
use tracing::{info, warn};

pub const SAT_CONFIG_KEY: &str = "nbk_sat_config";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionState {
    Disconnected,
    Connected { token: String },
}

pub struct SatSession {
    credentials: Credentials,
    state: SessionState,
    last_updated: Option<DateTime<Utc>>,
    store: Arc<dyn KeyValueStore>,
}

impl SatSession {
    /// Restaura lo persistido; un JSON dañado se ignora
    pub fn load(store: Arc<dyn KeyValueStore>) -> Self {
        let persisted = match load_json::<SatConfig>(store.as_ref(), SAT_CONFIG_KEY) {
            Ok(config) => config.unwrap_or_default(),
            Err(e) => {
                warn!("⚠️ Configuración SAT ilegible, se ignora: {}", e);
                SatConfig::default()
            }
        };

        let state = match (persisted.sat_connected, persisted.sat_token) {
            (true, Some(token)) => SessionState::Connected { token },
            _ => SessionState::Disconnected,
        };

        if matches!(state, SessionState::Connected { .. }) {
            info!("✓ Sesión SAT restaurada para {}", persisted.rfc);
        }

        Self {
            credentials: Credentials {
                rfc: persisted.rfc,
                ..Default::default()
            },
            state,
            last_updated: persisted.last_updated,
            store,
        }
    }

    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn is_connected(&self) -> bool {
        matches!(self.state, SessionState::Connected { .. })
    }

    pub fn token(&self) -> Option<&str> {
        match &self.state {
            SessionState::Connected { token } => Some(token),
            SessionState::Disconnected => None,
        }
    }

    pub fn rfc(&self) -> &str {
        &self.credentials.rfc
    }

    pub fn last_updated(&self) -> Option<DateTime<Utc>> {
        self.last_updated
    }

    // ========== Captura de credenciales ==========

    pub fn set_rfc(&mut self, rfc: &str) -> Result<(), CredentialError> {
        self.ensure_unlocked()?;
        self.credentials.rfc = normalize_rfc(rfc);
        Ok(())
    }

    pub fn set_cer_file(&mut self, file: FileRef) -> Result<(), CredentialError> {
        self.ensure_unlocked()?;
        check_extension(&file, "cer")?;
        self.credentials.cer_file = Some(file);
        Ok(())
    }

    pub fn set_key_file(&mut self, file: FileRef) -> Result<(), CredentialError> {
        self.ensure_unlocked()?;
        check_extension(&file, "key")?;
        self.credentials.key_file = Some(file);
        Ok(())
    }

    pub fn set_password(&mut self, password: impl Into<String>) -> Result<(), CredentialError> {
        self.ensure_unlocked()?;
        self.credentials.password = password.into();
        Ok(())
    }

    /// Reemplaza todas las credenciales, aplicando las mismas reglas que los setters
    pub fn set_credentials(&mut self, credentials: Credentials) -> Result<(), CredentialError> {
        self.ensure_unlocked()?;
        if let Some(cer) = &credentials.cer_file {
            check_extension(cer, "cer")?;
        }
        if let Some(key) = &credentials.key_file {
            check_extension(key, "key")?;
        }
        self.credentials = Credentials {
            rfc: normalize_rfc(&credentials.rfc),
            ..credentials
        };
        Ok(())
    }

    // ========== Validación ==========

    /// Valida con el SAT y pasa a `Connected`.
    ///
    /// Con campos faltantes falla con `Incomplete` sin llamar al validador.
    /// Si ya hay sesión, devuelve el estado actual.
    pub async fn validate(&mut self, validator: &dyn SatValidator) -> AppResult<&SessionState> {
        if self.is_connected() {
            info!("Sesión SAT ya activa para {}", self.credentials.rfc);
            return Ok(&self.state);
        }

        let missing = self.credentials.missing_fields();
        if !missing.is_empty() {
            return Err(CredentialError::Incomplete { missing }.into());
        }

        if !is_valid_rfc(&self.credentials.rfc) {
            return Err(CredentialError::InvalidRfc {
                rfc: self.credentials.rfc.clone(),
            }
            .into());
        }

        let token = validator.validate(&self.credentials).await?;

        self.state = SessionState::Connected { token };
        self.last_updated = Some(Utc::now());
        info!("✅ Conectado al SAT como {}", self.credentials.rfc);

        self.persist()?;
        Ok(&self.state)
    }

    fn persist(&self) -> AppResult<()> {
        let config = SatConfig {
            rfc: self.credentials.rfc.clone(),
            sat_connected: self.is_connected(),
            sat_token: self.token().map(str::to_string),
            last_updated: self.last_updated,
        };
        save_json(self.store.as_ref(), SAT_CONFIG_KEY, &config)?;
        Ok(())
    }

    fn ensure_unlocked(&self) -> Result<(), CredentialError> {
        if self.is_connected() {
            Err(CredentialError::Locked)
        } else {
            Ok(())
        }
    }
}

fn check_extension(file: &FileRef, expected: &'static str) -> Result<(), CredentialError> {
    if file.extension().as_deref() == Some(expected) {
        Ok(())
    } else {
        Err(CredentialError::InvalidFileExtension {
            file_name: file.file_name.clone(),
            expected,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clients::SimulatedSatValidator;
    use crate::error::AppError;
    use crate::infrastructure::MemoryStore;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    /// Cuenta las llamadas para comprobar que no se llegó al SAT
    #[derive(Default)]
    struct CountingValidator {
        calls: AtomicUsize,
    }

    #[async_trait]
    impl SatValidator for CountingValidator {
        async fn validate(&self, _credentials: &Credentials) -> Result<String, CredentialError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok("sat_token_fijo".to_string())
        }
    }

    fn fill(session: &mut SatSession) {
        session.set_rfc("aaa010101aaa").unwrap();
        session.set_cer_file(FileRef::new("fiel/00001.cer")).unwrap();
        session.set_key_file(FileRef::new("fiel/Claveprivada.key")).unwrap();
        session.set_password("secreta").unwrap();
    }

    #[tokio::test]
    async fn test_missing_password_fails_and_stays_disconnected() {
        let store: Arc<dyn KeyValueStore> = Arc::new(MemoryStore::new());
        let mut session = SatSession::load(store.clone());
        session.set_rfc("AAA010101AAA").unwrap();
        session.set_cer_file(FileRef::new("fiel.cer")).unwrap();
        session.set_key_file(FileRef::new("fiel.key")).unwrap();

        let validator = CountingValidator::default();
        let err = session.validate(&validator).await.unwrap_err();

        assert!(matches!(
            err,
            AppError::Credential(CredentialError::Incomplete { ref missing }) if missing == &vec!["contraseña"]
        ));
        assert!(err.to_string().starts_with("Credenciales incompletas"));
        assert_eq!(session.state(), &SessionState::Disconnected);
        assert_eq!(validator.calls.load(Ordering::SeqCst), 0);
        assert_eq!(store.get(SAT_CONFIG_KEY).unwrap(), None);
    }

    #[tokio::test]
    async fn test_invalid_rfc_is_rejected_before_validation() {
        let mut session = SatSession::load(Arc::new(MemoryStore::new()));
        fill(&mut session);
        session.set_rfc("AA010101AAA").unwrap();

        let validator = CountingValidator::default();
        let err = session.validate(&validator).await.unwrap_err();

        assert!(matches!(err, AppError::Credential(CredentialError::InvalidRfc { .. })));
        assert_eq!(validator.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_validate_connects_persists_and_locks() {
        let store: Arc<dyn KeyValueStore> = Arc::new(MemoryStore::new());
        let mut session = SatSession::load(store.clone());
        fill(&mut session);

        let state = session
            .validate(&SimulatedSatValidator::new(Duration::ZERO))
            .await
            .unwrap()
            .clone();

        assert!(matches!(state, SessionState::Connected { ref token } if token.starts_with("sat_token_")));
        assert_eq!(session.rfc(), "AAA010101AAA");

        let persisted: SatConfig = load_json(store.as_ref(), SAT_CONFIG_KEY).unwrap().unwrap();
        assert!(persisted.sat_connected);
        assert_eq!(persisted.rfc, "AAA010101AAA");
        assert_eq!(persisted.sat_token.as_deref(), session.token());
        assert!(persisted.last_updated.is_some());

        assert_eq!(session.set_password("otra"), Err(CredentialError::Locked));
        assert_eq!(session.set_rfc("BBB010101BBB"), Err(CredentialError::Locked));
        assert_eq!(session.credentials().password, "secreta");
    }

    #[tokio::test]
    async fn test_validate_when_connected_does_not_call_validator() {
        let mut session = SatSession::load(Arc::new(MemoryStore::new()));
        fill(&mut session);
        let validator = CountingValidator::default();

        session.validate(&validator).await.unwrap();
        session.validate(&validator).await.unwrap();

        assert_eq!(validator.calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_load_restores_connected_session() {
        let store: Arc<dyn KeyValueStore> = Arc::new(MemoryStore::new());
        let config = SatConfig {
            rfc: "GODE561231GR8".to_string(),
            sat_connected: true,
            sat_token: Some("sat_token_previo".to_string()),
            last_updated: Some(Utc::now()),
        };
        save_json(store.as_ref(), SAT_CONFIG_KEY, &config).unwrap();

        let session = SatSession::load(store);
        assert!(session.is_connected());
        assert_eq!(session.token(), Some("sat_token_previo"));
        assert_eq!(session.rfc(), "GODE561231GR8");
    }

    #[test]
    fn test_load_ignores_corrupt_config() {
        let store = Arc::new(MemoryStore::new());
        store.set(SAT_CONFIG_KEY, "no-json").unwrap();

        let session = SatSession::load(store);
        assert!(!session.is_connected());
        assert_eq!(session.rfc(), "");
    }

    #[test]
    fn test_credential_files_require_matching_extension() {
        let mut session = SatSession::load(Arc::new(MemoryStore::new()));

        let err = session.set_cer_file(FileRef::new("fiel.key")).unwrap_err();
        assert_eq!(
            err,
            CredentialError::InvalidFileExtension {
                file_name: "fiel.key".to_string(),
                expected: "cer"
            }
        );
        assert!(session.set_key_file(FileRef::new("FIEL.KEY")).is_ok());
        assert!(session.credentials().cer_file.is_none());
    }
}
