use crate::error::ConfigError;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Configuración del programa
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    /// URL base del backend de extracción
    pub api_url: String,
    /// Tiempo máximo de espera de la carga (segundos)
    pub upload_timeout_secs: u64,
    /// Tamaño máximo aceptado para el PDF
    pub max_file_size_bytes: u64,
    /// Tamaño mínimo; por debajo se considera corrupto
    pub min_file_size_bytes: u64,
    /// Espera simulada de la validación SAT (milisegundos)
    pub sat_validation_delay_ms: u64,
    /// Número de registros que conserva el historial
    pub history_limit: usize,
    /// Directorio del almacén clave-valor local
    pub data_dir: PathBuf,
    /// Raíz del almacenamiento de objetos local
    pub storage_root: PathBuf,
    /// Mostrar logs detallados
    pub verbose_logging: bool,
    /// Se acepta pero todavía no se usa
    pub auto_fill_form: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: "http://localhost:3000".to_string(),
            upload_timeout_secs: 30,
            max_file_size_bytes: 20 * 1024 * 1024,
            min_file_size_bytes: 100,
            sat_validation_delay_ms: 2000,
            history_limit: 50,
            data_dir: PathBuf::from(".sat_intake"),
            storage_root: PathBuf::from(".sat_intake/storage"),
            verbose_logging: false,
            auto_fill_form: false,
        }
    }
}

impl Config {
    /// Carga `SAT_INTAKE_CONFIG` (si existe) y aplica encima las variables de entorno
    pub fn load() -> Result<Self, ConfigError> {
        match std::env::var("SAT_INTAKE_CONFIG") {
            Ok(path) => Ok(Self::from_toml_file(path)?.with_env_overrides()),
            Err(_) => Ok(Self::from_env()),
        }
    }

    /// Valores por defecto más variables `SAT_INTAKE_*`
    pub fn from_env() -> Self {
        Self::default().with_env_overrides()
    }

    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::ReadFailed {
            path: path.display().to_string(),
            source,
        })?;
        toml::from_str(&content).map_err(|source| ConfigError::TomlParseFailed {
            path: path.display().to_string(),
            source,
        })
    }

    /// Valores no parseables conservan el valor anterior
    pub fn with_env_overrides(self) -> Self {
        Self {
            api_url: std::env::var("SAT_INTAKE_API_URL").unwrap_or(self.api_url),
            upload_timeout_secs: std::env::var("SAT_INTAKE_UPLOAD_TIMEOUT_SECS").ok().and_then(|v| v.parse().ok()).unwrap_or(self.upload_timeout_secs),
            max_file_size_bytes: std::env::var("SAT_INTAKE_MAX_FILE_SIZE").ok().and_then(|v| v.parse().ok()).unwrap_or(self.max_file_size_bytes),
            min_file_size_bytes: std::env::var("SAT_INTAKE_MIN_FILE_SIZE").ok().and_then(|v| v.parse().ok()).unwrap_or(self.min_file_size_bytes),
            sat_validation_delay_ms: std::env::var("SAT_INTAKE_VALIDATION_DELAY_MS").ok().and_then(|v| v.parse().ok()).unwrap_or(self.sat_validation_delay_ms),
            history_limit: std::env::var("SAT_INTAKE_HISTORY_LIMIT").ok().and_then(|v| v.parse().ok()).unwrap_or(self.history_limit),
            data_dir: std::env::var("SAT_INTAKE_DATA_DIR").map(PathBuf::from).unwrap_or(self.data_dir),
            storage_root: std::env::var("SAT_INTAKE_STORAGE_ROOT").map(PathBuf::from).unwrap_or(self.storage_root),
            verbose_logging: std::env::var("VERBOSE_LOGGING").ok().and_then(|v| v.parse().ok()).unwrap_or(self.verbose_logging),
            auto_fill_form: std::env::var("SAT_INTAKE_AUTO_FILL_FORM").ok().and_then(|v| v.parse().ok()).unwrap_or(self.auto_fill_form),
        }
    }

    pub fn upload_timeout(&self) -> Duration {
        Duration::from_secs(self.upload_timeout_secs)
    }

    pub fn sat_validation_delay(&self) -> Duration {
        Duration::from_millis(self.sat_validation_delay_ms)
    }
}
