//! Validación de archivos entrantes - capa de servicios
//!
//! Reglas en orden: tipo declarado, tamaño máximo, tamaño mínimo.
//! La primera que falla es la que se reporta.

use crate::config::Config;
use crate::error::IntakeError;
use crate::models::{CandidateFile, PDF_MIME_TYPE};

const MIB: u64 = 1024 * 1024;

/// Validador de archivos para el backend de extracción
#[derive(Debug, Clone)]
pub struct FileIntakeValidator {
    accepted_type: &'static str,
    max_bytes: u64,
    min_bytes: u64,
}

impl FileIntakeValidator {
    pub fn new(config: &Config) -> Self {
        Self::with_limits(config.min_file_size_bytes, config.max_file_size_bytes)
    }

    pub fn with_limits(min_bytes: u64, max_bytes: u64) -> Self {
        Self {
            accepted_type: PDF_MIME_TYPE,
            max_bytes,
            min_bytes,
        }
    }

    /// Acepta el archivo o devuelve un único motivo de rechazo. Sin efectos secundarios.
    pub fn validate(&self, file: &CandidateFile) -> Result<(), IntakeError> {
        if file.mime_type != self.accepted_type {
            return Err(IntakeError::InvalidType {
                declared: file.mime_type.clone(),
            });
        }

        if file.size_bytes > self.max_bytes {
            return Err(IntakeError::TooLarge {
                size: file.size_bytes,
                max_mb: self.max_bytes / MIB,
            });
        }

        if file.size_bytes < self.min_bytes {
            return Err(IntakeError::TooSmall {
                size: file.size_bytes,
            });
        }

        Ok(())
    }
}

impl Default for FileIntakeValidator {
    fn default() -> Self {
        Self::with_limits(100, 20 * MIB)
    }
}
