/// Validación de credenciales contra el SAT
///
/// Por ahora solo se simula: una espera fija y un token aleatorio. El trait
/// permite cambiarlo por una llamada real sin tocar a quien lo usa.
use crate::error::CredentialError;
use crate::models::Credentials;
use async_trait::async_trait;
use rand::distr::Alphanumeric;
use rand::Rng;
use std::time::Duration;
use tokio::time::sleep;
use tracing::{debug, info};

#[async_trait]
pub trait SatValidator: Send + Sync {
    /// Devuelve el token de sesión si el SAT acepta las credenciales
    async fn validate(&self, credentials: &Credentials) -> Result<String, CredentialError>;
}

/// Validador simulado
#[derive(Debug, Clone)]
pub struct SimulatedSatValidator {
    delay: Duration,
}

impl SimulatedSatValidator {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }
}

impl Default for SimulatedSatValidator {
    fn default() -> Self {
        Self::new(Duration::from_secs(2))
    }
}

#[async_trait]
impl SatValidator for SimulatedSatValidator {
    async fn validate(&self, credentials: &Credentials) -> Result<String, CredentialError> {
        info!("🔐 Validando FIEL de {} con el SAT (simulado)...", credentials.rfc);

        // Paso 1: ida y vuelta al SAT
        sleep(self.delay).await;

        // Paso 2: token de sesión
        let token = generate_token();
        debug!("Token SAT generado ({} caracteres)", token.len());
        Ok(token)
    }
}

fn generate_token() -> String {
    let suffix: String = rand::rng()
        .sample_iter(&Alphanumeric)
        .take(13)
        .map(|b| char::from(b).to_ascii_lowercase())
        .collect();
    format!("sat_token_{}", suffix)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::FileRef;

    #[test]
    fn test_generate_token_shape() {
        let token = generate_token();
        assert!(token.starts_with("sat_token_"));
        assert_eq!(token.len(), "sat_token_".len() + 13);
        assert_ne!(token, generate_token());
    }

    #[tokio::test]
    async fn test_simulated_validator_returns_token() {
        let validator = SimulatedSatValidator::new(Duration::ZERO);
        let credentials = Credentials {
            rfc: "AAA010101AAA".to_string(),
            key_file: Some(FileRef::new("fiel.key")),
            cer_file: Some(FileRef::new("fiel.cer")),
            password: "secreta".to_string(),
        };

        let token = validator.validate(&credentials).await.unwrap();
        assert!(token.starts_with("sat_token_"));
    }
}
