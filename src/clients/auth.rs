/// Proveedor de autenticación del almacenamiento
///
/// El token se obtiene fuera de banda (la sesión SAT); aquí solo se canjea.
use crate::error::AuthError;
use async_trait::async_trait;
use tracing::debug;

/// Identidad autenticada
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthIdentity {
    pub uid: String,
}

#[async_trait]
pub trait AuthProvider: Send + Sync {
    async fn sign_in_with_token(&self, token: &str) -> Result<AuthIdentity, AuthError>;
}

/// Proveedor simulado: acepta cualquier token no vacío
#[derive(Debug, Clone, Default)]
pub struct TokenAuthProvider;

#[async_trait]
impl AuthProvider for TokenAuthProvider {
    async fn sign_in_with_token(&self, token: &str) -> Result<AuthIdentity, AuthError> {
        let token = token.trim();
        if token.is_empty() {
            return Err(AuthError::EmptyToken);
        }

        let uid = format!("uid_{}", token.trim_start_matches("sat_token_"));
        debug!("Sesión de almacenamiento iniciada: {}", uid);

        Ok(AuthIdentity { uid })
    }
}
