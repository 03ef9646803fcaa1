/// Cliente del backend de extracción
///
/// Envía la constancia en PDF como multipart y clasifica las fallas de transporte
use crate::config::Config;
use crate::error::{ConfigError, UploadError};
use crate::models::{CandidateFile, ExtractionResponse};
use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use std::time::Duration;
use tracing::{debug, warn};

pub const EXTRACT_ENDPOINT: &str = "/api/companies/extract-constancia";
/// Campo multipart que espera el backend
pub const FILE_FIELD: &str = "constancia";
const GENERIC_SERVER_ERROR: &str = "Error al procesar el PDF";

#[async_trait]
pub trait ExtractionClient: Send + Sync {
    /// Envía el archivo y devuelve el cuerpo JSON de la respuesta.
    ///
    /// Un estado HTTP de error se devuelve como `UploadError::Server`.
    async fn submit(&self, file: &CandidateFile) -> Result<ExtractionResponse, UploadError>;
}

/// Cliente HTTP (reqwest)
pub struct HttpExtractionClient {
    http: reqwest::Client,
    api_url: String,
}

impl HttpExtractionClient {
    pub fn new(config: &Config) -> Result<Self, ConfigError> {
        Self::with_timeout(&config.api_url, config.upload_timeout())
    }

    pub fn with_timeout(api_url: impl Into<String>, timeout: Duration) -> Result<Self, ConfigError> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ConfigError::HttpClient(e.to_string()))?;

        Ok(Self {
            http,
            api_url: api_url.into(),
        })
    }

    pub fn endpoint(&self) -> String {
        format!("{}{}", self.api_url.trim_end_matches('/'), EXTRACT_ENDPOINT)
    }
}

#[async_trait]
impl ExtractionClient for HttpExtractionClient {
    async fn submit(&self, file: &CandidateFile) -> Result<ExtractionResponse, UploadError> {
        let url = self.endpoint();
        debug!("POST {} ({} bytes)", url, file.size_bytes);

        let part = Part::bytes(file.contents.clone())
            .file_name(file.file_name.clone())
            .mime_str(&file.mime_type)
            .map_err(|e| UploadError::Request(e.to_string()))?;
        let form = Form::new().part(FILE_FIELD, part);

        let response = self
            .http
            .post(&url)
            .multipart(form)
            .send()
            .await
            .map_err(classify_send_error)?;

        let status = response.status();
        let body = response.text().await.map_err(|e| {
            warn!("Respuesta interrumpida: {}", e);
            UploadError::NoResponse {
                detail: e.to_string(),
            }
        })?;

        parse_response(status.as_u16(), status.is_success(), &body)
    }
}

/// Distingue "no se pudo construir" de "se envió pero no hubo respuesta"
fn classify_send_error(err: reqwest::Error) -> UploadError {
    if err.is_builder() {
        UploadError::Request(err.to_string())
    } else {
        warn!("Sin respuesta del backend: {}", err);
        UploadError::NoResponse {
            detail: err.to_string(),
        }
    }
}

/// Interpreta el cuerpo según el estado HTTP
pub fn parse_response(status: u16, is_success: bool, body: &str) -> Result<ExtractionResponse, UploadError> {
    let parsed = serde_json::from_str::<ExtractionResponse>(body);

    if !is_success {
        let message = parsed
            .ok()
            .and_then(|r| r.server_message().map(str::to_string))
            .unwrap_or_else(|| GENERIC_SERVER_ERROR.to_string());
        return Err(UploadError::server(Some(status), message));
    }

    parsed.map_err(|e| {
        warn!("JSON inválido del backend: {}", e);
        UploadError::server(Some(status), "Respuesta inválida del servidor")
    })
}
