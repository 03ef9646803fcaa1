//! Carga de la constancia - capa de flujo
//!
//! validar archivo → enviar al backend → notificar al listener.
//! En cada invocación se dispara exactamente un aviso: datos o error.

use crate::clients::ExtractionClient;
use crate::error::UploadError;
use crate::models::{CandidateFile, ExtractedData, ExtractionResult};
use crate::services::FileIntakeValidator;
use crate::utils::format_size;
use tracing::{error, info};

const GENERIC_SERVER_ERROR: &str = "Error al procesar el PDF";

/// Receptor del resultado de una carga
pub trait ExtractionListener {
    fn on_data_extracted(&mut self, data: &ExtractedData);

    fn on_error(&mut self, message: &str);
}

/// Listener a partir de dos closures
pub struct Callbacks<D, E> {
    pub on_data_extracted: D,
    pub on_error: E,
}

impl<D, E> ExtractionListener for Callbacks<D, E>
where
    D: FnMut(&ExtractedData),
    E: FnMut(&str),
{
    fn on_data_extracted(&mut self, data: &ExtractedData) {
        (self.on_data_extracted)(data)
    }

    fn on_error(&mut self, message: &str) {
        (self.on_error)(message)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum UploadState {
    Idle,
    Uploading { file_name: String },
    Completed(ExtractionResult),
    Failed(String),
}

/// Orquestador de cargas
///
/// `upload` toma `&mut self`: no puede haber dos cargas en curso sobre el mismo orquestador.
pub struct UploadOrchestrator<C: ExtractionClient> {
    client: C,
    validator: FileIntakeValidator,
    state: UploadState,
}

impl<C: ExtractionClient> UploadOrchestrator<C> {
    pub fn new(client: C, validator: FileIntakeValidator) -> Self {
        Self {
            client,
            validator,
            state: UploadState::Idle,
        }
    }

    pub fn state(&self) -> &UploadState {
        &self.state
    }

    /// Limpia el resultado o error anterior
    pub fn reset(&mut self) {
        self.state = UploadState::Idle;
    }

    pub async fn upload(
        &mut self,
        file: &CandidateFile,
        listener: &mut dyn ExtractionListener,
    ) -> Result<ExtractionResult, UploadError> {
        if let Err(rejection) = self.validator.validate(file) {
            return Err(self.fail(rejection.into(), listener));
        }

        info!(
            "📤 Enviando {} ({}) al backend de extracción...",
            file.file_name,
            format_size(file.size_bytes)
        );
        self.state = UploadState::Uploading {
            file_name: file.file_name.clone(),
        };

        let response = match self.client.submit(file).await {
            Ok(response) => response,
            Err(e) => return Err(self.fail(e, listener)),
        };

        if !response.success {
            let message = response.server_message().unwrap_or(GENERIC_SERVER_ERROR);
            return Err(self.fail(UploadError::server(None, message), listener));
        }

        let result = ExtractionResult {
            data: response.data.unwrap_or_default(),
            metadata: response.metadata,
        };
        info!("✓ Constancia procesada: {}", file.file_name);

        listener.on_data_extracted(&result.data);
        self.state = UploadState::Completed(result.clone());
        Ok(result)
    }

    fn fail(&mut self, err: UploadError, listener: &mut dyn ExtractionListener) -> UploadError {
        let message = err.to_string();
        error!("❌ Error al procesar la constancia: {}", message);
        listener.on_error(&message);
        self.state = UploadState::Failed(message);
        err
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ExtractionResponse, PDF_MIME_TYPE};
    use async_trait::async_trait;
    use serde_json::json;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Respuesta fija, sin red
    struct StubClient {
        reply: Result<serde_json::Value, UploadError>,
        calls: AtomicUsize,
    }

    impl StubClient {
        fn replying(reply: Result<serde_json::Value, UploadError>) -> Self {
            Self {
                reply,
                calls: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait]
    impl ExtractionClient for StubClient {
        async fn submit(&self, _file: &CandidateFile) -> Result<ExtractionResponse, UploadError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.reply
                .clone()
                .map(|body| serde_json::from_value(body).unwrap())
        }
    }

    #[derive(Default)]
    struct Recorder {
        extracted: Vec<ExtractedData>,
        errors: Vec<String>,
    }

    impl ExtractionListener for Recorder {
        fn on_data_extracted(&mut self, data: &ExtractedData) {
            self.extracted.push(data.clone());
        }

        fn on_error(&mut self, message: &str) {
            self.errors.push(message.to_string());
        }
    }

    fn pdf() -> CandidateFile {
        CandidateFile::new("constancia.pdf", PDF_MIME_TYPE, vec![b'%'; 2048])
    }

    #[tokio::test]
    async fn test_success_fires_data_callback_once() {
        let client = StubClient::replying(Ok(json!({"success": true, "data": {"rfc": "X"}})));
        let mut orchestrator = UploadOrchestrator::new(client, FileIntakeValidator::default());
        let mut recorder = Recorder::default();

        let result = orchestrator.upload(&pdf(), &mut recorder).await.unwrap();

        assert_eq!(recorder.extracted.len(), 1);
        assert_eq!(recorder.extracted[0].rfc.as_deref(), Some("X"));
        assert_eq!(recorder.extracted[0], result.data);
        assert!(recorder.errors.is_empty());
        assert!(matches!(orchestrator.state(), UploadState::Completed(_)));
    }

    #[tokio::test]
    async fn test_success_false_fires_error_callback_with_server_message() {
        let client = StubClient::replying(Ok(json!({"success": false, "error": "bad pdf"})));
        let mut orchestrator = UploadOrchestrator::new(client, FileIntakeValidator::default());
        let mut recorder = Recorder::default();

        let err = orchestrator.upload(&pdf(), &mut recorder).await.unwrap_err();

        assert_eq!(recorder.errors, vec!["bad pdf".to_string()]);
        assert!(recorder.extracted.is_empty());
        assert_eq!(err, UploadError::server(None, "bad pdf"));
        assert_eq!(orchestrator.state(), &UploadState::Failed("bad pdf".to_string()));
    }

    #[tokio::test]
    async fn test_transport_failure_surfaces_connectivity_message() {
        let client = StubClient::replying(Err(UploadError::NoResponse {
            detail: "connection refused".to_string(),
        }));
        let mut orchestrator = UploadOrchestrator::new(client, FileIntakeValidator::default());
        let mut recorder = Recorder::default();

        orchestrator.upload(&pdf(), &mut recorder).await.unwrap_err();

        assert_eq!(recorder.errors.len(), 1);
        assert!(recorder.errors[0].starts_with("No se pudo conectar con el servidor"));
    }

    #[tokio::test]
    async fn test_rejected_file_never_reaches_backend() {
        let client = StubClient::replying(Ok(json!({"success": true})));
        let mut orchestrator = UploadOrchestrator::new(client, FileIntakeValidator::default());
        let mut recorder = Recorder::default();
        let png = CandidateFile::new("foto.png", "image/png", vec![0; 2048]);

        let err = orchestrator.upload(&png, &mut recorder).await.unwrap_err();

        assert!(matches!(err, UploadError::Rejected(_)));
        assert_eq!(recorder.errors.len(), 1);
        assert_eq!(orchestrator.client.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_reset_clears_previous_outcome() {
        let client = StubClient::replying(Ok(json!({"success": true, "data": {}})));
        let mut orchestrator = UploadOrchestrator::new(client, FileIntakeValidator::default());
        let mut extracted = 0;
        let mut callbacks = Callbacks {
            on_data_extracted: |_: &ExtractedData| extracted += 1,
            on_error: |_: &str| {},
        };

        orchestrator.upload(&pdf(), &mut callbacks).await.unwrap();
        assert!(matches!(orchestrator.state(), UploadState::Completed(_)));

        orchestrator.reset();
        assert_eq!(orchestrator.state(), &UploadState::Idle);

        orchestrator.upload(&pdf(), &mut callbacks).await.unwrap();
        drop(callbacks);
        assert_eq!(extracted, 2);
    }
}
