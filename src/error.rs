use thiserror::Error;

/// Error de la aplicación: cada variante se muestra como un solo mensaje legible
#[derive(Debug, Error)]
pub enum AppError {
    /// Validación de archivo (tipo / tamaño)
    #[error("{0}")]
    Intake(#[from] IntakeError),
    /// Credenciales FIEL / sesión SAT
    #[error("{0}")]
    Credential(#[from] CredentialError),
    /// Carga al servicio de extracción
    #[error("{0}")]
    Upload(#[from] UploadError),
    /// Almacenamiento de objetos
    #[error("Error de almacenamiento: {0}")]
    Storage(#[from] StorageError),
    /// Persistencia local
    #[error("Error de persistencia local: {0}")]
    Persistence(#[from] PersistenceError),
    /// Proveedor de autenticación
    #[error("Error de autenticación: {0}")]
    Auth(#[from] AuthError),
    /// Configuración
    #[error("Error de configuración: {0}")]
    Config(#[from] ConfigError),
}

/// Errores de validación de archivos entrantes
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IntakeError {
    /// El tipo MIME declarado no es PDF
    #[error("Solo se permiten archivos PDF (recibido: {declared})")]
    InvalidType { declared: String },
    /// Excede el tamaño máximo
    #[error("El archivo es demasiado grande (máximo {max_mb}MB)")]
    TooLarge { size: u64, max_mb: u64 },
    /// Menor al mínimo; se considera corrupto
    #[error("El archivo es demasiado pequeño o está corrupto")]
    TooSmall { size: u64 },
}

/// Errores de credenciales FIEL y de la sesión SAT
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CredentialError {
    #[error("Credenciales incompletas: falta {}", .missing.join(", "))]
    Incomplete { missing: Vec<&'static str> },
    #[error("RFC con formato inválido: {rfc}")]
    InvalidRfc { rfc: String },
    #[error("Las credenciales no pueden modificarse con una sesión SAT activa")]
    Locked,
    #[error("El archivo {file_name} debe tener extensión .{expected}")]
    InvalidFileExtension {
        file_name: String,
        expected: &'static str,
    },
    #[error("No hay una sesión SAT conectada")]
    NotConnected,
}

/// Clasificación de fallas al enviar al servicio de extracción
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UploadError {
    /// Rechazado antes de enviarse
    #[error("{0}")]
    Rejected(#[from] IntakeError),
    /// El servidor respondió con error (o `success: false`)
    #[error("{message}")]
    Server {
        status: Option<u16>,
        message: String,
    },
    /// La petición salió pero no hubo respuesta
    #[error("No se pudo conectar con el servidor. Verifica que el backend esté corriendo. ({detail})")]
    NoResponse { detail: String },
    /// La petición no pudo construirse o enviarse
    #[error("{0}")]
    Request(String),
}

/// Almacenamiento de objetos
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("ruta de objeto inválida: {0}")]
    InvalidKey(String),
    #[error("falló la escritura de {path}: {source}")]
    WriteFailed {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("el archivo {0} no es un XML válido para archivar")]
    NotXml(String),
    #[error("serialización de metadatos: {0}")]
    Metadata(#[from] serde_json::Error),
}

/// Errores del almacén clave-valor local
#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("no se pudo leer la clave {key}: {source}")]
    ReadFailed {
        key: String,
        #[source]
        source: std::io::Error,
    },
    #[error("no se pudo escribir la clave {key}: {source}")]
    WriteFailed {
        key: String,
        #[source]
        source: std::io::Error,
    },
    #[error("JSON inválido en la clave {key}: {source}")]
    Json {
        key: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Errores del proveedor de autenticación
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    #[error("token vacío")]
    EmptyToken,
}

/// Configuración
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("no se pudo leer {path}: {source}")]
    ReadFailed {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("TOML inválido en {path}: {source}")]
    TomlParseFailed {
        path: String,
        #[source]
        source: toml::de::Error,
    },
    #[error("no se pudo construir el cliente HTTP: {0}")]
    HttpClient(String),
}

// ========== Constructores de conveniencia ==========

impl PersistenceError {
    pub fn json(key: impl Into<String>, source: serde_json::Error) -> Self {
        PersistenceError::Json {
            key: key.into(),
            source,
        }
    }
}

impl UploadError {
    pub fn server(status: Option<u16>, message: impl Into<String>) -> Self {
        UploadError::Server {
            status,
            message: message.into(),
        }
    }
}

// ========== Alias de Result ==========

pub type AppResult<T> = Result<T, AppError>;
