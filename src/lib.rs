//! # sat-intake
//!
//! Carga de Constancias de Situación Fiscal y archivo de CFDI por RFC.
//!
//! ## Arquitectura
//!
//! El crate se organiza en cuatro capas, cada una depende solo de las de abajo:
//!
//! ### ① Infraestructura (`infrastructure/`)
//! - `KeyValueStore` - almacén local por clave (`nbk_sat_config`, `nbk_download_history`)
//! - `ObjectStorage` - bucket donde se archivan los XML
//!
//! ### ② Clientes (`clients/`)
//! - `HttpExtractionClient` - `POST /api/companies/extract-constancia`
//! - `SatValidator` - validación de la FIEL (simulada)
//! - `AuthProvider` - inicio de sesión con token
//!
//! ### ③ Servicios (`services/`)
//! - `FileIntakeValidator` - tipo y tamaño del PDF
//! - `SatSession` - credenciales y estado de la sesión SAT
//! - `HistoryLedger` - historial acotado
//! - `plan_storage_path` - `xmls/{rfc}/{año}/{mes}/{ms}_{nombre}`
//!
//! ### ④ Flujos (`workflow/`)
//! - `UploadOrchestrator` - validar → enviar → avisar al listener
//! - `XmlArchiver` - sesión → ruta → escritura → historial

pub mod app;
pub mod cli;
pub mod clients;
pub mod config;
pub mod error;
pub mod infrastructure;
pub mod logger;
pub mod models;
pub mod services;
pub mod utils;
pub mod workflow;

// Reexportación de los tipos más usados
pub use app::App;
pub use config::Config;
pub use error::{AppError, AppResult};
pub use services::{HistoryLedger, SatSession, SessionState};
pub use workflow::{Callbacks, ExtractionListener, UploadOrchestrator, XmlArchiver};
