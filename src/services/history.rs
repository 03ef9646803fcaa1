//! Historial de archivos - capa de servicios
//!
//! Lista acotada, el más reciente primero. Se persiste completa en cada alta.

use crate::error::PersistenceError;
use crate::infrastructure::{load_json, save_json, KeyValueStore};
use crate::models::UploadRecord;
use std::sync::Arc;
use tracing::{debug, warn};

pub const HISTORY_KEY: &str = "nbk_download_history";
pub const DEFAULT_HISTORY_LIMIT: usize = 50;

pub struct HistoryLedger {
    entries: Vec<UploadRecord>,
    limit: usize,
    store: Arc<dyn KeyValueStore>,
}

impl HistoryLedger {
    /// Lee el historial persistido; si está dañado se empieza vacío
    pub fn load(store: Arc<dyn KeyValueStore>, limit: usize) -> Self {
        let mut entries = match load_json::<Vec<UploadRecord>>(store.as_ref(), HISTORY_KEY) {
            Ok(Some(entries)) => entries,
            Ok(None) => Vec::new(),
            Err(e) => {
                warn!("⚠️ Historial ilegible, se inicia vacío: {}", e);
                Vec::new()
            }
        };
        entries.truncate(limit);

        debug!("Historial cargado: {} registros", entries.len());
        Self {
            entries,
            limit,
            store,
        }
    }

    /// Agrega al inicio, recorta a `limit` y persiste la lista completa.
    ///
    /// Si la escritura falla, la lista en memoria ya quedó actualizada.
    pub fn append(&mut self, record: UploadRecord) -> Result<(), PersistenceError> {
        self.entries.insert(0, record);
        self.entries.truncate(self.limit);
        save_json(self.store.as_ref(), HISTORY_KEY, &self.entries)
    }

    /// Los `n` más recientes
    pub fn recent(&self, n: usize) -> &[UploadRecord] {
        &self.entries[..n.min(self.entries.len())]
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
