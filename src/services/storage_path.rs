//! Ruta de archivo por RFC y fecha
//!
//! `xmls/{rfc}/{año}/{mes a 2 dígitos}/{epoch ms}_{nombre}`. No consulta el
//! almacenamiento: la marca en milisegundos hace improbable una colisión.

use chrono::{DateTime, Datelike, TimeZone};

pub const XML_ROOT: &str = "xmls";

/// Ruta determinista para el reloj dado
pub fn plan_storage_path<Tz: TimeZone>(rfc: &str, file_name: &str, now: &DateTime<Tz>) -> String {
    format!(
        "{}/{}/{}/{:02}/{}_{}",
        XML_ROOT,
        rfc,
        now.year(),
        now.month(),
        now.timestamp_millis(),
        file_name
    )
}
