/// Utilidades de log
///
/// Funciones auxiliares para dar formato a los mensajes de consola
use crate::config::Config;
use crate::models::ExtractedData;
use tracing::info;

/// Registra la información de arranque
pub fn log_startup(config: &Config) {
    info!("{}", "=".repeat(60));
    info!("🚀 sat-intake - {}", chrono::Local::now().format("%Y-%m-%d %H:%M:%S"));
    info!("🌐 Backend de extracción: {}", config.api_url);
    info!("📁 Datos locales: {}", config.data_dir.display());
    info!("{}", "=".repeat(60));
}

/// Resumen de los datos extraídos de la constancia
pub fn log_extraction_summary(data: &ExtractedData) {
    info!("\n{}", "─".repeat(60));
    info!("📄 Datos extraídos de la constancia");
    info!("RFC: {}", data.rfc.as_deref().unwrap_or("-"));
    info!("Razón social: {}", data.legal_name.as_deref().unwrap_or("-"));
    info!("Régimen fiscal: {}", data.tax_regime.as_deref().unwrap_or("-"));
    info!(
        "Domicilio fiscal: {}",
        truncate_text(data.fiscal_address.as_deref().unwrap_or("-"), 80)
    );
    info!("Fecha de emisión: {}", data.issue_date.as_deref().unwrap_or("-"));
    info!("{}", "─".repeat(60));
}

/// Tamaño legible (B / KB / MB)
pub fn format_size(bytes: u64) -> String {
    const KB: f64 = 1024.0;
    const MB: f64 = KB * 1024.0;
    let b = bytes as f64;
    if b >= MB {
        format!("{:.2} MB", b / MB)
    } else if b >= KB {
        format!("{:.2} KB", b / KB)
    } else {
        format!("{} B", bytes)
    }
}

/// Trunca texto largo para mostrarlo en el log
///
/// # Parámetros
/// - `text`: texto original
/// - `max_len`: longitud máxima en caracteres
pub fn truncate_text(text: &str, max_len: usize) -> String {
    if text.chars().count() > max_len {
        text.chars().take(max_len).collect::<String>() + "..."
    } else {
        text.to_string()
    }
}
