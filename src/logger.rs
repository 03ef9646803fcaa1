//! Inicialización de logs (tracing)

use tracing_subscriber::EnvFilter;

/// Inicializa el subscriber con `RUST_LOG` o `info` por defecto
pub fn init() {
    init_with_verbosity(false);
}

/// Igual que [`init`], pero `verbose` baja el nivel por defecto a `debug`.
///
/// Llamarla más de una vez no falla (útil en tests).
pub fn init_with_verbosity(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init();
}
