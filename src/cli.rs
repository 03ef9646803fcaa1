use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Constancias fiscales y archivo de CFDI para el SAT
#[derive(Debug, Parser)]
#[command(name = "sat-intake", version)]
pub struct Cli {
    /// Logs detallados
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Extrae los datos de una Constancia de Situación Fiscal (PDF)
    Extract { pdf: PathBuf },

    /// Valida la FIEL y abre la sesión SAT
    Connect {
        #[arg(long)]
        rfc: String,
        /// Certificado (.cer)
        #[arg(long)]
        cer: PathBuf,
        /// Llave privada (.key)
        #[arg(long)]
        key: PathBuf,
        /// Contraseña de la FIEL; mejor por variable de entorno
        #[arg(long, env = "SAT_INTAKE_FIEL_PASSWORD", hide_env_values = true)]
        password: String,
    },

    /// Muestra el estado de la sesión SAT
    Status,

    /// Archiva uno o más XML bajo el RFC conectado
    Archive {
        #[arg(required = true)]
        files: Vec<PathBuf>,
        /// Metadato adicional `clave=valor` (repetible)
        #[arg(long = "meta", value_parser = parse_key_value)]
        meta: Vec<(String, String)>,
    },

    /// Lista los archivos archivados más recientes
    History {
        #[arg(long, default_value_t = 10)]
        limit: usize,
    },
}

fn parse_key_value(raw: &str) -> Result<(String, String), String> {
    match raw.split_once('=') {
        Some((key, value)) if !key.trim().is_empty() => {
            Ok((key.trim().to_string(), value.to_string()))
        }
        _ => Err(format!("se esperaba clave=valor, se recibió '{}'", raw)),
    }
}
