use super::FileRef;
use std::fmt;

/// Credenciales de la FIEL capturadas por el usuario
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Credentials {
    pub rfc: String,
    pub key_file: Option<FileRef>,
    pub cer_file: Option<FileRef>,
    pub password: String,
}

impl Credentials {
    /// Nombres de los campos vacíos, en el orden del formulario
    pub fn missing_fields(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.rfc.trim().is_empty() {
            missing.push("RFC");
        }
        if self.cer_file.is_none() {
            missing.push("certificado (.cer)");
        }
        if self.key_file.is_none() {
            missing.push("llave privada (.key)");
        }
        if self.password.is_empty() {
            missing.push("contraseña");
        }
        missing
    }
}

// La contraseña nunca aparece en logs
impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("rfc", &self.rfc)
            .field("key_file", &self.key_file)
            .field("cer_file", &self.cer_file)
            .field("password", &if self.password.is_empty() { "" } else { "***" })
            .finish()
    }
}
