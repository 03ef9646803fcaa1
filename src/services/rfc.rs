//! Formato del RFC

use regex::Regex;
use std::sync::LazyLock;

/// 3 letras (moral) o 4 (física), fecha AAMMDD y homoclave de 3 caracteres
static RFC_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^[A-Z&]{3,4}\d{6}[A-Z0-9]{3}$").expect("patrón de RFC válido")
});

/// Verifica el formato (no consulta al SAT). No distingue mayúsculas.
pub fn is_valid_rfc(rfc: &str) -> bool {
    RFC_PATTERN.is_match(rfc)
}

/// Quita espacios y pasa a mayúsculas
pub fn normalize_rfc(rfc: &str) -> String {
    rfc.trim().to_uppercase()
}
