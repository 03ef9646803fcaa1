use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Datos extraídos de la Constancia de Situación Fiscal.
///
/// Todos los campos son opcionales; los que no conocemos se conservan en `extra`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractedData {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rfc: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub legal_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tax_regime: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fiscal_address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub issue_date: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Cuerpo JSON que devuelve `POST /api/companies/extract-constancia`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ExtractionResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub data: Option<ExtractedData>,
    #[serde(default)]
    pub metadata: Option<Value>,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

impl ExtractionResponse {
    /// Mensaje del servidor: `error`, luego `message`
    pub fn server_message(&self) -> Option<&str> {
        self.error.as_deref().or(self.message.as_deref())
    }
}

/// Resultado exitoso de una extracción
#[derive(Debug, Clone, PartialEq)]
pub struct ExtractionResult {
    pub data: ExtractedData,
    pub metadata: Option<Value>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_known_and_unknown_fields() {
        let body = json!({
            "success": true,
            "data": {
                "rfc": "AAA010101AAA",
                "legalName": "ACME SA DE CV",
                "codigoPostal": "06600"
            },
            "metadata": { "pages": 2 }
        });

        let response: ExtractionResponse = serde_json::from_value(body).unwrap();
        let data = response.data.unwrap();
        assert!(response.success);
        assert_eq!(data.rfc.as_deref(), Some("AAA010101AAA"));
        assert_eq!(data.legal_name.as_deref(), Some("ACME SA DE CV"));
        assert_eq!(data.extra.get("codigoPostal"), Some(&json!("06600")));
        assert_eq!(response.metadata, Some(json!({ "pages": 2 })));
    }

    #[test]
    fn test_server_message_prefers_error() {
        let response: ExtractionResponse =
            serde_json::from_value(json!({"success": false, "error": "bad pdf", "message": "otro"}))
                .unwrap();
        assert_eq!(response.server_message(), Some("bad pdf"));

        let response: ExtractionResponse =
            serde_json::from_value(json!({"success": false, "message": "sin texto"})).unwrap();
        assert_eq!(response.server_message(), Some("sin texto"));
    }
}
