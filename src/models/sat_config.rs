use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Forma persistida en la clave `nbk_sat_config`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SatConfig {
    #[serde(default)]
    pub rfc: String,
    #[serde(default)]
    pub sat_connected: bool,
    #[serde(default)]
    pub sat_token: Option<String>,
    #[serde(default)]
    pub last_updated: Option<DateTime<Utc>>,
}
