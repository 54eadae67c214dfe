// Logger configuration
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggerConfig {
    pub redaction_enabled: bool,
    pub json_output: bool,
    pub log_level: String,
}

impl LoggerConfig {
    /// Reads `LOG_LEVEL`, `LOG_FORMAT` (`json` or `pretty`) and `LOG_REDACTION`.
    pub fn from_env() -> Self {
        let defaults = Self::default();

        Self {
            redaction_enabled: std::env::var("LOG_REDACTION")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.redaction_enabled),
            json_output: std::env::var("LOG_FORMAT")
                .map(|s| s.eq_ignore_ascii_case("json"))
                .unwrap_or(defaults.json_output),
            log_level: std::env::var("LOG_LEVEL").unwrap_or(defaults.log_level),
        }
    }
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            redaction_enabled: true,
            json_output: false,
            log_level: "info".to_string(),
        }
    }
}
