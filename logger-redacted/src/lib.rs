//! Logging setup with PII redaction for Rolegate
//!
//! Rolegate handles email addresses and phone numbers on every registration
//! and login. Those values must never reach a log sink verbatim, so callers
//! run them through a [`PiiRedactor`] before attaching them as fields.
//!
//! # Detected Data Types
//!
//! - **Email Addresses**: user@example.com → EMAIL[hash] or u***@e***
//! - **Phone Numbers**: (555) 123-4567 → PHONE[hash] or (***) ***-****
//! - **Custom Patterns**: configurable regex replacements
//!
//! # Example
//!
//! ```rust
//! use logger_redacted::{PiiRedactor, RedactionConfig};
//!
//! let redactor = PiiRedactor::new(RedactionConfig::default());
//! let email = redactor.redact("john.doe@example.com");
//! tracing::info!(email = %email, "User logged in");
//! ```

pub mod config;
pub mod redactor;

pub use config::*;
pub use redactor::*;

use thiserror::Error;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Errors raised while installing the subscriber.
#[derive(Error, Debug)]
pub enum LoggingError {
    #[error("Failed to install tracing subscriber: {0}")]
    Init(String),
}

/// Builds the redactor matching a logger configuration.
pub fn redactor_for(config: &LoggerConfig) -> PiiRedactor {
    if config.redaction_enabled {
        PiiRedactor::new(RedactionConfig::default())
    } else {
        PiiRedactor::new(RedactionConfig::disabled())
    }
}

/// Installs the global tracing subscriber.
///
/// `RUST_LOG` takes precedence over the configured level.
pub fn init_logging(config: &LoggerConfig) -> Result<(), LoggingError> {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.log_level));

    let registry = tracing_subscriber::registry().with(env_filter);

    if config.json_output {
        registry
            .with(fmt::layer().json().with_target(true))
            .try_init()
            .map_err(|e| LoggingError::Init(e.to_string()))
    } else {
        registry
            .with(fmt::layer().with_target(true).with_level(true))
            .try_init()
            .map_err(|e| LoggingError::Init(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_redactor_follows_config() {
        let enabled = redactor_for(&LoggerConfig::default());
        let disabled = redactor_for(&LoggerConfig {
            redaction_enabled: false,
            ..LoggerConfig::default()
        });

        assert_ne!(enabled.redact("a@b.com"), "a@b.com");
        assert_eq!(disabled.redact("a@b.com"), "a@b.com");
    }
}
