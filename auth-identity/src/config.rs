use crate::error::{IdentityError, Result};
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use std::path::Path;

/// Process-wide authentication settings, loaded once at startup.
#[derive(Debug, Clone, Deserialize)]
pub struct IdentityConfig {
    /// Symmetric key used to sign and verify session tokens.
    pub jwt_secret: SecretString,
    /// Optional `iss` claim stamped on issued tokens and required on verify.
    #[serde(default)]
    pub issuer: Option<String>,
}

impl IdentityConfig {
    pub fn new(jwt_secret: impl Into<String>) -> Result<Self> {
        let config = Self {
            jwt_secret: SecretString::new(jwt_secret.into()),
            issuer: None,
        };
        config.validate()?;
        Ok(config)
    }

    pub fn with_issuer(mut self, issuer: impl Into<String>) -> Self {
        self.issuer = Some(issuer.into());
        self
    }

    /// Loads `JWT_SECRET` and optional `JWT_ISSUER`, reading a `.env` file first if present.
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        let jwt_secret = std::env::var("JWT_SECRET").map_err(|_| {
            IdentityError::Configuration("JWT_SECRET is required".to_string())
        })?;

        let config = Self {
            jwt_secret: SecretString::new(jwt_secret),
            issuer: std::env::var("JWT_ISSUER").ok().filter(|s| !s.is_empty()),
        };
        config.validate()?;
        Ok(config)
    }

    /// Loads configuration from a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|e| {
            IdentityError::Configuration(format!("cannot read {}: {e}", path.display()))
        })?;
        let config: Self = toml::from_str(&contents).map_err(|e| {
            IdentityError::Configuration(format!("cannot parse {}: {e}", path.display()))
        })?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if self.jwt_secret.expose_secret().is_empty() {
            return Err(IdentityError::Configuration(
                "JWT_SECRET must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_empty_secret_rejected() {
        assert!(matches!(
            IdentityConfig::new(""),
            Err(IdentityError::Configuration(_))
        ));
    }

    #[test]
    fn test_debug_hides_secret() {
        let config = IdentityConfig::new("super-secret-value").unwrap();

        assert!(!format!("{config:?}").contains("super-secret-value"));
    }

    #[test]
    fn test_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "jwt_secret = \"file-secret\"\nissuer = \"rolegate\"").unwrap();

        let config = IdentityConfig::from_file(file.path()).unwrap();

        assert_eq!(config.jwt_secret.expose_secret(), "file-secret");
        assert_eq!(config.issuer.as_deref(), Some("rolegate"));
    }

    #[test]
    fn test_from_file_rejects_empty_secret() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "jwt_secret = \"\"").unwrap();

        assert!(matches!(
            IdentityConfig::from_file(file.path()),
            Err(IdentityError::Configuration(_))
        ));
    }

    #[test]
    fn test_from_file_missing() {
        assert!(matches!(
            IdentityConfig::from_file("/nonexistent/rolegate.toml"),
            Err(IdentityError::Configuration(_))
        ));
    }
}
