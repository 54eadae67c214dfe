use error_common::{codes, CodedError};
use thiserror::Error;

/// Failure reported by an external identity or profile store.
///
/// The message is whatever the store said; it is carried verbatim into
/// [`IdentityError`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct StoreError {
    pub message: String,
}

impl StoreError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

#[derive(Error, Debug)]
pub enum IdentityError {
    #[error("{message}")]
    InvalidInput { field: &'static str, message: String },

    #[error("Signup failed: {0}")]
    IdentityCreationFailed(String),

    #[error("Error inserting user profile: {0}")]
    ProfileCreationFailed(String),

    #[error("Login failed: {0}")]
    AuthenticationFailed(String),

    #[error("Failed to fetch profile data: {0}")]
    ProfileNotFound(String),

    /// Bad signature, malformed token and passed expiry all land here.
    #[error("Invalid or expired token")]
    InvalidOrExpiredToken,

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Token issue failed: {0}")]
    TokenIssueFailed(String),
}

impl IdentityError {
    pub fn missing_field(field: &'static str) -> Self {
        Self::InvalidInput {
            field,
            message: format!("{field} is required"),
        }
    }
}

impl CodedError for IdentityError {
    fn code(&self) -> &'static str {
        match self {
            Self::InvalidInput { .. } => codes::validation::INVALID_INPUT,
            Self::IdentityCreationFailed(_) => codes::registration::IDENTITY_CREATION_FAILED,
            Self::ProfileCreationFailed(_) => codes::registration::PROFILE_CREATION_FAILED,
            Self::AuthenticationFailed(_) => codes::authentication::INVALID_CREDENTIALS,
            Self::ProfileNotFound(_) => codes::profile::PROFILE_NOT_FOUND,
            Self::InvalidOrExpiredToken => codes::authentication::TOKEN_INVALID,
            Self::Configuration(_) => codes::system::CONFIGURATION,
            Self::TokenIssueFailed(_) => codes::system::INTERNAL,
        }
    }
}

pub type Result<T> = std::result::Result<T, IdentityError>;
