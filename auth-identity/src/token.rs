//! Session token codec.
//!
//! Tokens are HS256 JWTs signed with the process-wide secret from
//! [`IdentityConfig`]. They are self-describing: the expiry travels inside the
//! token, so nothing is stored server-side and there is no revocation.

use crate::config::IdentityConfig;
use crate::error::{IdentityError, Result};
use crate::models::{SessionClaims, TokenClaims};
use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use secrecy::ExposeSecret;

/// Validity window of every issued token.
pub const TOKEN_VALIDITY_SECS: i64 = 3600;

/// Token minted by [`TokenCodec::issue`].
#[derive(Debug, Clone)]
pub struct IssuedToken {
    pub token: String,
    pub issued_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

pub struct TokenCodec {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    issuer: Option<String>,
}

impl TokenCodec {
    pub fn new(config: &IdentityConfig) -> Result<Self> {
        let secret = config.jwt_secret.expose_secret().as_bytes();
        if secret.is_empty() {
            return Err(IdentityError::Configuration(
                "JWT_SECRET must not be empty".to_string(),
            ));
        }

        Ok(Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            issuer: config.issuer.clone(),
        })
    }

    pub fn validity_window() -> Duration {
        Duration::seconds(TOKEN_VALIDITY_SECS)
    }

    pub fn issue(&self, claims: &SessionClaims) -> Result<IssuedToken> {
        self.issue_at(claims, Utc::now())
    }

    /// Signs `claims` as if issued at `now`.
    pub fn issue_at(&self, claims: &SessionClaims, now: DateTime<Utc>) -> Result<IssuedToken> {
        let expires_at = now + Self::validity_window();
        let payload = TokenClaims {
            session: claims.clone(),
            iat: now.timestamp(),
            exp: expires_at.timestamp(),
            iss: self.issuer.clone(),
        };

        let token = encode(&Header::new(Algorithm::HS256), &payload, &self.encoding_key)
            .map_err(|e| IdentityError::TokenIssueFailed(e.to_string()))?;

        Ok(IssuedToken {
            token,
            issued_at: now,
            expires_at,
        })
    }

    pub fn verify(&self, token: &str) -> Result<TokenClaims> {
        self.verify_at(token, Utc::now())
    }

    /// Checks signature, structure and expiry relative to `now`.
    ///
    /// Every failure is [`IdentityError::InvalidOrExpiredToken`].
    pub fn verify_at(&self, token: &str, now: DateTime<Utc>) -> Result<TokenClaims> {
        let mut validation = Validation::new(Algorithm::HS256);
        // Expiry is checked below against `now` with zero leeway
        validation.validate_exp = false;
        validation.leeway = 0;
        if let Some(issuer) = &self.issuer {
            validation.set_required_spec_claims(&["exp", "iss"]);
            validation.set_issuer(&[issuer]);
        } else {
            validation.set_required_spec_claims(&["exp"]);
        }

        let data = decode::<TokenClaims>(token, &self.decoding_key, &validation).map_err(|e| {
            tracing::debug!(reason = %e, "Token rejected");
            IdentityError::InvalidOrExpiredToken
        })?;

        if data.claims.exp <= now.timestamp() {
            tracing::debug!(exp = data.claims.exp, "Token rejected: expired");
            return Err(IdentityError::InvalidOrExpiredToken);
        }

        Ok(data.claims)
    }
}
