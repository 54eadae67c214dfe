use crate::{config::*, error::*, models::*, repository::*, token::*};
use logger_redacted::{redactor_for, LoggerConfig, PiiRedactor};
use secrecy::{ExposeSecret, SecretString};
use std::sync::Arc;
use tracing::{debug, info, warn};

pub const REGISTRATION_MESSAGE: &str = "User created successfully";

/// Registration, login and token verification.
///
/// Holds no mutable state; a single instance can serve any number of
/// concurrent callers.
pub struct IdentityService {
    identity_store: Arc<dyn IdentityStore>,
    profile_store: Arc<dyn ProfileStore>,
    compensation: Option<Arc<dyn IdentityCompensation>>,
    codec: TokenCodec,
    redactor: PiiRedactor,
}

impl IdentityService {
    pub fn new(
        identity_store: Arc<dyn IdentityStore>,
        profile_store: Arc<dyn ProfileStore>,
        config: &IdentityConfig,
    ) -> Result<Self> {
        Ok(Self {
            identity_store,
            profile_store,
            compensation: None,
            codec: TokenCodec::new(config)?,
            redactor: redactor_for(&LoggerConfig::from_env()),
        })
    }

    /// Undo identities left behind when the profile write fails.
    ///
    /// Without this the identity stays orphaned in the store.
    pub fn with_compensation(mut self, compensation: Arc<dyn IdentityCompensation>) -> Self {
        self.compensation = Some(compensation);
        self
    }

    /// Replaces the redactor picked from `LOG_REDACTION` at construction.
    pub fn with_redactor(mut self, redactor: PiiRedactor) -> Self {
        self.redactor = redactor;
        self
    }

    pub async fn register(&self, request: RegisterRequest) -> Result<RegistrationConfirmation> {
        if request.email.is_empty() {
            return Err(IdentityError::missing_field("email"));
        }
        if request.password.expose_secret().is_empty() {
            return Err(IdentityError::missing_field("password"));
        }
        let role: Role = request.role.parse()?;

        let identity = self
            .identity_store
            .create_identity(&request.email, &request.password)
            .await
            .map_err(|e| IdentityError::IdentityCreationFailed(e.message))?;

        let profile = NewProfile {
            identity_id: identity.id,
            full_name: request.full_name,
            role,
            phone: request.phone,
            email: request.email,
        };

        if let Err(e) = self.profile_store.insert_profile(&profile).await {
            self.handle_orphaned_identity(&identity, &e).await;
            return Err(IdentityError::ProfileCreationFailed(e.message));
        }

        info!(
            identity_id = %identity.id,
            role = %role,
            email = %self.redactor.redact(&identity.email),
            "User registered"
        );

        Ok(RegistrationConfirmation {
            identity_id: identity.id,
            message: REGISTRATION_MESSAGE.to_string(),
        })
    }

    pub async fn login(&self, email: &str, password: &SecretString) -> Result<LoginResponse> {
        let identity = self
            .identity_store
            .verify_credentials(email, password)
            .await
            .map_err(|e| {
                debug!(email = %self.redactor.redact(email), "Credential check rejected");
                IdentityError::AuthenticationFailed(e.message)
            })?;

        let profile = self.fetch_single_profile(&identity).await?;

        let claims = SessionClaims {
            identity_id: identity.id,
            email: identity.email,
            role: profile.role,
            full_name: profile.full_name,
            avatar_url: profile.avatar_url,
        };
        let issued = self.codec.issue(&claims)?;

        info!(identity_id = %claims.identity_id, role = %claims.role, "Session token issued");

        Ok(LoginResponse {
            access_token: issued.token,
            expires_in: TOKEN_VALIDITY_SECS.unsigned_abs(),
            expires_at: issued.expires_at,
        })
    }

    pub fn verify_token(&self, token: &str) -> Result<TokenClaims> {
        self.codec.verify(token)
    }

    async fn fetch_single_profile(&self, identity: &CredentialIdentity) -> Result<Profile> {
        let mut rows = self
            .profile_store
            .get_profile_by_id(identity.id)
            .await
            .map_err(|e| IdentityError::ProfileNotFound(e.message))?;

        if rows.len() > 1 {
            return Err(IdentityError::ProfileNotFound(format!(
                "{} profiles for {}",
                rows.len(),
                identity.id
            )));
        }
        rows.pop().ok_or_else(|| {
            IdentityError::ProfileNotFound(format!("no profile for {}", identity.id))
        })
    }

    async fn handle_orphaned_identity(&self, identity: &CredentialIdentity, cause: &StoreError) {
        let Some(compensation) = &self.compensation else {
            warn!(
                identity_id = %identity.id,
                cause = %cause,
                "Profile creation failed; identity left orphaned"
            );
            return;
        };

        match compensation.compensate(identity.id, &cause.message).await {
            Ok(()) => info!(identity_id = %identity.id, "Orphaned identity compensated"),
            Err(e) => warn!(
                identity_id = %identity.id,
                cause = %cause,
                compensation_error = %e,
                "Compensation failed; identity left orphaned"
            ),
        }
    }
}
