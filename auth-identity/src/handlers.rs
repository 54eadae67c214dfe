// Caller-facing handlers for the identity service
// Transport layers wrap these; each returns a JSON body or a single error envelope

use crate::{error::*, models::*, service::IdentityService};
use error_common::{log_error, CodedError, ErrorResponse};
use serde_json::json;
use std::sync::Arc;

pub type HandlerResult = std::result::Result<serde_json::Value, ErrorResponse>;

pub struct IdentityHandlers {
    service: Arc<IdentityService>,
}

impl IdentityHandlers {
    pub fn new(service: Arc<IdentityService>) -> Self {
        Self { service }
    }

    pub async fn register(&self, request: RegisterRequest) -> HandlerResult {
        let confirmation = self
            .service
            .register(request)
            .await
            .map_err(|e| reject("register", &e))?;

        Ok(json!({ "message": confirmation.message }))
    }

    pub async fn login(&self, request: LoginRequest) -> HandlerResult {
        let response = self
            .service
            .login(&request.email, &request.password)
            .await
            .map_err(|e| reject("login", &e))?;

        Ok(json!({
            "message": "Login successful",
            "accessToken": response.access_token,
            "expiresIn": response.expires_in,
        }))
    }

    pub fn verify_token(&self, token: &str) -> HandlerResult {
        let claims = self
            .service
            .verify_token(token)
            .map_err(|e| reject("verify_token", &e))?;

        serde_json::to_value(claims).map_err(|e| {
            reject("verify_token", &IdentityError::TokenIssueFailed(e.to_string()))
        })
    }

    /// Verifies the token carried by an `Authorization: Bearer <token>` header value.
    pub fn verify_bearer(&self, authorization: Option<&str>) -> HandlerResult {
        match authorization.and_then(bearer_token) {
            Some(token) => self.verify_token(token),
            None => Err(reject("verify_bearer", &IdentityError::InvalidOrExpiredToken)),
        }
    }
}

/// Extracts the token from a `Bearer` authorization value.
pub fn bearer_token(authorization: &str) -> Option<&str> {
    let (scheme, token) = authorization.trim().split_once(' ')?;
    let token = token.trim();
    (scheme.eq_ignore_ascii_case("bearer") && !token.is_empty()).then_some(token)
}

fn reject(context: &str, error: &IdentityError) -> ErrorResponse {
    log_error(context, error);
    error.to_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bearer_token_parsing() {
        assert_eq!(bearer_token("Bearer abc.def.ghi"), Some("abc.def.ghi"));
        assert_eq!(bearer_token("bearer   abc"), Some("abc"));
        assert_eq!(bearer_token("Basic dXNlcjpwdw=="), None);
        assert_eq!(bearer_token("Bearer "), None);
        assert_eq!(bearer_token("abc"), None);
    }
}
