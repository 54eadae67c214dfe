use crate::error::IdentityError;
use chrono::{DateTime, Utc};
use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Application role attached to a profile at registration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Punisher,
    User,
    Customer,
}

impl Role {
    pub const ALL: [Role; 3] = [Role::Punisher, Role::User, Role::Customer];

    pub fn as_str(self) -> &'static str {
        match self {
            Role::Punisher => "punisher",
            Role::User => "user",
            Role::Customer => "customer",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = IdentityError;

    /// Exact, case-sensitive match.
    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Role::ALL
            .into_iter()
            .find(|role| role.as_str() == value)
            .ok_or_else(|| {
                let allowed: Vec<&str> = Role::ALL.iter().map(|r| r.as_str()).collect();
                IdentityError::InvalidInput {
                    field: "role",
                    message: format!(
                        "Invalid role specified: \"{value}\". Allowed roles are: {}. Please check for typos.",
                        allowed.join(", ")
                    ),
                }
            })
    }
}

/// Record held by the identity store proving control of an email/password pair.
///
/// The password hash never leaves the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CredentialIdentity {
    pub id: Uuid,
    pub email: String,
    pub created_at: DateTime<Utc>,
}

/// Fields written to the profile store right after identity creation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewProfile {
    pub identity_id: Uuid,
    pub full_name: String,
    pub role: Role,
    pub phone: String,
    pub email: String,
}

/// Profile row, linked 1:1 to a [`CredentialIdentity`].
///
/// There is no update path: the role chosen at registration is final.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    #[serde(rename = "id")]
    pub identity_id: Uuid,
    #[serde(rename = "fullname")]
    pub full_name: String,
    pub role: Role,
    pub phone: String,
    pub email: String,
    pub avatar_url: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub email: String,
    pub password: SecretString,
    pub full_name: String,
    pub role: String,
    #[serde(default, alias = "mobile")]
    pub phone: String,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: SecretString,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegistrationConfirmation {
    pub identity_id: Uuid,
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    pub access_token: String,
    /// Validity window in seconds.
    pub expires_in: u64,
    pub expires_at: DateTime<Utc>,
}

/// Profile claims embedded in a session token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionClaims {
    #[serde(rename = "id")]
    pub identity_id: Uuid,
    pub email: String,
    pub role: Role,
    pub full_name: String,
    #[serde(rename = "profile_picture")]
    pub avatar_url: Option<String>,
}

/// Full token payload: session claims plus timing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenClaims {
    #[serde(flatten)]
    pub session: SessionClaims,
    /// Issued at (seconds since epoch)
    pub iat: i64,
    /// Expiration (seconds since epoch)
    pub exp: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iss: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_parses_exact_names() {
        assert_eq!("punisher".parse::<Role>().unwrap(), Role::Punisher);
        assert_eq!("user".parse::<Role>().unwrap(), Role::User);
        assert_eq!("customer".parse::<Role>().unwrap(), Role::Customer);
    }

    #[test]
    fn test_role_is_case_sensitive() {
        for raw in ["User", "ADMIN", "admin", "", " user", "customers"] {
            match raw.parse::<Role>() {
                Err(IdentityError::InvalidInput { field, message }) => {
                    assert_eq!(field, "role");
                    assert!(message.contains(&format!("\"{raw}\"")));
                    assert!(message.contains("punisher, user, customer"));
                }
                other => panic!("expected InvalidInput for {raw:?}, got {other:?}"),
            }
        }
    }

    #[test]
    fn test_session_claims_wire_names() {
        let claims = SessionClaims {
            identity_id: Uuid::nil(),
            email: "a@b.com".to_string(),
            role: Role::Customer,
            full_name: "Name".to_string(),
            avatar_url: None,
        };

        let json = serde_json::to_value(&claims).unwrap();
        assert_eq!(json["id"], Uuid::nil().to_string());
        assert_eq!(json["role"], "customer");
        assert!(json["profile_picture"].is_null());
    }

    #[test]
    fn test_register_request_accepts_mobile_alias() {
        let request: RegisterRequest = serde_json::from_value(serde_json::json!({
            "email": "a@b.com",
            "password": "pw",
            "full_name": "Name",
            "role": "user",
            "mobile": "555",
        }))
        .unwrap();

        assert_eq!(request.phone, "555");
    }
}
