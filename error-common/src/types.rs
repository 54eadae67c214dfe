use serde::{Deserialize, Serialize};

/// Caller-visible failure envelope.
///
/// Carries exactly one human-readable message and never any partial result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub code: String,
    pub message: String,
}

impl ErrorResponse {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            success: false,
            code: code.into(),
            message: message.into(),
        }
    }

    pub fn to_json(&self) -> serde_json::Value {
        serde_json::json!({
            "success": self.success,
            "code": self.code,
            "message": self.message,
        })
    }
}

/// An error that maps onto a stable code from [`crate::codes`].
pub trait CodedError: std::error::Error {
    fn code(&self) -> &'static str;

    fn to_response(&self) -> ErrorResponse {
        ErrorResponse::new(self.code(), self.to_string())
    }
}

/// Records a caller-visible failure.
pub fn log_error(context: &str, error: &dyn CodedError) {
    tracing::error!(
        context = context,
        error_code = error.code(),
        error = %error,
        "Rolegate error occurred"
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codes;

    #[derive(Debug)]
    struct Rejected(&'static str);

    impl std::fmt::Display for Rejected {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            f.write_str(self.0)
        }
    }

    impl std::error::Error for Rejected {}

    impl CodedError for Rejected {
        fn code(&self) -> &'static str {
            codes::profile::PROFILE_NOT_FOUND
        }
    }

    #[test]
    fn test_response_carries_code_and_message() {
        let response = Rejected("Failed to fetch profile data: gone").to_response();

        assert!(!response.success);
        assert_eq!(response.code, "PROFILE_4001");
        assert_eq!(response.message, "Failed to fetch profile data: gone");
    }

    #[test]
    fn test_response_json_shape() {
        let json = ErrorResponse::new("AUTH_2001", "Login failed: nope").to_json();

        assert_eq!(json["success"], false);
        assert_eq!(json["code"], "AUTH_2001");
        assert_eq!(json["message"], "Login failed: nope");
    }
}
