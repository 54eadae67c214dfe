//! Common error handling utilities for Rolegate
//!
//! This crate provides the pieces every Rolegate crate shares when a failure
//! has to leave the process boundary:
//!
//! - **Error Codes**: stable, machine-readable codes per failure kind
//! - **Response Envelope**: a single serializable shape for caller-visible failures
//! - **Logging**: one place that records failures through `tracing`
//!
//! # Example
//!
//! ```rust
//! use error_common::{codes, CodedError, ErrorResponse};
//!
//! #[derive(Debug)]
//! struct Rejected;
//!
//! impl std::fmt::Display for Rejected {
//!     fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
//!         f.write_str("Invalid or expired token")
//!     }
//! }
//!
//! impl std::error::Error for Rejected {}
//!
//! impl CodedError for Rejected {
//!     fn code(&self) -> &'static str {
//!         codes::authentication::TOKEN_INVALID
//!     }
//! }
//!
//! let response: ErrorResponse = Rejected.to_response();
//! assert_eq!(response.code, "AUTH_2002");
//! assert_eq!(response.message, "Invalid or expired token");
//! ```

pub mod codes;
pub mod types;

pub use types::*;
