//! Identity management and user authentication module for Rolegate
//!
//! This module provides the credential authentication core:
//! - User registration with role assignment
//! - Password login against an external identity store
//! - Signed, one-hour session tokens carrying profile claims
//! - Token verification
//!
//! The identity and profile stores are external collaborators reached through
//! the [`IdentityStore`] and [`ProfileStore`] traits.
//!
//! # Known gap
//!
//! Registration writes the identity and then the profile; the two writes are
//! not transactional. If the profile write fails the identity is left
//! orphaned unless an [`IdentityCompensation`] hook is installed with
//! [`IdentityService::with_compensation`].
//!
//! # Example
//!
//! ```rust,no_run
//! use auth_identity::{
//!     IdentityConfig, IdentityService, InMemoryIdentityStore, InMemoryProfileStore,
//!     RegisterRequest,
//! };
//! use secrecy::SecretString;
//! use std::sync::Arc;
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let config = IdentityConfig::from_env()?;
//! let service = IdentityService::new(
//!     Arc::new(InMemoryIdentityStore::new()),
//!     Arc::new(InMemoryProfileStore::new()),
//!     &config,
//! )?;
//!
//! service
//!     .register(RegisterRequest {
//!         email: "user@example.com".to_string(),
//!         password: SecretString::new("password123".to_string()),
//!         full_name: "Example User".to_string(),
//!         role: "user".to_string(),
//!         phone: "555-0100".to_string(),
//!     })
//!     .await?;
//!
//! let login = service
//!     .login("user@example.com", &SecretString::new("password123".to_string()))
//!     .await?;
//! let claims = service.verify_token(&login.access_token)?;
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod error;
pub mod handlers;
pub mod models;
pub mod repository;
pub mod service;
pub mod token;

pub use config::*;
pub use error::*;
pub use models::*;
pub use repository::*;
pub use service::*;
pub use token::*;
