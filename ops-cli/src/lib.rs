//! Operations CLI for Rolegate session tokens
//!
//! Operators use `authctl` when debugging services downstream of login:
//! - **issue-token**: mint a token for given claims with the configured secret
//! - **verify-token**: decode a token or report why it was rejected
//!
//! The signing secret comes from `--config <file.toml>` or, by default, from
//! `JWT_SECRET` in the environment or a `.env` file.

use anyhow::{Context, Result};
use auth_identity::{IdentityConfig, Role, SessionClaims, TokenCodec};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use uuid::Uuid;

#[derive(Parser, Debug)]
#[command(name = "authctl")]
#[command(about = "Mint and inspect Rolegate session tokens")]
pub struct Cli {
    /// TOML configuration file holding `jwt_secret`
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Mint a session token valid for one hour
    IssueToken {
        #[arg(long)]
        id: Uuid,
        #[arg(long)]
        email: String,
        /// One of: punisher, user, customer
        #[arg(long)]
        role: String,
        #[arg(long)]
        full_name: String,
        #[arg(long)]
        avatar_url: Option<String>,
    },
    /// Print the claims of a token, or fail if it is invalid or expired
    VerifyToken {
        token: String,
    },
}

impl Cli {
    pub fn load_config(&self) -> Result<IdentityConfig> {
        let config = match &self.config {
            Some(path) => IdentityConfig::from_file(path),
            None => IdentityConfig::from_env(),
        };
        config.context("Failed to load signing configuration")
    }
}

/// Runs `command` and returns the JSON document to print.
pub fn execute(command: &Command, config: &IdentityConfig) -> Result<serde_json::Value> {
    let codec = TokenCodec::new(config)?;

    match command {
        Command::IssueToken {
            id,
            email,
            role,
            full_name,
            avatar_url,
        } => {
            let role: Role = role.parse()?;
            let claims = SessionClaims {
                identity_id: *id,
                email: email.clone(),
                role,
                full_name: full_name.clone(),
                avatar_url: avatar_url.clone(),
            };
            let issued = codec.issue(&claims)?;
            tracing::info!(identity_id = %id, role = %role, "Token minted from CLI");

            Ok(serde_json::json!({
                "accessToken": issued.token,
                "expiresIn": TokenCodec::validity_window().num_seconds(),
                "expiresAt": issued.expires_at.to_rfc3339(),
            }))
        }
        Command::VerifyToken { token } => {
            let claims = codec.verify(token)?;
            Ok(serde_json::to_value(claims)?)
        }
    }
}
