//! Token lifecycle CLI commands: issue, verify, revoke, inspect.
//!
//! Revocations are only visible to later invocations when the cache
//! provider is shared (`cache.provider = "redis"`).

use chrono::{DateTime, Duration, Utc};
use clap::{Args, Subcommand, ValueEnum};
use serde::Serialize;
use tabled::Tabled;
use uuid::Uuid;

use authsvc_auth::guard::TokenStatus;
use authsvc_auth::jwt::{Claims, TokenType};
use authsvc_core::config::AppConfig;
use authsvc_core::error::AppError;
use authsvc_core::result::AppResult;
use authsvc_core::types::UserId;

use super::TokenStack;
use crate::output::{self, OutputFormat};

/// Arguments for token commands
#[derive(Debug, Args)]
pub struct TokenArgs {
    /// Token subcommand
    #[command(subcommand)]
    pub command: TokenCommand,
}

/// Token type argument
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum TokenKind {
    /// Short-lived access token
    Access,
    /// Long-lived refresh token
    Refresh,
}

impl From<TokenKind> for TokenType {
    fn from(kind: TokenKind) -> Self {
        match kind {
            TokenKind::Access => TokenType::Access,
            TokenKind::Refresh => TokenType::Refresh,
        }
    }
}

/// Token subcommands
#[derive(Debug, Subcommand)]
pub enum TokenCommand {
    /// Issue a signed token for a subject
    Issue {
        /// Subject user ID
        #[arg(long)]
        subject: Uuid,
        /// Token type
        #[arg(long = "type", value_enum, default_value = "access")]
        kind: TokenKind,
        /// Lifetime override in seconds
        #[arg(long, value_parser = clap::value_parser!(u64).range(1..))]
        ttl_seconds: Option<u64>,
    },
    /// Verify a token; fails if it is invalid or revoked
    Verify {
        /// Encoded token
        token: String,
        /// Expected token type
        #[arg(long = "type", value_enum, default_value = "access")]
        kind: TokenKind,
    },
    /// Revoke a token until its natural expiry
    Revoke {
        /// Encoded token
        token: String,
        /// Expected token type
        #[arg(long = "type", value_enum, default_value = "access")]
        kind: TokenKind,
    },
    /// Report whether a token is valid, invalid or revoked
    Inspect {
        /// Encoded token
        token: String,
        /// Expected token type
        #[arg(long = "type", value_enum, default_value = "access")]
        kind: TokenKind,
    },
}

/// Issued token display
#[derive(Debug, Serialize, Tabled)]
struct IssuedView {
    /// Encoded token
    token: String,
    /// Subject
    subject: String,
    /// Token ID
    jti: String,
    /// Token type
    #[serde(rename = "type")]
    #[tabled(rename = "type")]
    token_type: String,
    /// Issued at
    issued_at: DateTime<Utc>,
    /// Expires at
    expires_at: DateTime<Utc>,
}

/// Token status display
#[derive(Debug, Serialize, Tabled)]
struct StatusView {
    /// valid / invalid / revoked
    status: String,
    /// Rejection reason
    #[serde(skip_serializing_if = "String::is_empty")]
    reason: String,
    /// Subject
    #[serde(skip_serializing_if = "String::is_empty")]
    subject: String,
    /// Token ID
    #[serde(skip_serializing_if = "String::is_empty")]
    jti: String,
    /// Token type
    #[serde(rename = "type", skip_serializing_if = "String::is_empty")]
    #[tabled(rename = "type")]
    token_type: String,
    /// Expires at
    #[serde(skip_serializing_if = "String::is_empty")]
    expires_at: String,
    /// Remaining lifetime of the revocation record
    #[serde(skip_serializing_if = "String::is_empty")]
    revoked_for: String,
}

impl StatusView {
    fn new(status: &TokenStatus) -> Self {
        let reason = match status {
            TokenStatus::Invalid(reason) => reason.to_string(),
            _ => String::new(),
        };
        let claims = status.claims();

        Self {
            status: status.label().to_string(),
            reason,
            subject: claims.map(|c| c.sub.to_string()).unwrap_or_default(),
            jti: claims.map(|c| c.jti.to_string()).unwrap_or_default(),
            token_type: claims.map(|c| c.token_type.to_string()).unwrap_or_default(),
            expires_at: claims
                .map(|c| c.expires_at().to_rfc3339())
                .unwrap_or_default(),
            revoked_for: String::new(),
        }
    }
}

/// Execute token commands
pub async fn execute(args: &TokenArgs, config: &AppConfig, format: OutputFormat) -> AppResult<()> {
    let stack = TokenStack::connect(config).await?;

    match &args.command {
        TokenCommand::Issue {
            subject,
            kind,
            ttl_seconds,
        } => {
            let ttl = ttl_seconds
                .map(|secs| {
                    i64::try_from(secs)
                        .ok()
                        .and_then(Duration::try_seconds)
                        .ok_or_else(|| AppError::validation("--ttl-seconds is out of range"))
                })
                .transpose()?;

            let issued = stack
                .encoder
                .issue(UserId::from_uuid(*subject), (*kind).into(), ttl)?;

            output::print_item(&issued_view(&issued.token, &issued.claims), format);
        }
        TokenCommand::Verify { token, kind } => {
            let claims = stack.guard.authorize(token, (*kind).into()).await?;
            output::print_item(&StatusView::new(&TokenStatus::Valid(claims)), format);
        }
        TokenCommand::Revoke { token, kind } => {
            match stack.guard.inspect(token, (*kind).into()).await? {
                TokenStatus::Valid(claims) => {
                    stack.guard.revocations().record(&claims).await?;
                    let remaining = stack.guard.revocations().remaining(claims.jti).await?;
                    output::print_success(&format!(
                        "Token {} revoked for {}s",
                        claims.jti,
                        remaining.map(|d| d.as_secs()).unwrap_or_default()
                    ));
                }
                TokenStatus::Revoked(claims) => {
                    output::print_warning(&format!("Token {} is already revoked", claims.jti));
                }
                TokenStatus::Invalid(reason) => return Err(reason.into()),
            }
        }
        TokenCommand::Inspect { token, kind } => {
            let status = stack.guard.inspect(token, (*kind).into()).await?;
            let mut view = StatusView::new(&status);
            if let TokenStatus::Revoked(claims) = &status {
                if let Some(left) = stack.guard.revocations().remaining(claims.jti).await? {
                    view.revoked_for = format!("{}s", left.as_secs());
                }
            }
            output::print_item(&view, format);
        }
    }

    Ok(())
}

fn issued_view(token: &str, claims: &Claims) -> IssuedView {
    IssuedView {
        token: token.to_string(),
        subject: claims.sub.to_string(),
        jti: claims.jti.to_string(),
        token_type: claims.token_type.to_string(),
        issued_at: claims.issued_at(),
        expires_at: claims.expires_at(),
    }
}
