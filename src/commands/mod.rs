//! CLI command definitions and dispatch.

pub mod config;
pub mod health;
pub mod token;

use std::sync::Arc;

use clap::{Parser, Subcommand};

use authsvc_auth::jwt::{JwtDecoder, JwtEncoder};
use authsvc_auth::{RevocationStore, TokenGuard};
use authsvc_cache::CacheManager;
use authsvc_core::config::AppConfig;
use authsvc_core::result::AppResult;

use crate::output::OutputFormat;

/// authsvc: issue, verify and revoke access/refresh tokens
#[derive(Debug, Parser)]
#[command(name = "authsvc", version, about, long_about = None)]
pub struct Cli {
    /// Path to a configuration file, layered over config/default.toml
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "table", global = true)]
    pub format: OutputFormat,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Token lifecycle operations
    Token(token::TokenArgs),
    /// Configuration inspection
    Config(config::ConfigArgs),
    /// Check that the configured token stack and cache are usable
    Health,
}

impl Cli {
    /// Execute the CLI command
    pub async fn execute(&self, config: AppConfig) -> AppResult<()> {
        match &self.command {
            Commands::Token(args) => token::execute(args, &config, self.format).await,
            Commands::Config(args) => config::execute(args, &config, self.format),
            Commands::Health => health::execute(&config, self.format).await,
        }
    }
}

/// Token components wired from configuration.
pub struct TokenStack {
    /// Connected cache backing the revocation store.
    pub cache: Arc<CacheManager>,
    /// Signs new tokens.
    pub encoder: JwtEncoder,
    /// Verifies tokens and checks revocation.
    pub guard: TokenGuard,
}

impl TokenStack {
    /// Helper: build encoder, guard and cache from configuration
    pub async fn connect(config: &AppConfig) -> AppResult<Self> {
        let cache = Arc::new(CacheManager::new(&config.cache).await?);
        let encoder = JwtEncoder::new(&config.auth)?;
        let decoder = Arc::new(JwtDecoder::new(&config.auth)?);
        let guard = TokenGuard::new(decoder, RevocationStore::from_config(&config.auth, cache.clone()));

        Ok(Self {
            cache,
            encoder,
            guard,
        })
    }
}
