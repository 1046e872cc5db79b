//! Configuration inspection CLI commands.

use clap::{Args, Subcommand};

use authsvc_cache::redis::client::mask_redis_url;
use authsvc_core::config::AppConfig;
use authsvc_core::result::AppResult;

use crate::output::{self, OutputFormat};

/// Arguments for config commands
#[derive(Debug, Args)]
pub struct ConfigArgs {
    /// Config subcommand
    #[command(subcommand)]
    pub command: ConfigCommand,
}

/// Config subcommands
#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Show the effective configuration with secrets masked
    Show,
}

/// Execute config commands
pub fn execute(args: &ConfigArgs, config: &AppConfig, format: OutputFormat) -> AppResult<()> {
    match &args.command {
        ConfigCommand::Show => {
            let redacted = redact(config);
            match format {
                OutputFormat::Json => output::print_json(&redacted),
                OutputFormat::Table => {
                    println!("[auth]");
                    output::print_kv("jwt_secret", &redacted.auth.jwt_secret);
                    output::print_kv("jwt_algorithm", &redacted.auth.jwt_algorithm);
                    output::print_kv(
                        "access_ttl_minutes",
                        &redacted.auth.access_ttl_minutes.to_string(),
                    );
                    output::print_kv(
                        "refresh_ttl_days",
                        &redacted.auth.refresh_ttl_days.to_string(),
                    );
                    output::print_kv("leeway_seconds", &redacted.auth.leeway_seconds.to_string());
                    output::print_kv(
                        "password_length",
                        &format!(
                            "{}..={}",
                            redacted.auth.password_min_length, redacted.auth.password_max_length
                        ),
                    );
                    output::print_kv(
                        "password_min_strength",
                        &redacted.auth.password_min_strength.to_string(),
                    );
                    println!("[cache]");
                    output::print_kv("provider", &redacted.cache.provider);
                    output::print_kv(
                        "default_ttl_seconds",
                        &redacted.cache.default_ttl_seconds.to_string(),
                    );
                    output::print_kv("redis.url", &redacted.cache.redis.url);
                    output::print_kv("redis.key_prefix", &redacted.cache.redis.key_prefix);
                    output::print_kv(
                        "memory.initial_capacity",
                        &redacted.cache.memory.initial_capacity.to_string(),
                    );
                    println!("[logging]");
                    output::print_kv("level", &redacted.logging.level);
                    output::print_kv("format", &redacted.logging.format);
                }
            }
        }
    }

    Ok(())
}

/// Copy of the configuration that is safe to print.
fn redact(config: &AppConfig) -> AppConfig {
    let mut redacted = config.clone();
    redacted.auth.jwt_secret = if config.auth.is_default_secret() {
        format!("{} (default)", config.auth.jwt_secret)
    } else {
        "****".to_string()
    };
    redacted.cache.redis.url = mask_redis_url(&config.cache.redis.url);
    redacted
}
