use std::net::SocketAddr;

use crate::app_config::{AppConfig, Environment};
use crate::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
/// In `production` a plaintext base URL or a missing token is rejected.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Decoupled from the process environment so it can be tested with a plain
/// `HashMap` lookup.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let invalid = |var: &str, reason: String| ConfigError::InvalidEnvVar {
        var: var.to_string(),
        reason,
    };

    let base_url = lookup("SS12000_BASE_URL")
        .map_err(|_| ConfigError::MissingEnvVar("SS12000_BASE_URL".to_string()))?;
    let base_url = base_url.trim().to_string();
    if base_url.is_empty() {
        return Err(invalid("SS12000_BASE_URL", "must not be empty".to_string()));
    }

    // An empty token is treated the same as an absent one.
    let auth_token = lookup("SS12000_AUTH_TOKEN")
        .ok()
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty());

    let env = parse_environment(&or_default("SS12000_ENV", "development"))?;
    if env == Environment::Production {
        if !base_url.to_ascii_lowercase().starts_with("https://") {
            return Err(invalid(
                "SS12000_BASE_URL",
                "must use https in production".to_string(),
            ));
        }
        if auth_token.is_none() {
            return Err(ConfigError::MissingEnvVar("SS12000_AUTH_TOKEN".to_string()));
        }
    }
    let log_level = or_default("SS12000_LOG_LEVEL", "info");

    let request_timeout_secs = or_default("SS12000_TIMEOUT_SECS", "30")
        .parse::<u64>()
        .map_err(|e| invalid("SS12000_TIMEOUT_SECS", e.to_string()))?;
    if request_timeout_secs == 0 {
        return Err(invalid(
            "SS12000_TIMEOUT_SECS",
            "must be greater than zero".to_string(),
        ));
    }

    let webhook_bind_addr = or_default("SS12000_WEBHOOK_BIND_ADDR", "0.0.0.0:3001")
        .parse::<SocketAddr>()
        .map_err(|e| invalid("SS12000_WEBHOOK_BIND_ADDR", e.to_string()))?;

    let webhook_path = or_default("SS12000_WEBHOOK_PATH", "/ss12000-webhook");
    if !webhook_path.starts_with('/') {
        return Err(invalid(
            "SS12000_WEBHOOK_PATH",
            format!("\"{webhook_path}\" must start with '/'"),
        ));
    }

    Ok(AppConfig {
        env,
        base_url,
        auth_token,
        log_level,
        request_timeout_secs,
        webhook_bind_addr,
        webhook_path,
    })
}

/// Parse a string into an `Environment` variant.
fn parse_environment(s: &str) -> Result<Environment, ConfigError> {
    match s {
        "development" => Ok(Environment::Development),
        "test" => Ok(Environment::Test),
        "production" => Ok(Environment::Production),
        other => Err(ConfigError::InvalidEnvVar {
            var: "SS12000_ENV".to_string(),
            reason: format!("unknown environment \"{other}\""),
        }),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
