use std::collections::HashMap;
use std::env::VarError;

use super::*;

fn lookup_from_map<'a>(
    map: &'a HashMap<&'a str, &'a str>,
) -> impl Fn(&str) -> Result<String, VarError> + 'a {
    move |key| {
        map.get(key)
            .map(|v| (*v).to_string())
            .ok_or(VarError::NotPresent)
    }
}

/// Returns a map with all required env vars populated with valid defaults.
fn full_env<'a>() -> HashMap<&'a str, &'a str> {
    let mut m = HashMap::new();
    m.insert("SS12000_BASE_URL", "https://skolplattform.example.se/v2.0");
    m
}

#[test]
fn parse_environment_development() {
    assert_eq!(
        parse_environment("development").unwrap(),
        Environment::Development
    );
}

#[test]
fn parse_environment_production() {
    assert_eq!(
        parse_environment("production").unwrap(),
        Environment::Production
    );
}

#[test]
fn parse_environment_unknown_fails() {
    let err = parse_environment("staging").unwrap_err();
    assert!(matches!(err, ConfigError::InvalidEnvVar { ref var, .. } if var == "SS12000_ENV"));
}

#[test]
fn build_app_config_fails_without_base_url() {
    let map: HashMap<&str, &str> = HashMap::new();
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::MissingEnvVar(ref v)) if v == "SS12000_BASE_URL"),
        "expected MissingEnvVar(SS12000_BASE_URL), got: {result:?}"
    );
}

#[test]
fn build_app_config_rejects_blank_base_url() {
    let mut map = full_env();
    map.insert("SS12000_BASE_URL", "   ");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "SS12000_BASE_URL"),
        "expected InvalidEnvVar(SS12000_BASE_URL), got: {result:?}"
    );
}

#[test]
fn build_app_config_succeeds_with_defaults() {
    let map = full_env();
    let cfg = build_app_config(lookup_from_map(&map)).expect("defaults should be valid");
    assert_eq!(cfg.env, Environment::Development);
    assert_eq!(cfg.base_url, "https://skolplattform.example.se/v2.0");
    assert!(cfg.auth_token.is_none());
    assert_eq!(cfg.log_level, "info");
    assert_eq!(cfg.request_timeout_secs, 30);
    assert_eq!(cfg.webhook_bind_addr.to_string(), "0.0.0.0:3001");
    assert_eq!(cfg.webhook_path, "/ss12000-webhook");
}

#[test]
fn build_app_config_reads_auth_token() {
    let mut map = full_env();
    map.insert("SS12000_AUTH_TOKEN", "jwt-token");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.auth_token.as_deref(), Some("jwt-token"));
}

#[test]
fn build_app_config_treats_empty_auth_token_as_absent() {
    let mut map = full_env();
    map.insert("SS12000_AUTH_TOKEN", "");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert!(cfg.auth_token.is_none());
}

#[test]
fn debug_output_redacts_auth_token() {
    let mut map = full_env();
    map.insert("SS12000_AUTH_TOKEN", "super-secret");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    let rendered = format!("{cfg:?}");
    assert!(!rendered.contains("super-secret"), "token leaked: {rendered}");
    assert!(rendered.contains("[redacted]"));
}

#[test]
fn build_app_config_timeout_override() {
    let mut map = full_env();
    map.insert("SS12000_TIMEOUT_SECS", "5");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.request_timeout_secs, 5);
}

#[test]
fn build_app_config_timeout_invalid() {
    let mut map = full_env();
    map.insert("SS12000_TIMEOUT_SECS", "not-a-number");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "SS12000_TIMEOUT_SECS"),
        "expected InvalidEnvVar(SS12000_TIMEOUT_SECS), got: {result:?}"
    );
}

#[test]
fn build_app_config_timeout_zero_rejected() {
    let mut map = full_env();
    map.insert("SS12000_TIMEOUT_SECS", "0");
    let result = build_app_config(lookup_from_map(&map));
    assert!(matches!(result, Err(ConfigError::InvalidEnvVar { .. })));
}

#[test]
fn build_app_config_fails_with_invalid_bind_addr() {
    let mut map = full_env();
    map.insert("SS12000_WEBHOOK_BIND_ADDR", "not-a-socket-addr");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "SS12000_WEBHOOK_BIND_ADDR"),
        "expected InvalidEnvVar(SS12000_WEBHOOK_BIND_ADDR), got: {result:?}"
    );
}

#[test]
fn build_app_config_rejects_relative_webhook_path() {
    let mut map = full_env();
    map.insert("SS12000_WEBHOOK_PATH", "hooks");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "SS12000_WEBHOOK_PATH"),
        "expected InvalidEnvVar(SS12000_WEBHOOK_PATH), got: {result:?}"
    );
}

#[test]
fn production_rejects_plaintext_base_url() {
    let mut map = full_env();
    map.insert("SS12000_ENV", "production");
    map.insert("SS12000_BASE_URL", "http://skolplattform.example.se/v2.0");
    map.insert("SS12000_AUTH_TOKEN", "jwt-token");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "SS12000_BASE_URL"),
        "expected InvalidEnvVar(SS12000_BASE_URL), got: {result:?}"
    );
}

#[test]
fn production_requires_auth_token() {
    let mut map = full_env();
    map.insert("SS12000_ENV", "production");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::MissingEnvVar(ref v)) if v == "SS12000_AUTH_TOKEN"),
        "expected MissingEnvVar(SS12000_AUTH_TOKEN), got: {result:?}"
    );
}

#[test]
fn production_accepts_https_with_token() {
    let mut map = full_env();
    map.insert("SS12000_ENV", "production");
    map.insert("SS12000_AUTH_TOKEN", "jwt-token");
    let cfg = build_app_config(lookup_from_map(&map)).expect("production config should be valid");
    assert_eq!(cfg.env, Environment::Production);
}

#[test]
fn development_allows_plaintext_without_token() {
    let mut map = full_env();
    map.insert("SS12000_BASE_URL", "http://localhost:8080/v2.0");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert!(cfg.auth_token.is_none());
}
