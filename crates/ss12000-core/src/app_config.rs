use std::net::SocketAddr;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

/// Runtime settings shared by the CLI and the webhook receiver.
#[derive(Clone)]
pub struct AppConfig {
    pub env: Environment,
    /// SS12000 API root including any version prefix, e.g. `https://host/v2.0`.
    pub base_url: String,
    pub auth_token: Option<String>,
    pub log_level: String,
    pub request_timeout_secs: u64,
    pub webhook_bind_addr: SocketAddr,
    pub webhook_path: String,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("env", &self.env)
            .field("base_url", &self.base_url)
            .field(
                "auth_token",
                &self.auth_token.as_ref().map(|_| "[redacted]"),
            )
            .field("log_level", &self.log_level)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("webhook_bind_addr", &self.webhook_bind_addr)
            .field("webhook_path", &self.webhook_path)
            .finish()
    }
}
