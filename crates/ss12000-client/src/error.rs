use std::fmt;

use thiserror::Error;

use crate::endpoints::Resource;

/// Body of a non-2xx response, decoded when the server sent JSON.
#[derive(Debug, Clone, PartialEq)]
pub enum ErrorBody {
    Json(serde_json::Value),
    Text(String),
}

impl ErrorBody {
    /// Decodes `text` as JSON, keeping the raw text when it is not JSON.
    ///
    /// Never fails: a malformed error body must not mask the HTTP status.
    pub(crate) fn from_text(text: String) -> Self {
        match serde_json::from_str(&text) {
            Ok(value) => Self::Json(value),
            Err(_) => Self::Text(text),
        }
    }

    #[must_use]
    pub fn as_json(&self) -> Option<&serde_json::Value> {
        match self {
            Self::Json(value) => Some(value),
            Self::Text(_) => None,
        }
    }
}

impl fmt::Display for ErrorBody {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Json(value) => write!(f, "{value}"),
            Self::Text(text) if text.is_empty() => write!(f, "<empty body>"),
            Self::Text(text) => write!(f, "{text}"),
        }
    }
}

/// Errors returned by the SS12000 client.
#[derive(Debug, Error)]
pub enum Ss12000Error {
    /// The underlying `reqwest::Client` could not be constructed.
    #[error("could not build HTTP client: {0}")]
    ClientBuild(#[source] reqwest::Error),

    /// The configured base URL is empty or unusable.
    #[error("invalid base URL '{base_url}': {reason}")]
    InvalidBaseUrl { base_url: String, reason: String },

    /// DNS, connect, TLS, or timeout failure. Never retried by the client.
    #[error("transport error during {method} {url}: {source}")]
    Transport {
        method: String,
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// The server answered with a 4xx/5xx status.
    #[error("SS12000 API returned HTTP {status} for {method} {url}: {body}")]
    Api {
        status: u16,
        method: String,
        url: String,
        body: ErrorBody,
    },

    /// A 2xx response whose body was not valid JSON.
    #[error("JSON deserialization error for {context}: {source}")]
    Decode {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    /// The call was rejected before any network traffic.
    #[error("invalid request for {resource}: {reason}")]
    Validation { resource: String, reason: String },
}

impl Ss12000Error {
    pub(crate) fn validation(resource: Resource, reason: impl Into<String>) -> Self {
        Self::Validation {
            resource: resource.path().to_string(),
            reason: reason.into(),
        }
    }

    /// HTTP status of an [`Ss12000Error::Api`] error.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Server-provided payload of an [`Ss12000Error::Api`] error.
    #[must_use]
    pub fn error_body(&self) -> Option<&ErrorBody> {
        match self {
            Self::Api { body, .. } => Some(body),
            _ => None,
        }
    }
}
