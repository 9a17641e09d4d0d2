//! HTTP dispatcher for the SS12000 REST API.
//!
//! [`Ss12000Client`] owns the base URL, the bearer token and a configured
//! `reqwest::Client`. Every public operation validates its inputs through the
//! [`mapper`](crate::mapper) and then performs exactly one round trip through
//! [`Ss12000Client::dispatch`]. Nothing is retried.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use reqwest::{Client, Method, StatusCode, Url};
use serde_json::Value;

use crate::diagnostics::{Diagnostic, DiagnosticSink, TracingDiagnostics};
use crate::endpoints::Resource;
use crate::error::{ErrorBody, Ss12000Error};
use crate::filters::{ExpandOptions, Filters, LookupRequest, QueryParams};
use crate::mapper;
use crate::subscription::{NewSubscription, SubscriptionUpdate};

/// Per-request deadline used when the caller has no configured value.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

const CONNECT_TIMEOUT_SECS: u64 = 10;

const USER_AGENT: &str = concat!("ss12000-client/", env!("CARGO_PKG_VERSION"));

/// Successful response of a single call.
#[derive(Debug, Clone, PartialEq)]
pub enum ResponseBody {
    /// Any 2xx other than 204, decoded as JSON. A literal `null` payload is
    /// `Json(Value::Null)`, never [`ResponseBody::NoContent`].
    Json(Value),
    /// HTTP 204.
    NoContent,
}

impl ResponseBody {
    #[must_use]
    pub fn as_json(&self) -> Option<&Value> {
        match self {
            Self::Json(value) => Some(value),
            Self::NoContent => None,
        }
    }

    #[must_use]
    pub fn into_json(self) -> Option<Value> {
        match self {
            Self::Json(value) => Some(value),
            Self::NoContent => None,
        }
    }

    #[must_use]
    pub fn is_no_content(&self) -> bool {
        matches!(self, Self::NoContent)
    }
}

/// Client for one SS12000 API deployment.
///
/// Cheap to clone; clones share the connection pool and diagnostic sink.
#[derive(Clone)]
pub struct Ss12000Client {
    client: Client,
    base_url: Url,
    auth_token: Option<String>,
    diagnostics: Arc<dyn DiagnosticSink>,
}

impl fmt::Debug for Ss12000Client {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Ss12000Client")
            .field("base_url", &self.base_url.as_str())
            .field("auth_token", &self.auth_token.as_ref().map(|_| "[redacted]"))
            .finish_non_exhaustive()
    }
}

impl Ss12000Client {
    /// Creates a client that reports diagnostics through `tracing`.
    ///
    /// # Errors
    ///
    /// Returns [`Ss12000Error::InvalidBaseUrl`] if `base_url` is empty, not
    /// an absolute `http`/`https` URL, or cannot carry a path, and
    /// [`Ss12000Error::ClientBuild`] if the HTTP client cannot be built.
    pub fn new(
        base_url: &str,
        auth_token: Option<&str>,
        timeout_secs: u64,
    ) -> Result<Self, Ss12000Error> {
        Self::with_diagnostics(
            base_url,
            auth_token,
            timeout_secs,
            Arc::new(TracingDiagnostics),
        )
    }

    /// Creates a client that reports diagnostics to `diagnostics`.
    ///
    /// A plaintext base URL or a missing token is reported, not rejected.
    ///
    /// # Errors
    ///
    /// Same as [`Ss12000Client::new`].
    pub fn with_diagnostics(
        base_url: &str,
        auth_token: Option<&str>,
        timeout_secs: u64,
        diagnostics: Arc<dyn DiagnosticSink>,
    ) -> Result<Self, Ss12000Error> {
        let base_url = parse_base_url(base_url)?;

        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(CONNECT_TIMEOUT_SECS))
            .user_agent(USER_AGENT)
            .build()
            .map_err(Ss12000Error::ClientBuild)?;

        if base_url.scheme() != "https" {
            diagnostics.emit(&Diagnostic::InsecureBaseUrl {
                base_url: base_url.to_string(),
            });
        }

        let auth_token = auth_token
            .map(str::trim)
            .filter(|token| !token.is_empty())
            .map(str::to_owned);
        if auth_token.is_none() {
            diagnostics.emit(&Diagnostic::MissingAuthToken);
        }

        Ok(Self {
            client,
            base_url,
            auth_token,
            diagnostics,
        })
    }

    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Appends `segments` to the base URL path, one percent-encoded segment
    /// each. The base path prefix (e.g. `/v2.0`) is always kept.
    pub(crate) fn endpoint_url(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        // `parse_base_url` rejects cannot-be-a-base URLs, so this is always Ok.
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    /// Performs one HTTP round trip.
    ///
    /// `segments` are appended to the base URL; `query` pairs are sent in
    /// order with repeated keys kept; `body`, when present, is sent as JSON.
    ///
    /// # Errors
    ///
    /// - [`Ss12000Error::Transport`] on connect, TLS, or timeout failure.
    /// - [`Ss12000Error::Api`] on a 4xx/5xx status, carrying the decoded or
    ///   raw error body.
    /// - [`Ss12000Error::Decode`] if a 2xx body (other than 204) is not
    ///   valid UTF-8 JSON.
    pub async fn dispatch(
        &self,
        method: Method,
        segments: &[&str],
        query: &QueryParams,
        body: Option<&Value>,
    ) -> Result<ResponseBody, Ss12000Error> {
        let mut url = self.endpoint_url(segments);
        if !query.is_empty() {
            url.query_pairs_mut().extend_pairs(query.iter());
        }

        let method_name = method.to_string();
        tracing::debug!(method = %method_name, url = %url, "sending SS12000 request");

        let mut request = self
            .client
            .request(method, url.clone())
            .header(ACCEPT, "application/json")
            .header(CONTENT_TYPE, "application/json");
        if let Some(token) = &self.auth_token {
            request = request.bearer_auth(token);
        }
        if let Some(body) = body {
            request = request.json(body);
        }

        let transport = |source: reqwest::Error| Ss12000Error::Transport {
            method: method_name.clone(),
            url: url.to_string(),
            source,
        };

        let response = match request.send().await {
            Ok(response) => response,
            Err(source) => return Err(self.report(&method_name, &url, transport(source))),
        };

        let status = response.status();
        if status == StatusCode::NO_CONTENT {
            return Ok(ResponseBody::NoContent);
        }

        let bytes = match response.bytes().await {
            Ok(bytes) => bytes,
            Err(source) => return Err(self.report(&method_name, &url, transport(source))),
        };

        if !status.is_success() {
            let error = Ss12000Error::Api {
                status: status.as_u16(),
                method: method_name.clone(),
                url: url.to_string(),
                body: ErrorBody::from_text(String::from_utf8_lossy(&bytes).into_owned()),
            };
            return Err(self.report(&method_name, &url, error));
        }

        match serde_json::from_slice(&bytes) {
            Ok(value) => Ok(ResponseBody::Json(value)),
            Err(source) => {
                let error = Ss12000Error::Decode {
                    context: format!("{method_name} {url}"),
                    source,
                };
                Err(self.report(&method_name, &url, error))
            }
        }
    }

    /// `GET /{resource}` with mapped list filters.
    ///
    /// # Errors
    ///
    /// [`Ss12000Error::Validation`] for filters the resource does not accept,
    /// otherwise as [`Ss12000Client::dispatch`].
    pub async fn list(
        &self,
        resource: Resource,
        filters: &Filters,
    ) -> Result<ResponseBody, Ss12000Error> {
        let query = mapper::build_list_query(resource, filters)?;
        self.dispatch(Method::GET, &[resource.path()], &query, None)
            .await
    }

    /// `POST /{resource}/lookup`.
    ///
    /// # Errors
    ///
    /// [`Ss12000Error::Validation`] if the resource has no lookup endpoint or
    /// the request carries no identifiers, otherwise as
    /// [`Ss12000Client::dispatch`].
    pub async fn lookup(
        &self,
        resource: Resource,
        request: &LookupRequest,
    ) -> Result<ResponseBody, Ss12000Error> {
        let (query, body) = mapper::build_lookup_body(resource, request)?;
        self.dispatch(Method::POST, &[resource.path(), "lookup"], &query, Some(&body))
            .await
    }

    /// `GET /{resource}/{id}`.
    ///
    /// # Errors
    ///
    /// [`Ss12000Error::Validation`] for a blank id or an unsupported expand
    /// option, otherwise as [`Ss12000Client::dispatch`].
    pub async fn get_by_id(
        &self,
        resource: Resource,
        id: &str,
        options: &ExpandOptions,
    ) -> Result<ResponseBody, Ss12000Error> {
        mapper::require_id(resource, id)?;
        let query = mapper::build_get_by_id_query(resource, options)?;
        self.dispatch(Method::GET, &[resource.path(), id], &query, None)
            .await
    }

    /// `DELETE /{resource}/{id}`. Only `attendances` and `subscriptions`
    /// accept deletes.
    ///
    /// # Errors
    ///
    /// [`Ss12000Error::Validation`] for a blank id or a resource without a
    /// delete endpoint, otherwise as [`Ss12000Client::dispatch`].
    pub async fn delete(&self, resource: Resource, id: &str) -> Result<ResponseBody, Ss12000Error> {
        if !resource.descriptor().supports_delete {
            return Err(Ss12000Error::validation(
                resource,
                "resource does not support delete",
            ));
        }
        mapper::require_id(resource, id)?;
        self.dispatch(Method::DELETE, &[resource.path(), id], &QueryParams::new(), None)
            .await
    }

    /// `POST /subscriptions`.
    ///
    /// # Errors
    ///
    /// [`Ss12000Error::Validation`] for a blank name or target or an empty
    /// resource type list, otherwise as [`Ss12000Client::dispatch`].
    pub async fn create_subscription(
        &self,
        subscription: &NewSubscription,
    ) -> Result<ResponseBody, Ss12000Error> {
        let body = mapper::build_subscription_body(subscription)?;
        self.dispatch(
            Method::POST,
            &[Resource::Subscriptions.path()],
            &QueryParams::new(),
            Some(&body),
        )
        .await
    }

    /// `PATCH /subscriptions/{id}`, renewing the subscription until `expires`.
    ///
    /// # Errors
    ///
    /// [`Ss12000Error::Validation`] for a blank id, otherwise as
    /// [`Ss12000Client::dispatch`].
    pub async fn update_subscription(
        &self,
        id: &str,
        expires: DateTime<Utc>,
    ) -> Result<ResponseBody, Ss12000Error> {
        mapper::require_id(Resource::Subscriptions, id)?;
        let body = mapper::build_subscription_update(&SubscriptionUpdate { expires })?;
        self.dispatch(
            Method::PATCH,
            &[Resource::Subscriptions.path(), id],
            &QueryParams::new(),
            Some(&body),
        )
        .await
    }

    /// `GET /deletedEntities?entities=..&meta.modified.after=..`.
    ///
    /// # Errors
    ///
    /// [`Ss12000Error::Validation`] if `entities` is empty, otherwise as
    /// [`Ss12000Client::dispatch`].
    pub async fn get_deleted_entities<I, S>(
        &self,
        entities: I,
        modified_after: Option<DateTime<Utc>>,
    ) -> Result<ResponseBody, Ss12000Error>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let entities: Vec<String> = entities.into_iter().map(Into::into).collect();
        let filters = Filters::new()
            .set("entities", entities)
            .set_opt("meta_modified_after", modified_after);
        self.list(Resource::DeletedEntities, &filters).await
    }

    fn report(&self, method: &str, url: &Url, error: Ss12000Error) -> Ss12000Error {
        self.diagnostics.emit(&Diagnostic::RequestFailed {
            method: method.to_owned(),
            url: url.to_string(),
            status: error.status(),
            message: error.to_string(),
        });
        error
    }
}

fn parse_base_url(raw: &str) -> Result<Url, Ss12000Error> {
    let invalid = |reason: String| Ss12000Error::InvalidBaseUrl {
        base_url: raw.to_owned(),
        reason,
    };

    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(invalid("base URL must not be empty".to_owned()));
    }

    let mut url = Url::parse(trimmed).map_err(|e| invalid(e.to_string()))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(invalid(format!("unsupported scheme '{}'", url.scheme())));
    }
    if url.cannot_be_a_base() {
        return Err(invalid("URL cannot carry a path".to_owned()));
    }
    url.set_query(None);
    url.set_fragment(None);
    Ok(url)
}

#[cfg(test)]
#[path = "client_test.rs"]
mod tests;
