//! Non-fatal client events, delivered to an injected sink instead of stdout.

/// Something the caller may want to know about, but that does not stop a call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Diagnostic {
    /// The base URL does not use `https`.
    InsecureBaseUrl { base_url: String },
    /// No bearer token was configured; requests go out unauthenticated.
    MissingAuthToken,
    /// A request failed. The error itself is still returned to the caller.
    RequestFailed {
        method: String,
        url: String,
        status: Option<u16>,
        message: String,
    },
}

/// Receiver for [`Diagnostic`] events.
///
/// Any `Fn(&Diagnostic) + Send + Sync` closure is a sink.
pub trait DiagnosticSink: Send + Sync {
    fn emit(&self, diagnostic: &Diagnostic);
}

impl<F> DiagnosticSink for F
where
    F: Fn(&Diagnostic) + Send + Sync,
{
    fn emit(&self, diagnostic: &Diagnostic) {
        self(diagnostic);
    }
}

/// Default sink: forwards every event to `tracing` at `warn` level.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingDiagnostics;

impl DiagnosticSink for TracingDiagnostics {
    fn emit(&self, diagnostic: &Diagnostic) {
        match diagnostic {
            Diagnostic::InsecureBaseUrl { base_url } => tracing::warn!(
                base_url = %base_url,
                "base URL does not use HTTPS; traffic to the SS12000 API is unencrypted"
            ),
            Diagnostic::MissingAuthToken => tracing::warn!(
                "no bearer token configured; calls may fail if the API requires authentication"
            ),
            Diagnostic::RequestFailed {
                method,
                url,
                status,
                message,
            } => tracing::warn!(
                method = %method,
                url = %url,
                status = ?status,
                error = %message,
                "SS12000 request failed"
            ),
        }
    }
}
