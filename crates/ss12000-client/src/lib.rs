//! Client for the Swedish SS12000 school-data REST API.
//!
//! Requests are built from a static table of [`EndpointDescriptor`]s: the
//! [`mapper`] turns logical filter names into wire query parameters or lookup
//! bodies, and [`Ss12000Client`] performs the single HTTP round trip.

pub mod client;
pub mod diagnostics;
pub mod endpoints;
pub mod error;
pub mod filters;
pub mod mapper;
mod resources;
pub mod subscription;

pub use client::{ResponseBody, Ss12000Client, DEFAULT_TIMEOUT_SECS};
pub use diagnostics::{Diagnostic, DiagnosticSink, TracingDiagnostics};
pub use endpoints::{AcceptedFilter, EndpointDescriptor, FieldShape, Paging, Resource};
pub use error::{ErrorBody, Ss12000Error};
pub use filters::{ExpandOptions, FilterValue, Filters, LookupRequest, QueryParams};
pub use subscription::{NewSubscription, SubscriptionUpdate};
