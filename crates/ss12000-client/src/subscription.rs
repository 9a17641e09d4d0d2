//! Write-side subscription bodies.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Serialize, Serializer};

/// A webhook subscription to create with `POST /subscriptions`.
///
/// `resource_types` is a flat list of SS12000 type names (`"Person"`,
/// `"Activity"`, ...); on the wire each becomes `{"resource": name}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewSubscription {
    pub name: String,
    pub target: String,
    #[serde(serialize_with = "wrap_resource_types")]
    pub resource_types: Vec<String>,
}

impl NewSubscription {
    pub fn new<I, S>(name: impl Into<String>, target: impl Into<String>, resource_types: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.into(),
            target: target.into(),
            resource_types: resource_types.into_iter().map(Into::into).collect(),
        }
    }
}

/// Body for `PATCH /subscriptions/{id}`, which only renews the expiry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SubscriptionUpdate {
    #[serde(serialize_with = "rfc3339_utc")]
    pub expires: DateTime<Utc>,
}

#[derive(Serialize)]
struct ResourceTypeRef<'a> {
    resource: &'a str,
}

fn wrap_resource_types<S: Serializer>(types: &[String], serializer: S) -> Result<S::Ok, S::Error> {
    serializer.collect_seq(types.iter().map(|t| ResourceTypeRef { resource: t }))
}

fn rfc3339_utc<S: Serializer>(ts: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&ts.to_rfc3339_opts(SecondsFormat::Secs, true))
}
