//! Translation from caller inputs to wire requests.
//!
//! Every function here is pure and validates against the resource's
//! [`EndpointDescriptor`](crate::endpoints::EndpointDescriptor) before any
//! request is sent, so an unknown or unsupported field fails fast with
//! [`Ss12000Error::Validation`].

use serde_json::{Map, Value};

use crate::endpoints::{EndpointDescriptor, Resource};
use crate::error::Ss12000Error;
use crate::filters::{ExpandOptions, Filters, LookupRequest, QueryParams};
use crate::subscription::{NewSubscription, SubscriptionUpdate};

/// Builds the query string for `GET /{resource}`.
///
/// # Errors
///
/// Returns [`Ss12000Error::Validation`] if a filter name is not accepted by
/// the resource, a list is given for a single-valued field, or a required
/// filter is missing.
pub fn build_list_query(resource: Resource, filters: &Filters) -> Result<QueryParams, Ss12000Error> {
    let descriptor = resource.descriptor();

    for required in descriptor.required {
        let present = filters
            .get(required)
            .is_some_and(|value| !value.wire_values().is_empty());
        if !present {
            return Err(Ss12000Error::validation(
                resource,
                format!("filter \"{required}\" is required"),
            ));
        }
    }

    let mut query = QueryParams::new();
    for (name, value) in filters.iter() {
        let Some(accepted) = descriptor.resolve_filter(name) else {
            return Err(Ss12000Error::validation(
                resource,
                format!(
                    "unknown filter \"{name}\"; accepted filters: {}",
                    accepted_names(descriptor)
                ),
            ));
        };
        if value.is_list() && !accepted.repeatable {
            return Err(Ss12000Error::validation(
                resource,
                format!("filter \"{name}\" takes a single value, got a list"),
            ));
        }
        for wire_value in value.wire_values() {
            query.push(accepted.wire.clone(), wire_value);
        }
    }
    Ok(query)
}

/// Builds the query and JSON body for `POST /{resource}/lookup`.
///
/// Identifier lists always go in the body; `expand` and
/// `expandReferenceNames` always go in the query string.
///
/// # Errors
///
/// Returns [`Ss12000Error::Validation`] if the resource has no lookup
/// endpoint, an identifier list name is unknown, no identifiers were given,
/// or an expand option is unsupported.
pub fn build_lookup_body(
    resource: Resource,
    request: &LookupRequest,
) -> Result<(QueryParams, Value), Ss12000Error> {
    let descriptor = resource.descriptor();
    if !descriptor.supports_lookup() {
        return Err(Ss12000Error::validation(
            resource,
            "resource has no lookup endpoint",
        ));
    }

    let mut body = Map::new();
    if !request.ids.is_empty() {
        body.insert("ids".to_owned(), string_array(&request.ids));
    }
    for (name, values) in &request.keys {
        let Some(key) = descriptor.lookup_key(name) else {
            let known: Vec<_> = descriptor.lookup_keys.iter().map(|k| k.name).collect();
            return Err(Ss12000Error::validation(
                resource,
                format!(
                    "unknown lookup identifier \"{name}\"; accepted: {}",
                    known.join(", ")
                ),
            ));
        };
        if values.is_empty() {
            continue;
        }
        match body.get_mut(key.wire) {
            Some(Value::Array(existing)) => {
                existing.extend(values.iter().cloned().map(Value::String));
            }
            _ => {
                body.insert(key.wire.to_owned(), string_array(values));
            }
        }
    }

    if body.is_empty() {
        return Err(Ss12000Error::validation(
            resource,
            "lookup requires at least one identifier",
        ));
    }

    let query = expand_query(resource, descriptor, &request.options)?;
    Ok((query, Value::Object(body)))
}

/// Builds the query string for `GET /{resource}/{id}`.
///
/// # Errors
///
/// Returns [`Ss12000Error::Validation`] if the resource has no by-id
/// endpoint or an expand option is unsupported.
pub fn build_get_by_id_query(
    resource: Resource,
    options: &ExpandOptions,
) -> Result<QueryParams, Ss12000Error> {
    let descriptor = resource.descriptor();
    if !descriptor.supports_by_id {
        return Err(Ss12000Error::validation(
            resource,
            "resource cannot be fetched by id",
        ));
    }
    expand_query(resource, descriptor, options)
}

/// Builds the body for `POST /subscriptions`.
///
/// # Errors
///
/// Returns [`Ss12000Error::Validation`] if `name` or `target` is blank or no
/// resource types are given.
pub fn build_subscription_body(subscription: &NewSubscription) -> Result<Value, Ss12000Error> {
    let invalid = |reason: &str| Ss12000Error::validation(Resource::Subscriptions, reason);
    if subscription.name.trim().is_empty() {
        return Err(invalid("subscription name must not be empty"));
    }
    if subscription.target.trim().is_empty() {
        return Err(invalid("subscription target must not be empty"));
    }
    if subscription.resource_types.is_empty() {
        return Err(invalid("subscription needs at least one resource type"));
    }
    serde_json::to_value(subscription).map_err(|source| Ss12000Error::Decode {
        context: "subscription body".to_owned(),
        source,
    })
}

/// Builds the body for `PATCH /subscriptions/{id}`.
///
/// # Errors
///
/// Returns [`Ss12000Error::Decode`] if the body cannot be serialized.
pub fn build_subscription_update(update: &SubscriptionUpdate) -> Result<Value, Ss12000Error> {
    serde_json::to_value(update).map_err(|source| Ss12000Error::Decode {
        context: "subscription update body".to_owned(),
        source,
    })
}

/// Validates an entity id used as a path segment.
///
/// `.` and `..` are rejected because URL path normalization would remove
/// them and retarget the request at the collection.
pub(crate) fn require_id(resource: Resource, id: &str) -> Result<(), Ss12000Error> {
    if id.trim().is_empty() {
        return Err(Ss12000Error::validation(resource, "id must not be empty"));
    }
    if matches!(id, "." | "..") {
        return Err(Ss12000Error::validation(
            resource,
            format!("id '{id}' is not a valid path segment"),
        ));
    }
    Ok(())
}

fn expand_query(
    resource: Resource,
    descriptor: &EndpointDescriptor,
    options: &ExpandOptions,
) -> Result<QueryParams, Ss12000Error> {
    let mut query = QueryParams::new();
    if !options.expand.is_empty() {
        if !descriptor.supports_expand {
            return Err(Ss12000Error::validation(
                resource,
                "resource does not support expand",
            ));
        }
        for item in &options.expand {
            query.push("expand", item.clone());
        }
    }
    if options.expand_reference_names {
        if !descriptor.supports_expand_reference_names {
            return Err(Ss12000Error::validation(
                resource,
                "resource does not support expandReferenceNames",
            ));
        }
        query.push("expandReferenceNames", "true");
    }
    Ok(query)
}

fn string_array(values: &[String]) -> Value {
    Value::Array(values.iter().cloned().map(Value::String).collect())
}

fn accepted_names(descriptor: &EndpointDescriptor) -> String {
    descriptor
        .accepted_filters()
        .into_iter()
        .map(|f| f.logical)
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
#[path = "mapper_test.rs"]
mod tests;
