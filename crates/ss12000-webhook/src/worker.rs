//! Background follow-up for received notifications.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use ss12000_client::{ResponseBody, Ss12000Client, Ss12000Error};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::api::Notification;

/// Notifications buffered between the HTTP handler and the worker.
pub const QUEUE_CAPACITY: usize = 64;

/// Processes notifications one at a time, in arrival order.
pub struct Worker {
    client: Ss12000Client,
    /// Time of the last successful deleted-entities poll, per entity type.
    last_deleted_poll: HashMap<String, DateTime<Utc>>,
}

pub fn spawn(client: Ss12000Client, mut rx: mpsc::Receiver<Notification>) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut worker = Worker::new(client);
        while let Some(notification) = rx.recv().await {
            if let Err(e) = worker.process(&notification).await {
                tracing::error!(error = %e, "failed to fetch deleted entities");
            }
        }
        tracing::info!("webhook worker stopped");
    })
}

impl Worker {
    pub fn new(client: Ss12000Client) -> Self {
        Self {
            client,
            last_deleted_poll: HashMap::new(),
        }
    }

    /// Logs modified resource types and, when deletions are reported, fetches
    /// `/deletedEntities` for those types in one request.
    ///
    /// The request is bounded by the oldest cursor among the reported types,
    /// and is unbounded if any of them has never been polled. Only the
    /// reported types advance, and only after a successful response.
    ///
    /// Returns the deleted-entities response, or `None` when nothing was
    /// deleted.
    pub async fn process(
        &mut self,
        notification: &Notification,
    ) -> Result<Option<ResponseBody>, Ss12000Error> {
        for resource_type in &notification.modified_entities {
            tracing::info!(resource_type = %resource_type, "changes reported for resource type");
        }

        if notification.deleted_entities.is_empty() {
            return Ok(None);
        }

        let polled_at = Utc::now();
        let since = self.poll_bound(&notification.deleted_entities);
        let body = self
            .client
            .get_deleted_entities(&notification.deleted_entities, since)
            .await?;
        for entity in &notification.deleted_entities {
            self.last_deleted_poll.insert(entity.clone(), polled_at);
        }

        tracing::info!(
            entities = ?notification.deleted_entities,
            "fetched deleted entities"
        );
        Ok(Some(body))
    }

    fn poll_bound(&self, entities: &[String]) -> Option<DateTime<Utc>> {
        entities
            .iter()
            .map(|entity| self.last_deleted_poll.get(entity).copied())
            .try_fold(None, |oldest: Option<DateTime<Utc>>, cursor| {
                let cursor = cursor?;
                Some(Some(oldest.map_or(cursor, |o| o.min(cursor))))
            })
            .flatten()
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    fn worker(server: &MockServer) -> Worker {
        let client = Ss12000Client::new(&server.uri(), Some("t"), 5).expect("client");
        Worker::new(client)
    }

    fn notification(modified: &[&str], deleted: &[&str]) -> Notification {
        Notification {
            modified_entities: modified.iter().map(ToString::to_string).collect(),
            deleted_entities: deleted.iter().map(ToString::to_string).collect(),
        }
    }

    #[tokio::test]
    async fn modified_only_makes_no_request() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let result = worker(&server)
            .process(&notification(&["Person"], &[]))
            .await
            .expect("no request made");
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn deletions_fetch_deleted_entities_since_last_poll() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/deletedEntities"))
            .and(query_param("entities", "Person"))
            .and(query_param("entities", "Group"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": {}})))
            .expect(2)
            .mount(&server)
            .await;

        let mut worker = worker(&server);
        let deleted = notification(&[], &["Person", "Group"]);

        let first = worker.process(&deleted).await.expect("first poll");
        assert_eq!(first, Some(ResponseBody::Json(json!({"data": {}}))));
        worker.process(&deleted).await.expect("second poll");

        let received = server.received_requests().await.expect("recording enabled");
        let has_since = |i: usize| {
            received[i]
                .url
                .query_pairs()
                .any(|(k, _)| k == "meta.modified.after")
        };
        assert!(!has_since(0), "first poll has no lower bound");
        assert!(has_since(1), "second poll starts at the first poll time");
    }

    #[tokio::test]
    async fn failed_poll_keeps_previous_bound() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/deletedEntities"))
            .respond_with(ResponseTemplate::new(503).set_body_string("maintenance"))
            .mount(&server)
            .await;

        let mut worker = worker(&server);
        let err = worker
            .process(&notification(&[], &["Room"]))
            .await
            .unwrap_err();

        assert_eq!(err.status(), Some(503));
        assert!(worker.last_deleted_poll.is_empty());
    }

    fn has_since(request: &wiremock::Request) -> bool {
        request
            .url
            .query_pairs()
            .any(|(k, _)| k == "meta.modified.after")
    }

    #[tokio::test]
    async fn cursors_are_tracked_per_entity_type() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/deletedEntities"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": {}})))
            .mount(&server)
            .await;

        let mut worker = worker(&server);
        worker
            .process(&notification(&[], &["Person"]))
            .await
            .expect("person poll");
        worker
            .process(&notification(&[], &["Group"]))
            .await
            .expect("group poll");
        worker
            .process(&notification(&[], &["Group"]))
            .await
            .expect("second group poll");

        let received = server.received_requests().await.expect("recording enabled");
        assert_eq!(received.len(), 3);
        assert!(!has_since(&received[0]), "first person poll is unbounded");
        assert!(!has_since(&received[1]), "first group poll is unbounded");
        assert!(has_since(&received[2]), "second group poll is bounded");
        assert_eq!(worker.last_deleted_poll.len(), 2);
    }

    #[tokio::test]
    async fn unpolled_type_in_mixed_notification_removes_bound() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/deletedEntities"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": {}})))
            .mount(&server)
            .await;

        let mut worker = worker(&server);
        worker
            .process(&notification(&[], &["Person"]))
            .await
            .expect("person poll");
        worker
            .process(&notification(&[], &["Person", "Room"]))
            .await
            .expect("mixed poll");

        let received = server.received_requests().await.expect("recording enabled");
        assert!(!has_since(&received[1]), "Room was never polled");
        assert!(worker.last_deleted_poll.contains_key("Room"));
    }

    #[test]
    fn bound_is_the_oldest_cursor_among_reported_types() {
        let client = Ss12000Client::new("https://api.example.se", Some("t"), 5).expect("client");
        let mut worker = Worker::new(client);
        let older = Utc::now() - chrono::Duration::hours(2);
        let newer = Utc::now();
        worker.last_deleted_poll.insert("Person".to_owned(), newer);
        worker.last_deleted_poll.insert("Group".to_owned(), older);

        let types = ["Person".to_owned(), "Group".to_owned()];
        assert_eq!(worker.poll_bound(&types), Some(older));
        assert_eq!(worker.poll_bound(&types[..1]), Some(newer));
        assert_eq!(worker.poll_bound(&["Room".to_owned()]), None);
    }
}
