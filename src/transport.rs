//! Network boundary for the contact form.
//!
//! One request per submission: `POST` to the form's endpoint with the
//! form-encoded fields, asking for JSON back. Success is decided by the
//! status code alone.

use async_trait::async_trait;
use reqwest::header::ACCEPT;
use std::collections::VecDeque;
use std::sync::{Mutex, MutexGuard, PoisonError};
use thiserror::Error;
use tracing::debug;

#[derive(Error, Debug)]
pub enum TransportError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("network error: {0}")]
    Network(String),
}

/// What came back from the endpoint.
#[derive(Debug, Clone, PartialEq)]
pub struct SubmitResponse {
    pub status: u16,
    /// Parsed JSON body, when the endpoint returned one.
    pub body: Option<serde_json::Value>,
}

impl SubmitResponse {
    /// The response's OK flag: any 2xx status.
    pub fn ok(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

#[async_trait]
pub trait Transport: Send + Sync {
    async fn post_form(
        &self,
        endpoint: &str,
        fields: &[(String, String)],
    ) -> Result<SubmitResponse, TransportError>;
}

/// Real HTTP transport.
#[derive(Debug, Clone, Default)]
pub struct HttpTransport {
    client: reqwest::Client,
}

impl HttpTransport {
    pub fn new(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn post_form(
        &self,
        endpoint: &str,
        fields: &[(String, String)],
    ) -> Result<SubmitResponse, TransportError> {
        let response = self
            .client
            .post(endpoint)
            .header(ACCEPT, "application/json")
            .form(fields)
            .send()
            .await?;
        let status = response.status().as_u16();
        // A body that isn't JSON is not a failure; the status decides.
        let body = response.json::<serde_json::Value>().await.ok();
        debug!(endpoint, status, "Form posted");
        Ok(SubmitResponse { status, body })
    }
}

/// Canned reply for [`ScriptedTransport`].
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScriptedReply {
    Status(u16),
    NetworkError(String),
}

impl Default for ScriptedReply {
    fn default() -> Self {
        ScriptedReply::Status(200)
    }
}

/// Answers submissions from a queue of canned replies; an empty queue
/// answers `200`.
#[derive(Debug, Default)]
pub struct ScriptedTransport {
    replies: Mutex<VecDeque<ScriptedReply>>,
    requests: Mutex<Vec<(String, Vec<(String, String)>)>>,
}

impl ScriptedTransport {
    pub fn new(replies: impl IntoIterator<Item = ScriptedReply>) -> Self {
        Self {
            replies: Mutex::new(replies.into_iter().collect()),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Queue another reply.
    pub fn push(&self, reply: ScriptedReply) {
        self.replies().push_back(reply);
    }

    /// Every request seen so far, as `(endpoint, fields)`.
    pub fn requests(&self) -> Vec<(String, Vec<(String, String)>)> {
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    // A panic while holding the lock leaves the queue intact.
    fn replies(&self) -> MutexGuard<'_, VecDeque<ScriptedReply>> {
        self.replies.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[async_trait]
impl Transport for ScriptedTransport {
    async fn post_form(
        &self,
        endpoint: &str,
        fields: &[(String, String)],
    ) -> Result<SubmitResponse, TransportError> {
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push((endpoint.to_string(), fields.to_vec()));
        let reply = self.replies().pop_front().unwrap_or_default();
        match reply {
            ScriptedReply::Status(status) => Ok(SubmitResponse {
                status,
                body: Some(serde_json::json!({ "ok": (200..300).contains(&status) })),
            }),
            ScriptedReply::NetworkError(msg) => Err(TransportError::Network(msg)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ok_is_any_2xx() {
        let r = |status| SubmitResponse { status, body: None };
        assert!(r(200).ok());
        assert!(r(204).ok());
        assert!(!r(302).ok());
        assert!(!r(422).ok());
        assert!(!r(500).ok());
    }

    #[tokio::test]
    async fn scripted_replies_in_order_then_default() {
        let t = ScriptedTransport::new([
            ScriptedReply::Status(500),
            ScriptedReply::NetworkError("offline".into()),
        ]);
        let fields = vec![("name".to_string(), "Ada".to_string())];

        let first = t.post_form("/contact", &fields).await.unwrap();
        assert!(!first.ok());
        assert!(t.post_form("/contact", &fields).await.is_err());
        assert!(t.post_form("/contact", &fields).await.unwrap().ok());

        let requests = t.requests();
        assert_eq!(requests.len(), 3);
        assert_eq!(requests[0].0, "/contact");
        assert_eq!(requests[0].1, fields);
    }

    #[tokio::test]
    async fn poisoned_queues_keep_their_contents() {
        let t = ScriptedTransport::default();
        let _ = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            let _replies = t.replies.lock().unwrap();
            let _requests = t.requests.lock().unwrap();
            panic!("holder panicked");
        }));
        assert!(t.replies.is_poisoned());
        assert!(t.requests.is_poisoned());

        t.push(ScriptedReply::NetworkError("offline".into()));
        let result = t.post_form("/contact", &[]).await;
        assert!(matches!(result, Err(TransportError::Network(_))));
        assert_eq!(t.requests().len(), 1);
    }
}
