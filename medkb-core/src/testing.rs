//! Scripted transport shared by unit and integration tests
//!
//! Requests are answered by the longest matching URL prefix. Unmatched
//! URLs get the fallback reply, or a transport error when none is set.
//! Enabled for this crate's own tests and behind the `test-util` feature.

use async_trait::async_trait;
use std::sync::Mutex;

use crate::error::FetchError;
use crate::transport::{HttpResponse, Transport};

/// Canned outcome of one request
#[derive(Debug, Clone)]
pub enum Reply {
    /// A response with this status and body
    Body(u16, String),
    Timeout,
    Refused,
}

impl Reply {
    pub fn status(status: u16, body: &str) -> Self {
        Reply::Body(status, body.to_string())
    }
}

#[derive(Debug, Default)]
pub struct ScriptedTransport {
    routes: Vec<(String, Reply)>,
    fallback: Option<Reply>,
    requests: Mutex<Vec<String>>,
}

impl ScriptedTransport {
    /// No routes; every request fails until routes are added
    pub fn new() -> Self {
        Self::default()
    }

    /// Every unrouted request gets the same reply
    pub fn always(reply: Reply) -> Self {
        Self {
            fallback: Some(reply),
            ..Self::default()
        }
    }

    /// Every unrouted request gets a 200 with this body
    pub fn body(body: &str) -> Self {
        Self::always(Reply::status(200, body))
    }

    /// Every unrouted request gets an empty response with this status
    pub fn status(status: u16) -> Self {
        Self::always(Reply::status(status, ""))
    }

    pub fn route(mut self, prefix: &str, reply: Reply) -> Self {
        self.routes.push((prefix.to_string(), reply));
        self
    }

    /// Route a 200 response
    pub fn ok(self, prefix: &str, body: &str) -> Self {
        self.route(prefix, Reply::status(200, body))
    }

    /// URLs requested so far, in order
    pub fn requests(&self) -> Vec<String> {
        self.requests
            .lock()
            .map(|requests| requests.clone())
            .unwrap_or_default()
    }

    fn reply_for(&self, url: &str) -> Option<&Reply> {
        self.routes
            .iter()
            .filter(|(prefix, _)| url.starts_with(prefix.as_str()))
            .max_by_key(|(prefix, _)| prefix.len())
            .map(|(_, reply)| reply)
            .or(self.fallback.as_ref())
    }
}

#[async_trait]
impl Transport for ScriptedTransport {
    async fn get(&self, url: &str) -> Result<HttpResponse, FetchError> {
        if let Ok(mut requests) = self.requests.lock() {
            requests.push(url.to_string());
        }

        match self.reply_for(url) {
            Some(Reply::Body(status, body)) => Ok(HttpResponse::new(url, *status, body.clone())),
            Some(Reply::Timeout) => Err(FetchError::Timeout(format!(
                "operation timed out for url ({url})"
            ))),
            Some(Reply::Refused) => Err(FetchError::Transport(format!(
                "error sending request for url ({url}): connection refused"
            ))),
            None => Err(FetchError::Transport(format!("no route to {url}"))),
        }
    }

    fn name(&self) -> &'static str {
        "scripted"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_longest_prefix_wins() {
        let http = ScriptedTransport::status(404)
            .ok("https://a.example/", "short")
            .ok("https://a.example/deep/", "long");

        assert_eq!(http.get("https://a.example/deep/x").await.unwrap().body, "long");
        assert_eq!(http.get("https://a.example/x").await.unwrap().body, "short");
        assert_eq!(http.get("https://b.example/").await.unwrap().status, 404);
        assert_eq!(http.requests().len(), 3);
    }

    #[tokio::test]
    async fn test_unrouted_without_fallback_fails() {
        let err = ScriptedTransport::new()
            .get("https://a.example/")
            .await
            .unwrap_err();
        assert!(err.to_string().contains("no route to https://a.example/"));
    }
}
