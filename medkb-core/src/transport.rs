//! HTTP transport abstraction
//!
//! Connectors talk to the network only through [`Transport`], so the
//! same connector code runs against:
//! - reqwest (live requests)
//! - offline (dry runs, every request fails without touching the network)
//! - scripted responses (tests)

use async_trait::async_trait;
use serde_json::Value;
use tracing::debug;

use crate::config::ClientConfig;
use crate::error::{FetchError, MedkbError, Result};

/// A fully read HTTP response
#[derive(Debug, Clone)]
pub struct HttpResponse {
    /// The requested URL
    pub url: String,

    /// Status code
    pub status: u16,

    /// Response body as text
    pub body: String,
}

impl HttpResponse {
    pub fn new(url: impl Into<String>, status: u16, body: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            status,
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Fail with [`FetchError::Status`] unless the status is 2xx
    pub fn ensure_success(self) -> std::result::Result<Self, FetchError> {
        if self.is_success() {
            Ok(self)
        } else {
            Err(FetchError::Status {
                status: self.status,
                url: self.url,
            })
        }
    }

    /// Parse the body as JSON
    pub fn json(&self) -> std::result::Result<Value, FetchError> {
        Ok(serde_json::from_str(&self.body)?)
    }
}

/// Trait for request transports
#[async_trait]
pub trait Transport: Send + Sync {
    /// Issue a GET request and read the whole body.
    ///
    /// Non-2xx statuses are returned as responses, not errors; callers
    /// decide what an unexpected status means.
    async fn get(&self, url: &str) -> std::result::Result<HttpResponse, FetchError>;

    /// Transport identifier for logging
    fn name(&self) -> &'static str;
}

/// GET a URL and parse a 2xx JSON body
pub async fn get_json(
    http: &dyn Transport,
    url: &str,
) -> std::result::Result<Value, FetchError> {
    http.get(url).await?.ensure_success()?.json()
}

/// GET a URL and return a 2xx body as text
pub async fn get_text(
    http: &dyn Transport,
    url: &str,
) -> std::result::Result<String, FetchError> {
    Ok(http.get(url).await?.ensure_success()?.body)
}

/// Live transport backed by a shared reqwest client
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    /// Build a client carrying the configured headers and timeout
    pub fn new(config: &ClientConfig) -> Result<Self> {
        let mut headers = reqwest::header::HeaderMap::new();
        let accept = reqwest::header::HeaderValue::from_str(&config.accept)
            .map_err(|e| MedkbError::Config(format!("Invalid accept header: {e}")))?;
        headers.insert(reqwest::header::ACCEPT, accept);

        let client = reqwest::Client::builder()
            .user_agent(config.user_agent.clone())
            .default_headers(headers)
            .timeout(config.timeout())
            .build()
            .map_err(|e| MedkbError::HttpClient(e.to_string()))?;

        Ok(Self { client })
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn get(&self, url: &str) -> std::result::Result<HttpResponse, FetchError> {
        debug!("GET {}", url);

        let response = self.client.get(url).send().await.map_err(classify)?;
        let status = response.status().as_u16();
        let body = response.text().await.map_err(classify)?;

        debug!("GET {} -> {} ({} bytes)", url, status, body.len());
        Ok(HttpResponse::new(url, status, body))
    }

    fn name(&self) -> &'static str {
        "reqwest"
    }
}

fn classify(err: reqwest::Error) -> FetchError {
    if err.is_timeout() {
        FetchError::Timeout(err.to_string())
    } else {
        FetchError::Transport(err.to_string())
    }
}

/// Dry-run transport: every request fails without any network I/O
#[derive(Debug, Default, Clone, Copy)]
pub struct OfflineTransport;

#[async_trait]
impl Transport for OfflineTransport {
    async fn get(&self, url: &str) -> std::result::Result<HttpResponse, FetchError> {
        debug!("dry run: skipping GET {}", url);
        Err(FetchError::Transport(format!(
            "dry run, request to {url} was skipped"
        )))
    }

    fn name(&self) -> &'static str {
        "offline"
    }
}
