//! Connector trait - one fetch-and-normalize routine per data source

use async_trait::async_trait;
use tracing::{debug, warn};

use super::types::{ConnectorKind, Fetched, KnowledgeExample, Outcome};
use crate::error::FetchError;
use crate::transport::Transport;

/// Trait for knowledge-source connectors
///
/// Connectors are stateless. Each carries its own hardcoded query and
/// issues at most one primary request (plus one dependent request where
/// the source needs it) through the supplied transport.
#[async_trait]
pub trait Connector: Send + Sync {
    /// Canonical source name used for catalog matching
    fn key(&self) -> &'static str;

    /// Short identifier for the CLI
    fn slug(&self) -> &'static str;

    fn kind(&self) -> ConnectorKind {
        ConnectorKind::Api
    }

    /// Fetch and render one example.
    ///
    /// Errors are returned, not rendered; [`invoke`] turns them into text.
    async fn fetch(&self, http: &dyn Transport) -> Result<Fetched, FetchError>;
}

/// Run a connector and absorb every failure into the returned example
pub async fn invoke(connector: &dyn Connector, http: &dyn Transport) -> KnowledgeExample {
    let key = connector.key();
    debug!(
        "Invoking connector '{}' ({}) via {}",
        connector.slug(),
        connector.kind(),
        http.name()
    );

    match connector.fetch(http).await {
        Ok(Fetched::Report(text)) => KnowledgeExample {
            source: Some(key.to_string()),
            outcome: match connector.kind() {
                ConnectorKind::Api => Outcome::Fetched,
                ConnectorKind::Static => Outcome::Static,
            },
            text,
        },
        Ok(Fetched::NoData) => {
            debug!("Connector '{}' returned no data", connector.slug());
            KnowledgeExample::empty(key)
        }
        Err(e) => {
            warn!("Connector '{}' failed: {}", connector.slug(), e);
            KnowledgeExample::failed(key, &e)
        }
    }
}
