//! Knowledge-source connectors
//!
//! Each public medical data source has one connector that fetches a single
//! representative example and renders it as a labeled text block. The
//! [`Registry`] maps loosely matched catalog names to connectors.
//!
//! # Failure model
//!
//! ```text
//! catalog name ──resolve──▶ connector ──fetch──▶ Ok(Report)  → report text
//!      │                                  ├────▶ Ok(NoData)  → NO_DATA
//!      │                                  └────▶ Err(e)      → "call failed: {e}"
//!      └── no match ──────────────────────────────────────▶ NO_CONNECTOR
//! ```
//!
//! Nothing past [`Registry::lookup`] is an error: every path ends in text.

mod advisory;
mod clinical_trials;
mod connector;
mod disease_ontology;
mod europe_pmc;
mod openfda;
mod pubchem;
mod pubmed;
mod registry;
mod report;
mod types;
mod who_gho;

pub use advisory::StaticConnector;
pub use connector::{invoke, Connector};
pub use registry::Registry;
pub use report::Report;
pub use types::{
    ConnectorKind, Fetched, KnowledgeExample, Outcome, FAILURE_MARKER, NO_CONNECTOR, NO_DATA,
};
