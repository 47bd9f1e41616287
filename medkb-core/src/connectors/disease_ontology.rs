//! Disease Ontology metadata API - DOID:9351 (diabetes mellitus)

use async_trait::async_trait;
use serde_json::Value;

use super::connector::Connector;
use super::report::Report;
use super::types::Fetched;
use crate::error::FetchError;
use crate::text::join;
use crate::transport::{get_json, Transport};
use crate::tree;

pub const KEY: &str = "Disease Ontology（DO / DO‑KB）美国华盛顿大学";

const QUERY_URL: &str = "https://www.disease-ontology.org/api/metadata/DOID:9351";

pub struct DiseaseOntology;

#[async_trait]
impl Connector for DiseaseOntology {
    fn key(&self) -> &'static str {
        KEY
    }

    fn slug(&self) -> &'static str {
        "disease-ontology"
    }

    async fn fetch(&self, http: &dyn Transport) -> Result<Fetched, FetchError> {
        let data = get_json(http, QUERY_URL).await?;
        Ok(render(&data))
    }
}

fn render(data: &Value) -> Fetched {
    // A single-term lookup; an empty object means the term was not found
    if data.as_object().map_or(true, |o| o.is_empty()) {
        return Fetched::NoData;
    }

    let doid = tree::text(data, "/doid");

    let report = Report::new("Disease Ontology Term")
        .field("DOID", doid.clone())
        .field("Name", tree::text(data, "/name"))
        .field("Definition", tree::text(data, "/definition"))
        .field("Synonyms", join(&tree::strings(data, "/synonyms", Some("val"), 5)))
        .field("Broader", join(&tree::strings(data, "/parents", Some("name"), 3)))
        .field("Narrower", join(&tree::strings(data, "/children", Some("name"), 5)))
        .field("Cross references", join(&tree::strings(data, "/xrefs", Some("val"), 5)))
        .field("Link", format!("https://disease-ontology.org/term/{doid}"));

    Fetched::Report(report.render())
}
