//! openFDA drug label API - first aspirin label

use async_trait::async_trait;
use serde_json::Value;

use super::connector::Connector;
use super::report::Report;
use super::types::Fetched;
use crate::error::FetchError;
use crate::text::truncate;
use crate::transport::{get_json, Transport};
use crate::tree::{self, ABSENT};

pub const KEY: &str = "openFDA（美国 FDA）";

const QUERY_URL: &str = "https://api.fda.gov/drug/label.json?search=openfda.brand_name:aspirin&limit=1";

pub struct OpenFda;

#[async_trait]
impl Connector for OpenFda {
    fn key(&self) -> &'static str {
        KEY
    }

    fn slug(&self) -> &'static str {
        "openfda"
    }

    async fn fetch(&self, http: &dyn Transport) -> Result<Fetched, FetchError> {
        let data = get_json(http, QUERY_URL).await?;
        Ok(render(&data))
    }
}

/// First entry of a label section (sections are arrays of paragraphs), cut to `budget`
fn section(drug: &Value, name: &str, budget: usize) -> String {
    match tree::opt_text(drug, &format!("/{name}/0")) {
        Some(text) => truncate(&text, budget),
        None => ABSENT.to_string(),
    }
}

fn render(data: &Value) -> Fetched {
    let Some(drug) = tree::first(data, "/results") else {
        return Fetched::NoData;
    };
    let openfda = tree::node(drug, "/openfda");

    let report = Report::new("openFDA Drug Label")
        .field("Brand name", tree::text(openfda, "/brand_name/0"))
        .field("Generic name", tree::text(openfda, "/generic_name/0"))
        .field("Manufacturer", tree::text(openfda, "/manufacturer_name/0"))
        .field("Route", tree::text(openfda, "/route/0"))
        .field("Product type", tree::text(openfda, "/product_type/0"))
        .field("Purpose", section(drug, "purpose", 200))
        .field("Indications", section(drug, "indications_and_usage", 300))
        .field("Warnings", section(drug, "warnings", 300))
        .field("Dosage", section(drug, "dosage_and_administration", 200))
        .field("Source", "US FDA drug label database");

    Fetched::Report(report.render())
}
