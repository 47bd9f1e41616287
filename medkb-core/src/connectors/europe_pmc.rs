//! Europe PMC REST search - first open-access cancer immunotherapy article

use async_trait::async_trait;
use serde_json::Value;

use super::connector::Connector;
use super::report::Report;
use super::types::Fetched;
use crate::error::FetchError;
use crate::text::truncate;
use crate::transport::{get_json, Transport};
use crate::tree::{self, ABSENT};

pub const KEY: &str = "Europe PMC";

const QUERY_URL: &str = "https://www.ebi.ac.uk/europepmc/webservices/rest/search?query=cancer+immunotherapy+AND+OPEN_ACCESS:y&format=json&pageSize=1&resultType=core";

const AUTHORS_BUDGET: usize = 100;
const ABSTRACT_BUDGET: usize = 500;

pub struct EuropePmc;

#[async_trait]
impl Connector for EuropePmc {
    fn key(&self) -> &'static str {
        KEY
    }

    fn slug(&self) -> &'static str {
        "europepmc"
    }

    async fn fetch(&self, http: &dyn Transport) -> Result<Fetched, FetchError> {
        let data = get_json(http, QUERY_URL).await?;
        Ok(render(&data))
    }
}

fn render(data: &Value) -> Fetched {
    let Some(article) = tree::first(data, "/resultList/result") else {
        return Fetched::NoData;
    };
    let clipped = |pointer: &str, budget: usize| match tree::opt_text(article, pointer) {
        Some(text) => truncate(&text, budget),
        None => ABSENT.to_string(),
    };

    let pmcid = tree::text(article, "/pmcid");

    let report = Report::new("Europe PMC Open Access Article")
        .field("PMID", tree::text(article, "/pmid"))
        .field("PMCID", pmcid.clone())
        .field("DOI", tree::text(article, "/doi"))
        .field("Title", tree::text(article, "/title"))
        .field("Authors", clipped("/authorString", AUTHORS_BUDGET))
        .field("Journal", tree::text(article, "/journalTitle"))
        .field("Year", tree::text(article, "/pubYear"))
        .field("Cited by", tree::text_or(article, "/citedByCount", "0"))
        .field("Abstract", clipped("/abstractText", ABSTRACT_BUDGET))
        .field("Full text", format!("https://europepmc.org/article/PMC/{pmcid}"));

    Fetched::Report(report.render())
}
