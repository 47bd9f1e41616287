//! NCBI E-utilities / PubMed
//!
//! `esearch` (JSON) finds the most relevant PMID for a fixed query, then
//! `efetch` (XML) retrieves its abstract record.

use async_trait::async_trait;
use serde_json::Value;

use super::connector::Connector;
use super::report::Report;
use super::types::Fetched;
use crate::error::FetchError;
use crate::text::{join, truncate, ELLIPSIS};
use crate::transport::{get_json, get_text, Transport};
use crate::tree::{self, Element, ABSENT};

pub const KEY: &str = "NCBI Entrez Programming Utilities（E‑utilities）/ PubMed / PMC / Gene / Protein / Nuccore 等数据库";

const SEARCH_URL: &str = "https://eutils.ncbi.nlm.nih.gov/entrez/eutils/esearch.fcgi?db=pubmed&term=diabetes+treatment+2024&retmax=1&retmode=json&sort=relevance";
const FETCH_URL: &str = "https://eutils.ncbi.nlm.nih.gov/entrez/eutils/efetch.fcgi";

const ABSTRACT_BUDGET: usize = 500;
const MAX_AUTHORS: usize = 3;

pub struct PubMed;

#[async_trait]
impl Connector for PubMed {
    fn key(&self) -> &'static str {
        KEY
    }

    fn slug(&self) -> &'static str {
        "pubmed"
    }

    async fn fetch(&self, http: &dyn Transport) -> Result<Fetched, FetchError> {
        let search = get_json(http, SEARCH_URL).await?;
        let Some(pmid) = first_pmid(&search) else {
            return Ok(Fetched::NoData);
        };

        let url = format!("{FETCH_URL}?db=pubmed&id={pmid}&rettype=abstract&retmode=xml");
        let xml = get_text(http, &url).await?;
        render_article(&pmid, &xml)
    }
}

fn first_pmid(search: &Value) -> Option<String> {
    tree::first(search, "/esearchresult/idlist").and_then(tree::scalar)
}

fn render_article(pmid: &str, xml: &str) -> Result<Fetched, FetchError> {
    let root = Element::parse(xml)?;
    let Some(article) = root.find("PubmedArticle") else {
        return Ok(Fetched::NoData);
    };

    let element_text = |path: &str| {
        article
            .find(path)
            .map(Element::inner_text)
            .filter(|t| !t.is_empty())
            .unwrap_or_else(|| ABSENT.to_string())
    };

    let authors = article.find_all("Author");
    let names: Vec<String> = authors
        .iter()
        .take(MAX_AUTHORS)
        .filter_map(|author| {
            let last = author.child("LastName")?.text()?;
            let fore = author.child("ForeName")?.text()?;
            Some(format!("{last} {fore}"))
        })
        .collect();
    let more = if authors.len() > MAX_AUTHORS { ELLIPSIS } else { "" };

    let abstract_text = match element_text("AbstractText") {
        text if text == ABSENT => text,
        text => truncate(&text, ABSTRACT_BUDGET),
    };

    let report = Report::new("PubMed Literature")
        .field("PMID", pmid)
        .field("Title", element_text("ArticleTitle"))
        .field("Journal", element_text("Journal/Title"))
        .field("Year", element_text("PubDate/Year"))
        .field("Authors", format!("{}{more}", join(&names)))
        .field("Abstract", abstract_text)
        .field("Link", format!("https://pubmed.ncbi.nlm.nih.gov/{pmid}/"));

    Ok(Fetched::Report(report.render()))
}
