//! WHO Global Health Observatory, Athena API
//!
//! Life expectancy at birth (`WHOSIS_000001`) for China, 2020.

use async_trait::async_trait;
use serde_json::Value;
use std::collections::HashMap;

use super::connector::Connector;
use super::report::Report;
use super::types::Fetched;
use crate::error::FetchError;
use crate::transport::{get_json, Transport};
use crate::tree::{self, ABSENT};

pub const KEY: &str = "WHO GHO OData API & Athena API（世界卫生组织）";

const ENDPOINT: &str = "http://apps.who.int/gho/athena/api/GHO/WHOSIS_000001";
const QUERY_URL: &str =
    "http://apps.who.int/gho/athena/api/GHO/WHOSIS_000001.json?filter=COUNTRY:CHN;YEAR:2020";

pub struct WhoGho;

#[async_trait]
impl Connector for WhoGho {
    fn key(&self) -> &'static str {
        KEY
    }

    fn slug(&self) -> &'static str {
        "who-gho"
    }

    async fn fetch(&self, http: &dyn Transport) -> Result<Fetched, FetchError> {
        let data = get_json(http, QUERY_URL).await?;
        Ok(render(&data))
    }
}

fn render(data: &Value) -> Fetched {
    let Some(fact) = tree::first(data, "/fact") else {
        return Fetched::NoData;
    };

    // `dim` is a list of {category, code}; index it by category
    let dims: HashMap<String, String> = tree::list(fact, "/dim")
        .iter()
        .filter_map(|d| Some((tree::opt_text(d, "/category")?, tree::opt_text(d, "/code")?)))
        .collect();
    let dim = |category: &str| {
        dims.get(category)
            .cloned()
            .unwrap_or_else(|| ABSENT.to_string())
    };

    let report = Report::new("WHO GHO Global Health Statistics")
        .field("Indicator", "Life expectancy at birth (years)")
        .field("Country", format!("{} ({})", dim("COUNTRY"), dim("REGION")))
        .field("Year", dim("YEAR"))
        .field("Sex", dim("SEX"))
        .field("Value", format!("{} years", tree::text(fact, "/value/display")))
        .field("Source", "WHO Global Health Observatory (GHO)")
        .field("Endpoint", ENDPOINT);

    Fetched::Report(report.render())
}
