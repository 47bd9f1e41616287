//! `list` and `fetch` commands

use anyhow::Result;
use serde::Serialize;
use tabled::{
    settings::{object::Rows, Alignment, Modify, Style},
    Table, Tabled,
};

use medkb_core::connectors::{ConnectorKind, Registry};
use medkb_core::transport::Transport;

#[derive(Tabled, Serialize)]
struct ConnectorRow {
    #[tabled(rename = "#")]
    position: usize,
    #[tabled(rename = "Slug")]
    slug: &'static str,
    #[tabled(rename = "Kind")]
    kind: ConnectorKind,
    #[tabled(rename = "Source")]
    key: &'static str,
}

fn rows(registry: &Registry) -> Vec<ConnectorRow> {
    registry
        .iter()
        .enumerate()
        .map(|(i, connector)| ConnectorRow {
            position: i + 1,
            slug: connector.slug(),
            kind: connector.kind(),
            key: connector.key(),
        })
        .collect()
}

/// Print registered connectors in resolution order
pub fn list(registry: &Registry, json: bool) -> Result<()> {
    let table_rows = rows(registry);

    if json {
        println!("{}", serde_json::to_string_pretty(&table_rows)?);
        return Ok(());
    }

    let table = Table::new(&table_rows)
        .with(Style::rounded())
        .with(Modify::new(Rows::first()).with(Alignment::center()))
        .to_string();

    println!("{table}");
    println!("\n{} connectors registered", table_rows.len());
    Ok(())
}

/// Resolve a name and print the example; an exact slug is tried first
pub async fn fetch(
    registry: &Registry,
    http: &dyn Transport,
    name: &str,
    json: bool,
) -> Result<()> {
    let example = match registry.by_slug(name) {
        Some(connector) => medkb_core::connectors::invoke(connector, http).await,
        None => registry.lookup(name, http).await,
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&example)?);
    } else {
        println!("{}", example.text);
    }
    Ok(())
}
