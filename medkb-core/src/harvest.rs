//! Harvest driver
//!
//! Reads a catalog of knowledge sources, resolves each row's source name to
//! a connector, and appends the resulting knowledge example as a new
//! column. Rows are processed one at a time, in file order, with a fixed
//! pause after each connector invocation.

use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;
use std::io::{Read, Write};
use std::path::Path;
use std::time::Duration;
use tracing::{debug, info};

use crate::config::ClientConfig;
use crate::connectors::{Outcome, Registry};
use crate::error::{MedkbError, Result};
use crate::transport::Transport;

/// Header of the appended column unless overridden
pub const DEFAULT_COLUMN_HEADER: &str = "knowledge_example";

/// Zero-based index of the source-name column in the stock catalog
pub const DEFAULT_NAME_INDEX: usize = 1;

/// Which column holds the source name
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NameColumn {
    /// Match a (normalized) header exactly
    Header(String),
    /// Zero-based position
    Index(usize),
}

impl Default for NameColumn {
    fn default() -> Self {
        NameColumn::Index(DEFAULT_NAME_INDEX)
    }
}

impl fmt::Display for NameColumn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NameColumn::Header(name) => write!(f, "header '{name}'"),
            NameColumn::Index(index) => write!(f, "column #{index}"),
        }
    }
}

/// Spreadsheet exports often carry line breaks inside header cells
fn normalize_header(header: &str) -> String {
    header.replace(['\r', '\n'], " ").trim().to_string()
}

/// A tabular catalog: one header row plus data rows
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalog {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl Catalog {
    pub fn new(headers: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        Self {
            headers: headers.iter().map(|h| normalize_header(h)).collect(),
            rows,
        }
    }

    /// Read CSV with a header row. Ragged rows are accepted as-is.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(reader);

        let headers: Vec<String> = reader.headers()?.iter().map(String::from).collect();
        let rows = reader
            .records()
            .map(|record| record.map(|r| r.iter().map(String::from).collect()))
            .collect::<std::result::Result<Vec<Vec<String>>, csv::Error>>()?;

        Ok(Self::new(headers, rows))
    }

    pub fn read(path: &Path) -> Result<Self> {
        let file = std::fs::File::open(path)?;
        let catalog = Self::from_reader(file)?;
        debug!(
            "Read catalog {} ({} columns, {} rows)",
            path.display(),
            catalog.headers.len(),
            catalog.rows.len()
        );
        Ok(catalog)
    }

    pub fn to_writer<W: Write>(&self, writer: W) -> Result<()> {
        let mut writer = csv::WriterBuilder::new()
            .flexible(true)
            .from_writer(writer);
        writer.write_record(&self.headers)?;
        for row in &self.rows {
            writer.write_record(row)?;
        }
        writer.flush()?;
        Ok(())
    }

    pub fn write(&self, path: &Path) -> Result<()> {
        let file = std::fs::File::create(path)?;
        self.to_writer(file)
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Position of the requested column
    pub fn column_index(&self, column: &NameColumn) -> Result<usize> {
        match column {
            NameColumn::Header(name) => {
                let wanted = normalize_header(name);
                self.headers
                    .iter()
                    .position(|h| *h == wanted)
                    .ok_or_else(|| {
                        MedkbError::Catalog(format!(
                            "No column named '{wanted}'; available: {}",
                            self.headers.join(", ")
                        ))
                    })
            }
            NameColumn::Index(index) if *index < self.headers.len() => Ok(*index),
            NameColumn::Index(index) => Err(MedkbError::Catalog(format!(
                "Column index {index} is out of range; the catalog has {} columns",
                self.headers.len()
            ))),
        }
    }

    /// Cell values of one column; short rows contribute an empty name
    pub fn names(&self, column: &NameColumn) -> Result<Vec<String>> {
        let index = self.column_index(column)?;
        Ok(self
            .rows
            .iter()
            .map(|row| row.get(index).cloned().unwrap_or_default())
            .collect())
    }

    /// Append one column. Short rows are padded so the new cell lines up
    /// under its header.
    pub fn append_column(&mut self, header: &str, values: Vec<String>) -> Result<()> {
        if values.len() != self.rows.len() {
            return Err(MedkbError::Catalog(format!(
                "Column '{header}' has {} values for {} rows",
                values.len(),
                self.rows.len()
            )));
        }

        let width = self.headers.len();
        self.headers.push(normalize_header(header));
        for (row, value) in self.rows.iter_mut().zip(values) {
            if row.len() < width {
                row.resize(width, String::new());
            }
            row.push(value);
        }
        Ok(())
    }
}

/// Knobs for one harvest run
#[derive(Debug, Clone)]
pub struct HarvestOptions {
    pub name_column: NameColumn,
    pub column_header: String,
    /// Pause after each connector invocation; zero disables it
    pub pacing: Duration,
}

impl Default for HarvestOptions {
    fn default() -> Self {
        Self::from_config(&ClientConfig::default())
    }
}

impl HarvestOptions {
    pub fn from_config(config: &ClientConfig) -> Self {
        Self {
            name_column: NameColumn::default(),
            column_header: DEFAULT_COLUMN_HEADER.to_string(),
            pacing: config.pacing(),
        }
    }
}

/// Per-outcome row counts of a finished run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct HarvestSummary {
    pub rows: usize,
    counts: BTreeMap<Outcome, usize>,
}

impl HarvestSummary {
    fn record(&mut self, outcome: Outcome) {
        self.rows += 1;
        *self.counts.entry(outcome).or_insert(0) += 1;
    }

    pub fn count(&self, outcome: Outcome) -> usize {
        self.counts.get(&outcome).copied().unwrap_or(0)
    }
}

impl fmt::Display for HarvestSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} rows: {} fetched, {} static, {} empty, {} failed, {} unresolved",
            self.rows,
            self.count(Outcome::Fetched),
            self.count(Outcome::Static),
            self.count(Outcome::Empty),
            self.count(Outcome::Failed),
            self.count(Outcome::Unresolved)
        )
    }
}

/// Fill the knowledge column of a catalog in place.
///
/// Connector failures never abort the run; only a missing name column does.
pub async fn harvest(
    registry: &Registry,
    http: &dyn Transport,
    catalog: &mut Catalog,
    options: &HarvestOptions,
) -> Result<HarvestSummary> {
    let names = catalog.names(&options.name_column)?;
    let total = names.len();
    let mut summary = HarvestSummary::default();
    let mut column = Vec::with_capacity(total);

    info!(
        "Harvesting {} rows via {} transport ({})",
        total,
        http.name(),
        options.name_column
    );

    for (i, name) in names.iter().enumerate() {
        let example = registry.lookup(name, http).await;
        info!("[{}/{}] {} -> {}", i + 1, total, name.trim(), example.outcome);
        debug!("{}", example.preview(3));

        summary.record(example.outcome);
        let invoked = example.outcome != Outcome::Unresolved;
        column.push(example.text);

        if invoked && !options.pacing.is_zero() {
            tokio::time::sleep(options.pacing).await;
        }
    }

    catalog.append_column(&options.column_header, column)?;
    Ok(summary)
}

/// Read `input`, harvest, and write the extended catalog to `output`
pub async fn harvest_file(
    registry: &Registry,
    http: &dyn Transport,
    input: &Path,
    output: &Path,
    options: &HarvestOptions,
) -> Result<HarvestSummary> {
    let mut catalog = Catalog::read(input)?;
    let summary = harvest(registry, http, &mut catalog, options).await?;
    catalog.write(output)?;
    info!("Wrote {} ({})", output.display(), summary);
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::connectors::{StaticConnector, FAILURE_MARKER, NO_CONNECTOR};
    use crate::transport::OfflineTransport;
    use pretty_assertions::assert_eq;

    const CSV: &str = "id,\"source\nname\",notes\n1,Alpha,first\n2,Unknown Source,second\n3,Beta Registry,third\n";

    fn quiet() -> HarvestOptions {
        HarvestOptions {
            pacing: Duration::ZERO,
            ..Default::default()
        }
    }

    fn registry() -> Registry {
        Registry::from_connectors(vec![
            Box::new(StaticConnector::new("Alpha", "alpha", "[Alpha]\nAccess: none")),
            Box::new(StaticConnector::new("Beta", "beta", "[Beta]\nAccess: none")),
        ])
    }

    #[test]
    fn test_headers_are_normalized() {
        let catalog = Catalog::from_reader(CSV.as_bytes()).unwrap();
        assert_eq!(catalog.headers(), &["id", "source name", "notes"]);
        assert_eq!(catalog.len(), 3);
    }

    #[test]
    fn test_column_selection() {
        let catalog = Catalog::from_reader(CSV.as_bytes()).unwrap();
        let by_index = catalog.names(&NameColumn::default()).unwrap();
        let by_header = catalog
            .names(&NameColumn::Header("source\nname".to_string()))
            .unwrap();
        assert_eq!(by_index, vec!["Alpha", "Unknown Source", "Beta Registry"]);
        assert_eq!(by_index, by_header);

        assert!(matches!(
            catalog.names(&NameColumn::Index(9)),
            Err(MedkbError::Catalog(_))
        ));
        assert!(matches!(
            catalog.names(&NameColumn::Header("missing".to_string())),
            Err(MedkbError::Catalog(_))
        ));
    }

    #[test]
    fn test_summary_serializes_counts_by_outcome() {
        let mut summary = HarvestSummary::default();
        summary.record(Outcome::Static);
        summary.record(Outcome::Failed);
        summary.record(Outcome::Static);

        assert_eq!(
            serde_json::to_value(&summary).unwrap(),
            serde_json::json!({"rows": 3, "counts": {"static": 2, "failed": 1}})
        );
    }

    #[test]
    fn test_append_column_pads_short_rows() {
        let mut catalog = Catalog::new(
            vec!["a".into(), "b".into()],
            vec![vec!["1".into()], vec!["2".into(), "x".into()]],
        );
        catalog
            .append_column("k", vec!["p".into(), "q".into()])
            .unwrap();
        assert_eq!(catalog.rows()[0], vec!["1", "", "p"]);
        assert_eq!(catalog.rows()[1], vec!["2", "x", "q"]);

        assert!(catalog.append_column("k2", vec![]).is_err());
    }

    #[tokio::test]
    async fn test_harvest_appends_one_column_in_order() {
        let mut catalog = Catalog::from_reader(CSV.as_bytes()).unwrap();
        let summary = harvest(&registry(), &OfflineTransport, &mut catalog, &quiet())
            .await
            .unwrap();

        assert_eq!(catalog.headers().last().unwrap(), DEFAULT_COLUMN_HEADER);
        let column: Vec<&str> = catalog.rows().iter().map(|r| r[3].as_str()).collect();
        assert_eq!(
            column,
            vec!["[Alpha]\nAccess: none", NO_CONNECTOR, "[Beta]\nAccess: none"]
        );
        assert_eq!(catalog.rows()[1][2], "second");

        assert_eq!(summary.rows, 3);
        assert_eq!(summary.count(Outcome::Static), 2);
        assert_eq!(summary.count(Outcome::Unresolved), 1);
        assert_eq!(summary.count(Outcome::Failed), 0);
    }

    #[tokio::test]
    async fn test_harvest_offline_api_rows_fail_softly() {
        let mut catalog = Catalog::new(
            vec!["name".into()],
            vec![vec!["Europe PMC".into()], vec!["DrugCentral".into()]],
        );
        let options = HarvestOptions {
            name_column: NameColumn::Index(0),
            column_header: "example".to_string(),
            pacing: Duration::ZERO,
        };

        let summary = harvest(&Registry::standard(), &OfflineTransport, &mut catalog, &options)
            .await
            .unwrap();

        assert!(catalog.rows()[0][1].starts_with(FAILURE_MARKER));
        assert!(catalog.rows()[1][1].starts_with("[DrugCentral"));
        assert_eq!(summary.count(Outcome::Failed), 1);
        assert_eq!(summary.count(Outcome::Static), 1);
        assert_eq!(
            summary.to_string(),
            "2 rows: 0 fetched, 1 static, 0 empty, 1 failed, 0 unresolved"
        );
    }

    #[tokio::test]
    async fn test_harvest_file_round_trip() {
        let dir = tempfile::TempDir::new().unwrap();
        let input = dir.path().join("catalog.csv");
        let output = dir.path().join("catalog_out.csv");
        std::fs::write(&input, CSV).unwrap();

        harvest_file(&registry(), &OfflineTransport, &input, &output, &quiet())
            .await
            .unwrap();

        let written = Catalog::read(&output).unwrap();
        assert_eq!(
            written.headers(),
            &["id", "source name", "notes", DEFAULT_COLUMN_HEADER]
        );
        assert_eq!(written.rows()[0][3], "[Alpha]\nAccess: none");
        assert_eq!(written.len(), 3);
    }

    #[tokio::test]
    async fn test_harvest_missing_input_is_io_error() {
        let dir = tempfile::TempDir::new().unwrap();
        let err = harvest_file(
            &registry(),
            &OfflineTransport,
            &dir.path().join("absent.csv"),
            &dir.path().join("out.csv"),
            &quiet(),
        )
        .await
        .unwrap_err();
        assert!(matches!(err, MedkbError::Io(_)));
    }
}
