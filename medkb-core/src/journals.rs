//! NLM journal list parser
//!
//! Reads the flat `J_Medline.txt`-style registry, where records are
//! separated by lines starting with `---` and fields are labeled lines:
//!
//! ```text
//! --------------------------------------------------------
//! JrId: 1
//! JournalTitle: AADE editors' journal
//! MedAbbr: AADE Ed J
//! ISSN (Print): 0160-6999
//! ISSN (Online):
//! --------------------------------------------------------
//! ```
//!
//! A record is emitted only with a non-empty title and a well-formed ISSN
//! (print preferred over online). Anything else is dropped silently.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;
use tracing::debug;

use crate::error::Result;

static ISSN_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d{4}-\d{3}[\dXx]$").expect("ISSN pattern is valid"));

const SEPARATOR: &str = "---";
const TITLE_LABEL: &str = "JournalTitle:";
const ABBR_LABEL: &str = "MedAbbr:";
const PRINT_ISSN_LABEL: &str = "ISSN (Print):";
const ONLINE_ISSN_LABEL: &str = "ISSN (Online):";

/// A validated journal entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JournalRecord {
    pub title: String,
    pub issn: String,
    pub abbr: String,
}

impl JournalRecord {
    /// `NNNN-NNNC` where C is a digit or X
    pub fn is_valid_issn(issn: &str) -> bool {
        ISSN_PATTERN.is_match(issn)
    }
}

/// Fields seen since the last separator
#[derive(Debug, Default)]
struct Pending {
    title: Option<String>,
    abbr: Option<String>,
    issn_print: Option<String>,
    issn_online: Option<String>,
}

impl Pending {
    /// Apply one trimmed line; unrecognised lines are ignored
    fn apply(&mut self, line: &str) {
        if let Some(value) = line.strip_prefix(TITLE_LABEL) {
            self.title = Some(value.trim().to_string());
        } else if let Some(value) = line.strip_prefix(ABBR_LABEL) {
            self.abbr = Some(value.trim().to_string());
        } else if let Some(value) = line.strip_prefix(PRINT_ISSN_LABEL) {
            if let Some(issn) = valid_issn(value) {
                self.issn_print = Some(issn);
            }
        } else if let Some(value) = line.strip_prefix(ONLINE_ISSN_LABEL) {
            if let Some(issn) = valid_issn(value) {
                self.issn_online = Some(issn);
            }
        }
    }

    /// Feed one raw line; a separator yields the finished record, if valid
    fn consume(&mut self, line: &str) -> Option<JournalRecord> {
        let line = line.trim();
        if line.starts_with(SEPARATOR) {
            self.finish()
        } else {
            self.apply(line);
            None
        }
    }

    /// Close the record, resetting the accumulator either way
    fn finish(&mut self) -> Option<JournalRecord> {
        let pending = std::mem::take(self);
        let title = pending.title.filter(|t| !t.is_empty())?;
        let issn = pending.issn_print.or(pending.issn_online)?;
        Some(JournalRecord {
            title,
            issn,
            abbr: pending.abbr.unwrap_or_default(),
        })
    }
}

/// Invalid ISSNs count as absent, so a bad value never replaces a good one
fn valid_issn(value: &str) -> Option<String> {
    let issn = value.trim();
    JournalRecord::is_valid_issn(issn).then(|| issn.to_string())
}

/// Parse records from a sequence of lines
pub fn parse_lines<I, S>(lines: I) -> Vec<JournalRecord>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut records = Vec::new();
    let mut pending = Pending::default();

    for line in lines {
        records.extend(pending.consume(line.as_ref()));
    }
    // End of input closes the last record
    records.extend(pending.finish());

    records
}

/// Parse records from a reader line by line; the first I/O error aborts
pub fn parse_reader<R: BufRead>(reader: R) -> Result<Vec<JournalRecord>> {
    let mut records = Vec::new();
    let mut pending = Pending::default();

    for line in reader.lines() {
        records.extend(pending.consume(&line?));
    }
    records.extend(pending.finish());

    Ok(records)
}

/// Parse a UTF-8 journal list file
pub fn parse_file(path: &Path) -> Result<Vec<JournalRecord>> {
    let file = File::open(path)?;
    let records = parse_reader(BufReader::new(file))?;
    debug!("Parsed {} journal records from {}", records.len(), path.display());
    Ok(records)
}

/// Write records as an indented JSON array, in discovery order
pub fn write_json(path: &Path, records: &[JournalRecord]) -> Result<()> {
    let mut writer = BufWriter::new(File::create(path)?);
    serde_json::to_writer_pretty(&mut writer, records)?;
    writer.write_all(b"\n")?;
    writer.flush()?;
    Ok(())
}
