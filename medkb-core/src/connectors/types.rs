//! Connector types - what a connector produces and how it is classified

use serde::Serialize;
use std::fmt;

/// Text for a call that succeeded but returned an empty result set
pub const NO_DATA: &str = "call succeeded, no data returned";

/// Prefix of every failure text, followed by `": "` and the error description
pub const FAILURE_MARKER: &str = "call failed";

/// Text written when no registered key matches a catalog name
pub const NO_CONNECTOR: &str = "no connector found for this source";

/// How a connector obtains its example
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ConnectorKind {
    /// Queries a public HTTP endpoint
    Api,
    /// No public API; returns a hand-authored advisory
    Static,
}

impl fmt::Display for ConnectorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConnectorKind::Api => write!(f, "api"),
            ConnectorKind::Static => write!(f, "static"),
        }
    }
}

/// Successful result of a connector's fetch routine
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Fetched {
    /// A rendered report
    Report(String),
    /// The source answered with an empty result list
    NoData,
}

/// Classification of a knowledge example
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Outcome {
    Fetched,
    Static,
    Empty,
    Failed,
    Unresolved,
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Outcome::Fetched => "fetched",
            Outcome::Static => "static",
            Outcome::Empty => "empty",
            Outcome::Failed => "failed",
            Outcome::Unresolved => "unresolved",
        };
        f.write_str(label)
    }
}

/// The output of one connector invocation
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct KnowledgeExample {
    /// Canonical key of the connector that produced it, if any
    pub source: Option<String>,

    /// What kind of text this is
    pub outcome: Outcome,

    /// The text written to the output column
    pub text: String,
}

impl KnowledgeExample {
    /// Placeholder for a name no connector matched
    pub fn unresolved() -> Self {
        Self {
            source: None,
            outcome: Outcome::Unresolved,
            text: NO_CONNECTOR.to_string(),
        }
    }

    /// Failure text embedding the error description
    pub fn failed(source: &str, error: &dyn fmt::Display) -> Self {
        Self {
            source: Some(source.to_string()),
            outcome: Outcome::Failed,
            text: format!("{FAILURE_MARKER}: {error}"),
        }
    }

    /// Empty-result placeholder
    pub fn empty(source: &str) -> Self {
        Self {
            source: Some(source.to_string()),
            outcome: Outcome::Empty,
            text: NO_DATA.to_string(),
        }
    }

    /// First `lines` lines of the text, for progress output
    pub fn preview(&self, lines: usize) -> String {
        self.text.lines().take(lines).collect::<Vec<_>>().join("\n")
    }
}
