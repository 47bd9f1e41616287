use thiserror::Error;

/// Failures raised inside a connector.
///
/// These never leave the connector boundary: the registry renders them
/// into the knowledge example text.
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("request timed out: {0}")]
    Timeout(String),

    #[error("transport error: {0}")]
    Transport(String),

    #[error("HTTP {status} from {url}")]
    Status { status: u16, url: String },

    #[error("malformed JSON payload: {0}")]
    Json(#[from] serde_json::Error),

    #[error("malformed XML payload: {0}")]
    Xml(String),
}

impl From<quick_xml::Error> for FetchError {
    fn from(err: quick_xml::Error) -> Self {
        FetchError::Xml(err.to_string())
    }
}

/// Errors that cross the library boundary: file I/O and setup.
#[derive(Error, Debug)]
pub enum MedkbError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON serialization error: {0}")]
    JsonSerialization(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml_ng::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Catalog error: {0}")]
    Catalog(String),

    #[error("HTTP client error: {0}")]
    HttpClient(String),
}

pub type Result<T> = std::result::Result<T, MedkbError>;
