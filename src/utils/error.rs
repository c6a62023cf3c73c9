// src/utils/error.rs
use thiserror::Error;

// Transport-level failures talking to EDGAR
#[derive(Error, Debug)]
pub enum EdgarError {
    #[error("Network request to {url} failed: {source}")]
    Network {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("HTTP error {status} for {url}")]
    Http { url: String, status: reqwest::StatusCode },

    #[error("SEC rate limit likely exceeded (403 Forbidden) for {0}")]
    RateLimited(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid URL '{0}'")]
    InvalidUrl(String),

    #[error("Failed to build HTTP client: {0}")]
    Client(reqwest::Error),
}


// Expected markup structure absent or malformed
#[derive(Error, Debug)]
pub enum ExtractError {
    #[error("No {0} table found")]
    TableNotFound(&'static str),

    #[error("Row is missing the {0} cell")]
    MissingCell(&'static str),

    #[error("Unparsable filing date '{text}': {source}")]
    InvalidDate {
        text: String,
        #[source]
        source: chrono::ParseError,
    },

    #[error("Malformed XML: {0}")]
    MalformedXml(String),
}

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("EDGAR interaction failed: {0}")]
    Edgar(#[from] EdgarError),

    #[error("Extraction failed: {0}")]
    Extraction(#[from] ExtractError),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
}
