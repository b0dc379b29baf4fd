//! Error types for the gazette-extract crate.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ExtractError {
    #[error("HTTP client setup failed: {0}")]
    Client(String),

    #[error("Failed to fetch {url}: {source}")]
    Http {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("Fetching {url} returned status {status}")]
    Status { url: String, status: u16 },

    #[error("Document at {url} exceeds {limit} bytes")]
    TooLarge { url: String, limit: usize },

    #[error("Failed to parse PDF from {url}: {reason}")]
    Pdf { url: String, reason: String },

    #[error("Extraction task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

pub type Result<T> = std::result::Result<T, ExtractError>;
