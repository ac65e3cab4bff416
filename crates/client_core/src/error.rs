use std::path::PathBuf;

use thiserror::Error;

/// Failures below the application layer: the request never produced a usable response.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("invalid server url '{url}': {source}")]
    InvalidUrl {
        url: String,
        source: url::ParseError,
    },
    #[error("invalid session cookie value")]
    InvalidCookie(#[from] reqwest::header::InvalidHeaderValue),
    #[error("{0}")]
    Transport(#[from] reqwest::Error),
    #[error("malformed response from {endpoint}: {source}")]
    Decode {
        endpoint: String,
        source: serde_json::Error,
    },
    #[error("failed to read '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}

pub type Result<T, E = ClientError> = std::result::Result<T, E>;
