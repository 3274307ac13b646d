use poolchart_domain::DomainError;
use thiserror::Error;

/// Failures talking to, or decoding data from, external collaborators.
#[derive(Debug, Error)]
pub enum DataError {
    #[error("http request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("gateway returned {status} for {url}")]
    Status { status: u16, url: String },
    #[error("malformed payload: {0}")]
    Decode(String),
    #[error(transparent)]
    Domain(#[from] DomainError),
    #[error("pool {0} not found")]
    PoolNotFound(String),
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}
