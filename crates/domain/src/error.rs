use thiserror::Error;

/// Errors raised while parsing domain values from external input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    #[error("unknown timeframe `{0}`, expected one of 1h, 4h, 1d, 1w, 1m")]
    UnknownTimeframe(String),
    #[error("invalid token amount `{0}`")]
    InvalidAmount(String),
    #[error("invalid side index {0}, expected 0 or 1")]
    InvalidSide(u8),
}
