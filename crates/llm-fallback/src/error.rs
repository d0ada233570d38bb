use thiserror::Error;

pub type Result<T, E = FallbackError> = core::result::Result<T, E>;

#[derive(Debug, Error)]
pub enum FallbackError {
    #[error("HTTP error: {0}")]
    Http(String),
    #[error("model returned nothing usable")]
    NoResult,
}
