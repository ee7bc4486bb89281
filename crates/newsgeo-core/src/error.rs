// crates/newsgeo-core/src/error.rs
use thiserror::Error;

/// Errors produced while loading geography, fetching a corpus or validating
/// a search.
///
/// None of these are fatal to a [`MapSession`](crate::MapSession): the session
/// catches them and degrades to a "no data" or "no results" state.
#[derive(Debug, Error)]
pub enum MapError {
    #[error("not found: {0}")]
    NotFound(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[cfg(feature = "fetch")]
    #[error("HTTP error: {0}")]
    Http(String),

    #[error("malformed {layer} layer: {reason}")]
    MalformedLayer { layer: &'static str, reason: String },

    #[error("validation failed: {0}")]
    Validation(String),

    #[error("invalid publication timestamp: {0:?}")]
    InvalidTimestamp(String),
}

/// Alias used throughout the crate.
pub type Result<T> = std::result::Result<T, MapError>;

#[cfg(feature = "fetch")]
impl From<reqwest::Error> for MapError {
    fn from(e: reqwest::Error) -> Self {
        MapError::Http(e.to_string())
    }
}
