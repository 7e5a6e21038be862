use thiserror::Error;
use timeline_core::SelectionError;

/// Errors surfaced by catalog fetches.
///
/// Selection setters never fail; only fetches can. Every failure reaches the
/// caller, nothing is swallowed.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CatalogError {
    /// Connection, DNS, timeout or body-read failure.
    #[error("transport error: {0}")]
    Transport(String),
    /// The backend answered with a non-success status.
    #[error("http status {0}")]
    HttpStatus(u16),
    /// The payload could not be decoded or a date string is malformed.
    #[error("malformed payload: {0}")]
    Parse(String),
    /// The backend reported a month outside the calendar range.
    #[error(transparent)]
    InvalidSelection(#[from] SelectionError),
}

pub(crate) fn map_reqwest_error(err: reqwest::Error) -> CatalogError {
    if err.is_decode() {
        return CatalogError::Parse(err.to_string());
    }
    CatalogError::Transport(err.to_string())
}
