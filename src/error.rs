//! Error types for the headline service.
//!
//! Every fallible operation in the crate returns [`Result`]. The HTTP layer
//! turns an [`AppError`] into a status code and a JSON `{"error": ...}` body
//! (see `routes::error`), so success payloads and error payloads never share
//! a response shape.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(#[from] tokio_rusqlite::Error),

    #[error("Upstream request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Upstream returned HTTP {0}")]
    UpstreamStatus(u16),

    #[error("Validation failed: {0}")]
    Validation(String),
}

impl AppError {
    /// True for failures caused by the scraped site rather than by us.
    pub fn is_upstream(&self) -> bool {
        matches!(self, AppError::Http(_) | AppError::UpstreamStatus(_))
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
