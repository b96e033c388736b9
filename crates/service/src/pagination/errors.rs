use thiserror::Error;

use crate::errors::ServiceError;

/// Failure of a view renderer while writing the navigation widget.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("unknown template: {0}")]
    UnknownTemplate(String),
    #[error("write failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("serialization failed: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Error)]
pub enum PaginationError {
    /// Queried before `with_collection()`; the store is never reached.
    #[error("no collection configured for pagination; call with_collection() before querying")]
    MissingCollection,
    #[error("page size must be greater than zero")]
    InvalidLimit,
    #[error("page number must be 1 or greater")]
    InvalidPage,
    #[error(transparent)]
    Store(#[from] ServiceError),
    #[error(transparent)]
    Render(#[from] RenderError),
}

impl PaginationError {
    /// Stable numeric code for external mapping/logging
    pub fn code(&self) -> u16 {
        match self {
            PaginationError::MissingCollection => 2001,
            PaginationError::InvalidLimit => 2002,
            PaginationError::InvalidPage => 2003,
            PaginationError::Store(_) => 2100,
            PaginationError::Render(_) => 2200,
        }
    }

    /// Caller-supplied input was out of range, as opposed to a server-side fault.
    pub fn is_bad_request(&self) -> bool {
        matches!(self, PaginationError::InvalidLimit | PaginationError::InvalidPage)
    }
}
