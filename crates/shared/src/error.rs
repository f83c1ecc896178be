use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    /// Bad product id or a remote 404.
    NotFound,
    /// Any other network or HTTP failure.
    FetchFailure,
}

/// Error body the Product Source sends alongside non-success statuses.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceErrorBody {
    pub message: String,
}

/// Terminal failure of one Product Source operation.
///
/// Both codes collapse to the same user-visible text; the code and message are
/// kept for logs.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("{code:?}: {message}")]
pub struct CatalogError {
    pub code: ErrorCode,
    pub message: String,
}

impl CatalogError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::NotFound, message)
    }

    pub fn fetch_failure(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::FetchFailure, message)
    }
}
