//! Domain errors. Used by ports and use cases.
//!
//! Adapters map infrastructure errors into these. Every variant is recoverable:
//! a rejected operation leaves the catalog unchanged.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Invalid input for {field}: {reason}")]
    InvalidInput { field: &'static str, reason: String },

    #[error("Category already exists: {0}")]
    DuplicateCategory(String),

    #[error("Content id already exists: {0}")]
    DuplicateId(String),

    #[error("Unknown category: {0}")]
    UnknownCategory(String),

    #[error("Unknown content: {0}")]
    UnknownContent(String),

    #[error("Persistence error: {0}")]
    Persistence(String),

    #[error("Access denied: {0}")]
    AccessDenied(String),

    #[error("Media resolve failed: {0}")]
    Media(String),

    #[error("UI error: {0}")]
    Ui(String),
}

impl DomainError {
    pub(crate) fn missing(field: &'static str) -> Self {
        DomainError::InvalidInput {
            field,
            reason: "must not be empty".to_string(),
        }
    }
}
