use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum DirectoryError {
    #[error("Invalid geography: {0}")]
    InvalidGeography(String),

    #[error("Invalid transition: '{event}' is not allowed from state '{from}'")]
    InvalidTransition { from: String, event: String },

    #[error("A rejection requires a non-empty reason")]
    MissingRejectionReason,

    #[error("Duplicate record in reconciled set: {0}")]
    DuplicateRecord(Uuid),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Store error: {0}")]
    Store(String),
}

pub type Result<T> = std::result::Result<T, DirectoryError>;
