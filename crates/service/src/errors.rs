use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("validation error: {0}")]
    Validation(String),
    #[error("{0}")]
    NotFound(String),
    /// A unique index rejected the write; carries the conflicting key.
    #[error("pokemon exists in db {0}")]
    Duplicate(String),
    /// Opaque store failure; the detail only goes to the logs.
    #[error("{0}")]
    Internal(String),
    #[error("catalog fetch failed: {0}")]
    Fetch(#[from] common::CoreError),
}

impl ServiceError {
    pub fn not_found(term: &str) -> Self {
        Self::NotFound(format!("pokemon with id, name or no \"{}\" not found", term))
    }

    pub fn internal(op: &str) -> Self {
        Self::Internal(format!("Can't {} pokemon - Check server logs", op))
    }
}
