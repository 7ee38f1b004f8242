//! Error types for bookfeed

use thiserror::Error;

pub type Result<T> = std::result::Result<T, CoreError>;

#[derive(Error, Debug)]
pub enum CoreError {
    /// A mutating operation referenced a row that does not exist.
    #[error("{entity} {id} does not exist")]
    Reference { entity: &'static str, id: i64 },

    #[error("validation failed: {0}")]
    Validation(String),

    /// Connectivity, timeout, or contention at the backing store.
    /// Callers may treat these as retryable.
    #[error("storage error: {0}")]
    Storage(String),
}

impl CoreError {
    pub fn reference(entity: &'static str, id: i64) -> Self {
        CoreError::Reference { entity, id }
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        CoreError::Validation(msg.into())
    }
}
