//! Error types for the `store` crate.
//!
//! Every backend collapses its native failures into `StoreError`, so callers
//! never need to know which engine sits behind a `QuestionStore`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(String),

    #[error("question {0} not found")]
    NotFound(i64),

    #[error("invalid record: {0}")]
    Invalid(String),
}

impl From<rusqlite::Error> for StoreError {
    fn from(e: rusqlite::Error) -> Self {
        StoreError::Database(e.to_string())
    }
}

pub type StoreResult<T> = Result<T, StoreError>;
