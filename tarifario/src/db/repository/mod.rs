//! Repository Module
//!
//! CRUD over the JSON documents in [`Storage`]. Each collection lives under
//! one key and is validated here before it is written.

// Catalog
pub mod category;
pub mod promotion;

// Settings
pub mod config;
pub mod shift;

// Quotes
pub mod quick_quote;
pub mod quote;

use shared::error::{AppError, ErrorCode};
use thiserror::Error;

/// Repository error types
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Duplicate: {0}")]
    Duplicate(String),

    /// Storage failure or field-level validation, code preserved
    #[error("{0}")]
    App(#[from] AppError),

    #[error("Validation error: {0}")]
    Validation(String),
}

/// Result type for repository operations
pub type RepoResult<T> = Result<T, RepoError>;

impl From<RepoError> for AppError {
    fn from(err: RepoError) -> Self {
        match err {
            RepoError::NotFound(msg) => AppError::with_message(ErrorCode::NotFound, msg),
            RepoError::Duplicate(msg) => AppError::with_message(ErrorCode::AlreadyExists, msg),
            RepoError::App(inner) => inner,
            RepoError::Validation(msg) => AppError::validation(msg),
        }
    }
}
