//! Shared types for Tarifário
//!
//! Data model, error types and id utilities used by the engine crate and
//! by anything that reads its backup documents.

pub mod error;
pub mod models;
pub mod util;

// Re-exports
pub use error::{AppError, AppResult, ErrorCategory, ErrorCode};
pub use serde::{Deserialize, Serialize};
