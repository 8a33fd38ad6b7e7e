//! Utilities: logging, money, formatting, parsing and validation

pub mod format;
pub mod logger;
pub mod money;
pub mod time;
pub mod validation;

pub use shared::error::{AppError, AppResult, ErrorCategory, ErrorCode};
