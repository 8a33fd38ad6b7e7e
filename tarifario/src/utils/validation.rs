//! Input validation helpers
//!
//! Centralized text length constants and validation functions used at the
//! repository boundary.

use super::{AppError, AppResult};
use shared::error::ErrorCode;

// ── Text length limits ──────────────────────────────────────────────

/// Entity names: room category, promotion, worker, quote title
pub const MAX_NAME_LEN: usize = 200;

/// Notes, descriptions, template blocks
pub const MAX_NOTE_LEN: usize = 2000;

/// Unit numbers, amenity names
pub const MAX_SHORT_TEXT_LEN: usize = 100;

/// Upper bound for any single price
pub const MAX_PRICE: f64 = 1_000_000.0;

// ── Validation helpers ──────────────────────────────────────────────

/// Validate that a required string is non-empty and within the length limit.
pub fn validate_required_text(value: &str, field: &str, max_len: usize) -> AppResult<()> {
    if value.trim().is_empty() {
        return Err(AppError::required(field));
    }
    if value.len() > max_len {
        return Err(AppError::validation(format!(
            "{field} is too long ({} chars, max {max_len})",
            value.len()
        )));
    }
    Ok(())
}

/// Validate that an optional string, if present, is within the length limit.
pub fn validate_optional_text(value: &Option<String>, field: &str, max_len: usize) -> AppResult<()> {
    if let Some(v) = value
        && v.len() > max_len
    {
        return Err(AppError::validation(format!(
            "{field} is too long ({} chars, max {max_len})",
            v.len()
        )));
    }
    Ok(())
}

/// Validate a monetary amount: finite, non-negative, below [`MAX_PRICE`]
pub fn validate_amount(value: f64, field: &str) -> AppResult<()> {
    if !value.is_finite() {
        return Err(AppError::with_message(
            ErrorCode::ValueOutOfRange,
            format!("{field} must be a finite number, got {value}"),
        ));
    }
    if value < 0.0 {
        return Err(AppError::with_message(
            ErrorCode::ValueOutOfRange,
            format!("{field} must be non-negative, got {value}"),
        ));
    }
    if value > MAX_PRICE {
        return Err(AppError::with_message(
            ErrorCode::ValueOutOfRange,
            format!("{field} exceeds maximum allowed ({MAX_PRICE}), got {value}"),
        ));
    }
    Ok(())
}

/// Validate a percentage in 0..=100
pub fn validate_percent(value: f64, field: &str) -> AppResult<()> {
    if !value.is_finite() || !(0.0..=100.0).contains(&value) {
        return Err(AppError::with_message(
            ErrorCode::ValueOutOfRange,
            format!("{field} must be between 0 and 100, got {value}"),
        ));
    }
    Ok(())
}
