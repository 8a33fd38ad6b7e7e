//! Unified error codes for Tarifário
//!
//! Error codes are organized by category:
//! - 0xxx: General errors
//! - 1xxx: Access gate errors
//! - 4xxx: Quote errors
//! - 6xxx: Catalog errors (room categories, promotions)
//! - 7xxx: Backup errors
//! - 9xxx: System errors

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unified error code enum
///
/// Represented as u16 values so they survive JSON round-trips unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u16", try_from = "u16")]
#[repr(u16)]
pub enum ErrorCode {
    // ==================== 0xxx: General ====================
    /// Operation completed successfully
    Success = 0,
    /// Unknown error
    Unknown = 1,
    /// Validation failed
    ValidationFailed = 2,
    /// Resource not found
    NotFound = 3,
    /// Resource already exists
    AlreadyExists = 4,
    /// Invalid request
    InvalidRequest = 5,
    /// Invalid format
    InvalidFormat = 6,
    /// Required field missing
    RequiredField = 7,
    /// Value out of range
    ValueOutOfRange = 8,

    // ==================== 1xxx: Access ====================
    /// Entered PIN does not match the stored hash
    InvalidPin = 1001,
    /// New PIN is shorter than the minimum length
    PinTooShort = 1002,
    /// New PIN and its confirmation differ
    PinMismatch = 1003,

    // ==================== 4xxx: Quote ====================
    /// Official quote not found
    QuoteNotFound = 4001,
    /// Quote is no longer a draft and cannot be changed
    QuoteNotEditable = 4002,
    /// Quote status transition not allowed
    QuoteInvalidTransition = 4003,
    /// Check-out is not after check-in
    InvalidStay = 4004,
    /// Quote line item not found
    QuoteItemNotFound = 4005,

    // ==================== 6xxx: Catalog ====================
    /// Room category not found
    CategoryNotFound = 6001,
    /// Room category has a negative price
    CategoryInvalidPrice = 6002,
    /// Room category capacity below one
    CategoryInvalidCapacity = 6003,
    /// Promotion not found
    PromotionNotFound = 6101,
    /// Promotion discount outside 0..=100
    PromotionInvalidDiscount = 6102,

    // ==================== 7xxx: Backup ====================
    /// Backup file is not valid JSON or has the wrong shape
    BackupInvalidFile = 7001,
    /// Backup version is not recognized
    BackupUnsupportedVersion = 7002,
    /// Backup signature does not match its content
    BackupSignatureMismatch = 7003,
    /// Legacy backup is missing required sections
    BackupLegacyInvalid = 7004,

    // ==================== 9xxx: System ====================
    /// Internal error
    InternalError = 9001,
    /// Persistent store read/write failed
    StorageError = 9002,
    /// Delivery sink (clipboard, file) failed
    SinkError = 9003,
}

impl ErrorCode {
    /// Get the numeric code value
    #[inline]
    pub const fn code(&self) -> u16 {
        *self as u16
    }

    /// Check if this is a success code
    #[inline]
    pub const fn is_success(&self) -> bool {
        matches!(self, Self::Success)
    }

    /// Default human-readable message
    pub const fn message(&self) -> &'static str {
        match self {
            Self::Success => "Success",
            Self::Unknown => "Unknown error",
            Self::ValidationFailed => "Validation failed",
            Self::NotFound => "Resource not found",
            Self::AlreadyExists => "Resource already exists",
            Self::InvalidRequest => "Invalid request",
            Self::InvalidFormat => "Invalid format",
            Self::RequiredField => "Required field missing",
            Self::ValueOutOfRange => "Value out of range",

            Self::InvalidPin => "Incorrect PIN",
            Self::PinTooShort => "PIN must have at least 3 characters",
            Self::PinMismatch => "PINs do not match",

            Self::QuoteNotFound => "Quote not found",
            Self::QuoteNotEditable => "Quote can only be changed while in draft",
            Self::QuoteInvalidTransition => "Quote status change not allowed",
            Self::InvalidStay => "Check-out must be after check-in",
            Self::QuoteItemNotFound => "Quote item not found",

            Self::CategoryNotFound => "Room category not found",
            Self::CategoryInvalidPrice => "Room prices must not be negative",
            Self::CategoryInvalidCapacity => "Room capacity must be at least 1",
            Self::PromotionNotFound => "Promotion not found",
            Self::PromotionInvalidDiscount => "Discount must be between 0 and 100",

            Self::BackupInvalidFile => "Invalid backup file",
            Self::BackupUnsupportedVersion => "Unsupported backup version",
            Self::BackupSignatureMismatch => "Backup is corrupted or was modified",
            Self::BackupLegacyInvalid => "File is not a valid legacy backup",

            Self::InternalError => "Internal error",
            Self::StorageError => "Storage error",
            Self::SinkError => "Delivery failed",
        }
    }
}

impl From<ErrorCode> for u16 {
    #[inline]
    fn from(code: ErrorCode) -> Self {
        code.code()
    }
}

/// Error returned when converting an unknown u16 into an [`ErrorCode`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidErrorCode(pub u16);

impl fmt::Display for InvalidErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid error code: {}", self.0)
    }
}

impl std::error::Error for InvalidErrorCode {}

impl TryFrom<u16> for ErrorCode {
    type Error = InvalidErrorCode;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        let code = match value {
            0 => Self::Success,
            1 => Self::Unknown,
            2 => Self::ValidationFailed,
            3 => Self::NotFound,
            4 => Self::AlreadyExists,
            5 => Self::InvalidRequest,
            6 => Self::InvalidFormat,
            7 => Self::RequiredField,
            8 => Self::ValueOutOfRange,

            1001 => Self::InvalidPin,
            1002 => Self::PinTooShort,
            1003 => Self::PinMismatch,

            4001 => Self::QuoteNotFound,
            4002 => Self::QuoteNotEditable,
            4003 => Self::QuoteInvalidTransition,
            4004 => Self::InvalidStay,
            4005 => Self::QuoteItemNotFound,

            6001 => Self::CategoryNotFound,
            6002 => Self::CategoryInvalidPrice,
            6003 => Self::CategoryInvalidCapacity,
            6101 => Self::PromotionNotFound,
            6102 => Self::PromotionInvalidDiscount,

            7001 => Self::BackupInvalidFile,
            7002 => Self::BackupUnsupportedVersion,
            7003 => Self::BackupSignatureMismatch,
            7004 => Self::BackupLegacyInvalid,

            9001 => Self::InternalError,
            9002 => Self::StorageError,
            9003 => Self::SinkError,

            other => return Err(InvalidErrorCode(other)),
        };
        Ok(code)
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "E{:04}", self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code_values() {
        assert_eq!(ErrorCode::Success.code(), 0);
        assert_eq!(ErrorCode::ValidationFailed.code(), 2);
        assert_eq!(ErrorCode::InvalidPin.code(), 1001);
        assert_eq!(ErrorCode::QuoteNotEditable.code(), 4002);
        assert_eq!(ErrorCode::CategoryNotFound.code(), 6001);
        assert_eq!(ErrorCode::BackupSignatureMismatch.code(), 7003);
        assert_eq!(ErrorCode::StorageError.code(), 9002);
    }

    #[test]
    fn test_is_success() {
        assert!(ErrorCode::Success.is_success());
        assert!(!ErrorCode::NotFound.is_success());
    }

    #[test]
    fn test_try_from_roundtrip() {
        for code in [
            ErrorCode::Unknown,
            ErrorCode::PinTooShort,
            ErrorCode::InvalidStay,
            ErrorCode::PromotionInvalidDiscount,
            ErrorCode::BackupLegacyInvalid,
            ErrorCode::SinkError,
        ] {
            assert_eq!(ErrorCode::try_from(code.code()), Ok(code));
        }
    }

    #[test]
    fn test_try_from_invalid() {
        assert_eq!(ErrorCode::try_from(5555), Err(InvalidErrorCode(5555)));
        assert_eq!(
            InvalidErrorCode(5555).to_string(),
            "invalid error code: 5555"
        );
    }

    #[test]
    fn test_serialize_as_number() {
        let json = serde_json::to_string(&ErrorCode::CategoryNotFound).unwrap();
        assert_eq!(json, "6001");
        let code: ErrorCode = serde_json::from_str("7002").unwrap();
        assert_eq!(code, ErrorCode::BackupUnsupportedVersion);
        assert!(serde_json::from_str::<ErrorCode>("12").is_err());
    }

    #[test]
    fn test_display() {
        assert_eq!(ErrorCode::Success.to_string(), "E0000");
        assert_eq!(ErrorCode::InvalidPin.to_string(), "E1001");
    }
}
