//! Error category classification

use super::codes::ErrorCode;
use serde::{Deserialize, Serialize};

/// Error category classification based on error code ranges
///
/// - 0xxx: General errors
/// - 1xxx: Access gate errors
/// - 4xxx: Quote errors
/// - 6xxx: Catalog errors
/// - 7xxx: Backup errors
/// - 9xxx: System errors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCategory {
    /// General errors (0xxx)
    General,
    /// Access gate errors (1xxx)
    Access,
    /// Quote errors (4xxx)
    Quote,
    /// Catalog errors (6xxx)
    Catalog,
    /// Backup errors (7xxx)
    Backup,
    /// System errors (9xxx and anything unassigned)
    System,
}

impl ErrorCategory {
    /// Determine category from error code value
    pub fn from_code(code: u16) -> Self {
        match code {
            0..1000 => Self::General,
            1000..2000 => Self::Access,
            4000..5000 => Self::Quote,
            6000..7000 => Self::Catalog,
            7000..8000 => Self::Backup,
            _ => Self::System,
        }
    }

    /// Get the string name for this category
    pub fn name(&self) -> &'static str {
        match self {
            Self::General => "general",
            Self::Access => "access",
            Self::Quote => "quote",
            Self::Catalog => "catalog",
            Self::Backup => "backup",
            Self::System => "system",
        }
    }

    /// Whether an error of this category should be re-prompted to the user
    /// rather than reported as a fault
    pub fn is_user_error(&self) -> bool {
        !matches!(self, Self::System)
    }
}

impl ErrorCode {
    /// Get the category for this error code
    pub fn category(&self) -> ErrorCategory {
        ErrorCategory::from_code(self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_from_code() {
        assert_eq!(ErrorCategory::from_code(0), ErrorCategory::General);
        assert_eq!(ErrorCategory::from_code(999), ErrorCategory::General);
        assert_eq!(ErrorCategory::from_code(1001), ErrorCategory::Access);
        assert_eq!(ErrorCategory::from_code(4001), ErrorCategory::Quote);
        assert_eq!(ErrorCategory::from_code(6101), ErrorCategory::Catalog);
        assert_eq!(ErrorCategory::from_code(7003), ErrorCategory::Backup);
        assert_eq!(ErrorCategory::from_code(9001), ErrorCategory::System);
        assert_eq!(ErrorCategory::from_code(3000), ErrorCategory::System);
    }

    #[test]
    fn test_error_code_category() {
        assert_eq!(ErrorCode::NotFound.category(), ErrorCategory::General);
        assert_eq!(ErrorCode::InvalidPin.category(), ErrorCategory::Access);
        assert_eq!(ErrorCode::InvalidStay.category(), ErrorCategory::Quote);
        assert_eq!(
            ErrorCode::CategoryNotFound.category(),
            ErrorCategory::Catalog
        );
        assert_eq!(
            ErrorCode::BackupSignatureMismatch.category(),
            ErrorCategory::Backup
        );
        assert_eq!(ErrorCode::StorageError.category(), ErrorCategory::System);
    }

    #[test]
    fn test_user_error() {
        assert!(ErrorCategory::Catalog.is_user_error());
        assert!(!ErrorCategory::System.is_user_error());
    }

    #[test]
    fn test_category_serde() {
        let json = serde_json::to_string(&ErrorCategory::Backup).unwrap();
        assert_eq!(json, "\"backup\"");
        let category: ErrorCategory = serde_json::from_str("\"access\"").unwrap();
        assert_eq!(category, ErrorCategory::Access);
    }
}
