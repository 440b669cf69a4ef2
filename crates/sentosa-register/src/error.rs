//! # Register Error Types
//!
//! The error every command returns, serializable for the UI.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Handling Flow                                  │
//! │                                                                         │
//! │  Store / Core Error                                                    │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ApiError { code, message }                                            │
//! │       │  From<DbError>, From<CoreError>, lookup_failed, commit_failed  │
//! │       ▼                                                                 │
//! │  ApiError::notice() → Notice shown to the cashier                      │
//! │                                                                         │
//! │  Nothing here is fatal: every error is recoverable by repeating the    │
//! │  action (re-scan, re-commit).                                          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use sentosa_core::{CoreError, ValidationError};
use sentosa_db::DbError;
use serde::Serialize;
use tracing::error;

use crate::notice::Notice;

/// Error returned from register commands.
///
/// ## Serialization
/// ```json
/// {
///   "code": "NOT_FOUND",
///   "message": "Product not found: 899..."
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiError {
    /// Error code for programmatic handling
    pub code: ErrorCode,
    /// Human-readable error message
    pub message: String,
}

/// Error codes for categorizing errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Scanned code has no product
    NotFound,
    /// Transport failure while looking a product up
    LookupFailed,
    /// One or more stock mutations failed during a commit
    CommitFailed,
    /// Form input failed validation
    ValidationError,
    /// Any other store failure
    DatabaseError,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        ApiError {
            code,
            message: message.into(),
        }
    }

    /// Creates a not found error.
    pub fn not_found(code: &str) -> Self {
        ApiError::new(ErrorCode::NotFound, format!("Product not found: {}", code))
    }

    /// Restock scans of unknown codes: the item has to be registered first.
    pub fn unregistered(code: &str) -> Self {
        ApiError::new(
            ErrorCode::NotFound,
            format!("New item {}? Register it in master data first", code),
        )
    }

    /// Creates a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::ValidationError, message)
    }

    /// Wraps a store failure that happened while resolving a scanned code.
    pub fn lookup_failed(code: &str, err: DbError) -> Self {
        error!(code = %code, error = %err, "Product lookup failed");
        ApiError::new(
            ErrorCode::LookupFailed,
            format!("Failed to fetch product {}: {}", code, err),
        )
    }

    /// Classifies an error from resolving `code`.
    ///
    /// Only failures to reach or query the store are `LOOKUP_FAILED`; a row
    /// that was read but fails validation is a `VALIDATION_ERROR`.
    pub fn from_lookup(code: &str, err: DbError) -> Self {
        if err.is_connectivity() || matches!(err, DbError::QueryFailed(_)) {
            ApiError::lookup_failed(code, err)
        } else {
            ApiError::from(err)
        }
    }

    /// Summarises a commit in which `failed` of `total` mutations failed.
    pub fn commit_failed(failed: usize, total: usize, first: &DbError) -> Self {
        ApiError::new(
            ErrorCode::CommitFailed,
            format!(
                "Stock update failed for {} of {} items: {}",
                failed, total, first
            ),
        )
    }

    /// The notice the cashier sees for this error.
    pub fn notice(&self) -> Notice {
        let title = match self.code {
            ErrorCode::NotFound => "Product not found",
            ErrorCode::LookupFailed => "Failed to fetch data",
            ErrorCode::CommitFailed => "Failed to update stock",
            ErrorCode::ValidationError => "Check the form",
            ErrorCode::DatabaseError => "Something went wrong",
        };
        Notice::error(title, self.message.clone())
    }
}

impl From<DbError> for ApiError {
    fn from(err: DbError) -> Self {
        error!(error = %err, "Database error");

        match err {
            DbError::NotFound { entity, id } => {
                ApiError::new(ErrorCode::NotFound, format!("{} not found: {}", entity, id))
            }
            DbError::InvalidRecord { .. } => {
                ApiError::new(ErrorCode::ValidationError, err.to_string())
            }
            _ => ApiError::new(ErrorCode::DatabaseError, err.to_string()),
        }
    }
}

impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::ProductNotFound(code) => ApiError::not_found(&code),
            CoreError::Validation(e) => ApiError::from(e),
        }
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        ApiError::validation(err.to_string())
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}: {}", self.code, self.message)
    }
}

impl std::error::Error for ApiError {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notice::NoticeLevel;

    #[test]
    fn test_serializes_screaming_code() {
        let err = ApiError::not_found("001");
        let json = serde_json::to_value(&err).unwrap();
        assert_eq!(json["code"], "NOT_FOUND");
        assert_eq!(json["message"], "Product not found: 001");
    }

    #[test]
    fn test_commit_failed_counts_lines() {
        let err = ApiError::commit_failed(1, 2, &DbError::not_found("Product", "404"));
        assert_eq!(err.code, ErrorCode::CommitFailed);
        assert!(err.message.contains("1 of 2"));
    }

    #[test]
    fn test_db_error_mapping() {
        let err = ApiError::from(DbError::ConnectionFailed("offline".into()));
        assert_eq!(err.code, ErrorCode::DatabaseError);

        let err = ApiError::from(DbError::invalid_record(
            "X",
            ValidationError::required("name"),
        ));
        assert_eq!(err.code, ErrorCode::ValidationError);
    }

    #[test]
    fn test_lookup_classification() {
        let offline = ApiError::from_lookup("001", DbError::ConnectionFailed("offline".into()));
        assert_eq!(offline.code, ErrorCode::LookupFailed);

        let timeout = ApiError::from_lookup("001", DbError::QueryFailed("timed out".into()));
        assert_eq!(timeout.code, ErrorCode::LookupFailed);

        let broken = ApiError::from_lookup(
            "N1",
            DbError::invalid_record("N1", ValidationError::required("name")),
        );
        assert_eq!(broken.code, ErrorCode::ValidationError);
        assert_eq!(broken.notice().title, "Check the form");
    }

    #[test]
    fn test_notice_is_error_level() {
        let notice = ApiError::lookup_failed("001", DbError::PoolExhausted).notice();
        assert_eq!(notice.level, NoticeLevel::Error);
        assert_eq!(notice.title, "Failed to fetch data");
    }
}
