//! # Error Types
//!
//! Domain-specific error types for sentosa-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  sentosa-core errors (this file)                                       │
//! │  ├── CoreError        - General domain errors                          │
//! │  └── ValidationError  - Product record / form field failures           │
//! │                                                                         │
//! │  sentosa-db errors (separate crate)                                    │
//! │  └── DbError          - Store operation failures                       │
//! │                                                                         │
//! │  sentosa-register errors                                               │
//! │  └── ApiError         - What the cashier sees (as a Notice)            │
//! │                                                                         │
//! │  Flow: ValidationError → DbError → ApiError → Notice                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Malformed manual quantity text is deliberately absent here: it never
//! becomes an error, it resolves to a default (see [`crate::quantity`]).

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Core domain errors.
#[derive(Debug, Error)]
pub enum CoreError {
    /// No product exists for the scanned code.
    #[error("Product not found: {0}")]
    ProductNotFound(String),

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Field validation errors for product records and maintenance forms.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Numeric value must not be negative.
    #[error("{field} must not be negative (got {value})")]
    Negative { field: String, value: i64 },

    /// Invalid format (e.g. a code containing a path separator).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// Digits did not fit in a quantity.
    #[error("{field} is too large")]
    Overflow { field: String },
}

impl ValidationError {
    /// Creates a Required error for the given field.
    pub fn required(field: impl Into<String>) -> Self {
        ValidationError::Required {
            field: field.into(),
        }
    }

    /// Creates a Negative error for the given field and value.
    pub fn negative(field: impl Into<String>, value: i64) -> Self {
        ValidationError::Negative {
            field: field.into(),
            value,
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
