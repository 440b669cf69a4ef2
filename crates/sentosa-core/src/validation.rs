//! # Validation Module
//!
//! Field rules applied once where product data enters the system: when a
//! stored document is turned into a [`ProductRecord`](crate::ProductRecord)
//! and when a maintenance form is turned into a draft for saving.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │   store document ──► ProductRecord::from_document ──┐                  │
//! │                                                      ├──► THIS MODULE  │
//! │   maintenance form ─► ProductForm::into_draft ───────┘                  │
//! │                                                                         │
//! │   Everything downstream (pricing, ledgers) trusts the typed record.    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use crate::error::ValidationError;
use crate::money::Money;
use crate::{MAX_CODE_LENGTH, MAX_NAME_LENGTH};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// String Validators
// =============================================================================

/// Validates a scanned or typed product code and returns it trimmed.
///
/// ## Rules
/// - Must not be empty after trimming
/// - At most [`MAX_CODE_LENGTH`] characters
/// - No `/` (codes are used verbatim as store keys)
///
/// ```rust
/// use sentosa_core::validation::validate_code;
///
/// assert_eq!(validate_code("  8992761111113 \n").unwrap(), "8992761111113");
/// assert!(validate_code("   ").is_err());
/// assert!(validate_code("a/b").is_err());
/// ```
pub fn validate_code(code: &str) -> ValidationResult<String> {
    let code = code.trim();

    if code.is_empty() {
        return Err(ValidationError::required("code"));
    }

    if code.chars().count() > MAX_CODE_LENGTH {
        return Err(ValidationError::TooLong {
            field: "code".to_string(),
            max: MAX_CODE_LENGTH,
        });
    }

    if code.contains('/') {
        return Err(ValidationError::InvalidFormat {
            field: "code".to_string(),
            reason: "must not contain '/'".to_string(),
        });
    }

    Ok(code.to_string())
}

/// Validates a product display name and returns it trimmed.
pub fn validate_product_name(name: &str) -> ValidationResult<String> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::required("name"));
    }

    if name.chars().count() > MAX_NAME_LENGTH {
        return Err(ValidationError::TooLong {
            field: "name".to_string(),
            max: MAX_NAME_LENGTH,
        });
    }

    Ok(name.to_string())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Prices may be zero (free item, unset tier) but never negative.
pub fn validate_price(field: &str, amount: i64) -> ValidationResult<Money> {
    if amount < 0 {
        return Err(ValidationError::negative(field, amount));
    }
    Ok(Money::from_minor(amount))
}

/// Pack sizes may be zero (tier disabled) but never negative.
pub fn validate_pack_size(size: i64) -> ValidationResult<i64> {
    if size < 0 {
        return Err(ValidationError::negative("wholesale_qty", size));
    }
    Ok(size)
}

// =============================================================================
// Unit Tests
// =============================================================================
