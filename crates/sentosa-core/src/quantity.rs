//! # Manual Quantity Entry
//!
//! The cashier can type a quantity straight into a line. Whatever they type
//! is reduced to its digits before anything else happens, so the ledger never
//! holds a non-numeric value.
//!
//! ```text
//!   "12abc" ──► "12"  ──► 12
//!   "1.500" ──► "1500" ─► 1500
//!   ""      ──► ""    ──► blank  ──► default (0)
//!   "abc"   ──► ""    ──► blank  ──► default (0)
//!   "99999999999999999999" ──► overflow ──► default (0)
//! ```
//!
//! An empty field while the cashier is mid-edit is normal, so the default is
//! 0 rather than an error. The same default applies to both ledgers.

use crate::error::ValidationError;
use crate::validation::ValidationResult;

/// Quantity used when manual text holds no usable digits.
pub const DEFAULT_MANUAL_QUANTITY: i64 = 0;

/// Keeps only ASCII digits.
///
/// ```rust
/// use sentosa_core::quantity::digits_only;
///
/// assert_eq!(digits_only(" 1 2x3 "), "123");
/// assert_eq!(digits_only("-5"), "5");
/// ```
pub fn digits_only(text: &str) -> String {
    text.chars().filter(char::is_ascii_digit).collect()
}

/// Parses manual quantity text strictly.
///
/// ## Returns
/// * `Ok(n)` - digits were present and fit in an i64
/// * `Err(Required)` - nothing left after sanitising
/// * `Err(Overflow)` - too many digits
pub fn parse_manual_quantity(text: &str) -> ValidationResult<i64> {
    let digits = digits_only(text);
    if digits.is_empty() {
        return Err(ValidationError::required("quantity"));
    }
    digits.parse::<i64>().map_err(|_| ValidationError::Overflow {
        field: "quantity".to_string(),
    })
}

/// Parses manual quantity text, falling back to
/// [`DEFAULT_MANUAL_QUANTITY`] on blank or overflowing input.
///
/// ```rust
/// use sentosa_core::quantity::manual_quantity;
///
/// assert_eq!(manual_quantity("12abc"), 12);
/// assert_eq!(manual_quantity(""), 0);
/// ```
pub fn manual_quantity(text: &str) -> i64 {
    parse_manual_quantity(text).unwrap_or(DEFAULT_MANUAL_QUANTITY)
}

/// Parses a maintenance-form number leniently: optional leading whitespace,
/// optional sign, then the leading run of digits. Anything else is 0.
///
/// ```rust
/// use sentosa_core::quantity::lenient_int;
///
/// assert_eq!(lenient_int("12abc"), 12);
/// assert_eq!(lenient_int("  -40"), -40);
/// assert_eq!(lenient_int("3.5"), 3);
/// assert_eq!(lenient_int("abc"), 0);
/// assert_eq!(lenient_int(""), 0);
/// ```
pub fn lenient_int(text: &str) -> i64 {
    let text = text.trim_start();
    let (negative, rest) = match text.as_bytes().first() {
        Some(b'-') => (true, &text[1..]),
        Some(b'+') => (false, &text[1..]),
        _ => (false, text),
    };

    let end = rest
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(rest.len());
    let value = match rest[..end].parse::<i64>() {
        Ok(value) => value,
        Err(_) => return 0,
    };

    if negative {
        -value
    } else {
        value
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
