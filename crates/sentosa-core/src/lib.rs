//! # sentosa-core: Pure Logic for Sentosa Kasir
//!
//! Pricing, ledgers and product-record validation as pure functions with
//! zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Sentosa Kasir Architecture                         │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    Cashier / Restock UI                         │   │
//! │  │      Scan ──► Cart list ──► Bayar (checkout) ──► Notice         │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                    sentosa-register                             │   │
//! │  │    scan_to_cart, checkout, scan_to_restock, commit_restock     │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ sentosa-core (THIS CRATE) ★                     │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │  product  │  │  pricing  │  │   cart    │  │  restock  │  │   │
//! │  │   │  Record   │  │ ecer +    │  │  Ledger   │  │  Ledger   │  │   │
//! │  │   │  Draft    │  │  grosir   │  │           │  │           │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO TIMERS • PURE FUNCTIONS            │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                    sentosa-db (Product store)                   │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`money`] - Money type with integer arithmetic
//! - [`product`] - Typed product record, stored document shape, edit drafts
//! - [`pricing`] - Tiered unit / wholesale-pack pricing
//! - [`cart`] - Cart ledger with price snapshots
//! - [`restock`] - Restock ledger
//! - [`quantity`] - Manual quantity text sanitising
//! - [`validation`] - Field rules shared by lookup and save
//! - [`error`] - Domain error types
//!
//! ## Example Usage
//!
//! ```rust
//! use sentosa_core::money::Money;
//! use sentosa_core::pricing::{line_total, PriceTerms, WholesaleTier};
//!
//! let terms = PriceTerms::new(
//!     Money::from_minor(10_000),
//!     WholesaleTier::new(Money::from_minor(90_000), 10),
//! );
//!
//! // 25 units = 2 packs of 10 + 5 loose units
//! assert_eq!(line_total(25, &terms).minor(), 230_000);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod cart;
pub mod error;
pub mod money;
pub mod pricing;
pub mod product;
pub mod quantity;
pub mod restock;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use cart::{CartLedger, CartLine, CartTotals};
pub use error::{CoreError, ValidationError};
pub use money::Money;
pub use pricing::{LineQuote, PriceTerms, WholesaleTier};
pub use product::{ProductDocument, ProductDraft, ProductForm, ProductRecord};
pub use restock::{RestockLedger, RestockLine};

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Longest product code accepted from a scanner or the maintenance form.
pub const MAX_CODE_LENGTH: usize = 128;

/// Longest product display name.
pub const MAX_NAME_LENGTH: usize = 200;
