//! # Store Contracts
//!
//! What the register needs from a product store, and nothing more.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Register command            Contract          Call                     │
//! │  ────────────────            ────────          ────                     │
//! │  scan_to_cart / restock ───► ProductLookup ──► lookup(code)             │
//! │  check_price             ───► ProductLookup                             │
//! │  checkout (−qty) ──────────► StockMutator ───► apply_delta(code, ±n)    │
//! │  commit_restock (+qty) ────► StockMutator                               │
//! │  load_product_form ────────► ProductCatalog ─► stored_document(code)    │
//! │  save_product ─────────────► ProductCatalog ─► save_product(draft)      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! [`ProductRepository`](crate::ProductRepository) implements all three over
//! SQLite. Tests in the register swap in their own implementations.

use std::future::Future;

use sentosa_core::{ProductDocument, ProductDraft, ProductRecord};

use crate::error::DbResult;

/// Resolves a scanned code to a product.
pub trait ProductLookup {
    /// Exact match on the trimmed code.
    ///
    /// ## Returns
    /// * `Ok(Some(record))` - product found and valid
    /// * `Ok(None)` - no product for this code
    /// * `Err(_)` - transport failure or a stored row that fails validation
    fn lookup(&self, code: &str) -> impl Future<Output = DbResult<Option<ProductRecord>>> + Send;
}

/// Applies signed stock changes.
pub trait StockMutator {
    /// Adds `delta` to the stock of `code` (negative for sales).
    ///
    /// An unknown code is an error. The result is not floored at zero.
    fn apply_delta(&self, code: &str, delta: i64) -> impl Future<Output = DbResult<()>> + Send;
}

/// Reads and writes products for the maintenance screen.
pub trait ProductCatalog {
    /// The stored fields for `code` before validation, so a broken or
    /// partial row can still be opened and fixed.
    fn stored_document(
        &self,
        code: &str,
    ) -> impl Future<Output = DbResult<Option<ProductDocument>>> + Send;

    /// Upserts by code and returns the stored record.
    fn save_product(
        &self,
        draft: &ProductDraft,
    ) -> impl Future<Output = DbResult<ProductRecord>> + Send;
}
