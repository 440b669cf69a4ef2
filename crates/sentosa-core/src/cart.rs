//! # Cart Ledger
//!
//! The lines of the sale being rung up, in scan order, one line per code.
//!
//! ## Operations
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Operation             Effect                                           │
//! │  ─────────             ──────                                           │
//! │  add(product)          existing line: qty + 1                           │
//! │                        new line: qty 1, prices snapshotted              │
//! │  adjust_quantity(±n)   qty = max(1, qty + n); unknown code: no-op       │
//! │  set_quantity_raw(s)   qty = digits of s; blank: 0 (mid-edit)           │
//! │  remove(code)          drop the line; unknown code: no-op               │
//! │  clear()               empty the ledger                                 │
//! │  total()               recomputed from lines every call                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Prices are copied into the line when it is created. Later edits to the
//! product do not reach lines already in the cart.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::Money;
use crate::pricing::{order_total, quote_line, LineQuote, PriceTerms};
use crate::product::ProductRecord;
use crate::quantity::manual_quantity;

// =============================================================================
// Cart Line
// =============================================================================

/// One product in the cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CartLine {
    /// Product code; unique within the ledger.
    pub code: String,
    /// Name at time of adding.
    pub name: String,
    /// Prices at time of adding.
    pub terms: PriceTerms,
    pub quantity: i64,
}

impl CartLine {
    /// New line with quantity 1 and the product's current prices.
    pub fn from_product(product: &ProductRecord) -> Self {
        CartLine {
            code: product.code.clone(),
            name: product.name.clone(),
            terms: product.price_terms(),
            quantity: 1,
        }
    }

    /// Prices this line with the snapshot terms.
    pub fn quote(&self) -> LineQuote {
        quote_line(self.quantity, &self.terms)
    }

    pub fn line_total(&self) -> Money {
        self.quote().total
    }
}

// =============================================================================
// Cart Ledger
// =============================================================================

/// The cart.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLedger {
    lines: Vec<CartLine>,
}

impl CartLedger {
    /// Creates an empty cart.
    pub fn new() -> Self {
        CartLedger { lines: Vec::new() }
    }

    /// Adds one unit of `product`. Always succeeds.
    ///
    /// Returns the line's quantity after the add.
    pub fn add(&mut self, product: &ProductRecord) -> i64 {
        if let Some(line) = self.line_mut(&product.code) {
            line.quantity = line.quantity.saturating_add(1);
            return line.quantity;
        }

        self.lines.push(CartLine::from_product(product));
        1
    }

    /// Relative change, clamped so the line never drops below 1.
    ///
    /// Returns the new quantity, or `None` if the code is not in the cart.
    pub fn adjust_quantity(&mut self, code: &str, delta: i64) -> Option<i64> {
        let line = self.line_mut(code)?;
        line.quantity = line.quantity.saturating_add(delta).max(1);
        Some(line.quantity)
    }

    /// Absolute quantity from raw text. The only path that can leave a line
    /// at 0; the line is kept so the cashier can finish typing.
    pub fn set_quantity_raw(&mut self, code: &str, text: &str) -> Option<i64> {
        let line = self.line_mut(code)?;
        line.quantity = manual_quantity(text);
        Some(line.quantity)
    }

    /// Removes a line. Returns whether anything was removed.
    pub fn remove(&mut self, code: &str) -> bool {
        let before = self.lines.len();
        self.lines.retain(|line| line.code != code);
        self.lines.len() != before
    }

    /// Takes `quantity` committed units of `code` off its line and drops the
    /// line once nothing is left. Units added after the commit was
    /// snapshotted stay on the line.
    pub fn settle(&mut self, code: &str, quantity: i64) {
        if let Some(line) = self.line_mut(code) {
            line.quantity = line.quantity.saturating_sub(quantity);
        }
        self.lines.retain(|line| line.code != code || line.quantity > 0);
    }

    /// Empties the cart.
    pub fn clear(&mut self) {
        self.lines.clear();
    }

    /// Order total over the current lines.
    pub fn total(&self) -> Money {
        order_total(self.lines.iter().map(|line| (line.quantity, &line.terms)))
    }

    /// Lines in scan order.
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    pub fn get(&self, code: &str) -> Option<&CartLine> {
        self.lines.iter().find(|line| line.code == code)
    }

    /// Number of distinct products.
    pub fn item_count(&self) -> usize {
        self.lines.len()
    }

    /// Sum of quantities.
    pub fn total_quantity(&self) -> i64 {
        self.lines.iter().map(|line| line.quantity).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    fn line_mut(&mut self, code: &str) -> Option<&mut CartLine> {
        self.lines.iter_mut().find(|line| line.code == code)
    }
}

// =============================================================================
// Totals
// =============================================================================

/// Cart summary for responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CartTotals {
    pub item_count: usize,
    pub total_quantity: i64,
    pub total: Money,
}

impl From<&CartLedger> for CartTotals {
    fn from(cart: &CartLedger) -> Self {
        CartTotals {
            item_count: cart.item_count(),
            total_quantity: cart.total_quantity(),
            total: cart.total(),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
