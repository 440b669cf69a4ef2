//! # Cart State
//!
//! The session's cart, shared between the commands that read and mutate it.
//!
//! ## Cart Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart State Operations                                │
//! │                                                                         │
//! │  Cashier Action           Command                  Ledger Change        │
//! │  ──────────────           ───────                  ─────────────        │
//! │                                                                         │
//! │  Scan barcode ───────────► scan_to_cart() ───────► add(product)        │
//! │                                                                         │
//! │  Tap + / - ──────────────► adjust_cart_quantity ─► max(1, qty + d)     │
//! │                                                                         │
//! │  Type quantity ──────────► set_cart_quantity ────► digits or 0         │
//! │                                                                         │
//! │  Pay ────────────────────► checkout() ───────────► clear() on success  │
//! │                                                                         │
//! │  NOTE: the lock is never held across an await. Commands snapshot      │
//! │        what they need, release, then talk to the store.               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::sync::{Arc, Mutex, PoisonError};

use sentosa_core::CartLedger;

/// Register-owned cart state.
///
/// Cloning shares the same ledger.
#[derive(Debug, Clone, Default)]
pub struct CartState {
    cart: Arc<Mutex<CartLedger>>,
}

impl CartState {
    /// Creates a new empty cart state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Executes a function with read access to the cart.
    ///
    /// ## Usage
    /// ```rust,ignore
    /// let totals = cart_state.with_cart(|c| CartTotals::from(c));
    /// ```
    pub fn with_cart<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&CartLedger) -> R,
    {
        // Ledger operations cannot leave it half-updated, so a poisoned
        // lock still guards a consistent ledger.
        let cart = self.cart.lock().unwrap_or_else(PoisonError::into_inner);
        f(&cart)
    }

    /// Executes a function with write access to the cart.
    pub fn with_cart_mut<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut CartLedger) -> R,
    {
        let mut cart = self.cart.lock().unwrap_or_else(PoisonError::into_inner);
        f(&mut cart)
    }
}
