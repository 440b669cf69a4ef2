//! # Cart Commands
//!
//! Reading and editing the cart between scans.
//!
//! ## Cart Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart Lifecycle                                       │
//! │                                                                         │
//! │  ┌──────────┐     ┌──────────┐     ┌──────────┐                        │
//! │  │  Empty   │────►│ In Cart  │────►│  Paid    │                        │
//! │  │  Cart    │     │          │     │          │                        │
//! │  └──────────┘     └──────────┘     └──────────┘                        │
//! │                        │                 │                              │
//! │                   scan_to_cart       checkout                          │
//! │                   adjust / set       (commit.rs)                       │
//! │                   remove                                                │
//! │                        │                                                │
//! │                        ▼                                                │
//! │                   clear_cart ──────────────────────►                   │
//! │                                                      (back to empty)   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Edits on a code that is not in the cart are no-ops; every command
//! returns the cart as it now stands.

use sentosa_core::{CartLedger, CartLine, CartTotals, LineQuote};
use serde::Serialize;
use tracing::debug;

use crate::state::CartState;

/// A cart line with its current price breakdown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLineView {
    #[serde(flatten)]
    pub line: CartLine,
    pub quote: LineQuote,
}

/// Cart response including lines and totals.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartResponse {
    pub lines: Vec<CartLineView>,
    pub totals: CartTotals,
}

impl From<&CartLedger> for CartResponse {
    fn from(cart: &CartLedger) -> Self {
        CartResponse {
            lines: cart
                .lines()
                .iter()
                .map(|line| CartLineView {
                    quote: line.quote(),
                    line: line.clone(),
                })
                .collect(),
            totals: CartTotals::from(cart),
        }
    }
}

/// Gets the current cart contents.
///
/// ## Returns
/// Current cart with per-line quotes and the recomputed total
pub fn get_cart(cart: &CartState) -> CartResponse {
    debug!("get_cart command");
    cart.with_cart(|c| CartResponse::from(c))
}

/// Tap on `+` / `-`. Relative changes never take a line below 1.
pub fn adjust_cart_quantity(cart: &CartState, code: &str, delta: i64) -> CartResponse {
    debug!(code = %code, delta = delta, "adjust_cart_quantity command");
    cart.with_cart_mut(|c| {
        c.adjust_quantity(code, delta);
        CartResponse::from(&*c)
    })
}

/// Typed quantity. Non-digits are dropped; an empty field means 0.
pub fn set_cart_quantity(cart: &CartState, code: &str, text: &str) -> CartResponse {
    debug!(code = %code, text = %text, "set_cart_quantity command");
    cart.with_cart_mut(|c| {
        c.set_quantity_raw(code, text);
        CartResponse::from(&*c)
    })
}

pub fn remove_from_cart(cart: &CartState, code: &str) -> CartResponse {
    debug!(code = %code, "remove_from_cart command");
    cart.with_cart_mut(|c| {
        c.remove(code);
        CartResponse::from(&*c)
    })
}

pub fn clear_cart(cart: &CartState) -> CartResponse {
    debug!("clear_cart command");
    cart.with_cart_mut(|c| {
        c.clear();
        CartResponse::from(&*c)
    })
}
