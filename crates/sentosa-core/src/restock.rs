//! # Restock Ledger
//!
//! Incoming goods counted by scanning, committed to stock in one batch.
//! Same shape as the cart without prices.
//!
//! ```text
//!   scan 001 ──► [001 × 1]
//!   scan 001 ──► [001 × 2]
//!   scan 007 ──► [001 × 2, 007 × 1]
//!   commit   ──► stock(001) += 2, stock(007) += 1, ledger cleared
//! ```

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::quantity::manual_quantity;

/// One product being received.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct RestockLine {
    pub code: String,
    pub name: String,
    pub quantity: i64,
}

/// Incoming-stock list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RestockLedger {
    lines: Vec<RestockLine>,
}

impl RestockLedger {
    pub fn new() -> Self {
        RestockLedger { lines: Vec::new() }
    }

    /// Counts one more unit of `code`, creating the line on first scan.
    ///
    /// Returns the line's quantity after the scan.
    pub fn record_scan(&mut self, code: &str, name: &str) -> i64 {
        if let Some(line) = self.line_mut(code) {
            line.quantity = line.quantity.saturating_add(1);
            return line.quantity;
        }

        self.lines.push(RestockLine {
            code: code.to_string(),
            name: name.to_string(),
            quantity: 1,
        });
        1
    }

    /// Relative change, clamped at 1. `None` if the code is not listed.
    pub fn adjust_quantity(&mut self, code: &str, delta: i64) -> Option<i64> {
        let line = self.line_mut(code)?;
        line.quantity = line.quantity.saturating_add(delta).max(1);
        Some(line.quantity)
    }

    /// Absolute quantity from raw text; blank or unparsable text becomes 0,
    /// matching the cart.
    pub fn set_quantity_raw(&mut self, code: &str, text: &str) -> Option<i64> {
        let line = self.line_mut(code)?;
        line.quantity = manual_quantity(text);
        Some(line.quantity)
    }

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

    pub fn clear(&mut self) {
        self.lines.clear();
    }

    pub fn lines(&self) -> &[RestockLine] {
        &self.lines
    }

    pub fn get(&self, code: &str) -> Option<&RestockLine> {
        self.lines.iter().find(|line| line.code == code)
    }

    /// Total units being received.
    pub fn total_quantity(&self) -> i64 {
        self.lines.iter().map(|line| line.quantity).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    fn line_mut(&mut self, code: &str) -> Option<&mut RestockLine> {
        self.lines.iter_mut().find(|line| line.code == code)
    }
}
