//! # Restock State
//!
//! Incoming goods scanned at the back door, held until one batch commit.

use std::sync::{Arc, Mutex, PoisonError};

use sentosa_core::RestockLedger;

/// Register-owned restock list.
#[derive(Debug, Clone, Default)]
pub struct RestockState {
    list: Arc<Mutex<RestockLedger>>,
}

impl RestockState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_list<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&RestockLedger) -> R,
    {
        let list = self.list.lock().unwrap_or_else(PoisonError::into_inner);
        f(&list)
    }

    pub fn with_list_mut<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut RestockLedger) -> R,
    {
        let mut list = self.list.lock().unwrap_or_else(PoisonError::into_inner);
        f(&mut list)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_with_list_mut() {
        let state = RestockState::new();
        state.with_list_mut(|l| l.record_scan("001", "Kopi"));
        state.with_list_mut(|l| l.record_scan("001", "Kopi"));
        assert_eq!(state.with_list(|l| l.get("001").map(|line| line.quantity)), Some(2));
    }
}
