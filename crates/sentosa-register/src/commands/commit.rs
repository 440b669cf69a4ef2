//! # Commit Commands
//!
//! Turning a ledger into stock mutations.
//!
//! ## Commit Protocol
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Commit Protocol                                      │
//! │                                                                         │
//! │  1. Snapshot ledger lines (lock released before any await)             │
//! │       checkout: delta = -quantity     restock: delta = +quantity       │
//! │                                                                         │
//! │  2. Fan out one apply_delta per line, concurrently                     │
//! │       ┌─────────┐ ┌─────────┐ ┌─────────┐                              │
//! │       │ line 1  │ │ line 2  │ │ line n  │                              │
//! │       └────┬────┘ └────┬────┘ └────┬────┘                              │
//! │            └───────────┼───────────┘ join_all                          │
//! │                        ▼                                                │
//! │  3. All Ok  ──► settle committed units, success notice                 │
//! │     Any Err ──► ledger untouched, COMMIT_FAILED (first error)          │
//! │                                                                         │
//! │  Not transactional: lines that succeeded before a failure stay         │
//! │  applied, and a retry applies them again.                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use futures_util::future::join_all;
use sentosa_core::Money;
use sentosa_db::{DbError, StockMutator};
use serde::Serialize;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::error::ApiError;
use crate::notice::Notice;
use crate::state::{CartState, RestockState};

/// Which ledger was committed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum CommitKind {
    Checkout,
    Restock,
}

/// Outcome of a successful (or empty) commit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CommitReceipt {
    /// Correlates the commit's log lines; `None` when nothing was committed.
    pub commit_id: Option<Uuid>,
    pub kind: CommitKind,
    /// Number of lines committed.
    pub lines: usize,
    /// Units moved.
    pub units: i64,
    /// Sale total (checkout only; zero for restock).
    pub total: Money,
    pub notice: Notice,
}

impl CommitReceipt {
    /// Receipt for an empty ledger: no mutations were issued.
    fn empty(kind: CommitKind) -> Self {
        CommitReceipt {
            commit_id: None,
            kind,
            lines: 0,
            units: 0,
            total: Money::zero(),
            notice: Notice::info("Nothing to commit", "The list is empty"),
        }
    }

    /// True if the ledger was empty and nothing was sent to the store.
    pub fn is_empty(&self) -> bool {
        self.commit_id.is_none()
    }
}

/// Applies every `(code, delta)` concurrently and waits for all of them.
///
/// Each failure is logged; the first one is reported.
async fn apply_all<M: StockMutator>(
    store: &M,
    commit_id: Uuid,
    deltas: &[(String, i64)],
) -> Result<(), ApiError> {
    let results = join_all(
        deltas
            .iter()
            .map(|(code, delta)| store.apply_delta(code, *delta)),
    )
    .await;

    let mut failed = 0usize;
    let mut first_error: Option<DbError> = None;

    for ((code, delta), result) in deltas.iter().zip(results) {
        if let Err(e) = result {
            warn!(%commit_id, code = %code, delta = *delta, error = %e, "Stock mutation failed");
            failed += 1;
            first_error.get_or_insert(e);
        }
    }

    match first_error {
        None => Ok(()),
        Some(first) => {
            warn!(%commit_id, failed, total = deltas.len(), "Commit incomplete, ledger kept");
            Err(ApiError::commit_failed(failed, deltas.len(), &first))
        }
    }
}

/// Pays for the cart: every line's quantity comes off stock.
///
/// The cart is snapshotted before the store is touched. On success only the
/// snapshotted units are taken off the cart, so anything scanned while the
/// commit was in flight stays for the next checkout.
///
/// ## Returns
/// * `Ok(receipt)` - all stock updated and the committed units settled, or
///   the cart was empty and nothing happened
/// * `Err(COMMIT_FAILED)` - at least one line failed; the cart is unchanged
pub async fn checkout<M: StockMutator>(
    store: &M,
    cart: &CartState,
) -> Result<CommitReceipt, ApiError> {
    debug!("checkout command");

    let (deltas, total) = cart.with_cart(|c| {
        let deltas: Vec<(String, i64)> = c
            .lines()
            .iter()
            .map(|line| (line.code.clone(), line.quantity.saturating_neg()))
            .collect();
        (deltas, c.total())
    });

    if deltas.is_empty() {
        debug!("Checkout on empty cart, nothing to do");
        return Ok(CommitReceipt::empty(CommitKind::Checkout));
    }

    let commit_id = Uuid::new_v4();
    let units: i64 = deltas.iter().map(|(_, d)| d.saturating_neg()).sum();
    info!(%commit_id, lines = deltas.len(), units, total = %total, "Committing checkout");

    apply_all(store, commit_id, &deltas).await?;

    cart.with_cart_mut(|c| {
        for (code, delta) in &deltas {
            c.settle(code, delta.saturating_neg());
        }
    });
    info!(%commit_id, "Checkout complete");

    Ok(CommitReceipt {
        commit_id: Some(commit_id),
        kind: CommitKind::Checkout,
        lines: deltas.len(),
        units,
        total,
        notice: Notice::success("Transaction complete!", format!("Total {}", total)),
    })
}

/// Receives the restock list: every line's quantity goes onto stock.
///
/// Settles the list the same way [`checkout`] settles the cart.
pub async fn commit_restock<M: StockMutator>(
    store: &M,
    restock: &RestockState,
) -> Result<CommitReceipt, ApiError> {
    debug!("commit_restock command");

    let deltas: Vec<(String, i64)> = restock.with_list(|l| {
        l.lines()
            .iter()
            .map(|line| (line.code.clone(), line.quantity))
            .collect()
    });

    if deltas.is_empty() {
        debug!("Restock commit on empty list, nothing to do");
        return Ok(CommitReceipt::empty(CommitKind::Restock));
    }

    let commit_id = Uuid::new_v4();
    let units: i64 = deltas.iter().map(|(_, d)| *d).sum();
    info!(%commit_id, lines = deltas.len(), units, "Committing restock");

    apply_all(store, commit_id, &deltas).await?;

    restock.with_list_mut(|l| {
        for (code, delta) in &deltas {
            l.settle(code, *delta);
        }
    });
    info!(%commit_id, "Restock complete");

    Ok(CommitReceipt {
        commit_id: Some(commit_id),
        kind: CommitKind::Restock,
        lines: deltas.len(),
        units,
        total: Money::zero(),
        notice: Notice::success("Warehouse stock updated!", format!("{} units received", units)),
    })
}
