//! # Restock Commands
//!
//! Editing the incoming-stock list before it is committed.

use sentosa_core::{RestockLedger, RestockLine};
use serde::Serialize;
use tracing::debug;

use crate::state::RestockState;

/// Restock list response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RestockResponse {
    pub lines: Vec<RestockLine>,
    pub total_quantity: i64,
}

impl From<&RestockLedger> for RestockResponse {
    fn from(list: &RestockLedger) -> Self {
        RestockResponse {
            lines: list.lines().to_vec(),
            total_quantity: list.total_quantity(),
        }
    }
}

pub fn get_restock_list(restock: &RestockState) -> RestockResponse {
    debug!("get_restock_list command");
    restock.with_list(|l| RestockResponse::from(l))
}

pub fn adjust_restock_quantity(restock: &RestockState, code: &str, delta: i64) -> RestockResponse {
    debug!(code = %code, delta = delta, "adjust_restock_quantity command");
    restock.with_list_mut(|l| {
        l.adjust_quantity(code, delta);
        RestockResponse::from(&*l)
    })
}

/// Typed quantity; anything without digits counts as 0.
pub fn set_restock_quantity(restock: &RestockState, code: &str, text: &str) -> RestockResponse {
    debug!(code = %code, text = %text, "set_restock_quantity command");
    restock.with_list_mut(|l| {
        l.set_quantity_raw(code, text);
        RestockResponse::from(&*l)
    })
}

pub fn remove_from_restock(restock: &RestockState, code: &str) -> RestockResponse {
    debug!(code = %code, "remove_from_restock command");
    restock.with_list_mut(|l| {
        l.remove(code);
        RestockResponse::from(&*l)
    })
}

pub fn clear_restock(restock: &RestockState) -> RestockResponse {
    debug!("clear_restock command");
    restock.with_list_mut(|l| {
        l.clear();
        RestockResponse::from(&*l)
    })
}
