//! # Session State
//!
//! State owned by one register session and handed to each command.
//!
//! ## State Types
//! - [`CartState`]: the cart ledger
//! - [`RestockState`]: the incoming-stock list
//! - [`ScannerState`]: arming and the scan gate
//!
//! Nothing here is global; the embedding UI creates one of each per
//! session and drops them when the session ends.

mod cart;
mod restock;
mod scanner;

pub use cart::CartState;
pub use restock::RestockState;
pub use scanner::{GatePhase, ScanGate, ScanPermit, ScannerState};
