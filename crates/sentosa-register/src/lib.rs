//! # sentosa-register: Register Session for Sentosa Kasir
//!
//! Session state and the commands the cashier, warehouse, price-check and
//! master-data screens call.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Sentosa Kasir Layers                                │
//! │                                                                         │
//! │  UI (camera, screens, toasts)                                          │
//! │       │  barcode / taps / typed text         ▲ responses + Notice      │
//! │       ▼                                      │                          │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                sentosa-register (THIS CRATE)                    │   │
//! │  │                                                                 │   │
//! │  │   commands ──► state (CartState, RestockState, ScannerState)    │   │
//! │  │       │                                                         │   │
//! │  │       └──► ProductLookup / StockMutator / ProductCatalog        │   │
//! │  └───────┼─────────────────────────────────────────────────────────┘   │
//! │          ▼                                                              │
//! │  sentosa-db (SQLite)          sentosa-core (pricing, ledgers)          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust,ignore
//! use sentosa_db::Database;
//! use sentosa_register::commands::{commit, scan};
//! use sentosa_register::{CartState, RegisterConfig, ScannerState};
//!
//! let config = RegisterConfig::load_or_default(None);
//! let db = Database::new(config.db_config()).await?;
//! let products = db.products();
//!
//! let scanner = ScannerState::from_config(&config);
//! let cart = CartState::new();
//! scanner.focus();
//!
//! // camera callback
//! match scan::scan_to_cart(&products, &scanner, &cart, barcode).await {
//!     Ok(outcome) => render(outcome),
//!     Err(e) => show(e.notice()),
//! }
//!
//! let receipt = commit::checkout(&products, &cart).await?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod commands;
pub mod config;
pub mod error;
pub mod notice;
pub mod state;
pub mod timer;

// =============================================================================
// Re-exports
// =============================================================================

pub use commands::cart::CartResponse;
pub use commands::commit::{CommitKind, CommitReceipt};
pub use commands::restock::RestockResponse;
pub use commands::scan::{PriceCheck, ScanOutcome};
pub use config::{ConfigError, RegisterConfig};
pub use error::{ApiError, ErrorCode};
pub use notice::{Notice, NoticeLevel};
pub use state::{CartState, RestockState, ScannerState};
