//! # sentosa-db: Product Store for Sentosa Kasir
//!
//! The lookup and stock-mutation contracts the register depends on, plus
//! their SQLite implementation.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Sentosa Kasir Data Flow                             │
//! │                                                                         │
//! │  Register command (scan_to_cart, checkout, ...)                        │
//! │       │  generic over the contracts in `store`                         │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                   sentosa-db (THIS CRATE)                       │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌───────────────┐    ┌──────────────┐  │   │
//! │  │   │    store      │    │  Repository   │    │  Migrations  │  │   │
//! │  │   │ ProductLookup │◄───│ ProductRepo   │    │  (embedded)  │  │   │
//! │  │   │ StockMutator  │    │               │    │ 001_products │  │   │
//! │  │   │ ProductCatalog│    │               │    │              │  │   │
//! │  │   └───────────────┘    └───────┬───────┘    └──────────────┘  │   │
//! │  │                                │ Database (pool.rs)            │   │
//! │  └────────────────────────────────┼────────────────────────────────┘   │
//! │                                   ▼                                     │
//! │                     SQLite  <data dir>/sentosa.db                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use sentosa_db::{Database, DbConfig, ProductLookup};
//!
//! let db = Database::new(DbConfig::new("./sentosa.db")).await?;
//! let products = db.products();
//! let kopi = products.lookup("001").await?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod migrations;
pub mod pool;
pub mod repository;
pub mod store;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{DbError, DbResult};
pub use pool::{Database, DbConfig};
pub use repository::product::ProductRepository;
pub use store::{ProductCatalog, ProductLookup, StockMutator};

// =============================================================================
// Logging
// =============================================================================

/// Installs the global tracing subscriber for binaries.
///
/// `RUST_LOG` wins when set; otherwise `info,sentosa=debug,sqlx=warn`.
pub fn init_tracing() {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,sentosa=debug,sqlx=warn"));

    // A second call (tests, embedding) keeps the first subscriber.
    let _ = tracing_subscriber::registry()
        .with(fmt::layer())
        .with(filter)
        .try_init();
}
