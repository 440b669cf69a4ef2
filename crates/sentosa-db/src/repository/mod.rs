//! # Repository Module
//!
//! SQLite implementations of the store contracts.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Register command                                                       │
//! │       │  lookup("8992761111113") / apply_delta("001", -3)              │
//! │       ▼                                                                 │
//! │  ProductRepository                                                      │
//! │  ├── get_by_code(&self, code)                                           │
//! │  ├── apply_delta(&self, code, delta)                                    │
//! │  ├── save(&self, draft)                                                 │
//! │  └── count(&self)                                                       │
//! │       │  SQL                                                            │
//! │       ▼                                                                 │
//! │  SQLite `products` table                                                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Available Repositories
//!
//! - [`ProductRepository`](product::ProductRepository) - lookup, stock deltas, upsert

pub mod product;
