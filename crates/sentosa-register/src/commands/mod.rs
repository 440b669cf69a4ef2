//! # Register Commands
//!
//! Everything the register screens can ask for.
//!
//! ## Command Organization
//! ```text
//! commands/
//! ├── mod.rs      ◄─── You are here (exports)
//! ├── scan.rs     ◄─── scan_to_cart, scan_to_restock, check_price
//! ├── cart.rs     ◄─── Cart editing
//! ├── restock.rs  ◄─── Restock list editing
//! ├── commit.rs   ◄─── checkout, commit_restock
//! └── product.rs  ◄─── Master data form
//! ```
//!
//! ## State Injection
//! Each command takes only the state and store contracts it needs:
//! ```rust,ignore
//! // Only needs the cart
//! fn get_cart(cart: &CartState) -> CartResponse
//!
//! // Needs lookup, scanner and cart
//! async fn scan_to_cart<L: ProductLookup>(lookup: &L, scanner: &ScannerState,
//!                                         cart: &CartState, code: &str)
//!
//! // Needs the stock mutator and the cart
//! async fn checkout<M: StockMutator>(store: &M, cart: &CartState)
//! ```

pub mod cart;
pub mod commit;
pub mod product;
pub mod restock;
pub mod scan;

#[cfg(test)]
pub(crate) mod testing {
    //! In-memory store for command tests.

    use std::collections::{HashMap, HashSet};
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
    use std::sync::Mutex;

    use chrono::Utc;
    use sentosa_core::{Money, ProductDocument, ProductDraft, ProductRecord, WholesaleTier};
    use sentosa_db::{DbError, DbResult, ProductCatalog, ProductLookup, StockMutator};

    /// Product with 100 units in stock.
    pub fn product(code: &str, name: &str, sell: i64, pack_price: i64, pack_size: i64) -> ProductRecord {
        ProductRecord {
            code: code.to_string(),
            name: name.to_string(),
            sell_price: Money::from_minor(sell),
            wholesale: WholesaleTier::new(Money::from_minor(pack_price), pack_size),
            buy_price: None,
            stock: 100,
            updated_at: None,
        }
    }

    /// Keeps documents as stored and validates on read, like the SQLite store.
    #[derive(Debug, Default)]
    pub struct MemoryStore {
        documents: Mutex<HashMap<String, ProductDocument>>,
        failing: Mutex<HashSet<String>>,
        calls: Mutex<Vec<(String, i64)>>,
        lookups: AtomicUsize,
        offline: AtomicBool,
    }

    impl MemoryStore {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn insert(&self, product: ProductRecord) {
            let tier = product.wholesale;
            let document = ProductDocument {
                name: Some(product.name.clone()),
                price_buy: product.buy_price.map(|p| p.minor()),
                price_sell: Some(product.sell_price.minor()),
                price_wholesale: tier.map(|t| t.pack_price.minor()),
                wholesale_qty: tier.map(|t| t.pack_size),
                stock: Some(product.stock),
                updated_at: product.updated_at,
            };
            self.insert_document(&product.code, document);
        }

        /// Stores `document` as is, valid or not.
        pub fn insert_document(&self, code: &str, document: ProductDocument) {
            self.documents
                .lock()
                .unwrap()
                .insert(code.to_string(), document);
        }

        pub fn document(&self, code: &str) -> Option<ProductDocument> {
            self.documents.lock().unwrap().get(code).cloned()
        }

        pub fn get(&self, code: &str) -> Option<ProductRecord> {
            self.document(code)
                .and_then(|doc| ProductRecord::from_document(code, doc).ok())
        }

        /// Stock mutations for `code` fail from now on.
        pub fn fail_code(&self, code: &str) {
            self.failing.lock().unwrap().insert(code.to_string());
        }

        pub fn set_offline(&self, offline: bool) {
            self.offline.store(offline, Ordering::SeqCst);
        }

        /// Every `apply_delta` call, in issue order.
        pub fn calls(&self) -> Vec<(String, i64)> {
            self.calls.lock().unwrap().clone()
        }

        pub fn lookups(&self) -> usize {
            self.lookups.load(Ordering::SeqCst)
        }

        fn check_online(&self) -> DbResult<()> {
            if self.offline.load(Ordering::SeqCst) {
                return Err(DbError::ConnectionFailed("offline".into()));
            }
            Ok(())
        }
    }

    impl ProductLookup for MemoryStore {
        async fn lookup(&self, code: &str) -> DbResult<Option<ProductRecord>> {
            self.lookups.fetch_add(1, Ordering::SeqCst);
            self.check_online()?;
            let code = code.trim();
            self.document(code)
                .map(|doc| {
                    ProductRecord::from_document(code, doc)
                        .map_err(|e| DbError::invalid_record(code, e))
                })
                .transpose()
        }
    }

    impl StockMutator for MemoryStore {
        async fn apply_delta(&self, code: &str, delta: i64) -> DbResult<()> {
            self.calls.lock().unwrap().push((code.to_string(), delta));
            self.check_online()?;
            if self.failing.lock().unwrap().contains(code) {
                return Err(DbError::QueryFailed(format!("write to {} timed out", code)));
            }

            let mut documents = self.documents.lock().unwrap();
            let document = documents
                .get_mut(code)
                .ok_or_else(|| DbError::not_found("Product", code))?;
            document.stock = Some(document.stock.unwrap_or(0) + delta);
            Ok(())
        }
    }

    impl ProductCatalog for MemoryStore {
        async fn stored_document(&self, code: &str) -> DbResult<Option<ProductDocument>> {
            self.check_online()?;
            Ok(self.document(code.trim()))
        }

        async fn save_product(&self, draft: &ProductDraft) -> DbResult<ProductRecord> {
            let document = draft.to_document(Utc::now());
            let record = ProductRecord::from_document(&draft.code, document.clone())
                .map_err(|e| DbError::invalid_record(draft.code.clone(), e))?;
            self.insert_document(&draft.code, document);
            Ok(record)
        }
    }
}
