//! # Product Repository
//!
//! Lookup by code, signed stock deltas and upserts against `products`.
//!
//! ## Stock Updates
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │  ❌ Absolute:  UPDATE products SET stock = 7 WHERE code = ?         │
//! │  ✅ Delta:     UPDATE products SET stock = stock - 3 WHERE code = ? │
//! │                                                                     │
//! │  Checkout and restock both go through the delta form with opposite │
//! │  signs, so a stale read in the register can never overwrite stock. │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::{DateTime, Utc};
use sentosa_core::{ProductDocument, ProductDraft, ProductRecord};
use sqlx::SqlitePool;
use tracing::debug;

use crate::error::{DbError, DbResult};
use crate::store::{ProductCatalog, ProductLookup, StockMutator};

/// A `products` row as stored, before validation.
#[derive(Debug, sqlx::FromRow)]
struct ProductRow {
    code: String,
    name: Option<String>,
    price_buy: Option<i64>,
    price_sell: Option<i64>,
    price_wholesale: Option<i64>,
    wholesale_qty: Option<i64>,
    stock: Option<i64>,
    updated_at: Option<DateTime<Utc>>,
}

impl ProductRow {
    fn into_document(self) -> (String, ProductDocument) {
        let document = ProductDocument {
            name: self.name,
            price_buy: self.price_buy,
            price_sell: self.price_sell,
            price_wholesale: self.price_wholesale,
            wholesale_qty: self.wholesale_qty,
            stock: self.stock,
            updated_at: self.updated_at,
        };
        (self.code, document)
    }

    fn into_record(self) -> DbResult<ProductRecord> {
        let (code, document) = self.into_document();
        ProductRecord::from_document(&code, document).map_err(|e| DbError::invalid_record(code, e))
    }
}

/// Repository for product database operations.
///
/// ## Usage
/// ```rust,ignore
/// let repo = db.products();
/// let kopi = repo.get_by_code("001").await?;
/// repo.apply_delta("001", -2).await?;
/// ```
#[derive(Debug, Clone)]
pub struct ProductRepository {
    pool: SqlitePool,
}

impl ProductRepository {
    /// Creates a new ProductRepository.
    pub fn new(pool: SqlitePool) -> Self {
        ProductRepository { pool }
    }

    async fn fetch_row(&self, code: &str) -> DbResult<Option<ProductRow>> {
        let code = code.trim();
        if code.is_empty() {
            return Ok(None);
        }

        debug!(code = %code, "Looking up product");

        let row = sqlx::query_as::<_, ProductRow>(
            r#"
            SELECT code, name, price_buy, price_sell, price_wholesale,
                   wholesale_qty, stock, updated_at
            FROM products
            WHERE code = ?1
            "#,
        )
        .bind(code)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }

    /// Finds a product by code. Surrounding whitespace is ignored.
    ///
    /// ## Errors
    /// * `DbError::InvalidRecord` - the row exists but fails validation
    pub async fn get_by_code(&self, code: &str) -> DbResult<Option<ProductRecord>> {
        self.fetch_row(code)
            .await?
            .map(ProductRow::into_record)
            .transpose()
    }

    /// The row for `code` exactly as stored, valid or not.
    pub async fn get_document(&self, code: &str) -> DbResult<Option<ProductDocument>> {
        Ok(self
            .fetch_row(code)
            .await?
            .map(|row| row.into_document().1))
    }

    /// Adds `delta` to the product's stock (negative for sales).
    ///
    /// ## Errors
    /// * `DbError::NotFound` - no product with this code
    pub async fn apply_delta(&self, code: &str, delta: i64) -> DbResult<()> {
        debug!(code = %code, delta = delta, "Applying stock delta");

        let result = sqlx::query(
            r#"
            UPDATE products
            SET
                stock = COALESCE(stock, 0) + ?2,
                updated_at = ?3
            WHERE code = ?1
            "#,
        )
        .bind(code)
        .bind(delta)
        .bind(Utc::now())
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Product", code));
        }

        Ok(())
    }

    /// Inserts or replaces the product keyed by `draft.code`.
    pub async fn save(&self, draft: &ProductDraft) -> DbResult<ProductRecord> {
        debug!(code = %draft.code, name = %draft.name, "Saving product");

        let document = draft.to_document(Utc::now());

        sqlx::query(
            r#"
            INSERT INTO products (
                code, name, price_buy, price_sell, price_wholesale,
                wholesale_qty, stock, updated_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
            ON CONFLICT(code) DO UPDATE SET
                name = excluded.name,
                price_buy = excluded.price_buy,
                price_sell = excluded.price_sell,
                price_wholesale = excluded.price_wholesale,
                wholesale_qty = excluded.wholesale_qty,
                stock = excluded.stock,
                updated_at = excluded.updated_at
            "#,
        )
        .bind(&draft.code)
        .bind(&document.name)
        .bind(document.price_buy)
        .bind(document.price_sell)
        .bind(document.price_wholesale)
        .bind(document.wholesale_qty)
        .bind(document.stock)
        .bind(document.updated_at)
        .execute(&self.pool)
        .await?;

        ProductRecord::from_document(&draft.code, document)
            .map_err(|e| DbError::invalid_record(draft.code.clone(), e))
    }

    /// Counts products (for diagnostics and the seed tool).
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM products")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}

// =============================================================================
// Store Contracts
// =============================================================================

impl ProductLookup for ProductRepository {
    async fn lookup(&self, code: &str) -> DbResult<Option<ProductRecord>> {
        self.get_by_code(code).await
    }
}

impl StockMutator for ProductRepository {
    async fn apply_delta(&self, code: &str, delta: i64) -> DbResult<()> {
        ProductRepository::apply_delta(self, code, delta).await
    }
}

impl ProductCatalog for ProductRepository {
    async fn stored_document(&self, code: &str) -> DbResult<Option<ProductDocument>> {
        self.get_document(code).await
    }

    async fn save_product(&self, draft: &ProductDraft) -> DbResult<ProductRecord> {
        self.save(draft).await
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Database, DbConfig};
    use sentosa_core::{Money, ProductForm};

    async fn repo() -> (Database, ProductRepository) {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let repo = db.products();
        (db, repo)
    }

    fn draft(code: &str, name: &str, sell: &str, wholesale: &str, pack: &str, stock: &str) -> ProductDraft {
        ProductForm {
            code: code.into(),
            name: name.into(),
            price_buy: String::new(),
            price_sell: sell.into(),
            price_wholesale: wholesale.into(),
            wholesale_qty: pack.into(),
            stock: stock.into(),
        }
        .into_draft()
        .unwrap()
    }

    #[tokio::test]
    async fn test_save_then_lookup() {
        let (_db, repo) = repo().await;
        let saved = repo
            .save(&draft("001", "Kopi Kapal Api", "10000", "90000", "10", "50"))
            .await
            .unwrap();
        assert!(saved.updated_at.is_some());

        let found = repo.lookup("  001\n").await.unwrap().unwrap();
        assert_eq!(found.name, "Kopi Kapal Api");
        assert_eq!(found.sell_price, Money::from_minor(10_000));
        assert_eq!(found.wholesale.unwrap().pack_size, 10);
        assert_eq!(found.stock, 50);
        assert_eq!(repo.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_lookup_unknown_code() {
        let (_db, repo) = repo().await;
        assert!(repo.lookup("999").await.unwrap().is_none());
        assert!(repo.lookup("   ").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_save_overwrites_existing() {
        let (_db, repo) = repo().await;
        repo.save(&draft("001", "Kopi", "10000", "90000", "10", "5"))
            .await
            .unwrap();
        repo.save(&draft("001", "Kopi Sachet", "11000", "", "", "7"))
            .await
            .unwrap();

        let found = repo.get_by_code("001").await.unwrap().unwrap();
        assert_eq!(found.name, "Kopi Sachet");
        assert!(found.wholesale.is_none());
        assert_eq!(found.stock, 7);
        assert_eq!(repo.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_apply_delta_both_directions() {
        let (_db, repo) = repo().await;
        repo.save(&draft("001", "Kopi", "10000", "", "", "3"))
            .await
            .unwrap();

        repo.apply_delta("001", 10).await.unwrap();
        assert_eq!(repo.get_by_code("001").await.unwrap().unwrap().stock, 13);

        // no floor
        repo.apply_delta("001", -20).await.unwrap();
        assert_eq!(repo.get_by_code("001").await.unwrap().unwrap().stock, -7);
    }

    #[tokio::test]
    async fn test_apply_delta_unknown_code() {
        let (_db, repo) = repo().await;
        let err = repo.apply_delta("404", -1).await.unwrap_err();
        assert!(matches!(err, DbError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_sparse_row_gets_defaults() {
        let (db, repo) = repo().await;
        sqlx::query("INSERT INTO products (code, name, price_wholesale) VALUES ('X1', 'Sparse', 5000)")
            .execute(db.pool())
            .await
            .unwrap();

        let found = repo.lookup("X1").await.unwrap().unwrap();
        assert!(found.sell_price.is_zero());
        assert!(found.wholesale.is_none(), "no pack size, no tier");
        assert_eq!(found.stock, 0);

        // null stock counts as zero for deltas
        repo.apply_delta("X1", 4).await.unwrap();
        assert_eq!(repo.lookup("X1").await.unwrap().unwrap().stock, 4);
    }

    #[tokio::test]
    async fn test_invalid_row_is_an_error() {
        let (db, repo) = repo().await;
        sqlx::query("INSERT INTO products (code, price_sell) VALUES ('NONAME', 1000)")
            .execute(db.pool())
            .await
            .unwrap();

        let err = repo.lookup("NONAME").await.unwrap_err();
        assert!(matches!(err, DbError::InvalidRecord { .. }));
    }

    #[tokio::test]
    async fn test_get_document_returns_raw_row() {
        let (db, repo) = repo().await;
        sqlx::query("INSERT INTO products (code, price_sell, price_wholesale, stock) VALUES ('N1', 1000, 90000, 5)")
            .execute(db.pool())
            .await
            .unwrap();

        let doc = repo.get_document(" N1 ").await.unwrap().unwrap();
        assert_eq!(doc.name, None);
        assert_eq!(doc.price_sell, Some(1_000));
        assert_eq!(doc.price_wholesale, Some(90_000));
        assert_eq!(doc.wholesale_qty, None);
        assert_eq!(doc.stock, Some(5));

        assert!(repo.get_document("404").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_closed_pool_is_connectivity_error() {
        let (db, repo) = repo().await;
        db.close().await;

        let err = repo.lookup("001").await.unwrap_err();
        assert!(err.is_connectivity(), "unexpected error: {err:?}");
    }
}
