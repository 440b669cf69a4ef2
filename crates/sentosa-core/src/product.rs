//! # Product Types
//!
//! Three shapes of the same product, one per boundary:
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  ProductDocument   what the store holds; every field optional          │
//! │        │                                                                │
//! │        │ from_document (validate once, apply defaults)                 │
//! │        ▼                                                                │
//! │  ProductRecord     typed, trusted by pricing and ledgers               │
//! │                                                                         │
//! │  ProductDocument                                                        │
//! │        │ ProductForm::from_document (prefill, raw fields kept)         │
//! │        ▼                                                                │
//! │  ProductForm       free text typed by the shop owner                   │
//! │        │                                                                │
//! │        │ into_draft (lenient ints, then validate)                      │
//! │        ▼                                                                │
//! │  ProductDraft      ready to upsert ──► back to ProductDocument         │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Default Substitution
//! | Stored field      | Absent          | Zero            | Negative |
//! |-------------------|-----------------|-----------------|----------|
//! | `price_sell`      | 0               | 0               | rejected |
//! | `price_wholesale` | tier disabled   | tier disabled   | rejected |
//! | `wholesale_qty`   | tier disabled   | tier disabled   | rejected |
//! | `price_buy`       | none            | 0               | rejected |
//! | `stock`           | 0               | 0               | kept     |

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::Money;
use crate::pricing::{PriceTerms, WholesaleTier};
use crate::quantity::lenient_int;
use crate::validation::{
    validate_code, validate_pack_size, validate_price, validate_product_name, ValidationResult,
};

// =============================================================================
// Stored Document
// =============================================================================

/// Product as persisted, keyed externally by its code.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductDocument {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub price_buy: Option<i64>,
    #[serde(default)]
    pub price_sell: Option<i64>,
    #[serde(default)]
    pub price_wholesale: Option<i64>,
    #[serde(default)]
    pub wholesale_qty: Option<i64>,
    #[serde(default)]
    pub stock: Option<i64>,
    #[serde(default, rename = "updatedAt")]
    pub updated_at: Option<DateTime<Utc>>,
}

// =============================================================================
// Product Record
// =============================================================================

/// A validated product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct ProductRecord {
    /// Scanned code, trimmed. The lookup key.
    pub code: String,
    pub name: String,
    /// Unit ("ecer") sell price.
    pub sell_price: Money,
    /// Bulk tier, present only when enabled.
    pub wholesale: Option<WholesaleTier>,
    /// Cost price, shown on the maintenance screen only.
    pub buy_price: Option<Money>,
    /// May be negative; no floor is enforced.
    pub stock: i64,
    #[ts(as = "Option<String>")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl ProductRecord {
    /// Validates a stored document.
    ///
    /// ```rust
    /// use sentosa_core::product::{ProductDocument, ProductRecord};
    ///
    /// let doc = ProductDocument {
    ///     name: Some("Aqua 600ml".into()),
    ///     price_sell: Some(3_500),
    ///     price_wholesale: Some(0),
    ///     wholesale_qty: Some(24),
    ///     ..Default::default()
    /// };
    /// let record = ProductRecord::from_document(" 8886008101053 ", doc).unwrap();
    /// assert_eq!(record.code, "8886008101053");
    /// assert!(record.wholesale.is_none()); // zero price disables the tier
    /// assert_eq!(record.stock, 0);
    /// ```
    pub fn from_document(code: &str, document: ProductDocument) -> ValidationResult<Self> {
        let code = validate_code(code)?;
        let name = validate_product_name(document.name.as_deref().unwrap_or_default())?;
        let sell_price = validate_price("price_sell", document.price_sell.unwrap_or(0))?;
        let pack_price = validate_price("price_wholesale", document.price_wholesale.unwrap_or(0))?;
        let pack_size = validate_pack_size(document.wholesale_qty.unwrap_or(0))?;
        let buy_price = document
            .price_buy
            .map(|amount| validate_price("price_buy", amount))
            .transpose()?;

        Ok(ProductRecord {
            code,
            name,
            sell_price,
            wholesale: WholesaleTier::new(pack_price, pack_size),
            buy_price,
            stock: document.stock.unwrap_or(0),
            updated_at: document.updated_at,
        })
    }

    /// Terms the Pricing Engine works from.
    pub fn price_terms(&self) -> PriceTerms {
        PriceTerms::new(self.sell_price, self.wholesale)
    }
}

// =============================================================================
// Maintenance Form
// =============================================================================

/// Free-text product form from the maintenance ("Master Data") screen.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct ProductForm {
    pub code: String,
    pub name: String,
    pub price_buy: String,
    pub price_sell: String,
    pub price_wholesale: String,
    pub wholesale_qty: String,
    pub stock: String,
}

impl ProductForm {
    /// Empty form for a code the store does not know yet.
    pub fn blank(code: &str) -> Self {
        ProductForm {
            code: code.trim().to_string(),
            ..Default::default()
        }
    }

    /// Parses numbers leniently (`"12abc"` → 12, junk → 0) and validates.
    pub fn into_draft(self) -> ValidationResult<ProductDraft> {
        Ok(ProductDraft {
            code: validate_code(&self.code)?,
            name: validate_product_name(&self.name)?,
            buy_price: validate_price("price_buy", lenient_int(&self.price_buy))?,
            sell_price: validate_price("price_sell", lenient_int(&self.price_sell))?,
            wholesale_price: validate_price(
                "price_wholesale",
                lenient_int(&self.price_wholesale),
            )?,
            wholesale_qty: validate_pack_size(lenient_int(&self.wholesale_qty))?,
            stock: lenient_int(&self.stock),
        })
    }

    /// Prefills the form from a stored document, field for field.
    ///
    /// Nothing is validated or normalised here: a row with no name opens with
    /// an empty name, and a disabled tier keeps its stored pack price.
    pub fn from_document(code: &str, document: &ProductDocument) -> Self {
        fn text(value: Option<i64>) -> String {
            value.map(|v| v.to_string()).unwrap_or_default()
        }

        ProductForm {
            code: code.trim().to_string(),
            name: document.name.clone().unwrap_or_default(),
            price_buy: text(document.price_buy),
            price_sell: text(document.price_sell),
            price_wholesale: text(document.price_wholesale),
            wholesale_qty: text(document.wholesale_qty),
            stock: text(document.stock),
        }
    }
}

// =============================================================================
// Draft
// =============================================================================

/// Validated product ready to be written.
///
/// Wholesale values are kept as typed, zero included, so the shop owner sees
/// the same numbers next time the form opens.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductDraft {
    pub code: String,
    pub name: String,
    pub buy_price: Money,
    pub sell_price: Money,
    pub wholesale_price: Money,
    pub wholesale_qty: i64,
    pub stock: i64,
}

impl ProductDraft {
    /// Validates a stored or imported document without going through
    /// [`ProductRecord`], so wholesale values survive even when the tier is
    /// disabled. Absent numbers become zero.
    pub fn from_document(code: &str, document: &ProductDocument) -> ValidationResult<Self> {
        let buy_price = document.price_buy.unwrap_or(0);
        let pack_price = document.price_wholesale.unwrap_or(0);

        Ok(ProductDraft {
            code: validate_code(code)?,
            name: validate_product_name(document.name.as_deref().unwrap_or_default())?,
            buy_price: validate_price("price_buy", buy_price)?,
            sell_price: validate_price("price_sell", document.price_sell.unwrap_or(0))?,
            wholesale_price: validate_price("price_wholesale", pack_price)?,
            wholesale_qty: validate_pack_size(document.wholesale_qty.unwrap_or(0))?,
            stock: document.stock.unwrap_or(0),
        })
    }

    /// Document to persist, stamped with `updated_at`.
    pub fn to_document(&self, updated_at: DateTime<Utc>) -> ProductDocument {
        ProductDocument {
            name: Some(self.name.clone()),
            price_buy: Some(self.buy_price.minor()),
            price_sell: Some(self.sell_price.minor()),
            price_wholesale: Some(self.wholesale_price.minor()),
            wholesale_qty: Some(self.wholesale_qty),
            stock: Some(self.stock),
            updated_at: Some(updated_at),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
