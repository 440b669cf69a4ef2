//! # Product Commands
//!
//! The "Master Data" screen: scan a code, edit the form, save.
//!
//! ```text
//!   scan ──► load_product_form ──► known:   form prefilled from the stored row
//!                               ├─► broken:  same, plus a warning naming the bad field
//!                               └─► unknown: blank form + "new product" notice
//!   edit ──► save_product ───────► validated draft upserted by code
//! ```

use sentosa_core::{ProductForm, ProductRecord};
use sentosa_db::ProductCatalog;
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::error::ApiError;
use crate::notice::Notice;

/// Form to show on the maintenance screen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductFormResponse {
    pub form: ProductForm,
    /// True when the code is not in the store yet.
    pub is_new: bool,
    pub notice: Option<Notice>,
}

/// Result of saving the form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveProductResponse {
    pub product: ProductRecord,
    pub notice: Notice,
}

/// Opens the form for `code`.
///
/// The form shows the stored fields as they are, so saving it unchanged
/// writes the same values back. A row that fails validation still opens,
/// with a warning, so the owner can repair it.
///
/// ## Errors
/// * `VALIDATION_ERROR` - blank code
/// * `LOOKUP_FAILED` - the store could not be reached
pub async fn load_product_form<C: ProductCatalog>(
    catalog: &C,
    code: &str,
) -> Result<ProductFormResponse, ApiError> {
    debug!(code = %code, "load_product_form command");

    let code = code.trim();
    if code.is_empty() {
        return Err(ApiError::validation("Scan or type a product code"));
    }

    let stored = catalog
        .stored_document(code)
        .await
        .map_err(|e| ApiError::from_lookup(code, e))?;

    let Some(document) = stored else {
        return Ok(ProductFormResponse {
            form: ProductForm::blank(code),
            is_new: true,
            notice: Some(Notice::info(
                "New product",
                format!("{} is not registered yet. Fill in the details.", code),
            )),
        });
    };

    let form = ProductForm::from_document(code, &document);
    let notice = match ProductRecord::from_document(code, document) {
        Ok(_) => None,
        Err(e) => {
            warn!(code = %code, error = %e, "Stored product is incomplete");
            Some(Notice::warning(
                "Incomplete product",
                format!("{}: {}. Fix it and save.", code, e),
            ))
        }
    };

    Ok(ProductFormResponse {
        form,
        is_new: false,
        notice,
    })
}

/// Validates the form and writes it, replacing any product with that code.
pub async fn save_product<C: ProductCatalog>(
    catalog: &C,
    form: ProductForm,
) -> Result<SaveProductResponse, ApiError> {
    debug!(code = %form.code, "save_product command");

    let draft = form.into_draft()?;
    let product = catalog.save_product(&draft).await?;
    info!(code = %product.code, name = %product.name, "Product saved");

    Ok(SaveProductResponse {
        notice: Notice::success("Saved", format!("{} saved", product.name)),
        product,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::testing::{product, MemoryStore};
    use crate::error::ErrorCode;
    use crate::notice::NoticeLevel;
    use sentosa_core::{Money, ProductDocument};

    #[tokio::test]
    async fn test_load_existing_product() {
        let store = MemoryStore::new();
        store.insert(product("001", "Kopi", 10_000, 90_000, 10));

        let response = load_product_form(&store, " 001").await.unwrap();
        assert!(!response.is_new);
        assert!(response.notice.is_none());
        assert_eq!(response.form.name, "Kopi");
        assert_eq!(response.form.price_wholesale, "90000");
        assert_eq!(response.form.wholesale_qty, "10");
    }

    #[tokio::test]
    async fn test_disabled_tier_survives_load_and_save() {
        let store = MemoryStore::new();
        let form = ProductForm {
            name: "Gula 1kg".into(),
            price_sell: "15000".into(),
            price_wholesale: "90000".into(),
            wholesale_qty: "".into(),
            ..ProductForm::blank("GL1")
        };
        save_product(&store, form).await.unwrap();

        let loaded = load_product_form(&store, "GL1").await.unwrap();
        assert_eq!(loaded.form.price_wholesale, "90000");
        assert!(loaded.notice.is_none());

        save_product(&store, loaded.form).await.unwrap();
        let reloaded = load_product_form(&store, "GL1").await.unwrap();
        assert_eq!(reloaded.form.price_wholesale, "90000");
        assert_eq!(store.document("GL1").unwrap().price_wholesale, Some(90_000));
    }

    #[tokio::test]
    async fn test_load_nameless_row_opens_with_warning() {
        let store = MemoryStore::new();
        store.insert_document(
            "N1",
            ProductDocument {
                price_sell: Some(1_000),
                stock: Some(5),
                ..Default::default()
            },
        );

        let response = load_product_form(&store, "N1").await.unwrap();
        assert!(!response.is_new);
        assert!(response.form.name.is_empty());
        assert_eq!(response.form.price_sell, "1000");
        assert_eq!(response.form.stock, "5");
        let notice = response.notice.unwrap();
        assert_eq!(notice.level, NoticeLevel::Warning);
        assert!(notice.message.contains("name"));

        // saving still needs a name; once given, the row is valid again
        let err = save_product(&store, response.form.clone()).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);

        let fixed = ProductForm {
            name: "Permen Mint".into(),
            ..response.form
        };
        save_product(&store, fixed).await.unwrap();
        assert_eq!(store.get("N1").unwrap().stock, 5);
    }

    #[tokio::test]
    async fn test_load_offline_is_lookup_failure() {
        let store = MemoryStore::new();
        store.set_offline(true);
        let err = load_product_form(&store, "001").await.unwrap_err();
        assert_eq!(err.code, ErrorCode::LookupFailed);
    }

    #[tokio::test]
    async fn test_load_unknown_gives_blank_form() {
        let store = MemoryStore::new();
        let response = load_product_form(&store, "8990001").await.unwrap();
        assert!(response.is_new);
        assert_eq!(response.form.code, "8990001");
        assert!(response.form.name.is_empty());
        assert!(response.notice.is_some());
    }

    #[tokio::test]
    async fn test_load_blank_code_rejected() {
        let store = MemoryStore::new();
        let err = load_product_form(&store, "  ").await.unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);
    }

    #[tokio::test]
    async fn test_save_product() {
        let store = MemoryStore::new();
        let form = ProductForm {
            name: "Gula 1kg".into(),
            price_sell: "17500".into(),
            price_wholesale: "200000".into(),
            wholesale_qty: "12".into(),
            stock: "8".into(),
            ..ProductForm::blank("GL1")
        };

        let response = save_product(&store, form).await.unwrap();
        assert_eq!(response.product.sell_price, Money::from_minor(17_500));
        assert_eq!(response.product.wholesale.map(|t| t.pack_size), Some(12));
        assert_eq!(store.get("GL1").unwrap().stock, 8);
    }

    #[tokio::test]
    async fn test_save_invalid_form() {
        let store = MemoryStore::new();
        let err = save_product(&store, ProductForm::blank("GL1")).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);
        assert!(store.get("GL1").is_none());
    }
}
