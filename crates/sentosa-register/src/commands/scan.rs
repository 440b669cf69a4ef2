//! # Scan Commands
//!
//! What happens to a decoded barcode on each screen.
//!
//! ## Scan Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Scan → Ledger                                        │
//! │                                                                         │
//! │  barcode ──► scanner.begin_scan() ──── None ──► ScanOutcome::Ignored   │
//! │                     │                                                   │
//! │                     │ permit                                            │
//! │                     ▼                                                   │
//! │              lookup(code) ──── Err ──► LOOKUP_FAILED  ┐                 │
//! │                     │ ────── None ──► NOT_FOUND       ├─ ledger as-is  │
//! │                     ▼                                 ┘                 │
//! │       cashier:  cart.add(product)                                      │
//! │       gudang:   restock.record_scan(code, name)                        │
//! │       cek harga: show product, hold the gate                           │
//! │                     │                                                   │
//! │                     ▼                                                   │
//! │              permit dropped ──► cooldown (or Held)                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use sentosa_core::{CoreError, LineQuote, Money, ProductRecord};
use sentosa_db::ProductLookup;
use serde::Serialize;
use tracing::{debug, info};

use crate::commands::cart::CartResponse;
use crate::commands::restock::RestockResponse;
use crate::config::RegisterConfig;
use crate::error::{ApiError, ErrorCode};
use crate::state::{CartState, RestockState, ScannerState};

/// Result of a scan that did not fail.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", content = "data", rename_all = "camelCase")]
pub enum ScanOutcome<T> {
    /// The scanner was disarmed, busy, cooling down or held.
    Ignored,
    /// The scan was resolved and acted on.
    Applied(T),
}

impl<T> ScanOutcome<T> {
    pub fn is_ignored(&self) -> bool {
        matches!(self, ScanOutcome::Ignored)
    }

    pub fn applied(self) -> Option<T> {
        match self {
            ScanOutcome::Applied(value) => Some(value),
            ScanOutcome::Ignored => None,
        }
    }
}

/// Resolves a scanned code, turning "no such product" into an error.
pub(crate) async fn find_product<L: ProductLookup>(
    lookup: &L,
    code: &str,
) -> Result<ProductRecord, ApiError> {
    let code = code.trim();
    let product = lookup
        .lookup(code)
        .await
        .map_err(|e| ApiError::from_lookup(code, e))?
        .ok_or_else(|| CoreError::ProductNotFound(code.to_string()))?;
    Ok(product)
}

/// Cashier screen: adds the scanned product to the cart.
pub async fn scan_to_cart<L: ProductLookup>(
    lookup: &L,
    scanner: &ScannerState,
    cart: &CartState,
    code: &str,
) -> Result<ScanOutcome<CartResponse>, ApiError> {
    debug!(code = %code, "scan_to_cart command");

    let Some(_permit) = scanner.begin_scan() else {
        return Ok(ScanOutcome::Ignored);
    };

    let product = find_product(lookup, code).await?;
    let response = cart.with_cart_mut(|c| {
        let quantity = c.add(&product);
        debug!(code = %product.code, quantity, "Added to cart");
        CartResponse::from(&*c)
    });

    Ok(ScanOutcome::Applied(response))
}

/// Warehouse screen: counts one more unit of the scanned product.
///
/// Unknown codes must be registered through product maintenance first.
pub async fn scan_to_restock<L: ProductLookup>(
    lookup: &L,
    scanner: &ScannerState,
    restock: &RestockState,
    code: &str,
) -> Result<ScanOutcome<RestockResponse>, ApiError> {
    debug!(code = %code, "scan_to_restock command");

    let Some(_permit) = scanner.begin_scan() else {
        return Ok(ScanOutcome::Ignored);
    };

    let product = find_product(lookup, code).await.map_err(|e| {
        if e.code == ErrorCode::NotFound {
            ApiError::unregistered(code.trim())
        } else {
            e
        }
    })?;

    let response = restock.with_list_mut(|l| {
        l.record_scan(&product.code, &product.name);
        RestockResponse::from(&*l)
    });

    Ok(ScanOutcome::Applied(response))
}

/// Price-check card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceCheck {
    pub product: ProductRecord,
    /// e.g. `Rp 10.000`
    pub unit_price: String,
    /// e.g. `Rp 90.000 / 10 pcs`, when a wholesale tier exists
    pub wholesale_price: Option<String>,
    /// What one full pack would cost, for the "buy a pack and save" line.
    pub pack_quote: Option<LineQuote>,
}

impl PriceCheck {
    fn new(product: ProductRecord, config: &RegisterConfig) -> Self {
        let unit_price = config.format_currency(product.sell_price);
        let wholesale_price = product.wholesale.map(|tier| {
            format!(
                "{} / {} pcs",
                config.format_currency(tier.pack_price),
                tier.pack_size
            )
        });
        let pack_quote = product
            .wholesale
            .map(|tier| sentosa_core::pricing::quote_line(tier.pack_size, &product.price_terms()));

        PriceCheck {
            product,
            unit_price,
            wholesale_price,
            pack_quote,
        }
    }

    /// Saving per pack versus buying the same units loose.
    pub fn pack_saving(&self) -> Option<Money> {
        let tier = self.product.wholesale?;
        let loose = self.product.sell_price.multiply_quantity(tier.pack_size);
        Some(loose - tier.pack_price)
    }
}

/// Price-check screen: shows the product and holds the scanner until
/// [`dismiss_price_check`]. A failed lookup cools down like any other scan.
pub async fn check_price<L: ProductLookup>(
    lookup: &L,
    scanner: &ScannerState,
    config: &RegisterConfig,
    code: &str,
) -> Result<ScanOutcome<PriceCheck>, ApiError> {
    debug!(code = %code, "check_price command");

    let Some(permit) = scanner.begin_scan() else {
        return Ok(ScanOutcome::Ignored);
    };

    let product = find_product(lookup, code).await?;
    info!(code = %product.code, price = %product.sell_price, "Price check");
    permit.hold();

    Ok(ScanOutcome::Applied(PriceCheck::new(product, config)))
}

/// Closes the price-check card and accepts scans again.
pub fn dismiss_price_check(scanner: &ScannerState) {
    debug!("dismiss_price_check command");
    scanner.dismiss();
}
