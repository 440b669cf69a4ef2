//! # Pricing Engine
//!
//! Tiered unit ("ecer") / wholesale-pack ("grosir") pricing for one line,
//! and the order total over many lines.
//!
//! ## The Rule
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  tier active  = wholesale > 0  AND  pack_size > 0  AND  qty ≥ pack_size │
//! │                                                                         │
//! │  tier active:   packs     = qty / pack_size      (floor)               │
//! │                 remainder = qty % pack_size                            │
//! │                 total     = packs × wholesale + remainder × sell       │
//! │                                                                         │
//! │  otherwise:     total     = qty × sell                                 │
//! │                                                                         │
//! │  Example: qty 25, sell 10.000, grosir 90.000 per 10                    │
//! │           2 × 90.000 + 5 × 10.000 = 230.000                            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Greedy and single pass: as many whole packs as fit, the remainder at unit
//! price. No search for a cheaper mix is performed.
//!
//! Quantities are not validated here. Ledgers never produce negatives, but if
//! one is supplied the arithmetic still runs.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::Money;

// =============================================================================
// Price Terms
// =============================================================================

/// Bulk price for a full pack of `pack_size` units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct WholesaleTier {
    /// Price charged per full pack.
    pub pack_price: Money,
    /// Units per pack.
    pub pack_size: i64,
}

impl WholesaleTier {
    /// Builds a tier, or `None` when either value disables it (≤ 0).
    ///
    /// ```rust
    /// use sentosa_core::money::Money;
    /// use sentosa_core::pricing::WholesaleTier;
    ///
    /// assert!(WholesaleTier::new(Money::from_minor(90_000), 10).is_some());
    /// assert!(WholesaleTier::new(Money::zero(), 10).is_none());
    /// assert!(WholesaleTier::new(Money::from_minor(90_000), 0).is_none());
    /// ```
    pub fn new(pack_price: Money, pack_size: i64) -> Option<Self> {
        if pack_price.is_positive() && pack_size > 0 {
            Some(WholesaleTier {
                pack_price,
                pack_size,
            })
        } else {
            None
        }
    }

    /// True when both values are positive. Fields are public, so the engine
    /// re-checks instead of trusting the constructor.
    #[inline]
    pub fn is_enabled(&self) -> bool {
        self.pack_price.is_positive() && self.pack_size > 0
    }
}

/// Everything the engine needs to price one line.
///
/// A cart line carries a copy of these taken when the line was created.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct PriceTerms {
    /// Unit ("ecer") sell price.
    pub unit_price: Money,
    /// Optional bulk tier.
    pub wholesale: Option<WholesaleTier>,
}

impl PriceTerms {
    pub fn new(unit_price: Money, wholesale: Option<WholesaleTier>) -> Self {
        PriceTerms {
            unit_price,
            wholesale,
        }
    }

    /// Unit pricing only.
    pub fn unit_only(unit_price: Money) -> Self {
        PriceTerms {
            unit_price,
            wholesale: None,
        }
    }

    fn active_tier(&self) -> Option<&WholesaleTier> {
        self.wholesale.as_ref().filter(|tier| tier.is_enabled())
    }
}

// =============================================================================
// Line Quote
// =============================================================================

/// A priced line, with the pack / loose breakdown the cart shows
/// ("2 Grosir + 5 Ecer").
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct LineQuote {
    /// Whole packs charged at the wholesale price.
    pub packs: i64,
    /// Units charged at the unit price.
    pub loose_units: i64,
    /// Line total.
    pub total: Money,
    /// Whether the wholesale tier took effect.
    pub tier_applied: bool,
}

/// Prices one line.
///
/// ```rust
/// use sentosa_core::money::Money;
/// use sentosa_core::pricing::{quote_line, PriceTerms, WholesaleTier};
///
/// let terms = PriceTerms::new(
///     Money::from_minor(9_000),
///     WholesaleTier::new(Money::from_minor(100_000), 10),
/// );
/// let quote = quote_line(12, &terms);
/// assert_eq!((quote.packs, quote.loose_units), (1, 2));
/// assert_eq!(quote.total.minor(), 118_000);
/// ```
pub fn quote_line(quantity: i64, terms: &PriceTerms) -> LineQuote {
    match terms.active_tier() {
        Some(tier) if quantity >= tier.pack_size => {
            let packs = quantity / tier.pack_size;
            let loose_units = quantity % tier.pack_size;
            LineQuote {
                packs,
                loose_units,
                total: tier.pack_price.multiply_quantity(packs)
                    + terms.unit_price.multiply_quantity(loose_units),
                tier_applied: true,
            }
        }
        _ => LineQuote {
            packs: 0,
            loose_units: quantity,
            total: terms.unit_price.multiply_quantity(quantity),
            tier_applied: false,
        },
    }
}

/// Line total only.
#[inline]
pub fn line_total(quantity: i64, terms: &PriceTerms) -> Money {
    quote_line(quantity, terms).total
}

/// Sum of line totals.
///
/// Absent quantity or price fields are settled to 0 at the record boundary
/// (see [`crate::product::ProductRecord::from_document`]), so every line here
/// is fully populated.
pub fn order_total<'a, I>(lines: I) -> Money
where
    I: IntoIterator<Item = (i64, &'a PriceTerms)>,
{
    lines
        .into_iter()
        .map(|(quantity, terms)| line_total(quantity, terms))
        .sum()
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn tiered(sell: i64, pack_price: i64, pack_size: i64) -> PriceTerms {
        PriceTerms::new(
            Money::from_minor(sell),
            WholesaleTier::new(Money::from_minor(pack_price), pack_size),
        )
    }

    #[test]
    fn test_two_packs_and_five_loose() {
        let terms = tiered(10_000, 90_000, 10);
        let quote = quote_line(25, &terms);

        assert_eq!(quote.packs, 2);
        assert_eq!(quote.loose_units, 5);
        assert!(quote.tier_applied);
        assert_eq!(quote.total.minor(), 230_000);
    }

    #[test]
    fn test_below_pack_size_is_unit_priced() {
        let terms = tiered(10_000, 90_000, 10);
        let quote = quote_line(9, &terms);

        assert!(!quote.tier_applied);
        assert_eq!(quote.packs, 0);
        assert_eq!(quote.total.minor(), 90_000);
    }

    #[test]
    fn test_exact_pack() {
        let terms = tiered(10_000, 90_000, 10);
        assert_eq!(line_total(10, &terms).minor(), 90_000);
        assert_eq!(line_total(11, &terms).minor(), 100_000);
    }

    #[test]
    fn test_zero_quantity_is_free() {
        assert!(line_total(0, &tiered(10_000, 90_000, 10)).is_zero());
        assert!(line_total(0, &PriceTerms::unit_only(Money::from_minor(5_000))).is_zero());
    }

    #[test]
    fn test_disabled_tier_values() {
        // zero wholesale price, zero pack size
        assert!(WholesaleTier::new(Money::zero(), 10).is_none());
        assert!(WholesaleTier::new(Money::from_minor(90_000), 0).is_none());

        // a hand-built tier with a zero pack size is ignored, not divided by
        let terms = PriceTerms::new(
            Money::from_minor(1_000),
            Some(WholesaleTier {
                pack_price: Money::from_minor(9_000),
                pack_size: 0,
            }),
        );
        assert_eq!(line_total(20, &terms).minor(), 20_000);
    }

    #[test]
    fn test_deep_discount_pack_drops_total_at_boundary() {
        // 9 loose cost more than one discounted pack of 10
        let terms = tiered(10_000, 50_000, 10);
        assert_eq!(line_total(9, &terms).minor(), 90_000);
        assert_eq!(line_total(10, &terms).minor(), 50_000);
    }

    #[test]
    fn test_negative_quantity_still_computes() {
        let terms = PriceTerms::unit_only(Money::from_minor(1_000));
        assert_eq!(line_total(-2, &terms).minor(), -2_000);
    }

    #[test]
    fn test_order_total_mixed_lines() {
        let plain = PriceTerms::unit_only(Money::from_minor(5_000));
        let bulk = tiered(9_000, 100_000, 10);

        let total = order_total([(3, &plain), (12, &bulk)]);
        assert_eq!(total.minor(), 133_000);
    }

    #[test]
    fn test_order_total_empty() {
        assert!(order_total(std::iter::empty()).is_zero());
    }

    proptest! {
        #[test]
        fn prop_unit_pricing_without_tier(qty in 0i64..100_000, sell in 0i64..10_000_000) {
            let terms = PriceTerms::unit_only(Money::from_minor(sell));
            prop_assert_eq!(line_total(qty, &terms).minor(), qty * sell);
        }

        #[test]
        fn prop_tier_formula(
            pack_size in 1i64..500,
            extra in 0i64..100_000,
            sell in 0i64..1_000_000,
            pack_price in 1i64..10_000_000,
        ) {
            let qty = pack_size + extra;
            let terms = tiered(sell, pack_price, pack_size);
            let expected = (qty / pack_size) * pack_price + (qty % pack_size) * sell;
            prop_assert_eq!(line_total(qty, &terms).minor(), expected);
        }

        #[test]
        fn prop_monotonic_in_quantity(
            qty in 0i64..100_000,
            pack_size in 1i64..500,
            sell in 0i64..1_000_000,
            markup in 0i64..1_000_000,
        ) {
            // a pack never cheaper than pack_size - 1 loose units
            let pack_price = (pack_size - 1) * sell + markup;
            let terms = tiered(sell, pack_price, pack_size);
            prop_assert!(line_total(qty + 1, &terms) >= line_total(qty, &terms));
        }
    }
}
